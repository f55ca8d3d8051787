//! Upload a rule tree to Property Manager and activate it.
//!
//! - `PropertyManagerApi`: RPITIT trait over the four API calls
//! - `upload_and_activate_property`: create, save, validate, activate

pub mod api;
pub mod workflow;

pub use api::PropertyManagerApi;
pub use workflow::{DeployError, DeployOutcome, DeployStep, upload_and_activate_property};
