//! Rule catalog, property builder and deploy workflow.
//!
//! The builder surface (`property::Property`) forwards every criterion and
//! behavior, defaults filled, to a `PropertyDelegate`. `rule_tree` holds the
//! delegate that assembles a `RuleTree`; `deploy` pushes the result to
//! Property Manager through the `PropertyManagerApi` port.
//!
//! Depends only on `papi-types` -- never on `papi-infra` or any IO crate.

pub mod catalog;
pub mod deploy;
pub mod normalize;
pub mod property;
pub mod rule_tree;
