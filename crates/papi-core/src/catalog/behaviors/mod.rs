//! Behavior options (`set_*` builder methods).

/// Declare a behavior whose only option is an `enabled` flag.
macro_rules! toggle {
    ($(#[$doc:meta])* $ty:ident, $name:literal, $default:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $ty {
            pub enabled: Option<bool>,
        }

        impl $crate::catalog::RuleOptions for $ty {
            const KIND: ::papi_types::rule::RuleKind = ::papi_types::rule::RuleKind::Behavior;
            const NAME: &'static str = $name;

            fn apply_defaults(&mut self) {
                $crate::catalog::fill(&mut self.enabled, $default);
            }
        }
    };
}

mod caching;
mod edge_logic;
mod headers;
mod observability;
mod origin;
mod performance;
mod routing;
mod security;

pub use caching::*;
pub use edge_logic::*;
pub use headers::*;
pub use observability::*;
pub use origin::*;
pub use performance::*;
pub use routing::*;
pub use security::*;
