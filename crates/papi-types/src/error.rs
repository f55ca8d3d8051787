use thiserror::Error;

use crate::rule::RuleKind;

/// Errors surfaced when a rule tree is finished.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("failed to serialize {kind} '{name}' options: {message}")]
    Serialize {
        kind: RuleKind,
        name: String,
        message: String,
    },

    #[error("rule '{rule}' references undeclared variable '{variable}' in '{field}'")]
    UndeclaredVariable {
        variable: String,
        rule: String,
        field: String,
    },
}

/// Errors related to loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(String),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}
