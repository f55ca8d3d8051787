//! Deploy configuration types.
//!
//! `DeployConfig` represents the `papi.toml` that tells the deploy workflow
//! which property to update and how to activate it.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::papi::{Network, PropertyRef};
use crate::rule_tree::RULE_FORMAT;

/// Settings for uploading and activating a rule tree.
///
/// Only `property_id` is required; everything else has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Property to update (e.g. "prp_123456").
    pub property_id: String,

    #[serde(default)]
    pub contract_id: Option<String>,

    #[serde(default)]
    pub group_id: Option<String>,

    /// Activation network (defaults to staging).
    #[serde(default)]
    pub network: Network,

    /// Addresses notified when the activation completes.
    #[serde(default)]
    pub notify_emails: Vec<String>,

    /// Activation note. A timestamped note is generated when absent.
    #[serde(default)]
    pub note: Option<String>,

    /// Continue to activation even when validation reports warnings.
    #[serde(default)]
    pub ignore_warnings: bool,

    /// Save and validate the rules but never activate.
    #[serde(default)]
    pub stop_property_activation: bool,

    /// Rule format stamped on generated rule trees.
    #[serde(default = "default_rule_format")]
    pub rule_format: String,
}

fn default_rule_format() -> String {
    RULE_FORMAT.to_string()
}

impl DeployConfig {
    pub fn new(property_id: impl Into<String>) -> Self {
        Self {
            property_id: property_id.into(),
            contract_id: None,
            group_id: None,
            network: Network::default(),
            notify_emails: Vec::new(),
            note: None,
            ignore_warnings: false,
            stop_property_activation: false,
            rule_format: default_rule_format(),
        }
    }

    pub fn property_ref(&self) -> PropertyRef {
        PropertyRef {
            property_id: self.property_id.clone(),
            contract_id: self.contract_id.clone(),
            group_id: self.group_id.clone(),
        }
    }

    /// Check the fields the workflow relies on.
    ///
    /// - `property_id` must be non-empty
    /// - every notify address must look like `local@domain`
    /// - `rule_format` must be `latest` or start with `v`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.property_id.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "property_id must not be empty".to_string(),
            ));
        }

        for email in &self.notify_emails {
            let valid = email
                .split_once('@')
                .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
            if !valid {
                return Err(ConfigError::Invalid(format!(
                    "invalid notify email: '{email}'"
                )));
            }
        }

        if self.rule_format != "latest" && !self.rule_format.starts_with('v') {
            return Err(ConfigError::Invalid(format!(
                "invalid rule_format '{}' (expected 'latest' or 'vYYYY-MM-DD')",
                self.rule_format
            )));
        }

        Ok(())
    }
}
