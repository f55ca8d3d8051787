//! Property Manager API request/response types.
//!
//! These model the data exchanged with the versioning, rule-saving and
//! activation endpoints. The HTTP client itself lives outside this workspace;
//! it only has to speak these types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifies the property being deployed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRef {
    pub property_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

impl PropertyRef {
    pub fn new(property_id: impl Into<String>) -> Self {
        Self {
            property_id: property_id.into(),
            contract_id: None,
            group_id: None,
        }
    }
}

/// A property version as reported by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyVersion {
    pub property_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_format: Option<String>,
}

impl PropertyVersion {
    pub fn new(property_version: u32) -> Self {
        Self {
            property_version,
            etag: None,
            rule_format: None,
        }
    }
}

/// A validation problem reported when rules are saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationMessage {
    #[serde(rename = "type", default)]
    pub message_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_location: Option<String>,
}

impl fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error_location {
            Some(location) => write!(f, "{} ({}): {}", self.title, location, self.detail),
            None => write!(f, "{}: {}", self.title, self.detail),
        }
    }
}

/// Result of saving a rule tree into a property version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRulesResponse {
    #[serde(default)]
    pub errors: Vec<ValidationMessage>,
    #[serde(default)]
    pub warnings: Vec<ValidationMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

impl SaveRulesResponse {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Activation target network.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Network {
    #[default]
    Staging,
    Production,
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Staging => write!(f, "STAGING"),
            Network::Production => write!(f, "PRODUCTION"),
        }
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "staging" => Ok(Network::Staging),
            "production" | "prod" => Ok(Network::Production),
            other => Err(format!("invalid network: '{other}'")),
        }
    }
}

/// Body of an activation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationRequest {
    pub property_version: u32,
    pub network: Network,
    pub note: String,
    pub notify_emails: Vec<String>,
    #[serde(default)]
    pub acknowledge_all_warnings: bool,
    #[serde(default)]
    pub use_fast_fallback: bool,
}

/// Handle to a submitted activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activation {
    pub activation_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activation_link: Option<String>,
}

/// Errors surfaced by a Property Manager API client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The credentials were rejected (HTTP 403).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The API could not be reached.
    #[error("connection error: {0}")]
    Connection(String),

    /// Any other non-success HTTP status.
    #[error("HTTP {status}: {detail}")]
    Http { status: u16, detail: String },

    /// The response body could not be understood.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build an error from an HTTP status, mapping 403 to `Forbidden`.
    pub fn from_status(status: u16, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        if status == 403 {
            ApiError::Forbidden(detail)
        } else {
            ApiError::Http { status, detail }
        }
    }

    /// The HTTP status behind the error, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Forbidden(_) => Some(403),
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Connection(_) | ApiError::Decode(_) => None,
        }
    }
}
