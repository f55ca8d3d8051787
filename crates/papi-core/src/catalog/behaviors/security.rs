//! Token verification and WAF attachment.

use papi_types::rule::RuleKind;
use serde::{Deserialize, Serialize};

use crate::catalog::{RuleOptions, fill};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenLocation {
    Cookie,
    QueryString,
    ClientRequestHeader,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenAlgorithm {
    Sha256,
    Sha1,
    Md5,
}

/// Verify edge auth tokens before serving content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyTokenAuthorization {
    pub use_advanced: Option<bool>,
    pub location: Option<TokenLocation>,
    pub location_id: Option<String>,
    pub algorithm: Option<TokenAlgorithm>,
    pub escape_hop_by_hop: Option<bool>,
    pub ignore_query_string: Option<bool>,
    pub key: Option<String>,
    pub transition_key: Option<bool>,
    pub secondary_key: Option<String>,
    pub failure_response: Option<bool>,
}

impl RuleOptions for VerifyTokenAuthorization {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "verifyTokenAuthorization";

    fn apply_defaults(&mut self) {
        fill(&mut self.use_advanced, false);
        fill(&mut self.location, TokenLocation::Cookie);
        fill(&mut self.location_id, "__token__".to_string());
        fill(&mut self.algorithm, TokenAlgorithm::Sha256);
        fill(&mut self.escape_hop_by_hop, false);
        fill(&mut self.ignore_query_string, false);
        fill(&mut self.transition_key, false);
        fill(&mut self.failure_response, true);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirewallConfiguration {
    pub config_id: Option<u64>,
    pub production_status: Option<String>,
    pub staging_status: Option<String>,
    pub production_version: Option<u32>,
    pub staging_version: Option<u32>,
    pub file_name: Option<String>,
}

/// Attach an application security configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebApplicationFirewall {
    pub firewall_configuration: Option<FirewallConfiguration>,
}

impl RuleOptions for WebApplicationFirewall {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "webApplicationFirewall";
}
