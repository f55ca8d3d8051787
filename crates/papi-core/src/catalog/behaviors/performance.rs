//! Transport and compression tuning, and which request methods are allowed.

use papi_types::rule::RuleKind;
use serde::{Deserialize, Serialize};

use crate::catalog::{RuleOptions, fill};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GzipBehavior {
    OriginResponse,
    Always,
    Never,
}

/// Compress responses sent to the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GzipResponse {
    pub behavior: Option<GzipBehavior>,
}

impl RuleOptions for GzipResponse {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "gzipResponse";

    fn apply_defaults(&mut self) {
        fill(&mut self.behavior, GzipBehavior::OriginResponse);
    }
}

toggle!(Brotli, "brotli", true);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Http3 {
    pub enable: Option<bool>,
}

impl RuleOptions for Http3 {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "http3";

    fn apply_defaults(&mut self) {
        fill(&mut self.enable, true);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SureRouteType {
    Performance,
    CustomMap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToHostStatus {
    IncomingHh,
    Other,
}

/// Race alternate routes to the origin and use the fastest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SureRoute {
    pub enabled: Option<bool>,
    #[serde(rename = "type")]
    pub route_type: Option<SureRouteType>,
    pub custom_map: Option<String>,
    pub test_object_url: Option<String>,
    pub to_host_status: Option<ToHostStatus>,
    pub to_host: Option<String>,
    pub race_stat_ttl: Option<String>,
    pub force_ssl_forward: Option<bool>,
    pub enable_custom_key: Option<bool>,
    pub custom_stat_key: Option<String>,
}

impl RuleOptions for SureRoute {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "sureRoute";

    fn apply_defaults(&mut self) {
        fill(&mut self.enabled, true);
        if self.enabled == Some(true) {
            fill(&mut self.route_type, SureRouteType::Performance);
            fill(&mut self.to_host_status, ToHostStatus::IncomingHh);
            fill(&mut self.race_stat_ttl, "30m".to_string());
            fill(&mut self.force_ssl_forward, false);
            fill(&mut self.enable_custom_key, false);
        }
    }
}

toggle!(AllowTransferEncoding, "allowTransferEncoding", true);

toggle!(
    /// Let all HTTP requests use the cache hierarchy, not only cacheable ones.
    AllHttpInCacheHierarchy,
    "allHttpInCacheHierarchy",
    true
);

toggle!(
    /// Dynamic throughput optimization. The rule name's spelling is PAPI's.
    DynamicThroughtputOptimization,
    "dynamicThroughtputOptimization",
    true
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowPost {
    pub enabled: Option<bool>,
    pub allow_without_content_length: Option<bool>,
}

impl RuleOptions for AllowPost {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "allowPost";

    fn apply_defaults(&mut self) {
        fill(&mut self.enabled, true);
        if self.enabled == Some(true) {
            fill(&mut self.allow_without_content_length, false);
        }
    }
}

toggle!(AllowPut, "allowPut", false);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowDelete {
    pub enabled: Option<bool>,
    pub allow_body: Option<bool>,
}

impl RuleOptions for AllowDelete {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "allowDelete";

    fn apply_defaults(&mut self) {
        fill(&mut self.enabled, false);
        if self.enabled == Some(true) {
            fill(&mut self.allow_body, false);
        }
    }
}

toggle!(AllowPatch, "allowPatch", false);

toggle!(AllowOptions, "allowOptions", true);
