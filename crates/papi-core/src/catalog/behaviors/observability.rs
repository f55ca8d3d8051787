//! Logging, real-user monitoring and request tracing.

use papi_types::rule::{OptionMeta, RuleKind};
use serde::{Deserialize, Serialize};

use crate::catalog::{RuleOptions, fill};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogCookies {
    Off,
    All,
    Some,
}

/// Which request fields go into the access logs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub log_host: Option<bool>,
    pub log_referer: Option<bool>,
    pub log_user_agent: Option<bool>,
    pub log_accept_language: Option<bool>,
    pub log_cookies: Option<LogCookies>,
    pub cookies: Option<Vec<String>>,
    pub log_custom_log_field: Option<bool>,
    pub custom_log_field: Option<String>,
    #[serde(rename = "logEdgeIP")]
    pub log_edge_ip: Option<bool>,
    pub log_x_forwarded_for: Option<bool>,
}

impl RuleOptions for Report {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "report";
    const META: OptionMeta = OptionMeta::allows_vars(&["customLogField"]);

    fn apply_defaults(&mut self) {
        fill(&mut self.log_host, false);
        fill(&mut self.log_referer, false);
        fill(&mut self.log_user_agent, true);
        fill(&mut self.log_accept_language, false);
        fill(&mut self.log_cookies, LogCookies::Off);
        fill(&mut self.log_custom_log_field, false);
        fill(&mut self.log_edge_ip, false);
        fill(&mut self.log_x_forwarded_for, false);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoaderVersion {
    V10,
    V12,
    Latest,
    Beta,
}

/// Inject the mPulse RUM snippet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MPulse {
    pub enabled: Option<bool>,
    pub require_pci: Option<bool>,
    pub loader_version: Option<LoaderVersion>,
    pub api_key: Option<String>,
    pub buffer_size: Option<String>,
    pub title_optional: Option<String>,
    pub config_override: Option<String>,
}

impl RuleOptions for MPulse {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "mPulse";

    fn apply_defaults(&mut self) {
        fill(&mut self.enabled, true);
        if self.enabled == Some(true) {
            fill(&mut self.require_pci, false);
            fill(&mut self.loader_version, LoaderVersion::V12);
            fill(&mut self.title_optional, String::new());
        }
    }
}

toggle!(RealUserMonitoring, "realUserMonitoring", true);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GrnOutput {
    ResponseHeader,
    RequestHeader,
    BothHeaders,
    AssignVariable,
}

impl GrnOutput {
    pub fn writes_header(self) -> bool {
        !matches!(self, GrnOutput::AssignVariable)
    }
}

/// Expose the global request number as a header or variable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalRequestNumber {
    pub output_option: Option<GrnOutput>,
    pub header_name: Option<String>,
    pub variable_name: Option<String>,
}

impl RuleOptions for GlobalRequestNumber {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "globalRequestNumber";
    const META: OptionMeta = OptionMeta::variable(&["variableName"]);

    fn apply_defaults(&mut self) {
        fill(&mut self.output_option, GrnOutput::ResponseHeader);
        if self.output_option.is_some_and(GrnOutput::writes_header) {
            fill(&mut self.header_name, "Akamai-GRN".to_string());
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breadcrumbs {
    pub enabled: Option<bool>,
    pub opt_mode: Option<bool>,
    pub logging_enabled: Option<bool>,
}

impl RuleOptions for Breadcrumbs {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "breadcrumbs";

    fn apply_defaults(&mut self) {
        fill(&mut self.enabled, true);
        if self.enabled == Some(true) {
            fill(&mut self.opt_mode, false);
            fill(&mut self.logging_enabled, false);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StreamType {
    Beacon,
    Log,
    BeaconAndLog,
}

/// Send request logs to DataStream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Datastream {
    pub stream_type: Option<StreamType>,
    pub beacon_stream_title: Option<String>,
    pub datastream_ids: Option<String>,
    pub log_enabled: Option<bool>,
    pub log_stream_name: Option<Vec<String>>,
    pub sampling_percentage: Option<u8>,
    pub log_stream_title: Option<String>,
}

impl RuleOptions for Datastream {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "datastream";

    fn apply_defaults(&mut self) {
        fill(&mut self.stream_type, StreamType::Log);
        if matches!(self.stream_type, Some(StreamType::Log | StreamType::BeaconAndLog)) {
            fill(&mut self.log_enabled, true);
        }
        if self.log_enabled == Some(true) {
            fill(&mut self.sampling_percentage, 100);
        }
    }
}
