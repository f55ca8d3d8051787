//! Criteria matching on properties of the incoming request.

use papi_types::rule::{OptionMeta, RuleKind};
use serde::{Deserialize, Serialize};

use super::{IsMatch, ListMatch, PatternMatch, PresenceMatch, ValueMatch};
use crate::catalog::{RuleOptions, fill};

/// Match the hostname the client requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hostname {
    pub match_operator: Option<ListMatch>,
    pub values: Option<Vec<String>>,
}

impl RuleOptions for Hostname {
    const KIND: RuleKind = RuleKind::Criteria;
    const NAME: &'static str = "hostname";

    fn apply_defaults(&mut self) {
        fill(&mut self.match_operator, ListMatch::IsOneOf);
    }
}

/// Match the URL path, with `*` and `?` wildcards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Path {
    pub match_operator: Option<PatternMatch>,
    pub values: Option<Vec<String>>,
    pub match_case_sensitive: Option<bool>,
    pub normalize: Option<bool>,
}

impl RuleOptions for Path {
    const KIND: RuleKind = RuleKind::Criteria;
    const NAME: &'static str = "path";

    fn apply_defaults(&mut self) {
        fill(&mut self.match_operator, PatternMatch::MatchesOneOf);
        fill(&mut self.match_case_sensitive, false);
        fill(&mut self.normalize, false);
    }
}

/// Match the file extension at the end of the path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileExtension {
    pub match_operator: Option<ListMatch>,
    pub values: Option<Vec<String>>,
    pub match_case_sensitive: Option<bool>,
}

impl RuleOptions for FileExtension {
    const KIND: RuleKind = RuleKind::Criteria;
    const NAME: &'static str = "fileExtension";

    fn apply_defaults(&mut self) {
        fill(&mut self.match_operator, ListMatch::IsOneOf);
        fill(&mut self.match_case_sensitive, false);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilenameMatch {
    IsOneOf,
    IsNotOneOf,
    IsEmpty,
    IsNotEmpty,
}

/// Match the final path segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filename {
    pub match_operator: Option<FilenameMatch>,
    pub values: Option<Vec<String>>,
    pub match_case_sensitive: Option<bool>,
}

impl RuleOptions for Filename {
    const KIND: RuleKind = RuleKind::Criteria;
    const NAME: &'static str = "filename";

    fn apply_defaults(&mut self) {
        fill(&mut self.match_operator, FilenameMatch::IsOneOf);
        if matches!(
            self.match_operator,
            Some(FilenameMatch::IsOneOf | FilenameMatch::IsNotOneOf)
        ) {
            fill(&mut self.match_case_sensitive, true);
        }
    }
}

/// Match a request header by name and value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestHeader {
    pub header_name: Option<String>,
    pub match_operator: Option<PresenceMatch>,
    pub values: Option<Vec<String>>,
    pub match_wildcard_name: Option<bool>,
    pub match_wildcard_value: Option<bool>,
    pub match_case_sensitive_value: Option<bool>,
}

impl RuleOptions for RequestHeader {
    const KIND: RuleKind = RuleKind::Criteria;
    const NAME: &'static str = "requestHeader";

    fn apply_defaults(&mut self) {
        fill(&mut self.match_operator, PresenceMatch::IsOneOf);
        fill(&mut self.match_wildcard_name, false);
        if self.match_operator.is_some_and(PresenceMatch::is_list) {
            fill(&mut self.match_wildcard_value, false);
            fill(&mut self.match_case_sensitive_value, true);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HttpMethod {
    Get,
    Post,
    Head,
    Put,
    Patch,
    HttpDelete,
    Options,
}

/// Match the request method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMethod {
    pub match_operator: Option<IsMatch>,
    pub value: Option<HttpMethod>,
}

impl RuleOptions for RequestMethod {
    const KIND: RuleKind = RuleKind::Criteria;
    const NAME: &'static str = "requestMethod";

    fn apply_defaults(&mut self) {
        fill(&mut self.match_operator, IsMatch::Is);
        fill(&mut self.value, HttpMethod::Get);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Protocol {
    Http,
    Https,
}

/// Match the request scheme.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestProtocol {
    pub value: Option<Protocol>,
}

impl RuleOptions for RequestProtocol {
    const KIND: RuleKind = RuleKind::Criteria;
    const NAME: &'static str = "requestProtocol";

    fn apply_defaults(&mut self) {
        fill(&mut self.value, Protocol::Http);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestTypeValue {
    ClientReq,
    EsiFragment,
    EwSubrequest,
}

/// Match client requests, ESI fragments or EdgeWorkers sub-requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestType {
    pub match_operator: Option<IsMatch>,
    pub value: Option<RequestTypeValue>,
}

impl RuleOptions for RequestType {
    const KIND: RuleKind = RuleKind::Criteria;
    const NAME: &'static str = "requestType";

    fn apply_defaults(&mut self) {
        fill(&mut self.match_operator, IsMatch::Is);
        fill(&mut self.value, RequestTypeValue::ClientReq);
    }
}

/// Match a query string parameter by name and value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryStringParameter {
    pub parameter_name: Option<String>,
    pub match_operator: Option<ValueMatch>,
    pub values: Option<Vec<String>>,
    pub lower_bound: Option<i64>,
    pub upper_bound: Option<i64>,
    pub match_case_sensitive_name: Option<bool>,
    pub match_case_sensitive_value: Option<bool>,
    pub match_wildcard_value: Option<bool>,
    pub escape_value: Option<bool>,
}

impl RuleOptions for QueryStringParameter {
    const KIND: RuleKind = RuleKind::Criteria;
    const NAME: &'static str = "queryStringParameter";

    fn apply_defaults(&mut self) {
        fill(&mut self.match_operator, ValueMatch::IsOneOf);
        fill(&mut self.match_case_sensitive_name, true);
        if self.match_operator.is_some_and(ValueMatch::is_list) {
            fill(&mut self.match_case_sensitive_value, true);
            fill(&mut self.match_wildcard_value, false);
            fill(&mut self.escape_value, false);
        }
    }
}

/// Match a request cookie by name and value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cookie {
    pub cookie_name: Option<String>,
    pub match_operator: Option<ValueMatch>,
    pub values: Option<Vec<String>>,
    pub lower_bound: Option<i64>,
    pub upper_bound: Option<i64>,
    pub match_wildcard_name: Option<bool>,
    pub match_case_sensitive_name: Option<bool>,
    pub match_wildcard_value: Option<bool>,
    pub match_case_sensitive_value: Option<bool>,
}

impl RuleOptions for Cookie {
    const KIND: RuleKind = RuleKind::Criteria;
    const NAME: &'static str = "cookie";

    fn apply_defaults(&mut self) {
        fill(&mut self.match_operator, ValueMatch::IsOneOf);
        fill(&mut self.match_wildcard_name, false);
        fill(&mut self.match_case_sensitive_name, true);
        if self.match_operator.is_some_and(ValueMatch::is_list) {
            fill(&mut self.match_wildcard_value, false);
            fill(&mut self.match_case_sensitive_value, true);
        }
    }
}

/// Match the client IP address against addresses or CIDR blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientIp {
    pub match_operator: Option<ListMatch>,
    pub values: Option<Vec<String>>,
    pub use_headers: Option<bool>,
}

impl RuleOptions for ClientIp {
    const KIND: RuleKind = RuleKind::Criteria;
    const NAME: &'static str = "clientIp";

    fn apply_defaults(&mut self) {
        fill(&mut self.match_operator, ListMatch::IsOneOf);
        fill(&mut self.use_headers, false);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CertificateValidity {
    Valid,
    Invalid,
    Ignore,
}

/// Match on the presence and validity of a mutual-TLS client certificate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientCertificate {
    pub is_certificate_present: Option<bool>,
    pub is_certificate_valid: Option<CertificateValidity>,
}

impl RuleOptions for ClientCertificate {
    const KIND: RuleKind = RuleKind::Criteria;
    const NAME: &'static str = "clientCertificate";

    fn apply_defaults(&mut self) {
        fill(&mut self.is_certificate_present, true);
        if self.is_certificate_present == Some(true) {
            fill(&mut self.is_certificate_valid, CertificateValidity::Ignore);
        }
    }
}

/// Match the `User-Agent` header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAgent {
    pub match_operator: Option<ListMatch>,
    pub values: Option<Vec<String>>,
    pub match_wildcard: Option<bool>,
    pub match_case_sensitive: Option<bool>,
}

impl RuleOptions for UserAgent {
    const KIND: RuleKind = RuleKind::Criteria;
    const NAME: &'static str = "userAgent";

    fn apply_defaults(&mut self) {
        fill(&mut self.match_operator, ListMatch::IsOneOf);
        fill(&mut self.match_wildcard, true);
        fill(&mut self.match_case_sensitive, false);
    }
}

/// Match a string (usually built from variables) against a regular expression.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegularExpression {
    pub match_string: Option<String>,
    pub regex: Option<String>,
    pub case_sensitive: Option<bool>,
}

impl RuleOptions for RegularExpression {
    const KIND: RuleKind = RuleKind::Criteria;
    const NAME: &'static str = "regularExpression";
    const META: OptionMeta = OptionMeta::allows_vars(&["matchString"]);

    fn apply_defaults(&mut self) {
        fill(&mut self.case_sensitive, true);
    }
}
