//! Criteria evaluated against the origin response or the edge's handling of it.

use papi_types::rule::RuleKind;
use serde::{Deserialize, Serialize};

use super::{IsMatch, ListMatch, ValueMatch};
use crate::catalog::{RuleOptions, fill};

/// Match a response header by name and value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseHeader {
    pub header_name: Option<String>,
    pub match_operator: Option<ValueMatch>,
    pub values: Option<Vec<String>>,
    pub lower_bound: Option<i64>,
    pub upper_bound: Option<i64>,
    pub match_wildcard_name: Option<bool>,
    pub match_case_sensitive_value: Option<bool>,
    pub match_wildcard_value: Option<bool>,
}

impl RuleOptions for ResponseHeader {
    const KIND: RuleKind = RuleKind::Criteria;
    const NAME: &'static str = "responseHeader";

    fn apply_defaults(&mut self) {
        fill(&mut self.match_operator, ValueMatch::IsOneOf);
        fill(&mut self.match_wildcard_name, false);
        if self.match_operator.is_some_and(ValueMatch::is_list) {
            fill(&mut self.match_case_sensitive_value, true);
            fill(&mut self.match_wildcard_value, false);
        }
    }
}

/// Match the response `Content-Type`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentType {
    pub match_operator: Option<ListMatch>,
    pub values: Option<Vec<String>>,
    pub match_wildcard: Option<bool>,
    pub match_case_sensitive: Option<bool>,
}

impl RuleOptions for ContentType {
    const KIND: RuleKind = RuleKind::Criteria;
    const NAME: &'static str = "contentType";

    fn apply_defaults(&mut self) {
        fill(&mut self.match_operator, ListMatch::IsOneOf);
        fill(&mut self.match_wildcard, false);
        fill(&mut self.match_case_sensitive, false);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseCodeMatch {
    IsOneOf,
    IsNotOneOf,
    IsBetween,
    IsNotBetween,
}

/// Match the origin's HTTP status code, as a list or a range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponseCode {
    pub match_operator: Option<ResponseCodeMatch>,
    pub values: Option<Vec<String>>,
    pub lower_bound: Option<u16>,
    pub upper_bound: Option<u16>,
}

impl RuleOptions for MatchResponseCode {
    const KIND: RuleKind = RuleKind::Criteria;
    const NAME: &'static str = "matchResponseCode";

    fn apply_defaults(&mut self) {
        fill(&mut self.match_operator, ResponseCodeMatch::IsOneOf);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CacheabilityValue {
    NoStore,
    BypassCache,
    Cacheable,
}

/// Match the cache disposition of the current response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cacheability {
    pub match_operator: Option<IsMatch>,
    pub value: Option<CacheabilityValue>,
}

impl RuleOptions for Cacheability {
    const KIND: RuleKind = RuleKind::Criteria;
    const NAME: &'static str = "cacheability";

    fn apply_defaults(&mut self) {
        fill(&mut self.match_operator, IsMatch::Is);
        fill(&mut self.value, CacheabilityValue::Cacheable);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OriginTimeoutMatch {
    OriginTimedOut,
}

/// Match when the origin did not respond in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginTimeout {
    pub match_operator: Option<OriginTimeoutMatch>,
}

impl RuleOptions for OriginTimeout {
    const KIND: RuleKind = RuleKind::Criteria;
    const NAME: &'static str = "originTimeout";

    fn apply_defaults(&mut self) {
        fill(&mut self.match_operator, OriginTimeoutMatch::OriginTimedOut);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecStatus {
    Error,
    Failure,
}

/// Match when an EdgeWorker did not complete.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeWorkersFailure {
    pub exec_status: Option<ExecStatus>,
}

impl RuleOptions for EdgeWorkersFailure {
    const KIND: RuleKind = RuleKind::Criteria;
    const NAME: &'static str = "edgeWorkersFailure";

    fn apply_defaults(&mut self) {
        fill(&mut self.exec_status, ExecStatus::Error);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenAuthorizationMatch {
    IsSuccess,
    IsCustomFailure,
    IsAnyFailure,
}

/// Match the outcome of token verification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAuthorization {
    pub match_operator: Option<TokenAuthorizationMatch>,
    pub status_list: Option<Vec<String>>,
}

impl RuleOptions for TokenAuthorization {
    const KIND: RuleKind = RuleKind::Criteria;
    const NAME: &'static str = "tokenAuthorization";

    fn apply_defaults(&mut self) {
        fill(&mut self.match_operator, TokenAuthorizationMatch::IsAnyFailure);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_header_range_operator_keeps_value_flags_unset() {
        let mut opts = ResponseHeader {
            header_name: Some("Content-Length".to_string()),
            match_operator: Some(ValueMatch::IsMoreThan),
            lower_bound: Some(1024),
            ..Default::default()
        };
        opts.apply_defaults();
        assert_eq!(opts.match_wildcard_name, Some(false));
        assert_eq!(opts.match_case_sensitive_value, None);
        assert_eq!(opts.match_wildcard_value, None);
    }

    #[test]
    fn test_content_type_defaults() {
        let mut opts = ContentType {
            values: Some(vec!["text/html*".to_string()]),
            ..Default::default()
        };
        opts.apply_defaults();
        assert_eq!(opts.match_operator, Some(ListMatch::IsOneOf));
        assert_eq!(opts.match_wildcard, Some(false));
        assert_eq!(opts.match_case_sensitive, Some(false));
    }

    #[test]
    fn test_cacheability_defaults() {
        let mut opts = Cacheability::default();
        opts.apply_defaults();
        assert_eq!(opts.value, Some(CacheabilityValue::Cacheable));
        assert_eq!(
            serde_json::to_string(&CacheabilityValue::BypassCache).unwrap(),
            "\"BYPASS_CACHE\""
        );
    }

    #[test]
    fn test_single_field_criteria_defaults() {
        let mut timeout = OriginTimeout::default();
        timeout.apply_defaults();
        assert_eq!(timeout.match_operator, Some(OriginTimeoutMatch::OriginTimedOut));

        let mut failure = EdgeWorkersFailure::default();
        failure.apply_defaults();
        assert_eq!(failure.exec_status, Some(ExecStatus::Error));

        let mut token = TokenAuthorization::default();
        token.apply_defaults();
        assert_eq!(token.match_operator, Some(TokenAuthorizationMatch::IsAnyFailure));
        assert_eq!(token.status_list, None);
    }
}
