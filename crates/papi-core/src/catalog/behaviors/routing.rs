//! Redirects, URL rewrites and edge-generated responses.

use papi_types::rule::{OptionMeta, RuleKind};
use serde::{Deserialize, Serialize};

use crate::catalog::{RuleOptions, fill};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MobileChoice {
    Default,
    Mobile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DestinationProtocol {
    SameAsRequest,
    Http,
    Https,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DestinationHostname {
    SameAsRequest,
    Subdomain,
    Sibling,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DestinationPath {
    SameAsRequest,
    PrefixRequest,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuffixStatus {
    NoSuffix,
    Suffix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryStringAction {
    Append,
    Ignore,
}

/// Redirect the client to another URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Redirect {
    pub mobile_default_choice: Option<MobileChoice>,
    pub destination_protocol: Option<DestinationProtocol>,
    pub destination_hostname: Option<DestinationHostname>,
    pub destination_hostname_subdomain: Option<String>,
    pub destination_hostname_sibling: Option<String>,
    pub destination_hostname_other: Option<String>,
    pub destination_path: Option<DestinationPath>,
    pub destination_path_prefix: Option<String>,
    pub destination_path_suffix_status: Option<SuffixStatus>,
    pub destination_path_suffix: Option<String>,
    pub destination_path_other: Option<String>,
    pub query_string: Option<QueryStringAction>,
    pub response_code: Option<u16>,
}

impl RuleOptions for Redirect {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "redirect";
    const META: OptionMeta =
        OptionMeta::allows_vars(&["destinationHostnameOther", "destinationPathOther"]);

    fn apply_defaults(&mut self) {
        fill(&mut self.mobile_default_choice, MobileChoice::Default);
        fill(&mut self.destination_protocol, DestinationProtocol::SameAsRequest);
        fill(&mut self.destination_hostname, DestinationHostname::SameAsRequest);
        fill(&mut self.destination_path, DestinationPath::Other);
        if self.destination_path == Some(DestinationPath::PrefixRequest) {
            fill(&mut self.destination_path_suffix_status, SuffixStatus::NoSuffix);
        }
        fill(&mut self.query_string, QueryStringAction::Append);
        fill(&mut self.response_code, 302);
    }
}

/// Redirect using a single destination expression.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Redirectplus {
    pub enabled: Option<bool>,
    pub destination: Option<String>,
    pub response_code: Option<u16>,
}

impl RuleOptions for Redirectplus {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "redirectplus";
    const META: OptionMeta = OptionMeta::allows_vars(&["destination"]);

    fn apply_defaults(&mut self) {
        fill(&mut self.enabled, true);
        if self.enabled == Some(true) {
            fill(
                &mut self.destination,
                "{{builtin.AK_SCHEME}}://{{builtin.AK_HOST}}{{builtin.AK_PATH}}".to_string(),
            );
            fill(&mut self.response_code, 302);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RewriteBehavior {
    Replace,
    Remove,
    Rewrite,
    Prepend,
    RegexReplace,
}

/// Rewrite the forward URL before it goes to the origin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteUrl {
    pub behavior: Option<RewriteBehavior>,
    #[serde(rename = "match")]
    pub match_path: Option<String>,
    pub match_regex: Option<String>,
    pub target_regex: Option<String>,
    pub target_path: Option<String>,
    pub target_path_prepend: Option<String>,
    pub target_url: Option<String>,
    pub match_multiple: Option<bool>,
    pub keep_query_string: Option<bool>,
}

impl RuleOptions for RewriteUrl {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "rewriteUrl";
    const META: OptionMeta = OptionMeta::allows_vars(&[
        "targetPath",
        "targetPathPrepend",
        "targetUrl",
        "targetRegex",
    ]);

    fn apply_defaults(&mut self) {
        fill(&mut self.behavior, RewriteBehavior::Replace);
        if matches!(
            self.behavior,
            Some(RewriteBehavior::Replace | RewriteBehavior::Remove | RewriteBehavior::RegexReplace)
        ) {
            fill(&mut self.match_multiple, false);
        }
        if self.behavior != Some(RewriteBehavior::Rewrite) {
            fill(&mut self.keep_query_string, true);
        }
    }
}

/// Drop query parameters from the forward request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveQueryParameter {
    pub parameters: Option<Vec<String>>,
}

impl RuleOptions for RemoveQueryParameter {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "removeQueryParameter";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpToHttpsUpgrade {
    pub upgrade: Option<bool>,
}

impl RuleOptions for HttpToHttpsUpgrade {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "httpToHttpsUpgrade";

    fn apply_defaults(&mut self) {
        fill(&mut self.upgrade, true);
    }
}

/// Reject the request with a 403.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DenyAccess {
    pub enabled: Option<bool>,
    pub reason: Option<String>,
}

impl RuleOptions for DenyAccess {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "denyAccess";

    fn apply_defaults(&mut self) {
        fill(&mut self.enabled, true);
        if self.enabled == Some(true) {
            fill(&mut self.reason, "default-deny-reason".to_string());
        }
    }
}

/// Answer from the edge with a fixed body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructResponse {
    pub enabled: Option<bool>,
    pub body: Option<String>,
    pub response_code: Option<u16>,
    pub force_eviction: Option<bool>,
    pub ignore_purge: Option<bool>,
}

impl RuleOptions for ConstructResponse {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "constructResponse";
    const META: OptionMeta = OptionMeta::allows_vars(&["body"]);

    fn apply_defaults(&mut self) {
        fill(&mut self.enabled, true);
        if self.enabled == Some(true) {
            fill(&mut self.response_code, 200);
            fill(&mut self.force_eviction, false);
            fill(&mut self.ignore_purge, false);
        }
    }
}

/// Override the status code returned to the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseCode {
    pub status_code: Option<u16>,
    pub override206: Option<bool>,
}

impl RuleOptions for ResponseCode {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "responseCode";

    fn apply_defaults(&mut self) {
        fill(&mut self.status_code, 200);
        if self.status_code == Some(200) {
            fill(&mut self.override206, false);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudletPolicy {
    pub id: Option<u64>,
    pub name: Option<String>,
}

/// Apply an Edge Redirector Cloudlets policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRedirector {
    pub enabled: Option<bool>,
    pub is_shared_policy: Option<bool>,
    pub cloudlet_policy: Option<CloudletPolicy>,
    pub cloudlet_shared_policy: Option<u64>,
}

impl RuleOptions for EdgeRedirector {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "edgeRedirector";

    fn apply_defaults(&mut self) {
        fill(&mut self.enabled, true);
        if self.enabled == Some(true) {
            fill(&mut self.is_shared_policy, false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::options_map;
    use serde_json::json;

    #[test]
    fn test_redirect_defaults() {
        let mut opts = Redirect {
            destination_hostname: Some(DestinationHostname::Other),
            destination_hostname_other: Some("www.example.com".to_string()),
            ..Default::default()
        };
        opts.apply_defaults();
        assert_eq!(opts.mobile_default_choice, Some(MobileChoice::Default));
        assert_eq!(opts.destination_protocol, Some(DestinationProtocol::SameAsRequest));
        assert_eq!(opts.destination_hostname, Some(DestinationHostname::Other));
        assert_eq!(opts.destination_path, Some(DestinationPath::Other));
        assert_eq!(opts.destination_path_suffix_status, None);
        assert_eq!(opts.query_string, Some(QueryStringAction::Append));
        assert_eq!(opts.response_code, Some(302));
    }

    #[test]
    fn test_redirect_prefix_path_gets_suffix_status() {
        let mut opts = Redirect {
            destination_path: Some(DestinationPath::PrefixRequest),
            destination_path_prefix: Some("/new".to_string()),
            ..Default::default()
        };
        opts.apply_defaults();
        assert_eq!(opts.destination_path_suffix_status, Some(SuffixStatus::NoSuffix));
    }

    #[test]
    fn test_redirectplus_destination_default() {
        let mut opts = Redirectplus::default();
        opts.apply_defaults();
        assert_eq!(
            opts.destination.as_deref(),
            Some("{{builtin.AK_SCHEME}}://{{builtin.AK_HOST}}{{builtin.AK_PATH}}")
        );
        assert_eq!(opts.response_code, Some(302));
    }

    #[test]
    fn test_rewrite_url_match_field_name() {
        let mut opts = RewriteUrl {
            match_path: Some("/old/".to_string()),
            target_path: Some("/new/".to_string()),
            ..Default::default()
        };
        opts.apply_defaults();
        let map = options_map(&opts).unwrap();
        assert_eq!(map["match"], json!("/old/"));
        assert_eq!(map["matchMultiple"], json!(false));
        assert_eq!(map["keepQueryString"], json!(true));
    }

    #[test]
    fn test_rewrite_url_rewrite_behavior() {
        let mut opts = RewriteUrl {
            behavior: Some(RewriteBehavior::Rewrite),
            target_url: Some("https://example.com/".to_string()),
            ..Default::default()
        };
        opts.apply_defaults();
        assert_eq!(opts.match_multiple, None);
        assert_eq!(opts.keep_query_string, None);
    }

    #[test]
    fn test_response_code_override206_only_for_200() {
        let mut opts = ResponseCode::default();
        opts.apply_defaults();
        assert_eq!(opts.override206, Some(false));

        let mut opts = ResponseCode {
            status_code: Some(404),
            ..Default::default()
        };
        opts.apply_defaults();
        assert_eq!(opts.override206, None);
    }

    #[test]
    fn test_edge_responses() {
        let mut deny = DenyAccess::default();
        deny.apply_defaults();
        assert_eq!(deny.reason.as_deref(), Some("default-deny-reason"));

        let mut construct = ConstructResponse::default();
        construct.apply_defaults();
        assert_eq!(construct.response_code, Some(200));
        assert_eq!(construct.force_eviction, Some(false));
        assert_eq!(construct.ignore_purge, Some(false));

        let mut upgrade = HttpToHttpsUpgrade::default();
        upgrade.apply_defaults();
        assert_eq!(upgrade.upgrade, Some(true));

        let mut redirector = EdgeRedirector::default();
        redirector.apply_defaults();
        assert_eq!(redirector.is_shared_policy, Some(false));
    }
}
