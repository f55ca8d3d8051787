//! Header rewriting, CORS and HSTS.

use papi_types::rule::{OptionMeta, RuleKind};
use serde::{Deserialize, Serialize};

use crate::catalog::{RuleOptions, fill};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HeaderAction {
    Add,
    Delete,
    Modify,
    Regex,
}

const HEADER_VARS: OptionMeta = OptionMeta::allows_vars(&[
    "customHeaderName",
    "headerValue",
    "newHeaderValue",
    "regexHeaderMatch",
    "regexHeaderReplace",
]);

/// The four `modify*Header` behaviors share one option shape and differ only
/// in which standard header each action preselects.
macro_rules! header_behavior {
    (
        $(#[$doc:meta])*
        $ty:ident, $name:literal,
        add = $add:literal, delete = $delete:literal, modify = $modify:literal
    ) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $ty {
            pub action: Option<HeaderAction>,
            pub standard_add_header_name: Option<String>,
            pub standard_delete_header_name: Option<String>,
            pub standard_modify_header_name: Option<String>,
            pub custom_header_name: Option<String>,
            pub header_value: Option<String>,
            pub new_header_value: Option<String>,
            pub regex_header_match: Option<String>,
            pub regex_header_replace: Option<String>,
            pub avoid_duplicate_headers: Option<bool>,
            pub match_multiple: Option<bool>,
        }

        impl RuleOptions for $ty {
            const KIND: RuleKind = RuleKind::Behavior;
            const NAME: &'static str = $name;
            const META: OptionMeta = HEADER_VARS;

            fn apply_defaults(&mut self) {
                fill(&mut self.action, HeaderAction::Add);
                match self.action {
                    Some(HeaderAction::Add) => {
                        fill(&mut self.standard_add_header_name, $add.to_string());
                        fill(&mut self.avoid_duplicate_headers, false);
                    }
                    Some(HeaderAction::Delete) => {
                        fill(&mut self.standard_delete_header_name, $delete.to_string());
                    }
                    Some(HeaderAction::Modify) => {
                        fill(&mut self.standard_modify_header_name, $modify.to_string());
                    }
                    Some(HeaderAction::Regex) => fill(&mut self.match_multiple, false),
                    None => {}
                }
            }
        }
    };
}

header_behavior!(
    /// Modify headers on the response sent to the client.
    ModifyOutgoingResponseHeader, "modifyOutgoingResponseHeader",
    add = "ACCESS_CONTROL_ALLOW_ORIGIN", delete = "CACHE_CONTROL", modify = "CACHE_CONTROL"
);

header_behavior!(
    /// Modify headers on the request as it arrives from the client.
    ModifyIncomingRequestHeader, "modifyIncomingRequestHeader",
    add = "ACCEPT_ENCODING", delete = "ACCEPT_ENCODING", modify = "ACCEPT_ENCODING"
);

header_behavior!(
    /// Modify headers on the response as it arrives from the origin.
    ModifyIncomingResponseHeader, "modifyIncomingResponseHeader",
    add = "CACHE_CONTROL", delete = "CACHE_CONTROL", modify = "CACHE_CONTROL"
);

header_behavior!(
    /// Modify headers on the request forwarded to the origin.
    ModifyOutgoingRequestHeader, "modifyOutgoingRequestHeader",
    add = "USER_AGENT", delete = "USER_AGENT", modify = "USER_AGENT"
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViaModification {
    RemoveHeader,
    RenameHeader,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyViaHeader {
    pub enabled: Option<bool>,
    pub modification_option: Option<ViaModification>,
    pub rename_header_to: Option<String>,
}

impl RuleOptions for ModifyViaHeader {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "modifyViaHeader";

    fn apply_defaults(&mut self) {
        fill(&mut self.enabled, true);
        if self.enabled == Some(true) {
            fill(&mut self.modification_option, ViaModification::RemoveHeader);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnyOrSpecified {
    Any,
    Specified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CorsMethod {
    Get,
    Post,
    Delete,
    Put,
    Patch,
}

/// Answer CORS preflight requests at the edge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorsSupport {
    pub enabled: Option<bool>,
    pub allow_origins: Option<AnyOrSpecified>,
    pub origins: Option<Vec<String>>,
    pub allow_credentials: Option<bool>,
    pub allow_headers: Option<AnyOrSpecified>,
    pub headers: Option<Vec<String>>,
    pub methods: Option<Vec<CorsMethod>>,
    pub expose_headers: Option<Vec<String>>,
    pub preflight_max_age: Option<String>,
}

impl RuleOptions for CorsSupport {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "corsSupport";

    fn apply_defaults(&mut self) {
        fill(&mut self.enabled, true);
        if self.enabled == Some(true) {
            fill(&mut self.allow_origins, AnyOrSpecified::Any);
            fill(&mut self.allow_credentials, false);
            fill(&mut self.allow_headers, AnyOrSpecified::Any);
            fill(&mut self.methods, vec![CorsMethod::Get, CorsMethod::Post]);
            fill(&mut self.preflight_max_age, "86400s".to_string());
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HstsMaxAge {
    ZeroMins,
    TenMins,
    OneDay,
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpStrictTransportSecurity {
    pub enable: Option<bool>,
    pub max_age: Option<HstsMaxAge>,
    pub include_sub_domains: Option<bool>,
    pub preload: Option<bool>,
    pub redirect: Option<bool>,
    pub redirect_status_code: Option<u16>,
}

impl RuleOptions for HttpStrictTransportSecurity {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "httpStrictTransportSecurity";

    fn apply_defaults(&mut self) {
        fill(&mut self.enable, true);
        if self.enable == Some(true) {
            fill(&mut self.max_age, HstsMaxAge::OneDay);
            fill(&mut self.include_sub_domains, false);
            fill(&mut self.preload, false);
            fill(&mut self.redirect, false);
        }
        if self.redirect == Some(true) {
            fill(&mut self.redirect_status_code, 301);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modify_outgoing_response_header_add() {
        let mut opts = ModifyOutgoingResponseHeader {
            header_value: Some("*".to_string()),
            ..Default::default()
        };
        opts.apply_defaults();
        assert_eq!(opts.action, Some(HeaderAction::Add));
        assert_eq!(
            opts.standard_add_header_name.as_deref(),
            Some("ACCESS_CONTROL_ALLOW_ORIGIN")
        );
        assert_eq!(opts.avoid_duplicate_headers, Some(false));
        assert_eq!(opts.standard_delete_header_name, None);
        assert_eq!(opts.match_multiple, None);
    }

    #[test]
    fn test_modify_header_action_selects_standard_name() {
        let mut opts = ModifyOutgoingRequestHeader {
            action: Some(HeaderAction::Delete),
            ..Default::default()
        };
        opts.apply_defaults();
        assert_eq!(opts.standard_delete_header_name.as_deref(), Some("USER_AGENT"));
        assert_eq!(opts.standard_add_header_name, None);

        let mut opts = ModifyIncomingRequestHeader {
            action: Some(HeaderAction::Modify),
            ..Default::default()
        };
        opts.apply_defaults();
        assert_eq!(opts.standard_modify_header_name.as_deref(), Some("ACCEPT_ENCODING"));

        let mut opts = ModifyIncomingResponseHeader {
            action: Some(HeaderAction::Regex),
            ..Default::default()
        };
        opts.apply_defaults();
        assert_eq!(opts.match_multiple, Some(false));
        assert_eq!(opts.standard_modify_header_name, None);
    }

    #[test]
    fn test_modify_header_variable_fields() {
        assert!(ModifyOutgoingResponseHeader::META.allows_vars.contains(&"headerValue"));
        assert!(ModifyIncomingRequestHeader::META.allows_vars.contains(&"regexHeaderReplace"));
    }

    #[test]
    fn test_cors_support_defaults() {
        let mut opts = CorsSupport::default();
        opts.apply_defaults();
        assert_eq!(opts.allow_origins, Some(AnyOrSpecified::Any));
        assert_eq!(opts.methods, Some(vec![CorsMethod::Get, CorsMethod::Post]));
        assert_eq!(opts.preflight_max_age.as_deref(), Some("86400s"));
    }

    #[test]
    fn test_hsts_redirect_status() {
        let mut opts = HttpStrictTransportSecurity::default();
        opts.apply_defaults();
        assert_eq!(opts.max_age, Some(HstsMaxAge::OneDay));
        assert_eq!(opts.redirect, Some(false));
        assert_eq!(opts.redirect_status_code, None);

        let mut opts = HttpStrictTransportSecurity {
            redirect: Some(true),
            ..Default::default()
        };
        opts.apply_defaults();
        assert_eq!(opts.redirect_status_code, Some(301));
        assert_eq!(serde_json::to_string(&HstsMaxAge::OneYear).unwrap(), "\"ONE_YEAR\"");
    }

    #[test]
    fn test_modify_via_header() {
        let mut opts = ModifyViaHeader::default();
        opts.apply_defaults();
        assert_eq!(opts.modification_option, Some(ViaModification::RemoveHeader));
    }
}
