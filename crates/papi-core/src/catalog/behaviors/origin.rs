//! Origin selection, connection tuning and failover.

use papi_types::rule::{OptionMeta, RuleKind};
use serde::{Deserialize, Serialize};

use crate::catalog::criteria::Protocol;
use crate::catalog::{RuleOptions, fill};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OriginType {
    Customer,
    NetStorage,
    MediaServiceLive,
    EdgeLoadBalancingOriginGroup,
    SaasDynamicOrigin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ForwardHostHeader {
    RequestHostHeader,
    OriginHostname,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CacheKeyHostname {
    RequestHostHeader,
    OriginHostname,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IpVersion {
    Ipv4,
    Ipv6,
    DualStack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationMode {
    PlatformSettings,
    ThirdParty,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OriginCerts {
    Combo,
    StandardCertificateAuthorities,
    CustomCertificateAuthorities,
    CustomCertificates,
}

impl OriginCerts {
    pub fn uses_standard_authorities(self) -> bool {
        matches!(self, OriginCerts::Combo | OriginCerts::StandardCertificateAuthorities)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TlsVersion {
    #[serde(rename = "DYNAMIC")]
    Dynamic,
    #[serde(rename = "TLSV1_1")]
    Tls11,
    #[serde(rename = "TLSV1_2")]
    Tls12,
    #[serde(rename = "TLSV1_3")]
    Tls13,
}

/// NetStorage account used when `originType` is `NET_STORAGE`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetStorage {
    pub cp_code: Option<u64>,
    pub download_domain_name: Option<String>,
    pub g2o_token: Option<String>,
}

/// Where the edge fetches content from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Origin {
    pub origin_type: Option<OriginType>,
    pub net_storage: Option<NetStorage>,
    pub origin_id: Option<String>,
    pub hostname: Option<String>,
    pub forward_host_header: Option<ForwardHostHeader>,
    pub custom_forward_host_header: Option<String>,
    pub cache_key_hostname: Option<CacheKeyHostname>,
    pub compress: Option<bool>,
    pub enable_true_client_ip: Option<bool>,
    pub true_client_ip_header: Option<String>,
    pub true_client_ip_client_setting: Option<bool>,
    pub http_port: Option<u16>,
    pub https_port: Option<u16>,
    pub ip_version: Option<IpVersion>,
    pub verification_mode: Option<VerificationMode>,
    pub origin_sni: Option<bool>,
    pub custom_valid_cn_values: Option<Vec<String>>,
    pub origin_certs_to_honor: Option<OriginCerts>,
    pub standard_certificate_authorities: Option<Vec<String>>,
    pub min_tls_version: Option<TlsVersion>,
    pub tls_version_title: Option<String>,
    pub use_unique_cache_key: Option<bool>,
}

impl RuleOptions for Origin {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "origin";
    const META: OptionMeta = OptionMeta::allows_vars(&[
        "hostname",
        "customForwardHostHeader",
        "customValidCnValues",
    ]);

    fn apply_defaults(&mut self) {
        fill(&mut self.origin_type, OriginType::Customer);
        let customer = self.origin_type == Some(OriginType::Customer);
        let net_storage = self.origin_type == Some(OriginType::NetStorage);

        if customer {
            fill(&mut self.forward_host_header, ForwardHostHeader::RequestHostHeader);
            fill(&mut self.cache_key_hostname, CacheKeyHostname::RequestHostHeader);
        } else if net_storage {
            fill(&mut self.cache_key_hostname, CacheKeyHostname::OriginHostname);
        }
        if customer {
            fill(&mut self.compress, true);
            fill(&mut self.enable_true_client_ip, true);
        }
        if self.enable_true_client_ip == Some(true) {
            fill(&mut self.true_client_ip_header, "True-Client-IP".to_string());
            fill(&mut self.true_client_ip_client_setting, false);
        }
        if customer {
            fill(&mut self.http_port, 80);
            fill(&mut self.https_port, 443);
            fill(&mut self.ip_version, IpVersion::Ipv4);
            fill(&mut self.verification_mode, VerificationMode::PlatformSettings);
            fill(&mut self.origin_sni, true);
        }
        if self.verification_mode == Some(VerificationMode::Custom) {
            fill(
                &mut self.custom_valid_cn_values,
                vec![
                    "{{Origin Hostname}}".to_string(),
                    "{{Forward Host Header}}".to_string(),
                ],
            );
            fill(
                &mut self.origin_certs_to_honor,
                OriginCerts::StandardCertificateAuthorities,
            );
        }
        if self
            .origin_certs_to_honor
            .is_some_and(OriginCerts::uses_standard_authorities)
        {
            fill(
                &mut self.standard_certificate_authorities,
                vec!["akamai-permissive".to_string()],
            );
        }
        if customer {
            fill(&mut self.min_tls_version, TlsVersion::Dynamic);
        }
        if net_storage {
            fill(&mut self.use_unique_cache_key, false);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthenticationMethod {
    Automatic,
    SignatureHeaderAuthentication,
    MslAuthentication,
    Aws,
    GcsHmacAuthentication,
    AdobeIms,
}

/// Describe the origin so the edge can authenticate and route to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginCharacteristics {
    pub authentication_method: Option<AuthenticationMethod>,
    pub encoding_version: Option<u8>,
    pub use_custom_sign_string: Option<bool>,
    pub custom_sign_string: Option<Vec<String>>,
    pub secret_key: Option<String>,
    pub nonce: Option<String>,
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub aws_region: Option<String>,
    pub aws_host: Option<String>,
    pub aws_service: Option<String>,
    pub country: Option<String>,
}

impl RuleOptions for OriginCharacteristics {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "originCharacteristics";

    fn apply_defaults(&mut self) {
        fill(&mut self.authentication_method, AuthenticationMethod::Automatic);
        if self.authentication_method == Some(AuthenticationMethod::SignatureHeaderAuthentication) {
            fill(&mut self.encoding_version, 4);
            fill(&mut self.use_custom_sign_string, false);
        }
        if self.authentication_method == Some(AuthenticationMethod::Aws) {
            fill(&mut self.aws_service, "s3".to_string());
        }
        fill(&mut self.country, "UNKNOWN".to_string());
    }
}

/// Hand the request to a Cloudlets origin defined elsewhere.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalOrigin {
    pub origin_id: Option<String>,
}

impl RuleOptions for ConditionalOrigin {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "conditionalOrigin";
}

/// Connect timeout to the origin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeout {
    pub value: Option<String>,
}

impl RuleOptions for Timeout {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "timeout";

    fn apply_defaults(&mut self) {
        fill(&mut self.value, "5s".to_string());
    }
}

/// Time to wait between bytes of the origin response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadTimeout {
    pub value: Option<String>,
}

impl RuleOptions for ReadTimeout {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "readTimeout";

    fn apply_defaults(&mut self) {
        fill(&mut self.value, "120s".to_string());
    }
}

/// Keep-alive between edge and origin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistentConnection {
    pub enabled: Option<bool>,
    pub timeout: Option<String>,
}

impl RuleOptions for PersistentConnection {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "persistentConnection";

    fn apply_defaults(&mut self) {
        fill(&mut self.enabled, true);
        if self.enabled == Some(true) {
            fill(&mut self.timeout, "5m".to_string());
        }
    }
}

/// Keep-alive between client and edge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistentClientConnection {
    pub enabled: Option<bool>,
    pub timeout: Option<String>,
}

impl RuleOptions for PersistentClientConnection {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "persistentClientConnection";

    fn apply_defaults(&mut self) {
        fill(&mut self.enabled, true);
        if self.enabled == Some(true) {
            fill(&mut self.timeout, "500s".to_string());
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthDetection {
    pub retry_count: Option<u32>,
    pub retry_interval: Option<String>,
    pub maximum_reconnects: Option<u32>,
}

impl RuleOptions for HealthDetection {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "healthDetection";

    fn apply_defaults(&mut self) {
        fill(&mut self.retry_count, 3);
        fill(&mut self.retry_interval, "10s".to_string());
        fill(&mut self.maximum_reconnects, 3);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsAsyncRefresh {
    pub enabled: Option<bool>,
    pub timeout: Option<String>,
}

impl RuleOptions for DnsAsyncRefresh {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "dnsAsyncRefresh";

    fn apply_defaults(&mut self) {
        fill(&mut self.enabled, true);
        if self.enabled == Some(true) {
            fill(&mut self.timeout, "2h".to_string());
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsPrefresh {
    pub enabled: Option<bool>,
    pub delay: Option<String>,
    pub timeout: Option<String>,
}

impl RuleOptions for DnsPrefresh {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "dnsPrefresh";

    fn apply_defaults(&mut self) {
        fill(&mut self.enabled, true);
        if self.enabled == Some(true) {
            fill(&mut self.delay, "5m".to_string());
            fill(&mut self.timeout, "2h".to_string());
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteShieldMap {
    pub value: Option<String>,
    pub srmap: Option<String>,
    pub has_mixed_hosts: Option<bool>,
    pub src: Option<String>,
}

/// Restrict origin traffic to a Site Shield map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteShield {
    pub ssmap: Option<SiteShieldMap>,
}

impl RuleOptions for SiteShield {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "siteShield";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailActionType {
    Redirect,
    ServeAlternate,
    RecreatedCo,
    RecreatedNs,
    Dynamic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RedirectHostnameType {
    Original,
    Alternate,
}

/// What to serve when the origin is unreachable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailAction {
    pub enabled: Option<bool>,
    pub action_type: Option<FailActionType>,
    pub redirect_hostname_type: Option<RedirectHostnameType>,
    pub redirect_hostname: Option<String>,
    pub redirect_custom_path: Option<bool>,
    pub redirect_path: Option<String>,
    pub redirect_method: Option<u16>,
    pub content_hostname: Option<String>,
    pub content_custom_path: Option<bool>,
    pub content_path: Option<String>,
    pub status_code: Option<u16>,
    pub preserve_query_string: Option<bool>,
    pub modify_protocol: Option<bool>,
    pub protocol: Option<Protocol>,
}

impl RuleOptions for FailAction {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "failAction";

    fn apply_defaults(&mut self) {
        fill(&mut self.enabled, true);
        if self.enabled == Some(true) {
            fill(&mut self.action_type, FailActionType::Redirect);
        }
        let redirect = self.action_type == Some(FailActionType::Redirect);
        let alternate = self.action_type == Some(FailActionType::ServeAlternate);

        if redirect {
            fill(&mut self.redirect_hostname_type, RedirectHostnameType::Original);
            fill(&mut self.redirect_custom_path, false);
            fill(&mut self.redirect_method, 302);
        }
        if alternate {
            fill(&mut self.status_code, 200);
        }
        if redirect || alternate {
            fill(&mut self.preserve_query_string, true);
        }
        fill(&mut self.modify_protocol, false);
        if self.modify_protocol == Some(true) {
            fill(&mut self.protocol, Protocol::Https);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_customer_defaults() {
        let mut opts = Origin {
            hostname: Some("origin.example.com".to_string()),
            ..Default::default()
        };
        opts.apply_defaults();
        assert_eq!(opts.origin_type, Some(OriginType::Customer));
        assert_eq!(opts.forward_host_header, Some(ForwardHostHeader::RequestHostHeader));
        assert_eq!(opts.cache_key_hostname, Some(CacheKeyHostname::RequestHostHeader));
        assert_eq!(opts.compress, Some(true));
        assert_eq!(opts.true_client_ip_header.as_deref(), Some("True-Client-IP"));
        assert_eq!(opts.true_client_ip_client_setting, Some(false));
        assert_eq!(opts.http_port, Some(80));
        assert_eq!(opts.https_port, Some(443));
        assert_eq!(opts.verification_mode, Some(VerificationMode::PlatformSettings));
        assert_eq!(opts.min_tls_version, Some(TlsVersion::Dynamic));
        assert_eq!(opts.custom_valid_cn_values, None);
        assert_eq!(opts.use_unique_cache_key, None);
    }

    #[test]
    fn test_origin_custom_verification_pulls_in_certificate_defaults() {
        let mut opts = Origin {
            verification_mode: Some(VerificationMode::Custom),
            ..Default::default()
        };
        opts.apply_defaults();
        assert_eq!(
            opts.custom_valid_cn_values,
            Some(vec![
                "{{Origin Hostname}}".to_string(),
                "{{Forward Host Header}}".to_string()
            ])
        );
        assert_eq!(opts.origin_certs_to_honor, Some(OriginCerts::StandardCertificateAuthorities));
        assert_eq!(
            opts.standard_certificate_authorities,
            Some(vec!["akamai-permissive".to_string()])
        );
    }

    #[test]
    fn test_origin_true_client_ip_disabled_skips_header() {
        let mut opts = Origin {
            enable_true_client_ip: Some(false),
            ..Default::default()
        };
        opts.apply_defaults();
        assert_eq!(opts.true_client_ip_header, None);
        assert_eq!(opts.true_client_ip_client_setting, None);
    }

    #[test]
    fn test_origin_net_storage_defaults() {
        let mut opts = Origin {
            origin_type: Some(OriginType::NetStorage),
            ..Default::default()
        };
        opts.apply_defaults();
        assert_eq!(opts.cache_key_hostname, Some(CacheKeyHostname::OriginHostname));
        assert_eq!(opts.use_unique_cache_key, Some(false));
        assert_eq!(opts.forward_host_header, None);
        assert_eq!(opts.http_port, None);
    }

    #[test]
    fn test_tls_version_wire_names() {
        assert_eq!(serde_json::to_string(&TlsVersion::Tls12).unwrap(), "\"TLSV1_2\"");
        assert_eq!(serde_json::to_string(&IpVersion::DualStack).unwrap(), "\"DUAL_STACK\"");
    }

    #[test]
    fn test_origin_characteristics_signature_and_aws() {
        let mut opts = OriginCharacteristics {
            authentication_method: Some(AuthenticationMethod::SignatureHeaderAuthentication),
            ..Default::default()
        };
        opts.apply_defaults();
        assert_eq!(opts.encoding_version, Some(4));
        assert_eq!(opts.use_custom_sign_string, Some(false));
        assert_eq!(opts.aws_service, None);

        let mut opts = OriginCharacteristics {
            authentication_method: Some(AuthenticationMethod::Aws),
            ..Default::default()
        };
        opts.apply_defaults();
        assert_eq!(opts.aws_service.as_deref(), Some("s3"));
        assert_eq!(opts.country.as_deref(), Some("UNKNOWN"));
    }

    #[test]
    fn test_connection_timeouts() {
        let mut timeout = Timeout::default();
        timeout.apply_defaults();
        assert_eq!(timeout.value.as_deref(), Some("5s"));

        let mut read = ReadTimeout::default();
        read.apply_defaults();
        assert_eq!(read.value.as_deref(), Some("120s"));

        let mut conn = PersistentConnection {
            enabled: Some(false),
            ..Default::default()
        };
        conn.apply_defaults();
        assert_eq!(conn.timeout, None);

        let mut client = PersistentClientConnection::default();
        client.apply_defaults();
        assert_eq!(client.timeout.as_deref(), Some("500s"));
    }

    #[test]
    fn test_dns_defaults() {
        let mut prefresh = DnsPrefresh::default();
        prefresh.apply_defaults();
        assert_eq!(prefresh.delay.as_deref(), Some("5m"));
        assert_eq!(prefresh.timeout.as_deref(), Some("2h"));

        let mut refresh = DnsAsyncRefresh::default();
        refresh.apply_defaults();
        assert_eq!(refresh.timeout.as_deref(), Some("2h"));
    }

    #[test]
    fn test_fail_action_redirect_defaults() {
        let mut opts = FailAction::default();
        opts.apply_defaults();
        assert_eq!(opts.action_type, Some(FailActionType::Redirect));
        assert_eq!(opts.redirect_hostname_type, Some(RedirectHostnameType::Original));
        assert_eq!(opts.redirect_method, Some(302));
        assert_eq!(opts.preserve_query_string, Some(true));
        assert_eq!(opts.modify_protocol, Some(false));
        assert_eq!(opts.protocol, None);
        assert_eq!(opts.status_code, None);
    }

    #[test]
    fn test_fail_action_serve_alternate() {
        let mut opts = FailAction {
            action_type: Some(FailActionType::ServeAlternate),
            modify_protocol: Some(true),
            ..Default::default()
        };
        opts.apply_defaults();
        assert_eq!(opts.status_code, Some(200));
        assert_eq!(opts.redirect_method, None);
        assert_eq!(opts.protocol, Some(Protocol::Https));
    }

    #[test]
    fn test_fail_action_disabled_leaves_action_unset() {
        let mut opts = FailAction {
            enabled: Some(false),
            ..Default::default()
        };
        opts.apply_defaults();
        assert_eq!(opts.action_type, None);
        assert_eq!(opts.preserve_query_string, None);
    }
}
