//! Edge and downstream caching, cache keys and object prefetch.

use papi_types::rule::{OptionMeta, RuleKind};
use serde::{Deserialize, Serialize};

use crate::catalog::{RuleOptions, fill};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CachingBehavior {
    MaxAge,
    NoStore,
    BypassCache,
    CacheControl,
    CacheControlAndExpires,
    Expires,
}

impl CachingBehavior {
    /// Modes that read the origin's `Cache-Control` header.
    pub fn reads_cache_control(self) -> bool {
        matches!(self, CachingBehavior::CacheControl | CachingBehavior::CacheControlAndExpires)
    }

    /// Modes that honor origin headers and fall back to a default TTL.
    pub fn honors_origin(self) -> bool {
        self.reads_cache_control() || self == CachingBehavior::Expires
    }
}

/// Edge cache lifetime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Caching {
    pub behavior: Option<CachingBehavior>,
    pub must_revalidate: Option<bool>,
    pub ttl: Option<String>,
    pub default_ttl: Option<String>,
    pub honor_private: Option<bool>,
    pub honor_must_revalidate: Option<bool>,
    pub enhanced_rfc_support: Option<bool>,
}

impl RuleOptions for Caching {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "caching";

    fn apply_defaults(&mut self) {
        fill(&mut self.behavior, CachingBehavior::MaxAge);
        let Some(behavior) = self.behavior else {
            return;
        };
        if behavior == CachingBehavior::MaxAge || behavior.honors_origin() {
            fill(&mut self.must_revalidate, false);
        }
        if behavior.honors_origin() {
            fill(&mut self.default_ttl, "1d".to_string());
        }
        if behavior.reads_cache_control() {
            fill(&mut self.honor_private, false);
            fill(&mut self.honor_must_revalidate, false);
            fill(&mut self.enhanced_rfc_support, false);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DownstreamBehavior {
    Allow,
    MustRevalidate,
    Bust,
    TunnelOrigin,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AllowBehavior {
    Lesser,
    Greater,
    RemainingLifetime,
    FromMaxAge,
    FromValue,
    PassOrigin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SendHeaders {
    CacheControlAndExpires,
    CacheControl,
    Expires,
    PassOrigin,
}

/// Cache headers sent to browsers and intermediate caches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownstreamCache {
    pub behavior: Option<DownstreamBehavior>,
    pub allow_behavior: Option<AllowBehavior>,
    pub ttl: Option<String>,
    pub send_headers: Option<SendHeaders>,
    pub send_private: Option<bool>,
}

impl RuleOptions for DownstreamCache {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "downstreamCache";

    fn apply_defaults(&mut self) {
        fill(&mut self.behavior, DownstreamBehavior::Allow);
        if self.behavior == Some(DownstreamBehavior::Allow) {
            fill(&mut self.allow_behavior, AllowBehavior::Lesser);
            fill(&mut self.send_headers, SendHeaders::CacheControlAndExpires);
            fill(&mut self.send_private, false);
        }
    }
}

/// Cache origin error responses briefly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheError {
    pub enabled: Option<bool>,
    pub ttl: Option<String>,
    pub preserve_stale: Option<bool>,
}

impl RuleOptions for CacheError {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "cacheError";

    fn apply_defaults(&mut self) {
        fill(&mut self.enabled, true);
        if self.enabled == Some(true) {
            fill(&mut self.ttl, "10s".to_string());
            fill(&mut self.preserve_stale, true);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryParamsBehavior {
    IncludeAllPreserveOrder,
    IncludeAllAlphabetizeOrder,
    IgnoreAll,
    Include,
    Ignore,
}

/// Which query parameters take part in the cache key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheKeyQueryParams {
    pub behavior: Option<QueryParamsBehavior>,
    pub parameters: Option<Vec<String>>,
    pub exact_match: Option<bool>,
}

impl RuleOptions for CacheKeyQueryParams {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "cacheKeyQueryParams";

    fn apply_defaults(&mut self) {
        fill(&mut self.behavior, QueryParamsBehavior::IncludeAllPreserveOrder);
        if matches!(
            self.behavior,
            Some(QueryParamsBehavior::Include | QueryParamsBehavior::Ignore)
        ) {
            fill(&mut self.exact_match, true);
        }
    }
}

toggle!(
    /// Lowercase the URL before building the cache key.
    CacheKeyIgnoreCase,
    "cacheKeyIgnoreCase",
    true
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CacheIdRule {
    IncludeQueryParams,
    IncludeCookies,
    IncludeHeaders,
    ExcludeQueryParams,
    IncludeAllQueryParams,
    IncludeVariable,
    IncludeUrl,
}

impl CacheIdRule {
    /// Rules that take an `elements` list.
    pub fn takes_elements(self) -> bool {
        matches!(
            self,
            CacheIdRule::IncludeQueryParams
                | CacheIdRule::IncludeCookies
                | CacheIdRule::IncludeHeaders
                | CacheIdRule::ExcludeQueryParams
        )
    }
}

/// Add request data to the cache key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheId {
    pub rule: Option<CacheIdRule>,
    pub include_value: Option<bool>,
    pub optional: Option<bool>,
    pub elements: Option<Vec<String>>,
    pub variable_name: Option<String>,
}

impl RuleOptions for CacheId {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "cacheId";
    const META: OptionMeta = OptionMeta::variable(&["variableName"]);

    fn apply_defaults(&mut self) {
        fill(&mut self.rule, CacheIdRule::IncludeQueryParams);
        if self.rule.is_some_and(CacheIdRule::takes_elements) {
            fill(&mut self.include_value, true);
            fill(&mut self.optional, false);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostBody {
    Ignore,
    Md5,
    Query,
}

/// Cache responses to POST requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachePost {
    pub enabled: Option<bool>,
    pub use_body: Option<PostBody>,
}

impl RuleOptions for CachePost {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "cachePost";

    fn apply_defaults(&mut self) {
        fill(&mut self.enabled, false);
        if self.enabled == Some(true) {
            fill(&mut self.use_body, PostBody::Ignore);
        }
    }
}

/// Tag cached objects for purge by tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheTag {
    pub tag: Option<String>,
}

impl RuleOptions for CacheTag {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "cacheTag";
    const META: OptionMeta = OptionMeta::allows_vars(&["tag"]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TagVisibility {
    Never,
    PragmaHeader,
    Always,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheTagVisible {
    pub behavior: Option<TagVisibility>,
}

impl RuleOptions for CacheTagVisible {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "cacheTagVisible";

    fn apply_defaults(&mut self) {
        fill(&mut self.behavior, TagVisibility::Never);
    }
}

/// Share one cache entry across URLs via a custom purge key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheKeyRewrite {
    pub purge_key: Option<String>,
}

impl RuleOptions for CacheKeyRewrite {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "cacheKeyRewrite";
}

toggle!(
    /// Strip `Vary` from origin responses so they stay cacheable.
    RemoveVary,
    "removeVary",
    true
);

toggle!(ValidateEntityTag, "validateEntityTag", true);

toggle!(
    /// Prefetch embedded objects for HTML responses.
    Prefetch,
    "prefetch",
    true
);

toggle!(Prefetchable, "prefetchable", true);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TieredMap {
    Ch2,
    Chapac,
    Cheu2,
    Cheus2,
    Chcus2,
    Chwus2,
    Chaus,
    Ch,
}

/// Route cache misses through a parent tier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TieredDistribution {
    pub enabled: Option<bool>,
    pub tiered_distribution_map: Option<TieredMap>,
}

impl RuleOptions for TieredDistribution {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "tieredDistribution";

    fn apply_defaults(&mut self) {
        fill(&mut self.enabled, true);
        if self.enabled == Some(true) {
            fill(&mut self.tiered_distribution_map, TieredMap::Ch2);
        }
    }
}

/// Report the cache status in a response header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnCacheStatus {
    pub response_header_name: Option<String>,
}

impl RuleOptions for ReturnCacheStatus {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "returnCacheStatus";

    fn apply_defaults(&mut self) {
        fill(&mut self.response_header_name, "Akamai-Cache-Status".to_string());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartialObjectCaching {
    PartialObjectCaching,
    NonPartialObjectCaching,
}

/// Serve large files in fetched-on-demand chunks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LargeFileOptimization {
    pub enabled: Option<bool>,
    pub enable_partial_object_caching: Option<PartialObjectCaching>,
    pub minimum_size: Option<String>,
    pub maximum_size: Option<String>,
    pub use_versioning: Option<bool>,
}

impl RuleOptions for LargeFileOptimization {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "largeFileOptimization";

    fn apply_defaults(&mut self) {
        fill(&mut self.enabled, true);
        if self.enabled == Some(true) {
            fill(
                &mut self.enable_partial_object_caching,
                PartialObjectCaching::PartialObjectCaching,
            );
        }
        if self.enable_partial_object_caching == Some(PartialObjectCaching::PartialObjectCaching) {
            fill(&mut self.minimum_size, "100MB".to_string());
            fill(&mut self.maximum_size, "16GB".to_string());
            fill(&mut self.use_versioning, false);
        }
    }
}
