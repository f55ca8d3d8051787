//! Rule catalog: one typed options struct per criterion and behavior.
//!
//! Every options struct implements [`RuleOptions`], which carries the PAPI
//! rule name, its kind, the variable metadata and the default-filling rules
//! applied before the options reach a delegate.

pub mod behaviors;
pub mod criteria;

use std::sync::LazyLock;

use papi_types::rule::{OptionMeta, RuleKind};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// RuleOptions
// ---------------------------------------------------------------------------

/// Typed options for a single PAPI criterion or behavior.
pub trait RuleOptions: Serialize + DeserializeOwned {
    const KIND: RuleKind;
    const NAME: &'static str;
    const META: OptionMeta = OptionMeta::EMPTY;

    /// Fill unset fields with their defaults, in declaration order.
    ///
    /// A default whose condition depends on a sibling field sees that
    /// sibling after it has received its own default. Values the caller set
    /// are never replaced and nothing is validated.
    fn apply_defaults(&mut self) {}
}

/// Assign `value` only when the slot is still unset.
pub(crate) fn fill<T>(slot: &mut Option<T>, value: T) {
    if slot.is_none() {
        *slot = Some(value);
    }
}

/// Serialize options into a JSON object, dropping unset fields.
pub fn options_map<T: Serialize>(options: &T) -> Result<Map<String, Value>, serde_json::Error> {
    match strip_nulls(serde_json::to_value(options)?) {
        Value::Object(map) => Ok(map),
        other => Err(<serde_json::Error as serde::ser::Error>::custom(format!(
            "options must serialize to an object, got {other}"
        ))),
    }
}

fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_nulls).collect()),
        other => other,
    }
}

/// Fill defaults into raw JSON options for rule `T`.
///
/// Keys already present in `raw` (including ones `T` does not know) are kept
/// verbatim; only missing defaulted keys are added. An explicit `null` counts
/// as missing, since the typed parse already treated it that way.
pub fn normalize_options<T: RuleOptions>(
    raw: &Map<String, Value>,
) -> Result<Map<String, Value>, serde_json::Error> {
    let mut options: T = serde_json::from_value(Value::Object(raw.clone()))?;
    options.apply_defaults();

    let mut merged = raw.clone();
    for (key, value) in options_map(&options)? {
        if merged.get(&key).is_none_or(Value::is_null) {
            merged.insert(key, value);
        }
    }
    Ok(merged)
}

// ---------------------------------------------------------------------------
// Shared value types
// ---------------------------------------------------------------------------

/// A CP code reference as it appears in `cpCode` and `matchCpCode` options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpCodeRef {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub products: Option<Vec<String>>,
    pub created_date: Option<i64>,
}

impl CpCodeRef {
    pub fn new(id: u64) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

type NormalizeFn = fn(&Map<String, Value>) -> Result<Map<String, Value>, serde_json::Error>;

/// Runtime description of a catalogued rule.
#[derive(Debug, Clone, Copy)]
pub struct RuleDescriptor {
    pub kind: RuleKind,
    pub name: &'static str,
    pub meta: OptionMeta,
    normalize: NormalizeFn,
}

impl RuleDescriptor {
    /// Fill this rule's defaults into raw JSON options.
    pub fn normalize(&self, raw: &Map<String, Value>) -> Result<Map<String, Value>, serde_json::Error> {
        (self.normalize)(raw)
    }
}

pub fn describe<T: RuleOptions>() -> RuleDescriptor {
    RuleDescriptor {
        kind: T::KIND,
        name: T::NAME,
        meta: T::META,
        normalize: normalize_options::<T>,
    }
}

macro_rules! descriptors {
    ($($ty:ty),* $(,)?) => {
        vec![$(describe::<$ty>()),*]
    };
}

static CATALOG: LazyLock<Vec<RuleDescriptor>> = LazyLock::new(|| {
    use behaviors as b;
    use criteria as c;

    descriptors![
        // criteria
        c::Hostname,
        c::Path,
        c::FileExtension,
        c::Filename,
        c::RequestHeader,
        c::RequestMethod,
        c::RequestProtocol,
        c::RequestType,
        c::QueryStringParameter,
        c::Cookie,
        c::ClientIp,
        c::ClientCertificate,
        c::UserAgent,
        c::RegularExpression,
        c::ResponseHeader,
        c::ContentType,
        c::MatchResponseCode,
        c::Cacheability,
        c::OriginTimeout,
        c::EdgeWorkersFailure,
        c::TokenAuthorization,
        c::UserLocation,
        c::UserNetwork,
        c::ServerLocation,
        c::DeviceCharacteristic,
        c::MatchVariable,
        c::Time,
        c::Bucket,
        c::MetadataStage,
        c::ContentDeliveryNetwork,
        c::MatchCpCode,
        // behaviors
        b::Origin,
        b::OriginCharacteristics,
        b::ConditionalOrigin,
        b::Timeout,
        b::ReadTimeout,
        b::PersistentConnection,
        b::PersistentClientConnection,
        b::HealthDetection,
        b::DnsAsyncRefresh,
        b::DnsPrefresh,
        b::SiteShield,
        b::FailAction,
        b::Caching,
        b::DownstreamCache,
        b::CacheError,
        b::CacheKeyQueryParams,
        b::CacheKeyIgnoreCase,
        b::CacheId,
        b::CachePost,
        b::CacheTag,
        b::CacheTagVisible,
        b::CacheKeyRewrite,
        b::RemoveVary,
        b::ValidateEntityTag,
        b::Prefetch,
        b::Prefetchable,
        b::TieredDistribution,
        b::ReturnCacheStatus,
        b::LargeFileOptimization,
        b::ModifyOutgoingResponseHeader,
        b::ModifyIncomingRequestHeader,
        b::ModifyIncomingResponseHeader,
        b::ModifyOutgoingRequestHeader,
        b::ModifyViaHeader,
        b::CorsSupport,
        b::HttpStrictTransportSecurity,
        b::Redirect,
        b::Redirectplus,
        b::RewriteUrl,
        b::RemoveQueryParameter,
        b::HttpToHttpsUpgrade,
        b::DenyAccess,
        b::ConstructResponse,
        b::ResponseCode,
        b::EdgeRedirector,
        b::GzipResponse,
        b::Brotli,
        b::Http3,
        b::SureRoute,
        b::AllowTransferEncoding,
        b::AllHttpInCacheHierarchy,
        b::DynamicThroughtputOptimization,
        b::AllowPost,
        b::AllowPut,
        b::AllowDelete,
        b::AllowPatch,
        b::AllowOptions,
        b::Report,
        b::MPulse,
        b::RealUserMonitoring,
        b::GlobalRequestNumber,
        b::Breadcrumbs,
        b::Datastream,
        b::VerifyTokenAuthorization,
        b::WebApplicationFirewall,
        b::SetVariable,
        b::EdgeWorker,
        b::CustomBehavior,
        b::CpCode,
    ]
});

/// Every catalogued rule, criteria first.
pub fn catalog() -> &'static [RuleDescriptor] {
    &CATALOG
}

/// Find a rule by kind and exact PAPI name.
pub fn lookup(kind: RuleKind, name: &str) -> Option<&'static RuleDescriptor> {
    CATALOG.iter().find(|d| d.kind == kind && d.name == name)
}
