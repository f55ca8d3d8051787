//! The create → save → validate → activate workflow.

use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;
use tracing::{Instrument, error, info, info_span, warn};

use papi_types::config::DeployConfig;
use papi_types::error::ConfigError;
use papi_types::papi::{Activation, ActivationRequest, ApiError, ValidationMessage};
use papi_types::rule_tree::RuleTree;

use super::api::PropertyManagerApi;

/// The API call a deploy failed in, once the property was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployStep {
    CreateVersion,
    SaveRules,
    Activate,
}

impl fmt::Display for DeployStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeployStep::CreateVersion => write!(f, "creating a property version"),
            DeployStep::SaveRules => write!(f, "saving rules"),
            DeployStep::Activate => write!(f, "activating"),
        }
    }
}

/// Why a deploy stopped.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("login failed, check your API credentials: {0}")]
    LoginFailed(String),

    #[error("could not connect to Property Manager: {0}")]
    Connect(String),

    #[error("{step} failed: {source}")]
    Step { step: DeployStep, source: ApiError },

    #[error("rule tree has {} validation error(s)", .0.len())]
    ValidationErrors(Vec<ValidationMessage>),

    #[error(
        "rule tree has {} validation warning(s); set ignore_warnings to activate anyway",
        .0.len()
    )]
    UnacknowledgedWarnings(Vec<ValidationMessage>),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// How far a successful deploy went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    /// Rules were saved and validated; activation was skipped.
    Saved {
        version: u32,
        warnings: Vec<ValidationMessage>,
    },
    /// The saved version was submitted for activation.
    Activated {
        version: u32,
        warnings: Vec<ValidationMessage>,
        activation: Activation,
    },
}

impl DeployOutcome {
    /// The property version the rules were saved into.
    pub fn version(&self) -> u32 {
        match self {
            DeployOutcome::Saved { version, .. } | DeployOutcome::Activated { version, .. } => {
                *version
            }
        }
    }

    pub fn warnings(&self) -> &[ValidationMessage] {
        match self {
            DeployOutcome::Saved { warnings, .. } | DeployOutcome::Activated { warnings, .. } => {
                warnings
            }
        }
    }
}

/// Save `rules` into a fresh version of the configured property and activate it.
///
/// Runs the API calls strictly in order and stops at the first failure.
/// Validation errors always stop the deploy; warnings stop it unless
/// `config.ignore_warnings` is set, in which case the activation
/// acknowledges them. A tree without a rule format gets `config.rule_format`.
#[tracing::instrument(
    name = "papi.deploy",
    skip(api, rules, config),
    fields(papi.property.id = %config.property_id, papi.network = %config.network)
)]
pub async fn upload_and_activate_property<A: PropertyManagerApi>(
    api: &A,
    rules: &RuleTree,
    config: &DeployConfig,
) -> Result<DeployOutcome, DeployError> {
    config.validate()?;
    let property = config.property_ref();
    let rules = with_rule_format(rules, &config.rule_format);

    let span = info_span!("papi.latest_version");
    let latest = api
        .latest_property_version(&property)
        .instrument(span)
        .await
        .map_err(|e| match e {
            ApiError::Forbidden(detail) => DeployError::LoginFailed(detail),
            other => DeployError::Connect(other.to_string()),
        })?;
    info!(version = latest.property_version, "latest property version");

    let span = info_span!("papi.create_version", papi.property.version = latest.property_version);
    let created = api
        .create_property_version(&property, &latest)
        .instrument(span)
        .await
        .map_err(step_error(DeployStep::CreateVersion))?;
    let version = created.property_version;
    info!(version, "created property version");

    let span = info_span!("papi.save_rules", papi.property.version = version);
    let saved = api
        .save_rules_into_property_version(&property, version, &rules)
        .instrument(span)
        .await
        .map_err(step_error(DeployStep::SaveRules))?;
    info!(
        version,
        rules = rules.rule_count(),
        errors = saved.errors.len(),
        warnings = saved.warnings.len(),
        "rules saved"
    );

    if saved.has_errors() {
        for message in &saved.errors {
            error!(%message, "validation error");
        }
        return Err(DeployError::ValidationErrors(saved.errors));
    }

    for message in &saved.warnings {
        warn!(%message, "validation warning");
    }
    if saved.has_warnings() && !config.ignore_warnings {
        return Err(DeployError::UnacknowledgedWarnings(saved.warnings));
    }

    if config.stop_property_activation {
        info!(version, "activation skipped");
        return Ok(DeployOutcome::Saved {
            version,
            warnings: saved.warnings,
        });
    }

    let request = ActivationRequest {
        property_version: version,
        network: config.network,
        note: config
            .note
            .clone()
            .unwrap_or_else(|| activation_note(Utc::now())),
        notify_emails: config.notify_emails.clone(),
        acknowledge_all_warnings: saved.has_warnings(),
        use_fast_fallback: false,
    };

    let span = info_span!(
        "papi.activate",
        papi.property.version = version,
        papi.network = %config.network
    );
    let activation = api
        .activate_property_version(&property, &request)
        .instrument(span)
        .await
        .map_err(step_error(DeployStep::Activate))?;
    info!(version, activation_id = %activation.activation_id, "activation submitted");

    Ok(DeployOutcome::Activated {
        version,
        warnings: saved.warnings,
        activation,
    })
}

fn step_error(step: DeployStep) -> impl Fn(ApiError) -> DeployError {
    move |source| match source {
        ApiError::Forbidden(detail) => DeployError::LoginFailed(detail),
        source => DeployError::Step { step, source },
    }
}

fn with_rule_format<'a>(rules: &'a RuleTree, rule_format: &str) -> Cow<'a, RuleTree> {
    if rules.rule_format.is_some() {
        return Cow::Borrowed(rules);
    }
    let mut stamped = rules.clone();
    stamped.rule_format = Some(rule_format.to_string());
    Cow::Owned(stamped)
}

fn activation_note(now: DateTime<Utc>) -> String {
    format!(
        "Activated by papi at {}",
        now.to_rfc3339_opts(SecondsFormat::Secs, true)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use papi_types::papi::{Network, PropertyRef, PropertyVersion, SaveRulesResponse};
    use papi_types::rule_tree::Rule;
    use std::future::Future;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockApi {
        latest_error: Option<ApiError>,
        create_error: Option<ApiError>,
        activate_error: Option<ApiError>,
        save_response: SaveRulesResponse,
        calls: Mutex<Vec<&'static str>>,
        saved: Mutex<Option<(u32, RuleTree)>>,
        activations: Mutex<Vec<ActivationRequest>>,
    }

    impl MockApi {
        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: &'static str) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl PropertyManagerApi for MockApi {
        fn latest_property_version(
            &self,
            _property: &PropertyRef,
        ) -> impl Future<Output = Result<PropertyVersion, ApiError>> + Send {
            self.record("latest");
            let result = match &self.latest_error {
                Some(e) => Err(e.clone()),
                None => Ok(PropertyVersion::new(7)),
            };
            async move { result }
        }

        fn create_property_version(
            &self,
            _property: &PropertyRef,
            from: &PropertyVersion,
        ) -> impl Future<Output = Result<PropertyVersion, ApiError>> + Send {
            self.record("create");
            let result = match &self.create_error {
                Some(e) => Err(e.clone()),
                None => Ok(PropertyVersion::new(from.property_version + 1)),
            };
            async move { result }
        }

        fn save_rules_into_property_version(
            &self,
            _property: &PropertyRef,
            version: u32,
            rules: &RuleTree,
        ) -> impl Future<Output = Result<SaveRulesResponse, ApiError>> + Send {
            self.record("save");
            *self.saved.lock().unwrap() = Some((version, rules.clone()));
            let result = Ok(self.save_response.clone());
            async move { result }
        }

        fn activate_property_version(
            &self,
            _property: &PropertyRef,
            request: &ActivationRequest,
        ) -> impl Future<Output = Result<Activation, ApiError>> + Send {
            self.record("activate");
            self.activations.lock().unwrap().push(request.clone());
            let result = match &self.activate_error {
                Some(e) => Err(e.clone()),
                None => Ok(Activation {
                    activation_id: "atv_1".to_string(),
                    activation_link: None,
                }),
            };
            async move { result }
        }
    }

    fn message(title: &str) -> ValidationMessage {
        ValidationMessage {
            message_type: "https://problems.luna.akamaiapis.net/papi/v0/validation".to_string(),
            title: title.to_string(),
            detail: "detail".to_string(),
            error_location: None,
        }
    }

    fn tree() -> RuleTree {
        RuleTree::new(Rule::root(), None)
    }

    #[tokio::test]
    async fn test_full_deploy_runs_steps_in_order() {
        let api = MockApi::default();
        let mut config = DeployConfig::new("prp_1");
        config.network = Network::Production;
        config.notify_emails = vec!["ops@example.com".to_string()];

        let outcome = upload_and_activate_property(&api, &tree(), &config)
            .await
            .unwrap();

        assert_eq!(api.calls(), vec!["latest", "create", "save", "activate"]);
        assert_eq!(outcome.version(), 8);
        assert!(matches!(outcome, DeployOutcome::Activated { .. }));

        let (version, saved) = api.saved.lock().unwrap().clone().unwrap();
        assert_eq!(version, 8);
        assert_eq!(saved.rule_format.as_deref(), Some(config.rule_format.as_str()));

        let request = api.activations.lock().unwrap()[0].clone();
        assert_eq!(request.property_version, 8);
        assert_eq!(request.network, Network::Production);
        assert_eq!(request.notify_emails, config.notify_emails);
        assert!(!request.acknowledge_all_warnings);
        assert!(request.note.starts_with("Activated by papi at "));
    }

    #[tokio::test]
    async fn test_existing_rule_format_is_kept() {
        let api = MockApi::default();
        let mut rules = tree();
        rules.rule_format = Some("latest".to_string());

        upload_and_activate_property(&api, &rules, &DeployConfig::new("prp_1"))
            .await
            .unwrap();

        let (_, saved) = api.saved.lock().unwrap().clone().unwrap();
        assert_eq!(saved.rule_format.as_deref(), Some("latest"));
    }

    #[tokio::test]
    async fn test_forbidden_latest_version_is_login_failure() {
        let api = MockApi {
            latest_error: Some(ApiError::Forbidden("bad token".to_string())),
            ..Default::default()
        };

        let err = upload_and_activate_property(&api, &tree(), &DeployConfig::new("prp_1"))
            .await
            .unwrap_err();

        assert!(matches!(err, DeployError::LoginFailed(ref d) if d == "bad token"));
        assert_eq!(api.calls(), vec!["latest"]);
    }

    #[tokio::test]
    async fn test_other_latest_version_error_is_connect_failure() {
        let api = MockApi {
            latest_error: Some(ApiError::Connection("dns lookup failed".to_string())),
            ..Default::default()
        };

        let err = upload_and_activate_property(&api, &tree(), &DeployConfig::new("prp_1"))
            .await
            .unwrap_err();

        assert!(matches!(err, DeployError::Connect(ref m) if m.contains("dns lookup failed")));
    }

    #[tokio::test]
    async fn test_create_failure_names_the_step() {
        let api = MockApi {
            create_error: Some(ApiError::from_status(409, "version conflict")),
            ..Default::default()
        };

        let err = upload_and_activate_property(&api, &tree(), &DeployConfig::new("prp_1"))
            .await
            .unwrap_err();

        match err {
            DeployError::Step { step, source } => {
                assert_eq!(step, DeployStep::CreateVersion);
                assert_eq!(source.status(), Some(409));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(api.calls(), vec!["latest", "create"]);
    }

    #[tokio::test]
    async fn test_forbidden_after_login_is_still_login_failure() {
        let api = MockApi {
            activate_error: Some(ApiError::from_status(403, "no activation rights")),
            ..Default::default()
        };

        let err = upload_and_activate_property(&api, &tree(), &DeployConfig::new("prp_1"))
            .await
            .unwrap_err();

        assert!(matches!(err, DeployError::LoginFailed(_)));
    }

    #[tokio::test]
    async fn test_validation_errors_halt_before_activation() {
        let api = MockApi {
            save_response: SaveRulesResponse {
                errors: vec![message("Missing origin"), message("Bad CP code")],
                warnings: vec![message("Slow TTL")],
                etag: None,
            },
            ..Default::default()
        };
        let mut config = DeployConfig::new("prp_1");
        config.ignore_warnings = true;

        let err = upload_and_activate_property(&api, &tree(), &config)
            .await
            .unwrap_err();

        match err {
            DeployError::ValidationErrors(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(api.calls(), vec!["latest", "create", "save"]);
    }

    #[tokio::test]
    async fn test_warnings_halt_unless_ignored() {
        let response = SaveRulesResponse {
            warnings: vec![message("Slow TTL")],
            ..Default::default()
        };
        let api = MockApi {
            save_response: response.clone(),
            ..Default::default()
        };

        let err = upload_and_activate_property(&api, &tree(), &DeployConfig::new("prp_1"))
            .await
            .unwrap_err();
        assert!(matches!(err, DeployError::UnacknowledgedWarnings(ref w) if w.len() == 1));
        assert!(!api.calls().contains(&"activate"));

        let api = MockApi {
            save_response: response,
            ..Default::default()
        };
        let mut config = DeployConfig::new("prp_1");
        config.ignore_warnings = true;

        let outcome = upload_and_activate_property(&api, &tree(), &config)
            .await
            .unwrap();
        assert_eq!(outcome.warnings().len(), 1);
        assert!(api.activations.lock().unwrap()[0].acknowledge_all_warnings);
    }

    #[tokio::test]
    async fn test_stop_property_activation_saves_only() {
        let api = MockApi::default();
        let mut config = DeployConfig::new("prp_1");
        config.stop_property_activation = true;

        let outcome = upload_and_activate_property(&api, &tree(), &config)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            DeployOutcome::Saved {
                version: 8,
                warnings: Vec::new()
            }
        );
        assert_eq!(api.calls(), vec!["latest", "create", "save"]);
    }

    #[tokio::test]
    async fn test_configured_note_is_used() {
        let api = MockApi::default();
        let mut config = DeployConfig::new("prp_1");
        config.note = Some("release 42".to_string());

        upload_and_activate_property(&api, &tree(), &config)
            .await
            .unwrap();

        assert_eq!(api.activations.lock().unwrap()[0].note, "release 42");
    }

    #[tokio::test]
    async fn test_invalid_config_makes_no_calls() {
        let api = MockApi::default();

        let err = upload_and_activate_property(&api, &tree(), &DeployConfig::new(" "))
            .await
            .unwrap_err();

        assert!(matches!(err, DeployError::Config(ConfigError::Invalid(_))));
        assert!(api.calls().is_empty());
    }

    #[derive(Clone, Default)]
    struct SpanRecorder(std::sync::Arc<Mutex<Vec<(&'static str, Vec<String>)>>>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for SpanRecorder {
        fn on_new_span(
            &self,
            attrs: &tracing::span::Attributes<'_>,
            _id: &tracing::span::Id,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            let fields = attrs
                .metadata()
                .fields()
                .iter()
                .map(|f| f.name().to_string())
                .collect();
            self.0.lock().unwrap().push((attrs.metadata().name(), fields));
        }
    }

    #[tokio::test]
    async fn test_deploy_spans_use_shared_attribute_names() {
        use papi_observe::papi_attrs;
        use tracing_subscriber::layer::SubscriberExt;

        let recorder = SpanRecorder::default();
        let subscriber = tracing_subscriber::registry().with(recorder.clone());
        let _guard = tracing::subscriber::set_default(subscriber);

        let api = MockApi::default();
        upload_and_activate_property(&api, &tree(), &DeployConfig::new("prp_1"))
            .await
            .unwrap();

        let spans = recorder.0.lock().unwrap().clone();
        let names: Vec<_> = spans.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![
                papi_attrs::SPAN_DEPLOY,
                papi_attrs::SPAN_LATEST_VERSION,
                papi_attrs::SPAN_CREATE_VERSION,
                papi_attrs::SPAN_SAVE_RULES,
                papi_attrs::SPAN_ACTIVATE,
            ]
        );
        assert!(spans[0].1.iter().any(|f| f == papi_attrs::PAPI_PROPERTY_ID));
        assert!(spans[0].1.iter().any(|f| f == papi_attrs::PAPI_NETWORK));
        assert!(spans[3].1.iter().any(|f| f == papi_attrs::PAPI_PROPERTY_VERSION));
    }

    #[test]
    fn test_activation_note_format() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        assert_eq!(activation_note(now), "Activated by papi at 2024-03-01T12:30:00Z");
    }

    #[test]
    fn test_step_error_display() {
        let err = DeployError::Step {
            step: DeployStep::SaveRules,
            source: ApiError::Decode("missing etag".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "saving rules failed: unexpected response: missing etag"
        );
    }
}
