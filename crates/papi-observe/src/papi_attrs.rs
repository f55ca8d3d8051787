//! Span attribute names used by the deploy workflow.
//!
//! All constants are string slices matching the dotted field names recorded
//! on `papi.*` spans, so exporters and log queries can refer to them by name.

// --- Property identification ---

/// Property being deployed (e.g. "prp_123456").
pub const PAPI_PROPERTY_ID: &str = "papi.property.id";

/// Property version the step operates on.
pub const PAPI_PROPERTY_VERSION: &str = "papi.property.version";

/// Activation network ("STAGING" or "PRODUCTION").
pub const PAPI_NETWORK: &str = "papi.network";

// --- Span names ---

/// The whole upload-and-activate run.
pub const SPAN_DEPLOY: &str = "papi.deploy";

pub const SPAN_LATEST_VERSION: &str = "papi.latest_version";

pub const SPAN_CREATE_VERSION: &str = "papi.create_version";

pub const SPAN_SAVE_RULES: &str = "papi.save_rules";

pub const SPAN_ACTIVATE: &str = "papi.activate";

/// Service name reported to OpenTelemetry.
pub const SERVICE_NAME: &str = "papi";
