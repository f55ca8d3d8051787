//! Observability for the Property Manager rule builder.
//!
//! - `tracing_setup`: global subscriber (fmt or JSON, optional OpenTelemetry)
//! - `papi_attrs`: span attribute names shared by the deploy workflow

pub mod papi_attrs;
pub mod tracing_setup;
