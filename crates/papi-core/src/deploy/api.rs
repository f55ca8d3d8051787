//! PropertyManagerApi trait definition.
//!
//! The four Property Manager calls the deploy workflow needs. Uses RPITIT
//! like the rest of the async seams in this workspace; the HTTP client that
//! implements it is not part of this workspace.

use papi_types::papi::{
    Activation, ActivationRequest, ApiError, PropertyRef, PropertyVersion, SaveRulesResponse,
};
use papi_types::rule_tree::RuleTree;

/// Versioning, rule-saving and activation endpoints of Property Manager.
///
/// A 403 from any call should be reported as [`ApiError::Forbidden`]; the
/// workflow turns it into a login failure.
pub trait PropertyManagerApi: Send + Sync {
    /// Most recent version of `property`.
    fn latest_property_version(
        &self,
        property: &PropertyRef,
    ) -> impl std::future::Future<Output = Result<PropertyVersion, ApiError>> + Send;

    /// Create a new version based on `from`.
    fn create_property_version(
        &self,
        property: &PropertyRef,
        from: &PropertyVersion,
    ) -> impl std::future::Future<Output = Result<PropertyVersion, ApiError>> + Send;

    /// Replace the rule tree of `version` and return the validation result.
    fn save_rules_into_property_version(
        &self,
        property: &PropertyRef,
        version: u32,
        rules: &RuleTree,
    ) -> impl std::future::Future<Output = Result<SaveRulesResponse, ApiError>> + Send;

    /// Submit an activation.
    fn activate_property_version(
        &self,
        property: &PropertyRef,
        request: &ActivationRequest,
    ) -> impl std::future::Future<Output = Result<Activation, ApiError>> + Send;
}
