//! Fluent property builder.
//!
//! `Property` exposes one `set_*` method per behavior and one `on_*` method
//! per criterion. Each call fills the option defaults, serializes the options
//! and hands `(kind, name, meta, options)` to the injected
//! [`PropertyDelegate`]. Criteria open a child rule; the returned
//! [`CriteriaBuilder`] closes it when dropped.
//!
//! ```ignore
//! let mut property = Property::new(RuleTreeBuilder::new());
//! property.set_origin(Origin { hostname: Some("origin.example.com".into()), ..Default::default() });
//! property
//!     .on_file_extension(FileExtension { values: Some(vec!["css".into(), "js".into()]), ..Default::default() })
//!     .named("Static")
//!     .then(|p| {
//!         p.set_caching(Caching { ttl: Some("7d".into()), ..Default::default() });
//!     });
//! let tree = property.into_delegate()?.finish()?;
//! ```

mod delegate;
mod methods;

pub use delegate::PropertyDelegate;

use papi_types::error::BuildError;
use papi_types::rule::CriteriaMustSatisfy;
use papi_types::rule_tree::Variable;

use crate::catalog::{RuleOptions, options_map};

// ---------------------------------------------------------------------------
// Property
// ---------------------------------------------------------------------------

/// Builder front end that owns a delegate.
///
/// Builder methods never fail. The first serialization error is kept and
/// returned by [`Property::into_delegate`]; options that failed to serialize
/// are not forwarded.
#[derive(Debug)]
pub struct Property<D> {
    delegate: D,
    error: Option<BuildError>,
}

impl<D: PropertyDelegate> Property<D> {
    pub fn new(delegate: D) -> Self {
        Self {
            delegate,
            error: None,
        }
    }

    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    /// First error recorded while building, if any.
    pub fn error(&self) -> Option<&BuildError> {
        self.error.as_ref()
    }

    /// Hand back the delegate, or the first error recorded while building.
    pub fn into_delegate(self) -> Result<D, BuildError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.delegate),
        }
    }

    /// Add a named child rule without criteria.
    pub fn rule(&mut self, name: &str, build: impl FnOnce(&mut Self)) -> &mut Self {
        self.delegate.begin_rule(Some(name));
        build(self);
        self.delegate.end_rule();
        self
    }

    /// Set the comment of the current rule.
    pub fn comment(&mut self, comment: &str) -> &mut Self {
        self.delegate.set_comment(comment);
        self
    }

    pub fn declare_variable(&mut self, variable: Variable) -> &mut Self {
        self.delegate.declare_variable(variable);
        self
    }

    /// Mark the property as HTTPS-enabled (`options.is_secure`).
    pub fn set_secure(&mut self, secure: bool) -> &mut Self {
        self.delegate.set_secure(secure);
        self
    }

    fn behavior<T: RuleOptions>(&mut self, params: T) -> &mut Self {
        self.forward(params);
        self
    }

    fn criterion<T: RuleOptions>(&mut self, params: T) -> CriteriaBuilder<'_, D> {
        self.delegate.begin_rule(None);
        self.forward(params);
        CriteriaBuilder { property: self }
    }

    fn forward<T: RuleOptions>(&mut self, mut params: T) {
        params.apply_defaults();
        match options_map(&params) {
            Ok(options) => {
                tracing::debug!(kind = %T::KIND, name = T::NAME, fields = options.len(), "forwarding rule options");
                self.delegate
                    .add_from_property(T::KIND, T::NAME, &T::META, options);
            }
            Err(e) => {
                tracing::warn!(kind = %T::KIND, name = T::NAME, error = %e, "failed to serialize rule options");
                if self.error.is_none() {
                    self.error = Some(BuildError::Serialize {
                        kind: T::KIND,
                        name: T::NAME.to_string(),
                        message: e.to_string(),
                    });
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// CriteriaBuilder
// ---------------------------------------------------------------------------

/// A child rule opened by an `on_*` call.
///
/// Further `on_*` calls add criteria to the same rule. Use
/// [`then`](Self::then) to add behaviors and nested rules inside it. The rule
/// is closed when the builder is dropped.
pub struct CriteriaBuilder<'a, D: PropertyDelegate> {
    property: &'a mut Property<D>,
}

impl<D: PropertyDelegate> CriteriaBuilder<'_, D> {
    fn criterion<T: RuleOptions>(&mut self, params: T) -> &mut Self {
        self.property.forward(params);
        self
    }

    /// Match when any criterion matches.
    pub fn any(&mut self) -> &mut Self {
        self.property
            .delegate
            .set_criteria_must_satisfy(CriteriaMustSatisfy::Any);
        self
    }

    /// Match only when every criterion matches (the default).
    pub fn all(&mut self) -> &mut Self {
        self.property
            .delegate
            .set_criteria_must_satisfy(CriteriaMustSatisfy::All);
        self
    }

    pub fn named(&mut self, name: &str) -> &mut Self {
        self.property.delegate.set_rule_name(name);
        self
    }

    pub fn comment(&mut self, comment: &str) -> &mut Self {
        self.property.delegate.set_comment(comment);
        self
    }

    /// Build the body of this rule.
    pub fn then(&mut self, build: impl FnOnce(&mut Property<D>)) -> &mut Self {
        build(&mut *self.property);
        self
    }
}

impl<D: PropertyDelegate> Drop for CriteriaBuilder<'_, D> {
    fn drop(&mut self) {
        self.property.delegate.end_rule();
    }
}
