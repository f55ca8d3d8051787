//! The sink every builder call is forwarded to.

use papi_types::rule::{CriteriaMustSatisfy, OptionMeta, RuleKind};
use papi_types::rule_tree::Variable;
use serde_json::{Map, Value};

/// Receives the rule options produced by [`Property`](super::Property).
///
/// Only `add_from_property` is required. The structural hooks default to
/// no-ops so a delegate that just records `(kind, name, meta, options)`
/// tuples stays a one-method impl.
pub trait PropertyDelegate {
    /// Accept one criterion or behavior with its defaults already filled.
    fn add_from_property(
        &mut self,
        kind: RuleKind,
        name: &str,
        meta: &OptionMeta,
        options: Map<String, Value>,
    );

    /// Open a child rule of the current rule. `None` leaves naming to the delegate.
    fn begin_rule(&mut self, _name: Option<&str>) {}

    /// Close the rule opened by the matching `begin_rule`.
    fn end_rule(&mut self) {}

    fn set_rule_name(&mut self, _name: &str) {}

    fn set_criteria_must_satisfy(&mut self, _mode: CriteriaMustSatisfy) {}

    fn set_comment(&mut self, _comment: &str) {}

    /// Declare a user variable on the top-level rule.
    fn declare_variable(&mut self, _variable: Variable) {}

    fn set_secure(&mut self, _secure: bool) {}
}

impl<D: PropertyDelegate + ?Sized> PropertyDelegate for &mut D {
    fn add_from_property(
        &mut self,
        kind: RuleKind,
        name: &str,
        meta: &OptionMeta,
        options: Map<String, Value>,
    ) {
        (**self).add_from_property(kind, name, meta, options);
    }

    fn begin_rule(&mut self, name: Option<&str>) {
        (**self).begin_rule(name);
    }

    fn end_rule(&mut self) {
        (**self).end_rule();
    }

    fn set_rule_name(&mut self, name: &str) {
        (**self).set_rule_name(name);
    }

    fn set_criteria_must_satisfy(&mut self, mode: CriteriaMustSatisfy) {
        (**self).set_criteria_must_satisfy(mode);
    }

    fn set_comment(&mut self, comment: &str) {
        (**self).set_comment(comment);
    }

    fn declare_variable(&mut self, variable: Variable) {
        (**self).declare_variable(variable);
    }

    fn set_secure(&mut self, secure: bool) {
        (**self).set_secure(secure);
    }
}
