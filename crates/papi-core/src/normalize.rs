//! Fill catalog defaults into an existing rule tree.
//!
//! Used on rule trees that were written by hand or exported from Property
//! Manager: every catalogued behavior and criterion gets its missing default
//! keys, existing keys are never touched.

use std::collections::BTreeSet;

use papi_types::rule::RuleKind;
use papi_types::rule_tree::{Rule, RuleNode, RuleTree};

use crate::catalog;

/// Outcome of [`normalize_rule_tree`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    /// Nodes whose options were run through the catalog.
    pub normalized: usize,
    /// Names of rules not in the catalog, as `KIND name`, deduplicated.
    pub unknown: Vec<String>,
    /// `(rule path, message)` for nodes whose options did not parse.
    pub failures: Vec<(String, String)>,
}

impl NormalizeReport {
    pub fn is_clean(&self) -> bool {
        self.unknown.is_empty() && self.failures.is_empty()
    }
}

/// Normalize every behavior and criterion in `tree`, in place.
pub fn normalize_rule_tree(tree: &mut RuleTree) -> NormalizeReport {
    let mut report = NormalizeReport::default();
    let mut unknown = BTreeSet::new();
    let root_path = tree.rules.name.clone();
    walk(&mut tree.rules, &root_path, &mut report, &mut unknown);
    report.unknown = unknown.into_iter().collect();

    tracing::info!(
        normalized = report.normalized,
        unknown = report.unknown.len(),
        failures = report.failures.len(),
        "rule tree normalized"
    );
    report
}

fn walk(rule: &mut Rule, path: &str, report: &mut NormalizeReport, unknown: &mut BTreeSet<String>) {
    for node in &mut rule.criteria {
        normalize_node(RuleKind::Criteria, node, path, report, unknown);
    }
    for node in &mut rule.behaviors {
        normalize_node(RuleKind::Behavior, node, path, report, unknown);
    }
    for child in &mut rule.children {
        let child_path = format!("{path}/{}", child.name);
        walk(child, &child_path, report, unknown);
    }
}

fn normalize_node(
    kind: RuleKind,
    node: &mut RuleNode,
    path: &str,
    report: &mut NormalizeReport,
    unknown: &mut BTreeSet<String>,
) {
    let Some(descriptor) = catalog::lookup(kind, &node.name) else {
        unknown.insert(format!("{kind} {}", node.name));
        return;
    };
    match descriptor.normalize(&node.options) {
        Ok(options) => {
            node.options = options;
            report.normalized += 1;
        }
        Err(e) => {
            tracing::warn!(rule = path, name = %node.name, error = %e, "options left unchanged");
            report
                .failures
                .push((path.to_string(), format!("{kind} {}: {e}", node.name)));
        }
    }
}
