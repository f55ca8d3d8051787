//! `RuleTreeBuilder`: the delegate that assembles a PAPI rule tree.

use papi_types::error::BuildError;
use papi_types::rule::{CriteriaMustSatisfy, OptionMeta, RuleKind};
use papi_types::rule_tree::{
    DEFAULT_RULE_NAME, RULE_FORMAT, Rule, RuleFlags, RuleNode, RuleTree, Variable, with_user_prefix,
};
use serde_json::{Map, Value};

use crate::property::PropertyDelegate;

/// Name given to a rule that has neither an explicit name nor criteria.
pub const UNTITLED_RULE: &str = "Untitled";

const USER_VAR_OPEN: &str = "{{user.";
const USER_VAR_CLOSE: &str = "}}";

/// A rule under construction plus the variable references found in it.
#[derive(Debug)]
struct Frame {
    rule: Rule,
    references: Vec<(String, String)>,
}

impl Frame {
    fn new(rule: Rule) -> Self {
        Self {
            rule,
            references: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct VariableReference {
    variable: String,
    rule: String,
    field: String,
}

/// Builds a [`RuleTree`] from the calls a [`Property`](crate::property::Property) makes.
///
/// Rules form a stack: the root `default` rule sits at the bottom and every
/// `begin_rule` pushes a child that `end_rule` pops back into its parent.
#[derive(Debug)]
pub struct RuleTreeBuilder {
    stack: Vec<Frame>,
    references: Vec<VariableReference>,
    rule_format: String,
}

impl Default for RuleTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleTreeBuilder {
    pub fn new() -> Self {
        Self::with_rule_format(RULE_FORMAT)
    }

    pub fn with_rule_format(rule_format: impl Into<String>) -> Self {
        Self {
            stack: vec![Frame::new(Rule::root())],
            references: Vec::new(),
            rule_format: rule_format.into(),
        }
    }

    /// Current nesting depth; 0 at the root.
    pub fn depth(&self) -> usize {
        self.stack.len().saturating_sub(1)
    }

    /// Close any open rules, check variable references and return the tree.
    pub fn finish(mut self) -> Result<RuleTree, BuildError> {
        if self.depth() > 0 {
            tracing::warn!(
                open = self.depth(),
                rule = self.current_rule_name(),
                "closing rules left open at finish"
            );
            while self.depth() > 0 {
                self.end_rule();
            }
        }
        let Some(mut root) = self.stack.pop() else {
            return Ok(RuleTree::new(Rule::root(), Some(self.rule_format)));
        };
        self.collect_references(&mut root);

        for reference in &self.references {
            if !root.rule.variables.iter().any(|v| v.name == reference.variable) {
                return Err(BuildError::UndeclaredVariable {
                    variable: reference.variable.clone(),
                    rule: reference.rule.clone(),
                    field: reference.field.clone(),
                });
            }
        }

        tracing::debug!(
            rules = root.rule.count(),
            variables = root.rule.variables.len(),
            rule_format = %self.rule_format,
            "rule tree finished"
        );
        Ok(RuleTree::new(root.rule, Some(self.rule_format)))
    }

    fn current(&mut self) -> &mut Frame {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn root_rule(&mut self) -> &mut Rule {
        &mut self.stack[0].rule
    }

    fn declare_if_missing(&mut self, name: &str) {
        let root = self.root_rule();
        if !root.variables.iter().any(|v| v.name == name) {
            tracing::debug!(variable = name, "declaring user variable");
            root.variables.push(Variable::new(name));
        }
    }

    fn collect_references(&mut self, frame: &mut Frame) {
        let rule = frame.rule.name.clone();
        for (variable, field) in frame.references.drain(..) {
            self.references.push(VariableReference {
                variable,
                rule: rule.clone(),
                field,
            });
        }
    }
}

/// Name an unnamed rule after its criteria.
fn derive_rule_name(rule: &Rule) -> String {
    if rule.criteria.is_empty() {
        return UNTITLED_RULE.to_string();
    }
    let separator = match rule.criteria_must_satisfy.unwrap_or_default() {
        CriteriaMustSatisfy::All => " & ",
        CriteriaMustSatisfy::Any => " | ",
    };
    rule.criteria
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Variable names referenced as `{{user.NAME}}` in `text`.
///
/// Only the exact `{{user.` opener is recognised, which is the form Property
/// Manager expands; `{{ user.NAME }}` is left unscanned.
pub fn user_variable_references(text: &str) -> Vec<&str> {
    let mut found = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find(USER_VAR_OPEN) {
        let after = &rest[start + USER_VAR_OPEN.len()..];
        let Some(end) = after.find(USER_VAR_CLOSE) else {
            break;
        };
        let name = after[..end].trim();
        if !name.is_empty() {
            found.push(name);
        }
        rest = &after[end + USER_VAR_CLOSE.len()..];
    }
    found
}

fn string_values(value: &Value) -> Vec<&str> {
    match value {
        Value::String(s) => vec![s.as_str()],
        Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

impl PropertyDelegate for RuleTreeBuilder {
    fn add_from_property(
        &mut self,
        kind: RuleKind,
        name: &str,
        meta: &OptionMeta,
        mut options: Map<String, Value>,
    ) {
        for field in meta.variable {
            let Some(Value::String(variable)) = options.get(*field) else {
                continue;
            };
            let prefixed = with_user_prefix(variable);
            self.declare_if_missing(&prefixed);
            options.insert((*field).to_string(), Value::String(prefixed));
        }

        let mut references = Vec::new();
        for field in meta.allows_vars {
            if let Some(value) = options.get(*field) {
                for text in string_values(value) {
                    for variable in user_variable_references(text) {
                        references.push((variable.to_string(), (*field).to_string()));
                    }
                }
            }
        }

        let depth = self.depth();
        let frame = self.current();
        frame.references.extend(references);
        match kind {
            RuleKind::Behavior => frame.rule.behaviors.push(RuleNode::new(name, options)),
            RuleKind::Criteria => {
                if depth == 0 {
                    tracing::warn!(criterion = name, "criterion added to the top-level rule");
                }
                frame.rule.criteria.push(RuleNode::new(name, options));
            }
        }
    }

    fn begin_rule(&mut self, name: Option<&str>) {
        tracing::debug!(name = name.unwrap_or(""), depth = self.depth() + 1, "begin rule");
        self.stack.push(Frame::new(Rule::named(name.unwrap_or_default())));
    }

    fn end_rule(&mut self) {
        if self.depth() == 0 {
            tracing::warn!("end_rule called with no open rule; ignoring");
            return;
        }
        let Some(mut frame) = self.stack.pop() else {
            return;
        };
        if !frame.rule.criteria.is_empty() && frame.rule.criteria_must_satisfy.is_none() {
            frame.rule.criteria_must_satisfy = Some(CriteriaMustSatisfy::All);
        }
        if frame.rule.name.is_empty() {
            frame.rule.name = derive_rule_name(&frame.rule);
        }
        tracing::debug!(name = %frame.rule.name, "end rule");
        self.collect_references(&mut frame);
        self.current().rule.children.push(frame.rule);
    }

    fn set_rule_name(&mut self, name: &str) {
        self.current().rule.name = name.to_string();
    }

    fn set_criteria_must_satisfy(&mut self, mode: CriteriaMustSatisfy) {
        self.current().rule.criteria_must_satisfy = Some(mode);
    }

    fn set_comment(&mut self, comment: &str) {
        self.current().rule.comments = Some(comment.to_string());
    }

    /// Explicit declarations replace an automatic one with the same name.
    fn declare_variable(&mut self, variable: Variable) {
        let root = self.root_rule();
        match root.variables.iter_mut().find(|v| v.name == variable.name) {
            Some(existing) => *existing = variable,
            None => root.variables.push(variable),
        }
    }

    fn set_secure(&mut self, secure: bool) {
        self.root_rule()
            .options
            .get_or_insert_with(RuleFlags::default)
            .is_secure = secure;
    }
}

impl RuleTreeBuilder {
    /// Name of the rule currently being built.
    pub fn current_rule_name(&self) -> &str {
        self.stack
            .last()
            .map(|f| f.rule.name.as_str())
            .unwrap_or(DEFAULT_RULE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RuleOptions;
    use crate::catalog::behaviors::{Caching, ModifyOutgoingResponseHeader, SetVariable};
    use crate::catalog::criteria::{FileExtension, Hostname, MatchVariable, Path};
    use crate::property::Property;
    use serde_json::json;

    fn strings(values: &[&str]) -> Option<Vec<String>> {
        Some(values.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_user_variable_references() {
        assert_eq!(
            user_variable_references("{{user.PMUSER_A}}-{{builtin.AK_HOST}}-{{ user.PMUSER_B }}{{user.PMUSER_C}}"),
            vec!["PMUSER_A", "PMUSER_C"]
        );
        assert!(user_variable_references("{{user.PMUSER_OPEN").is_empty());
        assert!(user_variable_references("plain").is_empty());
    }

    #[test]
    fn test_builds_nested_rule_tree() {
        let mut property = Property::new(RuleTreeBuilder::new());
        property.set_secure(true).set_caching(Caching::default());
        property
            .on_file_extension(FileExtension {
                values: strings(&["css", "js"]),
                ..Default::default()
            })
            .named("Static")
            .then(|p| {
                p.set_caching(Caching {
                    ttl: Some("7d".to_string()),
                    ..Default::default()
                });
            });

        let tree = property.into_delegate().unwrap().finish().unwrap();
        assert_eq!(tree.rule_format.as_deref(), Some(RULE_FORMAT));
        assert_eq!(tree.rule_count(), 2);
        assert!(tree.rules.options.as_ref().unwrap().is_secure);

        let child = tree.rules.child("Static").unwrap();
        assert_eq!(child.criteria_must_satisfy, Some(CriteriaMustSatisfy::All));
        assert_eq!(
            child.criterion("fileExtension").unwrap().options["values"],
            json!(["css", "js"])
        );
        assert_eq!(child.behavior("caching").unwrap().options["ttl"], json!("7d"));
    }

    #[test]
    fn test_unnamed_rules_are_named_after_criteria() {
        let mut property = Property::new(RuleTreeBuilder::new());
        property
            .on_hostname(Hostname::default())
            .on_path(Path::default());
        property
            .on_hostname(Hostname::default())
            .on_path(Path::default())
            .any();
        property.rule("", |_| {});

        let tree = property.into_delegate().unwrap().finish().unwrap();
        let names: Vec<&str> = tree.rules.children.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["hostname & path", "hostname | path", UNTITLED_RULE]);
        assert_eq!(tree.rules.children[2].criteria_must_satisfy, None);
    }

    #[test]
    fn test_variable_fields_are_prefixed_and_declared() {
        let mut property = Property::new(RuleTreeBuilder::new());
        property.set_set_variable(SetVariable {
            variable_name: Some("ORIGIN".to_string()),
            variable_value: Some("origin-a.example.com".to_string()),
            ..Default::default()
        });
        property.on_match_variable(MatchVariable {
            variable_name: Some("PMUSER_ORIGIN".to_string()),
            variable_expression: Some("origin-a.example.com".to_string()),
            ..Default::default()
        });

        let tree = property.into_delegate().unwrap().finish().unwrap();
        assert_eq!(tree.rules.variables.len(), 1);
        let variable = &tree.rules.variables[0];
        assert_eq!(variable.name, "PMUSER_ORIGIN");
        assert_eq!(variable.value, "");
        assert!(variable.hidden);
        assert!(!variable.sensitive);
        assert_eq!(
            tree.rules.behavior("setVariable").unwrap().options["variableName"],
            json!("PMUSER_ORIGIN")
        );
    }

    #[test]
    fn test_undeclared_variable_reference_fails() {
        let mut property = Property::new(RuleTreeBuilder::new());
        property
            .on_path(Path::default())
            .named("Headers")
            .then(|p| {
                p.set_modify_outgoing_response_header(ModifyOutgoingResponseHeader {
                    header_value: Some("{{user.PMUSER_REGION}}".to_string()),
                    ..Default::default()
                });
            });

        let err = property.into_delegate().unwrap().finish().unwrap_err();
        assert_eq!(
            err,
            BuildError::UndeclaredVariable {
                variable: "PMUSER_REGION".to_string(),
                rule: "Headers".to_string(),
                field: "headerValue".to_string(),
            }
        );
    }

    #[test]
    fn test_declared_variable_reference_passes() {
        let mut property = Property::new(RuleTreeBuilder::new());
        property.declare_variable(Variable::new("REGION").with_value("us"));
        property.set_modify_outgoing_response_header(ModifyOutgoingResponseHeader {
            header_value: Some("{{user.PMUSER_REGION}}".to_string()),
            ..Default::default()
        });
        let tree = property.into_delegate().unwrap().finish().unwrap();
        assert_eq!(tree.rules.variables[0].value, "us");
    }

    #[test]
    fn test_explicit_declaration_replaces_automatic_one() {
        let mut builder = RuleTreeBuilder::new();
        builder.add_from_property(
            RuleKind::Behavior,
            "setVariable",
            &SetVariable::META,
            json!({ "variableName": "PMUSER_X" }).as_object().cloned().unwrap(),
        );
        builder.declare_variable(Variable::new("X").with_description("explicit").visible());
        let tree = builder.finish().unwrap();
        assert_eq!(tree.rules.variables.len(), 1);
        assert_eq!(tree.rules.variables[0].description, "explicit");
        assert!(!tree.rules.variables[0].hidden);
    }

    #[test]
    fn test_unbalanced_rules_are_tolerated() {
        let mut builder = RuleTreeBuilder::with_rule_format("latest");
        builder.end_rule();
        builder.begin_rule(Some("Open"));
        builder.set_comment("left open");
        assert_eq!(builder.depth(), 1);
        assert_eq!(builder.current_rule_name(), "Open");

        let tree = builder.finish().unwrap();
        assert_eq!(tree.rule_format.as_deref(), Some("latest"));
        assert_eq!(tree.rules.child("Open").unwrap().comments.as_deref(), Some("left open"));
    }
}
