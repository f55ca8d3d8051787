//! Rule-tree JSON document types.
//!
//! These mirror the document Property Manager stores per property version:
//! a single `default` rule carrying behaviors, criteria, user variables and
//! nested child rules.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::rule::CriteriaMustSatisfy;

/// Rule format the builder targets unless configured otherwise.
pub const RULE_FORMAT: &str = "v2024-02-12";

/// Name of the top-level rule in every rule tree.
pub const DEFAULT_RULE_NAME: &str = "default";

/// Prefix Property Manager requires on user-defined variable names.
pub const USER_VARIABLE_PREFIX: &str = "PMUSER_";

/// A complete rule tree as saved into a property version.
///
/// Envelope keys Property Manager adds when rules are fetched
/// (`propertyId`, `etag`, ...) are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleTree {
    pub rules: Rule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_format: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RuleTree {
    pub fn new(rules: Rule, rule_format: Option<String>) -> Self {
        Self {
            rules,
            rule_format,
            extra: Map::new(),
        }
    }

    /// Total number of rules, the root included.
    pub fn rule_count(&self) -> usize {
        self.rules.count()
    }
}

/// A single rule: criteria, behaviors and child rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub name: String,
    #[serde(default)]
    pub children: Vec<Rule>,
    #[serde(default)]
    pub behaviors: Vec<RuleNode>,
    #[serde(default)]
    pub criteria: Vec<RuleNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria_must_satisfy: Option<CriteriaMustSatisfy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<RuleFlags>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<Variable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_uuid: Option<String>,
    /// Fields not modelled above (`customOverride`, `criteriaLocked`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Rule {
    /// An empty rule with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            behaviors: Vec::new(),
            criteria: Vec::new(),
            criteria_must_satisfy: None,
            comments: None,
            options: None,
            variables: Vec::new(),
            uuid: None,
            template_uuid: None,
            extra: Map::new(),
        }
    }

    /// The empty top-level rule (`default`, not secure, no variables).
    pub fn root() -> Self {
        Self {
            options: Some(RuleFlags::default()),
            ..Self::named(DEFAULT_RULE_NAME)
        }
    }

    /// Number of rules in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Rule::count).sum::<usize>()
    }

    /// Find a direct child by name.
    pub fn child(&self, name: &str) -> Option<&Rule> {
        self.children.iter().find(|c| c.name == name)
    }

    /// First behavior with the given name.
    pub fn behavior(&self, name: &str) -> Option<&RuleNode> {
        self.behaviors.iter().find(|b| b.name == name)
    }

    /// First criterion with the given name.
    pub fn criterion(&self, name: &str) -> Option<&RuleNode> {
        self.criteria.iter().find(|c| c.name == name)
    }
}

/// A behavior or criterion inside a rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleNode {
    pub name: String,
    #[serde(default)]
    pub options: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_uuid: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RuleNode {
    pub fn new(name: impl Into<String>, options: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            options,
            uuid: None,
            template_uuid: None,
            extra: Map::new(),
        }
    }
}

/// Flags carried by the top-level rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleFlags {
    #[serde(default)]
    pub is_secure: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A user-defined variable declared on the top-level rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_hidden")]
    pub hidden: bool,
    #[serde(default)]
    pub sensitive: bool,
}

fn default_hidden() -> bool {
    true
}

impl Variable {
    /// A hidden, non-sensitive variable with an empty initial value.
    ///
    /// The `PMUSER_` prefix is added when missing.
    pub fn new(name: &str) -> Self {
        Self {
            name: with_user_prefix(name),
            value: String::new(),
            description: String::new(),
            hidden: default_hidden(),
            sensitive: false,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn visible(mut self) -> Self {
        self.hidden = false;
        self
    }
}

/// Ensure a variable name carries the `PMUSER_` prefix.
pub fn with_user_prefix(name: &str) -> String {
    if name.starts_with(USER_VARIABLE_PREFIX) {
        name.to_string()
    } else {
        format!("{USER_VARIABLE_PREFIX}{name}")
    }
}
