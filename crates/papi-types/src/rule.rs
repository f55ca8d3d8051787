//! Classification tags passed alongside every rule forwarded to a delegate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which half of a rule a node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RuleKind {
    /// A match condition (`on_*` builder methods).
    Criteria,
    /// An action applied when the rule matches (`set_*` builder methods).
    Behavior,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Criteria => write!(f, "CRITERIA"),
            RuleKind::Behavior => write!(f, "BEHAVIOR"),
        }
    }
}

impl FromStr for RuleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "criteria" | "criterion" => Ok(RuleKind::Criteria),
            "behavior" | "behaviors" | "behaviour" => Ok(RuleKind::Behavior),
            other => Err(format!("invalid rule kind: '{other}'")),
        }
    }
}

/// Per-rule metadata describing how option fields relate to user variables.
///
/// `allows_vars` lists the option fields that may embed `{{user.PMUSER_*}}`
/// references; `variable` lists the option fields whose value *names* a
/// user variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionMeta {
    pub allows_vars: &'static [&'static str],
    pub variable: &'static [&'static str],
}

impl OptionMeta {
    pub const EMPTY: OptionMeta = OptionMeta {
        allows_vars: &[],
        variable: &[],
    };

    pub const fn allows_vars(fields: &'static [&'static str]) -> Self {
        Self {
            allows_vars: fields,
            variable: &[],
        }
    }

    pub const fn variable(fields: &'static [&'static str]) -> Self {
        Self {
            allows_vars: &[],
            variable: fields,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.allows_vars.is_empty() && self.variable.is_empty()
    }
}

impl Default for OptionMeta {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// How the criteria of a rule combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CriteriaMustSatisfy {
    #[default]
    All,
    Any,
}

impl fmt::Display for CriteriaMustSatisfy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CriteriaMustSatisfy::All => write!(f, "all"),
            CriteriaMustSatisfy::Any => write!(f, "any"),
        }
    }
}
