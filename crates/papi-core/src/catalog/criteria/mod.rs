//! Criteria options (`on_*` builder methods).
//!
//! Several criteria share the same operator vocabularies; those live here.

mod location;
mod request;
mod response;
mod variables;

pub use location::*;
pub use request::*;
pub use response::*;
pub use variables::*;

use serde::{Deserialize, Serialize};

/// `IS_ONE_OF` / `IS_NOT_ONE_OF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListMatch {
    IsOneOf,
    IsNotOneOf,
}

/// `MATCHES_ONE_OF` / `DOES_NOT_MATCH_ONE_OF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatternMatch {
    MatchesOneOf,
    DoesNotMatchOneOf,
}

/// `IS` / `IS_NOT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IsMatch {
    Is,
    IsNot,
}

/// List membership plus presence checks, used by header criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PresenceMatch {
    IsOneOf,
    IsNotOneOf,
    Exists,
    DoesNotExist,
}

impl PresenceMatch {
    pub fn is_list(self) -> bool {
        matches!(self, PresenceMatch::IsOneOf | PresenceMatch::IsNotOneOf)
    }
}

/// List membership, presence and numeric range checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueMatch {
    IsOneOf,
    IsNotOneOf,
    Exists,
    DoesNotExist,
    IsLessThan,
    IsMoreThan,
    IsBetween,
}

impl ValueMatch {
    pub fn is_list(self) -> bool {
        matches!(self, ValueMatch::IsOneOf | ValueMatch::IsNotOneOf)
    }
}

/// Which client addresses a geography/network criterion inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckIps {
    Both,
    Connecting,
    Headers,
}

impl CheckIps {
    pub fn reads_headers(self) -> bool {
        matches!(self, CheckIps::Both | CheckIps::Headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_wire_names() {
        assert_eq!(serde_json::to_string(&ListMatch::IsNotOneOf).unwrap(), "\"IS_NOT_ONE_OF\"");
        assert_eq!(
            serde_json::to_string(&PatternMatch::DoesNotMatchOneOf).unwrap(),
            "\"DOES_NOT_MATCH_ONE_OF\""
        );
        assert_eq!(serde_json::to_string(&ValueMatch::IsBetween).unwrap(), "\"IS_BETWEEN\"");
        assert_eq!(serde_json::to_string(&PresenceMatch::DoesNotExist).unwrap(), "\"DOES_NOT_EXIST\"");
    }

    #[test]
    fn test_list_predicates() {
        assert!(PresenceMatch::IsOneOf.is_list());
        assert!(!PresenceMatch::Exists.is_list());
        assert!(ValueMatch::IsNotOneOf.is_list());
        assert!(!ValueMatch::IsLessThan.is_list());
        assert!(CheckIps::Headers.reads_headers());
        assert!(!CheckIps::Connecting.reads_headers());
    }
}
