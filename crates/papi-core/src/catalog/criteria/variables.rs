//! Criteria on variables, time, traffic buckets and processing stage.

use papi_types::papi::Network;
use papi_types::rule::{OptionMeta, RuleKind};
use serde::{Deserialize, Serialize};

use super::IsMatch;
use crate::catalog::{CpCodeRef, RuleOptions, fill};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariableMatch {
    Is,
    IsNot,
    IsOneOf,
    IsNotOneOf,
    IsEmpty,
    IsNotEmpty,
    IsBetween,
    IsNotBetween,
    IsGreaterThan,
    IsGreaterThanOrEqualTo,
    IsLessThan,
    IsLessThanOrEqualTo,
}

impl VariableMatch {
    /// Operators that compare strings and honour wildcard/case flags.
    pub fn compares_strings(self) -> bool {
        matches!(
            self,
            VariableMatch::Is
                | VariableMatch::IsNot
                | VariableMatch::IsOneOf
                | VariableMatch::IsNotOneOf
        )
    }
}

/// Match the value of a user or built-in variable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchVariable {
    pub variable_name: Option<String>,
    pub match_operator: Option<VariableMatch>,
    pub variable_values: Option<Vec<String>>,
    pub variable_expression: Option<String>,
    pub lower_bound: Option<String>,
    pub upper_bound: Option<String>,
    pub match_wildcard: Option<bool>,
    pub match_case_sensitive: Option<bool>,
}

impl RuleOptions for MatchVariable {
    const KIND: RuleKind = RuleKind::Criteria;
    const NAME: &'static str = "matchVariable";
    const META: OptionMeta = OptionMeta {
        allows_vars: &["variableExpression"],
        variable: &["variableName"],
    };

    fn apply_defaults(&mut self) {
        fill(&mut self.match_operator, VariableMatch::Is);
        if self.match_operator.is_some_and(VariableMatch::compares_strings) {
            fill(&mut self.match_wildcard, false);
            fill(&mut self.match_case_sensitive, true);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeMatch {
    Beginning,
    Between,
    Lasting,
    Repeating,
}

/// Match on the request time, once or on a repeating schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Time {
    pub match_operator: Option<TimeMatch>,
    pub begin_date: Option<String>,
    pub end_date: Option<String>,
    pub lasting_date: Option<String>,
    pub lasting_duration: Option<String>,
    pub repeat_begin_date: Option<String>,
    pub repeat_duration: Option<String>,
    pub repeat_interval: Option<String>,
    pub apply_daylight_savings_time: Option<bool>,
}

impl RuleOptions for Time {
    const KIND: RuleKind = RuleKind::Criteria;
    const NAME: &'static str = "time";

    fn apply_defaults(&mut self) {
        fill(&mut self.match_operator, TimeMatch::Beginning);
        fill(&mut self.apply_daylight_savings_time, false);
    }
}

/// Match a stable percentage of clients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    pub percentage: Option<u8>,
}

impl RuleOptions for Bucket {
    const KIND: RuleKind = RuleKind::Criteria;
    const NAME: &'static str = "bucket";

    fn apply_defaults(&mut self) {
        fill(&mut self.percentage, 100);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    CacheHit,
    CacheMiss,
    ClientRequest,
    ClientResponse,
    ContentPolicy,
    ForwardRequest,
    ForwardResponse,
    ForwardStart,
    IpaResponse,
}

/// Match the metadata processing stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataStage {
    pub match_operator: Option<IsMatch>,
    pub value: Option<Stage>,
}

impl RuleOptions for MetadataStage {
    const KIND: RuleKind = RuleKind::Criteria;
    const NAME: &'static str = "metadataStage";

    fn apply_defaults(&mut self) {
        fill(&mut self.match_operator, IsMatch::Is);
        fill(&mut self.value, Stage::ClientRequest);
    }
}

/// Match staging or production traffic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDeliveryNetwork {
    pub match_operator: Option<IsMatch>,
    pub network: Option<Network>,
}

impl RuleOptions for ContentDeliveryNetwork {
    const KIND: RuleKind = RuleKind::Criteria;
    const NAME: &'static str = "contentDeliveryNetwork";

    fn apply_defaults(&mut self) {
        fill(&mut self.match_operator, IsMatch::Is);
        fill(&mut self.network, Network::Staging);
    }
}

/// Match the CP code assigned earlier in the rule tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCpCode {
    pub value: Option<CpCodeRef>,
}

impl RuleOptions for MatchCpCode {
    const KIND: RuleKind = RuleKind::Criteria;
    const NAME: &'static str = "matchCpCode";
}
