//! Variables, EdgeWorkers, custom behaviors and CP code assignment.

use papi_types::rule::{OptionMeta, RuleKind};
use serde::{Deserialize, Serialize};

use crate::catalog::{CpCodeRef, RuleOptions, fill};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueSource {
    Expression,
    Extract,
    Generate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transform {
    #[serde(rename = "NONE")]
    None,
    #[serde(rename = "ADD")]
    Add,
    #[serde(rename = "LOWER")]
    Lower,
    #[serde(rename = "UPPER")]
    Upper,
    #[serde(rename = "SUBSTRING")]
    Substring,
    #[serde(rename = "EXTRACT_PARAM")]
    ExtractParam,
    #[serde(rename = "BASE_64_ENCODE")]
    Base64Encode,
    #[serde(rename = "BASE_64_DECODE")]
    Base64Decode,
    #[serde(rename = "URL_ENCODE")]
    UrlEncode,
    #[serde(rename = "URL_DECODE")]
    UrlDecode,
    #[serde(rename = "MD5")]
    Md5,
    #[serde(rename = "SHA_256")]
    Sha256,
    #[serde(rename = "HMAC")]
    Hmac,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtractLocation {
    ClientCertificate,
    ClientRequestHeader,
    Cookie,
    Edgescape,
    PathComponentOffset,
    QueryString,
    DeviceProfile,
    ResponseHeader,
    SetCookie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Generator {
    Hexrand,
    Rand,
}

/// Assign a user variable from an expression, extracted data or a generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetVariable {
    pub variable_name: Option<String>,
    pub value_source: Option<ValueSource>,
    pub variable_value: Option<String>,
    pub transform: Option<Transform>,
    pub extract_location: Option<ExtractLocation>,
    pub header_name: Option<String>,
    pub cookie_name: Option<String>,
    pub query_parameter_name: Option<String>,
    pub generator: Option<Generator>,
    pub number_of_bytes: Option<u8>,
    pub min_random_number: Option<String>,
    pub max_random_number: Option<String>,
}

impl RuleOptions for SetVariable {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "setVariable";
    const META: OptionMeta = OptionMeta {
        allows_vars: &["variableValue"],
        variable: &["variableName"],
    };

    fn apply_defaults(&mut self) {
        fill(&mut self.value_source, ValueSource::Expression);
        if matches!(
            self.value_source,
            Some(ValueSource::Expression | ValueSource::Extract)
        ) {
            fill(&mut self.transform, Transform::None);
        }
        if self.value_source == Some(ValueSource::Extract) {
            fill(&mut self.extract_location, ExtractLocation::ClientRequestHeader);
        }
        if self.value_source == Some(ValueSource::Generate) {
            fill(&mut self.generator, Generator::Hexrand);
        }
        match self.generator {
            Some(Generator::Hexrand) => fill(&mut self.number_of_bytes, 16),
            Some(Generator::Rand) => {
                fill(&mut self.min_random_number, "0".to_string());
                fill(&mut self.max_random_number, "4294967295".to_string());
            }
            None => {}
        }
    }
}

/// Run an EdgeWorker on matching requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeWorker {
    pub enabled: Option<bool>,
    pub edge_worker_id: Option<String>,
    pub m_pulse: Option<bool>,
}

impl RuleOptions for EdgeWorker {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "edgeWorker";

    fn apply_defaults(&mut self) {
        fill(&mut self.enabled, true);
        if self.enabled == Some(true) {
            fill(&mut self.m_pulse, false);
        }
    }
}

/// Insert an account-specific custom behavior by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomBehavior {
    pub behavior_id: Option<String>,
}

impl RuleOptions for CustomBehavior {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "customBehavior";
}

/// Assign the CP code used for reporting and billing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpCode {
    pub value: Option<CpCodeRef>,
}

impl RuleOptions for CpCode {
    const KIND: RuleKind = RuleKind::Behavior;
    const NAME: &'static str = "cpCode";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::options_map;
    use serde_json::json;

    #[test]
    fn test_set_variable_expression_defaults() {
        let mut opts = SetVariable {
            variable_name: Some("PMUSER_ORIGIN".to_string()),
            variable_value: Some("origin-a.example.com".to_string()),
            ..Default::default()
        };
        opts.apply_defaults();
        assert_eq!(opts.value_source, Some(ValueSource::Expression));
        assert_eq!(opts.transform, Some(Transform::None));
        assert_eq!(opts.extract_location, None);
        assert_eq!(opts.generator, None);
    }

    #[test]
    fn test_set_variable_extract_defaults() {
        let mut opts = SetVariable {
            value_source: Some(ValueSource::Extract),
            ..Default::default()
        };
        opts.apply_defaults();
        assert_eq!(opts.extract_location, Some(ExtractLocation::ClientRequestHeader));
        assert_eq!(opts.transform, Some(Transform::None));
    }

    #[test]
    fn test_set_variable_generators() {
        let mut opts = SetVariable {
            value_source: Some(ValueSource::Generate),
            ..Default::default()
        };
        opts.apply_defaults();
        assert_eq!(opts.generator, Some(Generator::Hexrand));
        assert_eq!(opts.number_of_bytes, Some(16));
        assert_eq!(opts.transform, None);

        let mut opts = SetVariable {
            value_source: Some(ValueSource::Generate),
            generator: Some(Generator::Rand),
            ..Default::default()
        };
        opts.apply_defaults();
        assert_eq!(opts.number_of_bytes, None);
        assert_eq!(opts.min_random_number.as_deref(), Some("0"));
        assert_eq!(opts.max_random_number.as_deref(), Some("4294967295"));
    }

    #[test]
    fn test_transform_wire_names() {
        assert_eq!(serde_json::to_string(&Transform::Base64Decode).unwrap(), "\"BASE_64_DECODE\"");
        assert_eq!(serde_json::to_string(&Transform::Sha256).unwrap(), "\"SHA_256\"");
    }

    #[test]
    fn test_edge_worker_and_cp_code() {
        let mut worker = EdgeWorker::default();
        worker.apply_defaults();
        let map = options_map(&worker).unwrap();
        assert_eq!(map["mPulse"], json!(false));

        let cp = CpCode {
            value: Some(CpCodeRef {
                id: Some(98765),
                name: Some("www".to_string()),
                ..Default::default()
            }),
        };
        let map = options_map(&cp).unwrap();
        assert_eq!(map["value"], json!({ "id": 98765, "name": "www" }));
    }
}
