//! Geography, network and device criteria.

use papi_types::rule::RuleKind;
use serde::{Deserialize, Serialize};

use super::{CheckIps, ListMatch, PatternMatch};
use crate::catalog::{RuleOptions, fill};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GeoField {
    Country,
    Continent,
    Region,
}

/// Match the client's geographic location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLocation {
    pub field: Option<GeoField>,
    pub match_operator: Option<ListMatch>,
    pub country_values: Option<Vec<String>>,
    pub continent_values: Option<Vec<String>>,
    pub region_values: Option<Vec<String>>,
    pub check_ips: Option<CheckIps>,
    pub use_only_first_x_forwarded_for_ip: Option<bool>,
}

impl RuleOptions for UserLocation {
    const KIND: RuleKind = RuleKind::Criteria;
    const NAME: &'static str = "userLocation";

    fn apply_defaults(&mut self) {
        fill(&mut self.field, GeoField::Country);
        fill(&mut self.match_operator, ListMatch::IsOneOf);
        fill(&mut self.check_ips, CheckIps::Both);
        if self.check_ips.is_some_and(CheckIps::reads_headers) {
            fill(&mut self.use_only_first_x_forwarded_for_ip, false);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NetworkField {
    Network,
    NetworkType,
    Bandwidth,
}

/// Match the client's network, network type or bandwidth class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserNetwork {
    pub field: Option<NetworkField>,
    pub match_operator: Option<ListMatch>,
    pub network_type_values: Option<Vec<String>>,
    pub network_values: Option<Vec<String>>,
    pub bandwidth_values: Option<Vec<String>>,
    pub check_ips: Option<CheckIps>,
    pub use_only_first_x_forwarded_for_ip: Option<bool>,
}

impl RuleOptions for UserNetwork {
    const KIND: RuleKind = RuleKind::Criteria;
    const NAME: &'static str = "userNetwork";

    fn apply_defaults(&mut self) {
        fill(&mut self.field, NetworkField::Network);
        fill(&mut self.match_operator, ListMatch::IsOneOf);
        fill(&mut self.check_ips, CheckIps::Both);
        if self.check_ips.is_some_and(CheckIps::reads_headers) {
            fill(&mut self.use_only_first_x_forwarded_for_ip, false);
        }
    }
}

/// Match the location of the edge server handling the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerLocation {
    pub location_type: Option<GeoField>,
    pub match_operator: Option<ListMatch>,
    pub countries: Option<Vec<String>>,
    pub continents: Option<Vec<String>>,
    pub regions: Option<Vec<String>>,
}

impl RuleOptions for ServerLocation {
    const KIND: RuleKind = RuleKind::Criteria;
    const NAME: &'static str = "serverLocation";

    fn apply_defaults(&mut self) {
        fill(&mut self.location_type, GeoField::Country);
        fill(&mut self.match_operator, ListMatch::IsOneOf);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Characteristic {
    BrandName,
    ModelName,
    MarketingName,
    IsWirelessDevice,
    IsTablet,
    IsMobile,
    DeviceOs,
    DeviceOsVersion,
    MobileBrowser,
    MobileBrowserVersion,
    ResolutionWidth,
    ResolutionHeight,
    PhysicalScreenHeight,
    PhysicalScreenWidth,
    CookieSupport,
    AjaxSupportJavascript,
    FullFlashSupport,
    AcceptThirdPartyCookie,
    XhtmlSupportLevel,
}

/// Which comparison field a device characteristic is matched with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacteristicType {
    String,
    Version,
    Numeric,
    Boolean,
}

impl Characteristic {
    pub fn value_type(self) -> CharacteristicType {
        use Characteristic::*;
        match self {
            BrandName | ModelName | MarketingName | DeviceOs | MobileBrowser => {
                CharacteristicType::String
            }
            DeviceOsVersion | MobileBrowserVersion => CharacteristicType::Version,
            ResolutionWidth | ResolutionHeight | PhysicalScreenHeight | PhysicalScreenWidth
            | XhtmlSupportLevel => CharacteristicType::Numeric,
            IsWirelessDevice | IsTablet | IsMobile | CookieSupport | AjaxSupportJavascript
            | FullFlashSupport | AcceptThirdPartyCookie => CharacteristicType::Boolean,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NumericMatch {
    Is,
    IsNot,
    IsLessThan,
    IsLessThanOrEqual,
    IsMoreThan,
    IsMoreThanOrEqual,
}

/// Match properties of the requesting device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceCharacteristic {
    pub characteristic: Option<Characteristic>,
    pub string_match_operator: Option<PatternMatch>,
    pub string_value: Option<Vec<String>>,
    pub numeric_match_operator: Option<NumericMatch>,
    pub numeric_value: Option<i64>,
    pub version_match_operator: Option<NumericMatch>,
    pub version_value: Option<String>,
    pub boolean_value: Option<bool>,
    pub match_case_sensitive: Option<bool>,
    pub match_wildcard: Option<bool>,
}

impl RuleOptions for DeviceCharacteristic {
    const KIND: RuleKind = RuleKind::Criteria;
    const NAME: &'static str = "deviceCharacteristic";

    fn apply_defaults(&mut self) {
        fill(&mut self.characteristic, Characteristic::IsWirelessDevice);
        match self.characteristic.map(Characteristic::value_type) {
            Some(CharacteristicType::Boolean) => fill(&mut self.boolean_value, true),
            Some(CharacteristicType::String) => {
                fill(&mut self.string_match_operator, PatternMatch::MatchesOneOf);
                fill(&mut self.match_case_sensitive, false);
                fill(&mut self.match_wildcard, true);
            }
            Some(CharacteristicType::Numeric) => {
                fill(&mut self.numeric_match_operator, NumericMatch::Is);
            }
            Some(CharacteristicType::Version) => {
                fill(&mut self.version_match_operator, NumericMatch::Is);
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_location_defaults() {
        let mut opts = UserLocation {
            country_values: Some(vec!["US".to_string()]),
            ..Default::default()
        };
        opts.apply_defaults();
        assert_eq!(opts.field, Some(GeoField::Country));
        assert_eq!(opts.check_ips, Some(CheckIps::Both));
        assert_eq!(opts.use_only_first_x_forwarded_for_ip, Some(false));
    }

    #[test]
    fn test_user_location_connecting_ip_skips_forwarded_for_flag() {
        let mut opts = UserLocation {
            check_ips: Some(CheckIps::Connecting),
            ..Default::default()
        };
        opts.apply_defaults();
        assert_eq!(opts.use_only_first_x_forwarded_for_ip, None);
    }

    #[test]
    fn test_user_network_defaults() {
        let mut opts = UserNetwork::default();
        opts.apply_defaults();
        assert_eq!(opts.field, Some(NetworkField::Network));
        assert_eq!(opts.match_operator, Some(ListMatch::IsOneOf));
        assert_eq!(
            serde_json::to_string(&NetworkField::NetworkType).unwrap(),
            "\"NETWORK_TYPE\""
        );
    }

    #[test]
    fn test_device_characteristic_defaults_to_boolean_wireless_check() {
        let mut opts = DeviceCharacteristic::default();
        opts.apply_defaults();
        assert_eq!(opts.characteristic, Some(Characteristic::IsWirelessDevice));
        assert_eq!(opts.boolean_value, Some(true));
        assert_eq!(opts.string_match_operator, None);
        assert_eq!(opts.match_wildcard, None);
    }

    #[test]
    fn test_device_characteristic_string_characteristic() {
        let mut opts = DeviceCharacteristic {
            characteristic: Some(Characteristic::BrandName),
            string_value: Some(vec!["Apple".to_string()]),
            ..Default::default()
        };
        opts.apply_defaults();
        assert_eq!(opts.string_match_operator, Some(PatternMatch::MatchesOneOf));
        assert_eq!(opts.match_case_sensitive, Some(false));
        assert_eq!(opts.match_wildcard, Some(true));
        assert_eq!(opts.boolean_value, None);
    }

    #[test]
    fn test_device_characteristic_numeric_and_version() {
        let mut opts = DeviceCharacteristic {
            characteristic: Some(Characteristic::ResolutionWidth),
            ..Default::default()
        };
        opts.apply_defaults();
        assert_eq!(opts.numeric_match_operator, Some(NumericMatch::Is));
        assert_eq!(opts.version_match_operator, None);

        let mut opts = DeviceCharacteristic {
            characteristic: Some(Characteristic::DeviceOsVersion),
            ..Default::default()
        };
        opts.apply_defaults();
        assert_eq!(opts.version_match_operator, Some(NumericMatch::Is));
        assert_eq!(opts.numeric_match_operator, None);
    }
}
