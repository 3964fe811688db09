use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use super::enums::InventoryLevel;
use super::geometry::GeometryConstraint;
use super::groups::{DateRangeConfig, DEFAULT_CLIENT};
use super::selector::ChannelSelector;
use crate::diagnostics::Diagnostics;

/// Channel filter made of `?X?` wildcard tokens, comma separated
fn channel_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\?\w\?,?)+$").expect("valid channel regex"))
}

/// Whether `value` is a comma-joined list of `?X?` channel tokens
pub fn is_channel_pattern(value: &str) -> bool {
    channel_pattern().is_match(value)
}

/// Station search: which stations to list and how much inventory detail to fetch
///
/// Network/station/location/channel filters are comma-joined wildcard
/// patterns as the FDSN station service accepts them (e.g. `"CH,HH,BH,EH"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationSearchConfig {
    pub client: Option<String>,
    pub force_stations: Vec<ChannelSelector>,
    pub exclude_stations: Vec<ChannelSelector>,
    pub date_config: DateRangeConfig,
    pub local_inventory: Option<String>,
    pub network: Option<String>,
    pub station: Option<String>,
    pub location: Option<String>,
    pub channel: Option<String>,
    /// Inventory resolved by the retrieval service; never persisted
    #[serde(skip)]
    pub selected_invs: Option<serde_json::Value>,
    pub geo_constraint: Vec<GeometryConstraint>,
    pub include_restricted: bool,
    pub level: InventoryLevel,
}

impl Default for StationSearchConfig {
    fn default() -> Self {
        Self {
            client: Some(DEFAULT_CLIENT.to_string()),
            force_stations: Vec::new(),
            exclude_stations: Vec::new(),
            date_config: DateRangeConfig::default(),
            local_inventory: None,
            network: None,
            station: None,
            location: None,
            channel: None,
            selected_invs: None,
            geo_constraint: Vec::new(),
            include_restricted: false,
            level: InventoryLevel::Channel,
        }
    }
}

impl StationSearchConfig {
    pub fn reset_to_defaults(&mut self) {
        *self = Self::default();
    }

    /// First geometry constraint, the only one the text format can carry
    pub fn primary_constraint(&self) -> Option<&GeometryConstraint> {
        self.geo_constraint.first()
    }

    /// Cross-field checks deferred from construction
    pub fn validate(&self) -> Diagnostics {
        let mut result = Diagnostics::new();

        if let Some(channel) = self.channel.as_deref() {
            if !channel.is_empty() && !is_channel_pattern(channel) {
                result.error(
                    "STATION",
                    Some("channel"),
                    format!("'{}' is not a comma-separated list of ?X? channel patterns", channel),
                );
            }
        }
        for constraint in &self.geo_constraint {
            result.merge(constraint.validate("STATION"));
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::geometry::RectangleArea;

    #[test]
    fn test_channel_pattern() {
        assert!(is_channel_pattern("?H?,?N?"));
        assert!(is_channel_pattern("?H?"));
        assert!(is_channel_pattern("?B?,?H?,?L?,"));
        assert!(!is_channel_pattern("BHZ"));
        assert!(!is_channel_pattern("?HH?"));
        assert!(!is_channel_pattern(""));
    }

    #[test]
    fn test_defaults_and_reset() {
        let mut config = StationSearchConfig {
            network: Some("IU".into()),
            include_restricted: true,
            selected_invs: Some(serde_json::json!({"networks": []})),
            ..Default::default()
        };
        config.reset_to_defaults();

        assert_eq!(config.client.as_deref(), Some("IRIS"));
        assert!(config.network.is_none());
        assert!(!config.include_restricted);
        assert!(config.selected_invs.is_none());
        assert_eq!(config.level, InventoryLevel::Channel);
    }

    #[test]
    fn test_resolved_inventory_is_not_serialized() {
        let config = StationSearchConfig {
            selected_invs: Some(serde_json::json!({"networks": ["IU"]})),
            ..Default::default()
        };
        let json = serde_json::to_value(&config).unwrap();
        assert!(json.get("selected_invs").is_none());
    }

    #[test]
    fn test_validate_flags_channel_and_geometry() {
        let config = StationSearchConfig {
            channel: Some("BHZ".into()),
            geo_constraint: vec![GeometryConstraint::rectangle(RectangleArea::new(
                50.0, 10.0, 0.0, 10.0,
            ))],
            ..Default::default()
        };
        let result = config.validate();
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn test_primary_constraint_is_first() {
        let mut config = StationSearchConfig::default();
        assert!(config.primary_constraint().is_none());

        let first = GeometryConstraint::rectangle(RectangleArea::new(-10.0, 10.0, 0.0, 10.0));
        config.geo_constraint = vec![first.clone(), GeometryConstraint::none()];
        assert_eq!(config.primary_constraint(), Some(&first));
    }
}
