use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::enums::VelocityModel;
use super::geometry::GeometryConstraint;
use super::groups::{DateRangeConfig, DEFAULT_CLIENT};
use crate::diagnostics::Diagnostics;

/// Event catalog search and the phase window cut around each event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSearchConfig {
    pub client: Option<String>,
    pub date_config: DateRangeConfig,
    pub model: VelocityModel,
    /// Depth bounds, km
    pub min_depth: f64,
    pub max_depth: f64,
    pub min_magnitude: f64,
    pub max_magnitude: f64,
    /// Event-station distance bounds, degrees
    pub min_radius: f64,
    pub max_radius: f64,
    /// Seconds kept before the predicted P arrival
    pub before_p_sec: u32,
    /// Seconds kept after the predicted P arrival
    pub after_p_sec: u32,
    pub include_all_origins: bool,
    pub include_all_magnitudes: bool,
    pub include_arrivals: bool,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub local_catalog: Option<String>,
    pub contributor: Option<String>,
    pub updated_after: Option<NaiveDateTime>,
    /// Catalog resolved by the retrieval service; never persisted
    #[serde(skip)]
    pub selected_catalogs: Option<serde_json::Value>,
    pub geo_constraint: Vec<GeometryConstraint>,
}

impl Default for EventSearchConfig {
    fn default() -> Self {
        Self {
            client: Some(DEFAULT_CLIENT.to_string()),
            date_config: DateRangeConfig::default(),
            model: VelocityModel::Iasp91,
            min_depth: 0.0,
            max_depth: 6800.0,
            min_magnitude: 5.0,
            max_magnitude: 10.0,
            min_radius: 30.0,
            max_radius: 90.0,
            before_p_sec: 10,
            after_p_sec: 130,
            include_all_origins: false,
            include_all_magnitudes: false,
            include_arrivals: false,
            limit: None,
            offset: None,
            local_catalog: None,
            contributor: None,
            updated_after: None,
            selected_catalogs: None,
            geo_constraint: Vec::new(),
        }
    }
}

impl EventSearchConfig {
    pub fn reset_to_defaults(&mut self) {
        *self = Self::default();
    }

    /// First geometry constraint, the only one the text format can carry
    pub fn primary_constraint(&self) -> Option<&GeometryConstraint> {
        self.geo_constraint.first()
    }

    /// Distance bounds must be non-negative and strictly ordered
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn check_radius_bounds(&self) -> Diagnostics {
        let mut result = Diagnostics::new();

        // Negated comparisons so that NaN fails every check
        if !(self.min_radius >= 0.0 && self.max_radius >= 0.0) {
            result.error(
                "EVENT",
                Some("minradius"),
                format!(
                    "'min_radius' ({}) and 'max_radius' ({}) must be positive values",
                    self.min_radius, self.max_radius
                ),
            );
        }
        if !(self.min_radius < self.max_radius) {
            result.error(
                "EVENT",
                Some("minradius"),
                format!(
                    "'min_radius' ({}) must be less than 'max_radius' ({})",
                    self.min_radius, self.max_radius
                ),
            );
        }

        result
    }

    /// Cross-field checks deferred from construction
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self) -> Diagnostics {
        let mut result = self.check_radius_bounds();

        if !(self.min_depth <= self.max_depth) {
            result.error(
                "EVENT",
                Some("min_depth"),
                format!(
                    "'min_depth' ({}) must not exceed 'max_depth' ({})",
                    self.min_depth, self.max_depth
                ),
            );
        }
        if !(self.min_magnitude <= self.max_magnitude) {
            result.error(
                "EVENT",
                Some("minmagnitude"),
                format!(
                    "'min_magnitude' ({}) must not exceed 'max_magnitude' ({})",
                    self.min_magnitude, self.max_magnitude
                ),
            );
        }
        for constraint in &self.geo_constraint {
            result.merge(constraint.validate("EVENT"));
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EventSearchConfig::default();
        assert_eq!(config.model, VelocityModel::Iasp91);
        assert_eq!(config.max_depth, 6800.0);
        assert_eq!(config.before_p_sec, 10);
        assert_eq!(config.after_p_sec, 130);
        assert!(config.validate().is_valid());
    }

    #[test]
    fn test_inconsistent_state_is_constructible() {
        let config = EventSearchConfig {
            min_radius: 90.0,
            max_radius: 30.0,
            ..Default::default()
        };
        assert_eq!(config.min_radius, 90.0);

        let result = config.check_radius_bounds();
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].message.contains("90"));
        assert!(result.errors[0].message.contains("30"));
    }

    #[test]
    fn test_negative_radius_reports_both_violations() {
        let config = EventSearchConfig {
            min_radius: -5.0,
            max_radius: -10.0,
            ..Default::default()
        };
        let result = config.check_radius_bounds();
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn test_nan_radius_fails_bounds() {
        let config = EventSearchConfig {
            min_radius: f64::NAN,
            ..Default::default()
        };
        let result = config.check_radius_bounds();
        assert_eq!(result.errors.len(), 2);
        assert!(!config.validate().is_valid());
    }

    #[test]
    fn test_validate_depth_and_magnitude_order() {
        let config = EventSearchConfig {
            min_depth: 700.0,
            max_depth: 10.0,
            min_magnitude: 8.0,
            max_magnitude: 6.0,
            ..Default::default()
        };
        let result = config.validate();
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn test_reset_clears_resolved_catalog() {
        let mut config = EventSearchConfig {
            selected_catalogs: Some(serde_json::json!([{"id": "ev1"}])),
            min_magnitude: 7.0,
            ..Default::default()
        };
        config.reset_to_defaults();
        assert!(config.selected_catalogs.is_none());
        assert_eq!(config.min_magnitude, 5.0);
    }
}
