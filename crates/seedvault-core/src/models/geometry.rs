//! Area descriptors used as spatial filters on event and station searches.
//!
//! A [`GeometryConstraint`] carries at most one payload. Its kind is computed
//! from the payload when the constraint is built (including on
//! deserialization) and is never stored independently of it.

use crate::diagnostics::Diagnostics;
use crate::models::enums::GeoConstraintType;
use serde::{Deserialize, Serialize};

/// Latitude/longitude box, degrees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectangleArea {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
    /// Display colour used by map front-ends; not part of the text format
    #[serde(default)]
    pub color: Option<String>,
}

impl Default for RectangleArea {
    fn default() -> Self {
        Self::new(-90.0, 90.0, -180.0, 180.0)
    }
}

impl RectangleArea {
    pub fn new(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> Self {
        Self { min_lat, max_lat, min_lng, max_lng, color: None }
    }

    /// Check latitude range and bound ordering
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self, section: &str) -> Diagnostics {
        let mut result = Diagnostics::new();

        for (key, lat) in [("minlatitude", self.min_lat), ("maxlatitude", self.max_lat)] {
            if !(-90.0..=90.0).contains(&lat) {
                result.error(section, Some(key), format!("Latitude {} is outside [-90, 90]", lat));
            }
        }
        if !(self.min_lat <= self.max_lat) {
            result.error(
                section,
                Some("minlatitude"),
                format!(
                    "'minlatitude' ({}) must not exceed 'maxlatitude' ({})",
                    self.min_lat, self.max_lat
                ),
            );
        }

        result
    }
}

/// Annulus (or disc when `min_radius` is zero) around a point.
/// Radii are epicentral distances in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleArea {
    pub lat: f64,
    pub lng: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    #[serde(default)]
    pub color: Option<String>,
}

impl Default for CircleArea {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 180.0)
    }
}

impl CircleArea {
    pub fn new(lat: f64, lng: f64, min_radius: f64, max_radius: f64) -> Self {
        Self { lat, lng, min_radius, max_radius, color: None }
    }

    /// Check centre latitude and radius ordering
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self, section: &str) -> Diagnostics {
        let mut result = Diagnostics::new();

        if !(-90.0..=90.0).contains(&self.lat) {
            result.error(
                section,
                Some("latitude"),
                format!("Latitude {} is outside [-90, 90]", self.lat),
            );
        }
        if !(self.min_radius >= 0.0 && self.max_radius >= 0.0) {
            result.error(
                section,
                Some("minsearchradius"),
                format!(
                    "Search radii must be non-negative (got {} and {})",
                    self.min_radius, self.max_radius
                ),
            );
        }
        if !(self.min_radius < self.max_radius) {
            result.error(
                section,
                Some("minsearchradius"),
                format!(
                    "'minsearchradius' ({}) must be less than 'maxsearchradius' ({})",
                    self.min_radius, self.max_radius
                ),
            );
        }

        result
    }
}

/// Payload of a geometry constraint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GeoCoords {
    Rectangle(RectangleArea),
    Circle(CircleArea),
}

impl GeoCoords {
    pub fn geo_type(&self) -> GeoConstraintType {
        match self {
            GeoCoords::Rectangle(_) => GeoConstraintType::Bounding,
            GeoCoords::Circle(_) => GeoConstraintType::Circle,
        }
    }
}

impl From<RectangleArea> for GeoCoords {
    fn from(area: RectangleArea) -> Self {
        GeoCoords::Rectangle(area)
    }
}

impl From<CircleArea> for GeoCoords {
    fn from(area: CircleArea) -> Self {
        GeoCoords::Circle(area)
    }
}

/// Spatial filter whose kind always matches its payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(from = "GeometryConstraintRepr")]
pub struct GeometryConstraint {
    geo_type: GeoConstraintType,
    coords: Option<GeoCoords>,
}

impl GeometryConstraint {
    /// Build a constraint; the kind is derived from `coords`
    pub fn new(coords: Option<GeoCoords>) -> Self {
        let geo_type = coords.as_ref().map_or(GeoConstraintType::None, GeoCoords::geo_type);
        Self { geo_type, coords }
    }

    pub fn rectangle(area: RectangleArea) -> Self {
        Self::new(Some(area.into()))
    }

    pub fn circle(area: CircleArea) -> Self {
        Self::new(Some(area.into()))
    }

    pub fn none() -> Self {
        Self::new(None)
    }

    pub fn geo_type(&self) -> GeoConstraintType {
        self.geo_type
    }

    pub fn coords(&self) -> Option<&GeoCoords> {
        self.coords.as_ref()
    }

    /// Replace the payload, re-deriving the kind
    pub fn set_coords(&mut self, coords: Option<GeoCoords>) {
        *self = Self::new(coords);
    }

    pub fn validate(&self, section: &str) -> Diagnostics {
        match &self.coords {
            Some(GeoCoords::Rectangle(area)) => area.validate(section),
            Some(GeoCoords::Circle(area)) => area.validate(section),
            None => Diagnostics::new(),
        }
    }
}

/// Wire form: only the payload is trusted, the kind is recomputed
#[derive(Deserialize)]
struct GeometryConstraintRepr {
    #[serde(default)]
    coords: Option<GeoCoords>,
}

impl From<GeometryConstraintRepr> for GeometryConstraint {
    fn from(repr: GeometryConstraintRepr) -> Self {
        GeometryConstraint::new(repr.coords)
    }
}

/// Bring a longitude east of the antimeridian back by one turn
pub fn unwrap_east(lng: f64) -> Option<f64> {
    (lng > 180.0).then(|| lng - 360.0)
}

/// Bring a longitude west of the antimeridian forward by one turn
pub fn unwrap_west(lng: f64) -> Option<f64> {
    (lng < -180.0).then(|| lng + 360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_follows_payload() {
        let rect = GeometryConstraint::rectangle(RectangleArea::new(-10.0, 10.0, 100.0, 120.0));
        assert_eq!(rect.geo_type(), GeoConstraintType::Bounding);

        let circle = GeometryConstraint::circle(CircleArea::new(35.0, 139.0, 0.0, 10.0));
        assert_eq!(circle.geo_type(), GeoConstraintType::Circle);

        assert_eq!(GeometryConstraint::none().geo_type(), GeoConstraintType::None);
        assert_eq!(GeometryConstraint::default().geo_type(), GeoConstraintType::None);
    }

    #[test]
    fn test_set_coords_rederives_kind() {
        let mut constraint = GeometryConstraint::none();
        constraint.set_coords(Some(CircleArea::default().into()));
        assert_eq!(constraint.geo_type(), GeoConstraintType::Circle);

        constraint.set_coords(None);
        assert_eq!(constraint.geo_type(), GeoConstraintType::None);
        assert!(constraint.coords().is_none());
    }

    #[test]
    fn test_deserialization_ignores_stale_kind() {
        let json = r#"{
            "geo_type": "neither",
            "coords": {"kind": "rectangle", "min_lat": 0.0, "max_lat": 1.0, "min_lng": 2.0, "max_lng": 3.0}
        }"#;
        let constraint: GeometryConstraint = serde_json::from_str(json).unwrap();
        assert_eq!(constraint.geo_type(), GeoConstraintType::Bounding);
    }

    #[test]
    fn test_serialization_roundtrip_keeps_payload() {
        let mut area = CircleArea::new(-8.5, 115.0, 5.0, 40.0);
        area.color = Some("#ff0000".to_string());
        let constraint = GeometryConstraint::circle(area);

        let json = serde_json::to_string(&constraint).unwrap();
        assert!(json.contains("\"geo_type\":\"circle\""));

        let parsed: GeometryConstraint = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, constraint);
    }

    #[test]
    fn test_rectangle_validation() {
        assert!(RectangleArea::default().validate("STATION").is_valid());

        let inverted = RectangleArea::new(20.0, 10.0, 0.0, 1.0);
        let result = inverted.validate("STATION");
        assert_eq!(result.errors.len(), 1);

        let out_of_range = RectangleArea::new(-95.0, 10.0, 0.0, 1.0);
        assert!(!out_of_range.validate("STATION").is_valid());
    }

    #[test]
    fn test_circle_validation() {
        assert!(CircleArea::default().validate("EVENT").is_valid());

        let result = CircleArea::new(0.0, 0.0, 50.0, 10.0).validate("EVENT");
        assert!(result.has_error_containing("must be less than"));

        let result = CircleArea::new(0.0, 0.0, -1.0, 10.0).validate("EVENT");
        assert!(result.has_error_containing("non-negative"));

        let result = CircleArea::new(0.0, 0.0, f64::NAN, 10.0).validate("EVENT");
        assert!(result.has_error_containing("non-negative"));
        assert!(result.has_error_containing("must be less than"));
    }

    #[test]
    fn test_longitude_unwrapping() {
        assert_eq!(unwrap_east(200.0), Some(-160.0));
        assert_eq!(unwrap_east(180.0), None);
        assert_eq!(unwrap_west(-200.0), Some(160.0));
        assert_eq!(unwrap_west(-180.0), None);
    }
}
