//! Property-based tests for the configuration codec
//!
//! These tests check invariants across the input domain: text round trips,
//! longitude normalization and value conversion never panicking.

use proptest::prelude::*;
use seedvault_core::codec::{check_val, parse_time, ConfigDocument};
use seedvault_core::models::geometry::{GeoCoords, GeometryConstraint, RectangleArea};
use seedvault_core::models::ChannelSelector;
use seedvault_core::SettingsAggregate;

fn code() -> impl Strategy<Value = String> {
    "[A-Z0-9]{1,5}"
}

proptest! {
    /// Numeric settings survive a write/read cycle exactly.
    #[test]
    fn numeric_settings_roundtrip(
        num_processes in 0u32..512,
        gap_tolerance in 0u32..86_400,
        min_magnitude in -2.0f64..10.0,
        max_depth in 0.0f64..7000.0,
        limit in proptest::option::of(0u32..10_000),
    ) {
        let mut settings = SettingsAggregate::from_cfg_str(&SettingsAggregate::default().to_cfg_string())
            .unwrap()
            .settings;
        settings.processing.num_processes = num_processes;
        settings.processing.gap_tolerance = gap_tolerance;
        let event = settings.event.as_mut().unwrap();
        event.min_magnitude = min_magnitude;
        event.max_depth = max_depth;
        event.limit = limit;

        let reparsed = SettingsAggregate::from_cfg_str(&settings.to_cfg_string()).unwrap().settings;
        prop_assert_eq!(reparsed, settings);
    }

    /// Network/station pairs survive the compact form; deeper components do not.
    #[test]
    fn selector_pairs_roundtrip(network in code(), station in code(), channel in code()) {
        let pair = ChannelSelector::station(network.clone(), station.clone());
        prop_assert_eq!(ChannelSelector::from_compact(&pair.compact()).unwrap(), pair.clone());

        let deep = ChannelSelector { channel: Some(channel), ..pair.clone() };
        prop_assert_eq!(ChannelSelector::from_compact(&deep.compact()).unwrap(), pair);
    }

    /// Parsed bounding boxes always have longitudes within one turn of the antimeridian.
    #[test]
    fn bounding_longitudes_are_normalized(min_lng in -359.0f64..-180.5, max_lng in 180.5f64..359.0) {
        let mut settings = SettingsAggregate::default();
        settings.station.geo_constraint =
            vec![GeometryConstraint::rectangle(RectangleArea::new(-10.0, 10.0, min_lng, max_lng))];

        let outcome = SettingsAggregate::from_cfg_str(&settings.to_cfg_string()).unwrap();
        match outcome.settings.station.geo_constraint[0].coords() {
            Some(GeoCoords::Rectangle(area)) => {
                prop_assert!((-180.0..=180.0).contains(&area.min_lng));
                prop_assert!((-180.0..=180.0).contains(&area.max_lng));
            }
            other => prop_assert!(false, "expected a rectangle, got {:?}", other),
        }
        prop_assert!(outcome.diagnostics.has_warning_containing("Adjusted to"));
    }

    /// Value conversion and document parsing never panic on arbitrary text.
    #[test]
    fn conversions_never_panic(value in "\\PC*") {
        let _ = check_val::<u32>(Some(&value), 1);
        let _ = check_val::<f64>(Some(&value), 1.0);
        let _ = parse_time(&value);
        let _ = ConfigDocument::parse(&value);
    }
}
