//! Integration tests for binary settings snapshots

use chrono::{TimeZone, Utc};
use seedvault_core::models::geometry::{GeometryConstraint, RectangleArea};
use seedvault_core::models::{AuthConfig, ChannelSelector, WorkflowType};
use seedvault_core::snapshot::{inspect, SNAPSHOT_VERSION};
use seedvault_core::{SeedVaultError, SettingsAggregate};
use std::fs;
use tempfile::TempDir;

fn populated() -> SettingsAggregate {
    let mut settings = SettingsAggregate::default();
    settings.selected_workflow = WorkflowType::Continuous;
    settings.set_download_type_from_workflow();
    settings.auths.push(AuthConfig::new("XX.STA", "alice", "s3cret"));
    settings.station.force_stations = vec![ChannelSelector {
        location: Some("00".into()),
        channel: Some("BHZ".into()),
        ..ChannelSelector::station("IU", "ANMO")
    }];
    settings.station.geo_constraint = vec![
        GeometryConstraint::rectangle(RectangleArea::new(-10.0, 10.0, 100.0, 120.0)),
        GeometryConstraint::none(),
    ];
    settings.load_url_mapping(
        [("IRIS".to_string(), "http://service.iris.edu".to_string())],
        [("LOCAL".to_string(), "http://localhost:8080".to_string())],
    );
    settings.add_prediction(
        "ev1",
        "IU.ANMO",
        Utc.with_ymd_and_hms(2024, 8, 21, 1, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 8, 21, 1, 6, 30).unwrap(),
    );
    settings.event = None;
    settings
}

#[test]
fn test_snapshot_keeps_what_text_cannot() {
    let settings = populated();
    let bytes = settings.to_snapshot_bytes().unwrap();
    let restored = SettingsAggregate::from_snapshot_bytes(&bytes).unwrap();

    // Full selectors, every constraint, predictions and the workflow survive
    assert_eq!(restored, settings);
    assert_eq!(restored.station.force_stations[0].compact(), "IU.ANMO.00.BHZ");
    assert_eq!(restored.station.geo_constraint.len(), 2);
    assert!(restored.get_prediction("ev1", "IU.ANMO").is_some());
}

#[test]
fn test_snapshot_file_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.svsn");

    let settings = populated();
    settings.save_snapshot(&path).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(inspect(&bytes).unwrap().version, SNAPSHOT_VERSION);
    assert_eq!(SettingsAggregate::load_snapshot(&path).unwrap(), settings);
}

#[test]
fn test_transient_results_are_not_persisted() {
    let mut settings = SettingsAggregate::default();
    settings.station.selected_invs = Some(serde_json::json!({"networks": ["IU"]}));

    let bytes = settings.to_snapshot_bytes().unwrap();
    let restored = SettingsAggregate::from_snapshot_bytes(&bytes).unwrap();
    assert!(restored.station.selected_invs.is_none());
}

#[test]
fn test_future_version_is_rejected() {
    let mut bytes = SettingsAggregate::default().to_snapshot_bytes().unwrap();
    bytes[4..6].copy_from_slice(&(SNAPSHOT_VERSION + 1).to_le_bytes());

    let err = SettingsAggregate::from_snapshot_bytes(&bytes).unwrap_err();
    match err {
        SeedVaultError::UnsupportedSnapshotVersion { found, supported } => {
            assert_eq!(found, SNAPSHOT_VERSION + 1);
            assert_eq!(supported, SNAPSHOT_VERSION);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_text_file_is_not_a_snapshot() {
    let bytes = SettingsAggregate::default().to_cfg_string().into_bytes();
    assert!(matches!(
        SettingsAggregate::from_snapshot_bytes(&bytes),
        Err(SeedVaultError::Snapshot { .. })
    ));
}
