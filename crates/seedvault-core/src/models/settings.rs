//! Top-level settings aggregate
//!
//! [`SettingsAggregate`] owns every setting group and is the single value
//! handed to retrieval workflows. It is not synchronized: callers that read it
//! from a background task while a front-end edits it should clone it first and
//! compare with [`SettingsAggregate::diff`] afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use super::enums::{DownloadType, WorkflowType};
use super::event::EventSearchConfig;
use super::groups::{AuthConfig, ProcessingConfig, WaveformConfig};
use super::station::StationSearchConfig;
use crate::diagnostics::Diagnostics;

/// Archive root used when none is configured
pub const DEFAULT_SDS_PATH: &str = "data/SDS";

/// Database file placed inside the archive root by default
pub fn default_db_path(sds_path: &Path) -> PathBuf {
    sds_path.join("database.sqlite")
}

/// Key of a prediction: `"{event_id}|{station_id}"`
pub fn prediction_key(event_id: &str, station_id: &str) -> String {
    format!("{}|{}", event_id, station_id)
}

/// Predicted phase arrivals of one event at one station
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub event_id: String,
    pub station_id: String,
    pub p_arrival: DateTime<Utc>,
    pub s_arrival: DateTime<Utc>,
}

/// All settings of a retrieval session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsAggregate {
    /// Root of the SDS waveform archive
    pub sds_path: PathBuf,
    pub db_path: PathBuf,
    pub download_type: DownloadType,
    pub selected_workflow: WorkflowType,
    pub processing: ProcessingConfig,
    /// Client name to service URL, built-in entries merged with extras
    pub client_url_mapping: BTreeMap<String, String>,
    pub extra_clients: BTreeMap<String, String>,
    pub auths: Vec<AuthConfig>,
    pub waveform: WaveformConfig,
    pub station: StationSearchConfig,
    /// `None` when the configuration had no usable `[EVENT]` section
    pub event: Option<EventSearchConfig>,
    pub predictions: BTreeMap<String, PredictionRecord>,
}

impl Default for SettingsAggregate {
    fn default() -> Self {
        let sds_path = PathBuf::from(DEFAULT_SDS_PATH);
        Self {
            db_path: default_db_path(&sds_path),
            sds_path,
            download_type: DownloadType::Event,
            selected_workflow: WorkflowType::EventBased,
            processing: ProcessingConfig::default(),
            client_url_mapping: BTreeMap::new(),
            extra_clients: BTreeMap::new(),
            auths: Vec::new(),
            waveform: WaveformConfig::default(),
            station: StationSearchConfig::default(),
            event: Some(EventSearchConfig::default()),
            predictions: BTreeMap::new(),
        }
    }
}

impl SettingsAggregate {
    /// Align the download type with the selected workflow
    pub fn set_download_type_from_workflow(&mut self) {
        self.download_type = match self.selected_workflow {
            WorkflowType::EventBased | WorkflowType::StationBased => DownloadType::Event,
            WorkflowType::Continuous => DownloadType::Continuous,
        };
    }

    /// Merge a client registry with user extras; extras win on collision
    pub fn load_url_mapping<I, J>(&mut self, original: I, extra: J)
    where
        I: IntoIterator<Item = (String, String)>,
        J: IntoIterator<Item = (String, String)>,
    {
        self.extra_clients = extra.into_iter().collect();
        self.client_url_mapping = original.into_iter().collect();
        self.client_url_mapping
            .extend(self.extra_clients.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    /// Insert or overwrite the prediction for an event/station pair
    pub fn add_prediction(
        &mut self,
        event_id: &str,
        station_id: &str,
        p_arrival: DateTime<Utc>,
        s_arrival: DateTime<Utc>,
    ) {
        self.predictions.insert(
            prediction_key(event_id, station_id),
            PredictionRecord {
                event_id: event_id.to_string(),
                station_id: station_id.to_string(),
                p_arrival,
                s_arrival,
            },
        );
    }

    pub fn get_prediction(&self, event_id: &str, station_id: &str) -> Option<&PredictionRecord> {
        self.predictions.get(&prediction_key(event_id, station_id))
    }

    /// Run every group's deferred cross-field checks
    pub fn validate(&self) -> Diagnostics {
        let mut result = self.station.validate();
        if let Some(event) = &self.event {
            result.merge(event.validate());
        }
        result
    }

    /// Value-level comparison against an earlier copy.
    ///
    /// Transient search results are not part of the comparison.
    pub fn diff(&self, earlier: &SettingsAggregate) -> SettingsDiff {
        let before = serde_json::to_value(earlier).unwrap_or(Value::Null);
        let after = serde_json::to_value(self).unwrap_or(Value::Null);

        let mut changes = Vec::new();
        collect_changes("", &before, &after, &mut changes);
        SettingsDiff { changes }
    }
}

/// One field that differs between two aggregates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldChange {
    /// Dotted path, e.g. `station.date_config.start_time`
    pub path: String,
    pub before: Value,
    pub after: Value,
}

/// Result of [`SettingsAggregate::diff`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SettingsDiff {
    pub changes: Vec<FieldChange>,
}

impl SettingsDiff {
    pub fn has_changed(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Whether `path` or anything below it changed
    pub fn touches(&self, path: &str) -> bool {
        self.changes.iter().any(|c| {
            c.path == path || c.path.strip_prefix(path).is_some_and(|rest| rest.starts_with('.'))
        })
    }
}

fn collect_changes(path: &str, before: &Value, after: &Value, out: &mut Vec<FieldChange>) {
    match (before, after) {
        (Value::Object(a), Value::Object(b)) => {
            let keys: BTreeSet<&String> = a.keys().chain(b.keys()).collect();
            for key in keys {
                let child = if path.is_empty() { key.clone() } else { format!("{}.{}", path, key) };
                collect_changes(
                    &child,
                    a.get(key).unwrap_or(&Value::Null),
                    b.get(key).unwrap_or(&Value::Null),
                    out,
                );
            }
        }
        _ if before != after => out.push(FieldChange {
            path: path.to_string(),
            before: before.clone(),
            after: after.clone(),
        }),
        _ => {}
    }
}
