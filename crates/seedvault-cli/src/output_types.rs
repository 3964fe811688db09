use seedvault_core::models::FieldChange;
use seedvault_core::{ConfigSource, Diagnostic};
use serde::Serialize;

/// Output for check command
#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub config: String,
    pub valid: bool,
    pub warnings: Vec<Diagnostic>,
    pub errors: Vec<Diagnostic>,
}

/// Output for inspect command
#[derive(Debug, Serialize)]
pub struct InspectOutput {
    pub config: String,
    pub values: Vec<ResolvedValue>,
}

#[derive(Debug, Serialize)]
pub struct ResolvedValue {
    pub key: String,
    pub value: String,
    pub source: ConfigSource,
}

/// Output for export command
#[derive(Debug, Serialize)]
pub struct ExportOutput {
    pub config: String,
    pub written_to: Option<String>,
    pub text: Option<String>,
}

/// Output for diff command
#[derive(Debug, Serialize)]
pub struct DiffOutput {
    pub before: String,
    pub after: String,
    pub changes: Vec<FieldChange>,
}

/// Output for snapshot save command
#[derive(Debug, Serialize)]
pub struct SnapshotSaveOutput {
    pub config: String,
    pub snapshot: String,
    pub version: u16,
    pub bytes: u64,
}

/// Output for snapshot show command
#[derive(Debug, Serialize)]
pub struct SnapshotShowOutput {
    pub snapshot: String,
    pub version: u16,
    pub compressed_len: usize,
    pub sds_path: String,
    pub db_path: String,
    pub download_type: String,
    pub client: String,
    pub station_selectors: usize,
    pub has_event_search: bool,
    pub predictions: usize,
}
