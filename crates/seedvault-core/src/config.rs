//! Value provenance and layered overrides on top of a parsed configuration file

use crate::codec::ParseOutcome;
use crate::models::enums::{ConfigEnum, DownloadType};
use crate::models::settings::default_db_path;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;

pub const ENV_SDS_PATH: &str = "SEEDVAULT_SDS_PATH";
pub const ENV_DB_PATH: &str = "SEEDVAULT_DB_PATH";
pub const ENV_NUM_PROCESSES: &str = "SEEDVAULT_NUM_PROCESSES";
pub const ENV_DOWNLOAD_TYPE: &str = "SEEDVAULT_DOWNLOAD_TYPE";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Read from the configuration file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// Source of every resolved field, keyed `SECTION.key`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSources {
    sources: BTreeMap<String, ConfigSource>,
}

impl FieldSources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record where a field came from, replacing any earlier record
    pub fn record(&mut self, section: &str, key: &str, source: ConfigSource) {
        self.sources.insert(field_path(section, key), source);
    }

    /// Raise a field's source; returns false when `source` does not outrank it
    pub fn update(&mut self, section: &str, key: &str, source: ConfigSource) -> bool {
        let entry = self.sources.entry(field_path(section, key)).or_insert(ConfigSource::Default);
        if source.precedence() > entry.precedence() {
            *entry = source;
            true
        } else {
            false
        }
    }

    pub fn get(&self, section: &str, key: &str) -> Option<ConfigSource> {
        self.sources.get(&field_path(section, key)).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ConfigSource)> {
        self.sources.iter().map(|(path, source)| (path.as_str(), *source))
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

fn field_path(section: &str, key: &str) -> String {
    format!("{}.{}", section, key)
}

/// Values that may be supplied outside the configuration file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsOverrides {
    pub sds_path: Option<PathBuf>,
    pub db_path: Option<PathBuf>,
    pub num_processes: Option<u32>,
    pub download_type: Option<DownloadType>,
}

impl SettingsOverrides {
    /// Load overrides from environment variables
    pub fn from_env() -> Self {
        let mut overrides = Self::default();

        // SEEDVAULT_SDS_PATH
        if let Ok(path) = env::var(ENV_SDS_PATH) {
            if path.trim().is_empty() {
                tracing::warn!("Ignoring empty {} value", ENV_SDS_PATH);
            } else {
                overrides.sds_path = Some(PathBuf::from(path.trim()));
            }
        }

        // SEEDVAULT_DB_PATH
        if let Ok(path) = env::var(ENV_DB_PATH) {
            if path.trim().is_empty() {
                tracing::warn!("Ignoring empty {} value", ENV_DB_PATH);
            } else {
                overrides.db_path = Some(PathBuf::from(path.trim()));
            }
        }

        // SEEDVAULT_NUM_PROCESSES
        if let Ok(value) = env::var(ENV_NUM_PROCESSES) {
            match value.trim().parse::<u32>() {
                Ok(n) => overrides.num_processes = Some(n),
                Err(_) => tracing::warn!(
                    "Invalid {} value '{}': expected a non-negative integer",
                    ENV_NUM_PROCESSES,
                    value
                ),
            }
        }

        // SEEDVAULT_DOWNLOAD_TYPE
        if let Ok(value) = env::var(ENV_DOWNLOAD_TYPE) {
            match parse_download_type(&value) {
                Some(download_type) => overrides.download_type = Some(download_type),
                None => tracing::warn!(
                    "Invalid {} value '{}': expected one of {}",
                    ENV_DOWNLOAD_TYPE,
                    value,
                    DownloadType::allowed_values().join(", ")
                ),
            }
        }

        overrides
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply every set value whose source outranks the current one
    pub fn apply(&self, outcome: &mut ParseOutcome, source: ConfigSource) {
        let settings = &mut outcome.settings;
        let sources = &mut outcome.sources;

        if let Some(sds_path) = &self.sds_path {
            if sources.update("SDS", "sds_path", source) {
                settings.sds_path = sds_path.clone();
                // A defaulted database follows the archive root
                if sources.get("DATABASE", "db_path") == Some(ConfigSource::Default) {
                    settings.db_path = default_db_path(&settings.sds_path);
                }
            }
        }

        if let Some(db_path) = &self.db_path {
            if sources.update("DATABASE", "db_path", source) {
                settings.db_path = db_path.clone();
            }
        }

        if let Some(num_processes) = self.num_processes {
            if sources.update("PROCESSING", "num_processes", source) {
                settings.processing.num_processes = num_processes;
            }
        }

        if let Some(download_type) = self.download_type {
            if sources.update("PROCESSING", "download_type", source) {
                settings.download_type = download_type;
            }
        }
    }
}

/// Apply `SEEDVAULT_*` environment variables on top of a parsed file
pub fn apply_env_overrides(outcome: &mut ParseOutcome) {
    let overrides = SettingsOverrides::from_env();
    if !overrides.is_empty() {
        tracing::debug!(?overrides, "Applying environment overrides");
    }
    overrides.apply(outcome, ConfigSource::Environment);
}

/// Case-insensitive download type, as accepted from the environment and CLI
pub fn parse_download_type(value: &str) -> Option<DownloadType> {
    DownloadType::from_value(&value.trim().to_lowercase()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SettingsAggregate;

    fn outcome_from_file() -> ParseOutcome {
        SettingsAggregate::from_cfg_str(
            "[SDS]\nsds_path = /archive\n[PROCESSING]\nnum_processes = 6\ndownload_type = event\n",
        )
        .unwrap()
    }

    #[test]
    fn test_config_precedence() {
        let mut sources = FieldSources::new();

        // File should override default
        assert!(sources.update("SDS", "sds_path", ConfigSource::File));
        assert_eq!(sources.get("SDS", "sds_path"), Some(ConfigSource::File));

        // Environment should override file
        assert!(sources.update("SDS", "sds_path", ConfigSource::Environment));

        // CLI should override environment
        assert!(sources.update("SDS", "sds_path", ConfigSource::Cli));

        // Lower precedence should not override
        assert!(!sources.update("SDS", "sds_path", ConfigSource::File));
        assert_eq!(sources.get("SDS", "sds_path"), Some(ConfigSource::Cli));
    }

    #[test]
    fn test_cli_overrides_file_values() {
        let mut outcome = outcome_from_file();
        assert_eq!(outcome.sources.get("PROCESSING", "num_processes"), Some(ConfigSource::File));

        let overrides = SettingsOverrides {
            num_processes: Some(12),
            download_type: Some(DownloadType::Continuous),
            ..Default::default()
        };
        overrides.apply(&mut outcome, ConfigSource::Cli);

        assert_eq!(outcome.settings.processing.num_processes, 12);
        assert_eq!(outcome.settings.download_type, DownloadType::Continuous);
        assert_eq!(outcome.sources.get("PROCESSING", "num_processes"), Some(ConfigSource::Cli));
        // Untouched fields keep their file source
        assert_eq!(outcome.sources.get("SDS", "sds_path"), Some(ConfigSource::File));
    }

    #[test]
    fn test_environment_does_not_beat_cli() {
        let mut outcome = outcome_from_file();
        SettingsOverrides { num_processes: Some(3), ..Default::default() }
            .apply(&mut outcome, ConfigSource::Cli);
        SettingsOverrides { num_processes: Some(9), ..Default::default() }
            .apply(&mut outcome, ConfigSource::Environment);

        assert_eq!(outcome.settings.processing.num_processes, 3);
    }

    #[test]
    fn test_defaulted_database_follows_archive_root() {
        let mut outcome = outcome_from_file();
        assert_eq!(outcome.sources.get("DATABASE", "db_path"), Some(ConfigSource::Default));

        SettingsOverrides { sds_path: Some("/fast/SDS".into()), ..Default::default() }
            .apply(&mut outcome, ConfigSource::Environment);

        assert_eq!(outcome.settings.sds_path, PathBuf::from("/fast/SDS"));
        assert_eq!(outcome.settings.db_path, PathBuf::from("/fast/SDS/database.sqlite"));
    }

    #[test]
    fn test_parse_download_type() {
        assert_eq!(parse_download_type("CONTINUOUS"), Some(DownloadType::Continuous));
        assert_eq!(parse_download_type(" event "), Some(DownloadType::Event));
        assert_eq!(parse_download_type("hourly"), None);
    }
}
