//! Configuration loading utilities for CLI commands

use crate::cli::ConfigArgs;
use anyhow::{Context, Result};
use seedvault_core::config::{apply_env_overrides, SettingsOverrides};
use seedvault_core::{ConfigSource, ParseOutcome, SettingsAggregate};
use std::path::Path;

/// Parse a configuration file without any overrides
pub fn load_file(path: &Path) -> Result<ParseOutcome> {
    SettingsAggregate::from_cfg_file(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}

/// Parse a configuration file, then layer environment and CLI overrides on top
pub fn load_settings(args: &ConfigArgs) -> Result<ParseOutcome> {
    let mut outcome = load_file(&args.config)?;
    apply_env_overrides(&mut outcome);
    cli_overrides(args).apply(&mut outcome, ConfigSource::Cli);
    Ok(outcome)
}

fn cli_overrides(args: &ConfigArgs) -> SettingsOverrides {
    SettingsOverrides {
        sds_path: args.sds_path.clone(),
        db_path: args.db_path.clone(),
        num_processes: args.num_processes,
        download_type: args.download_type,
    }
}
