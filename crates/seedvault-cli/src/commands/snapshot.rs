//! Snapshot command implementation

use crate::cli::{SnapshotCommand, SnapshotSaveArgs, SnapshotShowArgs};
use crate::config_loader::load_settings;
use crate::output::OutputWriter;
use crate::output_types::{SnapshotSaveOutput, SnapshotShowOutput};
use anyhow::{bail, Context, Result};
use seedvault_core::models::ConfigEnum;
use seedvault_core::snapshot;
use seedvault_core::SettingsAggregate;
use std::fs;

pub fn execute(command: SnapshotCommand, output: &OutputWriter) -> Result<()> {
    match command {
        SnapshotCommand::Save(args) => save(args, output),
        SnapshotCommand::Show(args) => show(args, output),
    }
}

fn save(args: SnapshotSaveArgs, output: &OutputWriter) -> Result<()> {
    let outcome = load_settings(&args.config)?;
    let config = args.config.config.display().to_string();

    if !outcome.is_valid() {
        bail!(
            "{} has {} error(s); fix them before saving a snapshot",
            config,
            outcome.diagnostics.errors.len()
        );
    }

    outcome
        .settings
        .save_snapshot(&args.snapshot)
        .with_context(|| format!("Failed to write snapshot {}", args.snapshot.display()))?;
    let bytes = fs::metadata(&args.snapshot)
        .with_context(|| format!("Failed to stat snapshot {}", args.snapshot.display()))?
        .len();

    tracing::info!(path = %args.snapshot.display(), bytes, "Snapshot saved");

    if output.is_json() {
        output.result(SnapshotSaveOutput {
            config,
            snapshot: args.snapshot.display().to_string(),
            version: snapshot::SNAPSHOT_VERSION,
            bytes,
        })?;
    } else {
        output.success(format!(
            "Saved snapshot {} ({} bytes)",
            args.snapshot.display(),
            bytes
        ));
    }

    Ok(())
}

fn show(args: SnapshotShowArgs, output: &OutputWriter) -> Result<()> {
    let bytes = fs::read(&args.snapshot)
        .with_context(|| format!("Failed to read snapshot {}", args.snapshot.display()))?;

    let info = snapshot::inspect(&bytes)?;
    let settings = SettingsAggregate::from_snapshot_bytes(&bytes)
        .with_context(|| format!("Failed to decode snapshot {}", args.snapshot.display()))?;

    if args.as_cfg && !output.is_json() {
        print!("{}", settings.to_cfg_string());
        return Ok(());
    }

    let summary = SnapshotShowOutput {
        snapshot: args.snapshot.display().to_string(),
        version: info.version,
        compressed_len: info.compressed_len,
        sds_path: settings.sds_path.display().to_string(),
        db_path: settings.db_path.display().to_string(),
        download_type: settings.download_type.as_str().to_string(),
        client: settings.waveform.client.clone().unwrap_or_default(),
        station_selectors: settings.station.force_stations.len()
            + settings.station.exclude_stations.len(),
        has_event_search: settings.event.is_some(),
        predictions: settings.predictions.len(),
    };

    if output.is_json() {
        return output.result(summary);
    }

    output.section(format!("Snapshot {}", summary.snapshot));
    output.kv("Format version", summary.version);
    output.kv("Payload", format!("{} bytes", summary.compressed_len));
    output.kv("SDS path", &summary.sds_path);
    output.kv("Database", &summary.db_path);
    output.kv("Download type", &summary.download_type);
    output.kv("Waveform client", &summary.client);
    output.kv("Station selectors", summary.station_selectors);
    output.kv(
        "Event search",
        if summary.has_event_search { "yes" } else { "no" },
    );
    output.kv("Cached predictions", summary.predictions);

    Ok(())
}
