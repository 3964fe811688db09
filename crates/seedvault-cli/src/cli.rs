use clap::{Args, Parser, Subcommand};
use seedvault_core::config::parse_download_type;
use seedvault_core::models::DownloadType;
use std::path::PathBuf;

/// SeedVault - settings for seismic waveform retrieval
#[derive(Parser, Debug)]
#[command(name = "seedvault")]
#[command(about = "Check, inspect and convert seismic retrieval settings", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a configuration file and report warnings and errors
    Check(CheckArgs),

    /// Show every resolved setting with the source it came from
    Inspect(InspectArgs),

    /// Write the normalized configuration
    Export(ExportArgs),

    /// Compare the settings resolved from two configuration files
    Diff(DiffArgs),

    /// Save or show binary settings snapshots
    #[command(subcommand)]
    Snapshot(SnapshotCommand),
}

/// Configuration file plus command-line overrides
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Path to the configuration file
    #[arg(env = "SEEDVAULT_CONFIG")]
    pub config: PathBuf,

    /// Override the SDS archive root
    #[arg(long)]
    pub sds_path: Option<PathBuf>,

    /// Override the database path
    #[arg(long)]
    pub db_path: Option<PathBuf>,

    /// Override the number of worker processes
    #[arg(long)]
    pub num_processes: Option<u32>,

    /// Override the download type (event or continuous)
    #[arg(long, value_parser = download_type_arg)]
    pub download_type: Option<DownloadType>,
}

fn download_type_arg(value: &str) -> Result<DownloadType, String> {
    parse_download_type(value).ok_or_else(|| {
        format!("invalid download type '{}': use event or continuous", value)
    })
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Exit with an error when the configuration has errors
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Write to this file instead of stdout
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Earlier configuration file
    pub before: PathBuf,

    /// Later configuration file
    pub after: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum SnapshotCommand {
    /// Parse a configuration file and save it as a snapshot
    Save(SnapshotSaveArgs),

    /// Show the contents of a snapshot
    Show(SnapshotShowArgs),
}

#[derive(Args, Debug)]
pub struct SnapshotSaveArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Snapshot file to write
    pub snapshot: PathBuf,
}

#[derive(Args, Debug)]
pub struct SnapshotShowArgs {
    /// Snapshot file to read
    pub snapshot: PathBuf,

    /// Print the settings as configuration text instead of a summary
    #[arg(long)]
    pub as_cfg: bool,
}
