//! Command implementations

mod check;
mod diff;
mod export;
mod inspect;
mod snapshot;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use anyhow::Result;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);

    match cli.command {
        Commands::Check(args) => check::execute(args, &output),
        Commands::Inspect(args) => inspect::execute(args, &output),
        Commands::Export(args) => export::execute(args, &output),
        Commands::Diff(args) => diff::execute(args, &output),
        Commands::Snapshot(command) => snapshot::execute(command, &output),
    }
}
