//! Export command implementation

use crate::cli::ExportArgs;
use crate::config_loader::load_settings;
use crate::output::OutputWriter;
use crate::output_types::ExportOutput;
use anyhow::{Context, Result};

pub fn execute(args: ExportArgs, output: &OutputWriter) -> Result<()> {
    let outcome = load_settings(&args.config)?;
    let config = args.config.config.display().to_string();

    if !outcome.is_valid() {
        output.warning(format!(
            "{} has {} error(s); exporting with defaults substituted",
            config,
            outcome.diagnostics.errors.len()
        ));
    }

    match &args.out {
        Some(path) => {
            outcome
                .settings
                .write_cfg(path)
                .with_context(|| format!("Failed to write {}", path.display()))?;

            if output.is_json() {
                output.result(ExportOutput {
                    config,
                    written_to: Some(path.display().to_string()),
                    text: None,
                })?;
            } else {
                output.success(format!("Wrote {}", path.display()));
            }
        }
        None => {
            let text = outcome.settings.to_cfg_string();
            if output.is_json() {
                output.result(ExportOutput {
                    config,
                    written_to: None,
                    text: Some(text),
                })?;
            } else {
                print!("{}", text);
            }
        }
    }

    Ok(())
}
