//! Check command implementation

use crate::cli::CheckArgs;
use crate::config_loader::load_settings;
use crate::output::OutputWriter;
use crate::output_types::CheckOutput;
use anyhow::{bail, Result};

pub fn execute(args: CheckArgs, output: &OutputWriter) -> Result<()> {
    let outcome = load_settings(&args.config)?;
    let diagnostics = &outcome.diagnostics;
    let config = args.config.config.display().to_string();

    tracing::debug!(
        warnings = diagnostics.warnings.len(),
        errors = diagnostics.errors.len(),
        "Configuration checked"
    );

    if output.is_json() {
        output.result(CheckOutput {
            config: config.clone(),
            valid: diagnostics.is_valid(),
            warnings: diagnostics.warnings.clone(),
            errors: diagnostics.errors.clone(),
        })?;
    } else {
        for diagnostic in diagnostics.iter() {
            output.diagnostic(diagnostic);
        }

        if diagnostics.is_empty() {
            output.success(format!("{} is valid", config));
        } else if diagnostics.is_valid() {
            output.success(format!(
                "{} is valid with {} warning(s)",
                config,
                diagnostics.warnings.len()
            ));
        } else {
            output.warning(format!(
                "{} has {} error(s) and {} warning(s); defaults were substituted",
                config,
                diagnostics.errors.len(),
                diagnostics.warnings.len()
            ));
        }
    }

    if args.strict && !diagnostics.is_valid() {
        bail!("{} error(s) found in {}", diagnostics.errors.len(), config);
    }

    Ok(())
}
