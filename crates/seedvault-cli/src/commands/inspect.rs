//! Inspect command implementation

use crate::cli::InspectArgs;
use crate::config_loader::load_settings;
use crate::output::OutputWriter;
use crate::output_types::{InspectOutput, ResolvedValue};
use anyhow::Result;
use tabled::Tabled;

pub fn execute(args: InspectArgs, output: &OutputWriter) -> Result<()> {
    let outcome = load_settings(&args.config)?;

    let values: Vec<ResolvedValue> = outcome
        .to_inspection_map()
        .into_iter()
        .map(|(key, (value, source))| ResolvedValue { key, value, source })
        .collect();

    if output.is_json() {
        return output.result(InspectOutput {
            config: args.config.config.display().to_string(),
            values,
        });
    }

    output.section(format!("Settings from {}", args.config.config.display()));

    #[derive(Tabled)]
    struct ValueRow {
        #[tabled(rename = "Key")]
        key: String,
        #[tabled(rename = "Value")]
        value: String,
        #[tabled(rename = "Source")]
        source: String,
    }

    let rows: Vec<ValueRow> = values
        .into_iter()
        .map(|v| ValueRow {
            key: v.key,
            // Continuation lines would break the table layout
            value: v.value.replace('\n', " "),
            source: format!("{:?}", v.source),
        })
        .collect();

    output.table(rows);

    if !outcome.is_valid() {
        output.warning(format!(
            "{} error(s) while parsing; run `seedvault check` for details",
            outcome.diagnostics.errors.len()
        ));
    }

    Ok(())
}
