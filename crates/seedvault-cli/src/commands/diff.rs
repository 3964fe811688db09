//! Diff command implementation

use crate::cli::DiffArgs;
use crate::config_loader::load_file;
use crate::output::OutputWriter;
use crate::output_types::DiffOutput;
use anyhow::Result;
use serde_json::Value;
use tabled::Tabled;

pub fn execute(args: DiffArgs, output: &OutputWriter) -> Result<()> {
    let before = load_file(&args.before)?;
    let after = load_file(&args.after)?;

    let diff = after.settings.diff(&before.settings);

    if output.is_json() {
        return output.result(DiffOutput {
            before: args.before.display().to_string(),
            after: args.after.display().to_string(),
            changes: diff.changes,
        });
    }

    if !diff.has_changed() {
        output.success("No differences");
        return Ok(());
    }

    output.section(format!(
        "{} -> {}",
        args.before.display(),
        args.after.display()
    ));

    #[derive(Tabled)]
    struct ChangeRow {
        #[tabled(rename = "Field")]
        path: String,
        #[tabled(rename = "Before")]
        before: String,
        #[tabled(rename = "After")]
        after: String,
    }

    let count = diff.changes.len();
    let rows: Vec<ChangeRow> = diff
        .changes
        .into_iter()
        .map(|c| ChangeRow {
            path: c.path,
            before: display_value(&c.before),
            after: display_value(&c.after),
        })
        .collect();

    output.table(rows);
    output.info(format!("{} field(s) changed", count));

    Ok(())
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
