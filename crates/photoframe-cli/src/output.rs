//! Output renderers and formatting helpers for CLI commands.

use anyhow::anyhow;
use photoframe_api::Settings;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

pub(crate) fn render_settings(settings: &Settings, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => println!("{}", to_pretty_json(settings)?),
        OutputFormat::Table => print!("{}", settings_table(settings)),
    }
    Ok(())
}

pub(crate) fn render_value(value: &Value, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => println!("{}", to_pretty_json(value)?),
        OutputFormat::Table => print!("{}", value_table(value)),
    }
    Ok(())
}

fn to_pretty_json<T: serde::Serialize + ?Sized>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))
}

/// Two aligned columns, keys in sorted order.
pub(crate) fn settings_table(settings: &Settings) -> String {
    if settings.is_empty() {
        return "no settings\n".to_string();
    }
    let width = settings.keys().map(String::len).max().unwrap_or(0).max(3);
    let mut out = format!("{:<width$}  VALUE\n", "KEY");
    for (key, value) in settings {
        out.push_str(&format!("{key:<width$}  {value}\n"));
    }
    out
}

/// Objects render as `key: value` lines, arrays one compact element per line.
pub(crate) fn value_table(value: &Value) -> String {
    match value {
        Value::Object(map) if !map.is_empty() => map
            .iter()
            .map(|(key, value)| format!("{key}: {}\n", scalar(value)))
            .collect(),
        Value::Array(items) if !items.is_empty() => items
            .iter()
            .map(|item| format!("{}\n", scalar(item)))
            .collect(),
        Value::Object(_) | Value::Array(_) | Value::Null => "(empty)\n".to_string(),
        other => format!("{}\n", scalar(other)),
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
