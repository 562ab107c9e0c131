//! Output formatting
//!
//! Renders GraphQL payloads as tables or JSON and provides the user-facing
//! info/error message helpers.

use anyhow::Result;
use comfy_table::{
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, ContentArrangement, Table,
};
use serde_json::Value;

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";
}

pub fn print_info(message: &str) {
    println!("{} {message}", status::SUCCESS);
}

pub fn print_error(message: &str) {
    eprintln!("{} {message}", status::ERROR);
}

/// Print a failed handler's error chain to standard error
pub fn display_error(err: &anyhow::Error) {
    eprintln!("{} Error: {err}", status::ERROR);
    for cause in err.chain().skip(1) {
        eprintln!("  Caused by: {cause}");
    }
}

/// Print the payload stored under `key` in a GraphQL `data` object.
///
/// List payloads arrive wrapped as `{key: {data: [...]}}`; single objects as
/// `{key: {...}}`. The wrapper is peeled off before rendering.
pub fn print_response(data: &Value, key: &str, output_fmt: &str) -> Result<()> {
    let payload = data.get(key).cloned().unwrap_or(Value::Null);
    let payload = match payload.get("data") {
        Some(inner) => inner.clone(),
        None => payload,
    };

    if output_fmt == "json" {
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!("{}", format_table(&payload));
    }
    Ok(())
}

/// Render a payload as a table.
///
/// An array of objects becomes one row per element with the union of the
/// element keys as columns; a single object becomes a one-row table. Key
/// order follows serde_json's sorted object maps, so output is stable.
pub fn format_table(value: &Value) -> String {
    let rows: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(_) => vec![value],
        other => return other.to_string(),
    };

    let mut columns: Vec<String> = Vec::new();
    for row in &rows {
        if let Value::Object(map) = row {
            for key in map.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(columns.iter().map(Cell::new).collect::<Vec<_>>());

    for row in rows {
        let cells: Vec<Cell> = columns
            .iter()
            .map(|column| Cell::new(render_cell(row.get(column.as_str()))))
            .collect();
        table.add_row(cells);
    }

    table.to_string()
}

fn render_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
