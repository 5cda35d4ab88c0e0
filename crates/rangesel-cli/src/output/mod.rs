//! Output formatting for CLI commands.
//!
//! Commands build their own tables from these helpers; JSON output is the
//! command's serializable result printed as-is.

use std::collections::BTreeMap;

use comfy_table::{Cell, Color, ContentArrangement, Table};
use serde::Serialize;

/// Output format selection.
#[derive(Clone, Copy)]
pub enum Format {
    Table,
    Json,
}

impl From<crate::OutputFormat> for Format {
    fn from(f: crate::OutputFormat) -> Self {
        match f {
            crate::OutputFormat::Table => Format::Table,
            crate::OutputFormat::Json => Format::Json,
        }
    }
}

/// Print serializable data as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(data: &T, quiet: bool) -> anyhow::Result<()> {
    if !quiet {
        println!("{}", serde_json::to_string_pretty(data)?);
    }
    Ok(())
}

/// Create a table with the given column headers.
pub fn table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .load_preset(comfy_table::presets::UTF8_FULL_CONDENSED)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).fg(Color::Cyan))
                .collect::<Vec<_>>(),
        );
    table
}

/// Print a finished table.
pub fn print_table(table: &Table, quiet: bool) {
    if !quiet {
        println!("{table}");
    }
}

fn key_value_table(items: &[(&str, String)]) -> Table {
    let mut table = table(&["Property", "Value"]);
    for (key, value) in items {
        table.add_row(vec![Cell::new(key).fg(Color::Green), Cell::new(value)]);
    }
    table
}

/// Print a property/value summary, as a table or a JSON object.
pub fn print_summary(items: &[(&str, String)], format: Format, quiet: bool) -> anyhow::Result<()> {
    match format {
        Format::Json => {
            let map: BTreeMap<&str, &str> = items.iter().map(|(k, v)| (*k, v.as_str())).collect();
            print_json(&map, quiet)
        }
        Format::Table => {
            print_table(&key_value_table(items), quiet);
            Ok(())
        }
    }
}

/// Print a status message (respects quiet mode).
pub fn status(msg: &str, quiet: bool) {
    if !quiet {
        println!("{msg}");
    }
}

/// Print a success message.
pub fn success(msg: &str, quiet: bool) {
    if !quiet {
        println!("✓ {msg}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_value_table_rows() {
        let rendered = key_value_table(&[
            ("Selectivity", "0.500000".to_string()),
            ("Bins", "2".to_string()),
        ])
        .to_string();
        assert!(rendered.contains("Property"));
        assert!(rendered.contains("Selectivity"));
        assert!(rendered.contains("0.500000"));
    }

    #[test]
    fn test_quiet_prints_nothing_and_succeeds() {
        assert!(print_json(&[1, 2, 3], true).is_ok());
        assert!(print_summary(&[("Bins", "2".to_string())], Format::Json, true).is_ok());
    }
}
