//! Snapshot listing command.

use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Color};
use serde::Serialize;

use super::{Settings, load_store};
use crate::output::{self, Format};

/// One listed attribute.
#[derive(Serialize)]
struct AttributeOutput {
    attribute: String,
    bins: usize,
    restricted: bool,
}

fn list(snapshot: &Path) -> Result<Vec<AttributeOutput>> {
    let store = load_store(snapshot)?;
    Ok(store
        .snapshot()
        .attributes
        .into_iter()
        .map(|entry| AttributeOutput {
            attribute: format!("{}.{}", entry.relation, entry.attribute),
            bins: entry.statistics.histogram.masses.len(),
            restricted: entry.statistics.restricted,
        })
        .collect())
}

/// Run the list command.
pub fn run(snapshot: &Path, settings: &Settings) -> Result<()> {
    let attributes = list(snapshot)?;

    let fmt: Format = settings.format.into();
    match fmt {
        Format::Json => output::print_json(&attributes, settings.quiet)?,
        Format::Table => {
            if attributes.is_empty() {
                output::status("No statistics recorded.", settings.quiet);
                return Ok(());
            }
            let mut table = output::table(&["Attribute", "Bins", "Restricted"]);
            for attr in &attributes {
                let restricted = if attr.restricted {
                    Cell::new("yes").fg(Color::Yellow)
                } else {
                    Cell::new("no")
                };
                table.add_row(vec![
                    Cell::new(&attr.attribute).fg(Color::Green),
                    Cell::new(attr.bins),
                    restricted,
                ]);
            }
            output::print_table(&table, settings.quiet);
        }
    }

    Ok(())
}
