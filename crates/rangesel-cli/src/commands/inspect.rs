//! Histogram inspection command.

use std::path::Path;

use anyhow::{Result, anyhow};
use comfy_table::Cell;
use rangesel_common::types::AttributeRef;
use rangesel_core::Histogram;
use serde::Serialize;

use super::{Settings, load_store};
use crate::output::{self, Format};

/// One bin of a displayed histogram.
#[derive(Serialize)]
pub(crate) struct BinOutput {
    lower: f64,
    upper: f64,
    mass: f64,
    share: f64,
}

/// A displayed histogram.
#[derive(Serialize)]
pub(crate) struct HistogramOutput {
    attribute: String,
    restricted: bool,
    domain: (f64, f64),
    total_mass: f64,
    bins: Vec<BinOutput>,
}

impl HistogramOutput {
    pub(crate) fn new(attribute: &AttributeRef, restricted: bool, hist: &Histogram) -> Self {
        Self {
            attribute: attribute.to_string(),
            restricted,
            domain: hist.domain(),
            total_mass: hist.total_mass(),
            bins: hist
                .bins()
                .iter()
                .zip(hist.normalized_masses())
                .map(|(bin, share)| BinOutput {
                    lower: bin.lower,
                    upper: bin.upper,
                    mass: bin.mass,
                    share,
                })
                .collect(),
        }
    }

    /// Prints the histogram in the selected format.
    pub(crate) fn print(&self, format: Format, quiet: bool) -> Result<()> {
        if quiet {
            return Ok(());
        }
        match format {
            Format::Json => output::print_json(self, quiet)?,
            Format::Table => {
                let (lower, upper) = self.domain;
                let summary = vec![
                    ("Attribute", self.attribute.clone()),
                    ("Restricted", self.restricted.to_string()),
                    ("Domain", format!("[{lower}, {upper}]")),
                    ("Total Mass", format!("{:.6}", self.total_mass)),
                    ("Bins", self.bins.len().to_string()),
                ];
                output::print_summary(&summary, format, quiet)?;

                let mut table = output::table(&["#", "Lower", "Upper", "Mass", "Share"]);
                for (i, bin) in self.bins.iter().enumerate() {
                    table.add_row(vec![
                        Cell::new(i),
                        Cell::new(bin.lower),
                        Cell::new(bin.upper),
                        Cell::new(format!("{:.6}", bin.mass)),
                        Cell::new(format!("{:.2}%", bin.share * 100.0)),
                    ]);
                }
                output::print_table(&table, quiet);
            }
        }
        Ok(())
    }
}

pub(crate) fn histogram(snapshot: &Path, attribute: &str) -> Result<(AttributeRef, bool, Histogram)> {
    let attribute: AttributeRef = attribute.parse()?;
    let store = load_store(snapshot)?;
    let stats = store
        .get(&attribute)
        .ok_or_else(|| anyhow!("no statistics recorded for {attribute}"))?;
    let hist = stats.histogram.build()?;
    Ok((attribute, stats.restricted, hist))
}

/// Run the inspect command.
pub fn run(snapshot: &Path, attribute: &str, settings: &Settings) -> Result<()> {
    let (attribute, restricted, hist) = histogram(snapshot, attribute)?;
    HistogramOutput::new(&attribute, restricted, &hist).print(settings.format.into(), settings.quiet)
}
