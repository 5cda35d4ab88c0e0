//! Histogram resampling command.

use std::path::Path;

use anyhow::Result;
use rangesel_core::{Histogram, TargetGrid};

use super::Settings;
use super::inspect::{HistogramOutput, histogram};

fn resample(
    hist: &Histogram,
    min: Option<f64>,
    max: Option<f64>,
    grid_bins: usize,
) -> Result<Histogram> {
    let grid = TargetGrid::new(
        min.unwrap_or(hist.domain_min()),
        max.unwrap_or(hist.domain_max()),
        grid_bins,
    )?;
    Ok(hist.resample(&grid))
}

/// Run the resample command.
pub fn run(
    snapshot: &Path,
    attribute: &str,
    min: Option<f64>,
    max: Option<f64>,
    grid_bins: usize,
    settings: &Settings,
) -> Result<()> {
    let (attribute, restricted, hist) = histogram(snapshot, attribute)?;
    let resampled = resample(&hist, min, max, grid_bins)?;
    tracing::debug!(
        "Resampled {} from {} to {} bins, mass {} -> {}",
        attribute,
        hist.len(),
        resampled.len(),
        hist.total_mass(),
        resampled.total_mass()
    );
    HistogramOutput::new(&attribute, restricted, &resampled)
        .print(settings.format.into(), settings.quiet)
}
