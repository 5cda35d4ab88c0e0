//! CLI command implementations.

pub mod estimate;
pub mod inspect;
pub mod list;
pub mod resample;
pub mod validate;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rangesel_core::{InMemoryStatisticsStore, StatisticsSnapshot};
use rangesel_engine::EstimatorConfig;

use crate::OutputFormat;

/// Options shared by every command.
pub struct Settings {
    /// Output format.
    pub format: OutputFormat,
    /// Suppress output.
    pub quiet: bool,
    /// Estimator configuration file.
    pub config: Option<PathBuf>,
    /// Bin count override.
    pub bins: Option<usize>,
}

impl Settings {
    /// Resolves the estimator configuration: file first, then overrides.
    pub fn estimator_config(&self) -> Result<EstimatorConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => EstimatorConfig::default(),
        };
        if let Some(bins) = self.bins {
            config = config.with_bin_count(bins);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Reads a statistics snapshot file.
pub fn load_snapshot(path: &Path) -> Result<StatisticsSnapshot> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    let snapshot = serde_json::from_str(&text)
        .with_context(|| format!("parsing snapshot {}", path.display()))?;
    Ok(snapshot)
}

/// Reads a statistics snapshot file into a store.
pub fn load_store(path: &Path) -> Result<InMemoryStatisticsStore> {
    let snapshot = load_snapshot(path)?;
    tracing::debug!(
        "Loaded {} attributes from {}",
        snapshot.attributes.len(),
        path.display()
    );
    Ok(InMemoryStatisticsStore::from_snapshot(snapshot))
}
