//! Estimator configuration.

use serde::{Deserialize, Serialize};

use rangesel_common::types::ProbabilityBounds;
use rangesel_common::utils::error::{Error, Result};

/// Configuration for [`OverlapJoinEstimator`](crate::OverlapJoinEstimator).
///
/// Fixed when the estimator is built; nothing here varies per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Number of equal-width bins both histograms are resampled onto.
    pub bin_count: usize,
    /// Selectivity returned whenever estimation cannot proceed.
    pub fallback_selectivity: f64,
    /// Floor for computed selectivities.
    pub min_selectivity: f64,
    /// Ceiling for computed selectivities.
    pub max_selectivity: f64,
}

impl EstimatorConfig {
    /// Default resampling granularity.
    pub const DEFAULT_BIN_COUNT: usize = 100;

    /// Largest accepted resampling granularity.
    pub const MAX_BIN_COUNT: usize = 10_000;

    /// Default selectivity when statistics cannot be used.
    pub const DEFAULT_FALLBACK_SELECTIVITY: f64 = 0.005;

    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shared resampling bin count.
    #[must_use]
    pub fn with_bin_count(mut self, bin_count: usize) -> Self {
        self.bin_count = bin_count;
        self
    }

    /// Sets the fallback selectivity.
    #[must_use]
    pub fn with_fallback_selectivity(mut self, selectivity: f64) -> Self {
        self.fallback_selectivity = selectivity;
        self
    }

    /// Sets the clamp range for computed selectivities.
    #[must_use]
    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.min_selectivity = min;
        self.max_selectivity = max;
        self
    }

    /// Returns the clamp range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] unless `0 <= min <= max <= 1`.
    pub fn bounds(&self) -> Result<ProbabilityBounds> {
        ProbabilityBounds::new(self.min_selectivity, self.max_selectivity).ok_or_else(|| {
            Error::InvalidConfig(format!(
                "selectivity bounds [{}, {}] must satisfy 0 <= min <= max <= 1",
                self.min_selectivity, self.max_selectivity
            ))
        })
    }

    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the bin count is outside
    /// `1..=MAX_BIN_COUNT`, the bounds are invalid, or the fallback lies
    /// outside the bounds.
    pub fn validate(&self) -> Result<()> {
        if !(1..=Self::MAX_BIN_COUNT).contains(&self.bin_count) {
            return Err(Error::InvalidConfig(format!(
                "bin_count must be between 1 and {}, got {}",
                Self::MAX_BIN_COUNT,
                self.bin_count
            )));
        }
        let bounds = self.bounds()?;
        if !bounds.contains(self.fallback_selectivity) {
            return Err(Error::InvalidConfig(format!(
                "fallback selectivity {} lies outside [{}, {}]",
                self.fallback_selectivity, bounds.min, bounds.max
            )));
        }
        Ok(())
    }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            bin_count: Self::DEFAULT_BIN_COUNT,
            fallback_selectivity: Self::DEFAULT_FALLBACK_SELECTIVITY,
            min_selectivity: ProbabilityBounds::DEFAULT_MIN,
            max_selectivity: 1.0,
        }
    }
}
