//! Re-binning histograms onto an equal-width grid.
//!
//! Each source bin's mass is spread over the target bins in proportion to
//! how much of the source span lands in each one. Mass that falls outside
//! the grid is dropped, which is what we want when both sides of a join are
//! cut down to their common domain.

use rangesel_common::utils::error::{Error, Result};

use super::histogram::{Bin, Histogram};
use super::overlap::overlap_fraction;

/// `bins` equal-width bins covering `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetGrid {
    min: f64,
    max: f64,
    bins: usize,
}

impl TargetGrid {
    /// Creates a grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGrid`] if `bins` is zero, a bound is not
    /// finite, or `min > max`.
    pub fn new(min: f64, max: f64, bins: usize) -> Result<Self> {
        if bins == 0 {
            return Err(Error::InvalidGrid("bin count must be at least 1".to_string()));
        }
        if !(min.is_finite() && max.is_finite()) {
            return Err(Error::InvalidGrid(format!(
                "bounds must be finite, got [{min}, {max}]"
            )));
        }
        if min > max {
            return Err(Error::InvalidGrid(format!("inverted bounds [{min}, {max}]")));
        }
        Ok(Self { min, max, bins })
    }

    /// Returns the lower edge of the grid.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Returns the upper edge of the grid.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Returns the number of bins.
    #[must_use]
    pub fn bins(&self) -> usize {
        self.bins
    }

    /// Returns the nominal width of every bin.
    ///
    /// Finite for any finite bounds, even when `max - min` itself would
    /// overflow.
    #[must_use]
    pub fn width(&self) -> f64 {
        let n = self.bins as f64;
        self.max / n - self.min / n
    }

    /// Returns the `bins + 1` edges of the grid.
    ///
    /// Edges are interpolated between the bounds rather than stepped by the
    /// width, so they stay inside `[min, max]` for any finite bounds. The
    /// first edge is exactly `min` and the last exactly `max`.
    #[must_use]
    pub fn edges(&self) -> Vec<f64> {
        let n = self.bins as f64;
        (0..=self.bins)
            .map(|i| {
                if i == self.bins {
                    self.max
                } else {
                    let t = i as f64 / n;
                    (self.min * (1.0 - t) + self.max * t).clamp(self.min, self.max)
                }
            })
            .collect()
    }
}

impl Histogram {
    /// Redistributes this histogram's mass onto `grid`.
    ///
    /// Every source bin is visited for every target bin; the source bin count
    /// and the grid's bin count are unrelated. Total mass is preserved when
    /// the grid covers this histogram's whole domain.
    #[must_use]
    pub fn resample(&self, grid: &TargetGrid) -> Histogram {
        let edges = grid.edges();
        let bins = edges
            .windows(2)
            .map(|edge| {
                let (lower, upper) = (edge[0], edge[1]);
                let mass = self
                    .bins()
                    .iter()
                    .map(|source| {
                        overlap_fraction(lower, upper, source.lower, source.upper) * source.mass
                    })
                    .sum();
                Bin::new(lower, upper, mass)
            })
            .collect();

        // Grid edges are finite and ordered and every mass is a non-negative
        // sum, so the builder's checks cannot fail here.
        Histogram::assemble(bins)
    }

    /// Convenience wrapper building the grid and resampling in one step.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGrid`] if the grid is invalid.
    pub fn resample_onto(&self, grid_min: f64, grid_max: f64, bins: usize) -> Result<Histogram> {
        Ok(self.resample(&TargetGrid::new(grid_min, grid_max, bins)?))
    }
}
