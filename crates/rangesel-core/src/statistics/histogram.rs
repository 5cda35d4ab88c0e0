//! Piecewise-constant histograms over a real-valued domain.

use rangesel_common::utils::error::{Error, Result};

/// One segment of a histogram: a span and the mass that falls in it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    /// Lower bound of the span.
    pub lower: f64,
    /// Upper bound of the span, never below `lower`.
    pub upper: f64,
    /// Relative frequency of values in this span.
    pub mass: f64,
}

impl Bin {
    /// Creates a new bin.
    #[must_use]
    pub fn new(lower: f64, upper: f64, mass: f64) -> Self {
        Self { lower, upper, mass }
    }

    /// Returns the length of the span.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// An immutable histogram.
///
/// Bins are kept in the order they were supplied. They need not be sorted or
/// contiguous; the domain is the hull of all of them.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    bins: Vec<Bin>,
    total_mass: f64,
    domain_min: f64,
    domain_max: f64,
}

impl Histogram {
    /// Builds a histogram from `B + 1` boundaries and `B` masses.
    ///
    /// Bin `i` spans `boundaries[i]..boundaries[i + 1]` and carries
    /// `masses[i]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedStatistics`] if the array lengths do not
    /// match, there are no bins, a value is not finite, a mass is negative,
    /// or a bin's upper bound lies below its lower bound.
    pub fn build(boundaries: &[f64], masses: &[f64]) -> Result<Self> {
        if masses.is_empty() {
            return Err(Error::MalformedStatistics(
                "histogram has no bins".to_string(),
            ));
        }
        if boundaries.len() != masses.len() + 1 {
            return Err(Error::MalformedStatistics(format!(
                "{} boundaries for {} masses, expected {}",
                boundaries.len(),
                masses.len(),
                masses.len() + 1
            )));
        }

        let bins = boundaries
            .windows(2)
            .zip(masses)
            .map(|(bounds, &mass)| Bin::new(bounds[0], bounds[1], mass))
            .collect();
        Self::from_bins(bins)
    }

    /// Builds a histogram from already-formed bins.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Histogram::build`], minus the length checks.
    pub fn from_bins(bins: Vec<Bin>) -> Result<Self> {
        if bins.is_empty() {
            return Err(Error::MalformedStatistics(
                "histogram has no bins".to_string(),
            ));
        }
        for (i, bin) in bins.iter().enumerate() {
            if !(bin.lower.is_finite() && bin.upper.is_finite() && bin.mass.is_finite()) {
                return Err(Error::MalformedStatistics(format!(
                    "bin {i} has a non-finite value"
                )));
            }
            if bin.upper < bin.lower {
                return Err(Error::MalformedStatistics(format!(
                    "bin {i} is inverted: [{}, {}]",
                    bin.lower, bin.upper
                )));
            }
            if bin.mass < 0.0 {
                return Err(Error::MalformedStatistics(format!(
                    "bin {i} has negative mass {}",
                    bin.mass
                )));
            }
        }
        Ok(Self::assemble(bins))
    }

    /// Computes the aggregates for bins that are known to be valid.
    ///
    /// The extent starts from the first bin rather than from sentinels so a
    /// single-bin histogram gets exactly that bin's span.
    pub(crate) fn assemble(bins: Vec<Bin>) -> Self {
        debug_assert!(!bins.is_empty());
        let first = bins[0];
        let (domain_min, domain_max, total_mass) = bins.iter().skip(1).fold(
            (first.lower, first.upper, first.mass),
            |(lo, hi, total), bin| (lo.min(bin.lower), hi.max(bin.upper), total + bin.mass),
        );
        Self {
            bins,
            total_mass,
            domain_min,
            domain_max,
        }
    }

    /// Returns the bins in their original order.
    #[must_use]
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    /// Returns the number of bins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Returns true if the histogram has no bins. Built histograms always
    /// have at least one.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Returns the sum of all bin masses.
    #[must_use]
    pub fn total_mass(&self) -> f64 {
        self.total_mass
    }

    /// Returns the smallest lower bound of any bin.
    #[must_use]
    pub fn domain_min(&self) -> f64 {
        self.domain_min
    }

    /// Returns the largest upper bound of any bin.
    #[must_use]
    pub fn domain_max(&self) -> f64 {
        self.domain_max
    }

    /// Returns `(domain_min, domain_max)`.
    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    /// Returns the bin masses in order.
    pub fn masses(&self) -> impl Iterator<Item = f64> + '_ {
        self.bins.iter().map(|b| b.mass)
    }

    /// Returns each bin's share of the total mass. All zeros when the
    /// histogram carries no mass.
    #[must_use]
    pub fn normalized_masses(&self) -> Vec<f64> {
        if self.total_mass.is_finite() && self.total_mass > 0.0 {
            return self.masses().map(|m| m / self.total_mass).collect();
        }
        // The total overflowed; work from the scaled masses instead.
        match self.scaled_masses() {
            Some(scaled) => {
                let total: f64 = scaled.iter().sum();
                scaled.into_iter().map(|m| m / total).collect()
            }
            None => vec![0.0; self.bins.len()],
        }
    }

    /// Returns the masses divided by the largest one, or `None` if the
    /// histogram carries no mass.
    ///
    /// Every value is in `[0, 1]` and their sum is at most the bin count, so
    /// ratios taken from them cannot overflow however large the raw masses
    /// are. An infinite peak keeps only the infinite bins.
    pub(crate) fn scaled_masses(&self) -> Option<Vec<f64>> {
        let peak = self.masses().fold(0.0, f64::max);
        if peak <= 0.0 {
            return None;
        }
        let scaled = if peak.is_finite() {
            self.masses().map(|m| m / peak).collect()
        } else {
            self.masses()
                .map(|m| if m.is_infinite() { 1.0 } else { 0.0 })
                .collect()
        };
        Some(scaled)
    }

    /// Returns the domain shared with `other`, or `None` if the two domains
    /// do not intersect in a span of positive length.
    #[must_use]
    pub fn common_domain(&self, other: &Histogram) -> Option<(f64, f64)> {
        let lower = self.domain_min.max(other.domain_min);
        let upper = self.domain_max.min(other.domain_max);
        (lower < upper).then_some((lower, upper))
    }
}
