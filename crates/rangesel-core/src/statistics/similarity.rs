//! Similarity between histograms sharing one grid.

use rangesel_common::types::ProbabilityBounds;
use rangesel_common::utils::error::{Error, Result};

use super::histogram::Histogram;

/// Returns the inner product of the two histograms' bin masses.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if the bin counts differ.
pub fn inner_product(a: &Histogram, b: &Histogram) -> Result<f64> {
    if a.len() != b.len() {
        return Err(Error::ShapeMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a.masses().zip(b.masses()).map(|(x, y)| x * y).sum())
}

/// Turns the similarity of two resampled histograms into a selectivity.
///
/// The normalized score is `Σ aᵢ·bᵢ / (Σa · Σb)`: the chance that a value
/// drawn from each distribution lands in the same bin. It is symmetric, and
/// for non-negative masses it never exceeds 1; a histogram scores exactly 1
/// against itself only when all of its mass sits in a single bin.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityScorer {
    bounds: ProbabilityBounds,
}

impl SimilarityScorer {
    /// Creates a scorer clamping into `bounds`.
    #[must_use]
    pub fn new(bounds: ProbabilityBounds) -> Self {
        Self { bounds }
    }

    /// Returns the clamp bounds.
    #[must_use]
    pub fn bounds(&self) -> ProbabilityBounds {
        self.bounds
    }

    /// Returns the unclamped normalized similarity.
    ///
    /// Zero when either histogram carries no mass. The ratio does not depend
    /// on the scale of the masses, so both sides are scaled down before
    /// multiplying and huge masses cannot overflow into NaN.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if the bin counts differ.
    pub fn normalized(&self, a: &Histogram, b: &Histogram) -> Result<f64> {
        if a.len() != b.len() {
            return Err(Error::ShapeMismatch {
                left: a.len(),
                right: b.len(),
            });
        }
        let (Some(a), Some(b)) = (a.scaled_masses(), b.scaled_masses()) else {
            return Ok(0.0);
        };
        let total_a: f64 = a.iter().sum();
        let total_b: f64 = b.iter().sum();
        let product: f64 = a.iter().zip(&b).map(|(x, y)| x * y).sum();
        Ok(product / (total_a * total_b))
    }

    /// Returns the normalized similarity clamped into the scorer's bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if the bin counts differ.
    pub fn score(&self, a: &Histogram, b: &Histogram) -> Result<f64> {
        Ok(self.bounds.clamp(self.normalized(a, b)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hist(masses: &[f64]) -> Histogram {
        let boundaries: Vec<f64> = (0..=masses.len()).map(|i| i as f64).collect();
        Histogram::build(&boundaries, masses).unwrap()
    }

    #[test]
    fn test_inner_product() {
        let a = hist(&[1.0, 2.0, 3.0]);
        let b = hist(&[4.0, 5.0, 6.0]);
        assert!((inner_product(&a, &b).unwrap() - 32.0).abs() < 1e-12);
    }

    #[test]
    fn test_shape_mismatch() {
        let a = hist(&[1.0, 2.0]);
        let b = hist(&[1.0, 2.0, 3.0]);
        assert!(matches!(
            inner_product(&a, &b),
            Err(Error::ShapeMismatch { left: 2, right: 3 })
        ));
        assert!(SimilarityScorer::default().score(&a, &b).is_err());
    }

    #[test]
    fn test_two_equal_halves_score_half() {
        let a = hist(&[5.0, 5.0]);
        let score = SimilarityScorer::default().score(&a, &a).unwrap();
        assert!((score - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_symmetry() {
        let a = hist(&[1.0, 0.0, 7.0, 2.0]);
        let b = hist(&[3.0, 3.0, 1.0, 0.5]);
        let scorer = SimilarityScorer::default();
        assert_eq!(scorer.score(&a, &b).unwrap(), scorer.score(&b, &a).unwrap());
    }

    #[test]
    fn test_single_bin_mass_scores_one() {
        let a = hist(&[0.0, 4.0, 0.0]);
        let score = SimilarityScorer::default().score(&a, &a).unwrap();
        assert!((score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_disjoint_mass_hits_floor() {
        let a = hist(&[1.0, 0.0]);
        let b = hist(&[0.0, 1.0]);
        let scorer = SimilarityScorer::default();
        assert_eq!(scorer.normalized(&a, &b).unwrap(), 0.0);
        assert_eq!(scorer.score(&a, &b).unwrap(), scorer.bounds().min);
    }

    #[test]
    fn test_massless_histogram_does_not_divide_by_zero() {
        let a = hist(&[0.0, 0.0]);
        let b = hist(&[1.0, 1.0]);
        let scorer = SimilarityScorer::default();
        assert_eq!(scorer.normalized(&a, &b).unwrap(), 0.0);
        assert!(scorer.score(&a, &b).unwrap() > 0.0);
    }

    #[test]
    fn test_huge_masses_score_like_small_ones() {
        let scorer = SimilarityScorer::default();
        for mass in [1e200, f64::MAX] {
            let a = hist(&[mass, mass]);
            let score = scorer.score(&a, &a).unwrap();
            assert!((score - 0.5).abs() < 1e-12, "mass {mass} scored {score}");
        }

        let a = hist(&[1e300, 3e300]);
        let b = hist(&[1.0, 3.0]);
        let expected = scorer.score(&b, &b).unwrap();
        assert!((scorer.score(&a, &b).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_custom_bounds() {
        let bounds = ProbabilityBounds::new(0.01, 0.2).unwrap();
        let a = hist(&[5.0, 5.0]);
        let score = SimilarityScorer::new(bounds).score(&a, &a).unwrap();
        assert_eq!(score, 0.2);
    }
}
