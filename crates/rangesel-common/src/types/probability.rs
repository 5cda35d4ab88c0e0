//! Probability clamping for selectivity values.

use serde::{Deserialize, Serialize};

/// Inclusive range a selectivity estimate is forced into before it reaches
/// the planner.
///
/// The floor is kept above zero so a plan is never costed as producing no
/// rows at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityBounds {
    /// Smallest selectivity ever returned.
    pub min: f64,
    /// Largest selectivity ever returned.
    pub max: f64,
}

impl ProbabilityBounds {
    /// Default floor for estimated selectivities.
    pub const DEFAULT_MIN: f64 = 1.0e-10;

    /// Creates bounds, returning `None` unless `0 <= min <= max <= 1`.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Option<Self> {
        if (0.0..=1.0).contains(&min) && (0.0..=1.0).contains(&max) && min <= max {
            Some(Self { min, max })
        } else {
            None
        }
    }

    /// Clamps `value` into these bounds. NaN maps to the floor.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.max(self.min).min(self.max)
    }

    /// Returns true if `value` lies inside the bounds.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Default for ProbabilityBounds {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bounds_floor_is_nonzero() {
        let bounds = ProbabilityBounds::default();
        assert!(bounds.clamp(0.0) > 0.0);
        assert_eq!(bounds.clamp(2.0), 1.0);
        assert_eq!(bounds.clamp(f64::NAN), bounds.min);
    }

    #[test]
    fn test_bounds_validation() {
        assert!(ProbabilityBounds::new(0.0, 1.0).is_some());
        assert!(ProbabilityBounds::new(0.5, 0.1).is_none());
        assert!(ProbabilityBounds::new(-0.1, 1.0).is_none());
        assert!(ProbabilityBounds::new(0.0, 1.1).is_none());
    }

    proptest! {
        #[test]
        fn test_clamped_values_stay_in_bounds(value in proptest::num::f64::ANY) {
            let bounds = ProbabilityBounds::default();
            prop_assert!(bounds.contains(bounds.clamp(value)));
            let full = ProbabilityBounds::new(0.0, 1.0).unwrap();
            prop_assert!((0.0..=1.0).contains(&full.clamp(value)));
        }
    }
}
