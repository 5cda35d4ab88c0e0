//! Interval overlap used to move mass between bins.

/// Returns the fraction of `[source_lower, source_upper]` that lies inside
/// `[target_lower, target_upper]`.
///
/// The result is in `[0, 1]`. A zero-length source span yields 0, so a
/// degenerate source bin never contributes mass to any target.
#[must_use]
pub fn overlap_fraction(
    target_lower: f64,
    target_upper: f64,
    source_lower: f64,
    source_upper: f64,
) -> f64 {
    let mut source_len = source_upper - source_lower;
    let mut covered = target_upper.min(source_upper) - target_lower.max(source_lower);
    if !source_len.is_finite() {
        // Spans wider than f64::MAX: compare half-lengths instead.
        source_len = source_upper / 2.0 - source_lower / 2.0;
        covered = target_upper.min(source_upper) / 2.0 - target_lower.max(source_lower) / 2.0;
    }
    if source_len <= 0.0 || covered <= 0.0 {
        return 0.0;
    }

    (covered / source_len).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contained_source_is_full() {
        assert_eq!(overlap_fraction(0.0, 10.0, 2.0, 4.0), 1.0);
        assert_eq!(overlap_fraction(0.0, 10.0, 0.0, 10.0), 1.0);
    }

    #[test]
    fn test_disjoint_is_zero() {
        assert_eq!(overlap_fraction(0.0, 10.0, 20.0, 30.0), 0.0);
        assert_eq!(overlap_fraction(20.0, 30.0, 0.0, 10.0), 0.0);
        // Touching edges share no length
        assert_eq!(overlap_fraction(0.0, 10.0, 10.0, 20.0), 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        // Source [5, 15] against target [0, 10]: half of the source is inside
        assert!((overlap_fraction(0.0, 10.0, 5.0, 15.0) - 0.5).abs() < 1e-12);
        // Target inside source: target length over source length
        assert!((overlap_fraction(2.0, 3.0, 0.0, 4.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_zero_length_source() {
        assert_eq!(overlap_fraction(0.0, 10.0, 5.0, 5.0), 0.0);
    }

    #[test]
    fn test_zero_length_target() {
        assert_eq!(overlap_fraction(5.0, 5.0, 0.0, 10.0), 0.0);
    }

    #[test]
    fn test_span_wider_than_f64_max() {
        let fraction = overlap_fraction(0.0, 1e308, -1e308, 1e308);
        assert!((fraction - 0.5).abs() < 1e-12);
        assert_eq!(overlap_fraction(-1e308, 1e308, -1e308, 1e308), 1.0);
    }
}
