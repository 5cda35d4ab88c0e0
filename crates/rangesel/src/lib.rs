//! # Rangesel
//!
//! Selectivity estimation for overlap joins between range-valued attributes.
//!
//! If you're new here, start with [`OverlapJoinEstimator`]. Give it a
//! [`StatisticsStore`] holding each attribute's histogram and it tells the
//! planner how likely `left && right` is for a random pair of rows. When
//! statistics are missing, hidden, or useless it returns a small fixed
//! selectivity instead of failing.
//!
//! ## Pieces
//!
//! | Type | Role |
//! | ---- | ---- |
//! | [`Histogram`] | Piecewise-constant distribution built from raw arrays |
//! | [`TargetGrid`] | Equal-width grid histograms are resampled onto |
//! | [`SimilarityScorer`] | Normalized inner product of two resampled histograms |
//! | [`OverlapJoinEstimator`] | Fetch, resample, score, clamp |
//! | [`EstimatorRegistry`] | Estimators looked up by name |
//!
//! ## Quick Start
//!
//! ```rust
//! use rangesel::{
//!     AttributeRef, AttributeStatistics, EstimatorConfig, InMemoryStatisticsStore,
//!     JoinContext, OverlapJoinEstimator, RawHistogram,
//! };
//!
//! let store = InMemoryStatisticsStore::new();
//! for name in ["bookings.during", "rooms.open"] {
//!     store.insert(
//!         name.parse()?,
//!         AttributeStatistics::new(RawHistogram::new(vec![0.0, 10.0, 20.0], vec![5.0, 5.0])),
//!     );
//! }
//!
//! let estimator =
//!     OverlapJoinEstimator::with_config(store, EstimatorConfig::new().with_bin_count(2))?;
//! let selectivity = estimator.estimate_overlap_join_selectivity(
//!     &"bookings.during".parse::<AttributeRef>()?,
//!     &"rooms.open".parse::<AttributeRef>()?,
//!     &JoinContext::default(),
//! );
//! assert!((selectivity - 0.5).abs() < 1e-12);
//! # Ok::<(), rangesel::Error>(())
//! ```

// Re-export the estimator API
pub use rangesel_engine::{
    ConstantEstimator, Estimate, EstimatorConfig, EstimatorRegistry, FallbackReason, JoinContext,
    JoinSelectivity, JoinType, OverlapJoinEstimator, PredicateKind, RestrictionSelectivity,
};

// Re-export the histogram model and statistics store
pub use rangesel_core::{
    AttributeStatistics, Bin, Histogram, InMemoryStatisticsStore, OperatorInfo, RawHistogram,
    SimilarityScorer, StatisticsSnapshot, StatisticsStore, TargetGrid, overlap_fraction,
};

// Re-export common types
pub use rangesel_common::{AttributeRef, Error, ProbabilityBounds, Result, StatisticsUnavailable};
