//! Statistics consumed by range overlap selectivity estimation.
//!
//! This module provides:
//! - Histograms: piecewise-constant distributions over a real domain
//! - Resampling: re-binning a histogram onto an equal-width grid
//! - Similarity: comparing two histograms that share a grid
//! - Stores: where raw histogram arrays are fetched from

mod histogram;
mod overlap;
mod resample;
mod similarity;
mod store;

pub use histogram::{Bin, Histogram};
pub use overlap::overlap_fraction;
pub use resample::TargetGrid;
pub use similarity::{SimilarityScorer, inner_product};
pub use store::{
    AttributeStatistics, InMemoryStatisticsStore, OperatorInfo, RawHistogram, SnapshotEntry,
    StatisticsSnapshot, StatisticsStore,
};
