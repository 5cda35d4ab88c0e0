//! # rangesel-core
//!
//! Core layer for Rangesel: histograms and the statistics they come from.
//!
//! This crate holds everything with real numeric content. It depends only
//! on `rangesel-common`.
//!
//! ## Modules
//!
//! - [`statistics`] - Histogram model, resampling, similarity scoring, and
//!   the statistics store interface

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod statistics;

// Re-export commonly used types
pub use statistics::{
    AttributeStatistics, Bin, Histogram, InMemoryStatisticsStore, OperatorInfo, RawHistogram,
    SimilarityScorer, StatisticsSnapshot, StatisticsStore, TargetGrid, overlap_fraction,
};
