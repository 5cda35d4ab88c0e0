//! Histogram-based selectivity for range overlap joins.
//!
//! Each side's histogram is fetched, both are cut down to the domain they
//! share and resampled onto one equal-width grid, and their similarity
//! becomes the estimate:
//!
//! ```text
//! FetchLeft ─> FetchRight ─> Resample ─> Score ─> Done
//!     │            │            │
//!     └────────────┴────────────┴──> Fallback (fixed selectivity)
//! ```
//!
//! Every histogram lives only for the duration of one call.

use std::fmt;

use thiserror::Error;

use rangesel_common::types::AttributeRef;
use rangesel_common::utils::error::{Error, Result, StatisticsUnavailable};
use rangesel_core::{Histogram, SimilarityScorer, StatisticsStore, TargetGrid};

use super::{JoinContext, JoinSelectivity};
use crate::config::EstimatorConfig;

/// Which side of the join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Left operand.
    Left,
    /// Right operand.
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// Pipeline stages of one estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Fetching the left histogram.
    FetchLeft,
    /// Fetching the right histogram.
    FetchRight,
    /// Resampling both histograms onto the common domain.
    Resample,
    /// Scoring the resampled histograms.
    Score,
}

impl Stage {
    fn fetch(side: Side) -> Self {
        match side {
            Side::Left => Self::FetchLeft,
            Side::Right => Self::FetchRight,
        }
    }
}

/// Why an estimation ended in the fallback selectivity.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FallbackReason {
    /// A side has no usable statistics.
    #[error("{side} statistics unavailable: {cause}")]
    StatisticsUnavailable {
        /// The side that failed.
        side: Side,
        /// Why.
        cause: StatisticsUnavailable,
    },
    /// A side's stored arrays are corrupt.
    #[error("{side} statistics malformed: {message}")]
    MalformedStatistics {
        /// The side that failed.
        side: Side,
        /// Builder error message.
        message: String,
    },
    /// The two domains share no span.
    #[error("histogram domains do not overlap: [{lower}, {upper}]")]
    EmptyOverlapDomain {
        /// Larger lower bound.
        lower: f64,
        /// Smaller upper bound.
        upper: f64,
    },
    /// Resampling or scoring failed unexpectedly.
    #[error("internal estimation error during {stage:?}: {message}")]
    Internal {
        /// The stage that failed.
        stage: Stage,
        /// Underlying error message.
        message: String,
    },
}

impl FallbackReason {
    /// Returns the stage the pipeline was in when it gave up.
    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            Self::StatisticsUnavailable { side, .. } | Self::MalformedStatistics { side, .. } => {
                Stage::fetch(*side)
            }
            Self::EmptyOverlapDomain { .. } => Stage::Resample,
            Self::Internal { stage, .. } => *stage,
        }
    }
}

/// Outcome of one estimation.
#[derive(Debug, Clone, PartialEq)]
pub enum Estimate {
    /// Both histograms were usable.
    Computed {
        /// Clamped selectivity.
        selectivity: f64,
        /// Inner product of the resampled masses.
        raw_similarity: f64,
        /// Common domain both sides were resampled onto.
        domain: (f64, f64),
        /// Bin count of the shared grid.
        bins: usize,
    },
    /// Estimation could not proceed.
    Fallback {
        /// The configured fallback selectivity.
        selectivity: f64,
        /// What went wrong.
        reason: FallbackReason,
    },
}

impl Estimate {
    /// Returns the selectivity, whichever way it was reached.
    #[must_use]
    pub fn selectivity(&self) -> f64 {
        match self {
            Self::Computed { selectivity, .. } | Self::Fallback { selectivity, .. } => *selectivity,
        }
    }

    /// Returns true if the fallback was used.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Estimates `left && right` join selectivity from histogram similarity.
///
/// Stateless between calls, so one instance can serve many planning
/// sessions at once.
pub struct OverlapJoinEstimator<S> {
    store: S,
    config: EstimatorConfig,
    scorer: SimilarityScorer,
}

impl<S: StatisticsStore> OverlapJoinEstimator<S> {
    /// Name the estimator is registered under.
    pub const NAME: &'static str = "rangeoverlapsjoinsel";

    /// Creates an estimator with the default configuration.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: EstimatorConfig::default(),
            scorer: SimilarityScorer::default(),
        }
    }

    /// Creates an estimator with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn with_config(store: S, config: EstimatorConfig) -> Result<Self> {
        config.validate()?;
        let scorer = SimilarityScorer::new(config.bounds()?);
        Ok(Self {
            store,
            config,
            scorer,
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Returns the statistics store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the estimated selectivity of `left && right`.
    ///
    /// Always a probability; falls back to the configured constant when the
    /// histograms cannot be used.
    #[must_use]
    pub fn estimate_overlap_join_selectivity(
        &self,
        left: &AttributeRef,
        right: &AttributeRef,
        context: &JoinContext,
    ) -> f64 {
        self.estimate_detailed(left, right, context).selectivity()
    }

    /// Runs the estimation and reports how it ended.
    #[must_use]
    pub fn estimate_detailed(
        &self,
        left: &AttributeRef,
        right: &AttributeRef,
        context: &JoinContext,
    ) -> Estimate {
        tracing::debug!(
            %left, %right, operator = %context.operator.name, join_type = ?context.join_type,
            "estimating range overlap join selectivity"
        );

        match self.run(left, right, context) {
            Ok(estimate) => {
                tracing::debug!(selectivity = estimate.selectivity(), "estimate computed");
                estimate
            }
            Err(reason) => {
                match &reason {
                    FallbackReason::MalformedStatistics { .. } | FallbackReason::Internal { .. } => {
                        tracing::error!("Falling back to default selectivity: {}", reason);
                    }
                    _ => tracing::warn!("Falling back to default selectivity: {}", reason),
                }
                Estimate::Fallback {
                    selectivity: self.config.fallback_selectivity,
                    reason,
                }
            }
        }
    }

    fn run(
        &self,
        left: &AttributeRef,
        right: &AttributeRef,
        context: &JoinContext,
    ) -> std::result::Result<Estimate, FallbackReason> {
        // The right side is not looked at until the left one is usable.
        let left_hist = self.fetch(Side::Left, left, context)?;
        let right_hist = self.fetch(Side::Right, right, context)?;

        let (lower, upper) = left_hist.common_domain(&right_hist).ok_or_else(|| {
            FallbackReason::EmptyOverlapDomain {
                lower: left_hist.domain_min().max(right_hist.domain_min()),
                upper: left_hist.domain_max().min(right_hist.domain_max()),
            }
        })?;

        let grid = TargetGrid::new(lower, upper, self.config.bin_count)
            .map_err(|e| internal(Stage::Resample, e))?;
        tracing::debug!(
            lower, upper, bins = grid.bins(),
            left_bins = left_hist.len(), right_bins = right_hist.len(),
            "resampling onto common domain"
        );
        let left_resampled = left_hist.resample(&grid);
        let right_resampled = right_hist.resample(&grid);

        let raw_similarity =
            rangesel_core::statistics::inner_product(&left_resampled, &right_resampled)
                .map_err(|e| internal(Stage::Score, e))?;
        let selectivity = self
            .scorer
            .score(&left_resampled, &right_resampled)
            .map_err(|e| internal(Stage::Score, e))?;

        Ok(Estimate::Computed {
            selectivity,
            raw_similarity,
            domain: (lower, upper),
            bins: grid.bins(),
        })
    }

    fn fetch(
        &self,
        side: Side,
        attribute: &AttributeRef,
        context: &JoinContext,
    ) -> std::result::Result<Histogram, FallbackReason> {
        tracing::trace!(stage = ?Stage::fetch(side), %attribute, "fetching histogram");
        let raw = self
            .store
            .fetch_histogram(attribute, &context.operator)
            .map_err(|cause| FallbackReason::StatisticsUnavailable { side, cause })?;
        raw.build()
            .map_err(|e| FallbackReason::MalformedStatistics {
                side,
                message: match e {
                    Error::MalformedStatistics(message) => message,
                    other => other.to_string(),
                },
            })
    }
}

fn internal(stage: Stage, e: Error) -> FallbackReason {
    FallbackReason::Internal {
        stage,
        message: e.to_string(),
    }
}

impl<S: StatisticsStore> JoinSelectivity for OverlapJoinEstimator<S> {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn join_selectivity(
        &self,
        left: &AttributeRef,
        right: &AttributeRef,
        context: &JoinContext,
    ) -> f64 {
        self.estimate_overlap_join_selectivity(left, right, context)
    }
}
