//! # rangesel-engine
//!
//! Selectivity estimation for range predicates, as called by a cost-based
//! optimizer.
//!
//! ## Modules
//!
//! - [`config`] - Estimator configuration
//! - [`selectivity`] - The estimator capability, the histogram-based overlap
//!   join estimator, constant estimators, and the registry

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod selectivity;

pub use config::EstimatorConfig;
pub use selectivity::{
    ConstantEstimator, Estimate, EstimatorRegistry, FallbackReason, JoinContext, JoinSelectivity,
    JoinType, OverlapJoinEstimator, PredicateKind, RestrictionSelectivity, Side, Stage,
};
