//! Selectivity estimators.
//!
//! The optimizer talks to estimators only through [`JoinSelectivity`] and
//! [`RestrictionSelectivity`], looking them up by name in an
//! [`EstimatorRegistry`]. Estimators never fail: whatever goes wrong inside
//! one, the planner gets a usable probability back.
//!
//! ## Submodules
//!
//! - [`overlap`] - Histogram-based estimator for range overlap joins
//! - [`constant`] - Fixed-probability estimators for area, position, and
//!   containment predicates
//! - [`registry`] - Name-based lookup of estimators

pub mod constant;
pub mod overlap;
pub mod registry;

pub use constant::{ConstantEstimator, PredicateKind};
pub use overlap::{Estimate, FallbackReason, OverlapJoinEstimator, Side, Stage};
pub use registry::EstimatorRegistry;

use rangesel_common::types::AttributeRef;
use rangesel_core::OperatorInfo;

/// Type of join being estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinType {
    /// Inner join.
    #[default]
    Inner,
    /// Left outer join.
    Left,
    /// Right outer join.
    Right,
    /// Full outer join.
    Full,
    /// Semi join.
    Semi,
    /// Anti join.
    Anti,
}

/// What the optimizer knows about the join whose selectivity it wants.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JoinContext {
    /// The join operator, used to decide whether restricted statistics may
    /// be read.
    pub operator: OperatorInfo,
    /// The join type.
    pub join_type: JoinType,
}

impl JoinContext {
    /// Creates a context for an inner join using `operator`.
    #[must_use]
    pub fn new(operator: OperatorInfo) -> Self {
        Self {
            operator,
            join_type: JoinType::Inner,
        }
    }

    /// Sets the join type.
    #[must_use]
    pub fn with_join_type(mut self, join_type: JoinType) -> Self {
        self.join_type = join_type;
        self
    }
}

/// Estimates the selectivity of a join predicate between two attributes.
pub trait JoinSelectivity: Send + Sync {
    /// Name the estimator is registered under.
    fn name(&self) -> &'static str;

    /// Returns the estimated probability in `[0, 1]` that the predicate
    /// holds for a random pair of rows.
    fn join_selectivity(
        &self,
        left: &AttributeRef,
        right: &AttributeRef,
        context: &JoinContext,
    ) -> f64;
}

/// Estimates the selectivity of a predicate against a constant.
pub trait RestrictionSelectivity: Send + Sync {
    /// Name the estimator is registered under.
    fn name(&self) -> &'static str;

    /// Returns the estimated probability in `[0, 1]` that the predicate
    /// holds for a random row.
    fn restriction_selectivity(&self, attribute: &AttributeRef, operator: &OperatorInfo) -> f64;
}
