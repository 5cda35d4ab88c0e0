//! Fixed-probability estimators.
//!
//! Without the real key distribution there is no good estimate for these
//! predicates. The values are deliberately small so that an index on the
//! attribute still looks attractive to the planner.

use rangesel_common::types::AttributeRef;
use rangesel_core::OperatorInfo;

use super::{JoinContext, JoinSelectivity, RestrictionSelectivity};

/// Family of predicates with a constant estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredicateKind {
    /// Predicates that depend on area, such as box overlap.
    Area,
    /// Strictly left of, right of, above, or below.
    Position,
    /// Contains or is contained by. Tighter than overlap.
    Containment,
}

impl PredicateKind {
    /// All kinds, in registration order.
    pub const ALL: [PredicateKind; 3] = [Self::Area, Self::Position, Self::Containment];

    /// Returns the fixed selectivity for this kind.
    #[must_use]
    pub fn selectivity(self) -> f64 {
        match self {
            Self::Area => 0.005,
            Self::Position => 0.1,
            Self::Containment => 0.001,
        }
    }

    /// Name of the restriction estimator.
    #[must_use]
    pub fn restriction_name(self) -> &'static str {
        match self {
            Self::Area => "areasel",
            Self::Position => "positionsel",
            Self::Containment => "contsel",
        }
    }

    /// Name of the join estimator.
    #[must_use]
    pub fn join_name(self) -> &'static str {
        match self {
            Self::Area => "areajoinsel",
            Self::Position => "positionjoinsel",
            Self::Containment => "contjoinsel",
        }
    }
}

/// Estimator that ignores its inputs and returns the kind's constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantEstimator {
    kind: PredicateKind,
}

impl ConstantEstimator {
    /// Creates the estimator for `kind`.
    #[must_use]
    pub fn new(kind: PredicateKind) -> Self {
        Self { kind }
    }

    /// Returns the predicate kind.
    #[must_use]
    pub fn kind(&self) -> PredicateKind {
        self.kind
    }
}

impl JoinSelectivity for ConstantEstimator {
    fn name(&self) -> &'static str {
        self.kind.join_name()
    }

    fn join_selectivity(
        &self,
        _left: &AttributeRef,
        _right: &AttributeRef,
        _context: &JoinContext,
    ) -> f64 {
        self.kind.selectivity()
    }
}

impl RestrictionSelectivity for ConstantEstimator {
    fn name(&self) -> &'static str {
        self.kind.restriction_name()
    }

    fn restriction_selectivity(&self, _attribute: &AttributeRef, _operator: &OperatorInfo) -> f64 {
        self.kind.selectivity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        let attr = AttributeRef::new("boxes", "b");
        let ctx = JoinContext::default();

        let area = ConstantEstimator::new(PredicateKind::Area);
        assert_eq!(area.join_selectivity(&attr, &attr, &ctx), 0.005);
        assert_eq!(area.restriction_selectivity(&attr, &ctx.operator), 0.005);

        let position = ConstantEstimator::new(PredicateKind::Position);
        assert_eq!(position.join_selectivity(&attr, &attr, &ctx), 0.1);

        let containment = ConstantEstimator::new(PredicateKind::Containment);
        assert_eq!(containment.restriction_selectivity(&attr, &ctx.operator), 0.001);
    }

    #[test]
    fn test_containment_tighter_than_area() {
        assert!(PredicateKind::Containment.selectivity() < PredicateKind::Area.selectivity());
    }

    #[test]
    fn test_names() {
        let est = ConstantEstimator::new(PredicateKind::Position);
        assert_eq!(JoinSelectivity::name(&est), "positionjoinsel");
        assert_eq!(RestrictionSelectivity::name(&est), "positionsel");
    }
}
