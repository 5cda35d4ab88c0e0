//! Name-based lookup of selectivity estimators.

use std::sync::Arc;

use hashbrown::HashMap;

use rangesel_common::utils::error::Result;
use rangesel_core::StatisticsStore;

use super::constant::{ConstantEstimator, PredicateKind};
use super::overlap::OverlapJoinEstimator;
use super::{JoinSelectivity, RestrictionSelectivity};
use crate::config::EstimatorConfig;

/// Estimators indexed by the name an operator refers to them by.
#[derive(Default, Clone)]
pub struct EstimatorRegistry {
    join: HashMap<&'static str, Arc<dyn JoinSelectivity>>,
    restriction: HashMap<&'static str, Arc<dyn RestrictionSelectivity>>,
}

impl EstimatorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the overlap join estimator over `store`
    /// and all constant estimators.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` does not validate.
    pub fn with_builtins<S>(store: S, config: EstimatorConfig) -> Result<Self>
    where
        S: StatisticsStore + 'static,
    {
        let mut registry = Self::new();
        registry.register_join(Arc::new(OverlapJoinEstimator::with_config(store, config)?));
        for kind in PredicateKind::ALL {
            let estimator = Arc::new(ConstantEstimator::new(kind));
            registry.register_join(estimator.clone());
            registry.register_restriction(estimator);
        }
        Ok(registry)
    }

    /// Registers a join estimator under its own name, replacing any previous
    /// one.
    pub fn register_join(&mut self, estimator: Arc<dyn JoinSelectivity>) {
        self.join.insert(estimator.name(), estimator);
    }

    /// Registers a restriction estimator under its own name.
    pub fn register_restriction(&mut self, estimator: Arc<dyn RestrictionSelectivity>) {
        self.restriction.insert(estimator.name(), estimator);
    }

    /// Looks up a join estimator.
    #[must_use]
    pub fn join(&self, name: &str) -> Option<Arc<dyn JoinSelectivity>> {
        self.join.get(name).cloned()
    }

    /// Looks up a restriction estimator.
    #[must_use]
    pub fn restriction(&self, name: &str) -> Option<Arc<dyn RestrictionSelectivity>> {
        self.restriction.get(name).cloned()
    }

    /// Returns the names of all join estimators, sorted.
    #[must_use]
    pub fn join_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.join.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Returns the names of all restriction estimators, sorted.
    #[must_use]
    pub fn restriction_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.restriction.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for EstimatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EstimatorRegistry")
            .field("join", &self.join_names())
            .field("restriction", &self.restriction_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selectivity::JoinContext;
    use rangesel_common::types::AttributeRef;
    use rangesel_core::InMemoryStatisticsStore;

    #[test]
    fn test_builtins_registered() {
        let registry = EstimatorRegistry::with_builtins(
            Arc::new(InMemoryStatisticsStore::new()),
            EstimatorConfig::default(),
        )
        .unwrap();

        assert_eq!(
            registry.join_names(),
            vec!["areajoinsel", "contjoinsel", "positionjoinsel", "rangeoverlapsjoinsel"]
        );
        assert_eq!(
            registry.restriction_names(),
            vec!["areasel", "contsel", "positionsel"]
        );
    }

    #[test]
    fn test_dispatch_by_name() {
        let registry = EstimatorRegistry::with_builtins(
            Arc::new(InMemoryStatisticsStore::new()),
            EstimatorConfig::default(),
        )
        .unwrap();
        let attr = AttributeRef::new("boxes", "b");
        let ctx = JoinContext::default();

        let contjoinsel = registry.join("contjoinsel").unwrap();
        assert_eq!(contjoinsel.join_selectivity(&attr, &attr, &ctx), 0.001);

        let positionsel = registry.restriction("positionsel").unwrap();
        assert_eq!(positionsel.restriction_selectivity(&attr, &ctx.operator), 0.1);

        assert!(registry.join("eqjoinsel").is_none());
    }

    #[test]
    fn test_invalid_config_propagates() {
        let result = EstimatorRegistry::with_builtins(
            Arc::new(InMemoryStatisticsStore::new()),
            EstimatorConfig::new().with_bin_count(0),
        );
        assert!(result.is_err());
    }
}
