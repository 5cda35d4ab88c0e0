//! End-to-end estimation scenarios.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rangesel_common::types::AttributeRef;
use rangesel_common::utils::error::StatisticsUnavailable;
use rangesel_core::{
    AttributeStatistics, InMemoryStatisticsStore, OperatorInfo, RawHistogram, StatisticsStore,
};
use rangesel_engine::{
    Estimate, EstimatorConfig, EstimatorRegistry, FallbackReason, JoinContext,
    OverlapJoinEstimator, Side,
};

fn attr(s: &str) -> AttributeRef {
    s.parse().unwrap()
}

fn stats(boundaries: &[f64], masses: &[f64]) -> AttributeStatistics {
    AttributeStatistics::new(RawHistogram::new(boundaries.to_vec(), masses.to_vec()))
}

/// Store wrapper that records which attributes were asked for.
struct CountingStore {
    inner: InMemoryStatisticsStore,
    fetches: AtomicUsize,
    last: parking_lot::Mutex<Vec<AttributeRef>>,
}

impl CountingStore {
    fn new(inner: InMemoryStatisticsStore) -> Self {
        Self {
            inner,
            fetches: AtomicUsize::new(0),
            last: parking_lot::Mutex::new(Vec::new()),
        }
    }
}

impl StatisticsStore for CountingStore {
    fn fetch_histogram(
        &self,
        attribute: &AttributeRef,
        operator: &OperatorInfo,
    ) -> Result<RawHistogram, StatisticsUnavailable> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.last.lock().push(attribute.clone());
        self.inner.fetch_histogram(attribute, operator)
    }
}

#[test]
fn test_scenario_identical_histograms() {
    let store = InMemoryStatisticsStore::new();
    store.insert(attr("a.during"), stats(&[0.0, 10.0, 20.0], &[5.0, 5.0]));
    store.insert(attr("b.during"), stats(&[0.0, 10.0, 20.0], &[5.0, 5.0]));

    let estimator =
        OverlapJoinEstimator::with_config(store, EstimatorConfig::new().with_bin_count(2))
            .unwrap();
    let selectivity = estimator.estimate_overlap_join_selectivity(
        &attr("a.during"),
        &attr("b.during"),
        &JoinContext::default(),
    );

    assert!((selectivity - 0.5).abs() < 1e-12);
}

#[test]
fn test_scenario_disjoint_domains() {
    let store = InMemoryStatisticsStore::new();
    store.insert(attr("a.during"), stats(&[0.0, 5.0, 10.0], &[3.0, 1.0]));
    store.insert(attr("b.during"), stats(&[20.0, 25.0, 30.0], &[2.0, 2.0]));

    let estimator = OverlapJoinEstimator::new(store);
    let estimate =
        estimator.estimate_detailed(&attr("a.during"), &attr("b.during"), &JoinContext::default());

    assert!(matches!(
        estimate,
        Estimate::Fallback {
            reason: FallbackReason::EmptyOverlapDomain { .. },
            ..
        }
    ));
    assert_eq!(
        estimate.selectivity(),
        EstimatorConfig::DEFAULT_FALLBACK_SELECTIVITY
    );
}

#[test]
fn test_scenario_missing_left_short_circuits() {
    let inner = InMemoryStatisticsStore::new();
    inner.insert(attr("b.during"), stats(&[0.0, 10.0], &[1.0]));
    let store = CountingStore::new(inner);

    let estimator = OverlapJoinEstimator::new(&store);
    let selectivity = estimator.estimate_overlap_join_selectivity(
        &attr("a.during"),
        &attr("b.during"),
        &JoinContext::default(),
    );

    assert_eq!(selectivity, EstimatorConfig::DEFAULT_FALLBACK_SELECTIVITY);
    assert_eq!(store.fetches.load(Ordering::SeqCst), 1);
    assert_eq!(*store.last.lock(), vec![attr("a.during")]);
}

#[test]
fn test_permission_denied_uses_fallback() {
    let store = InMemoryStatisticsStore::new();
    store.insert(attr("a.during"), stats(&[0.0, 10.0], &[1.0]));
    store.insert(
        attr("secret.during"),
        stats(&[0.0, 10.0], &[1.0]).restricted(),
    );
    let config = EstimatorConfig::new().with_fallback_selectivity(0.01);
    let estimator = OverlapJoinEstimator::with_config(store, config).unwrap();

    let ctx = JoinContext::new(OperatorInfo::new("&&"));
    let estimate = estimator.estimate_detailed(&attr("a.during"), &attr("secret.during"), &ctx);
    match estimate {
        Estimate::Fallback { selectivity, reason } => {
            assert_eq!(selectivity, 0.01);
            assert!(matches!(
                reason,
                FallbackReason::StatisticsUnavailable {
                    side: Side::Right,
                    cause: StatisticsUnavailable::PermissionDenied { .. },
                }
            ));
        }
        Estimate::Computed { .. } => panic!("restricted statistics were used"),
    }

    // A leakproof operator may read them
    let ctx = JoinContext::new(OperatorInfo::new("&&").leakproof());
    assert!(
        !estimator
            .estimate_detailed(&attr("a.during"), &attr("secret.during"), &ctx)
            .is_fallback()
    );
}

#[test]
fn test_partial_overlap_stays_in_range() {
    let store = InMemoryStatisticsStore::new();
    store.insert(
        attr("a.during"),
        stats(&[0.0, 10.0, 20.0, 30.0], &[10.0, 30.0, 5.0]),
    );
    store.insert(attr("b.during"), stats(&[15.0, 40.0, 100.0], &[8.0, 1.0]));

    let estimator = OverlapJoinEstimator::new(store);
    let estimate =
        estimator.estimate_detailed(&attr("a.during"), &attr("b.during"), &JoinContext::default());

    match estimate {
        Estimate::Computed {
            selectivity,
            domain,
            bins,
            ..
        } => {
            assert_eq!(domain, (15.0, 30.0));
            assert_eq!(bins, EstimatorConfig::DEFAULT_BIN_COUNT);
            assert!(selectivity > 0.0 && selectivity <= 1.0);
        }
        Estimate::Fallback { reason, .. } => panic!("unexpected fallback: {reason}"),
    }
}

#[test]
fn test_every_outcome_is_a_probability() {
    let store = InMemoryStatisticsStore::new();
    store.insert(attr("a.r"), stats(&[0.0, 1.0, 2.0], &[1.0, 0.0]));
    store.insert(attr("b.r"), stats(&[0.0, 1.0, 2.0], &[0.0, 1.0]));
    store.insert(attr("c.r"), stats(&[0.0, 2.0], &[0.0]));
    store.insert(attr("d.r"), stats(&[0.0, 1.0], &[1.0, 1.0]));
    store.insert(attr("e.r"), stats(&[-1.0e6, 1.0e6], &[1.0e9]));

    let estimator = OverlapJoinEstimator::new(store);
    let names = ["a.r", "b.r", "c.r", "d.r", "e.r", "missing.r"];
    for left in names {
        for right in names {
            let s = estimator.estimate_overlap_join_selectivity(
                &attr(left),
                &attr(right),
                &JoinContext::default(),
            );
            assert!((0.0..=1.0).contains(&s), "{left} x {right} gave {s}");
        }
    }
}

#[test]
fn test_concurrent_planning_sessions() {
    let store = Arc::new(InMemoryStatisticsStore::new());
    store.insert(attr("a.during"), stats(&[0.0, 10.0, 20.0], &[5.0, 5.0]));
    store.insert(attr("b.during"), stats(&[0.0, 10.0, 20.0], &[5.0, 5.0]));

    let registry = Arc::new(
        EstimatorRegistry::with_builtins(
            Arc::clone(&store),
            EstimatorConfig::new().with_bin_count(2),
        )
        .unwrap(),
    );

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                let estimator = registry.join("rangeoverlapsjoinsel").unwrap();
                estimator.join_selectivity(
                    &attr("a.during"),
                    &attr("b.during"),
                    &JoinContext::default(),
                )
            })
        })
        .collect();

    for handle in handles {
        let s = handle.join().unwrap();
        assert!((s - 0.5).abs() < 1e-12);
    }
}
