//! Where histogram statistics come from.
//!
//! The estimator only sees the [`StatisticsStore`] trait. The in-memory
//! implementation here backs tests and the CLI; a catalog-backed store would
//! implement the same trait.

use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use rangesel_common::types::AttributeRef;
use rangesel_common::utils::error::{Result, StatisticsUnavailable};

use super::histogram::Histogram;

/// The operator whose support function is asking for statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorInfo {
    /// Operator name, e.g. `&&`.
    pub name: String,
    /// Whether the operator's implementation is known not to leak argument
    /// values. Leakproof operators may read restricted statistics.
    pub leakproof: bool,
}

impl OperatorInfo {
    /// Creates operator info for a non-leakproof operator.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            leakproof: false,
        }
    }

    /// Marks the operator as leakproof.
    #[must_use]
    pub fn leakproof(mut self) -> Self {
        self.leakproof = true;
        self
    }
}

impl Default for OperatorInfo {
    fn default() -> Self {
        Self::new("&&")
    }
}

/// Raw histogram arrays as stored: `B + 1` boundaries and `B` masses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawHistogram {
    /// Bin boundaries.
    pub boundaries: Vec<f64>,
    /// Per-bin masses.
    pub masses: Vec<f64>,
}

impl RawHistogram {
    /// Creates raw histogram arrays.
    #[must_use]
    pub fn new(boundaries: Vec<f64>, masses: Vec<f64>) -> Self {
        Self { boundaries, masses }
    }

    /// Builds a [`Histogram`] from these arrays.
    ///
    /// # Errors
    ///
    /// Returns `MalformedStatistics` if the arrays break the builder's
    /// invariants.
    pub fn build(&self) -> Result<Histogram> {
        Histogram::build(&self.boundaries, &self.masses)
    }
}

/// Source of per-attribute histogram statistics.
pub trait StatisticsStore: Send + Sync {
    /// Fetches the raw histogram for `attribute` on behalf of `operator`.
    ///
    /// # Errors
    ///
    /// Returns [`StatisticsUnavailable`] if nothing was collected for the
    /// attribute or the operator may not read it.
    fn fetch_histogram(
        &self,
        attribute: &AttributeRef,
        operator: &OperatorInfo,
    ) -> std::result::Result<RawHistogram, StatisticsUnavailable>;
}

impl<S: StatisticsStore + ?Sized> StatisticsStore for Arc<S> {
    fn fetch_histogram(
        &self,
        attribute: &AttributeRef,
        operator: &OperatorInfo,
    ) -> std::result::Result<RawHistogram, StatisticsUnavailable> {
        (**self).fetch_histogram(attribute, operator)
    }
}

impl<S: StatisticsStore + ?Sized> StatisticsStore for &S {
    fn fetch_histogram(
        &self,
        attribute: &AttributeRef,
        operator: &OperatorInfo,
    ) -> std::result::Result<RawHistogram, StatisticsUnavailable> {
        (**self).fetch_histogram(attribute, operator)
    }
}

/// Statistics recorded for one attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeStatistics {
    /// The histogram arrays.
    #[serde(flatten)]
    pub histogram: RawHistogram,
    /// Whether the attribute's values are hidden from the current user, in
    /// which case only leakproof operators may use the histogram.
    #[serde(default)]
    pub restricted: bool,
}

impl AttributeStatistics {
    /// Creates unrestricted statistics.
    #[must_use]
    pub fn new(histogram: RawHistogram) -> Self {
        Self {
            histogram,
            restricted: false,
        }
    }

    /// Marks the statistics as restricted.
    #[must_use]
    pub fn restricted(mut self) -> Self {
        self.restricted = true;
        self
    }
}

/// One entry of a [`StatisticsSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    /// Relation name.
    pub relation: String,
    /// Attribute name.
    pub attribute: String,
    /// Recorded statistics.
    #[serde(flatten)]
    pub statistics: AttributeStatistics,
}

/// Serializable dump of a statistics store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSnapshot {
    /// All recorded attributes.
    #[serde(default)]
    pub attributes: Vec<SnapshotEntry>,
}

/// Thread-safe in-memory statistics store.
///
/// Readers (planning sessions) and writers (whoever refreshes statistics)
/// may use it concurrently; each fetch hands out an owned copy.
#[derive(Debug, Default)]
pub struct InMemoryStatisticsStore {
    entries: RwLock<HashMap<AttributeRef, AttributeStatistics>>,
}

impl InMemoryStatisticsStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding every entry of `snapshot`. Later entries for
    /// the same attribute replace earlier ones.
    #[must_use]
    pub fn from_snapshot(snapshot: StatisticsSnapshot) -> Self {
        let store = Self::new();
        for entry in snapshot.attributes {
            store.insert(
                AttributeRef::new(entry.relation, entry.attribute),
                entry.statistics,
            );
        }
        store
    }

    /// Returns a snapshot of the store, sorted by attribute.
    #[must_use]
    pub fn snapshot(&self) -> StatisticsSnapshot {
        let entries = self.entries.read();
        let mut attributes: Vec<_> = entries
            .iter()
            .map(|(attr, stats)| SnapshotEntry {
                relation: attr.relation.clone(),
                attribute: attr.attribute.clone(),
                statistics: stats.clone(),
            })
            .collect();
        attributes.sort_by(|a, b| {
            (a.relation.as_str(), a.attribute.as_str())
                .cmp(&(b.relation.as_str(), b.attribute.as_str()))
        });
        StatisticsSnapshot { attributes }
    }

    /// Records statistics for an attribute, returning what was there before.
    pub fn insert(
        &self,
        attribute: AttributeRef,
        statistics: AttributeStatistics,
    ) -> Option<AttributeStatistics> {
        self.entries.write().insert(attribute, statistics)
    }

    /// Removes the statistics for an attribute.
    pub fn remove(&self, attribute: &AttributeRef) -> Option<AttributeStatistics> {
        self.entries.write().remove(attribute)
    }

    /// Returns the statistics recorded for an attribute, ignoring access
    /// restrictions.
    #[must_use]
    pub fn get(&self, attribute: &AttributeRef) -> Option<AttributeStatistics> {
        self.entries.read().get(attribute).cloned()
    }

    /// Returns all attributes with statistics, sorted.
    #[must_use]
    pub fn attributes(&self) -> Vec<AttributeRef> {
        let mut attrs: Vec<_> = self.entries.read().keys().cloned().collect();
        attrs.sort();
        attrs
    }

    /// Returns the number of attributes with statistics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if no statistics are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl StatisticsStore for InMemoryStatisticsStore {
    fn fetch_histogram(
        &self,
        attribute: &AttributeRef,
        operator: &OperatorInfo,
    ) -> std::result::Result<RawHistogram, StatisticsUnavailable> {
        let entries = self.entries.read();
        let stats = entries
            .get(attribute)
            .ok_or_else(|| StatisticsUnavailable::NoStatistics {
                attribute: attribute.clone(),
            })?;

        if stats.restricted && !operator.leakproof {
            return Err(StatisticsUnavailable::PermissionDenied {
                attribute: attribute.clone(),
                operator: operator.name.clone(),
            });
        }

        Ok(stats.histogram.clone())
    }
}
