//! Error types shared by all Rangesel crates.

use thiserror::Error;

use crate::types::AttributeRef;

/// Result alias used throughout Rangesel.
pub type Result<T> = std::result::Result<T, Error>;

/// Why histogram statistics could not be obtained for an attribute.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatisticsUnavailable {
    /// Nothing has been collected for this attribute.
    #[error("no histogram statistics recorded for {attribute}")]
    NoStatistics {
        /// The attribute that was looked up.
        attribute: AttributeRef,
    },
    /// Statistics exist, but the operator may not look at them.
    #[error("operator {operator} is not permitted to read statistics of {attribute}")]
    PermissionDenied {
        /// The attribute that was looked up.
        attribute: AttributeRef,
        /// Name of the operator whose support function asked.
        operator: String,
    },
}

impl StatisticsUnavailable {
    /// Returns the attribute the failed lookup was for.
    #[must_use]
    pub fn attribute(&self) -> &AttributeRef {
        match self {
            Self::NoStatistics { attribute } | Self::PermissionDenied { attribute, .. } => {
                attribute
            }
        }
    }
}

/// The main error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Raw statistic arrays that break the builder's invariants.
    #[error("malformed statistics: {0}")]
    MalformedStatistics(String),

    /// A resampling grid that cannot be constructed.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    /// Two histograms compared without sharing a grid.
    #[error("histogram shape mismatch: {left} bins vs {right} bins")]
    ShapeMismatch {
        /// Bin count of the left histogram.
        left: usize,
        /// Bin count of the right histogram.
        right: usize,
    },

    /// Statistics could not be fetched.
    #[error(transparent)]
    StatisticsUnavailable(#[from] StatisticsUnavailable),

    /// Invalid estimator configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An attribute reference that does not parse.
    #[error("invalid attribute reference '{0}', expected relation.attribute")]
    InvalidAttributeRef(String),
}
