//! Core type definitions for Rangesel.
//!
//! - Attribute identifiers ([`AttributeRef`])
//! - Probability handling ([`ProbabilityBounds`])

mod attribute;
mod probability;

pub use attribute::AttributeRef;
pub use probability::ProbabilityBounds;
