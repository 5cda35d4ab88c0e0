//! # rangesel-common
//!
//! Foundation layer for Rangesel: types, errors, and small numeric helpers.
//!
//! This crate provides the building blocks used by all other Rangesel
//! crates. It has no internal dependencies and should be kept minimal.
//!
//! ## Modules
//!
//! - [`types`] - Core type definitions (AttributeRef, probability bounds)
//! - [`utils`] - Utility functions and helpers (errors)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod types;
pub mod utils;

// Re-export commonly used types at crate root
pub use types::{AttributeRef, ProbabilityBounds};
pub use utils::error::{Error, Result, StatisticsUnavailable};
