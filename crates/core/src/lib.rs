//! # MapPress Core
//!
//! Filename classification for the MapPress layout generator.
//!
//! This crate provides:
//! - `Classifier`: product-code lookup over a compiled rule set
//! - `Classification`: the (title, description, units, legend) result
//! - `RuleSet`: the configurable product table, JSON round-trippable
//! - Shared error types for the workspace
//!
//! Classification is pure and total: the rule table is immutable after
//! construction, the same input always yields the same result, and an
//! unknown product degrades to a title-only result instead of an error.

pub mod classify;
pub mod error;

pub use classify::{Classification, Classifier, FixedRule, ParametricRule, RuleSet};
pub use error::{Error, Result};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classify::{Classification, Classifier, RuleSet};
    pub use crate::error::{Error, Result};
}
