//! Pairwise comparison of factor levels across posterior draws
//!
//! Given a long-format table, a value column and an index column acting as
//! a factor, [`compare_levels`] matches draws of different levels (same
//! draw key and same values of every other index column) and emits one row
//! per draw per compared pair, e.g. `"B - A"`.

mod compare;
mod config;

pub use compare::compare_levels;
pub use config::{ComparisonConfig, ComparisonFn, ComparisonMode};
