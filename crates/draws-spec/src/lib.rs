//! Index-specification parsing and reshaping of posterior draws
//!
//! Samplers flatten indexed parameters into names such as `b[1,2]` or
//! `b[(Intercept) condition:A]`. This crate parses index specifications
//! (`b[term,group]`), matches them against those flat names and pivots the
//! draws into a long-format [`DrawsTable`](draws_core::DrawsTable).
//!
//! # Example
//!
//! ```rust
//! use draws_core::InMemorySource;
//! use draws_spec::{reshape, ReshapeOptions, VariableRequest};
//!
//! let source = InMemorySource::new()
//!     .with_variable("b[(Intercept) condition:A]", vec![vec![0.1, 0.2], vec![0.3, 0.4]])
//!     .with_variable("b[(Intercept) condition:B]", vec![vec![1.1, 1.2], vec![1.3, 1.4]]);
//!
//! let request = VariableRequest::parse("b[term,group]").unwrap();
//! let table = reshape(&source, &[request], &ReshapeOptions::default()).unwrap();
//!
//! assert_eq!(table.len(), 8);
//! assert_eq!(table.index_column("group").unwrap().levels(), vec!["condition:A", "condition:B"]);
//! ```

pub mod index_spec;
pub mod join;
pub mod matcher;
pub mod options;
pub mod reshape;

pub use index_spec::{IndexSpec, MatchMode, VariableRequest};
pub use join::natural_join;
pub use matcher::{
    match_indexed_name, separator_regex, split_indices, IndexedName, NameMatcher, DEFAULT_SEPARATOR,
};
pub use options::{CollapsePolicy, ReshapeOptions};
pub use reshape::{gather_draws, reshape, spread_draws};

// Discoverability lives next to the reshaper
pub use draws_core::list_variables;
