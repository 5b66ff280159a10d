//! Core types for tidying posterior draws
//!
//! This crate provides the shared vocabulary of the tidy-draws workspace:
//!
//! - [`DrawSource`]: the contract a model-fitting back end has to satisfy
//! - [`DrawsTable`]: the long-format, row-per-draw table every other crate
//!   consumes and produces
//! - [`Error`]: the error taxonomy (parse, join, grouping, estimation)
//!
//! # Example
//!
//! ```rust
//! use draws_core::{list_variables, DrawSource, InMemorySource};
//!
//! let source = InMemorySource::new()
//!     .with_variable("mu", vec![vec![0.1, 0.2], vec![0.3, 0.4]])
//!     .with_variable("b[1]", vec![vec![1.0, 1.1], vec![1.2, 1.3]]);
//!
//! assert_eq!(list_variables(&source).unwrap(), vec!["mu", "b[1]"]);
//! assert_eq!(source.draws("mu").unwrap().n_draws(), 4);
//! ```

pub mod error;
pub mod source;
pub mod table;
pub mod utils;

pub use error::{EstimationError, Error, GroupingError, JoinError, ParseError, Result};
pub use source::{list_variables, DrawSource, InMemorySource, VariableDraws};
pub use table::{
    draw_keys, DrawKey, DrawsTable, DrawsTableBuilder, IndexColumn, RowView, ValueColumn, CHAIN,
    DRAW, ITERATION, RESERVED_COLUMNS, VALUE, VARIABLE,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
