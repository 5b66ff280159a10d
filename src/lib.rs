//! Tidy posterior draws
//!
//! Turns flat sampler output (`b[(Intercept) condition:A]`, `sigma`, ...)
//! into long-format tables and summarises them:
//!
//! - [`spec`]: index specifications such as `b[term,group]`, name matching
//!   and reshaping into a [`DrawsTable`]
//! - [`interval`]: grouped point estimates with `qi`/`hdi` intervals
//! - [`compare`]: pairwise contrasts between factor levels
//! - `polars` (feature `polars`): `DataFrame` sources and exports
//!
//! # Example
//!
//! ```rust
//! use tidy_draws::prelude::*;
//!
//! let source = InMemorySource::new()
//!     .with_variable("b[(Intercept) condition:A]", vec![vec![0.9, 1.0, 1.1]])
//!     .with_variable("b[(Intercept) condition:B]", vec![vec![1.9, 2.0, 2.1]]);
//!
//! let table = spread_draws(&source, &["b[term,group]"]).unwrap();
//! let summary = median_qi(&table, &[0.5]).unwrap();
//!
//! assert_eq!(summary.len(), 2);
//! assert_eq!(summary.column("point").unwrap(), vec![1.0, 2.0]);
//! ```

pub use draws_compare as compare;
pub use draws_core as types;
pub use draws_interval as interval;
pub use draws_spec as spec;

#[cfg(feature = "polars")]
pub use draws_polars as polars;

pub use draws_core::{DrawKey, DrawSource, DrawsTable, Error, InMemorySource, Result};

/// Commonly used items
pub mod prelude {
    pub use draws_compare::{compare_levels, ComparisonConfig, ComparisonFn, ComparisonMode};
    pub use draws_core::{
        list_variables, DrawKey, DrawSource, DrawsTable, Error, InMemorySource, Result, VariableDraws,
    };
    pub use draws_interval::{
        mean_hdi, mean_qi, median_hdi, median_qi, mode_hdi, mode_qi, point_interval, Bandwidth,
        DegeneratePolicy, IntervalEstimate, PointEstimate, PointInterval, PointIntervalConfig,
        SummaryTable,
    };
    pub use draws_spec::{
        gather_draws, reshape, spread_draws, CollapsePolicy, IndexSpec, ReshapeOptions, VariableRequest,
    };

    #[cfg(feature = "polars")]
    pub use draws_polars::{DataFrameSource, DrawsFrameExt, IntoDataFrame};
}
