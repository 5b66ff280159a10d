//! Polars interop for posterior draws
//!
//! - [`DataFrameSource`] reads wide draws frames (one column per flat
//!   variable) as a [`DrawSource`](draws_core::DrawSource)
//! - [`IntoDataFrame`] exports [`DrawsTable`](draws_core::DrawsTable) and
//!   [`SummaryTable`](draws_interval::SummaryTable) as frames
//! - [`DrawsFrameExt`] reads long frames back and summarises them in place
//!
//! # Example
//!
//! ```rust
//! use draws_polars::{DataFrameSource, DrawsFrameExt, IntoDataFrame};
//! use draws_interval::PointIntervalConfig;
//! use draws_spec::spread_draws;
//! use polars::prelude::*;
//!
//! let wide = df![
//!     ".chain" => [1i64, 1, 1],
//!     ".iteration" => [1i64, 2, 3],
//!     "mu[a]" => [1.0, 2.0, 3.0],
//!     "mu[b]" => [10.0, 20.0, 30.0],
//! ]
//! .unwrap();
//!
//! let source = DataFrameSource::new(wide).unwrap();
//! let long = spread_draws(&source, &["mu[arm]"]).unwrap().to_data_frame().unwrap();
//! let summary = long.point_interval(&PointIntervalConfig::new()).unwrap();
//!
//! assert_eq!(summary.height(), 2);
//! assert_eq!(summary.column("point").unwrap().f64().unwrap().get(1), Some(20.0));
//! ```

mod columns;
mod convert;
mod error;
mod ext;
mod source;

pub use convert::{IntoDataFrame, INTERVAL, POINT, TARGET};
pub use error::{Error, Result};
pub use ext::DrawsFrameExt;
pub use source::DataFrameSource;
