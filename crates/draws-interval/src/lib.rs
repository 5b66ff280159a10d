//! Point and interval summaries of posterior draws
//!
//! Summarises a long-format [`DrawsTable`](draws_core::DrawsTable) into one
//! row per (group, target, width) with a point estimate and an interval:
//!
//! - **Point statistics**: mean, median and mode (KDE argmax for continuous
//!   draws, most frequent value for integral ones)
//! - **Intervals**: equal-tailed quantile intervals (`qi`) and
//!   highest-density intervals (`hdi`)
//!
//! # Example
//!
//! ```rust
//! use draws_core::{draw_keys, DrawsTable};
//! use draws_interval::{point_interval, PointEstimate, PointIntervalConfig};
//!
//! let table = DrawsTable::builder(draw_keys(1, 4))
//!     .index_column("g", ["a", "a", "b", "b"])
//!     .value_column("mu", [1.0, 3.0, 10.0, 30.0])
//!     .build()
//!     .unwrap();
//!
//! let config = PointIntervalConfig::new()
//!     .with_point(PointEstimate::Mean)
//!     .with_widths(&[0.5, 0.95]);
//! let summary = point_interval(&table, &config).unwrap();
//!
//! assert_eq!(summary.len(), 4);
//! assert_eq!(summary.column("point").unwrap(), vec![2.0, 2.0, 20.0, 20.0]);
//! ```
//!
//! # Features
//!
//! - `parallel`: estimate groups on the rayon thread pool. Output order is
//!   unchanged.

pub mod config;
pub mod density;
mod dotplot;
mod estimator;
pub mod interval;
pub mod point;
mod quantile;
mod shortcuts;
pub mod summary;

pub use config::{PointIntervalConfig, DEFAULT_WIDTH};
pub use density::{discrete_mode, is_discrete, mode, Bandwidth, KernelDensity, GRID_POINTS};
pub use dotplot::{dotplot_quantiles, ppoints};
pub use estimator::{normalize_widths, DegeneratePolicy, Estimate, PointInterval};
pub use interval::{hdi, IntervalEstimate};
pub use point::PointEstimate;
pub use quantile::{qi, quantile, quantiles};
pub use shortcuts::{mean_hdi, mean_qi, median_hdi, median_qi, mode_hdi, mode_qi};
pub use summary::{point_interval, GroupFailure, SummaryRow, SummaryTable};
