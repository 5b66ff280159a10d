//! Named point/interval combinations
//!
//! Each pairing is available both as a [`PointInterval`] constructor for
//! plain slices and as a free function over a table with default grouping.

use crate::config::PointIntervalConfig;
use crate::estimator::PointInterval;
use crate::interval::IntervalEstimate;
use crate::point::PointEstimate;
use crate::summary::{point_interval, SummaryTable};
use draws_core::{DrawsTable, Result};

macro_rules! shortcut {
    ($name:ident, $point:ident, $interval:ident, $doc:literal) => {
        impl PointInterval {
            #[doc = $doc]
            pub fn $name() -> Self {
                Self::new(PointEstimate::$point, IntervalEstimate::$interval)
            }
        }

        #[doc = $doc]
        ///
        /// Groups by every index column and summarises the table's single
        /// value column at each of `widths`.
        pub fn $name(table: &DrawsTable, widths: &[f64]) -> Result<SummaryTable> {
            let config = PointIntervalConfig::new()
                .with_estimator(PointInterval::$name())
                .with_widths(widths);
            point_interval(table, &config)
        }
    };
}

shortcut!(mean_qi, Mean, Qi, "Mean with an equal-tailed interval");
shortcut!(median_qi, Median, Qi, "Median with an equal-tailed interval");
shortcut!(mode_qi, Mode, Qi, "Mode with an equal-tailed interval");
shortcut!(mean_hdi, Mean, Hdi, "Mean with a highest-density interval");
shortcut!(median_hdi, Median, Hdi, "Median with a highest-density interval");
shortcut!(mode_hdi, Mode, Hdi, "Mode with a highest-density interval");
