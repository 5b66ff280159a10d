//! Extension methods on long-format `DataFrame`s

use crate::columns::{column_kind, floats, positive_integers, require, strings, ColumnKind};
use crate::convert::IntoDataFrame;
use crate::error::Result;
use draws_compare::{compare_levels, ComparisonConfig};
use draws_core::{DrawKey, DrawsTable, IndexColumn, ValueColumn, CHAIN, DRAW, ITERATION};
use draws_interval::{point_interval, PointIntervalConfig};
use polars::prelude::*;

/// Operations on frames laid out like [`DrawsTable`]: `.chain`,
/// `.iteration` and `.draw` integer columns, string index columns and
/// numeric value columns
pub trait DrawsFrameExt {
    /// Convert to a [`DrawsTable`]. String columns become index columns,
    /// numeric columns value columns; other dtypes are rejected.
    fn to_draws_table(&self) -> Result<DrawsTable>;

    /// Grouped point-interval summary as a frame
    fn point_interval(&self, config: &PointIntervalConfig) -> Result<DataFrame>;

    /// Level comparisons as a frame
    fn compare_levels(&self, value: &str, by: &str, config: &ComparisonConfig) -> Result<DataFrame>;
}

impl DrawsFrameExt for DataFrame {
    fn to_draws_table(&self) -> Result<DrawsTable> {
        let chain = positive_integers(require(self, CHAIN)?)?;
        let iteration = positive_integers(require(self, ITERATION)?)?;
        let draw = positive_integers(require(self, DRAW)?)?;
        let keys: Vec<DrawKey> = chain
            .into_iter()
            .zip(iteration)
            .zip(draw)
            .map(|((c, i), d)| DrawKey::new(c, i, d))
            .collect();

        let mut index = Vec::new();
        let mut values = Vec::new();
        for column in self.get_columns() {
            match column_kind(column)? {
                ColumnKind::Key => {}
                ColumnKind::Index => index.push(IndexColumn::new(column.name().as_str(), strings(column)?)),
                ColumnKind::Value => values.push(ValueColumn::new(column.name().as_str(), floats(column)?)),
            }
        }
        Ok(DrawsTable::new(keys, index, values)?)
    }

    fn point_interval(&self, config: &PointIntervalConfig) -> Result<DataFrame> {
        point_interval(&self.to_draws_table()?, config)?.to_data_frame()
    }

    fn compare_levels(&self, value: &str, by: &str, config: &ComparisonConfig) -> Result<DataFrame> {
        compare_levels(&self.to_draws_table()?, value, by, config)?.to_data_frame()
    }
}
