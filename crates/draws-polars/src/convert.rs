//! Exporting tables as `DataFrame`s

use crate::error::Result;
use draws_core::{DrawsTable, CHAIN, DRAW, ITERATION};
use draws_interval::{SummaryRow, SummaryTable};
use polars::prelude::*;

/// Column naming the summarised value column in summary frames
pub const TARGET: &str = ".target";
/// Column naming the point statistic in summary frames
pub const POINT: &str = ".point";
/// Column naming the interval statistic in summary frames
pub const INTERVAL: &str = ".interval";

/// Conversion into a polars `DataFrame`
pub trait IntoDataFrame {
    fn to_data_frame(&self) -> Result<DataFrame>;
}

/// Key columns as `i64`, index columns as nullable strings, value columns
/// as nullable `f64`
impl IntoDataFrame for DrawsTable {
    fn to_data_frame(&self) -> Result<DataFrame> {
        let keys = self.keys();
        let mut columns: Vec<Column> = vec![
            Series::new(CHAIN.into(), keys.iter().map(|k| k.chain as i64).collect::<Vec<_>>()).into(),
            Series::new(ITERATION.into(), keys.iter().map(|k| k.iteration as i64).collect::<Vec<_>>()).into(),
            Series::new(DRAW.into(), keys.iter().map(|k| k.draw as i64).collect::<Vec<_>>()).into(),
        ];
        for index in self.index_columns() {
            columns.push(Series::new(index.name().into(), index.values().to_vec()).into());
        }
        for value in self.value_columns() {
            columns.push(Series::new(value.name().into(), value.values().to_vec()).into());
        }
        Ok(DataFrame::new(columns)?)
    }
}

/// Group columns, then `.target`, `point`, `lower`, `upper`, `width`,
/// `.point` and `.interval`
impl IntoDataFrame for SummaryTable {
    fn to_data_frame(&self) -> Result<DataFrame> {
        let rows = self.rows();
        let mut columns: Vec<Column> = Vec::new();
        for (i, name) in self.group_by().iter().enumerate() {
            let values: Vec<Option<String>> = rows.iter().map(|r| r.group[i].clone()).collect();
            columns.push(Series::new(name.as_str().into(), values).into());
        }
        columns.push(text_column(TARGET, rows, |r| r.target.clone()));
        for name in ["point", "lower", "upper", "width"] {
            let values = self.column(name).unwrap_or_default();
            columns.push(Series::new(name.into(), values).into());
        }
        columns.push(text_column(POINT, rows, |r| r.point_estimate.name().to_string()));
        columns.push(text_column(INTERVAL, rows, |r| r.interval_estimate.name().to_string()));
        Ok(DataFrame::new(columns)?)
    }
}

fn text_column(name: &str, rows: &[SummaryRow], f: impl Fn(&SummaryRow) -> String) -> Column {
    Series::new(name.into(), rows.iter().map(f).collect::<Vec<_>>()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use draws_core::draw_keys;
    use draws_interval::median_qi;

    fn table() -> DrawsTable {
        DrawsTable::builder(draw_keys(2, 2))
            .index_column("g", ["a", "a", "b", "b"])
            .nullable_value_column("x", vec![Some(1.0), None, Some(3.0), Some(4.0)])
            .build()
            .unwrap()
    }

    #[test]
    fn test_draws_table_layout() {
        let df = table().to_data_frame().unwrap();
        let names: Vec<&str> = df.get_columns().iter().map(|c| c.name().as_str()).collect();
        assert_eq!(names, vec![".chain", ".iteration", ".draw", "g", "x"]);
        assert_eq!(df.height(), 4);
        assert_eq!(df.column(".draw").unwrap().i64().unwrap().get(3), Some(4));
        assert_eq!(df.column("x").unwrap().f64().unwrap().get(1), None);
        assert_eq!(df.column("g").unwrap().str().unwrap().get(2), Some("b"));
    }

    #[test]
    fn test_summary_layout() {
        let summary = median_qi(&table(), &[0.5, 0.9]).unwrap();
        let df = summary.to_data_frame().unwrap();
        let names: Vec<&str> = df.get_columns().iter().map(|c| c.name().as_str()).collect();
        assert_eq!(
            names,
            vec!["g", ".target", "point", "lower", "upper", "width", ".point", ".interval"]
        );
        assert_eq!(df.height(), 4);
        assert_eq!(df.column(".point").unwrap().str().unwrap().get(0), Some("median"));
        assert_eq!(df.column("point").unwrap().f64().unwrap().get(2), Some(3.5));
    }
}
