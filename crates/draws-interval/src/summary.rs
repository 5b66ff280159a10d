//! Grouped point-interval summaries of a draws table

use crate::config::PointIntervalConfig;
use crate::estimator::{Estimate, SampleContext};
use crate::interval::IntervalEstimate;
use crate::point::PointEstimate;
use draws_core::{DrawsTable, Error, GroupingError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Label used for a missing group value in error messages
const MISSING_LABEL: &str = "NA";

/// One (group, target, width) summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// Values of the group columns, in [`SummaryTable::group_by`] order
    pub group: Vec<Option<String>>,
    pub target: String,
    pub point: f64,
    pub lower: f64,
    pub upper: f64,
    pub width: f64,
    pub point_estimate: PointEstimate,
    pub interval_estimate: IntervalEstimate,
}

/// A (group, target) pair that could not be summarised
#[derive(Debug, Clone, PartialEq)]
pub struct GroupFailure {
    pub group: Vec<Option<String>>,
    pub target: String,
    pub error: Error,
}

/// Result of [`point_interval`]
///
/// Rows are ordered by group first appearance, then target order, then
/// ascending width.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SummaryTable {
    group_by: Vec<String>,
    rows: Vec<SummaryRow>,
    failures: Vec<GroupFailure>,
}

impl SummaryTable {
    pub fn group_by(&self) -> &[String] {
        &self.group_by
    }

    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    /// Pairs skipped under `skip_failing_groups`
    pub fn failures(&self) -> &[GroupFailure] {
        &self.failures
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SummaryRow> {
        self.rows.iter()
    }

    /// A numeric column by name: `point`, `lower`, `upper` or `width`
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let field: fn(&SummaryRow) -> f64 = match name {
            "point" => |r: &SummaryRow| r.point,
            "lower" => |r: &SummaryRow| r.lower,
            "upper" => |r: &SummaryRow| r.upper,
            "width" => |r: &SummaryRow| r.width,
            _ => return None,
        };
        Some(self.rows.iter().map(field).collect())
    }

    /// Values of one group column
    pub fn group_values(&self, column: &str) -> Option<Vec<Option<&str>>> {
        let i = self.group_by.iter().position(|c| c == column)?;
        Some(self.rows.iter().map(|r| r.group[i].as_deref()).collect())
    }
}

impl<'a> IntoIterator for &'a SummaryTable {
    type Item = &'a SummaryRow;
    type IntoIter = std::slice::Iter<'a, SummaryRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Summarise every (group, target) pair of `table` at every configured width
///
/// Grouping uses `config.group_by`, or every index column when unset. The
/// target is `config.targets`, or the table's single value column.
#[instrument(skip_all, fields(rows = table.len(), point = %config.estimator.point, interval = %config.estimator.interval))]
pub fn point_interval(table: &DrawsTable, config: &PointIntervalConfig) -> Result<SummaryTable> {
    let widths = config.validated_widths()?;
    let targets = resolve_targets(table, &config.targets)?;
    let group_by: Vec<String> = match &config.group_by {
        Some(columns) => columns.clone(),
        None => table.index_names().into_iter().map(str::to_string).collect(),
    };
    let group_refs: Vec<&str> = group_by.iter().map(String::as_str).collect();
    let mut groups = table.group_rows(&group_refs)?;
    if groups.is_empty() {
        // An empty table is still one (empty) group
        groups.push((vec![None; group_by.len()], Vec::new()));
    }
    debug!(n_groups = groups.len(), n_targets = targets.len(), "summarising draws");

    let tasks: Vec<(usize, &str)> = (0..groups.len())
        .flat_map(|g| targets.iter().map(move |t| (g, t.as_str())))
        .collect();

    let run = |&(g, target): &(usize, &str)| -> Result<Vec<Estimate>> {
        let (key, rows) = &groups[g];
        let column = table
            .value_column(target)
            .ok_or_else(|| Error::unknown_column(target, "value"))?;
        let values: Vec<f64> = rows.iter().filter_map(|&r| column.get(r)).collect();
        let labels = group_labels(key);
        let context = SampleContext {
            target,
            group: &labels,
        };
        config.estimator.summarise_sample(&values, &widths, &context)
    };

    #[cfg(feature = "parallel")]
    let outcomes: Vec<Result<Vec<Estimate>>> = {
        use rayon::prelude::*;
        tasks.par_iter().map(run).collect()
    };
    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<Result<Vec<Estimate>>> = tasks.iter().map(run).collect();

    let mut summary = SummaryTable {
        group_by,
        rows: Vec::with_capacity(tasks.len() * widths.len()),
        failures: Vec::new(),
    };
    for (&(g, target), outcome) in tasks.iter().zip(outcomes) {
        let group = &groups[g].0;
        match outcome {
            Ok(estimates) => summary.rows.extend(estimates.into_iter().map(|e| SummaryRow {
                group: group.clone(),
                target: target.to_string(),
                point: e.point,
                lower: e.lower,
                upper: e.upper,
                width: e.width,
                point_estimate: config.estimator.point,
                interval_estimate: config.estimator.interval,
            })),
            Err(error) if config.skip_failing_groups => {
                warn!(variable = target, group = ?group, %error, "skipping group");
                summary.failures.push(GroupFailure {
                    group: group.clone(),
                    target: target.to_string(),
                    error,
                });
            }
            Err(error) => return Err(error),
        }
    }
    Ok(summary)
}

fn resolve_targets(table: &DrawsTable, requested: &[String]) -> Result<Vec<String>> {
    if !requested.is_empty() {
        for target in requested {
            if table.value_column(target).is_none() {
                return Err(Error::unknown_column(target, "value"));
            }
        }
        return Ok(requested.to_vec());
    }
    match table.value_names().as_slice() {
        [] => Err(GroupingError::NoTarget.into()),
        [only] => Ok(vec![only.to_string()]),
        many => Err(GroupingError::AmbiguousTarget {
            candidates: many.iter().map(|s| s.to_string()).collect(),
        }
        .into()),
    }
}

fn group_labels(key: &[Option<String>]) -> Vec<String> {
    key.iter()
        .map(|v| v.clone().unwrap_or_else(|| MISSING_LABEL.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::density::Bandwidth;
    use draws_core::{draw_keys, EstimationError};

    fn grouped_table() -> DrawsTable {
        // 4 draws for each of two groups, interleaved
        DrawsTable::builder(draw_keys(1, 8))
            .index_column("g", ["a", "b", "a", "b", "a", "b", "a", "b"])
            .value_column("x", [1.0, 10.0, 2.0, 20.0, 3.0, 30.0, 4.0, 40.0])
            .build()
            .unwrap()
    }

    #[test]
    fn test_group_order_and_values() {
        let config = PointIntervalConfig::new().with_widths(&[0.5]);
        let summary = point_interval(&grouped_table(), &config).unwrap();

        assert_eq!(summary.group_by(), ["g".to_string()]);
        assert_eq!(summary.group_values("g").unwrap(), vec![Some("a"), Some("b")]);
        assert_eq!(summary.column("point").unwrap(), vec![2.5, 25.0]);
        assert_eq!(summary.column("lower").unwrap(), vec![1.75, 17.5]);
        assert_eq!(summary.column("upper").unwrap(), vec![3.25, 32.5]);
        assert!(summary.column("nope").is_none());
    }

    #[test]
    fn test_rows_ordered_by_width_within_group() {
        let config = PointIntervalConfig::new().with_widths(&[0.9, 0.5]);
        let summary = point_interval(&grouped_table(), &config).unwrap();
        assert_eq!(summary.column("width").unwrap(), vec![0.5, 0.9, 0.5, 0.9]);
    }

    #[test]
    fn test_explicit_empty_grouping() {
        let config = PointIntervalConfig::new()
            .group_by(Vec::<String>::new())
            .with_point(PointEstimate::Mean);
        let summary = point_interval(&grouped_table(), &config).unwrap();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary.rows()[0].point, 13.75);
        assert!(summary.rows()[0].group.is_empty());
    }

    #[test]
    fn test_invalid_width_before_work() {
        let config = PointIntervalConfig::new().with_widths(&[1.2]);
        assert!(matches!(
            point_interval(&DrawsTable::default(), &config),
            Err(Error::Estimation(EstimationError::InvalidWidth { .. }))
        ));
    }

    #[test]
    fn test_target_resolution() {
        let two = DrawsTable::builder(draw_keys(1, 2))
            .value_column("x", [1.0, 2.0])
            .value_column("y", [3.0, 4.0])
            .build()
            .unwrap();
        let none = DrawsTable::builder(draw_keys(1, 2))
            .index_column("g", ["a", "b"])
            .build()
            .unwrap();
        let config = PointIntervalConfig::new();

        assert!(matches!(
            point_interval(&two, &config),
            Err(Error::Grouping(GroupingError::AmbiguousTarget { .. }))
        ));
        assert!(matches!(
            point_interval(&none, &config),
            Err(Error::Grouping(GroupingError::NoTarget))
        ));
        assert!(matches!(
            point_interval(&two, &config.clone().with_target("z")),
            Err(Error::Grouping(GroupingError::UnknownColumn { kind: "value", .. }))
        ));
        let both = point_interval(&two, &config.with_targets(["y", "x"])).unwrap();
        assert_eq!(both.iter().map(|r| r.target.as_str()).collect::<Vec<_>>(), vec!["y", "x"]);
    }

    #[test]
    fn test_unknown_group_column() {
        let config = PointIntervalConfig::new().group_by(["x"]);
        assert!(matches!(
            point_interval(&grouped_table(), &config),
            Err(Error::Grouping(GroupingError::UnknownColumn { kind: "index", .. }))
        ));
    }

    fn table_with_missing_group() -> DrawsTable {
        DrawsTable::builder(draw_keys(1, 4))
            .index_column("g", ["a", "a", "b", "b"])
            .nullable_value_column("x", vec![Some(1.0), Some(2.0), None, None])
            .build()
            .unwrap()
    }

    #[test]
    fn test_no_draws_aborts_by_default() {
        let err = point_interval(&table_with_missing_group(), &PointIntervalConfig::new()).unwrap_err();
        assert_eq!(
            err,
            Error::Estimation(EstimationError::NoDraws {
                target: "x".to_string(),
                group: vec!["b".to_string()],
            })
        );
    }

    #[test]
    fn test_skip_failing_groups() {
        let config = PointIntervalConfig::new().skip_failing_groups(true);
        let summary = point_interval(&table_with_missing_group(), &config).unwrap();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary.failures().len(), 1);
        assert_eq!(summary.failures()[0].group, vec![Some("b".to_string())]);
    }

    #[test]
    fn test_empty_table_has_no_draws() {
        let empty = DrawsTable::builder(Vec::new())
            .value_column("x", Vec::<f64>::new())
            .build()
            .unwrap();
        let config = PointIntervalConfig::new().with_target("x");

        assert_eq!(
            point_interval(&empty, &config).unwrap_err(),
            Error::Estimation(EstimationError::NoDraws {
                target: "x".to_string(),
                group: vec![],
            })
        );

        let skipped = point_interval(&empty, &config.skip_failing_groups(true)).unwrap();
        assert!(skipped.is_empty());
        assert_eq!(skipped.failures().len(), 1);
    }

    #[test]
    fn test_mode_hdi_on_discrete_draws() {
        let table = DrawsTable::builder(draw_keys(1, 6))
            .value_column("k", [1.0, 2.0, 2.0, 2.0, 3.0, 9.0])
            .build()
            .unwrap();
        let config = PointIntervalConfig::new()
            .with_point(PointEstimate::Mode)
            .with_interval(IntervalEstimate::Hdi)
            .with_bandwidth(Bandwidth::Silverman)
            .with_widths(&[0.5]);
        let binding = point_interval(&table, &config).unwrap();
        let row = &binding.rows()[0];
        assert_eq!(row.point, 2.0);
        assert_eq!((row.lower, row.upper), (2.0, 2.0));
        assert_eq!(row.point_estimate, PointEstimate::Mode);
    }
}
