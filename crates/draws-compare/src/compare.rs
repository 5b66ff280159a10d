//! Pairwise comparisons of factor levels within draws

use crate::config::{ComparisonConfig, ComparisonMode};
use draws_core::{DrawKey, DrawsTable, Error, GroupingError, IndexColumn, Result, ValueColumn};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Compare the levels of index column `by` on value column `value`
///
/// Rows are matched on the draw key and every other index column. Each
/// compared pair `(a, b)` yields one row per matched cell, with `by`
/// replaced by the label `"a - b"` (or the configured function's symbol)
/// and `value` holding `f(a, b)`. Cells missing either level produce no
/// row. Other value columns are dropped.
///
/// ```rust
/// use draws_compare::{compare_levels, ComparisonConfig};
/// use draws_core::{draw_keys, DrawsTable};
///
/// let keys: Vec<_> = draw_keys(1, 2).into_iter().flat_map(|k| [k, k]).collect();
/// let table = DrawsTable::builder(keys)
///     .index_column("arm", ["A", "B", "A", "B"])
///     .value_column("mu", [1.0, 3.0, 2.0, 5.0])
///     .build()
///     .unwrap();
///
/// let diffs = compare_levels(&table, "mu", "arm", &ComparisonConfig::default()).unwrap();
/// assert_eq!(diffs.index_column("arm").unwrap().levels(), vec!["B - A"]);
/// assert_eq!(diffs.value_column("mu").unwrap().values(), &[Some(2.0), Some(3.0)]);
/// ```
#[instrument(skip(table, config), fields(rows = table.len(), mode = ?config.mode))]
pub fn compare_levels(table: &DrawsTable, value: &str, by: &str, config: &ComparisonConfig) -> Result<DrawsTable> {
    let values = table
        .value_column(value)
        .ok_or_else(|| Error::unknown_column(value, "value"))?;
    let factor = table
        .index_column(by)
        .ok_or_else(|| Error::unknown_column(by, "index"))?;

    let levels = resolve_levels(factor, config.levels.as_deref())?;
    let pairs = level_pairs(&levels, by, &config.mode)?;
    debug!(n_levels = levels.len(), n_pairs = pairs.len(), "comparing levels");

    let others: Vec<&IndexColumn> = table.index_columns().iter().filter(|c| c.name() != by).collect();
    let cells = collect_cells(table, factor, &levels, &others)?;

    let mut keys: Vec<DrawKey> = Vec::new();
    let mut labels: Vec<Option<String>> = Vec::new();
    let mut out_values: Vec<Option<f64>> = Vec::new();
    let mut source_rows: Vec<usize> = Vec::new();

    for &(a, b) in &pairs {
        let label = config.function.label(&levels[a], &levels[b]);
        for cell in &cells {
            let (Some(ra), Some(rb)) = (cell.rows[a], cell.rows[b]) else {
                continue;
            };
            let (Some(va), Some(vb)) = (values.get(ra), values.get(rb)) else {
                continue;
            };
            keys.push(cell.key);
            labels.push(Some(label.clone()));
            out_values.push(Some(config.function.apply(va, vb)));
            source_rows.push(ra);
        }
    }

    let index = table
        .index_columns()
        .iter()
        .map(|c| {
            if c.name() == by {
                IndexColumn::new(by, labels.clone())
            } else {
                IndexColumn::new(c.name(), source_rows.iter().map(|&r| c.values()[r].clone()).collect())
            }
        })
        .collect();
    DrawsTable::new(keys, index, vec![ValueColumn::new(value, out_values)])
}

/// Rows of one (draw key, other index values) cell, one slot per level
struct Cell {
    key: DrawKey,
    rows: Vec<Option<usize>>,
}

fn resolve_levels(factor: &IndexColumn, explicit: Option<&[String]>) -> Result<Vec<String>> {
    let present = factor.levels();
    match explicit {
        None => Ok(present.into_iter().map(str::to_string).collect()),
        Some(levels) => {
            for (i, level) in levels.iter().enumerate() {
                if levels[..i].contains(level) {
                    return Err(Error::InvalidInput(format!(
                        "level `{level}` of `{}` is listed twice",
                        factor.name()
                    )));
                }
                if !present.contains(&level.as_str()) {
                    return Err(GroupingError::UnknownLevel {
                        column: factor.name().to_string(),
                        level: level.clone(),
                    }
                    .into());
                }
            }
            Ok(levels.to_vec())
        }
    }
}

/// Index pairs `(a, b)` compared as `f(a, b)`
fn level_pairs(levels: &[String], by: &str, mode: &ComparisonMode) -> Result<Vec<(usize, usize)>> {
    let k = levels.len();
    let pairs = match mode {
        ComparisonMode::AllPairs => (0..k).flat_map(|i| (i + 1..k).map(move |j| (j, i))).collect(),
        ComparisonMode::OrderedPairs => (0..k)
            .flat_map(|i| (0..k).filter(move |&j| j != i).map(move |j| (i, j)))
            .collect(),
        ComparisonMode::Consecutive => (1..k).map(|i| (i, i - 1)).collect(),
        ComparisonMode::Control(control) => {
            let c = levels
                .iter()
                .position(|l| l == control)
                .ok_or_else(|| GroupingError::UnknownLevel {
                    column: by.to_string(),
                    level: control.clone(),
                })?;
            (0..k).filter(|&i| i != c).map(|i| (i, c)).collect()
        }
    };
    Ok(pairs)
}

fn collect_cells(
    table: &DrawsTable,
    factor: &IndexColumn,
    levels: &[String],
    others: &[&IndexColumn],
) -> Result<Vec<Cell>> {
    let level_index: HashMap<&str, usize> = levels.iter().enumerate().map(|(i, l)| (l.as_str(), i)).collect();
    let mut cells: Vec<Cell> = Vec::new();
    let mut lookup: HashMap<(DrawKey, Vec<Option<&str>>), usize> = HashMap::new();

    for (row, key) in table.keys().iter().enumerate() {
        let Some(level) = factor.get(row).and_then(|l| level_index.get(l).copied()) else {
            continue;
        };
        let context: Vec<Option<&str>> = others.iter().map(|c| c.get(row)).collect();
        let cell = *lookup.entry((*key, context)).or_insert_with(|| {
            cells.push(Cell {
                key: *key,
                rows: vec![None; levels.len()],
            });
            cells.len() - 1
        });
        if cells[cell].rows[level].is_some() {
            return Err(GroupingError::DuplicateLevel {
                column: factor.name().to_string(),
                level: levels[level].clone(),
                draw: key.draw,
            }
            .into());
        }
        cells[cell].rows[level] = Some(row);
    }
    Ok(cells)
}
