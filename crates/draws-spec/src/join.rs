//! Natural full outer join of draws tables
//!
//! Rows are matched on the draw key plus every index column the two tables
//! share (string equality, missing equals missing). Index columns present on
//! one side only are broadcast: with no shared index columns every row of a
//! draw on the left pairs with every row of the same draw on the right.
//! Unmatched rows from either side are kept with the other side's columns
//! missing.

use draws_core::{DrawKey, DrawsTable, IndexColumn, JoinError, Result, ValueColumn};
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};

/// Join two tables on the draw key and their shared index columns
#[instrument(skip_all, fields(left_rows = left.len(), right_rows = right.len()))]
pub fn natural_join(left: &DrawsTable, right: &DrawsTable) -> Result<DrawsTable> {
    check_columns(left, right)?;

    let shared: Vec<&str> = left
        .index_names()
        .into_iter()
        .filter(|name| right.index_column(name).is_some())
        .collect();
    let right_only: Vec<&IndexColumn> = right
        .index_columns()
        .iter()
        .filter(|c| left.index_column(c.name()).is_none())
        .collect();
    debug!(shared = ?shared, "joining on shared index columns");

    let shared_left: Vec<&IndexColumn> = shared.iter().filter_map(|n| left.index_column(n)).collect();
    let shared_right: Vec<&IndexColumn> = shared.iter().filter_map(|n| right.index_column(n)).collect();
    let same_cell = |l: usize, r: usize| {
        shared_left
            .iter()
            .zip(&shared_right)
            .all(|(lc, rc)| lc.values()[l] == rc.values()[r])
    };

    let right_by_key = rows_by_key(right);
    let mut pairs: Vec<Pair> = Vec::new();

    for (key, left_rows) in ordered_rows_by_key(left) {
        let right_rows = right_by_key.get(&key).map(Vec::as_slice).unwrap_or(&[]);
        let mut right_matched = vec![false; right_rows.len()];
        for &l in &left_rows {
            let mut matched = false;
            for (j, &r) in right_rows.iter().enumerate() {
                if same_cell(l, r) {
                    pairs.push((key, Some(l), Some(r)));
                    right_matched[j] = true;
                    matched = true;
                }
            }
            if !matched {
                pairs.push((key, Some(l), None));
            }
        }
        pairs.extend(
            right_rows
                .iter()
                .zip(&right_matched)
                .filter(|(_, m)| !**m)
                .map(|(&r, _)| (key, None, Some(r))),
        );
    }

    let left_keys: HashSet<DrawKey> = left.keys().iter().copied().collect();
    pairs.extend(
        right
            .keys()
            .iter()
            .enumerate()
            .filter(|(_, k)| !left_keys.contains(*k))
            .map(|(r, k)| (*k, None, Some(r))),
    );

    assemble(left, right, &right_only, &pairs)
}

/// Output row: draw key, left row, right row
type Pair = (DrawKey, Option<usize>, Option<usize>);

fn check_columns(left: &DrawsTable, right: &DrawsTable) -> Result<()> {
    for name in left.index_names() {
        if right.value_column(name).is_some() {
            return Err(JoinError::ColumnKindConflict { column: name.to_string() }.into());
        }
    }
    for name in right.index_names() {
        if left.value_column(name).is_some() {
            return Err(JoinError::ColumnKindConflict { column: name.to_string() }.into());
        }
    }
    for name in left.value_names() {
        if right.value_column(name).is_some() {
            return Err(JoinError::DuplicateValueColumn { column: name.to_string() }.into());
        }
    }
    Ok(())
}

fn rows_by_key(table: &DrawsTable) -> HashMap<DrawKey, Vec<usize>> {
    let mut map: HashMap<DrawKey, Vec<usize>> = HashMap::new();
    for (row, key) in table.keys().iter().enumerate() {
        map.entry(*key).or_default().push(row);
    }
    map
}

fn ordered_rows_by_key(table: &DrawsTable) -> Vec<(DrawKey, Vec<usize>)> {
    let mut order: Vec<(DrawKey, Vec<usize>)> = Vec::new();
    let mut lookup: HashMap<DrawKey, usize> = HashMap::new();
    for (row, key) in table.keys().iter().enumerate() {
        match lookup.get(key) {
            Some(&i) => order[i].1.push(row),
            None => {
                lookup.insert(*key, order.len());
                order.push((*key, vec![row]));
            }
        }
    }
    order
}

fn assemble(
    left: &DrawsTable,
    right: &DrawsTable,
    right_only: &[&IndexColumn],
    pairs: &[Pair],
) -> Result<DrawsTable> {
    let keys: Vec<DrawKey> = pairs.iter().map(|&(key, _, _)| key).collect();

    let mut index: Vec<IndexColumn> = left
        .index_columns()
        .iter()
        .map(|lc| {
            let rc = right.index_column(lc.name());
            let values = pairs
                .iter()
                .map(|&(_, l, r)| match (l, r, rc) {
                    (Some(l), _, _) => lc.values()[l].clone(),
                    (None, Some(r), Some(rc)) => rc.values()[r].clone(),
                    _ => None,
                })
                .collect();
            IndexColumn::new(lc.name(), values)
        })
        .collect();
    index.extend(right_only.iter().map(|rc| {
        let values = pairs.iter().map(|&(_, _, r)| r.and_then(|r| rc.values()[r].clone())).collect();
        IndexColumn::new(rc.name(), values)
    }));

    let mut values: Vec<ValueColumn> = left
        .value_columns()
        .iter()
        .map(|c| ValueColumn::new(c.name(), pairs.iter().map(|&(_, l, _)| l.and_then(|l| c.values()[l])).collect()))
        .collect();
    values.extend(right.value_columns().iter().map(|c| {
        ValueColumn::new(c.name(), pairs.iter().map(|&(_, _, r)| r.and_then(|r| c.values()[r])).collect())
    }));

    DrawsTable::new(keys, index, values)
}
