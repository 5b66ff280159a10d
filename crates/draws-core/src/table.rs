//! Long-format draws table
//!
//! A [`DrawsTable`] is columnar: one [`DrawKey`] per row, any number of
//! string-valued index columns and numeric value columns. Cells may be
//! missing after a full outer join, so both column kinds store `Option`s.
//! Tables are immutable once built; every transformation returns a new table.

use crate::error::{Error, JoinError, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Reserved column name for the chain number
pub const CHAIN: &str = ".chain";
/// Reserved column name for the iteration number within a chain
pub const ITERATION: &str = ".iteration";
/// Reserved column name for the global draw number
pub const DRAW: &str = ".draw";
/// Index column produced when value columns are stacked
pub const VARIABLE: &str = ".variable";
/// Value column produced when value columns are stacked
pub const VALUE: &str = ".value";

/// Names that can never be used for index or value columns
pub const RESERVED_COLUMNS: [&str; 3] = [CHAIN, ITERATION, DRAW];

/// Identifies a single posterior draw. All fields are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DrawKey {
    pub chain: usize,
    pub iteration: usize,
    /// Global draw number, consecutive across chains
    pub draw: usize,
}

impl DrawKey {
    pub fn new(chain: usize, iteration: usize, draw: usize) -> Self {
        Self {
            chain,
            iteration,
            draw,
        }
    }
}

/// A string-valued index column
#[derive(Debug, Clone, PartialEq)]
pub struct IndexColumn {
    name: String,
    values: Vec<Option<String>>,
}

impl IndexColumn {
    pub fn new(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Option<String>] {
        &self.values
    }

    pub fn get(&self, row: usize) -> Option<&str> {
        self.values.get(row).and_then(|v| v.as_deref())
    }

    /// Distinct non-missing values in order of first appearance
    pub fn levels(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.values
            .iter()
            .flatten()
            .filter(|v| seen.insert(v.as_str()))
            .map(|v| v.as_str())
            .collect()
    }
}

/// A numeric value column
#[derive(Debug, Clone, PartialEq)]
pub struct ValueColumn {
    name: String,
    values: Vec<Option<f64>>,
}

impl ValueColumn {
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn get(&self, row: usize) -> Option<f64> {
        self.values.get(row).copied().flatten()
    }
}

/// Long-format table with one row per draw and index tuple
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DrawsTable {
    keys: Vec<DrawKey>,
    index: Vec<IndexColumn>,
    values: Vec<ValueColumn>,
}

impl DrawsTable {
    /// Create a table, checking column lengths and name uniqueness
    pub fn new(keys: Vec<DrawKey>, index: Vec<IndexColumn>, values: Vec<ValueColumn>) -> Result<Self> {
        let mut names = HashSet::new();
        let all_names = index
            .iter()
            .map(|c| (c.name(), c.values.len()))
            .chain(values.iter().map(|c| (c.name(), c.values.len())));
        for (name, len) in all_names {
            if RESERVED_COLUMNS.contains(&name) {
                return Err(Error::InvalidInput(format!(
                    "column name `{name}` is reserved"
                )));
            }
            if !names.insert(name) {
                return Err(Error::InvalidInput(format!("duplicate column `{name}`")));
            }
            if len != keys.len() {
                return Err(Error::InvalidInput(format!(
                    "column `{name}` has {len} rows, expected {}",
                    keys.len()
                )));
            }
        }
        Ok(Self {
            keys,
            index,
            values,
        })
    }

    pub fn builder(keys: Vec<DrawKey>) -> DrawsTableBuilder {
        DrawsTableBuilder {
            keys,
            index: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[DrawKey] {
        &self.keys
    }

    pub fn index_columns(&self) -> &[IndexColumn] {
        &self.index
    }

    pub fn value_columns(&self) -> &[ValueColumn] {
        &self.values
    }

    pub fn index_names(&self) -> Vec<&str> {
        self.index.iter().map(|c| c.name()).collect()
    }

    pub fn value_names(&self) -> Vec<&str> {
        self.values.iter().map(|c| c.name()).collect()
    }

    pub fn index_column(&self, name: &str) -> Option<&IndexColumn> {
        self.index.iter().find(|c| c.name() == name)
    }

    pub fn value_column(&self, name: &str) -> Option<&ValueColumn> {
        self.values.iter().find(|c| c.name() == name)
    }

    pub fn row(&self, row: usize) -> RowView<'_> {
        RowView { table: self, row }
    }

    /// Distinct draw keys in order of first appearance
    pub fn distinct_keys(&self) -> Vec<DrawKey> {
        let mut seen = HashSet::new();
        self.keys.iter().copied().filter(|k| seen.insert(*k)).collect()
    }

    /// Keep only the given rows, in the given order
    pub fn take(&self, rows: &[usize]) -> Self {
        Self {
            keys: rows.iter().map(|&r| self.keys[r]).collect(),
            index: self
                .index
                .iter()
                .map(|c| IndexColumn::new(c.name(), rows.iter().map(|&r| c.values[r].clone()).collect()))
                .collect(),
            values: self
                .values
                .iter()
                .map(|c| ValueColumn::new(c.name(), rows.iter().map(|&r| c.values[r]).collect()))
                .collect(),
        }
    }

    /// Keep rows for which `predicate` holds
    pub fn filter(&self, predicate: impl Fn(&RowView<'_>) -> bool) -> Self {
        let rows: Vec<usize> = (0..self.len()).filter(|&r| predicate(&self.row(r))).collect();
        self.take(&rows)
    }

    /// Add a value column computed row by row.
    ///
    /// This is the "derive" half of the derive-then-summarise pipeline: any
    /// expression over existing columns is materialised here before grouping.
    pub fn with_derived_column<F>(&self, name: &str, f: F) -> Result<Self>
    where
        F: Fn(&RowView<'_>) -> Option<f64>,
    {
        let values: Vec<Option<f64>> = (0..self.len()).map(|r| f(&self.row(r))).collect();
        let mut value_columns = self.values.clone();
        value_columns.push(ValueColumn::new(name, values));
        Self::new(self.keys.clone(), self.index.clone(), value_columns)
    }

    /// Drop value columns not listed in `keep`
    pub fn select_values(&self, keep: &[&str]) -> Result<Self> {
        let mut values = Vec::with_capacity(keep.len());
        for name in keep {
            let column = self
                .value_column(name)
                .ok_or_else(|| Error::unknown_column(name, "value"))?;
            values.push(column.clone());
        }
        Self::new(self.keys.clone(), self.index.clone(), values)
    }

    /// Subsample `n` distinct draws reproducibly; all rows of a kept draw survive
    pub fn sample_draws(&self, n: usize, seed: u64) -> Self {
        let keys = self.distinct_keys();
        if n >= keys.len() {
            return self.clone();
        }
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let kept: HashSet<DrawKey> = rand::seq::index::sample(&mut rng, keys.len(), n)
            .into_iter()
            .map(|i| keys[i])
            .collect();
        self.filter(|row| kept.contains(&row.key()))
    }

    /// Stack every value column into a `.variable` index column and a `.value`
    /// value column. Missing values are dropped.
    pub fn gather_variables(&self) -> Result<Self> {
        let mut keys = Vec::new();
        let mut index: Vec<Vec<Option<String>>> = vec![Vec::new(); self.index.len()];
        let mut variable = Vec::new();
        let mut value = Vec::new();

        for column in &self.values {
            for (row, v) in column.values.iter().enumerate() {
                let Some(v) = v else { continue };
                keys.push(self.keys[row]);
                for (out, src) in index.iter_mut().zip(&self.index) {
                    out.push(src.values[row].clone());
                }
                variable.push(Some(column.name.clone()));
                value.push(Some(*v));
            }
        }

        let mut index_columns: Vec<IndexColumn> = self
            .index
            .iter()
            .zip(index)
            .map(|(c, v)| IndexColumn::new(c.name(), v))
            .collect();
        index_columns.push(IndexColumn::new(VARIABLE, variable));
        Self::new(keys, index_columns, vec![ValueColumn::new(VALUE, value)])
    }

    /// Row-bind tables. Columns are unioned by name; cells of columns a table
    /// lacks are missing.
    pub fn bind_rows(tables: &[DrawsTable]) -> Result<Self> {
        let mut index_names: Vec<String> = Vec::new();
        let mut value_names: Vec<String> = Vec::new();
        for table in tables {
            for name in table.index_names() {
                if table_has_value(tables, name) {
                    return Err(JoinError::ColumnKindConflict {
                        column: name.to_string(),
                    }
                    .into());
                }
                if !index_names.iter().any(|n| n == name) {
                    index_names.push(name.to_string());
                }
            }
            for name in table.value_names() {
                if !value_names.iter().any(|n| n == name) {
                    value_names.push(name.to_string());
                }
            }
        }

        let total: usize = tables.iter().map(|t| t.len()).sum();
        let mut keys = Vec::with_capacity(total);
        let mut index: Vec<Vec<Option<String>>> = vec![Vec::with_capacity(total); index_names.len()];
        let mut values: Vec<Vec<Option<f64>>> = vec![Vec::with_capacity(total); value_names.len()];

        for table in tables {
            keys.extend_from_slice(&table.keys);
            for (name, out) in index_names.iter().zip(index.iter_mut()) {
                match table.index_column(name) {
                    Some(c) => out.extend(c.values.iter().cloned()),
                    None => out.extend(std::iter::repeat(None).take(table.len())),
                }
            }
            for (name, out) in value_names.iter().zip(values.iter_mut()) {
                match table.value_column(name) {
                    Some(c) => out.extend_from_slice(&c.values),
                    None => out.extend(std::iter::repeat(None).take(table.len())),
                }
            }
        }

        Self::new(
            keys,
            index_names
                .into_iter()
                .zip(index)
                .map(|(n, v)| IndexColumn::new(n, v))
                .collect(),
            value_names
                .into_iter()
                .zip(values)
                .map(|(n, v)| ValueColumn::new(n, v))
                .collect(),
        )
    }

    /// Row numbers grouped by the values of `columns`, groups in order of
    /// first appearance. Missing cells form their own group value.
    pub fn group_rows(&self, columns: &[&str]) -> Result<Vec<(Vec<Option<String>>, Vec<usize>)>> {
        let cols = columns
            .iter()
            .map(|name| {
                self.index_column(name)
                    .ok_or_else(|| Error::unknown_column(name, "index"))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut groups: Vec<(Vec<Option<String>>, Vec<usize>)> = Vec::new();
        let mut lookup: HashMap<Vec<Option<String>>, usize> = HashMap::new();
        for row in 0..self.len() {
            let key: Vec<Option<String>> = cols.iter().map(|c| c.values[row].clone()).collect();
            match lookup.get(&key) {
                Some(&g) => groups[g].1.push(row),
                None => {
                    lookup.insert(key.clone(), groups.len());
                    groups.push((key, vec![row]));
                }
            }
        }
        Ok(groups)
    }
}

fn table_has_value(tables: &[DrawsTable], name: &str) -> bool {
    tables.iter().any(|t| t.value_column(name).is_some())
}

/// Borrowed view of one table row
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    table: &'a DrawsTable,
    row: usize,
}

impl<'a> RowView<'a> {
    pub fn key(&self) -> DrawKey {
        self.table.keys[self.row]
    }

    /// Index cell by column name; `None` if the column or the cell is missing
    pub fn index(&self, column: &str) -> Option<&'a str> {
        self.table.index_column(column).and_then(|c| c.get(self.row))
    }

    /// Value cell by column name; `None` if the column or the cell is missing
    pub fn value(&self, column: &str) -> Option<f64> {
        self.table.value_column(column).and_then(|c| c.get(self.row))
    }
}

/// Incremental constructor, mostly for tests and embedding
#[derive(Debug, Clone)]
pub struct DrawsTableBuilder {
    keys: Vec<DrawKey>,
    index: Vec<IndexColumn>,
    values: Vec<ValueColumn>,
}

impl DrawsTableBuilder {
    pub fn index_column<I, S>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(|v| Some(v.into())).collect();
        self.index.push(IndexColumn::new(name, values));
        self
    }

    pub fn nullable_index_column(mut self, name: &str, values: Vec<Option<String>>) -> Self {
        self.index.push(IndexColumn::new(name, values));
        self
    }

    pub fn value_column<I>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values.into_iter().map(Some).collect();
        self.values.push(ValueColumn::new(name, values));
        self
    }

    pub fn nullable_value_column(mut self, name: &str, values: Vec<Option<f64>>) -> Self {
        self.values.push(ValueColumn::new(name, values));
        self
    }

    pub fn build(self) -> Result<DrawsTable> {
        DrawsTable::new(self.keys, self.index, self.values)
    }
}

/// Keys for `chains` chains of `iterations` iterations each, chain-major
pub fn draw_keys(chains: usize, iterations: usize) -> Vec<DrawKey> {
    (1..=chains)
        .flat_map(|c| (1..=iterations).map(move |i| DrawKey::new(c, i, (c - 1) * iterations + i)))
        .collect()
}
