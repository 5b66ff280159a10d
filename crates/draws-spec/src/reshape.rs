//! Reshaping raw draws into long-format tables

use crate::index_spec::{MatchMode, VariableRequest};
use crate::join::natural_join;
use crate::matcher::IndexedName;
use crate::options::{CollapsePolicy, ReshapeOptions};
use draws_core::{
    list_variables, DrawKey, DrawSource, DrawsTable, Error, IndexColumn, ParseError, Result,
    ValueColumn,
};
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument, warn};

/// Reshape the requested variables into one long-format table.
///
/// Each request contributes its named slots as index columns and one value
/// column per matched base name. Requests are combined with
/// [`natural_join`]; `options.ndraws` subsampling happens last so every
/// variable keeps the same draws.
#[instrument(skip_all, fields(n_requests = requests.len()))]
pub fn reshape<S>(source: &S, requests: &[VariableRequest], options: &ReshapeOptions) -> Result<DrawsTable>
where
    S: DrawSource + ?Sized,
{
    let tables = reshape_each(source, requests, options)?;
    let mut tables = tables.into_iter();
    let first = tables
        .next()
        .ok_or_else(|| Error::InvalidInput("no variables requested".to_string()))?;
    let joined = tables.try_fold(first, |acc, table| natural_join(&acc, &table))?;
    debug!(rows = joined.len(), "reshaped draws");

    Ok(subsample(joined, options))
}

/// Reshape and stack: each request is reshaped on its own, its value columns
/// are gathered into `.variable`/`.value`, and the results are row-bound.
#[instrument(skip_all, fields(n_requests = requests.len()))]
pub fn gather_draws<S>(source: &S, requests: &[VariableRequest], options: &ReshapeOptions) -> Result<DrawsTable>
where
    S: DrawSource + ?Sized,
{
    let gathered = reshape_each(source, requests, options)?
        .iter()
        .map(DrawsTable::gather_variables)
        .collect::<Result<Vec<_>>>()?;
    if gathered.is_empty() {
        return Err(Error::InvalidInput("no variables requested".to_string()));
    }
    Ok(subsample(DrawsTable::bind_rows(&gathered)?, options))
}

/// Reshape literal requests given in textual form with default options
///
/// ```rust
/// use draws_core::InMemorySource;
/// use draws_spec::spread_draws;
///
/// let source = InMemorySource::new()
///     .with_variable("b[1]", vec![vec![0.1, 0.2]])
///     .with_variable("b[2]", vec![vec![0.3, 0.4]])
///     .with_variable("sigma", vec![vec![1.0, 1.1]]);
///
/// let table = spread_draws(&source, &["b[i]", "sigma"]).unwrap();
/// assert_eq!(table.len(), 4);
/// assert_eq!(table.index_names(), vec!["i"]);
/// assert_eq!(table.value_names(), vec!["b", "sigma"]);
/// ```
pub fn spread_draws<S>(source: &S, requests: &[&str]) -> Result<DrawsTable>
where
    S: DrawSource + ?Sized,
{
    let requests = requests
        .iter()
        .map(|r| VariableRequest::parse(r))
        .collect::<Result<Vec<_>>>()?;
    reshape(source, &requests, &ReshapeOptions::default())
}

fn subsample(table: DrawsTable, options: &ReshapeOptions) -> DrawsTable {
    match options.ndraws {
        Some(n) => table.sample_draws(n, options.seed),
        None => table,
    }
}

/// One table per request, after matching every request against the source
fn reshape_each<S>(source: &S, requests: &[VariableRequest], options: &ReshapeOptions) -> Result<Vec<DrawsTable>>
where
    S: DrawSource + ?Sized,
{
    let separator = options.separator_regex()?;
    let names = list_variables(source)?;
    let mut claimed: HashMap<&str, usize> = HashMap::new();
    let mut value_columns: HashMap<String, usize> = HashMap::new();
    let mut tables = Vec::with_capacity(requests.len());

    for (r, request) in requests.iter().enumerate() {
        let matcher = request.matcher(&separator)?;
        let mut matched: Vec<(&str, IndexedName)> = Vec::new();

        for name in &names {
            let Some(m) = matcher.matches(name) else { continue };
            if let Some(&first) = claimed.get(name.as_str()) {
                return Err(ParseError::AmbiguousMatch {
                    name: name.clone(),
                    first: requests[first].to_string(),
                    second: request.to_string(),
                }
                .into());
            }
            request.check_tokens(name, &m.tokens)?;
            claimed.insert(name.as_str(), r);
            matched.push((name.as_str(), m));
        }

        if matched.is_empty() {
            return Err(ParseError::NoMatch {
                spec: request.to_string(),
            }
            .into());
        }
        debug!(request = %request, n_matched = matched.len(), "matched variables");

        let table = collect_request(source, request, &matched, options.collapse)?;
        for column in table.value_names() {
            if let Some(&first) = value_columns.get(column) {
                return Err(ParseError::AmbiguousMatch {
                    name: column.to_string(),
                    first: requests[first].to_string(),
                    second: request.to_string(),
                }
                .into());
            }
            value_columns.insert(column.to_string(), r);
        }
        tables.push(table);
    }
    Ok(tables)
}

/// Accumulates the rows of one request
struct RequestRows<'a> {
    keys: Vec<DrawKey>,
    tuple_of_row: Vec<usize>,
    tuples: Vec<Vec<String>>,
    tuple_ids: HashMap<Vec<String>, usize>,
    row_of: HashMap<(DrawKey, usize), usize>,
    columns: Vec<Column<'a>>,
}

struct Column<'a> {
    name: String,
    values: Vec<Option<f64>>,
    origin: Vec<Option<&'a str>>,
}

impl<'a> RequestRows<'a> {
    fn new() -> Self {
        Self {
            keys: Vec::new(),
            tuple_of_row: Vec::new(),
            tuples: Vec::new(),
            tuple_ids: HashMap::new(),
            row_of: HashMap::new(),
            columns: Vec::new(),
        }
    }

    fn column(&mut self, name: &str) -> usize {
        if let Some(i) = self.columns.iter().position(|c| c.name == name) {
            return i;
        }
        self.columns.push(Column {
            name: name.to_string(),
            values: vec![None; self.keys.len()],
            origin: vec![None; self.keys.len()],
        });
        self.columns.len() - 1
    }

    fn tuple(&mut self, tuple: Vec<String>) -> usize {
        if let Some(&id) = self.tuple_ids.get(&tuple) {
            return id;
        }
        let id = self.tuples.len();
        self.tuple_ids.insert(tuple.clone(), id);
        self.tuples.push(tuple);
        id
    }

    fn row(&mut self, key: DrawKey, tuple: usize) -> usize {
        if let Some(&row) = self.row_of.get(&(key, tuple)) {
            return row;
        }
        let row = self.keys.len();
        self.keys.push(key);
        self.tuple_of_row.push(tuple);
        for column in &mut self.columns {
            column.values.push(None);
            column.origin.push(None);
        }
        self.row_of.insert((key, tuple), row);
        row
    }

    /// Write one cell; returns whether an existing value was overwritten
    fn set(
        &mut self,
        column: usize,
        row: usize,
        value: f64,
        origin: &'a str,
        collapse: CollapsePolicy,
    ) -> Result<bool> {
        let cell = &mut self.columns[column];
        let previous = cell.origin[row];
        if let Some(first) = previous {
            if collapse == CollapsePolicy::Error {
                return Err(ParseError::AmbiguousCollapse {
                    first: first.to_string(),
                    second: origin.to_string(),
                    draw: self.keys[row].draw,
                }
                .into());
            }
        }
        cell.values[row] = Some(value);
        cell.origin[row] = Some(origin);
        Ok(previous.is_some())
    }

    fn into_table(self, index_names: &[&str]) -> Result<DrawsTable> {
        let index = index_names
            .iter()
            .enumerate()
            .map(|(slot, name)| {
                let values = self
                    .tuple_of_row
                    .iter()
                    .map(|&t| Some(self.tuples[t][slot].clone()))
                    .collect();
                IndexColumn::new(*name, values)
            })
            .collect();
        let values = self
            .columns
            .into_iter()
            .map(|c| ValueColumn::new(c.name, c.values))
            .collect();
        DrawsTable::new(self.keys, index, values)
    }
}

fn collect_request<'a, S>(
    source: &S,
    request: &VariableRequest,
    matched: &[(&'a str, IndexedName)],
    collapse: CollapsePolicy,
) -> Result<DrawsTable>
where
    S: DrawSource + ?Sized,
{
    let spec = request.spec();
    let mut rows = RequestRows::new();
    let mut overwritten: HashSet<&str> = HashSet::new();

    for &(flat_name, ref m) in matched {
        let column_name = match request.mode() {
            MatchMode::Literal => spec.base(),
            MatchMode::Regex => m.base.as_str(),
        };
        let column = rows.column(column_name);
        let tuple = rows.tuple(spec.reduce(&m.tokens).into_iter().map(str::to_string).collect());

        for (key, value) in source.draws(flat_name)?.iter() {
            let row = rows.row(key, tuple);
            if rows.set(column, row, value, flat_name, collapse)? {
                overwritten.insert(flat_name);
            }
        }
    }

    for flat_name in &overwritten {
        warn!(variable = *flat_name, request = %request, "blank slots collapsed rows, later value kept");
    }
    rows.into_table(&spec.index_names())
}

#[cfg(test)]
mod tests {
    use super::*;
    use draws_core::InMemorySource;

    fn source() -> InMemorySource {
        InMemorySource::new()
            .with_variable("b[1,a]", vec![vec![1.0, 2.0]])
            .with_variable("b[1,b]", vec![vec![3.0, 4.0]])
            .with_variable("b[2,a]", vec![vec![5.0, 6.0]])
            .with_variable("sigma", vec![vec![0.5, 0.6]])
    }

    #[test]
    fn test_single_indexed_request() {
        let table = spread_draws(&source(), &["b[i,j]"]).unwrap();
        assert_eq!(table.len(), 6);
        assert_eq!(table.index_names(), vec!["i", "j"]);
        let row = table.row(4);
        assert_eq!(row.index("i"), Some("2"));
        assert_eq!(row.index("j"), Some("a"));
        assert_eq!(row.value("b"), Some(5.0));
    }

    #[test]
    fn test_blank_slot_collapse_is_an_error_by_default() {
        let err = spread_draws(&source(), &["b[i,]"]).unwrap_err();
        assert_eq!(
            err,
            Error::Parse(ParseError::AmbiguousCollapse {
                first: "b[1,a]".into(),
                second: "b[1,b]".into(),
                draw: 1,
            })
        );
    }

    #[test]
    fn test_blank_slot_last_write_wins() {
        let request = VariableRequest::parse("b[i,]").unwrap();
        let options = ReshapeOptions::default().with_collapse_policy(CollapsePolicy::LastWriteWins);
        let table = reshape(&source(), &[request], &options).unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.value_column("b").unwrap().values()[..2], [Some(3.0), Some(4.0)]);
    }

    #[test]
    fn test_blank_slot_without_collision() {
        let table = spread_draws(&source(), &["b[,j]"]).unwrap_err();
        assert!(matches!(table, Error::Parse(ParseError::AmbiguousCollapse { .. })));

        let table = spread_draws(&source(), &["b[i,j]", "sigma"]).unwrap();
        assert_eq!(table.len(), 6);
        assert_eq!(table.value_column("sigma").unwrap().get(5), Some(0.6));
    }

    #[test]
    fn test_slot_count_mismatch() {
        let err = spread_draws(&source(), &["b[i]"]).unwrap_err();
        assert!(matches!(
            err,
            Error::Parse(ParseError::SlotCountMismatch { expected: 1, actual: 2, .. })
        ));
    }

    #[test]
    fn test_no_match_and_ambiguous_match() {
        let err = spread_draws(&source(), &["tau"]).unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::NoMatch { .. })));

        let err = spread_draws(&source(), &["sigma", "sigma"]).unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::AmbiguousMatch { .. })));
    }

    #[test]
    fn test_regex_request_one_column_per_base() {
        let source = InMemorySource::new()
            .with_variable("b_x", vec![vec![1.0, 2.0]])
            .with_variable("b_y", vec![vec![3.0, 4.0]])
            .with_variable("lp__", vec![vec![0.0, 0.0]]);
        let request = VariableRequest::parse_regex("b_.*").unwrap();
        let table = reshape(&source, &[request], &ReshapeOptions::default()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.value_names(), vec!["b_x", "b_y"]);
    }

    #[test]
    fn test_gather_draws() {
        let requests = vec![
            VariableRequest::parse("b[i,j]").unwrap(),
            VariableRequest::parse("sigma").unwrap(),
        ];
        let table = gather_draws(&source(), &requests, &ReshapeOptions::default()).unwrap();
        assert_eq!(table.len(), 8);
        assert_eq!(table.index_names(), vec!["i", "j", ".variable"]);
        let last = table.row(7);
        assert_eq!(last.index(".variable"), Some("sigma"));
        assert_eq!(last.index("i"), None);
        assert_eq!(last.value(".value"), Some(0.6));
    }

    #[test]
    fn test_ndraws_subsample() {
        let options = ReshapeOptions::default().with_ndraws(1, 7);
        let requests = vec![VariableRequest::parse("b[i,j]").unwrap()];
        let table = reshape(&source(), &requests, &options).unwrap();
        assert_eq!(table.distinct_keys().len(), 1);
        assert_eq!(table.len(), 3);
    }
}
