//! A draw source backed by a wide `DataFrame`

use crate::columns::{floats, is_numeric, positive_integers, require};
use crate::error::{Error, Result};
use draws_core::{DrawSource, VariableDraws, CHAIN, ITERATION, RESERVED_COLUMNS};
use polars::prelude::*;
use std::collections::BTreeMap;

/// Draws stored one column per flat variable, with `.chain` and
/// `.iteration` columns locating each row
///
/// Chains are numbered by their rank among the distinct `.chain` values and
/// rows within a chain are ordered by `.iteration`. Null draws read as NaN.
///
/// ```rust
/// use draws_core::DrawSource;
/// use draws_polars::DataFrameSource;
/// use polars::prelude::*;
///
/// let df = df![
///     ".chain" => [1i64, 1, 2, 2],
///     ".iteration" => [1i64, 2, 1, 2],
///     "mu[1]" => [0.1, 0.2, 0.3, 0.4],
///     "sigma" => [1.0, 1.1, 1.2, 1.3],
/// ]
/// .unwrap();
///
/// let source = DataFrameSource::new(df).unwrap();
/// assert_eq!(source.variables().unwrap(), vec!["mu[1]", "sigma"]);
/// assert_eq!(source.draws("sigma").unwrap().chains(), &[vec![1.0, 1.1], vec![1.2, 1.3]]);
/// ```
#[derive(Debug, Clone)]
pub struct DataFrameSource {
    frame: DataFrame,
    variables: Vec<String>,
    /// Row numbers per chain, ordered by iteration
    chains: Vec<Vec<usize>>,
}

impl DataFrameSource {
    pub fn new(frame: DataFrame) -> Result<Self> {
        let chain = positive_integers(require(&frame, CHAIN)?)?;
        let iteration = positive_integers(require(&frame, ITERATION)?)?;

        let mut by_chain: BTreeMap<usize, Vec<(usize, usize)>> = BTreeMap::new();
        for (row, (&c, &i)) in chain.iter().zip(&iteration).enumerate() {
            by_chain.entry(c).or_default().push((i, row));
        }
        let mut chains = Vec::with_capacity(by_chain.len());
        for (c, mut rows) in by_chain {
            rows.sort_unstable();
            if rows.windows(2).any(|w| w[0].0 == w[1].0) {
                return Err(Error::InvalidInput(format!("chain {c} repeats an iteration")));
            }
            chains.push(rows.into_iter().map(|(_, row)| row).collect());
        }

        let variables = frame
            .get_columns()
            .iter()
            .filter(|c| !RESERVED_COLUMNS.contains(&c.name().as_str()) && is_numeric(c.dtype()))
            .map(|c| c.name().to_string())
            .collect();

        Ok(Self {
            frame,
            variables,
            chains,
        })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn n_chains(&self) -> usize {
        self.chains.len()
    }

    fn read(&self, variable: &str) -> Result<VariableDraws> {
        if !self.variables.iter().any(|v| v == variable) {
            return Err(Error::InvalidColumn(variable.to_string()));
        }
        let values = floats(require(&self.frame, variable)?)?;
        let chains = self
            .chains
            .iter()
            .map(|rows| rows.iter().map(|&r| values[r].unwrap_or(f64::NAN)).collect())
            .collect();
        Ok(VariableDraws::new(chains))
    }
}

impl DrawSource for DataFrameSource {
    fn variables(&self) -> draws_core::Result<Vec<String>> {
        Ok(self.variables.clone())
    }

    fn draws(&self, variable: &str) -> draws_core::Result<VariableDraws> {
        Ok(self.read(variable)?)
    }
}
