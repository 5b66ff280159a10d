//! Raw draw sources
//!
//! The only contract the reshaping engine needs from a model-fitting back end:
//! list the flat variable names and hand over every (chain, iteration) value
//! for one of them.

use crate::error::{Error, Result};
use crate::table::DrawKey;
use std::collections::{HashMap, HashSet};

/// Draws of a single flat variable, one vector per chain
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VariableDraws {
    chains: Vec<Vec<f64>>,
}

impl VariableDraws {
    pub fn new(chains: Vec<Vec<f64>>) -> Self {
        Self { chains }
    }

    pub fn single_chain(values: Vec<f64>) -> Self {
        Self {
            chains: vec![values],
        }
    }

    pub fn chains(&self) -> &[Vec<f64>] {
        &self.chains
    }

    pub fn n_draws(&self) -> usize {
        self.chains.iter().map(|c| c.len()).sum()
    }

    /// Every value with its draw key. Draw numbers run consecutively across
    /// chains, so ragged chains are allowed.
    pub fn iter(&self) -> impl Iterator<Item = (DrawKey, f64)> + '_ {
        let offsets = self.chains.iter().scan(0usize, |offset, chain| {
            let start = *offset;
            *offset += chain.len();
            Some(start)
        });
        self.chains
            .iter()
            .zip(offsets)
            .enumerate()
            .flat_map(|(c, (chain, offset))| {
                chain
                    .iter()
                    .enumerate()
                    .map(move |(i, &v)| (DrawKey::new(c + 1, i + 1, offset + i + 1), v))
            })
    }
}

/// A provider of posterior draws keyed by flat variable name
pub trait DrawSource {
    /// Flat variable names, in the order the back end reports them
    fn variables(&self) -> Result<Vec<String>>;

    /// All (chain, iteration) values of one flat variable
    fn draws(&self, variable: &str) -> Result<VariableDraws>;
}

/// Every distinct flat variable name in `source`, in source order
pub fn list_variables<S: DrawSource + ?Sized>(source: &S) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    Ok(source
        .variables()?
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect())
}

/// Draws held in memory, for embedding and tests
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    names: Vec<String>,
    draws: HashMap<String, VariableDraws>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable; `chains` holds one vector of iterations per chain
    pub fn with_variable(mut self, name: impl Into<String>, chains: Vec<Vec<f64>>) -> Self {
        self.insert(name, VariableDraws::new(chains));
        self
    }

    /// Insert or replace a variable, keeping its original position on replace
    pub fn insert(&mut self, name: impl Into<String>, draws: VariableDraws) {
        let name = name.into();
        if self.draws.insert(name.clone(), draws).is_none() {
            self.names.push(name);
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl DrawSource for InMemorySource {
    fn variables(&self) -> Result<Vec<String>> {
        Ok(self.names.clone())
    }

    fn draws(&self, variable: &str) -> Result<VariableDraws> {
        self.draws
            .get(variable)
            .cloned()
            .ok_or_else(|| Error::Source(format!("unknown variable `{variable}`")))
    }
}
