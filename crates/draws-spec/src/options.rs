//! Configuration for reshaping

use crate::matcher::{separator_regex, DEFAULT_SEPARATOR};
use draws_core::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// What to do when blank slots map two flat names onto the same row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollapsePolicy {
    /// Fail with `ParseError::AmbiguousCollapse`
    #[default]
    Error,
    /// Keep the value of the flat name that comes later in source order
    LastWriteWins,
}

/// Options for [`reshape`](crate::reshape) and [`gather_draws`](crate::gather_draws)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReshapeOptions {
    /// Regular expression splitting bracket contents into tokens
    pub separator: String,
    pub collapse: CollapsePolicy,
    /// Keep only this many randomly chosen draws
    pub ndraws: Option<usize>,
    /// Seed for `ndraws` subsampling
    pub seed: u64,
}

impl Default for ReshapeOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            collapse: CollapsePolicy::default(),
            ndraws: None,
            seed: 0,
        }
    }
}

impl ReshapeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_collapse_policy(mut self, collapse: CollapsePolicy) -> Self {
        self.collapse = collapse;
        self
    }

    pub fn with_ndraws(mut self, ndraws: usize, seed: u64) -> Self {
        self.ndraws = Some(ndraws);
        self.seed = seed;
        self
    }

    pub fn separator_regex(&self) -> Result<Regex> {
        separator_regex(&self.separator)
    }
}
