//! Matching flat variable names against a base name
//!
//! Flat names produced by samplers encode indices textually, e.g.
//! `b[(Intercept) condition:A]`. A [`NameMatcher`] recognises the
//! `base[...]` shape and splits the bracket contents with a separator regex.

use draws_core::{ParseError, Result};
use regex::Regex;
use tracing::trace;

/// Default separator: runs of spaces and commas. Colons are not separators,
/// so `condition:A` stays one token.
pub const DEFAULT_SEPARATOR: &str = "[, ]+";

/// Result of a successful match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedName {
    /// The base part that matched (differs from the pattern in regex mode)
    pub base: String,
    /// Tokens from the bracket contents, in order
    pub tokens: Vec<String>,
}

/// Compiled matcher for one base name or pattern
#[derive(Debug, Clone)]
pub struct NameMatcher {
    pattern: Regex,
    separator: Regex,
    indexed: bool,
}

impl NameMatcher {
    /// Match `base` verbatim. With `indexed` the flat name must carry a
    /// bracket group, otherwise it must equal `base` exactly.
    pub fn literal(base: &str, indexed: bool, separator: &Regex) -> Result<Self> {
        Self::compile(&regex::escape(base), base, indexed, separator)
    }

    /// Match `pattern` as a regular expression against the base part
    pub fn regex(pattern: &str, indexed: bool, separator: &Regex) -> Result<Self> {
        Self::compile(pattern, pattern, indexed, separator)
    }

    fn compile(body: &str, original: &str, indexed: bool, separator: &Regex) -> Result<Self> {
        let anchored = if indexed {
            format!(r"^(?P<base>{body})\[(?P<indices>.*)\]$")
        } else {
            format!(r"^(?P<base>{body})$")
        };
        let pattern = Regex::new(&anchored).map_err(|e| ParseError::InvalidPattern {
            pattern: original.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            pattern,
            separator: separator.clone(),
            indexed,
        })
    }

    /// Match a flat name, returning the base and the index tokens
    pub fn matches(&self, flat_name: &str) -> Option<IndexedName> {
        let caps = self.pattern.captures(flat_name)?;
        let base = caps.name("base")?.as_str().to_string();
        let tokens = if self.indexed {
            split_indices(caps.name("indices")?.as_str(), &self.separator)
        } else {
            Vec::new()
        };
        trace!(flat_name, base = %base, n_tokens = tokens.len(), "matched variable");
        Some(IndexedName { base, tokens })
    }
}

/// Compile a separator pattern
pub fn separator_regex(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| {
        ParseError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Split bracket contents into tokens. Empty contents give no tokens.
pub fn split_indices(contents: &str, separator: &Regex) -> Vec<String> {
    if contents.is_empty() {
        return Vec::new();
    }
    separator.split(contents).map(str::to_string).collect()
}

/// Whether `flat_name` has the shape `base_name[idx1<sep>idx2...]`; returns
/// the tokens if so. `base_name` is taken literally.
///
/// ```rust
/// use draws_spec::{match_indexed_name, separator_regex, DEFAULT_SEPARATOR};
///
/// let sep = separator_regex(DEFAULT_SEPARATOR).unwrap();
/// let tokens = match_indexed_name("b[(Intercept) condition:A]", "b", &sep).unwrap();
/// assert_eq!(tokens, vec!["(Intercept)", "condition:A"]);
/// assert!(match_indexed_name("b_sigma[1]", "b", &sep).is_none());
/// ```
pub fn match_indexed_name(flat_name: &str, base_name: &str, separator: &Regex) -> Option<Vec<String>> {
    NameMatcher::literal(base_name, true, separator)
        .ok()?
        .matches(flat_name)
        .map(|m| m.tokens)
}
