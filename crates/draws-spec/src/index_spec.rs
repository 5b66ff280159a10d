//! Index specifications such as `b[term,group]`
//!
//! The textual form is `base`, `base[a,b]` or `base[,b]`. The trailing
//! bracket group is always the slot list, so a regex base may contain its own
//! brackets (`r_[a-z]+[group]`) as long as the text ends with the slot list.
//! A blank slot (`base[,b]`) matches a token but drops it from the output.
//! Literal specifications may not carry text after the slot list
//! (`b[i]x`); regex ones may, since `b_[0-9]+` is a scalar pattern.

use crate::matcher::NameMatcher;
use draws_core::{Error, ParseError, Result, RESERVED_COLUMNS};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A base name and an ordered list of named or blank index slots
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawIndexSpec")]
pub struct IndexSpec {
    base: String,
    slots: Vec<Option<String>>,
}

/// Unvalidated serialized form
#[derive(Deserialize)]
struct RawIndexSpec {
    base: String,
    slots: Vec<Option<String>>,
}

impl TryFrom<RawIndexSpec> for IndexSpec {
    type Error = Error;

    fn try_from(raw: RawIndexSpec) -> Result<Self> {
        Self::new(raw.base, raw.slots)
    }
}

impl IndexSpec {
    /// Create a specification, validating slot names
    pub fn new(base: impl Into<String>, slots: Vec<Option<String>>) -> Result<Self> {
        let spec = Self {
            base: base.into(),
            slots,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// A variable without indices
    pub fn scalar(base: impl Into<String>) -> Result<Self> {
        Self::new(base, Vec::new())
    }

    /// Parse the textual form
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with(text, false)
    }

    /// Parse the textual form of a regex request, whose base may hold
    /// bracket expressions without a slot list
    pub fn parse_pattern(text: &str) -> Result<Self> {
        Self::parse_with(text, true)
    }

    fn parse_with(text: &str, pattern: bool) -> Result<Self> {
        let text = text.trim();
        let (base, slots) = match text.strip_suffix(']') {
            Some(head) => {
                let open = head
                    .rfind('[')
                    .ok_or_else(|| Error::invalid_spec(text, "unmatched `]`"))?;
                let inner = &head[open + 1..];
                if inner.trim().is_empty() {
                    return Err(Error::invalid_spec(text, "empty slot list"));
                }
                let slots = inner
                    .split(',')
                    .map(|s| {
                        let s = s.trim();
                        (!s.is_empty()).then(|| s.to_string())
                    })
                    .collect();
                (&head[..open], slots)
            }
            None => {
                if text.ends_with('[') || (text.contains('[') && !text.contains(']')) {
                    return Err(Error::invalid_spec(text, "missing closing `]`"));
                }
                if !pattern && text.contains(']') {
                    return Err(Error::invalid_spec(text, "text after the slot list"));
                }
                (text, Vec::new())
            }
        };
        Self::new(base.trim(), slots)
    }

    fn validate(&self) -> Result<()> {
        let text = self.to_string();
        if self.base.is_empty() {
            return Err(Error::invalid_spec(&text, "empty base name"));
        }
        let mut seen: Vec<&str> = Vec::new();
        for name in self.index_names() {
            if RESERVED_COLUMNS.contains(&name) {
                return Err(Error::invalid_spec(&text, format!("slot name `{name}` is reserved")));
            }
            if name.contains(['[', ']']) {
                return Err(Error::invalid_spec(&text, format!("slot name `{name}` contains a bracket")));
            }
            if seen.contains(&name) {
                return Err(Error::invalid_spec(&text, format!("slot `{name}` is named twice")));
            }
            seen.push(name);
        }
        Ok(())
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn slots(&self) -> &[Option<String>] {
        &self.slots
    }

    pub fn n_slots(&self) -> usize {
        self.slots.len()
    }

    pub fn is_indexed(&self) -> bool {
        !self.slots.is_empty()
    }

    /// Names of the non-blank slots, in slot order
    pub fn index_names(&self) -> Vec<&str> {
        self.slots.iter().flatten().map(|s| s.as_str()).collect()
    }

    /// Keep the tokens at named slots, dropping blank ones
    pub fn reduce<'t>(&self, tokens: &'t [String]) -> Vec<&'t str> {
        self.slots
            .iter()
            .zip(tokens)
            .filter(|(slot, _)| slot.is_some())
            .map(|(_, token)| token.as_str())
            .collect()
    }
}

impl fmt::Display for IndexSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base)?;
        if self.is_indexed() {
            let slots: Vec<&str> = self.slots.iter().map(|s| s.as_deref().unwrap_or("")).collect();
            write!(f, "[{}]", slots.join(","))?;
        }
        Ok(())
    }
}

impl FromStr for IndexSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// How the base of a request is compared with flat names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchMode {
    /// The base is matched verbatim; regex metacharacters have no meaning
    #[default]
    Literal,
    /// The base is a regular expression; every distinct matched base becomes
    /// its own value column
    Regex,
}

/// One variable request passed to the reshaper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableRequest {
    spec: IndexSpec,
    mode: MatchMode,
}

impl VariableRequest {
    pub fn literal(spec: IndexSpec) -> Self {
        Self {
            spec,
            mode: MatchMode::Literal,
        }
    }

    pub fn regex(spec: IndexSpec) -> Self {
        Self {
            spec,
            mode: MatchMode::Regex,
        }
    }

    /// Parse a literal request from its textual form
    pub fn parse(text: &str) -> Result<Self> {
        Ok(Self::literal(IndexSpec::parse(text)?))
    }

    /// Parse a regex request from its textual form
    pub fn parse_regex(text: &str) -> Result<Self> {
        Ok(Self::regex(IndexSpec::parse_pattern(text)?))
    }

    pub fn spec(&self) -> &IndexSpec {
        &self.spec
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Compile the matcher for this request
    pub fn matcher(&self, separator: &Regex) -> Result<NameMatcher> {
        match self.mode {
            MatchMode::Literal => NameMatcher::literal(self.spec.base(), self.spec.is_indexed(), separator),
            MatchMode::Regex => NameMatcher::regex(self.spec.base(), self.spec.is_indexed(), separator),
        }
    }

    /// Check that a matched flat name produced one token per slot
    pub fn check_tokens(&self, flat_name: &str, tokens: &[String]) -> Result<()> {
        if tokens.len() != self.spec.n_slots() {
            return Err(ParseError::SlotCountMismatch {
                name: flat_name.to_string(),
                spec: self.to_string(),
                expected: self.spec.n_slots(),
                actual: tokens.len(),
            }
            .into());
        }
        Ok(())
    }
}

impl fmt::Display for VariableRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            MatchMode::Literal => write!(f, "{}", self.spec),
            MatchMode::Regex => write!(f, "regex:{}", self.spec),
        }
    }
}

impl FromStr for VariableRequest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
