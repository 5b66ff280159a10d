//! Which levels are compared, and how

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which pairs of levels produce a comparison
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ComparisonMode {
    /// Every unordered pair, later level against earlier
    #[default]
    AllPairs,
    /// Every ordered pair of distinct levels
    OrderedPairs,
    /// Each level against the one before it
    Consecutive,
    /// Each other level against the named control level
    Control(String),
}

/// Function applied to the two matched values
#[derive(Clone, Default)]
pub enum ComparisonFn {
    /// `a - b`, labelled `"A - B"`
    #[default]
    Difference,
    /// `a / b`, labelled `"A / B"`
    Ratio,
    /// Any binary function, labelled `"A <symbol> B"`
    Custom { symbol: String, f: fn(f64, f64) -> f64 },
}

impl ComparisonFn {
    pub fn custom(symbol: impl Into<String>, f: fn(f64, f64) -> f64) -> Self {
        Self::Custom {
            symbol: symbol.into(),
            f,
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            Self::Difference => "-",
            Self::Ratio => "/",
            Self::Custom { symbol, .. } => symbol.as_str(),
        }
    }

    pub fn apply(&self, a: f64, b: f64) -> f64 {
        match self {
            Self::Difference => a - b,
            Self::Ratio => a / b,
            Self::Custom { f, .. } => f(a, b),
        }
    }

    /// Label of the comparison of `a` with `b`
    pub fn label(&self, a: &str, b: &str) -> String {
        format!("{} {} {}", a, self.symbol(), b)
    }
}

impl fmt::Debug for ComparisonFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Difference => f.write_str("Difference"),
            Self::Ratio => f.write_str("Ratio"),
            Self::Custom { symbol, .. } => f.debug_struct("Custom").field("symbol", symbol).finish_non_exhaustive(),
        }
    }
}

/// Options for [`compare_levels`](crate::compare_levels)
#[derive(Debug, Clone, Default)]
pub struct ComparisonConfig {
    pub mode: ComparisonMode,
    pub function: ComparisonFn,
    /// Level order; first appearance in the data when unset
    pub levels: Option<Vec<String>>,
}

impl ComparisonConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: ComparisonMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_function(mut self, function: ComparisonFn) -> Self {
        self.function = function;
        self
    }

    pub fn with_levels<I, S>(mut self, levels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.levels = Some(levels.into_iter().map(Into::into).collect());
        self
    }

    /// Shorthand for `with_mode(ComparisonMode::Control(level))`
    pub fn against_control(self, level: impl Into<String>) -> Self {
        self.with_mode(ComparisonMode::Control(level.into()))
    }
}
