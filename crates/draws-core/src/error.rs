//! Error types for posterior draw tidying
//!
//! Provides a unified error type for all tidy-draws crates. The four failure
//! families (parsing, joining, grouping, estimation) are kept as separate
//! enums so callers can match on the family without caring about details.

use thiserror::Error;

/// Core error type for reshaping and summarising draws
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Index specification or flat-name parsing failed
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Two tables could not be combined
    #[error("Join error: {0}")]
    Join(#[from] JoinError),

    /// Target or grouping columns could not be resolved
    #[error("Grouping error: {0}")]
    Grouping(#[from] GroupingError),

    /// A point or interval statistic could not be computed
    #[error("Estimation error: {0}")]
    Estimation(#[from] EstimationError),

    /// The draw source could not be read
    #[error("Source error: {0}")]
    Source(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Failures while parsing index specifications or matching flat names
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The textual index specification is malformed
    #[error("invalid index specification `{spec}`: {reason}")]
    InvalidSpec { spec: String, reason: String },

    /// A regular expression (base pattern or separator) did not compile
    #[error("invalid pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A matched flat name split into the wrong number of tokens
    #[error("variable `{name}` has {actual} index tokens, specification `{spec}` expects {expected}")]
    SlotCountMismatch {
        name: String,
        spec: String,
        expected: usize,
        actual: usize,
    },

    /// No flat name in the source matched the request
    #[error("no variable in the source matches `{spec}`")]
    NoMatch { spec: String },

    /// The same flat name was claimed by two requests
    #[error("variable `{name}` is matched by both `{first}` and `{second}`")]
    AmbiguousMatch {
        name: String,
        first: String,
        second: String,
    },

    /// Dropping blank slots mapped two flat names onto the same row
    #[error("variables `{first}` and `{second}` collapse to the same index tuple for draw {draw}")]
    AmbiguousCollapse {
        first: String,
        second: String,
        draw: usize,
    },
}

/// Failures while combining tables
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JoinError {
    /// A column is an index column on one side and a value column on the other
    #[error("column `{column}` is an index column on one side and a value column on the other")]
    ColumnKindConflict { column: String },

    /// Both sides carry a value column with the same name
    #[error("value column `{column}` is present on both sides")]
    DuplicateValueColumn { column: String },
}

/// Failures while resolving targets and groups
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GroupingError {
    /// More than one value column could be summarised and none was chosen
    #[error("ambiguous target: candidate columns {candidates:?}, choose one explicitly")]
    AmbiguousTarget { candidates: Vec<String> },

    /// The table has no value column to summarise
    #[error("no target column to summarise")]
    NoTarget,

    /// A named column does not exist or has the wrong kind
    #[error("unknown {kind} column `{column}`")]
    UnknownColumn { column: String, kind: &'static str },

    /// A factor level occurs twice within the same comparison cell
    #[error("level `{level}` of `{column}` occurs more than once for draw {draw}")]
    DuplicateLevel {
        column: String,
        level: String,
        draw: usize,
    },

    /// A level named in the configuration is absent from the data
    #[error("level `{level}` does not occur in column `{column}`")]
    UnknownLevel { column: String, level: String },
}

/// Failures while computing point and interval statistics
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimationError {
    /// Requested probability mass is outside (0, 1)
    #[error("interval width {width} must be in (0, 1)")]
    InvalidWidth { width: f64 },

    /// A group has no (non-missing) draws
    #[error("no draws for `{target}` in group {group:?}")]
    NoDraws { target: String, group: Vec<String> },

    /// Too few draws for a mode estimate under the error policy
    #[error("mode of `{target}` in group {group:?} needs at least {required} draws, got {actual}")]
    DegenerateMode {
        target: String,
        group: Vec<String>,
        required: usize,
        actual: usize,
    },

    /// A configuration parameter is unusable
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

// Helper functions for common error patterns

impl Error {
    /// Create an error for a column that does not exist
    pub fn unknown_column(column: &str, kind: &'static str) -> Self {
        GroupingError::UnknownColumn {
            column: column.to_string(),
            kind,
        }
        .into()
    }

    /// Create an error for a width outside (0, 1)
    pub fn invalid_width(width: f64) -> Self {
        EstimationError::InvalidWidth { width }.into()
    }

    /// Create an error for a malformed textual specification
    pub fn invalid_spec(spec: &str, reason: impl Into<String>) -> Self {
        ParseError::InvalidSpec {
            spec: spec.to_string(),
            reason: reason.into(),
        }
        .into()
    }

    /// Validate a probability-mass width
    pub fn check_width(width: f64) -> Result<()> {
        if !(width > 0.0 && width < 1.0) {
            return Err(Self::invalid_width(width));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err: Error = ParseError::SlotCountMismatch {
            name: "b[1,2,3]".to_string(),
            spec: "b[i,j]".to_string(),
            expected: 2,
            actual: 3,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Parse error: variable `b[1,2,3]` has 3 index tokens, specification `b[i,j]` expects 2"
        );

        let err = Error::invalid_width(1.5);
        assert_eq!(err.to_string(), "Estimation error: interval width 1.5 must be in (0, 1)");

        let err = Error::unknown_column("group", "index");
        assert_eq!(err.to_string(), "Grouping error: unknown index column `group`");
    }

    #[test]
    fn test_check_width() {
        assert!(Error::check_width(0.5).is_ok());
        assert!(Error::check_width(0.99).is_ok());
        assert!(Error::check_width(0.0).is_err());
        assert!(Error::check_width(1.0).is_err());
        assert!(Error::check_width(-0.1).is_err());
        assert!(Error::check_width(f64::NAN).is_err());
    }

    #[test]
    fn test_family_matching() {
        let err: Error = JoinError::DuplicateValueColumn {
            column: "b".to_string(),
        }
        .into();
        assert!(matches!(err, Error::Join(_)));

        let err: Error = GroupingError::NoTarget.into();
        assert!(matches!(err, Error::Grouping(GroupingError::NoTarget)));
    }
}
