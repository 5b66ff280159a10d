//! Error types for draws-polars

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Draws error: {0}")]
    Draws(#[from] draws_core::Error),

    #[error("Invalid column: {0}")]
    InvalidColumn(String),

    #[error("Type mismatch in column `{column}`: expected {expected}, got {got}")]
    TypeMismatch {
        column: String,
        expected: String,
        got: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for draws_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Draws(inner) => inner,
            other => draws_core::Error::Source(other.to_string()),
        }
    }
}
