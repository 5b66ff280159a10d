//! Reading typed columns out of a `DataFrame`

use crate::error::{Error, Result};
use polars::prelude::*;

pub(crate) enum ColumnKind {
    Key,
    Index,
    Value,
}

/// Classify a column by dtype; reserved names are keys regardless
pub(crate) fn column_kind(column: &Column) -> Result<ColumnKind> {
    if draws_core::RESERVED_COLUMNS.contains(&column.name().as_str()) {
        return Ok(ColumnKind::Key);
    }
    match column.dtype() {
        DataType::String => Ok(ColumnKind::Index),
        dt if is_numeric(dt) => Ok(ColumnKind::Value),
        dt => Err(Error::TypeMismatch {
            column: column.name().to_string(),
            expected: "string or numeric".to_string(),
            got: format!("{:?}", dt),
        }),
    }
}

pub(crate) fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float64
            | DataType::Float32
            | DataType::Int64
            | DataType::Int32
            | DataType::Int16
            | DataType::Int8
            | DataType::UInt64
            | DataType::UInt32
            | DataType::UInt16
            | DataType::UInt8
    )
}

pub(crate) fn require<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name).map_err(|_| Error::InvalidColumn(name.to_string()))
}

/// Positive integers, e.g. chain or iteration numbers
pub(crate) fn positive_integers(column: &Column) -> Result<Vec<usize>> {
    if !is_numeric(column.dtype()) {
        return Err(Error::TypeMismatch {
            column: column.name().to_string(),
            expected: "integer".to_string(),
            got: format!("{:?}", column.dtype()),
        });
    }
    let cast = column.cast(&DataType::Int64)?;
    cast.i64()?
        .into_iter()
        .map(|v| match v {
            Some(v) if v > 0 => Ok(v as usize),
            other => Err(Error::InvalidInput(format!(
                "column `{}` must hold positive integers, found {:?}",
                column.name(),
                other
            ))),
        })
        .collect()
}

pub(crate) fn floats(column: &Column) -> Result<Vec<Option<f64>>> {
    let cast = column.cast(&DataType::Float64)?;
    Ok(cast.f64()?.into_iter().collect())
}

pub(crate) fn strings(column: &Column) -> Result<Vec<Option<String>>> {
    Ok(column.str()?.into_iter().map(|v| v.map(str::to_string)).collect())
}
