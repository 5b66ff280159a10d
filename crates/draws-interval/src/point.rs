//! Point statistics

use crate::density::{mode, Bandwidth};
use crate::quantile::quantile;
use draws_core::utils::mean;
use draws_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Central tendency summarised from the draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointEstimate {
    Mean,
    /// Type-7 quantile at 0.5
    Median,
    /// Most frequent value for integral draws, KDE argmax otherwise
    Mode,
}

impl PointEstimate {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Mode => "mode",
        }
    }

    /// Point estimate over sorted, non-empty draws
    pub fn estimate(&self, sorted: &[f64], bandwidth: &Bandwidth) -> Result<f64> {
        match self {
            Self::Mean => mean(sorted).ok_or_else(|| Error::InvalidInput("mean of an empty sample".to_string())),
            Self::Median if sorted.is_empty() => Err(Error::InvalidInput("median of an empty sample".to_string())),
            Self::Median => Ok(quantile(sorted, 0.5)),
            Self::Mode => mode(sorted, bandwidth),
        }
    }
}

impl fmt::Display for PointEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_estimates() {
        let x = [1.0, 2.0, 2.0, 7.0];
        let bw = Bandwidth::default();
        assert_eq!(PointEstimate::Mean.estimate(&x, &bw).unwrap(), 3.0);
        assert_eq!(PointEstimate::Median.estimate(&x, &bw).unwrap(), 2.0);
        assert_eq!(PointEstimate::Mode.estimate(&x, &bw).unwrap(), 2.0);
    }

    #[test]
    fn test_empty_is_an_error() {
        for point in [PointEstimate::Mean, PointEstimate::Median, PointEstimate::Mode] {
            assert!(point.estimate(&[], &Bandwidth::default()).is_err());
        }
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&PointEstimate::Median).unwrap();
        assert_eq!(json, "\"Median\"");
        assert_eq!(PointEstimate::Mode.to_string(), "mode");
    }
}
