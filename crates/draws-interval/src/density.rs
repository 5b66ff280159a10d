//! Kernel density estimation for the mode
//!
//! Continuous draws use the argmax of a Gaussian KDE evaluated on a fixed
//! grid. Draws that are all integral are treated as discrete and use the
//! most frequent value instead.

use crate::quantile::quantile;
use draws_core::utils::std_dev;
use draws_core::{Error, EstimationError, Result};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use statrs::distribution::{Continuous, Normal};
use std::collections::BTreeMap;

/// Number of grid points the density is evaluated on
pub const GRID_POINTS: usize = 512;

/// Grid extends this many bandwidths beyond the extreme draws
const GRID_PADDING: f64 = 3.0;

/// Bandwidth selection rule
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Bandwidth {
    /// Silverman's rule of thumb, `0.9 min(sd, IQR/1.34) n^(-1/5)`
    #[default]
    Silverman,
    /// Scott's variant, `1.06 min(sd, IQR/1.34) n^(-1/5)`
    Scott,
    /// A fixed bandwidth
    Fixed(f64),
}

impl Bandwidth {
    /// Bandwidth for sorted draws. Zero only when the draws are constant.
    pub fn select(&self, sorted: &[f64]) -> Result<f64> {
        match *self {
            Self::Silverman => Ok(rule_of_thumb(sorted, 0.9)),
            Self::Scott => Ok(rule_of_thumb(sorted, 1.06)),
            Self::Fixed(h) if h.is_finite() && h > 0.0 => Ok(h),
            Self::Fixed(h) => Err(EstimationError::InvalidParameter(format!(
                "bandwidth must be finite and > 0, got {h}"
            ))
            .into()),
        }
    }
}

fn rule_of_thumb(sorted: &[f64], factor: f64) -> f64 {
    let n = sorted.len();
    if n < 2 || sorted[0] == sorted[n - 1] {
        return 0.0;
    }
    let sd = std_dev(sorted);
    let iqr = quantile(sorted, 0.75) - quantile(sorted, 0.25);
    let mut scale = sd.min(iqr / 1.34);
    if scale <= 0.0 {
        // Heavy ties in the middle half; fall back to the spread of the whole sample
        scale = sd;
    }
    factor * scale * (n as f64).powf(-0.2)
}

/// Gaussian kernel density over a borrowed sample
#[derive(Debug, Clone)]
pub struct KernelDensity<'a> {
    draws: &'a [f64],
    bandwidth: f64,
    kernel: Normal,
}

impl<'a> KernelDensity<'a> {
    /// Build a density from sorted, non-empty draws
    pub fn new(sorted: &'a [f64], bandwidth: f64) -> Result<Self> {
        if sorted.is_empty() {
            return Err(Error::InvalidInput("density of an empty sample".to_string()));
        }
        if !bandwidth.is_finite() || bandwidth <= 0.0 {
            return Err(EstimationError::InvalidParameter(format!(
                "bandwidth must be finite and > 0, got {bandwidth}"
            ))
            .into());
        }
        let kernel =
            Normal::new(0.0, 1.0).map_err(|e| EstimationError::InvalidParameter(e.to_string()))?;
        Ok(Self {
            draws: sorted,
            bandwidth,
            kernel,
        })
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Density at `x`
    pub fn evaluate(&self, x: f64) -> f64 {
        let inv_h = 1.0 / self.bandwidth;
        let sum: f64 = self.draws.iter().map(|&d| self.kernel.pdf((x - d) * inv_h)).sum();
        sum * inv_h / self.draws.len() as f64
    }

    /// `(x, density)` pairs on an evenly spaced grid of `points` points over
    /// `[min - 3h, max + 3h]`
    pub fn grid(&self, points: usize) -> Vec<(f64, f64)> {
        let (lo, hi) = self.support();
        let step = if points > 1 {
            (hi - lo) / (points - 1) as f64
        } else {
            0.0
        };
        (0..points)
            .map(|i| {
                let x = lo + step * i as f64;
                (x, self.evaluate(x))
            })
            .collect()
    }

    /// Grid point of highest density; the first wins on ties
    pub fn mode(&self) -> f64 {
        let mut best = (f64::NAN, f64::NEG_INFINITY);
        for (x, d) in self.grid(GRID_POINTS) {
            if d > best.1 {
                best = (x, d);
            }
        }
        best.0
    }

    fn support(&self) -> (f64, f64) {
        let pad = GRID_PADDING * self.bandwidth;
        let first = self.draws[0];
        let last = self.draws[self.draws.len() - 1];
        (first - pad, last + pad)
    }
}

/// Whether every draw is a finite integer
pub fn is_discrete(draws: &[f64]) -> bool {
    draws.iter().all(|x| x.is_finite() && x.fract() == 0.0)
}

/// Most frequent value; the smallest wins on ties. NaN for an empty slice.
pub fn discrete_mode(draws: &[f64]) -> f64 {
    let mut counts: BTreeMap<OrderedFloat<f64>, usize> = BTreeMap::new();
    for &x in draws {
        *counts.entry(OrderedFloat(x)).or_insert(0) += 1;
    }
    let mut best = (f64::NAN, 0);
    for (value, count) in counts {
        if count > best.1 {
            best = (value.into_inner(), count);
        }
    }
    best.0
}

/// Mode of sorted, non-empty draws
///
/// Integral draws use [`discrete_mode`]; otherwise the KDE argmax with the
/// selected bandwidth. Constant draws return their common value.
pub fn mode(sorted: &[f64], bandwidth: &Bandwidth) -> Result<f64> {
    if sorted.is_empty() {
        return Err(Error::InvalidInput("mode of an empty sample".to_string()));
    }
    if is_discrete(sorted) {
        return Ok(discrete_mode(sorted));
    }
    let h = bandwidth.select(sorted)?;
    if h == 0.0 {
        return Ok(sorted[0]);
    }
    Ok(KernelDensity::new(sorted, h)?.mode())
}
