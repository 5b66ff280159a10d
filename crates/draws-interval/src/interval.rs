//! Interval statistics

use crate::quantile::qi;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the interval around the point estimate is formed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntervalEstimate {
    /// Equal-tailed quantile interval
    Qi,
    /// Shortest interval holding the requested mass
    Hdi,
}

impl IntervalEstimate {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Qi => "qi",
            Self::Hdi => "hdi",
        }
    }

    /// Bounds at `width` over sorted, non-empty draws
    pub fn bounds(&self, sorted: &[f64], width: f64) -> (f64, f64) {
        match self {
            Self::Qi => qi(sorted, width),
            Self::Hdi => hdi(sorted, width),
        }
    }
}

impl fmt::Display for IntervalEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Highest-density interval from sorted draws
///
/// Takes a window of `k = ceil(width * n)` consecutive order statistics
/// (clamped to `[1, n]`) and returns the narrowest one; the first wins on
/// ties. A product within rounding error of an integer is taken as that
/// integer, so `0.55 * 100` gives a window of 55 draws.
///
/// The window can hold one order statistic more than the interpolated
/// span of [`qi`](crate::qi), so on symmetric draws the HDI may exceed
/// the QI width by at most the gaps next to the QI bounds. This is a
/// single-interval approximation: for multimodal draws the result may
/// span a low-density gap.
///
/// ```rust
/// use draws_interval::hdi;
///
/// let x = [0.0, 1.0, 1.1, 1.2, 1.3, 5.0];
/// assert_eq!(hdi(&x, 0.6), (1.0, 1.3));
/// ```
pub fn hdi(sorted: &[f64], width: f64) -> (f64, f64) {
    let n = sorted.len();
    if n == 0 {
        return (f64::NAN, f64::NAN);
    }
    let k = window_len(width, n);

    let mut best = 0;
    let mut best_span = f64::INFINITY;
    for i in 0..=(n - k) {
        let span = sorted[i + k - 1] - sorted[i];
        if span < best_span {
            best = i;
            best_span = span;
        }
    }
    (sorted[best], sorted[best + k - 1])
}

/// `ceil(width * n)` clamped to `[1, n]`, snapping near-integer products
fn window_len(width: f64, n: usize) -> usize {
    let target = width * n as f64;
    let nearest = target.round();
    let k = if (target - nearest).abs() <= 1e-9 * target.max(1.0) {
        nearest
    } else {
        target.ceil()
    };
    (k as usize).clamp(1, n)
}
