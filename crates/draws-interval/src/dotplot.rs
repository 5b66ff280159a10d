//! Quantiles for quantile dotplots

use crate::quantile::quantile;
use draws_core::utils::sorted;
use draws_core::{Error, Result};

/// Plotting positions `(i - a) / (n + 1 - 2a)` for `i = 1..=n`, with
/// `a = 3/8` when `n <= 10` and `1/2` otherwise
pub fn ppoints(n: usize) -> Vec<f64> {
    let a = if n <= 10 { 3.0 / 8.0 } else { 0.5 };
    let denominator = n as f64 + 1.0 - 2.0 * a;
    (1..=n).map(|i| (i as f64 - a) / denominator).collect()
}

/// `n` type-7 quantiles of `values` at [`ppoints`]`(n)`, for drawing a
/// quantile dotplot with one dot per quantile
///
/// ```rust
/// use draws_interval::dotplot_quantiles;
///
/// let draws: Vec<f64> = (0..=1000).map(|i| i as f64 / 1000.0).collect();
/// let dots = dotplot_quantiles(&draws, 20).unwrap();
/// assert_eq!(dots.len(), 20);
/// assert!((dots[0] - 0.025).abs() < 1e-9);
/// ```
pub fn dotplot_quantiles(values: &[f64], n: usize) -> Result<Vec<f64>> {
    let finite: Vec<f64> = values.iter().copied().filter(|x| !x.is_nan()).collect();
    if finite.is_empty() {
        return Err(Error::InvalidInput("dotplot quantiles of an empty sample".to_string()));
    }
    let draws = sorted(&finite);
    Ok(ppoints(n).into_iter().map(|p| quantile(&draws, p)).collect())
}
