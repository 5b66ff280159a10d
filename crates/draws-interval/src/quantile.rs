//! Sample quantiles of sorted draws
//!
//! All functions here expect their input sorted ascending and free of NaN;
//! [`draws_core::utils::sorted`] produces such a slice.

/// Type-7 sample quantile (linear interpolation between order statistics)
///
/// `h = (n - 1) p`; the result interpolates between `x[floor(h)]` and
/// `x[floor(h) + 1]`. For `p = 0.5` and an even count this is the average
/// of the two middle values.
///
/// Returns NaN for an empty slice.
///
/// ```rust
/// use draws_interval::quantile;
///
/// let x = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(quantile(&x, 0.5), 2.5);
/// assert_eq!(quantile(&x, 0.0), 1.0);
/// assert_eq!(quantile(&x, 1.0), 4.0);
/// ```
pub fn quantile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    let p = p.clamp(0.0, 1.0);
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = h - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

/// Several type-7 quantiles at once
pub fn quantiles(sorted: &[f64], probabilities: &[f64]) -> Vec<f64> {
    probabilities.iter().map(|&p| quantile(sorted, p)).collect()
}

/// Equal-tailed interval holding `width` of the probability mass
pub fn qi(sorted: &[f64], width: f64) -> (f64, f64) {
    let tail = (1.0 - width) / 2.0;
    (quantile(sorted, tail), quantile(sorted, 1.0 - tail))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_odd_and_even_medians() {
        assert_eq!(quantile(&[1.0, 2.0, 3.0], 0.5), 2.0);
        assert_eq!(quantile(&[1.0, 2.0, 3.0, 10.0], 0.5), 2.5);
    }

    #[test]
    fn test_interpolation() {
        let x: Vec<f64> = (1..=11).map(f64::from).collect();
        assert_relative_eq!(quantile(&x, 0.25), 3.5);
        assert_relative_eq!(quantile(&x, 0.975), 10.75);
    }

    #[test]
    fn test_single_and_empty() {
        assert_eq!(quantile(&[4.2], 0.1), 4.2);
        assert!(quantile(&[], 0.5).is_nan());
    }

    #[test]
    fn test_qi_is_symmetric_in_rank() {
        let x: Vec<f64> = (0..=100).map(f64::from).collect();
        let (lower, upper) = qi(&x, 0.9);
        assert_relative_eq!(lower, 5.0);
        assert_relative_eq!(upper, 95.0);
    }

    #[test]
    fn test_quantiles_many() {
        let x = [0.0, 10.0];
        assert_eq!(quantiles(&x, &[0.0, 0.5, 1.0]), vec![0.0, 5.0, 10.0]);
    }
}
