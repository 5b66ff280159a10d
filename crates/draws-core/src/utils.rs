//! Utility functions for working with draw slices

use std::cmp::Ordering;

/// Sort draws ascending and return a new vector
///
/// NaN values are placed at the end.
///
/// # Examples
///
/// ```rust
/// use draws_core::utils::sorted;
///
/// let draws = vec![3.0, 1.0, 5.0, 2.0, 4.0];
/// assert_eq!(sorted(&draws), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
/// ```
pub fn sorted(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
    });
    sorted
}

/// Arithmetic mean; `None` for an empty slice
///
/// ```rust
/// use draws_core::utils::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
/// assert_eq!(mean(&[]), None);
/// ```
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Sample standard deviation with Bessel's correction
///
/// Returns 0.0 for slices with less than 2 elements.
pub fn std_dev(data: &[f64]) -> f64 {
    let Some(m) = mean(data) else {
        return 0.0;
    };
    if data.len() < 2 {
        return 0.0;
    }
    let ss: f64 = data.iter().map(|&x| (x - m) * (x - m)).sum();
    (ss / (data.len() - 1) as f64).sqrt()
}
