//! Common test utilities for draws-polars tests

use polars::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

/// Wide draws frame with `.chain`, `.iteration` and one normal column per
/// name; column `k` is centred on `k`
pub fn wide_frame(names: &[&str], chains: usize, iterations: usize) -> DataFrame {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let chain: Vec<i64> = (1..=chains as i64).flat_map(|c| std::iter::repeat(c).take(iterations)).collect();
    let iteration: Vec<i64> = (0..chains).flat_map(|_| 1..=iterations as i64).collect();
    let mut columns: Vec<Column> = vec![
        Series::new(PlSmallStr::from(".chain"), chain).into(),
        Series::new(PlSmallStr::from(".iteration"), iteration).into(),
    ];
    for (k, name) in names.iter().enumerate() {
        let normal = Normal::new(k as f64, 1.0).unwrap();
        let values: Vec<f64> = (0..chains * iterations).map(|_| normal.sample(&mut rng)).collect();
        columns.push(Series::new(PlSmallStr::from(*name), values).into());
    }
    DataFrame::new(columns).unwrap()
}

/// Helper function to extract a single value from a result DataFrame
pub fn extract_value(df: &DataFrame, column: &str, row: usize) -> f64 {
    df.column(column).unwrap().f64().unwrap().get(row).unwrap()
}
