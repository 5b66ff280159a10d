//! Shared fixtures for draws-interval integration tests

use draws_core::{draw_keys, DrawsTable};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

pub fn normal_draws(n: usize, mean: f64, sd: f64, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let dist = Normal::new(mean, sd).unwrap();
    (0..n).map(|_| dist.sample(&mut rng)).collect()
}

/// Long table with `groups.len()` groups of normal draws; group `g` is
/// centred on `g * 10`
pub fn grouped_normal_table(groups: &[&str], chains: usize, iterations: usize) -> DrawsTable {
    let keys = draw_keys(chains, iterations);
    let n = keys.len();
    let mut all_keys = Vec::with_capacity(n * groups.len());
    let mut labels = Vec::with_capacity(n * groups.len());
    let mut values = Vec::with_capacity(n * groups.len());
    for (g, name) in groups.iter().enumerate() {
        all_keys.extend(keys.iter().copied());
        labels.extend(std::iter::repeat(name.to_string()).take(n));
        values.extend(normal_draws(n, g as f64 * 10.0, 1.0, g as u64));
    }
    DrawsTable::builder(all_keys)
        .index_column("group", labels)
        .value_column("theta", values)
        .build()
        .unwrap()
}
