//! Shared utilities for draws-spec integration tests

use draws_core::{InMemorySource, VariableDraws};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

/// Seeded normal draws laid out as `chains` x `iterations`
pub fn normal_chains(chains: usize, iterations: usize, mean: f64, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let normal = Normal::new(mean, 1.0).unwrap();
    (0..chains)
        .map(|_| (0..iterations).map(|_| normal.sample(&mut rng)).collect())
        .collect()
}

/// A source holding `b[term group]` for every combination of the given levels
pub fn grouped_source(terms: &[&str], groups: &[&str], chains: usize, iterations: usize) -> InMemorySource {
    let mut source = InMemorySource::new();
    let mut seed = 0;
    for term in terms {
        for group in groups {
            let name = format!("b[{} {}]", term, group);
            source.insert(name, VariableDraws::new(normal_chains(chains, iterations, seed as f64, seed)));
            seed += 1;
        }
    }
    source
}
