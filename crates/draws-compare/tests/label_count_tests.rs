//! Property tests for the number of comparisons produced per mode

use draws_compare::{compare_levels, ComparisonConfig, ComparisonMode};
use draws_core::{draw_keys, DrawKey, DrawsTable};
use proptest::prelude::*;

fn factor_table(k: usize, n_draws: usize) -> DrawsTable {
    let keys: Vec<DrawKey> = draw_keys(1, n_draws)
        .into_iter()
        .flat_map(|key| std::iter::repeat(key).take(k))
        .collect();
    let levels: Vec<String> = (0..n_draws).flat_map(|_| (0..k).map(|l| format!("L{l}"))).collect();
    let values: Vec<f64> = (0..keys.len()).map(|i| i as f64).collect();
    DrawsTable::builder(keys)
        .index_column("level", levels)
        .value_column("y", values)
        .build()
        .unwrap()
}

fn label_count(table: &DrawsTable, mode: ComparisonMode) -> (usize, usize) {
    let out = compare_levels(table, "y", "level", &ComparisonConfig::new().with_mode(mode)).unwrap();
    (out.index_column("level").unwrap().levels().len(), out.len())
}

proptest! {
    #[test]
    fn prop_all_pairs_counts(k in 2usize..7, n_draws in 1usize..20) {
        let table = factor_table(k, n_draws);
        let (labels, rows) = label_count(&table, ComparisonMode::AllPairs);
        prop_assert_eq!(labels, k * (k - 1) / 2);
        prop_assert_eq!(rows, labels * n_draws);
    }

    #[test]
    fn prop_ordered_pairs_counts(k in 2usize..7, n_draws in 1usize..20) {
        let table = factor_table(k, n_draws);
        let (labels, rows) = label_count(&table, ComparisonMode::OrderedPairs);
        prop_assert_eq!(labels, k * (k - 1));
        prop_assert_eq!(rows, labels * n_draws);
    }

    #[test]
    fn prop_consecutive_and_control_counts(k in 2usize..7, n_draws in 1usize..20) {
        let table = factor_table(k, n_draws);
        prop_assert_eq!(label_count(&table, ComparisonMode::Consecutive).0, k - 1);
        prop_assert_eq!(label_count(&table, ComparisonMode::Control("L0".to_string())).0, k - 1);
    }
}

#[test]
fn test_differences_are_antisymmetric_under_ordered_pairs() {
    let table = factor_table(3, 4);
    let out = compare_levels(
        &table,
        "y",
        "level",
        &ComparisonConfig::new().with_mode(ComparisonMode::OrderedPairs),
    )
    .unwrap();
    let labels = out.index_column("level").unwrap();
    let values = out.value_column("y").unwrap();
    for r in 0..out.len() {
        let label = labels.get(r).unwrap();
        let (a, b) = label.split_once(" - ").unwrap();
        let mirrored = format!("{b} - {a}");
        let m = (0..out.len())
            .find(|&s| labels.get(s) == Some(mirrored.as_str()) && out.row(s).key() == out.row(r).key())
            .unwrap();
        assert_eq!(values.get(r).unwrap(), -values.get(m).unwrap());
    }
}
