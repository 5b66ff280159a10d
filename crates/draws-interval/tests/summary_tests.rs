//! Integration and property tests for grouped point-interval summaries

mod common;

use approx::assert_abs_diff_eq;
use common::{grouped_normal_table, normal_draws};
use draws_interval::*;
use proptest::prelude::*;

#[test]
fn test_normal_groups_recover_means() {
    let table = grouped_normal_table(&["a", "b", "c"], 4, 250);
    let summary = mean_qi(&table, &[0.95]).unwrap();

    assert_eq!(summary.len(), 3);
    for (g, row) in summary.iter().enumerate() {
        let centre = g as f64 * 10.0;
        assert_abs_diff_eq!(row.point, centre, epsilon = 0.15);
        assert_abs_diff_eq!(row.lower, centre - 1.96, epsilon = 0.3);
        assert_abs_diff_eq!(row.upper, centre + 1.96, epsilon = 0.3);
    }
}

#[test]
fn test_all_shortcuts_bracket_the_point() {
    let table = grouped_normal_table(&["a", "b"], 2, 500);
    for summarise in [mean_qi, median_qi, mode_qi, mean_hdi, median_hdi, mode_hdi] {
        let summary = summarise(&table, &[0.5, 0.8, 0.95]).unwrap();
        assert_eq!(summary.len(), 6);
        for row in &summary {
            assert!(row.lower <= row.point && row.point <= row.upper, "{:?}", row);
        }
    }
}

#[test]
fn test_hdi_narrower_for_skewed_draws() {
    let draws: Vec<f64> = normal_draws(4000, 0.0, 1.0, 11).into_iter().map(f64::exp).collect();
    let qi = PointInterval::median_qi().summarise(&draws, &[0.9]).unwrap()[0];
    let hdi = PointInterval::median_hdi().summarise(&draws, &[0.9]).unwrap()[0];
    assert!(hdi.upper - hdi.lower < qi.upper - qi.lower);
    assert!(hdi.lower < qi.lower);
}

#[test]
fn test_mode_of_skewed_draws_is_below_median() {
    let draws: Vec<f64> = normal_draws(4000, 0.0, 0.5, 5).into_iter().map(f64::exp).collect();
    let mode = PointInterval::mode_qi().summarise(&draws, &[0.5]).unwrap()[0].point;
    let median = PointInterval::median_qi().summarise(&draws, &[0.5]).unwrap()[0].point;
    // lognormal(0, 0.5): mode exp(-0.25) ~ 0.78, median 1
    assert!(mode < median);
    assert_abs_diff_eq!(mode, (-0.25f64).exp(), epsilon = 0.12);
}

#[test]
fn test_rows_follow_group_first_appearance() {
    let groups = ["g1", "g2", "g3", "g4", "g5", "g6"];
    let table = grouped_normal_table(&groups, 1, 200);
    let summary = median_qi(&table, &[0.66, 0.95]).unwrap();
    let labels: Vec<&str> = summary
        .group_values("group")
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    let expected: Vec<&str> = groups.iter().flat_map(|g| [*g, *g]).collect();
    assert_eq!(labels, expected);
}

proptest! {
    #[test]
    fn prop_qi_contains_point_and_is_monotone(
        draws in prop::collection::vec(-1e3f64..1e3, 1..200),
        w1 in 0.01f64..0.98,
        delta in 0.005f64..0.5,
    ) {
        let w2 = (w1 + delta).min(0.99);
        prop_assume!(w2 > w1);
        let estimates = PointInterval::median_qi().summarise(&draws, &[w1, w2]).unwrap();
        let (narrow, wide) = (estimates[0], estimates[1]);

        let tol = 1e-9;
        prop_assert!(narrow.lower <= narrow.point + tol && narrow.point <= narrow.upper + tol);
        prop_assert!(wide.lower <= narrow.lower + tol);
        prop_assert!(wide.upper + tol >= narrow.upper);
    }

    #[test]
    fn prop_hdi_not_wider_than_qi_for_normal(seed in 0u64..500, n in 500usize..2000, w in 0.5f64..0.9) {
        let draws = normal_draws(n, 0.0, 1.0, seed);
        let sorted = draws_core::utils::sorted(&draws);
        let (ql, qu) = qi(&sorted, w);
        let (hl, hu) = hdi(&sorted, w);
        // the hdi window may hold one more order statistic than the qi span,
        // so allow the gaps next to each qi bound
        let lo = ((n - 1) as f64 * (1.0 - w) / 2.0).floor() as usize;
        let hi = ((n - 1) as f64 * (1.0 + w) / 2.0).floor() as usize;
        let gap = |i: usize| sorted[(i + 1).min(n - 1)] - sorted[i];
        prop_assert!(hu - hl <= (qu - ql) + gap(lo) + gap(hi) + 1e-12);
    }

    #[test]
    fn prop_hdi_holds_requested_mass(draws in prop::collection::vec(-100f64..100.0, 1..300), w in 0.05f64..0.95) {
        let sorted = draws_core::utils::sorted(&draws);
        let (lower, upper) = hdi(&sorted, w);
        let inside = sorted.iter().filter(|&&x| x >= lower && x <= upper).count();
        prop_assert!(inside as f64 >= w * sorted.len() as f64 * (1.0 - 1e-9));
    }
}
