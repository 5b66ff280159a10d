//! Configuration for grouped point-interval summaries

use crate::density::Bandwidth;
use crate::estimator::{normalize_widths, DegeneratePolicy, PointInterval};
use crate::interval::IntervalEstimate;
use crate::point::PointEstimate;
use draws_core::Result;
use serde::{Deserialize, Serialize};

/// Interval width used when none is given
pub const DEFAULT_WIDTH: f64 = 0.95;

/// Everything [`point_interval`](crate::point_interval) needs besides the table
///
/// # Example
///
/// ```rust
/// use draws_interval::{IntervalEstimate, PointEstimate, PointIntervalConfig};
///
/// let config = PointIntervalConfig::new()
///     .with_target("b")
///     .group_by(["group"])
///     .with_point(PointEstimate::Mean)
///     .with_interval(IntervalEstimate::Hdi)
///     .with_widths(&[0.8, 0.5]);
///
/// assert_eq!(config.validated_widths().unwrap(), vec![0.5, 0.8]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointIntervalConfig {
    /// Value columns to summarise; empty means the table's only value column
    pub targets: Vec<String>,
    /// Index columns to group by; `None` means every index column
    pub group_by: Option<Vec<String>>,
    pub widths: Vec<f64>,
    pub estimator: PointInterval,
    /// Record failing (group, target) pairs instead of aborting
    pub skip_failing_groups: bool,
}

impl Default for PointIntervalConfig {
    fn default() -> Self {
        Self {
            targets: Vec::new(),
            group_by: None,
            widths: vec![DEFAULT_WIDTH],
            estimator: PointInterval::default(),
            skip_failing_groups: false,
        }
    }
}

impl PointIntervalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.targets.push(target.into());
        self
    }

    pub fn with_targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.targets = targets.into_iter().map(Into::into).collect();
        self
    }

    pub fn group_by<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_by = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_widths(mut self, widths: &[f64]) -> Self {
        self.widths = widths.to_vec();
        self
    }

    pub fn with_estimator(mut self, estimator: PointInterval) -> Self {
        self.estimator = estimator;
        self
    }

    pub fn with_point(mut self, point: PointEstimate) -> Self {
        self.estimator.point = point;
        self
    }

    pub fn with_interval(mut self, interval: IntervalEstimate) -> Self {
        self.estimator.interval = interval;
        self
    }

    pub fn with_bandwidth(mut self, bandwidth: Bandwidth) -> Self {
        self.estimator.bandwidth = bandwidth;
        self
    }

    pub fn with_degenerate_policy(mut self, degenerate: DegeneratePolicy) -> Self {
        self.estimator.degenerate = degenerate;
        self
    }

    pub fn with_min_mode_draws(mut self, min_mode_draws: usize) -> Self {
        self.estimator.min_mode_draws = min_mode_draws;
        self
    }

    pub fn skip_failing_groups(mut self, skip: bool) -> Self {
        self.skip_failing_groups = skip;
        self
    }

    /// Widths checked to lie in (0, 1), ascending, without duplicates
    pub fn validated_widths(&self) -> Result<Vec<f64>> {
        normalize_widths(&self.widths)
    }
}
