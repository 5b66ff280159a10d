//! The configured point/interval pair applied to one sample

use crate::density::Bandwidth;
use crate::interval::IntervalEstimate;
use crate::point::PointEstimate;
use crate::quantile::quantile;
use draws_core::utils::sorted;
use draws_core::{Error, EstimationError, Result};
use serde::{Deserialize, Serialize};

/// What to do when a mode is requested from too few draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DegeneratePolicy {
    /// Report the median with a zero-width interval
    #[default]
    Collapse,
    /// Fail with `EstimationError::DegenerateMode`
    Error,
}

/// One summarised width
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub point: f64,
    pub lower: f64,
    pub upper: f64,
    pub width: f64,
}

/// A point statistic paired with an interval statistic
///
/// ```rust
/// use draws_interval::{IntervalEstimate, PointEstimate, PointInterval};
///
/// let draws: Vec<f64> = (0..=100).map(f64::from).collect();
/// let estimates = PointInterval::new(PointEstimate::Median, IntervalEstimate::Qi)
///     .summarise(&draws, &[0.5, 0.9])
///     .unwrap();
///
/// assert_eq!(estimates[0].point, 50.0);
/// assert_eq!((estimates[0].lower, estimates[0].upper), (25.0, 75.0));
/// assert!((estimates[1].lower - 5.0).abs() < 1e-9);
/// assert!((estimates[1].upper - 95.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointInterval {
    pub point: PointEstimate,
    pub interval: IntervalEstimate,
    pub bandwidth: Bandwidth,
    pub degenerate: DegeneratePolicy,
    /// Fewest draws a mode is computed from
    pub min_mode_draws: usize,
}

impl Default for PointInterval {
    fn default() -> Self {
        Self::new(PointEstimate::Median, IntervalEstimate::Qi)
    }
}

/// Where a sample came from, for error messages
pub(crate) struct SampleContext<'a> {
    pub target: &'a str,
    pub group: &'a [String],
}

impl PointInterval {
    pub fn new(point: PointEstimate, interval: IntervalEstimate) -> Self {
        Self {
            point,
            interval,
            bandwidth: Bandwidth::default(),
            degenerate: DegeneratePolicy::default(),
            min_mode_draws: 2,
        }
    }

    pub fn with_bandwidth(mut self, bandwidth: Bandwidth) -> Self {
        self.bandwidth = bandwidth;
        self
    }

    pub fn with_degenerate_policy(mut self, degenerate: DegeneratePolicy) -> Self {
        self.degenerate = degenerate;
        self
    }

    pub fn with_min_mode_draws(mut self, min_mode_draws: usize) -> Self {
        self.min_mode_draws = min_mode_draws;
        self
    }

    /// Summarise a plain sample at each width. NaN draws are ignored;
    /// widths are validated, sorted ascending and deduplicated.
    pub fn summarise(&self, values: &[f64], widths: &[f64]) -> Result<Vec<Estimate>> {
        let widths = normalize_widths(widths)?;
        let context = SampleContext {
            target: "values",
            group: &[],
        };
        self.summarise_sample(values, &widths, &context)
    }

    /// Widths must already be normalized
    pub(crate) fn summarise_sample(
        &self,
        values: &[f64],
        widths: &[f64],
        context: &SampleContext<'_>,
    ) -> Result<Vec<Estimate>> {
        let finite: Vec<f64> = values.iter().copied().filter(|x| !x.is_nan()).collect();
        if finite.is_empty() {
            return Err(EstimationError::NoDraws {
                target: context.target.to_string(),
                group: context.group.to_vec(),
            }
            .into());
        }
        let draws = sorted(&finite);

        if self.point == PointEstimate::Mode && draws.len() < self.min_mode_draws {
            return match self.degenerate {
                DegeneratePolicy::Error => Err(EstimationError::DegenerateMode {
                    target: context.target.to_string(),
                    group: context.group.to_vec(),
                    required: self.min_mode_draws,
                    actual: draws.len(),
                }
                .into()),
                DegeneratePolicy::Collapse => {
                    let point = quantile(&draws, 0.5);
                    Ok(widths
                        .iter()
                        .map(|&width| Estimate {
                            point,
                            lower: point,
                            upper: point,
                            width,
                        })
                        .collect())
                }
            };
        }

        let point = self.point.estimate(&draws, &self.bandwidth)?;
        Ok(widths
            .iter()
            .map(|&width| {
                let (lower, upper) = self.interval.bounds(&draws, width);
                Estimate {
                    point,
                    lower,
                    upper,
                    width,
                }
            })
            .collect())
    }
}

/// Validate widths, then sort ascending and drop duplicates
pub fn normalize_widths(widths: &[f64]) -> Result<Vec<f64>> {
    if widths.is_empty() {
        return Err(EstimationError::InvalidParameter("at least one interval width is required".to_string()).into());
    }
    for &w in widths {
        Error::check_width(w)?;
    }
    let mut widths = widths.to_vec();
    widths.sort_by(f64::total_cmp);
    widths.dedup();
    Ok(widths)
}
