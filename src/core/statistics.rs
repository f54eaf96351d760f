//! Descriptive statistics used by error-bar and box-and-whisker segments.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Interquartile-range multiplier used for whisker fences.
const WHISKER_FENCE_FACTOR: f64 = 1.5;

/// Arithmetic mean of the finite values; `None` when there are none.
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    let (sum, count) = values
        .iter()
        .filter(|value| value.is_finite())
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Sample standard deviation, `sqrt(sum((x - mean)^2) / (n - 1))`.
///
/// Fewer than two finite values yield `None`.
#[must_use]
pub fn sample_standard_deviation(values: &[f64]) -> Option<f64> {
    let average = mean(values)?;
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.len() < 2 {
        return None;
    }
    let squares: f64 = finite.iter().map(|value| (value - average).powi(2)).sum();
    Some((squares / (finite.len() - 1) as f64).sqrt())
}

/// Standard error of the mean, `standard_deviation / sqrt(n)`.
#[must_use]
pub fn standard_error(values: &[f64]) -> Option<f64> {
    let deviation = sample_standard_deviation(values)?;
    let count = values.iter().filter(|v| v.is_finite()).count();
    Some(deviation / (count as f64).sqrt())
}

/// Quartile estimation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoxPlotMode {
    /// Percentile rank `(n + 1) * p`, excluding the median from both halves.
    #[default]
    Exclusive,
    /// Percentile rank `(n - 1) * p + 1`, including the median.
    Inclusive,
    /// Median of the lower and upper halves.
    Normal,
}

/// Five-number summary plus mean and outliers for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxPlotStatistics {
    pub minimum: f64,
    pub lower_quartile: f64,
    pub median: f64,
    pub upper_quartile: f64,
    pub maximum: f64,
    pub mean: f64,
    pub outliers: Vec<f64>,
}

impl BoxPlotStatistics {
    /// Computes the summary of the finite values in `values`.
    ///
    /// Whiskers stop at the most extreme values inside the 1.5 IQR fences;
    /// everything beyond them is reported as an outlier in ascending order.
    #[must_use]
    pub fn compute(values: &[f64], mode: BoxPlotMode) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by_key(|value| OrderedFloat(*value));

        let median = median_of(&sorted);
        let (lower_quartile, upper_quartile) = match mode {
            BoxPlotMode::Exclusive => (
                percentile_exclusive(&sorted, 0.25),
                percentile_exclusive(&sorted, 0.75),
            ),
            BoxPlotMode::Inclusive => (
                percentile_inclusive(&sorted, 0.25),
                percentile_inclusive(&sorted, 0.75),
            ),
            BoxPlotMode::Normal => quartiles_by_halves(&sorted),
        };

        let spread = (upper_quartile - lower_quartile) * WHISKER_FENCE_FACTOR;
        let lower_fence = lower_quartile - spread;
        let upper_fence = upper_quartile + spread;

        let mut minimum = f64::INFINITY;
        let mut maximum = f64::NEG_INFINITY;
        let mut outliers = Vec::new();
        for &value in &sorted {
            if value < lower_fence || value > upper_fence {
                outliers.push(value);
            } else {
                minimum = minimum.min(value);
                maximum = maximum.max(value);
            }
        }
        // Fences always contain the quartiles, so at least one value remains
        // unless rounding pushed everything out; fall back to the box edges.
        if minimum > maximum {
            minimum = lower_quartile;
            maximum = upper_quartile;
        }

        Some(Self {
            minimum,
            lower_quartile,
            median,
            upper_quartile,
            maximum,
            mean: mean(&sorted).unwrap_or(median),
            outliers,
        })
    }
}

fn median_of(sorted: &[f64]) -> f64 {
    let count = sorted.len();
    if count % 2 == 0 {
        (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
    } else {
        sorted[count / 2]
    }
}

fn interpolate_rank(sorted: &[f64], zero_based_rank: f64) -> f64 {
    let last = sorted.len() - 1;
    if zero_based_rank <= 0.0 {
        return sorted[0];
    }
    if zero_based_rank >= last as f64 {
        return sorted[last];
    }
    let lower = zero_based_rank.floor();
    let fraction = zero_based_rank - lower;
    let index = lower as usize;
    sorted[index] + fraction * (sorted[index + 1] - sorted[index])
}

fn percentile_exclusive(sorted: &[f64], fraction: f64) -> f64 {
    let rank = (sorted.len() as f64 + 1.0) * fraction;
    interpolate_rank(sorted, rank - 1.0)
}

fn percentile_inclusive(sorted: &[f64], fraction: f64) -> f64 {
    let rank = (sorted.len() as f64 - 1.0) * fraction;
    interpolate_rank(sorted, rank)
}

fn quartiles_by_halves(sorted: &[f64]) -> (f64, f64) {
    let count = sorted.len();
    if count == 1 {
        return (sorted[0], sorted[0]);
    }
    let half = count / 2;
    let lower = &sorted[..half];
    let upper = if count % 2 == 0 {
        &sorted[half..]
    } else {
        &sorted[half + 1..]
    };
    (median_of(lower), median_of(upper))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quartiles_by_mode() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];

        let exclusive = BoxPlotStatistics::compute(&values, BoxPlotMode::Exclusive).expect("stats");
        assert!((exclusive.lower_quartile - 2.0).abs() <= 1e-9);
        assert!((exclusive.upper_quartile - 6.0).abs() <= 1e-9);

        let inclusive = BoxPlotStatistics::compute(&values, BoxPlotMode::Inclusive).expect("stats");
        assert!((inclusive.lower_quartile - 2.5).abs() <= 1e-9);
        assert!((inclusive.upper_quartile - 5.5).abs() <= 1e-9);

        let normal = BoxPlotStatistics::compute(&values, BoxPlotMode::Normal).expect("stats");
        assert!((normal.lower_quartile - 2.0).abs() <= 1e-9);
        assert!((normal.upper_quartile - 6.0).abs() <= 1e-9);
        assert!((normal.median - 4.0).abs() <= 1e-9);
    }

    #[test]
    fn values_beyond_fences_become_outliers() {
        let values = [10.0, 11.0, 12.0, 13.0, 14.0, 60.0];
        let stats = BoxPlotStatistics::compute(&values, BoxPlotMode::Normal).expect("stats");
        assert_eq!(stats.outliers, vec![60.0]);
        assert!((stats.maximum - 14.0).abs() <= 1e-9);
        assert!((stats.minimum - 10.0).abs() <= 1e-9);
    }

    #[test]
    fn empty_or_nan_input_has_no_summary() {
        assert!(BoxPlotStatistics::compute(&[], BoxPlotMode::Normal).is_none());
        assert!(BoxPlotStatistics::compute(&[f64::NAN], BoxPlotMode::Normal).is_none());
        assert!(sample_standard_deviation(&[3.0]).is_none());
    }
}
