use serde::{Deserialize, Serialize};

use crate::core::types::DoubleRange;
use crate::error::{ChartError, ChartResult};

/// Linear mapping from an axis' visible range onto a pixel span.
///
/// `pixel_start..pixel_end` may run in either direction; inversion is applied
/// on top of that by swapping the span ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidRange {
                start: domain_start,
                end: domain_end,
            });
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    pub fn from_range(range: DoubleRange) -> ChartResult<Self> {
        Self::new(range.start, range.end)
    }

    /// Fraction of the domain covered by `value`; `0` at the start, `1` at the end.
    ///
    /// Values outside the domain extrapolate linearly. NaN propagates.
    #[must_use]
    pub fn value_to_coefficient(self, value: f64) -> f64 {
        (value - self.domain_start) / (self.domain_end - self.domain_start)
    }

    /// Maps `value` onto `[pixel_start, pixel_end]`, reversing the span when
    /// `inversed` is set.
    #[must_use]
    pub fn domain_to_pixel(self, value: f64, pixel_start: f64, pixel_end: f64, inversed: bool) -> f64 {
        let coefficient = self.value_to_coefficient(value);
        let coefficient = if inversed { 1.0 - coefficient } else { coefficient };
        pixel_start + coefficient * (pixel_end - pixel_start)
    }
}
