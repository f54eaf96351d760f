use serde::{Deserialize, Serialize};

/// Inclusive min/max pair used for visible ranges and data accumulators.
///
/// An empty range has `start = +inf` and `end = -inf` so that the first
/// `extend` call seeds both ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoubleRange {
    pub start: f64,
    pub end: f64,
}

impl DoubleRange {
    #[must_use]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self {
            start: f64::INFINITY,
            end: f64::NEG_INFINITY,
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        !(self.start <= self.end)
    }

    #[must_use]
    pub fn delta(self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.end - self.start
        }
    }

    /// Grows the range so it contains `value`. NaN values are ignored.
    pub fn extend(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }
        self.start = self.start.min(value);
        self.end = self.end.max(value);
    }

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        Self::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// Returns `true` when `[low, high]` overlaps this range (inclusive).
    #[must_use]
    pub fn intersects(self, low: f64, high: f64) -> bool {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        low <= self.end && high >= self.start
    }

    /// Floor of `start` and ceiling of `end`; the span used to clip segments.
    #[must_use]
    pub fn widened_to_integers(self) -> Self {
        Self::new(self.start.floor(), self.end.ceil())
    }
}

impl Default for DoubleRange {
    fn default() -> Self {
        Self::empty()
    }
}

/// Data extents accumulated by a series while its segments ingest values.
///
/// Segments only touch these through [`SeriesRanges::extend_x`] and
/// [`SeriesRanges::extend_y`] during `set_data`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SeriesRanges {
    pub x: DoubleRange,
    pub y: DoubleRange,
}

impl SeriesRanges {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend_x(&mut self, value: f64) {
        self.x.extend(value);
    }

    pub fn extend_y(&mut self, value: f64) {
        self.y.extend(value);
    }
}

#[cfg(test)]
mod tests {
    use super::{DoubleRange, SeriesRanges};

    #[test]
    fn empty_range_is_seeded_by_first_extend() {
        let mut range = DoubleRange::empty();
        assert!(range.is_empty());
        range.extend(4.0);
        assert_eq!(range, DoubleRange::new(4.0, 4.0));
        range.extend(f64::NAN);
        range.extend(-1.0);
        assert_eq!(range, DoubleRange::new(-1.0, 4.0));
    }

    #[test]
    fn intersects_accepts_reversed_bounds() {
        let range = DoubleRange::new(0.0, 10.0);
        assert!(range.intersects(12.0, 9.5));
        assert!(!range.intersects(10.5, 11.0));
    }

    #[test]
    fn series_ranges_accumulate_independently() {
        let mut ranges = SeriesRanges::new();
        ranges.extend_x(2.0);
        ranges.extend_y(-3.0);
        ranges.extend_y(5.0);
        assert_eq!(ranges.x, DoubleRange::new(2.0, 2.0));
        assert_eq!(ranges.y, DoubleRange::new(-3.0, 5.0));
    }
}
