//! Builder for bubble series.

use crate::core::{DoubleRange, SeriesRanges};
use crate::error::ChartResult;
use crate::segments::{BubbleSegment, ChartSegment};
use crate::series::cartesian::{ensure_same_len, log_empty};
use crate::series::{BubbleOptions, BubbleSeries, CartesianSeries};

/// Bubbles plus the size range their radii are mapped from.
pub fn bubble_segments(
    x_values: &[f64],
    y_values: &[f64],
    sizes: &[f64],
    ranges: &mut SeriesRanges,
) -> ChartResult<(Vec<BubbleSegment>, DoubleRange)> {
    ensure_same_len("y_values", x_values.len(), y_values.len())?;
    ensure_same_len("sizes", x_values.len(), sizes.len())?;

    let mut size_range = DoubleRange::empty();
    let segments: Vec<BubbleSegment> = x_values
        .iter()
        .zip(y_values.iter().zip(sizes))
        .enumerate()
        .map(|(index, (&x, (&y, &size)))| {
            let mut segment = BubbleSegment::new(index);
            segment.set_data(x, y, size, ranges);
            size_range.extend(size);
            segment
        })
        .collect();
    log_empty("bubble", &segments, |segment| segment.state().is_empty());
    Ok((segments, size_range))
}

/// Layout context for bubbles drawn through `cartesian`.
pub fn bubble_series<'a>(
    options: BubbleOptions,
    cartesian: CartesianSeries<'a>,
    x_range: DoubleRange,
    size_range: DoubleRange,
) -> ChartResult<BubbleSeries<'a>> {
    let options = options.validate()?;
    Ok(BubbleSeries {
        cartesian,
        x_range,
        size_range,
        min_radius: options.min_radius,
        max_radius: options.max_radius,
        show_zero_size: options.show_zero_size,
    })
}
