//! Builders for category and value-axis series.

use kurbo::RoundedRectRadii;
use tracing::debug;

use crate::core::{BoxPlotStatistics, SeriesRanges};
use crate::error::{ChartError, ChartResult};
use crate::segments::{
    AreaSegment, BoxWhiskerSegment, ChartSegment, ColumnSegment, ErrorBarSegment, RangeColumnSegment,
    WaterfallSegment, WaterfallSegmentType,
};
use crate::series::{
    BoxPlotOptions, CartesianSeries, ColumnOptions, ErrorBarOptions, WaterfallOptions,
};

pub(crate) fn ensure_same_len(name: &str, expected: usize, actual: usize) -> ChartResult<()> {
    if expected != actual {
        return Err(ChartError::InvalidData(format!(
            "`{name}` has {actual} values, expected {expected}"
        )));
    }
    Ok(())
}

/// One column per `(x, y)` pair, spanning from `baseline` to `y`.
pub fn column_segments(
    x_values: &[f64],
    y_values: &[f64],
    baseline: f64,
    options: ColumnOptions,
    ranges: &mut SeriesRanges,
) -> ChartResult<Vec<ColumnSegment>> {
    ensure_same_len("y_values", x_values.len(), y_values.len())?;
    let options = options.validate()?;
    let half_width = options.half_width();
    let radii = RoundedRectRadii::from_single_radius(options.corner_radius);

    let segments: Vec<ColumnSegment> = x_values
        .iter()
        .zip(y_values)
        .enumerate()
        .map(|(index, (&x, &y))| {
            let mut segment = ColumnSegment::new(index);
            segment.set_data(x - half_width, x + half_width, y, baseline, ranges);
            segment.set_corner_radius(radii);
            segment
        })
        .collect();
    log_empty("column", &segments, |segment| segment.state().is_empty());
    Ok(segments)
}

/// One bar per category spanning `low..high`.
pub fn range_column_segments(
    x_values: &[f64],
    high_values: &[f64],
    low_values: &[f64],
    options: ColumnOptions,
    ranges: &mut SeriesRanges,
) -> ChartResult<Vec<RangeColumnSegment>> {
    ensure_same_len("high_values", x_values.len(), high_values.len())?;
    ensure_same_len("low_values", x_values.len(), low_values.len())?;
    let half_width = options.validate()?.half_width();

    let segments: Vec<RangeColumnSegment> = x_values
        .iter()
        .zip(high_values.iter().zip(low_values))
        .enumerate()
        .map(|(index, (&x, (&high, &low)))| {
            let mut segment = RangeColumnSegment::new(index);
            segment.set_data(x - half_width, x + half_width, high, low, ranges);
            segment
        })
        .collect();
    log_empty("range column", &segments, |segment| segment.state().is_empty());
    Ok(segments)
}

/// Builds a waterfall chain.
///
/// Each bar runs from the running total before it to the total after it.
/// Points flagged in `sum_flags` (missing flags count as `false`) become sum
/// bars rising from zero: to the running total when auto sum is on, or to
/// their own value otherwise, which then becomes the new total. NaN values
/// give empty bars that leave the total untouched and are skipped by the
/// chain links.
pub fn waterfall_segments(
    x_values: &[f64],
    y_values: &[f64],
    sum_flags: &[bool],
    options: WaterfallOptions,
    ranges: &mut SeriesRanges,
) -> ChartResult<Vec<WaterfallSegment>> {
    ensure_same_len("y_values", x_values.len(), y_values.len())?;
    let options = options.validate()?;
    let half_width = options.column.half_width();

    let mut total = 0.0;
    let mut previous_link = None;
    let mut segments = Vec::with_capacity(x_values.len());
    for (index, (&x, &y)) in x_values.iter().zip(y_values).enumerate() {
        let is_sum = sum_flags.get(index).copied().unwrap_or(false);
        let segment_type = if is_sum {
            WaterfallSegmentType::Sum
        } else if y >= 0.0 {
            WaterfallSegmentType::Positive
        } else {
            WaterfallSegmentType::Negative
        };

        let mut segment = WaterfallSegment::new(index, segment_type);
        let (y1, y2) = match segment_type {
            _ if y.is_nan() && !(is_sum && options.allow_auto_sum) => (f64::NAN, f64::NAN),
            WaterfallSegmentType::Sum if options.allow_auto_sum => (total, 0.0),
            WaterfallSegmentType::Sum => {
                total = y;
                (y, 0.0)
            }
            WaterfallSegmentType::Positive | WaterfallSegmentType::Negative => {
                let before = total;
                total += y;
                (total, before)
            }
        };
        segment.set_data(x - half_width, x + half_width, y1, y2, ranges);
        segment.set_show_connector(options.show_connector);
        segment.set_previous_segment(previous_link);
        if !segment.state().is_empty() {
            previous_link = Some(index);
        }
        segments.push(segment);
    }
    log_empty("waterfall", &segments, |segment| segment.state().is_empty());
    Ok(segments)
}

/// Lays out a waterfall chain in order, handing each bar the bar it is
/// linked to so connectors can be computed.
pub fn layout_waterfall(segments: &mut [WaterfallSegment], series: &CartesianSeries<'_>) {
    for position in 0..segments.len() {
        let (laid_out, rest) = segments.split_at_mut(position);
        let Some(current) = rest.first_mut() else {
            break;
        };
        let previous = current
            .previous_segment()
            .and_then(|link| laid_out.get(link));
        current.on_layout(series, previous);
    }
}

/// One box per category, summarizing `samples[i]`.
pub fn box_whisker_segments(
    x_values: &[f64],
    samples: &[Vec<f64>],
    options: BoxPlotOptions,
    ranges: &mut SeriesRanges,
) -> ChartResult<Vec<BoxWhiskerSegment>> {
    ensure_same_len("samples", x_values.len(), samples.len())?;
    let options = options.validate()?;
    let half_width = (1.0 - options.spacing) / 2.0;

    let segments: Vec<BoxWhiskerSegment> = x_values
        .iter()
        .zip(samples)
        .enumerate()
        .map(|(index, (&x, values))| {
            let mut segment = BoxWhiskerSegment::new(index);
            let statistics = BoxPlotStatistics::compute(values, options.mode);
            segment.set_data(x - half_width, x + half_width, statistics, ranges);
            segment.set_show_mean(options.show_mean);
            segment.set_outlier_size(options.outlier_size);
            segment
        })
        .collect();
    log_empty("box plot", &segments, |segment| segment.state().is_empty());
    Ok(segments)
}

/// Splits the series at NaN points into one area per contiguous run.
pub fn area_segments(
    x_values: &[f64],
    y_values: &[f64],
    ranges: &mut SeriesRanges,
) -> ChartResult<Vec<AreaSegment>> {
    ensure_same_len("y_values", x_values.len(), y_values.len())?;

    let mut segments = Vec::new();
    let mut run_start = None;
    for position in 0..=x_values.len() {
        let is_gap = position == x_values.len()
            || x_values[position].is_nan()
            || y_values[position].is_nan();
        match (is_gap, run_start) {
            (false, None) => run_start = Some(position),
            (true, Some(start)) => {
                let mut segment = AreaSegment::new(segments.len());
                segment.set_data(&x_values[start..position], &y_values[start..position], ranges);
                segments.push(segment);
                run_start = None;
            }
            _ => {}
        }
    }
    if segments.len() > 1 {
        debug!(runs = segments.len(), "area series split at NaN points");
    }
    Ok(segments)
}

/// A single error bar segment covering every point of the series.
pub fn error_bar_segment(
    x_values: &[f64],
    y_values: &[f64],
    options: ErrorBarOptions,
    ranges: &mut SeriesRanges,
) -> ChartResult<ErrorBarSegment> {
    ensure_same_len("y_values", x_values.len(), y_values.len())?;
    let options = options.validate()?;
    let mut segment = ErrorBarSegment::new(0);
    segment.set_data(x_values, y_values, &options, ranges);
    Ok(segment)
}

pub(crate) fn log_empty<S>(kind: &'static str, segments: &[S], is_empty: impl Fn(&S) -> bool) {
    let empty = segments.iter().filter(|segment| is_empty(segment)).count();
    if empty > 0 {
        debug!(kind, empty, total = segments.len(), "segments without usable values");
    }
}
