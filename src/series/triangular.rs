//! Builders for funnel and pyramid series.

use kurbo::Rect;

use crate::error::{ChartError, ChartResult};
use crate::segments::{ChartSegment, FunnelSegment, PyramidSegment};
use crate::series::cartesian::log_empty;
use crate::series::{FunnelOptions, PyramidOptions, TriangularSeries};

/// Height fractions `(top, bottom)` of each band, stacked from the top in
/// value order.
///
/// Bands are proportional to each value's share of the absolute total;
/// `gap_ratio` of the height is spread evenly between neighbouring bands.
/// NaN values get NaN fractions and take no height.
#[must_use]
pub fn band_fractions(values: &[f64], gap_ratio: f64) -> Vec<(f64, f64)> {
    let total: f64 = values
        .iter()
        .filter(|value| value.is_finite())
        .map(|value| value.abs())
        .sum();
    let bands = values.iter().filter(|value| value.is_finite()).count();
    let gap = if bands > 1 {
        gap_ratio / (bands - 1) as f64
    } else {
        0.0
    };
    let usable = if bands > 1 { 1.0 - gap_ratio } else { 1.0 };

    let mut cursor = 0.0;
    values
        .iter()
        .map(|value| {
            if !value.is_finite() {
                return (f64::NAN, f64::NAN);
            }
            let height = if total > 0.0 {
                value.abs() / total * usable
            } else {
                0.0
            };
            let band = (cursor, (cursor + height).min(1.0));
            cursor += height + gap;
            band
        })
        .collect()
}

fn validated_bounds(plot_area: Rect) -> ChartResult<Rect> {
    let (width, height) = (plot_area.width(), plot_area.height());
    if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
        return Err(ChartError::InvalidBounds { width, height });
    }
    Ok(plot_area)
}

pub fn funnel_series(options: FunnelOptions, plot_area: Rect) -> ChartResult<TriangularSeries> {
    let options = options.validate()?;
    Ok(TriangularSeries::new(validated_bounds(plot_area)?)
        .with_min_width(options.min_width)
        .with_explode(options.explode_index, options.explode_offset))
}

pub fn pyramid_series(options: PyramidOptions, plot_area: Rect) -> ChartResult<TriangularSeries> {
    let options = options.validate()?;
    Ok(TriangularSeries::new(validated_bounds(plot_area)?)
        .with_explode(options.explode_index, options.explode_offset))
}

/// Funnel bands with the first value at the wide top.
pub fn funnel_segments(values: &[f64], options: FunnelOptions) -> ChartResult<Vec<FunnelSegment>> {
    let options = options.validate()?;
    let segments: Vec<FunnelSegment> = band_fractions(values, options.gap_ratio)
        .into_iter()
        .zip(values)
        .enumerate()
        .map(|(index, ((top, bottom), &value))| {
            let mut segment = FunnelSegment::new(index);
            segment.set_data(value, top, bottom);
            segment
        })
        .collect();
    log_empty("funnel", &segments, |segment| segment.state().is_empty());
    Ok(segments)
}

/// Pyramid bands with the first value at the wide base.
pub fn pyramid_segments(
    values: &[f64],
    options: PyramidOptions,
) -> ChartResult<Vec<PyramidSegment>> {
    let options = options.validate()?;
    let segments: Vec<PyramidSegment> = band_fractions(values, options.gap_ratio)
        .into_iter()
        .zip(values)
        .enumerate()
        .map(|(index, ((top, bottom), &value))| {
            let mut segment = PyramidSegment::new(index);
            // Bands stack from the top; mirror them so the first sits at the base.
            segment.set_data(value, 1.0 - bottom, 1.0 - top);
            segment
        })
        .collect();
    log_empty("pyramid", &segments, |segment| segment.state().is_empty());
    Ok(segments)
}
