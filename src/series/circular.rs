//! Builders for pie, doughnut and radial bar series.

use kurbo::Rect;
use tracing::debug;

use crate::core::SeriesAnimation;
use crate::error::{ChartError, ChartResult};
use crate::segments::{ChartSegment, DoughnutSegment, PieSegment, RadialBarSegment};
use crate::series::cartesian::log_empty;
use crate::series::{CircularOptions, CircularSeries, RadialBarOptions, RadialBarSeries};

/// Start and sweep of every slice, splitting the series sweep by each
/// value's share of the absolute total.
///
/// NaN values get NaN angles and occupy no sweep. A zero total leaves every
/// slice with a zero sweep at the series start.
#[must_use]
pub fn slice_angles(values: &[f64], start_angle: f64, end_angle: f64) -> Vec<(f64, f64)> {
    let total: f64 = values
        .iter()
        .filter(|value| value.is_finite())
        .map(|value| value.abs())
        .sum();
    let series_sweep = end_angle - start_angle;

    let mut cursor = start_angle;
    values
        .iter()
        .map(|value| {
            if !value.is_finite() {
                return (f64::NAN, f64::NAN);
            }
            let sweep = if total > 0.0 {
                value.abs() / total * series_sweep
            } else {
                0.0
            };
            let angles = (cursor, sweep);
            cursor += sweep;
            angles
        })
        .collect()
}

fn plot_radius(plot_area: Rect, radius_ratio: f64) -> ChartResult<f64> {
    let (width, height) = (plot_area.width(), plot_area.height());
    if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
        return Err(ChartError::InvalidBounds { width, height });
    }
    Ok(width.min(height) / 2.0 * radius_ratio)
}

/// Layout context for a pie or doughnut filling `plot_area`.
pub fn circular_series(
    options: CircularOptions,
    plot_area: Rect,
    animation: SeriesAnimation,
) -> ChartResult<CircularSeries> {
    let options = options.validate()?;
    let radius = plot_radius(plot_area, options.radius_ratio)?;
    Ok(CircularSeries::new(plot_area.center(), radius)
        .with_inner_radius(radius * options.inner_radius_ratio)
        .with_angles(options.start_angle, options.end_angle)
        .with_explode(options.explode_index, options.explode_radius)
        .with_explode_all(options.explode_all)
        .with_cap_style(options.cap_style)
        .with_animation(animation))
}

pub fn pie_segments(values: &[f64], options: CircularOptions) -> ChartResult<Vec<PieSegment>> {
    let options = options.validate()?;
    let segments: Vec<PieSegment> = slice_angles(values, options.start_angle, options.end_angle)
        .into_iter()
        .zip(values)
        .enumerate()
        .map(|(index, ((start_angle, sweep_angle), &value))| {
            let mut segment = PieSegment::new(index);
            segment.set_data(value, start_angle, sweep_angle);
            segment
        })
        .collect();
    log_empty("pie", &segments, |segment| segment.state().is_empty());
    Ok(segments)
}

pub fn doughnut_segments(
    values: &[f64],
    options: CircularOptions,
) -> ChartResult<Vec<DoughnutSegment>> {
    let options = options.validate()?;
    let segments: Vec<DoughnutSegment> =
        slice_angles(values, options.start_angle, options.end_angle)
            .into_iter()
            .zip(values)
            .enumerate()
            .map(|(index, ((start_angle, sweep_angle), &value))| {
                let mut segment = DoughnutSegment::new(index);
                segment.set_data(value, start_angle, sweep_angle);
                segment
            })
            .collect();
    log_empty("doughnut", &segments, |segment| segment.state().is_empty());
    Ok(segments)
}

pub fn radial_bar_segments(values: &[f64]) -> Vec<RadialBarSegment> {
    let segments: Vec<RadialBarSegment> = values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            let mut segment = RadialBarSegment::new(index);
            segment.set_data(value);
            segment
        })
        .collect();
    log_empty("radial bar", &segments, |segment| segment.state().is_empty());
    segments
}

/// Layout context for `segment_count` rings filling `plot_area`.
///
/// Without a configured maximum the largest finite value of `values` maps to
/// the full sweep.
pub fn radial_bar_series(
    options: RadialBarOptions,
    plot_area: Rect,
    values: &[f64],
    animation: SeriesAnimation,
) -> ChartResult<RadialBarSeries> {
    let options = options.validate()?;
    let radius = plot_radius(plot_area, options.radius_ratio)?;
    let maximum = options.maximum.unwrap_or_else(|| {
        values
            .iter()
            .copied()
            .filter(|value| value.is_finite())
            .fold(0.0, f64::max)
    });
    if maximum <= 0.0 {
        debug!(maximum, "radial bar series has no positive values");
    }
    Ok(RadialBarSeries {
        center: plot_area.center(),
        radius,
        inner_radius_ratio: options.inner_radius_ratio,
        gap_ratio: options.gap_ratio,
        segment_count: values.len(),
        maximum,
        start_angle: options.start_angle,
        end_angle: options.end_angle,
        cap_style: options.cap_style,
        animation,
    })
}
