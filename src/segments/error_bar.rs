use kurbo::{Point, Vec2};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::geometry::{bounding_rect, distance_to_line_segment};
use crate::core::statistics::{mean, sample_standard_deviation, standard_error};
use crate::core::SeriesRanges;
use crate::render::{LinePrimitive, RenderFrame};
use crate::segments::{ChartSegment, SegmentState};
use crate::series::{CartesianSeries, ErrorBarOptions};

/// Pointer tolerance around error bar lines, in pixels.
const ERROR_BAR_HIT_TOLERANCE: f64 = 5.0;

/// Which bars are drawn around each point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ErrorBarMode {
    #[default]
    Both,
    Horizontal,
    Vertical,
}

impl ErrorBarMode {
    fn has_horizontal(self) -> bool {
        matches!(self, Self::Both | Self::Horizontal)
    }

    fn has_vertical(self) -> bool {
        matches!(self, Self::Both | Self::Vertical)
    }
}

/// How the error extent of each point is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ErrorBarType {
    /// The configured value, in data units.
    #[default]
    Fixed,
    /// The configured percentage of each point's value.
    Percentage,
    /// Multiples of the series' sample standard deviation around the series
    /// mean.
    StandardDeviation,
    /// Multiples of the series' standard error around each point.
    StandardError,
    /// Per-point plus and minus extents.
    Custom,
}

/// Side of the central value a bar extends to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ErrorBarDirection {
    Plus,
    Minus,
    #[default]
    Both,
}

/// Data-space span of one bar: the line runs from `low` to `high` along its
/// axis, at `across` on the other axis.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ErrorSpan {
    low: f64,
    high: f64,
    across: f64,
    capped_low: bool,
    capped_high: bool,
}

impl ErrorSpan {
    fn new(center: f64, across: f64, plus: f64, minus: f64, direction: ErrorBarDirection) -> Self {
        let (low, high) = match direction {
            ErrorBarDirection::Plus => (center, center + plus),
            ErrorBarDirection::Minus => (center - minus, center),
            ErrorBarDirection::Both => (center - minus, center + plus),
        };
        Self {
            low,
            high,
            across,
            capped_low: direction != ErrorBarDirection::Plus,
            capped_high: direction != ErrorBarDirection::Minus,
        }
    }

    fn is_finite(&self) -> bool {
        self.low.is_finite() && self.high.is_finite() && self.across.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ErrorPoint {
    x: f64,
    y: f64,
    horizontal: Option<ErrorSpan>,
    vertical: Option<ErrorSpan>,
}

/// One error bar line plus its end caps, in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorBarLine {
    /// Position of the data point within the series.
    pub point_index: usize,
    pub start: Point,
    pub end: Point,
    pub start_cap: Option<(Point, Point)>,
    pub end_cap: Option<(Point, Point)>,
}

/// Error bars of a whole series.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorBarSegment {
    state: SegmentState,
    cap_size: f64,
    points: Vec<ErrorPoint>,
    lines: Vec<ErrorBarLine>,
}

impl ErrorBarSegment {
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self {
            state: SegmentState::new(index),
            cap_size: ErrorBarOptions::default().cap_size,
            points: Vec::new(),
            lines: Vec::new(),
        }
    }

    /// Computes the data-space error spans of every point.
    ///
    /// Points with a NaN coordinate keep their slot but get no bars.
    pub fn set_data(
        &mut self,
        x_values: &[f64],
        y_values: &[f64],
        options: &ErrorBarOptions,
        ranges: &mut SeriesRanges,
    ) {
        self.cap_size = options.cap_size;
        self.points.clear();

        let (x_mean, x_deviation) = series_spread(x_values, options.error_type);
        let (y_mean, y_deviation) = series_spread(y_values, options.error_type);

        for (point_index, (&x, &y)) in x_values.iter().zip(y_values).enumerate() {
            let finite = x.is_finite() && y.is_finite();
            let horizontal = (finite && options.mode.has_horizontal())
                .then(|| {
                    let (center, plus, minus) = match options.error_type {
                        ErrorBarType::Fixed => {
                            (x, options.horizontal_error, options.horizontal_error)
                        }
                        ErrorBarType::Percentage => {
                            let error = x * options.horizontal_error / 100.0;
                            (x, error, error)
                        }
                        ErrorBarType::StandardDeviation => {
                            let error = x_deviation * options.horizontal_error;
                            (x_mean, error, error)
                        }
                        ErrorBarType::StandardError => {
                            let error = x_deviation * options.horizontal_error;
                            (x, error, error)
                        }
                        ErrorBarType::Custom => (
                            x,
                            custom_value(&options.horizontal_positive, point_index),
                            custom_value(&options.horizontal_negative, point_index),
                        ),
                    };
                    ErrorSpan::new(center, y, plus, minus, options.horizontal_direction)
                })
                .filter(ErrorSpan::is_finite);
            let vertical = (finite && options.mode.has_vertical())
                .then(|| {
                    let (center, plus, minus) = match options.error_type {
                        ErrorBarType::Fixed => (y, options.vertical_error, options.vertical_error),
                        ErrorBarType::Percentage => {
                            let error = y * options.vertical_error / 100.0;
                            (y, error, error)
                        }
                        ErrorBarType::StandardDeviation => {
                            let error = y_deviation * options.vertical_error;
                            (y_mean, error, error)
                        }
                        ErrorBarType::StandardError => {
                            let error = y_deviation * options.vertical_error;
                            (y, error, error)
                        }
                        ErrorBarType::Custom => (
                            y,
                            custom_value(&options.vertical_positive, point_index),
                            custom_value(&options.vertical_negative, point_index),
                        ),
                    };
                    ErrorSpan::new(center, x, plus, minus, options.vertical_direction)
                })
                .filter(ErrorSpan::is_finite);

            if let Some(span) = &horizontal {
                ranges.extend_x(span.low);
                ranges.extend_x(span.high);
            }
            if let Some(span) = &vertical {
                ranges.extend_y(span.low);
                ranges.extend_y(span.high);
            }
            if finite {
                ranges.extend_x(x);
                ranges.extend_y(y);
            }
            self.points.push(ErrorPoint {
                x,
                y,
                horizontal,
                vertical,
            });
        }

        let has_bars = self
            .points
            .iter()
            .any(|point| point.horizontal.is_some() || point.vertical.is_some());
        if !has_bars && !self.points.is_empty() {
            debug!(
                index = self.state.index(),
                points = self.points.len(),
                "error bar series produced no finite bars"
            );
        }
        self.state.set_empty(!has_bars);
    }

    pub fn on_layout(&mut self, series: &CartesianSeries<'_>) {
        self.lines.clear();
        if self.state.is_empty() {
            self.state.clear_bounds();
            return;
        }

        let clip = series.clip_range();
        let t = if series.animation.can_animate() {
            series.animation.value()
        } else {
            1.0
        };
        let half_cap = self.cap_size / 2.0;

        for (point_index, point) in self.points.iter().enumerate() {
            if !clip.intersects(point.x, point.x) {
                continue;
            }
            let origin = series.point(point.x, point.y);
            if let Some(span) = point.horizontal {
                let start = series.point(span.low, span.across);
                let end = series.point(span.high, span.across);
                self.lines.push(screen_line(
                    point_index,
                    origin,
                    (start, end),
                    (span.capped_low, span.capped_high),
                    half_cap,
                    t,
                ));
            }
            if let Some(span) = point.vertical {
                let start = series.point(span.across, span.low);
                let end = series.point(span.across, span.high);
                self.lines.push(screen_line(
                    point_index,
                    origin,
                    (start, end),
                    (span.capped_low, span.capped_high),
                    half_cap,
                    t,
                ));
            }
        }

        let extents: Vec<Point> = self
            .lines
            .iter()
            .flat_map(|line| {
                [Some((line.start, line.end)), line.start_cap, line.end_cap]
                    .into_iter()
                    .flatten()
                    .flat_map(|(a, b)| [a, b])
            })
            .collect();
        match bounding_rect(&extents) {
            Some(bounds) => self.state.set_bounds(bounds),
            None => self.state.clear_bounds(),
        }
    }

    /// Bars from the last layout, in point order.
    #[must_use]
    pub fn lines(&self) -> &[ErrorBarLine] {
        &self.lines
    }

    /// Position of the data point whose bar passes closest to `(x, y)`,
    /// within the hit tolerance.
    #[must_use]
    pub fn nearest_point_index(&self, x: f64, y: f64) -> Option<usize> {
        if !self.state.is_drawable() {
            return None;
        }
        let point = Point::new(x, y);
        let tolerance = (self.state.style().stroke_width / 2.0).max(ERROR_BAR_HIT_TOLERANCE);
        self.lines
            .iter()
            .map(|line| (line.point_index, distance_to_line_segment(line.start, line.end, point)))
            .filter(|(_, distance)| *distance <= tolerance)
            .min_by_key(|(_, distance)| OrderedFloat(*distance))
            .map(|(point_index, _)| point_index)
    }
}

/// Series-wide mean and deviation for the statistical bar types.
fn series_spread(values: &[f64], error_type: ErrorBarType) -> (f64, f64) {
    let deviation = match error_type {
        ErrorBarType::StandardDeviation => sample_standard_deviation(values),
        ErrorBarType::StandardError => standard_error(values),
        _ => return (f64::NAN, f64::NAN),
    };
    (
        mean(values).unwrap_or(f64::NAN),
        deviation.unwrap_or(0.0),
    )
}

fn custom_value(values: &[f64], point_index: usize) -> f64 {
    values.get(point_index).copied().unwrap_or(0.0)
}

fn screen_line(
    point_index: usize,
    origin: Point,
    (start, end): (Point, Point),
    (capped_start, capped_end): (bool, bool),
    half_cap: f64,
    t: f64,
) -> ErrorBarLine {
    // Bars grow out of the data point while animating.
    let start = origin.lerp(start, t);
    let end = origin.lerp(end, t);
    let direction = end - start;
    let normal = if direction.hypot() > f64::EPSILON {
        Vec2::new(-direction.y, direction.x).normalize() * half_cap
    } else {
        Vec2::ZERO
    };
    let cap = |at: Point| (at - normal, at + normal);
    ErrorBarLine {
        point_index,
        start,
        end,
        start_cap: (capped_start && normal != Vec2::ZERO).then(|| cap(start)),
        end_cap: (capped_end && normal != Vec2::ZERO).then(|| cap(end)),
    }
}

impl ChartSegment for ErrorBarSegment {
    fn state(&self) -> &SegmentState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SegmentState {
        &mut self.state
    }

    fn draw(&self, frame: &mut RenderFrame) {
        if !self.state.is_drawable() {
            return;
        }
        let paint = self.state.style().line_paint();
        for line in &self.lines {
            frame.push_line(LinePrimitive::new(line.start, line.end, paint.clone()));
            for (start, end) in [line.start_cap, line.end_cap].into_iter().flatten() {
                frame.push_line(LinePrimitive::new(start, end, paint.clone()));
            }
        }
    }

    fn data_point_index(&self, x: f64, y: f64) -> Option<usize> {
        self.nearest_point_index(x, y).map(|_| self.state.index())
    }

    fn label_anchor(&self) -> Option<Point> {
        self.lines.first().map(|line| line.end)
    }
}
