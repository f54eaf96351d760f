use kurbo::{Point, Rect, Shape};
use ordered_float::OrderedFloat;
use tracing::{debug, trace};

use crate::core::geometry::{bounding_rect, polygon_path, polyline_path};
use crate::core::SeriesRanges;
use crate::render::{Paint, PathPrimitive, RenderFrame};
use crate::segments::{ChartSegment, SegmentState};
use crate::series::CartesianSeries;

/// A filled area under a polyline, closed against the axis crossing value.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaSegment {
    state: SegmentState,
    x_values: Vec<f64>,
    y_values: Vec<f64>,
    fill_points: Vec<Point>,
    stroke_points: Vec<Point>,
    previous_fill_points: Vec<Point>,
    previous_stroke_points: Vec<Point>,
    clip_rect: Option<Rect>,
}

impl AreaSegment {
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self {
            state: SegmentState::new(index),
            x_values: Vec::new(),
            y_values: Vec::new(),
            fill_points: Vec::new(),
            stroke_points: Vec::new(),
            previous_fill_points: Vec::new(),
            previous_stroke_points: Vec::new(),
            clip_rect: None,
        }
    }

    /// Stores the points of one contiguous run. Pairs with a NaN member are
    /// dropped; a run without any finite pair is empty.
    pub fn set_data(&mut self, x_values: &[f64], y_values: &[f64], ranges: &mut SeriesRanges) {
        self.x_values.clear();
        self.y_values.clear();
        for (&x, &y) in x_values.iter().zip(y_values) {
            if x.is_nan() || y.is_nan() {
                continue;
            }
            self.x_values.push(x);
            self.y_values.push(y);
            ranges.extend_x(x);
            ranges.extend_y(y);
        }
        let dropped = x_values.len().min(y_values.len()) - self.x_values.len();
        if dropped > 0 {
            debug!(index = self.state.index(), dropped, "area skipped NaN points");
        }
        self.state.set_empty(self.x_values.is_empty());
    }

    /// Keeps the current screen points as the origin of the next animation.
    pub fn snapshot_previous(&mut self) {
        self.previous_fill_points.clone_from(&self.fill_points);
        self.previous_stroke_points.clone_from(&self.stroke_points);
    }

    pub fn on_layout(&mut self, series: &CartesianSeries<'_>) {
        self.fill_points.clear();
        self.stroke_points.clear();
        self.clip_rect = None;
        if self.state.is_empty() {
            self.state.clear_bounds();
            return;
        }

        let crossing = series.y_axis.actual_crossing_value();
        let half_stroke = self.state.style().stroke_width / 2.0;
        // Screen direction in which values grow along the value axis.
        let toward_high = match (series.is_transposed, series.y_axis.is_inversed) {
            (false, false) | (true, true) => -1.0,
            (false, true) | (true, false) => 1.0,
        };

        let count = self.x_values.len();
        self.fill_points.reserve(count + 2);
        self.stroke_points.reserve(count);
        self.fill_points
            .push(series.point(self.x_values[0], crossing));
        for (&x, &y) in self.x_values.iter().zip(&self.y_values) {
            let point = series.point(x, y);
            self.fill_points.push(point);

            let offset = if y >= crossing { toward_high } else { -toward_high } * half_stroke;
            self.stroke_points.push(if series.is_transposed {
                Point::new(point.x + offset, point.y)
            } else {
                Point::new(point.x, point.y + offset)
            });
        }
        self.fill_points
            .push(series.point(self.x_values[count - 1], crossing));

        if series.animation.can_animate() {
            self.animate(series);
        }

        match bounding_rect(&self.fill_points) {
            Some(bounds) => self.state.set_bounds(bounds),
            None => self.state.clear_bounds(),
        }
    }

    fn animate(&mut self, series: &CartesianSeries<'_>) {
        let t = series.animation.value();
        let matches_previous = !self.previous_fill_points.is_empty()
            && self.previous_fill_points.len() == self.fill_points.len()
            && self.previous_stroke_points.len() == self.stroke_points.len();

        if matches_previous {
            for (point, previous) in self.fill_points.iter_mut().zip(&self.previous_fill_points) {
                *point = previous.lerp(*point, t);
            }
            for (point, previous) in self
                .stroke_points
                .iter_mut()
                .zip(&self.previous_stroke_points)
            {
                *point = previous.lerp(*point, t);
            }
            return;
        }

        trace!(
            index = self.state.index(),
            previous = self.previous_fill_points.len(),
            current = self.fill_points.len(),
            "area point count changed, revealing through clip"
        );
        self.clip_rect = bounding_rect(&self.fill_points).map(|bounds| {
            if series.is_transposed {
                let height = bounds.height() * t;
                Rect::new(bounds.x0, bounds.y1 - height, bounds.x1, bounds.y1)
            } else {
                Rect::new(bounds.x0, bounds.y0, bounds.x0 + bounds.width() * t, bounds.y1)
            }
        });
    }

    /// Data polyline closed by baseline points at both ends.
    #[must_use]
    pub fn fill_points(&self) -> &[Point] {
        &self.fill_points
    }

    /// Data polyline offset half a stroke away from the crossing value.
    #[must_use]
    pub fn stroke_points(&self) -> &[Point] {
        &self.stroke_points
    }

    /// Reveal clip used while point-wise interpolation is not possible.
    #[must_use]
    pub fn clip_rect(&self) -> Option<Rect> {
        self.clip_rect
    }

    /// Position in the run of the data point closest to `x` on screen.
    #[must_use]
    pub fn nearest_point_index(&self, x: f64) -> Option<usize> {
        let line = self.fill_points.get(1..self.fill_points.len().saturating_sub(1))?;
        line.iter()
            .enumerate()
            .min_by_key(|(_, point)| OrderedFloat((point.x - x).abs()))
            .map(|(position, _)| position)
    }
}

impl ChartSegment for AreaSegment {
    fn state(&self) -> &SegmentState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SegmentState {
        &mut self.state
    }

    fn draw(&self, frame: &mut RenderFrame) {
        if !self.state.is_drawable() || self.fill_points.is_empty() {
            return;
        }
        let style = self.state.style();
        frame.push_path(
            PathPrimitive::new(
                polygon_path(&self.fill_points),
                Paint {
                    fill: style.fill,
                    stroke: None,
                    opacity: style.opacity,
                },
            )
            .with_clip(self.clip_rect),
        );
        if let Some(stroke) = style.stroke_style() {
            frame.push_path(
                PathPrimitive::new(
                    polyline_path(&self.stroke_points),
                    Paint::stroke_only(stroke, style.opacity),
                )
                .with_clip(self.clip_rect),
            );
        }
    }

    fn data_point_index(&self, x: f64, y: f64) -> Option<usize> {
        if !self.state.is_drawable() || self.fill_points.len() < 3 {
            return None;
        }
        polygon_path(&self.fill_points)
            .contains(Point::new(x, y))
            .then_some(self.state.index())
    }

    fn label_anchor(&self) -> Option<Point> {
        self.fill_points.get(1).copied()
    }
}
