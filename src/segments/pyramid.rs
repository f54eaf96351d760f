use kurbo::Point;
use tracing::trace;

use crate::core::geometry::{between_slanted_edges, bounding_rect, polygon_path};
use crate::render::{PathPrimitive, RenderFrame};
use crate::segments::{ChartSegment, SegmentState};
use crate::series::TriangularSeries;

/// One band of a pyramid covering `top..bottom` of its height. The apex sits
/// at the top, so a band at fraction `f` is `f` of the full width wide.
#[derive(Debug, Clone, PartialEq)]
pub struct PyramidSegment {
    state: SegmentState,
    value: f64,
    top: f64,
    bottom: f64,
    /// top-left, top-right, bottom-right, bottom-left
    points: Option<[Point; 4]>,
}

impl PyramidSegment {
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self {
            state: SegmentState::new(index),
            value: f64::NAN,
            top: f64::NAN,
            bottom: f64::NAN,
            points: None,
        }
    }

    pub fn set_data(&mut self, value: f64, top: f64, bottom: f64) {
        self.value = value;
        self.top = top;
        self.bottom = bottom;
        self.state
            .set_empty(value.is_nan() || !top.is_finite() || !bottom.is_finite() || bottom < top);
    }

    pub fn on_layout(&mut self, series: &TriangularSeries) {
        self.points = None;
        let bounds = series.bounds;
        let has_area = bounds.width() > 0.0 && bounds.height() > 0.0;
        if self.state.is_empty() || !has_area {
            trace!(index = self.state.index(), "pyramid band skipped");
            self.state.clear_bounds();
            return;
        }

        let center_x = bounds.center().x + series.explode_shift(self.state.index());
        let half_width = bounds.width() / 2.0;
        let corner = |fraction: f64, side: f64| {
            Point::new(
                center_x + side * fraction * half_width,
                bounds.y0 + fraction * bounds.height(),
            )
        };
        let points = [
            corner(self.top, -1.0),
            corner(self.top, 1.0),
            corner(self.bottom, 1.0),
            corner(self.bottom, -1.0),
        ];
        match bounding_rect(&points) {
            Some(rect) => {
                self.state.set_bounds(rect);
                self.points = Some(points);
            }
            None => self.state.clear_bounds(),
        }
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn points(&self) -> Option<&[Point; 4]> {
        self.points.as_ref()
    }
}

impl ChartSegment for PyramidSegment {
    fn state(&self) -> &SegmentState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SegmentState {
        &mut self.state
    }

    fn draw(&self, frame: &mut RenderFrame) {
        let Some(points) = self.points.filter(|_| self.state.is_drawable()) else {
            return;
        };
        frame.push_path(PathPrimitive::new(
            polygon_path(&points),
            self.state.style().paint(),
        ));
    }

    fn data_point_index(&self, x: f64, y: f64) -> Option<usize> {
        let [top_left, top_right, bottom_right, bottom_left] =
            self.points.filter(|_| self.state.is_drawable())?;
        between_slanted_edges(top_left, bottom_left, top_right, bottom_right, Point::new(x, y))
            .then_some(self.state.index())
    }

    fn label_anchor(&self) -> Option<Point> {
        self.points.map(|_| self.state.bounds().center())
    }
}
