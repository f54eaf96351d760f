use kurbo::Point;
use tracing::trace;

use crate::core::geometry::{between_slanted_edges, bounding_rect, polygon_path};
use crate::render::{PathPrimitive, RenderFrame};
use crate::segments::{ChartSegment, SegmentState};
use crate::series::TriangularSeries;

/// Half width of the natural funnel taper at fraction `f` from the top, as a
/// share of the full width.
fn natural_radius(fraction: f64) -> f64 {
    0.5 * (1.0 - fraction)
}

/// One band of a funnel covering `top..bottom` of the funnel height, both as
/// fractions in `[0, 1]` measured from the top.
///
/// The band follows the natural taper until it reaches the neck, then keeps
/// the neck width. A band crossing the neck start is "broken": its outline
/// holds six distinct points with a break line where the slope turns
/// vertical.
#[derive(Debug, Clone, PartialEq)]
pub struct FunnelSegment {
    state: SegmentState,
    value: f64,
    top: f64,
    bottom: f64,
    is_broken: bool,
    /// top-left, top-right, break-right, bottom-right, bottom-left, break-left
    points: Option<[Point; 6]>,
}

impl FunnelSegment {
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self {
            state: SegmentState::new(index),
            value: f64::NAN,
            top: f64::NAN,
            bottom: f64::NAN,
            is_broken: false,
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
        self.is_broken = false;
        let bounds = series.bounds;
        let width = bounds.width();
        let has_area = width > 0.0 && bounds.height() > 0.0;
        if self.state.is_empty() || !has_area {
            trace!(index = self.state.index(), "funnel band skipped");
            self.state.clear_bounds();
            return;
        }

        let neck_radius = (0.5 * series.min_width / width).clamp(0.0, 0.5);
        let top_radius = natural_radius(self.top);
        let bottom_radius = natural_radius(self.bottom);
        self.is_broken = (top_radius >= neck_radius) ^ (bottom_radius > neck_radius);

        let center_x = bounds.center().x + series.explode_shift(self.state.index());
        let y_at = |fraction: f64| bounds.y0 + fraction * bounds.height();
        let left = |radius: f64, y: f64| Point::new(center_x - radius * width, y);
        let right = |radius: f64, y: f64| Point::new(center_x + radius * width, y);

        let top_y = y_at(self.top);
        let bottom_y = y_at(self.bottom);
        let top_radius = top_radius.max(neck_radius);
        let points = if self.is_broken {
            let break_y = y_at(1.0 - 2.0 * neck_radius);
            [
                left(top_radius, top_y),
                right(top_radius, top_y),
                right(neck_radius, break_y),
                right(neck_radius, bottom_y),
                left(neck_radius, bottom_y),
                left(neck_radius, break_y),
            ]
        } else {
            let bottom_radius = bottom_radius.max(neck_radius);
            [
                left(top_radius, top_y),
                right(top_radius, top_y),
                right(bottom_radius, bottom_y),
                right(bottom_radius, bottom_y),
                left(bottom_radius, bottom_y),
                left(bottom_radius, bottom_y),
            ]
        };

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

    /// Whether the band crosses the start of the neck.
    #[must_use]
    pub fn is_broken(&self) -> bool {
        self.is_broken
    }

    /// Outline from the last layout, clockwise from the top-left corner.
    #[must_use]
    pub fn points(&self) -> Option<&[Point; 6]> {
        self.points.as_ref()
    }
}

impl ChartSegment for FunnelSegment {
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
        let [top_left, top_right, break_right, bottom_right, bottom_left, break_left] =
            self.points.filter(|_| self.state.is_drawable())?;
        let point = Point::new(x, y);
        let hit = if self.is_broken {
            if y <= break_left.y {
                between_slanted_edges(top_left, break_left, top_right, break_right, point)
            } else {
                between_slanted_edges(break_left, bottom_left, break_right, bottom_right, point)
            }
        } else {
            between_slanted_edges(top_left, bottom_left, top_right, bottom_right, point)
        };
        hit.then_some(self.state.index())
    }

    fn label_anchor(&self) -> Option<Point> {
        self.points.map(|_| self.state.bounds().center())
    }
}
