use kurbo::Point;
use tracing::trace;

use crate::core::animation::lerp;
use crate::core::geometry::rect_centered;
use crate::core::{DoubleRange, SeriesRanges};
use crate::render::{CirclePrimitive, RenderFrame};
use crate::segments::{ChartSegment, SegmentState};
use crate::series::BubbleSeries;

#[derive(Debug, Clone, Copy, PartialEq)]
struct BubbleSnapshot {
    x: f64,
    y: f64,
    size: f64,
    x_range: DoubleRange,
}

/// One bubble: a circle at `(x, y)` whose radius encodes `size`.
#[derive(Debug, Clone, PartialEq)]
pub struct BubbleSegment {
    state: SegmentState,
    x: f64,
    y: f64,
    size: f64,
    previous: Option<BubbleSnapshot>,
    center: Option<Point>,
    radius: f64,
}

impl BubbleSegment {
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self {
            state: SegmentState::new(index),
            x: f64::NAN,
            y: f64::NAN,
            size: f64::NAN,
            previous: None,
            center: None,
            radius: 0.0,
        }
    }

    pub fn set_data(&mut self, x: f64, y: f64, size: f64, ranges: &mut SeriesRanges) {
        self.x = x;
        self.y = y;
        self.size = size;
        self.state.set_empty(x.is_nan() || y.is_nan() || size.is_nan());
        ranges.extend_x(x);
        ranges.extend_y(y);
    }

    /// Keeps the current data, and the x range it was laid out against, as
    /// the origin of the next animation.
    pub fn snapshot_previous(&mut self, x_range: DoubleRange) {
        self.previous = (!self.state.is_empty()).then_some(BubbleSnapshot {
            x: self.x,
            y: self.y,
            size: self.size,
            x_range,
        });
    }

    pub fn clear_previous(&mut self) {
        self.previous = None;
    }

    pub fn on_layout(&mut self, series: &BubbleSeries<'_>) {
        self.center = None;
        self.radius = 0.0;
        let cartesian = &series.cartesian;
        if self.state.is_empty() || !cartesian.clip_range().intersects(self.x, self.x) {
            trace!(index = self.state.index(), "bubble skipped");
            self.state.clear_bounds();
            return;
        }

        let mut center = cartesian.point(self.x, self.y);
        let mut radius = series.size_to_radius(self.size);
        if cartesian.animation.can_animate() {
            let t = cartesian.animation.value();
            match self.previous.filter(|previous| previous.x_range == series.x_range) {
                Some(previous) => {
                    center = cartesian.point(previous.x, previous.y).lerp(center, t);
                    radius = lerp(series.size_to_radius(previous.size), radius, t);
                }
                // Rescoped data would otherwise fly in from a stale position.
                None => radius *= t,
            }
        }

        let diameter = radius * 2.0;
        self.state.set_bounds(rect_centered(center, diameter, diameter));
        self.center = Some(center);
        self.radius = radius;
    }

    #[must_use]
    pub fn center(&self) -> Option<Point> {
        self.center
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[must_use]
    pub fn size(&self) -> f64 {
        self.size
    }
}

impl ChartSegment for BubbleSegment {
    fn state(&self) -> &SegmentState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SegmentState {
        &mut self.state
    }

    fn draw(&self, frame: &mut RenderFrame) {
        let Some(center) = self.center.filter(|_| self.state.is_drawable()) else {
            return;
        };
        if self.radius <= 0.0 {
            return;
        }
        frame.push_circle(CirclePrimitive::new(
            center,
            self.radius,
            self.state.style().paint(),
        ));
    }

    fn data_point_index(&self, x: f64, y: f64) -> Option<usize> {
        let center = self.center.filter(|_| self.state.is_drawable())?;
        (self.radius > 0.0 && center.distance(Point::new(x, y)) <= self.radius)
            .then_some(self.state.index())
    }

    fn label_anchor(&self) -> Option<Point> {
        self.center
    }
}
