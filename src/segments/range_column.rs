use kurbo::Point;
use tracing::trace;

use crate::core::geometry::rect_contains;
use crate::core::SeriesRanges;
use crate::render::{RectPrimitive, RenderFrame};
use crate::segments::column::{RectEdges, layout_rect};
use crate::segments::{ChartSegment, SegmentState};
use crate::series::CartesianSeries;

/// A bar spanning two independent values, `high` and `low`.
///
/// Width follows the category range only; height follows the value pair.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeColumnSegment {
    state: SegmentState,
    x1: f64,
    x2: f64,
    high: f64,
    low: f64,
    previous_high: f64,
    previous_low: f64,
    edges: RectEdges,
    high_label_position: Option<Point>,
    low_label_position: Option<Point>,
}

impl RangeColumnSegment {
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self {
            state: SegmentState::new(index),
            x1: f64::NAN,
            x2: f64::NAN,
            high: f64::NAN,
            low: f64::NAN,
            previous_high: f64::NAN,
            previous_low: f64::NAN,
            edges: RectEdges::nan(),
            high_label_position: None,
            low_label_position: None,
        }
    }

    pub fn set_data(&mut self, x1: f64, x2: f64, high: f64, low: f64, ranges: &mut SeriesRanges) {
        self.x1 = x1;
        self.x2 = x2;
        self.high = high;
        self.low = low;
        self.state
            .set_empty([x1, x2, high, low].iter().any(|value| value.is_nan()));
        ranges.extend_x(x1);
        ranges.extend_x(x2);
        ranges.extend_y(high);
        ranges.extend_y(low);
    }

    pub fn snapshot_previous(&mut self) {
        self.previous_high = self.high;
        self.previous_low = self.low;
    }

    /// Drops the animation origin so the next animated layout grows from the
    /// midline again.
    pub fn clear_previous(&mut self) {
        self.previous_high = f64::NAN;
        self.previous_low = f64::NAN;
    }

    pub fn on_layout(&mut self, series: &CartesianSeries<'_>) {
        if self.state.is_empty() {
            self.reset_geometry();
            return;
        }

        let laid_out = layout_rect(
            series,
            self.x1,
            self.high,
            self.x2,
            self.low,
            (self.previous_high, self.previous_low),
        );
        let Some(edges) = laid_out else {
            trace!(index = self.state.index(), "range column outside visible range");
            self.reset_geometry();
            return;
        };

        self.edges = edges;
        self.state.set_bounds(edges.to_rect());
        let center = (self.x1 + self.x2) / 2.0;
        self.high_label_position = Some(series.point(center, self.high));
        self.low_label_position = Some(series.point(center, self.low));
    }

    fn reset_geometry(&mut self) {
        self.edges = RectEdges::nan();
        self.state.clear_bounds();
        self.high_label_position = None;
        self.low_label_position = None;
    }

    #[must_use]
    pub fn edges(&self) -> RectEdges {
        self.edges
    }

    /// Label anchor of the high value.
    #[must_use]
    pub fn high_label_position(&self) -> Option<Point> {
        self.high_label_position
    }

    /// Label anchor of the low value.
    #[must_use]
    pub fn low_label_position(&self) -> Option<Point> {
        self.low_label_position
    }
}

impl ChartSegment for RangeColumnSegment {
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
        frame.push_rect(RectPrimitive::new(
            self.edges.to_rect(),
            self.state.style().paint(),
        ));
    }

    fn data_point_index(&self, x: f64, y: f64) -> Option<usize> {
        if !self.state.is_drawable() {
            return None;
        }
        rect_contains(self.state.bounds(), Point::new(x, y)).then_some(self.state.index())
    }

    fn label_anchor(&self) -> Option<Point> {
        self.high_label_position
    }
}
