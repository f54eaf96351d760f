use kurbo::Point;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::geometry::rect_contains;
use crate::core::SeriesRanges;
use crate::render::{LinePrimitive, RectPrimitive, RenderFrame};
use crate::segments::column::{RectEdges, layout_rect};
use crate::segments::{ChartSegment, SegmentState};
use crate::series::CartesianSeries;

/// Role of a waterfall bar in the running total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaterfallSegmentType {
    Positive,
    Negative,
    Sum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Left,
    Top,
    Right,
    Bottom,
}

impl Edge {
    fn of(self, edges: &RectEdges) -> f64 {
        match self {
            Self::Left => edges.left,
            Self::Top => edges.top,
            Self::Right => edges.right,
            Self::Bottom => edges.bottom,
        }
    }
}

/// Side of a bar along the value axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueSide {
    /// The edge at the larger value.
    High,
    /// The edge at the smaller value.
    Low,
}

/// Screen edge holding `side` of a bar.
fn value_edge(side: ValueSide, is_transposed: bool, value_inversed: bool) -> Edge {
    // Inversion moves the high side onto the bottom or left edge.
    let top_or_right = (side == ValueSide::High) != value_inversed;
    match (is_transposed, top_or_right) {
        (false, true) => Edge::Top,
        (false, false) => Edge::Bottom,
        (true, true) => Edge::Right,
        (true, false) => Edge::Left,
    }
}

/// Trailing edge of the previous bar and leading edge of the current bar
/// along the category axis.
fn category_edges(is_transposed: bool, category_inversed: bool) -> (Edge, Edge) {
    match (is_transposed, category_inversed) {
        (false, false) => (Edge::Right, Edge::Left),
        (false, true) => (Edge::Left, Edge::Right),
        (true, false) => (Edge::Top, Edge::Bottom),
        (true, true) => (Edge::Bottom, Edge::Top),
    }
}

/// Connector from the running total left by `previous` to the level where
/// `current` picks it up.
///
/// `previous_side` is the value side of the previous bar holding the total
/// after it, `current_side` the side of the current bar where the total
/// enters. See [`WaterfallSegment::total_side`] and
/// [`WaterfallSegment::entry_side`].
#[must_use]
pub fn connector_line(
    previous_side: ValueSide,
    previous: &RectEdges,
    current_side: ValueSide,
    current: &RectEdges,
    is_transposed: bool,
    category_inversed: bool,
    value_inversed: bool,
) -> (Point, Point) {
    let previous_value = value_edge(previous_side, is_transposed, value_inversed);
    let current_value = value_edge(current_side, is_transposed, value_inversed);
    let (previous_category, current_category) = category_edges(is_transposed, category_inversed);

    if is_transposed {
        (
            Point::new(previous_value.of(previous), previous_category.of(previous)),
            Point::new(current_value.of(current), current_category.of(current)),
        )
    } else {
        (
            Point::new(previous_category.of(previous), previous_value.of(previous)),
            Point::new(current_category.of(current), current_value.of(current)),
        )
    }
}

/// One bar of a waterfall chain.
///
/// `y2` is where the running total stood before this bar and `y1` where it
/// stands after it. Sum bars run from zero to the total.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterfallSegment {
    state: SegmentState,
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
    previous_y1: f64,
    previous_y2: f64,
    segment_type: WaterfallSegmentType,
    previous_segment: Option<usize>,
    show_connector: bool,
    edges: RectEdges,
    connector: Option<(Point, Point)>,
    label_position: Option<Point>,
}

impl WaterfallSegment {
    #[must_use]
    pub fn new(index: usize, segment_type: WaterfallSegmentType) -> Self {
        Self {
            state: SegmentState::new(index),
            x1: f64::NAN,
            x2: f64::NAN,
            y1: f64::NAN,
            y2: f64::NAN,
            previous_y1: f64::NAN,
            previous_y2: f64::NAN,
            segment_type,
            previous_segment: None,
            show_connector: true,
            edges: RectEdges::nan(),
            connector: None,
            label_position: None,
        }
    }

    pub fn set_data(&mut self, x1: f64, x2: f64, y1: f64, y2: f64, ranges: &mut SeriesRanges) {
        self.x1 = x1;
        self.x2 = x2;
        self.y1 = y1;
        self.y2 = y2;
        self.state
            .set_empty([x1, x2, y1, y2].iter().any(|value| value.is_nan()));
        ranges.extend_x(x1);
        ranges.extend_x(x2);
        ranges.extend_y(y1);
        ranges.extend_y(y2);
    }

    /// Links this bar to the bar before it in the chain, by segment index.
    pub fn set_previous_segment(&mut self, previous: Option<usize>) {
        self.previous_segment = previous;
    }

    #[must_use]
    pub fn previous_segment(&self) -> Option<usize> {
        self.previous_segment
    }

    pub fn set_show_connector(&mut self, show_connector: bool) {
        self.show_connector = show_connector;
    }

    pub fn snapshot_previous(&mut self) {
        self.previous_y1 = self.y1;
        self.previous_y2 = self.y2;
    }

    #[must_use]
    pub fn segment_type(&self) -> WaterfallSegmentType {
        self.segment_type
    }

    /// Value side where the running total stands after this bar.
    ///
    /// Sum bars run from zero to the total, so a negative total sits on
    /// their low side.
    #[must_use]
    pub fn total_side(&self) -> ValueSide {
        match self.segment_type {
            WaterfallSegmentType::Positive => ValueSide::High,
            WaterfallSegmentType::Negative => ValueSide::Low,
            WaterfallSegmentType::Sum if self.y1 < self.y2 => ValueSide::Low,
            WaterfallSegmentType::Sum => ValueSide::High,
        }
    }

    /// Value side where this bar picks up the running total.
    #[must_use]
    pub fn entry_side(&self) -> ValueSide {
        match self.segment_type {
            WaterfallSegmentType::Positive => ValueSide::Low,
            WaterfallSegmentType::Negative => ValueSide::High,
            WaterfallSegmentType::Sum => self.total_side(),
        }
    }

    /// Lays out the bar, then the connector from `previous` when the chain
    /// link is laid out as well.
    pub fn on_layout(&mut self, series: &CartesianSeries<'_>, previous: Option<&Self>) {
        self.connector = None;
        if self.state.is_empty() {
            self.reset_geometry();
            return;
        }

        let laid_out = layout_rect(
            series,
            self.x1,
            self.y1,
            self.x2,
            self.y2,
            (self.previous_y1, self.previous_y2),
        );
        let Some(edges) = laid_out else {
            trace!(index = self.state.index(), "waterfall bar outside visible range");
            self.reset_geometry();
            return;
        };
        self.edges = edges;
        self.state.set_bounds(edges.to_rect());
        self.label_position = Some(series.point((self.x1 + self.x2) / 2.0, self.y1));

        if let Some(previous) = previous.filter(|previous| !previous.edges.is_nan()) {
            self.connector = Some(connector_line(
                previous.total_side(),
                &previous.edges,
                self.entry_side(),
                &self.edges,
                series.is_transposed,
                series.x_axis.is_inversed,
                series.y_axis.is_inversed,
            ));
        }
    }

    fn reset_geometry(&mut self) {
        self.edges = RectEdges::nan();
        self.state.clear_bounds();
        self.label_position = None;
    }

    #[must_use]
    pub fn edges(&self) -> RectEdges {
        self.edges
    }

    /// Connector endpoints from the previous bar, when both are laid out.
    #[must_use]
    pub fn connector(&self) -> Option<(Point, Point)> {
        self.connector
    }
}

impl ChartSegment for WaterfallSegment {
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
        if let Some((start, end)) = self.connector.filter(|_| self.show_connector) {
            frame.push_line(LinePrimitive::new(start, end, self.state.style().line_paint()));
        }
    }

    fn data_point_index(&self, x: f64, y: f64) -> Option<usize> {
        if !self.state.is_drawable() {
            return None;
        }
        rect_contains(self.state.bounds(), Point::new(x, y)).then_some(self.state.index())
    }

    fn label_anchor(&self) -> Option<Point> {
        self.label_position
    }
}
