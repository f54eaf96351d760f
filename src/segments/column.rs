use kurbo::{Point, Rect, RoundedRectRadii};
use tracing::trace;

use crate::core::animation::{dynamic_animation_value, midline_expand};
use crate::core::geometry::{rect_contains, rect_from_edges};
use crate::core::SeriesRanges;
use crate::render::{RectPrimitive, RenderFrame};
use crate::segments::{ChartSegment, SegmentState};
use crate::series::CartesianSeries;

/// Screen-space edges of a rectangular segment.
///
/// All four edges are NaN while the segment is outside the visible range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectEdges {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl RectEdges {
    #[must_use]
    pub const fn nan() -> Self {
        Self {
            left: f64::NAN,
            top: f64::NAN,
            right: f64::NAN,
            bottom: f64::NAN,
        }
    }

    #[must_use]
    pub fn is_nan(&self) -> bool {
        self.left.is_nan()
    }

    /// Swaps inverted edges so `left <= right` and `top <= bottom`.
    #[must_use]
    pub fn normalized(self) -> Self {
        let (left, right) = if self.left > self.right {
            (self.right, self.left)
        } else {
            (self.left, self.right)
        };
        let (top, bottom) = if self.top > self.bottom {
            (self.bottom, self.top)
        } else {
            (self.top, self.bottom)
        };
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[must_use]
    pub fn to_rect(self) -> Rect {
        rect_from_edges(self.left, self.top, self.right, self.bottom)
    }
}

/// Lays out the rectangle spanned by the data corners `(x1, y1)` and
/// `(x2, y2)`.
///
/// Returns `None` when `[x1, x2]` misses the visible x range widened to whole
/// categories. While the series animates, the value edges blend from the
/// previous data pair, or grow out of their midline when there is none.
pub(crate) fn layout_rect(
    series: &CartesianSeries<'_>,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    previous: (f64, f64),
) -> Option<RectEdges> {
    if !series.clip_range().intersects(x1, x2) {
        return None;
    }

    let transform = series.transform;
    let mut edges = RectEdges {
        left: transform.transform_to_visible_x(x1, y1),
        top: transform.transform_to_visible_y(x1, y1),
        right: transform.transform_to_visible_x(x2, y2),
        bottom: transform.transform_to_visible_y(x2, y2),
    };

    if series.animation.can_animate() {
        let t = series.animation.value();
        let (previous_y1, previous_y2) = previous;
        let has_previous = !previous_y1.is_nan() && !previous_y2.is_nan();
        if series.is_transposed {
            if has_previous {
                let from_left = transform.transform_to_visible_x(x1, previous_y1);
                let from_right = transform.transform_to_visible_x(x2, previous_y2);
                edges.left = dynamic_animation_value(t, from_left, edges.left);
                edges.right = dynamic_animation_value(t, from_right, edges.right);
            } else {
                (edges.left, edges.right) = midline_expand(t, edges.left, edges.right);
            }
        } else if has_previous {
            let from_top = transform.transform_to_visible_y(x1, previous_y1);
            let from_bottom = transform.transform_to_visible_y(x2, previous_y2);
            edges.top = dynamic_animation_value(t, from_top, edges.top);
            edges.bottom = dynamic_animation_value(t, from_bottom, edges.bottom);
        } else {
            (edges.top, edges.bottom) = midline_expand(t, edges.top, edges.bottom);
        }
    }

    Some(edges.normalized())
}

/// One bar of a column (or transposed bar) series.
///
/// The bar spans `x1..x2` along the category axis and `y1..y2` along the
/// value axis, where `y2` is normally the axis crossing value.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSegment {
    state: SegmentState,
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
    previous_y1: f64,
    previous_y2: f64,
    edges: RectEdges,
    corner_radius: RoundedRectRadii,
    label_position: Option<Point>,
}

impl ColumnSegment {
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self {
            state: SegmentState::new(index),
            x1: f64::NAN,
            x2: f64::NAN,
            y1: f64::NAN,
            y2: f64::NAN,
            previous_y1: f64::NAN,
            previous_y2: f64::NAN,
            edges: RectEdges::nan(),
            corner_radius: RoundedRectRadii::from_single_radius(0.0),
            label_position: None,
        }
    }

    /// Stores the bar corners and grows the series ranges.
    ///
    /// Any NaN value marks the segment empty.
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

    /// Captures the current value pair as the animation origin for the next
    /// data change.
    pub fn snapshot_previous(&mut self) {
        self.previous_y1 = self.y1;
        self.previous_y2 = self.y2;
    }

    pub fn clear_previous(&mut self) {
        self.previous_y1 = f64::NAN;
        self.previous_y2 = f64::NAN;
    }

    pub fn set_corner_radius(&mut self, corner_radius: RoundedRectRadii) {
        self.corner_radius = corner_radius;
    }

    pub fn on_layout(&mut self, series: &CartesianSeries<'_>) {
        if self.state.is_empty() {
            self.reset_geometry();
            return;
        }

        match layout_rect(
            series,
            self.x1,
            self.y1,
            self.x2,
            self.y2,
            (self.previous_y1, self.previous_y2),
        ) {
            Some(edges) => {
                self.edges = edges;
                self.state.set_bounds(edges.to_rect());
                self.label_position = Some(series.point((self.x1 + self.x2) / 2.0, self.y1));
            }
            None => {
                trace!(index = self.state.index(), "column outside visible range");
                self.reset_geometry();
            }
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

    #[must_use]
    pub fn left(&self) -> f64 {
        self.edges.left
    }

    #[must_use]
    pub fn top(&self) -> f64 {
        self.edges.top
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.edges.right
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.edges.bottom
    }
}

/// Corner radii clamped so opposite corners never overlap.
pub(crate) fn clamp_corner_radii(radii: RoundedRectRadii, rect: Rect) -> RoundedRectRadii {
    let limit = (rect.width().min(rect.height()) / 2.0).max(0.0);
    RoundedRectRadii::new(
        radii.top_left.clamp(0.0, limit),
        radii.top_right.clamp(0.0, limit),
        radii.bottom_right.clamp(0.0, limit),
        radii.bottom_left.clamp(0.0, limit),
    )
}

impl ChartSegment for ColumnSegment {
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
        let rect = self.edges.to_rect();
        frame.push_rect(
            RectPrimitive::new(rect, self.state.style().paint())
                .with_corner_radii(clamp_corner_radii(self.corner_radius, rect)),
        );
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
