//! Per-chart-type segment geometry.
//!
//! Every segment follows the same lifecycle: `set_data` ingests raw values,
//! `on_layout` turns them into screen geometry for the current axis and
//! animation state, `draw` pushes primitives computed by the last layout, and
//! `data_point_index` answers pointer queries against that geometry.

pub mod arc;
pub mod area;
pub mod box_whisker;
pub mod bubble;
pub mod column;
pub mod doughnut;
pub mod error_bar;
pub mod funnel;
pub mod pie;
pub mod pyramid;
pub mod radial_bar;
pub mod range_column;
pub mod waterfall;

pub use arc::CapStyle;
pub use area::AreaSegment;
pub use box_whisker::{BoxPlotHit, BoxWhiskerSegment};
pub use bubble::BubbleSegment;
pub use column::ColumnSegment;
pub use doughnut::DoughnutSegment;
pub use error_bar::{ErrorBarDirection, ErrorBarMode, ErrorBarSegment, ErrorBarType};
pub use funnel::FunnelSegment;
pub use pie::PieSegment;
pub use pyramid::PyramidSegment;
pub use radial_bar::RadialBarSegment;
pub use range_column::RangeColumnSegment;
pub use waterfall::{ValueSide, WaterfallSegment, WaterfallSegmentType};

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::geometry::{is_finite_rect, nan_rect};
use crate::render::{Color, Paint, RenderFrame, StrokeStyle};

const MIN_STROKE_WIDTH: f64 = 1.0;

/// Visual style of one segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentStyle {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    #[serde(default)]
    pub stroke_dash_pattern: SmallVec<[f64; 4]>,
    pub opacity: f64,
}

impl Default for SegmentStyle {
    fn default() -> Self {
        Self {
            fill: Some(Color::BLACK),
            stroke: None,
            stroke_width: MIN_STROKE_WIDTH,
            stroke_dash_pattern: SmallVec::new(),
            opacity: 1.0,
        }
    }
}

impl SegmentStyle {
    /// Paint for the segment body.
    #[must_use]
    pub fn paint(&self) -> Paint {
        Paint {
            fill: self.fill,
            stroke: self.stroke_style(),
            opacity: self.opacity,
        }
    }

    /// Stroke settings, or `None` when the segment has no stroke color.
    #[must_use]
    pub fn stroke_style(&self) -> Option<StrokeStyle> {
        self.stroke.map(|color| StrokeStyle {
            color,
            width: self.stroke_width,
            dash_pattern: self.stroke_dash_pattern.clone(),
        })
    }

    /// Stroke for line-only geometry (whiskers, connectors, caps); falls back
    /// to the fill color when no stroke color is configured.
    #[must_use]
    pub fn line_paint(&self) -> Paint {
        let color = self.stroke.or(self.fill).unwrap_or(Color::BLACK);
        Paint::stroke_only(
            StrokeStyle {
                color,
                width: self.stroke_width,
                dash_pattern: self.stroke_dash_pattern.clone(),
            },
            self.opacity,
        )
    }
}

/// State shared by every segment type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentState {
    index: usize,
    pub is_visible: bool,
    pub is_selected: bool,
    is_empty: bool,
    bounds: Rect,
    style: SegmentStyle,
    dirty: bool,
}

impl SegmentState {
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self {
            index,
            is_visible: true,
            is_selected: false,
            is_empty: false,
            bounds: nan_rect(),
            style: SegmentStyle::default(),
            dirty: false,
        }
    }

    /// Position of the segment within its series' segment list.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Set while the source values are NaN or otherwise unusable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.is_empty
    }

    pub fn set_empty(&mut self, is_empty: bool) {
        self.is_empty = is_empty;
    }

    /// Axis-aligned hit-test and invalidation box from the last layout.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn clear_bounds(&mut self) {
        self.bounds = nan_rect();
    }

    /// Visible, non-empty and laid out with finite bounds.
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        self.is_visible && !self.is_empty && is_finite_rect(self.bounds)
    }

    #[must_use]
    pub fn style(&self) -> &SegmentStyle {
        &self.style
    }

    pub fn set_fill(&mut self, fill: Option<Color>) {
        if self.style.fill != fill {
            self.style.fill = fill;
            self.dirty = true;
        }
    }

    pub fn set_stroke(&mut self, stroke: Option<Color>) {
        if self.style.stroke != stroke {
            self.style.stroke = stroke;
            self.dirty = true;
        }
    }

    /// Non-finite or non-positive widths are replaced by a 1px stroke.
    pub fn set_stroke_width(&mut self, stroke_width: f64) {
        let stroke_width = if stroke_width.is_finite() && stroke_width > 0.0 {
            stroke_width
        } else {
            debug!(
                index = self.index,
                requested = stroke_width,
                "substituting minimum stroke width"
            );
            MIN_STROKE_WIDTH
        };
        if self.style.stroke_width != stroke_width {
            self.style.stroke_width = stroke_width;
            self.dirty = true;
        }
    }

    pub fn set_stroke_dash_pattern(&mut self, pattern: &[f64]) {
        if self.style.stroke_dash_pattern.as_slice() != pattern {
            self.style.stroke_dash_pattern = SmallVec::from_slice(pattern);
            self.dirty = true;
        }
    }

    /// Opacity is clamped into `[0, 1]`; NaN is ignored.
    pub fn set_opacity(&mut self, opacity: f64) {
        if opacity.is_nan() {
            return;
        }
        self.style.opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn set_style(&mut self, style: SegmentStyle) {
        self.set_fill(style.fill);
        self.set_stroke(style.stroke);
        self.set_stroke_width(style.stroke_width);
        self.set_stroke_dash_pattern(&style.stroke_dash_pattern);
        self.set_opacity(style.opacity);
    }

    /// Whether a style change is waiting for the next layout pass.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns and clears the pending style-change flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

/// Behavior shared by all segment types once they have been laid out.
///
/// Layout is intentionally not part of this trait: each segment type lays
/// itself out against the strongly typed series context it belongs to.
pub trait ChartSegment {
    fn state(&self) -> &SegmentState;

    fn state_mut(&mut self) -> &mut SegmentState;

    /// Pushes the primitives for the geometry computed by the last layout.
    ///
    /// Segments that are empty, hidden or not laid out push nothing.
    fn draw(&self, frame: &mut RenderFrame);

    /// Index of this segment when `(x, y)` hits its geometry.
    fn data_point_index(&self, x: f64, y: f64) -> Option<usize>;

    fn hit_test(&self, x: f64, y: f64) -> bool {
        self.data_point_index(x, y).is_some()
    }

    /// Anchor for the data label, in screen coordinates.
    fn label_anchor(&self) -> Option<Point>;

    fn bounds(&self) -> Rect {
        self.state().bounds()
    }

    fn index(&self) -> usize {
        self.state().index()
    }
}

/// Finds the topmost segment hit by `(x, y)`.
///
/// Segments later in the list are drawn above earlier ones, so they are
/// queried first. Hidden and empty segments are skipped.
pub fn hit_test_segments<S: ChartSegment>(segments: &[S], x: f64, y: f64) -> Option<usize> {
    segments
        .iter()
        .rev()
        .filter(|segment| segment.state().is_visible && !segment.state().is_empty())
        .find_map(|segment| segment.data_point_index(x, y))
}

/// Draws every segment of a series in list order.
pub fn draw_segments<S: ChartSegment>(segments: &[S], frame: &mut RenderFrame) {
    for segment in segments {
        segment.draw(frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_setters_raise_dirty_flag_once() {
        let mut state = SegmentState::new(0);
        assert!(!state.is_dirty());
        state.set_fill(Some(Color::rgb(1.0, 0.0, 0.0)));
        assert!(state.take_dirty());
        assert!(!state.take_dirty());
        state.set_fill(Some(Color::rgb(1.0, 0.0, 0.0)));
        assert!(!state.is_dirty());
    }

    #[test]
    fn invalid_stroke_width_falls_back_to_one_pixel() {
        let mut state = SegmentState::new(3);
        state.set_stroke_width(4.0);
        state.set_stroke_width(-2.0);
        assert_eq!(state.style().stroke_width, 1.0);
        state.set_stroke_width(f64::NAN);
        assert_eq!(state.style().stroke_width, 1.0);
    }

    #[test]
    fn opacity_is_clamped_and_nan_ignored() {
        let mut state = SegmentState::new(0);
        state.set_opacity(1.7);
        assert_eq!(state.style().opacity, 1.0);
        state.set_opacity(0.4);
        state.set_opacity(f64::NAN);
        assert_eq!(state.style().opacity, 0.4);
        state.set_opacity(-3.0);
        assert_eq!(state.style().opacity, 0.0);
        assert!(!state.is_dirty());
    }

    #[test]
    fn fresh_state_is_not_drawable() {
        assert!(!SegmentState::new(0).is_drawable());
    }
}
