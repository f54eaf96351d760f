use kurbo::{Point, Rect};
use tracing::trace;

use crate::core::geometry::rect_centered;
use crate::render::{PathPrimitive, RenderFrame};
use crate::segments::arc::{CAP_ANGLE_DIVISOR, CapStyle, RingSector};
use crate::segments::pie::{SliceLayout, animated_angles};
use crate::segments::{ChartSegment, SegmentState};
use crate::series::CircularSeries;

/// One doughnut slice: a pie slice with a hole of `inner_radius` pixels and
/// optionally rounded ends.
#[derive(Debug, Clone, PartialEq)]
pub struct DoughnutSegment {
    state: SegmentState,
    value: f64,
    start_angle: f64,
    sweep_angle: f64,
    previous: Option<(f64, f64)>,
    layout: Option<SliceLayout>,
    cap_style: CapStyle,
}

impl DoughnutSegment {
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self {
            state: SegmentState::new(index),
            value: f64::NAN,
            start_angle: f64::NAN,
            sweep_angle: f64::NAN,
            previous: None,
            layout: None,
            cap_style: CapStyle::BothFlat,
        }
    }

    pub fn set_data(&mut self, value: f64, start_angle: f64, sweep_angle: f64) {
        self.value = value;
        self.start_angle = start_angle;
        self.sweep_angle = sweep_angle;
        self.state
            .set_empty(value.is_nan() || start_angle.is_nan() || sweep_angle.is_nan());
    }

    pub fn snapshot_previous(&mut self) {
        self.previous = (!self.state.is_empty()).then_some((self.start_angle, self.sweep_angle));
    }

    pub fn clear_previous(&mut self) {
        self.previous = None;
    }

    pub fn on_layout(&mut self, series: &CircularSeries) {
        if self.state.is_empty() {
            trace!(index = self.state.index(), "doughnut slice has no value");
            self.layout = None;
            self.state.clear_bounds();
            return;
        }
        let (start_angle, sweep_angle) =
            animated_angles(series, self.start_angle, self.sweep_angle, self.previous);
        let inner_radius = series.inner_radius.clamp(0.0, series.radius.max(0.0));
        let layout = SliceLayout::new(
            series,
            self.state.index(),
            start_angle,
            sweep_angle,
            inner_radius,
        );
        self.cap_style = series.cap_style;
        self.state.set_bounds(layout.bounds());
        self.layout = Some(layout);
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn sector(&self) -> Option<RingSector> {
        self.layout.map(|layout| layout.sector)
    }

    #[must_use]
    pub fn mid_angle(&self) -> Option<f64> {
        self.layout.map(|layout| layout.mid_angle)
    }

    /// Square around the hole, moved with the explode offset.
    #[must_use]
    pub fn inner_bounds(&self) -> Option<Rect> {
        self.layout.map(|layout| {
            let diameter = layout.sector.inner_radius * 2.0;
            rect_centered(layout.sector.center, diameter, diameter)
        })
    }
}

impl ChartSegment for DoughnutSegment {
    fn state(&self) -> &SegmentState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SegmentState {
        &mut self.state
    }

    fn draw(&self, frame: &mut RenderFrame) {
        let Some(layout) = self.layout.filter(|_| self.state.is_drawable()) else {
            return;
        };
        let path = layout.sector.to_path(self.cap_style, CAP_ANGLE_DIVISOR);
        if path.elements().is_empty() {
            return;
        }
        frame.push_path(PathPrimitive::new(path, self.state.style().paint()));
    }

    fn data_point_index(&self, x: f64, y: f64) -> Option<usize> {
        let layout = self.layout.filter(|_| self.state.is_drawable())?;
        layout
            .sector
            .contains(Point::new(x, y))
            .then_some(self.state.index())
    }

    fn label_anchor(&self) -> Option<Point> {
        self.layout.map(|layout| layout.label_anchor())
    }
}
