use kurbo::{Point, Rect, Vec2};
use tracing::trace;

use crate::core::animation::lerp;
use crate::core::geometry::{angle_to_vector, point_on_circle, radian_to_degree, rect_centered};
use crate::render::{PathPrimitive, RenderFrame};
use crate::segments::arc::{CAP_ANGLE_DIVISOR, CapStyle, RingSector};
use crate::segments::{ChartSegment, SegmentState};
use crate::series::CircularSeries;

/// Angles of one slice after applying the series animation.
///
/// Without a previous snapshot the slice sweeps open from the series start
/// angle; otherwise both angles blend from the snapshot.
pub(crate) fn animated_angles(
    series: &CircularSeries,
    start_angle: f64,
    sweep_angle: f64,
    previous: Option<(f64, f64)>,
) -> (f64, f64) {
    if !series.animation.can_animate() {
        return (start_angle, sweep_angle);
    }
    let t = series.animation.value();
    match previous {
        Some((previous_start, previous_sweep)) => (
            lerp(previous_start, start_angle, t),
            lerp(previous_sweep, sweep_angle, t),
        ),
        None => (
            series.start_angle + (start_angle - series.start_angle) * t,
            sweep_angle * t,
        ),
    }
}

/// Middle of the slice, in radians.
#[must_use]
pub fn mid_angle(start_angle: f64, sweep_angle: f64) -> f64 {
    (start_angle + sweep_angle / 2.0) * (std::f64::consts::PI / 180.0)
}

/// Laid-out geometry shared by pie and doughnut slices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SliceLayout {
    pub sector: RingSector,
    pub mid_angle: f64,
}

impl SliceLayout {
    pub fn new(
        series: &CircularSeries,
        index: usize,
        start_angle: f64,
        sweep_angle: f64,
        inner_radius: f64,
    ) -> Self {
        let mid_angle = mid_angle(start_angle, sweep_angle);
        let offset = if series.is_exploded(index) && series.explode_radius.is_finite() {
            angle_to_vector(radian_to_degree(mid_angle)) * series.explode_radius
        } else {
            Vec2::ZERO
        };
        Self {
            sector: RingSector {
                center: series.center + offset,
                inner_radius,
                outer_radius: series.radius,
                start_angle,
                sweep_angle,
            },
            mid_angle,
        }
    }

    /// Square around the full circle the slice belongs to, moved with the
    /// explode offset.
    pub fn bounds(&self) -> Rect {
        let diameter = self.sector.outer_radius * 2.0;
        rect_centered(self.sector.center, diameter, diameter)
    }

    /// Middle of the slice band along the mid angle.
    pub fn label_anchor(&self) -> Point {
        point_on_circle(
            self.sector.center,
            self.sector.mid_radius(),
            radian_to_degree(self.mid_angle),
        )
    }
}

/// One pie slice covering `start_angle..start_angle + sweep_angle` degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSegment {
    state: SegmentState,
    value: f64,
    start_angle: f64,
    sweep_angle: f64,
    previous: Option<(f64, f64)>,
    layout: Option<SliceLayout>,
}

impl PieSegment {
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self {
            state: SegmentState::new(index),
            value: f64::NAN,
            start_angle: f64::NAN,
            sweep_angle: f64::NAN,
            previous: None,
            layout: None,
        }
    }

    /// Stores the slice value and its angular span; NaN inputs mark the
    /// slice empty.
    pub fn set_data(&mut self, value: f64, start_angle: f64, sweep_angle: f64) {
        self.value = value;
        self.start_angle = start_angle;
        self.sweep_angle = sweep_angle;
        self.state
            .set_empty(value.is_nan() || start_angle.is_nan() || sweep_angle.is_nan());
    }

    /// Keeps the current angles as the origin of the next animation.
    pub fn snapshot_previous(&mut self) {
        self.previous = (!self.state.is_empty()).then_some((self.start_angle, self.sweep_angle));
    }

    pub fn clear_previous(&mut self) {
        self.previous = None;
    }

    pub fn on_layout(&mut self, series: &CircularSeries) {
        if self.state.is_empty() {
            trace!(index = self.state.index(), "pie slice has no value");
            self.layout = None;
            self.state.clear_bounds();
            return;
        }
        let (start_angle, sweep_angle) =
            animated_angles(series, self.start_angle, self.sweep_angle, self.previous);
        let layout = SliceLayout::new(series, self.state.index(), start_angle, sweep_angle, 0.0);
        self.state.set_bounds(layout.bounds());
        self.layout = Some(layout);
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    #[must_use]
    pub fn sweep_angle(&self) -> f64 {
        self.sweep_angle
    }

    /// Sector drawn by the last layout, animation applied.
    #[must_use]
    pub fn sector(&self) -> Option<RingSector> {
        self.layout.map(|layout| layout.sector)
    }

    /// Middle of the laid-out slice, in radians.
    #[must_use]
    pub fn mid_angle(&self) -> Option<f64> {
        self.layout.map(|layout| layout.mid_angle)
    }
}

impl ChartSegment for PieSegment {
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
        let path = layout.sector.to_path(CapStyle::BothFlat, CAP_ANGLE_DIVISOR);
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
