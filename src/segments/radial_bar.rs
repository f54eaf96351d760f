use kurbo::Point;
use tracing::{debug, trace};

use crate::core::animation::lerp;
use crate::core::geometry::{point_on_circle, rect_centered};
use crate::render::{Color, PathPrimitive, RenderFrame};
use crate::segments::arc::{CAP_ANGLE_DIVISOR, CapStyle, RingSector, TRACK_CAP_ANGLE_DIVISOR};
use crate::segments::{ChartSegment, SegmentState, SegmentStyle};
use crate::series::RadialBarSeries;

const DEFAULT_TRACK_FILL: Color = Color::rgba(0.0, 0.0, 0.0, 0.08);

/// Inner and outer radius of the ring at `index`; index 0 is the outermost
/// ring.
///
/// Returns `None` when the series has no rings or the ring would have no
/// thickness.
#[must_use]
pub fn ring_radii(series: &RadialBarSeries, index: usize) -> Option<(f64, f64)> {
    if series.segment_count == 0 || index >= series.segment_count {
        return None;
    }
    let hole = series.radius * series.inner_radius_ratio.clamp(0.0, 1.0);
    let ring_size = (series.radius - hole) / series.segment_count as f64;
    let gap = ring_size * series.gap_ratio.clamp(0.0, 1.0);
    let outer = series.radius - ring_size * index as f64;
    let inner = outer - (ring_size - gap);
    (ring_size.is_finite() && outer > inner && inner >= 0.0).then_some((inner, outer))
}

/// One ring of a radial bar series: a background track over the whole
/// series sweep and a value arc over `value / maximum` of it.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialBarSegment {
    state: SegmentState,
    value: f64,
    previous_value: Option<f64>,
    track_style: SegmentStyle,
    track: Option<RingSector>,
    bar: Option<RingSector>,
    cap_style: CapStyle,
}

impl RadialBarSegment {
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self {
            state: SegmentState::new(index),
            value: f64::NAN,
            previous_value: None,
            track_style: SegmentStyle {
                fill: Some(DEFAULT_TRACK_FILL),
                ..SegmentStyle::default()
            },
            track: None,
            bar: None,
            cap_style: CapStyle::BothFlat,
        }
    }

    pub fn set_data(&mut self, value: f64) {
        self.value = value;
        self.state.set_empty(value.is_nan());
    }

    pub fn snapshot_previous(&mut self) {
        self.previous_value = (!self.value.is_nan()).then_some(self.value);
    }

    pub fn set_track_style(&mut self, track_style: SegmentStyle) {
        self.track_style = track_style;
    }

    #[must_use]
    pub fn track_style(&self) -> &SegmentStyle {
        &self.track_style
    }

    pub fn on_layout(&mut self, series: &RadialBarSeries) {
        self.track = None;
        self.bar = None;
        if self.state.is_empty() {
            self.state.clear_bounds();
            return;
        }
        let Some((inner_radius, outer_radius)) = ring_radii(series, self.state.index()) else {
            trace!(
                index = self.state.index(),
                segment_count = series.segment_count,
                "radial bar ring has no thickness"
            );
            self.state.clear_bounds();
            return;
        };

        let series_sweep = series.sweep();
        let sweep_for = |value: f64| {
            if series.maximum > 0.0 && series.maximum.is_finite() {
                (value / series.maximum).clamp(0.0, 1.0) * series_sweep
            } else {
                0.0
            }
        };
        if series.maximum.is_nan() || series.maximum <= 0.0 {
            debug!(maximum = series.maximum, "radial bar maximum is not positive");
        }

        let mut sweep_angle = sweep_for(self.value);
        if series.animation.can_animate() {
            let from = self.previous_value.map_or(0.0, sweep_for);
            sweep_angle = lerp(from, sweep_angle, series.animation.value());
        }

        self.track = Some(RingSector {
            center: series.center,
            inner_radius,
            outer_radius,
            start_angle: series.start_angle,
            sweep_angle: series_sweep,
        });
        self.bar = Some(RingSector {
            center: series.center,
            inner_radius,
            outer_radius,
            start_angle: series.start_angle,
            sweep_angle,
        });
        self.cap_style = series.cap_style;
        let diameter = outer_radius * 2.0;
        self.state
            .set_bounds(rect_centered(series.center, diameter, diameter));
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Background arc over the whole series sweep.
    #[must_use]
    pub fn track(&self) -> Option<RingSector> {
        self.track
    }

    /// Value arc, animation applied.
    #[must_use]
    pub fn bar(&self) -> Option<RingSector> {
        self.bar
    }

    /// Angle where the value arc currently ends.
    #[must_use]
    pub fn draw_end_angle(&self) -> Option<f64> {
        self.bar.map(|bar| bar.end_angle())
    }
}

impl ChartSegment for RadialBarSegment {
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
        if let Some(track) = self.track {
            let path = track.to_path(self.cap_style, TRACK_CAP_ANGLE_DIVISOR);
            if !path.elements().is_empty() {
                frame.push_path(PathPrimitive::new(path, self.track_style.paint()));
            }
        }
        if let Some(bar) = self.bar {
            let path = bar.to_path(self.cap_style, CAP_ANGLE_DIVISOR);
            if !path.elements().is_empty() {
                frame.push_path(PathPrimitive::new(path, self.state.style().paint()));
            }
        }
    }

    fn data_point_index(&self, x: f64, y: f64) -> Option<usize> {
        let bar = self.bar.filter(|_| self.state.is_drawable())?;
        bar.contains(Point::new(x, y)).then_some(self.state.index())
    }

    fn label_anchor(&self) -> Option<Point> {
        self.bar
            .map(|bar| point_on_circle(bar.center, bar.mid_radius(), bar.start_angle))
    }
}
