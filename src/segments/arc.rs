//! Ring and sector paths shared by pie, doughnut and radial bar segments.
//!
//! Angles are degrees on screen (0 along +x, growing clockwise). A positive
//! sweep runs clockwise, a negative one counter-clockwise.

use kurbo::{Arc, BezPath, Circle, Point, Shape, Vec2};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::geometry::{
    angle_deviation, degree_to_radian, point_in_arc, point_on_circle,
};

/// Cap depth divisor for value arcs.
pub const CAP_ANGLE_DIVISOR: f64 = 1.75;
/// Cap depth divisor for radial bar tracks.
pub const TRACK_CAP_ANGLE_DIVISOR: f64 = 1.65;
/// Divisor turning ring thickness into the tangent length of cap control
/// points.
pub const CAP_CURVE_DEPTH_DIVISOR: f64 = 1.2;

/// Flattening tolerance for arc to cubic conversion, in pixels.
const ARC_TOLERANCE: f64 = 0.1;

/// Shape of the angular ends of a ring segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CapStyle {
    #[default]
    BothFlat,
    StartCurve,
    EndCurve,
    BothCurve,
}

impl CapStyle {
    #[must_use]
    pub fn curves_start(self) -> bool {
        matches!(self, Self::StartCurve | Self::BothCurve)
    }

    #[must_use]
    pub fn curves_end(self) -> bool {
        matches!(self, Self::EndCurve | Self::BothCurve)
    }
}

/// Cubic closing one ring end: from the outer circle to the inner one,
/// bulging past the trimmed angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapCurve {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

/// A ring band between two radii, over `start_angle..start_angle + sweep_angle`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSector {
    pub center: Point,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub start_angle: f64,
    pub sweep_angle: f64,
}

impl RingSector {
    #[must_use]
    pub fn thickness(&self) -> f64 {
        self.outer_radius - self.inner_radius
    }

    #[must_use]
    pub fn mid_radius(&self) -> f64 {
        self.inner_radius + self.thickness() / 2.0
    }

    #[must_use]
    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.sweep_angle
    }

    /// `true` when nothing would be visible: zero sweep, zero outer radius or
    /// non-finite geometry.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !(self.center.x.is_finite()
            && self.center.y.is_finite()
            && self.inner_radius.is_finite()
            && self.outer_radius.is_finite()
            && self.start_angle.is_finite()
            && self.sweep_angle.is_finite())
            || self.sweep_angle == 0.0
            || self.outer_radius <= 0.0
            || self.outer_radius <= self.inner_radius
    }

    /// Point-in-sector test used by pie, doughnut and radial bar hit tests.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        !self.is_degenerate()
            && point_in_arc(
                self.center,
                self.inner_radius,
                self.outer_radius,
                self.start_angle,
                self.sweep_angle,
                point,
            )
    }

    /// Angle `fraction` of the way through the sweep.
    #[must_use]
    pub fn angle_at(&self, fraction: f64) -> f64 {
        self.start_angle + self.sweep_angle * fraction
    }

    /// Builds the closed outline, trimming and rounding the ends requested by
    /// `cap_style`.
    ///
    /// `divisor` scales the cap depth; value arcs use [`CAP_ANGLE_DIVISOR`]
    /// and tracks [`TRACK_CAP_ANGLE_DIVISOR`]. Degenerate sectors yield an
    /// empty path.
    #[must_use]
    pub fn to_path(&self, cap_style: CapStyle, divisor: f64) -> BezPath {
        if self.is_degenerate() {
            return BezPath::new();
        }
        if cap_style == CapStyle::BothFlat {
            return self.flat_path();
        }

        let mid_radius = self.mid_radius();
        if mid_radius == 0.0 {
            debug!("ring middle radius is zero, drawing flat caps");
            return self.flat_path();
        }
        let thickness = self.thickness();
        let deviation = angle_deviation(thickness, mid_radius, divisor);
        let direction = self.sweep_angle.signum();

        let mut draw_start = self.start_angle;
        let mut draw_end = self.end_angle();
        if cap_style.curves_start() {
            draw_start += deviation * direction;
        }
        if cap_style.curves_end() {
            draw_end -= deviation * direction;
        }
        // Caps longer than the sweep meet in the middle.
        if (draw_end - draw_start) * direction < 0.0 {
            let middle = self.angle_at(0.5);
            draw_start = middle;
            draw_end = middle;
        }

        let depth = thickness / CAP_CURVE_DEPTH_DIVISOR;
        let mut path = BezPath::new();
        path.move_to(point_on_circle(self.center, self.outer_radius, draw_start));
        append_arc(&mut path, self.center, self.outer_radius, draw_start, draw_end - draw_start);

        if cap_style.curves_end() {
            let cap = cap_curve(self, draw_end, depth * direction);
            path.curve_to(cap.control1, cap.control2, cap.end);
        } else {
            path.line_to(point_on_circle(self.center, self.inner_radius, draw_end));
        }

        if self.inner_radius > 0.0 {
            append_arc(&mut path, self.center, self.inner_radius, draw_end, draw_start - draw_end);
        } else {
            path.line_to(self.center);
        }

        if cap_style.curves_start() {
            let cap = cap_curve(self, draw_start, -depth * direction);
            // Walk the start cap from inner to outer.
            path.curve_to(cap.control2, cap.control1, cap.start);
        }
        path.close_path();
        path
    }

    fn flat_path(&self) -> BezPath {
        Circle::new(self.center, self.outer_radius)
            .segment(
                self.inner_radius.max(0.0),
                degree_to_radian(self.start_angle),
                degree_to_radian(self.sweep_angle),
            )
            .path_elements(ARC_TOLERANCE)
            .collect()
    }
}

/// Cap at `angle` whose control points sit `signed_depth` pixels along the
/// clockwise tangent from the outer and inner ring points.
#[must_use]
pub fn cap_curve(sector: &RingSector, angle: f64, signed_depth: f64) -> CapCurve {
    let tangent = clockwise_tangent(angle) * signed_depth;
    let start = point_on_circle(sector.center, sector.outer_radius, angle);
    let end = point_on_circle(sector.center, sector.inner_radius, angle);
    CapCurve {
        start,
        control1: start + tangent,
        control2: end + tangent,
        end,
    }
}

/// Unit tangent of a circle at `angle`, pointing in the clockwise direction.
fn clockwise_tangent(angle: f64) -> Vec2 {
    let radians = degree_to_radian(angle);
    Vec2::new(-radians.sin(), radians.cos())
}

/// Appends a circular arc that starts where the path currently ends.
fn append_arc(path: &mut BezPath, center: Point, radius: f64, start_angle: f64, sweep_angle: f64) {
    if sweep_angle == 0.0 || radius <= 0.0 {
        return;
    }
    let arc = Arc {
        center,
        radii: Vec2::new(radius, radius),
        start_angle: degree_to_radian(start_angle),
        sweep_angle: degree_to_radian(sweep_angle),
        x_rotation: 0.0,
    };
    path.extend(arc.append_iter(ARC_TOLERANCE));
}
