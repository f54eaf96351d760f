//! Angle and point math shared by every segment family.
//!
//! Angles are expressed in degrees unless a function name says otherwise.
//! Zero degrees points along +x and angles grow clockwise on screen, since the
//! y axis points down.

use std::f64::consts::PI;

use kurbo::{BezPath, Point, Rect, Vec2};

const FULL_TURN_DEGREES: f64 = 360.0;

#[must_use]
pub fn degree_to_radian(degrees: f64) -> f64 {
    degrees * (PI / 180.0)
}

#[must_use]
pub fn radian_to_degree(radians: f64) -> f64 {
    radians * (180.0 / PI)
}

/// Wraps an angle into `[0, 360)`.
#[must_use]
pub fn normalize_angle(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(FULL_TURN_DEGREES);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= FULL_TURN_DEGREES {
        0.0
    } else {
        wrapped
    }
}

/// Unit vector for an angle in degrees.
#[must_use]
pub fn angle_to_vector(degrees: f64) -> Vec2 {
    Vec2::from_angle(degree_to_radian(degrees))
}

#[must_use]
pub fn point_on_circle(center: Point, radius: f64, degrees: f64) -> Point {
    center + angle_to_vector(degrees) * radius
}

/// Screen angle of `point` around `center`, normalized into `[0, 360)`.
#[must_use]
pub fn angle_of(center: Point, point: Point) -> f64 {
    let delta = point - center;
    normalize_angle(radian_to_degree(delta.y.atan2(delta.x)))
}

/// Inclusive containment that treats NaN rectangles as empty.
#[must_use]
pub fn rect_contains(rect: Rect, point: Point) -> bool {
    if !is_finite_rect(rect) {
        return false;
    }
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

#[must_use]
pub fn is_finite_rect(rect: Rect) -> bool {
    rect.x0.is_finite() && rect.y0.is_finite() && rect.x1.is_finite() && rect.y1.is_finite()
}

/// Rectangle whose edges are all NaN; used for segments outside the visible range.
#[must_use]
pub fn nan_rect() -> Rect {
    Rect::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN)
}

/// Builds `Rect(left, top, width, height)` from edges that are already normalized.
#[must_use]
pub fn rect_from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Rect {
    Rect::from_origin_size((left, top), (right - left, bottom - top))
}

/// Square of side `size` centered on `center`.
#[must_use]
pub fn rect_centered(center: Point, width: f64, height: f64) -> Rect {
    Rect::from_center_size(center, (width, height))
}

/// Returns `true` when `angle` lies inside the sweep that starts at
/// `start_angle` and extends by `sweep_angle` (both degrees).
///
/// Clockwise sweeps lift the query angle above the start by whole turns.
/// Counter-clockwise sweeps lower it below the start instead. Sweeps of a full
/// turn or more accept every angle.
#[must_use]
pub fn angle_in_sweep(angle: f64, start_angle: f64, sweep_angle: f64) -> bool {
    if !angle.is_finite() || !start_angle.is_finite() || !sweep_angle.is_finite() {
        return false;
    }
    if sweep_angle >= 0.0 {
        let lifted = start_angle + (angle - start_angle).rem_euclid(FULL_TURN_DEGREES);
        lifted <= start_angle + sweep_angle
    } else {
        let lowered = start_angle - (start_angle - angle).rem_euclid(FULL_TURN_DEGREES);
        lowered >= start_angle + sweep_angle
    }
}

/// Point-in-annular-sector test.
///
/// `inner_radius` may be zero for pie slices.
#[must_use]
pub fn point_in_arc(
    center: Point,
    inner_radius: f64,
    outer_radius: f64,
    start_angle: f64,
    sweep_angle: f64,
    point: Point,
) -> bool {
    let distance = center.distance(point);
    if !(distance >= inner_radius && distance <= outer_radius) {
        return false;
    }
    angle_in_sweep(angle_of(center, point), start_angle, sweep_angle)
}

/// Perpendicular distance from `point` to the segment `start..end`.
///
/// Degenerate segments collapse to the point distance.
#[must_use]
pub fn distance_to_line_segment(start: Point, end: Point, point: Point) -> f64 {
    let along = end - start;
    let length_sq = along.hypot2();
    if length_sq <= f64::EPSILON {
        return start.distance(point);
    }
    let u = ((point - start).dot(along) / length_sq).clamp(0.0, 1.0);
    (start + along * u).distance(point)
}

/// Angular size, in degrees, reserved at a ring end for a rounded cap.
///
/// `thickness / divisor` is the cap depth measured along the ring's middle
/// circle. A zero or non-finite middle radius yields no deviation.
#[must_use]
pub fn angle_deviation(thickness: f64, mid_radius: f64, divisor: f64) -> f64 {
    if mid_radius == 0.0 || !mid_radius.is_finite() || divisor == 0.0 {
        return 0.0;
    }
    radian_to_degree((thickness / divisor) / mid_radius)
}

/// Slope test for a shape bounded by two slanted edges, as used by funnel
/// and pyramid hit testing.
///
/// The left edge runs from `top_left` down to `bottom_left` and the right edge
/// from `top_right` down to `bottom_right`. A point between `top_left.y` and
/// `bottom_left.y` is inside when its angle from each top anchor lies on the
/// inner side of that edge's angle.
#[must_use]
pub fn between_slanted_edges(
    top_left: Point,
    bottom_left: Point,
    top_right: Point,
    bottom_right: Point,
    point: Point,
) -> bool {
    if !(point.y >= top_left.y && point.y <= bottom_left.y) {
        return false;
    }
    let left_edge = (bottom_left.y - top_left.y).atan2(bottom_left.x - top_left.x);
    let left_point = (point.y - top_left.y).atan2(point.x - top_left.x);
    let right_edge = (bottom_right.y - top_right.y).atan2(bottom_right.x - top_right.x);
    let right_point = (point.y - top_right.y).atan2(point.x - top_right.x);
    left_point <= left_edge && right_point >= right_edge
}

/// Open polyline through `points`; empty input gives an empty path.
#[must_use]
pub fn polyline_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        path.move_to(*first);
        for point in iter {
            path.line_to(*point);
        }
    }
    path
}

/// Closed polygon through `points`.
#[must_use]
pub fn polygon_path(points: &[Point]) -> BezPath {
    let mut path = polyline_path(points);
    if !points.is_empty() {
        path.close_path();
    }
    path
}

/// Smallest rectangle containing every finite point, or `None` when there
/// are none.
#[must_use]
pub fn bounding_rect(points: &[Point]) -> Option<Rect> {
    points
        .iter()
        .filter(|point| point.x.is_finite() && point.y.is_finite())
        .fold(None, |acc: Option<Rect>, point| {
            Some(match acc {
                Some(rect) => rect.union_pt(*point),
                None => Rect::from_points(*point, *point),
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_angle_wraps_negative_and_large_values() {
        assert!((normalize_angle(-90.0) - 270.0).abs() <= 1e-9);
        assert!((normalize_angle(725.0) - 5.0).abs() <= 1e-9);
        assert!(normalize_angle(360.0).abs() <= 1e-9);
    }

    #[test]
    fn angle_of_follows_screen_clockwise_orientation() {
        let center = Point::new(10.0, 10.0);
        assert!(angle_of(center, Point::new(20.0, 10.0)).abs() <= 1e-9);
        assert!((angle_of(center, Point::new(10.0, 20.0)) - 90.0).abs() <= 1e-9);
        assert!((angle_of(center, Point::new(10.0, 0.0)) - 270.0).abs() <= 1e-9);
    }

    #[test]
    fn sweep_wrapping_past_full_turn_is_detected() {
        assert!(angle_in_sweep(5.0, 350.0, 30.0));
        assert!(angle_in_sweep(355.0, 350.0, 30.0));
        assert!(!angle_in_sweep(200.0, 350.0, 30.0));
    }

    #[test]
    fn counter_clockwise_sweep_uses_lowered_angle() {
        // -90 start, 60 degrees counter-clockwise: covers [210, 270].
        assert!(angle_in_sweep(240.0, -90.0, -60.0));
        assert!(!angle_in_sweep(300.0, -90.0, -60.0));
        assert!(!angle_in_sweep(180.0, -90.0, -60.0));
    }

    #[test]
    fn full_turn_sweep_accepts_everything() {
        for angle in [0.0, 90.0, 179.0, 359.9] {
            assert!(angle_in_sweep(angle, 45.0, 360.0));
        }
    }

    #[test]
    fn nan_rect_contains_nothing() {
        assert!(!rect_contains(nan_rect(), Point::new(0.0, 0.0)));
    }

    #[test]
    fn distance_to_segment_clamps_to_endpoints() {
        let start = Point::new(0.0, 0.0);
        let end = Point::new(10.0, 0.0);
        assert!((distance_to_line_segment(start, end, Point::new(5.0, 3.0)) - 3.0).abs() <= 1e-9);
        assert!((distance_to_line_segment(start, end, Point::new(13.0, 4.0)) - 5.0).abs() <= 1e-9);
    }

    #[test]
    fn bounding_rect_skips_non_finite_points() {
        let rect = bounding_rect(&[
            Point::new(1.0, 5.0),
            Point::new(f64::NAN, 0.0),
            Point::new(-2.0, 3.0),
        ])
        .expect("rect");
        assert_eq!(rect, Rect::new(-2.0, 3.0, 1.0, 5.0));
        assert!(bounding_rect(&[]).is_none());
    }

    #[test]
    fn slanted_edges_classify_trapezoid_points() {
        let top_left = Point::new(0.0, 0.0);
        let top_right = Point::new(100.0, 0.0);
        let bottom_left = Point::new(25.0, 50.0);
        let bottom_right = Point::new(75.0, 50.0);
        let inside = |x, y| {
            between_slanted_edges(top_left, bottom_left, top_right, bottom_right, Point::new(x, y))
        };
        assert!(inside(50.0, 25.0));
        assert!(inside(50.0, 0.0));
        assert!(!inside(5.0, 40.0));
        assert!(!inside(95.0, 40.0));
        assert!(!inside(50.0, 60.0));
    }

    #[test]
    fn angle_deviation_guards_zero_radius() {
        assert_eq!(angle_deviation(10.0, 0.0, 1.75), 0.0);
        assert!(angle_deviation(10.0, 50.0, 1.0) > 0.0);
    }
}
