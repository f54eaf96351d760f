use serde::{Deserialize, Serialize};

/// Per-frame animation input pushed by the owning series.
///
/// Segments read it on every layout pass and never cache it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesAnimation {
    value: f64,
    can_animate: bool,
}

impl SeriesAnimation {
    /// A settled series: no interpolation, geometry equals its target.
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            value: 1.0,
            can_animate: false,
        }
    }

    /// An in-flight animation frame. Values outside `[0, 1]` are clamped and
    /// NaN is treated as a finished animation.
    #[must_use]
    pub fn running(value: f64) -> Self {
        let value = if value.is_nan() { 1.0 } else { value.clamp(0.0, 1.0) };
        Self {
            value,
            can_animate: true,
        }
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.value
    }

    #[must_use]
    pub const fn can_animate(self) -> bool {
        self.can_animate
    }
}

impl Default for SeriesAnimation {
    fn default() -> Self {
        Self::idle()
    }
}

#[must_use]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Blends a previous screen value toward the current one.
///
/// A NaN `previous` has no frame to start from, so the current value is
/// returned unchanged.
#[must_use]
pub fn dynamic_animation_value(t: f64, previous: f64, current: f64) -> f64 {
    if previous.is_nan() {
        current
    } else {
        lerp(previous, current, t)
    }
}

/// Grows the span `[low, high]` outward from its midline.
///
/// At `t = 0` both ends sit on the midline; at `t = 1` the span is returned
/// exactly.
#[must_use]
pub fn midline_expand(t: f64, low: f64, high: f64) -> (f64, f64) {
    if t >= 1.0 {
        return (low, high);
    }
    let mid = low + (high - low) / 2.0;
    (lerp(mid, low, t), lerp(mid, high, t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_clamps_out_of_range_values() {
        assert_eq!(SeriesAnimation::running(1.5).value(), 1.0);
        assert_eq!(SeriesAnimation::running(-0.2).value(), 0.0);
        assert_eq!(SeriesAnimation::running(f64::NAN).value(), 1.0);
    }

    #[test]
    fn midline_expand_collapses_at_zero() {
        let (low, high) = midline_expand(0.0, 10.0, 30.0);
        assert_eq!((low, high), (20.0, 20.0));
        assert_eq!(midline_expand(1.0, 10.0, 30.0), (10.0, 30.0));
    }

    #[test]
    fn dynamic_value_without_previous_returns_current() {
        assert_eq!(dynamic_animation_value(0.3, f64::NAN, 8.0), 8.0);
        assert!((dynamic_animation_value(0.25, 0.0, 8.0) - 2.0).abs() <= 1e-12);
    }
}
