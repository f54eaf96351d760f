use kurbo::{Point, Rect};

use crate::core::{AxisState, CartesianTransform, DoubleRange, SeriesAnimation, ValueTransform};
use crate::segments::CapStyle;

/// Layout inputs for segments of cartesian series (column family, area,
/// error bar).
#[derive(Clone, Copy)]
pub struct CartesianSeries<'a> {
    pub transform: &'a dyn ValueTransform,
    pub x_axis: AxisState,
    pub y_axis: AxisState,
    pub is_transposed: bool,
    pub animation: SeriesAnimation,
}

impl<'a> CartesianSeries<'a> {
    /// Context that reads its axes and orientation from a linear transform.
    #[must_use]
    pub fn new(transform: &'a CartesianTransform) -> Self {
        Self {
            transform,
            x_axis: transform.x_axis(),
            y_axis: transform.y_axis(),
            is_transposed: transform.is_transposed(),
            animation: SeriesAnimation::idle(),
        }
    }

    /// Context over a host-provided transform.
    #[must_use]
    pub fn from_parts(
        transform: &'a dyn ValueTransform,
        x_axis: AxisState,
        y_axis: AxisState,
        is_transposed: bool,
    ) -> Self {
        Self {
            transform,
            x_axis,
            y_axis,
            is_transposed,
            animation: SeriesAnimation::idle(),
        }
    }

    #[must_use]
    pub fn with_animation(mut self, animation: SeriesAnimation) -> Self {
        self.animation = animation;
        self
    }

    /// The visible x span widened to whole categories.
    #[must_use]
    pub fn clip_range(&self) -> DoubleRange {
        self.x_axis.visible_range.widened_to_integers()
    }

    #[must_use]
    pub fn point(&self, x: f64, y: f64) -> Point {
        self.transform.transform_to_visible_point(x, y)
    }
}

impl std::fmt::Debug for CartesianSeries<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartesianSeries")
            .field("x_axis", &self.x_axis)
            .field("y_axis", &self.y_axis)
            .field("is_transposed", &self.is_transposed)
            .field("animation", &self.animation)
            .finish_non_exhaustive()
    }
}

/// Layout inputs for pie and doughnut segments.
///
/// `radius` and `inner_radius` are already in pixels. `start_angle` and
/// `end_angle` describe the whole series sweep in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularSeries {
    pub center: Point,
    pub radius: f64,
    pub inner_radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub explode_index: Option<usize>,
    pub explode_all: bool,
    pub explode_radius: f64,
    pub cap_style: CapStyle,
    pub animation: SeriesAnimation,
}

impl CircularSeries {
    #[must_use]
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            center,
            radius,
            inner_radius: 0.0,
            start_angle: 0.0,
            end_angle: 360.0,
            explode_index: None,
            explode_all: false,
            explode_radius: 0.0,
            cap_style: CapStyle::BothFlat,
            animation: SeriesAnimation::idle(),
        }
    }

    #[must_use]
    pub fn with_inner_radius(mut self, inner_radius: f64) -> Self {
        self.inner_radius = inner_radius;
        self
    }

    #[must_use]
    pub fn with_angles(mut self, start_angle: f64, end_angle: f64) -> Self {
        self.start_angle = start_angle;
        self.end_angle = end_angle;
        self
    }

    #[must_use]
    pub fn with_explode(mut self, explode_index: Option<usize>, explode_radius: f64) -> Self {
        self.explode_index = explode_index;
        self.explode_radius = explode_radius;
        self
    }

    #[must_use]
    pub fn with_explode_all(mut self, explode_all: bool) -> Self {
        self.explode_all = explode_all;
        self
    }

    #[must_use]
    pub fn with_cap_style(mut self, cap_style: CapStyle) -> Self {
        self.cap_style = cap_style;
        self
    }

    #[must_use]
    pub fn with_animation(mut self, animation: SeriesAnimation) -> Self {
        self.animation = animation;
        self
    }

    #[must_use]
    pub fn is_exploded(&self, index: usize) -> bool {
        self.explode_all || self.explode_index == Some(index)
    }

    /// Signed total sweep of the series.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

/// Layout inputs for radial bar segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialBarSeries {
    pub center: Point,
    /// Outer radius of the outermost ring, in pixels.
    pub radius: f64,
    /// Fraction of `radius` left empty in the middle.
    pub inner_radius_ratio: f64,
    /// Fraction of each ring's band left as a gap.
    pub gap_ratio: f64,
    pub segment_count: usize,
    /// Value that maps to the full series sweep.
    pub maximum: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub cap_style: CapStyle,
    pub animation: SeriesAnimation,
}

impl RadialBarSeries {
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

/// Layout inputs for funnel and pyramid segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangularSeries {
    /// Plot area the whole funnel or pyramid occupies.
    pub bounds: Rect,
    /// Width of the funnel neck in pixels; pyramids ignore it.
    pub min_width: f64,
    pub explode_index: Option<usize>,
    pub explode_offset: f64,
}

impl TriangularSeries {
    #[must_use]
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            min_width: 0.0,
            explode_index: None,
            explode_offset: 0.0,
        }
    }

    #[must_use]
    pub fn with_min_width(mut self, min_width: f64) -> Self {
        self.min_width = min_width;
        self
    }

    #[must_use]
    pub fn with_explode(mut self, explode_index: Option<usize>, explode_offset: f64) -> Self {
        self.explode_index = explode_index;
        self.explode_offset = explode_offset;
        self
    }

    /// Horizontal shift applied to the segment at `index`.
    #[must_use]
    pub fn explode_shift(&self, index: usize) -> f64 {
        if self.explode_index == Some(index) && self.explode_offset.is_finite() {
            self.explode_offset
        } else {
            0.0
        }
    }
}

/// Layout inputs for bubble segments.
#[derive(Debug, Clone, Copy)]
pub struct BubbleSeries<'a> {
    pub cartesian: CartesianSeries<'a>,
    /// Accumulated data x range of the series.
    pub x_range: DoubleRange,
    /// Accumulated size range of the series.
    pub size_range: DoubleRange,
    pub min_radius: f64,
    pub max_radius: f64,
    pub show_zero_size: bool,
}

impl BubbleSeries<'_> {
    /// Maps a bubble size onto `[min_radius, max_radius]`.
    ///
    /// A degenerate size range maps every bubble to the middle radius.
    #[must_use]
    pub fn size_to_radius(&self, size: f64) -> f64 {
        if !size.is_finite() {
            return 0.0;
        }
        if size == 0.0 && !self.show_zero_size {
            return 0.0;
        }
        let span = self.max_radius - self.min_radius;
        let delta = self.size_range.delta();
        if delta <= 0.0 {
            return self.min_radius + span / 2.0;
        }
        let ratio = ((size - self.size_range.start) / delta).clamp(0.0, 1.0);
        self.min_radius + span * ratio
    }
}
