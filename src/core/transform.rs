use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

use crate::core::scale::LinearScale;
use crate::core::types::DoubleRange;
use crate::error::{ChartError, ChartResult};

/// Data-space to screen-space mapping owned by a series.
///
/// Both functions receive the full `(x, y)` pair because transposed charts
/// derive the screen x coordinate from the data y value and vice versa.
pub trait ValueTransform {
    fn transform_to_visible_x(&self, x: f64, y: f64) -> f64;
    fn transform_to_visible_y(&self, x: f64, y: f64) -> f64;

    fn transform_to_visible_point(&self, x: f64, y: f64) -> Point {
        Point::new(
            self.transform_to_visible_x(x, y),
            self.transform_to_visible_y(x, y),
        )
    }
}

/// Axis facts segments read during layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisState {
    pub visible_range: DoubleRange,
    #[serde(default)]
    pub is_inversed: bool,
    #[serde(default)]
    pub crossing_value: f64,
}

impl AxisState {
    #[must_use]
    pub const fn new(start: f64, end: f64) -> Self {
        Self {
            visible_range: DoubleRange::new(start, end),
            is_inversed: false,
            crossing_value: 0.0,
        }
    }

    #[must_use]
    pub const fn with_inversed(mut self, is_inversed: bool) -> Self {
        self.is_inversed = is_inversed;
        self
    }

    #[must_use]
    pub const fn with_crossing_value(mut self, crossing_value: f64) -> Self {
        self.crossing_value = crossing_value;
        self
    }

    /// Crossing value clamped into the visible range, the baseline for
    /// columns and area fills.
    #[must_use]
    pub fn actual_crossing_value(self) -> f64 {
        let range = self.visible_range;
        if range.is_empty() || !self.crossing_value.is_finite() {
            return self.crossing_value;
        }
        self.crossing_value.clamp(range.start, range.end)
    }
}

/// Linear cartesian transform over a plot area.
///
/// Non-transposed charts place the x axis horizontally (left to right) and
/// the y axis vertically (bottom to top). Transposed charts swap the axes so
/// the x axis runs bottom to top and the y axis left to right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartesianTransform {
    area: Rect,
    x_axis: AxisState,
    y_axis: AxisState,
    is_transposed: bool,
    x_scale: LinearScale,
    y_scale: LinearScale,
}

impl CartesianTransform {
    pub fn new(area: Rect, x_axis: AxisState, y_axis: AxisState) -> ChartResult<Self> {
        let (width, height) = (area.width(), area.height());
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(ChartError::InvalidBounds { width, height });
        }

        Ok(Self {
            area,
            x_axis,
            y_axis,
            is_transposed: false,
            x_scale: LinearScale::from_range(x_axis.visible_range)?,
            y_scale: LinearScale::from_range(y_axis.visible_range)?,
        })
    }

    #[must_use]
    pub fn with_transposed(mut self, is_transposed: bool) -> Self {
        self.is_transposed = is_transposed;
        self
    }

    #[must_use]
    pub fn area(&self) -> Rect {
        self.area
    }

    #[must_use]
    pub fn x_axis(&self) -> AxisState {
        self.x_axis
    }

    #[must_use]
    pub fn y_axis(&self) -> AxisState {
        self.y_axis
    }

    #[must_use]
    pub fn is_transposed(&self) -> bool {
        self.is_transposed
    }
}

impl ValueTransform for CartesianTransform {
    fn transform_to_visible_x(&self, x: f64, y: f64) -> f64 {
        if self.is_transposed {
            self.y_scale
                .domain_to_pixel(y, self.area.x0, self.area.x1, self.y_axis.is_inversed)
        } else {
            self.x_scale
                .domain_to_pixel(x, self.area.x0, self.area.x1, self.x_axis.is_inversed)
        }
    }

    fn transform_to_visible_y(&self, x: f64, y: f64) -> f64 {
        if self.is_transposed {
            self.x_scale
                .domain_to_pixel(x, self.area.y1, self.area.y0, self.x_axis.is_inversed)
        } else {
            self.y_scale
                .domain_to_pixel(y, self.area.y1, self.area.y0, self.y_axis.is_inversed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transform() -> CartesianTransform {
        CartesianTransform::new(
            Rect::new(0.0, 0.0, 100.0, 50.0),
            AxisState::new(0.0, 10.0),
            AxisState::new(0.0, 5.0),
        )
        .expect("transform")
    }

    #[test]
    fn rejects_empty_area() {
        let result = CartesianTransform::new(
            Rect::new(0.0, 0.0, 0.0, 50.0),
            AxisState::new(0.0, 10.0),
            AxisState::new(0.0, 5.0),
        );
        assert!(matches!(result, Err(ChartError::InvalidBounds { .. })));
    }

    #[test]
    fn y_axis_grows_upwards() {
        let point = transform().transform_to_visible_point(5.0, 5.0);
        assert!((point.x - 50.0).abs() <= 1e-9);
        assert!(point.y.abs() <= 1e-9);
    }

    #[test]
    fn transposed_swaps_axes() {
        let point = transform()
            .with_transposed(true)
            .transform_to_visible_point(10.0, 2.5);
        assert!((point.x - 50.0).abs() <= 1e-9);
        assert!(point.y.abs() <= 1e-9);
    }

    #[test]
    fn crossing_value_is_clamped_to_visible_range() {
        let axis = AxisState::new(10.0, 20.0).with_crossing_value(0.0);
        assert!((axis.actual_crossing_value() - 10.0).abs() <= 1e-9);
    }
}
