use kurbo::{BezPath, Point, Rect, RoundedRectRadii};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Outline settings shared by every primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
    #[serde(default)]
    pub dash_pattern: SmallVec<[f64; 4]>,
}

impl StrokeStyle {
    #[must_use]
    pub fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash_pattern: SmallVec::new(),
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(ChartError::InvalidData(
                "stroke width must be finite and > 0".to_owned(),
            ));
        }
        if self.dash_pattern.iter().any(|dash| !dash.is_finite() || *dash < 0.0) {
            return Err(ChartError::InvalidData(
                "dash pattern entries must be finite and >= 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Fill, stroke and opacity applied to one primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    pub fill: Option<Color>,
    pub stroke: Option<StrokeStyle>,
    pub opacity: f64,
}

impl Paint {
    /// Stroke-only paint, used for connector lines, whiskers and caps.
    #[must_use]
    pub fn stroke_only(stroke: StrokeStyle, opacity: f64) -> Self {
        Self {
            fill: None,
            stroke: Some(stroke),
            opacity,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.opacity.is_finite() || !(0.0..=1.0).contains(&self.opacity) {
            return Err(ChartError::InvalidData(
                "opacity must be finite and in [0, 1]".to_owned(),
            ));
        }
        if let Some(fill) = self.fill {
            fill.validate()?;
        }
        if let Some(stroke) = &self.stroke {
            stroke.validate()?;
        }
        Ok(())
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub paint: Paint,
}

impl LinePrimitive {
    #[must_use]
    pub fn new(start: Point, end: Point, paint: Paint) -> Self {
        Self {
            x1: start.x,
            y1: start.y,
            x2: end.x,
            y2: end.y,
            paint,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(ChartError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        if self.paint.stroke.is_none() {
            return Err(ChartError::InvalidData("line requires a stroke".to_owned()));
        }
        self.paint.validate()
    }
}

/// Draw command for an axis-aligned, optionally rounded rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectPrimitive {
    pub rect: Rect,
    pub corner_radii: RoundedRectRadii,
    pub paint: Paint,
}

impl RectPrimitive {
    #[must_use]
    pub fn new(rect: Rect, paint: Paint) -> Self {
        Self {
            rect,
            corner_radii: RoundedRectRadii::from_single_radius(0.0),
            paint,
        }
    }

    #[must_use]
    pub fn with_corner_radii(mut self, corner_radii: RoundedRectRadii) -> Self {
        self.corner_radii = corner_radii;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        let rect = self.rect;
        if !rect.x0.is_finite() || !rect.y0.is_finite() || !rect.x1.is_finite() || !rect.y1.is_finite()
        {
            return Err(ChartError::InvalidData(
                "rect coordinates must be finite".to_owned(),
            ));
        }
        if rect.width() < 0.0 || rect.height() < 0.0 {
            return Err(ChartError::InvalidData(
                "rect must have non-negative size".to_owned(),
            ));
        }
        self.paint.validate()
    }
}

/// Draw command for an arbitrary filled and/or stroked path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathPrimitive {
    pub path: BezPath,
    pub paint: Paint,
    /// Region outside of which nothing is painted; used by reveal animations.
    #[serde(default)]
    pub clip: Option<Rect>,
}

impl PathPrimitive {
    #[must_use]
    pub fn new(path: BezPath, paint: Paint) -> Self {
        Self {
            path,
            paint,
            clip: None,
        }
    }

    #[must_use]
    pub fn with_clip(mut self, clip: Option<Rect>) -> Self {
        self.clip = clip;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.path.elements().is_empty() {
            return Err(ChartError::InvalidData(
                "path primitive must not be empty".to_owned(),
            ));
        }
        let finite = self
            .path
            .elements()
            .iter()
            .flat_map(|element| element_points(*element))
            .all(|point| point.x.is_finite() && point.y.is_finite());
        if !finite {
            return Err(ChartError::InvalidData(
                "path coordinates must be finite".to_owned(),
            ));
        }
        self.paint.validate()
    }
}

fn element_points(element: kurbo::PathEl) -> SmallVec<[Point; 3]> {
    use kurbo::PathEl;
    match element {
        PathEl::MoveTo(p) | PathEl::LineTo(p) => smallvec::smallvec![p],
        PathEl::QuadTo(p1, p2) => smallvec::smallvec![p1, p2],
        PathEl::CurveTo(p1, p2, p3) => smallvec::smallvec![p1, p2, p3],
        PathEl::ClosePath => SmallVec::new(),
    }
}

/// Draw command for a circle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CirclePrimitive {
    pub center: Point,
    pub radius: f64,
    pub paint: Paint,
}

impl CirclePrimitive {
    #[must_use]
    pub fn new(center: Point, radius: f64, paint: Paint) -> Self {
        Self {
            center,
            radius,
            paint,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.center.x.is_finite() || !self.center.y.is_finite() {
            return Err(ChartError::InvalidData(
                "circle center must be finite".to_owned(),
            ));
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(ChartError::InvalidData(
                "circle radius must be finite and >= 0".to_owned(),
            ));
        }
        self.paint.validate()
    }
}

/// One draw command, kept in submission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Line(LinePrimitive),
    Rect(RectPrimitive),
    Path(PathPrimitive),
    Circle(CirclePrimitive),
}

impl Primitive {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Line(line) => line.validate(),
            Self::Rect(rect) => rect.validate(),
            Self::Path(path) => path.validate(),
            Self::Circle(circle) => circle.validate(),
        }
    }
}
