use kurbo::Rect;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::{CirclePrimitive, LinePrimitive, PathPrimitive, Primitive, RectPrimitive};

/// Backend-agnostic scene for one segment draw pass.
///
/// Primitives keep the order segments pushed them, so a track pushed before
/// its value arc is painted underneath it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub viewport: Rect,
    pub primitives: Vec<Primitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Rect) -> Self {
        Self {
            viewport,
            primitives: Vec::new(),
        }
    }

    pub fn push_line(&mut self, line: LinePrimitive) {
        self.primitives.push(Primitive::Line(line));
    }

    pub fn push_rect(&mut self, rect: RectPrimitive) {
        self.primitives.push(Primitive::Rect(rect));
    }

    pub fn push_path(&mut self, path: PathPrimitive) {
        self.primitives.push(Primitive::Path(path));
    }

    pub fn push_circle(&mut self, circle: CirclePrimitive) {
        self.primitives.push(Primitive::Circle(circle));
    }

    pub fn validate(&self) -> ChartResult<()> {
        let (width, height) = (self.viewport.width(), self.viewport.height());
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(ChartError::InvalidBounds { width, height });
        }

        for primitive in &self.primitives {
            primitive.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    #[must_use]
    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Line(line) => Some(line),
            _ => None,
        })
    }

    #[must_use]
    pub fn rects(&self) -> impl Iterator<Item = &RectPrimitive> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Rect(rect) => Some(rect),
            _ => None,
        })
    }

    #[must_use]
    pub fn paths(&self) -> impl Iterator<Item = &PathPrimitive> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Path(path) => Some(path),
            _ => None,
        })
    }

    #[must_use]
    pub fn circles(&self) -> impl Iterator<Item = &CirclePrimitive> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Circle(circle) => Some(circle),
            _ => None,
        })
    }

    /// Deterministic JSON snapshot of the frame, used by regression tests.
    pub fn to_json(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
