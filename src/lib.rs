//! chart-segments: renderer-agnostic segment geometry for chart series.
//!
//! Each segment ingests raw values, lays itself out against its series'
//! value transform and animation state, pushes draw primitives onto a
//! `RenderFrame` and answers pointer hit tests. Axes, legends, label layout
//! and the animation clock belong to the host.

pub mod core;
pub mod error;
pub mod render;
pub mod segments;
pub mod series;
pub mod telemetry;

pub use error::{ChartError, ChartResult};
pub use segments::{ChartSegment, SegmentState, SegmentStyle};
