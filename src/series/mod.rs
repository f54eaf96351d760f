//! Series-level inputs and builders.
//!
//! A series owns its segment vector. Builders turn raw values and validated
//! options into segments, and the context types carry everything a segment
//! needs from its series during layout.

mod bubble;
mod cartesian;
mod circular;
mod context;
mod options;
mod triangular;

pub use bubble::{bubble_segments, bubble_series};
pub use cartesian::{
    area_segments, box_whisker_segments, column_segments, error_bar_segment, layout_waterfall,
    range_column_segments, waterfall_segments,
};
pub use circular::{
    circular_series, doughnut_segments, pie_segments, radial_bar_segments, radial_bar_series,
    slice_angles,
};
pub use context::{BubbleSeries, CartesianSeries, CircularSeries, RadialBarSeries, TriangularSeries};
pub use options::{
    BoxPlotOptions, BubbleOptions, CircularOptions, ColumnOptions, ErrorBarOptions, FunnelOptions,
    PyramidOptions, RadialBarOptions, WaterfallOptions,
};
pub use triangular::{band_fractions, funnel_segments, funnel_series, pyramid_segments, pyramid_series};
