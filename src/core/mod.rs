pub mod animation;
pub mod geometry;
pub mod scale;
pub mod statistics;
pub mod transform;
pub mod types;

pub use animation::SeriesAnimation;
pub use scale::LinearScale;
pub use statistics::{BoxPlotMode, BoxPlotStatistics};
pub use transform::{AxisState, CartesianTransform, ValueTransform};
pub use types::{DoubleRange, SeriesRanges};
