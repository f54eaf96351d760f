//! Serializable per-family series options.
//!
//! Every options type validates itself before a builder consumes it, so
//! segment layout never sees out-of-range configuration.

use serde::{Deserialize, Serialize};

use crate::core::BoxPlotMode;
use crate::error::{ChartError, ChartResult};
use crate::segments::{CapStyle, ErrorBarDirection, ErrorBarMode, ErrorBarType};

fn ensure_ratio(name: &str, value: f64) -> ChartResult<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ChartError::InvalidConfig(format!(
            "`{name}` must be finite and in [0, 1], got {value}"
        )));
    }
    Ok(())
}

fn ensure_non_negative(name: &str, value: f64) -> ChartResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ChartError::InvalidConfig(format!(
            "`{name}` must be finite and >= 0, got {value}"
        )));
    }
    Ok(())
}

fn ensure_finite(name: &str, value: f64) -> ChartResult<()> {
    if !value.is_finite() {
        return Err(ChartError::InvalidConfig(format!(
            "`{name}` must be finite, got {value}"
        )));
    }
    Ok(())
}

/// JSON helpers shared by every options type.
macro_rules! json_io {
    ($type:ty, $label:literal) => {
        impl $type {
            /// Serializes options to pretty JSON.
            pub fn to_json_pretty(&self) -> ChartResult<String> {
                serde_json::to_string_pretty(self).map_err(|e| {
                    ChartError::InvalidData(format!(concat!("failed to serialize ", $label, ": {}"), e))
                })
            }

            /// Deserializes options from JSON and validates them.
            pub fn from_json_str(input: &str) -> ChartResult<Self> {
                let options: Self = serde_json::from_str(input).map_err(|e| {
                    ChartError::InvalidData(format!(concat!("failed to parse ", $label, ": {}"), e))
                })?;
                options.validate()
            }
        }
    };
}

/// Options for column, range column and waterfall series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnOptions {
    /// Share of each category left empty between bars.
    #[serde(default = "default_spacing")]
    pub spacing: f64,
    #[serde(default)]
    pub corner_radius: f64,
}

impl Default for ColumnOptions {
    fn default() -> Self {
        Self {
            spacing: default_spacing(),
            corner_radius: 0.0,
        }
    }
}

impl ColumnOptions {
    #[must_use]
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    #[must_use]
    pub fn with_corner_radius(mut self, corner_radius: f64) -> Self {
        self.corner_radius = corner_radius;
        self
    }

    /// Half of the bar width, in category units.
    #[must_use]
    pub fn half_width(&self) -> f64 {
        (1.0 - self.spacing) / 2.0
    }

    pub fn validate(self) -> ChartResult<Self> {
        ensure_ratio("spacing", self.spacing)?;
        ensure_non_negative("corner_radius", self.corner_radius)?;
        Ok(self)
    }
}

json_io!(ColumnOptions, "column options");

/// Options for waterfall series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterfallOptions {
    #[serde(default)]
    pub column: ColumnOptions,
    /// Sum bars show the running total instead of their own value.
    #[serde(default = "default_true")]
    pub allow_auto_sum: bool,
    #[serde(default = "default_true")]
    pub show_connector: bool,
}

impl Default for WaterfallOptions {
    fn default() -> Self {
        Self {
            column: ColumnOptions::default(),
            allow_auto_sum: true,
            show_connector: true,
        }
    }
}

impl WaterfallOptions {
    #[must_use]
    pub fn with_column(mut self, column: ColumnOptions) -> Self {
        self.column = column;
        self
    }

    #[must_use]
    pub fn with_allow_auto_sum(mut self, allow_auto_sum: bool) -> Self {
        self.allow_auto_sum = allow_auto_sum;
        self
    }

    #[must_use]
    pub fn with_show_connector(mut self, show_connector: bool) -> Self {
        self.show_connector = show_connector;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        self.column.validate()?;
        Ok(self)
    }
}

json_io!(WaterfallOptions, "waterfall options");

/// Options for box-and-whisker series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxPlotOptions {
    #[serde(default)]
    pub mode: BoxPlotMode,
    #[serde(default = "default_true")]
    pub show_mean: bool,
    #[serde(default = "default_outlier_size")]
    pub outlier_size: f64,
    #[serde(default = "default_spacing")]
    pub spacing: f64,
}

impl Default for BoxPlotOptions {
    fn default() -> Self {
        Self {
            mode: BoxPlotMode::default(),
            show_mean: true,
            outlier_size: default_outlier_size(),
            spacing: default_spacing(),
        }
    }
}

impl BoxPlotOptions {
    #[must_use]
    pub fn with_mode(mut self, mode: BoxPlotMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_show_mean(mut self, show_mean: bool) -> Self {
        self.show_mean = show_mean;
        self
    }

    #[must_use]
    pub fn with_outlier_size(mut self, outlier_size: f64) -> Self {
        self.outlier_size = outlier_size;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        ensure_ratio("spacing", self.spacing)?;
        if !self.outlier_size.is_finite() || self.outlier_size <= 0.0 {
            return Err(ChartError::InvalidConfig(format!(
                "`outlier_size` must be finite and > 0, got {}",
                self.outlier_size
            )));
        }
        Ok(self)
    }
}

json_io!(BoxPlotOptions, "box plot options");

/// Options for error bar series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBarOptions {
    #[serde(default)]
    pub mode: ErrorBarMode,
    #[serde(default)]
    pub error_type: ErrorBarType,
    #[serde(default)]
    pub horizontal_direction: ErrorBarDirection,
    #[serde(default)]
    pub vertical_direction: ErrorBarDirection,
    /// Extent, percentage or deviation multiple, depending on `error_type`.
    #[serde(default = "default_error")]
    pub horizontal_error: f64,
    #[serde(default = "default_error")]
    pub vertical_error: f64,
    #[serde(default = "default_cap_size")]
    pub cap_size: f64,
    /// Per-point extents used by [`ErrorBarType::Custom`].
    #[serde(default)]
    pub horizontal_positive: Vec<f64>,
    #[serde(default)]
    pub horizontal_negative: Vec<f64>,
    #[serde(default)]
    pub vertical_positive: Vec<f64>,
    #[serde(default)]
    pub vertical_negative: Vec<f64>,
}

impl Default for ErrorBarOptions {
    fn default() -> Self {
        Self {
            mode: ErrorBarMode::default(),
            error_type: ErrorBarType::default(),
            horizontal_direction: ErrorBarDirection::default(),
            vertical_direction: ErrorBarDirection::default(),
            horizontal_error: default_error(),
            vertical_error: default_error(),
            cap_size: default_cap_size(),
            horizontal_positive: Vec::new(),
            horizontal_negative: Vec::new(),
            vertical_positive: Vec::new(),
            vertical_negative: Vec::new(),
        }
    }
}

impl ErrorBarOptions {
    #[must_use]
    pub fn with_mode(mut self, mode: ErrorBarMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_error_type(mut self, error_type: ErrorBarType) -> Self {
        self.error_type = error_type;
        self
    }

    #[must_use]
    pub fn with_directions(
        mut self,
        horizontal_direction: ErrorBarDirection,
        vertical_direction: ErrorBarDirection,
    ) -> Self {
        self.horizontal_direction = horizontal_direction;
        self.vertical_direction = vertical_direction;
        self
    }

    #[must_use]
    pub fn with_errors(mut self, horizontal_error: f64, vertical_error: f64) -> Self {
        self.horizontal_error = horizontal_error;
        self.vertical_error = vertical_error;
        self
    }

    #[must_use]
    pub fn with_cap_size(mut self, cap_size: f64) -> Self {
        self.cap_size = cap_size;
        self
    }

    #[must_use]
    pub fn with_custom_vertical(mut self, positive: Vec<f64>, negative: Vec<f64>) -> Self {
        self.vertical_positive = positive;
        self.vertical_negative = negative;
        self
    }

    #[must_use]
    pub fn with_custom_horizontal(mut self, positive: Vec<f64>, negative: Vec<f64>) -> Self {
        self.horizontal_positive = positive;
        self.horizontal_negative = negative;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        ensure_finite("horizontal_error", self.horizontal_error)?;
        ensure_finite("vertical_error", self.vertical_error)?;
        ensure_non_negative("cap_size", self.cap_size)?;
        for (name, values) in [
            ("horizontal_positive", &self.horizontal_positive),
            ("horizontal_negative", &self.horizontal_negative),
            ("vertical_positive", &self.vertical_positive),
            ("vertical_negative", &self.vertical_negative),
        ] {
            if values.iter().any(|value| !value.is_finite()) {
                return Err(ChartError::InvalidConfig(format!(
                    "`{name}` must contain only finite values"
                )));
            }
        }
        Ok(self)
    }
}

json_io!(ErrorBarOptions, "error bar options");

/// Options for pie and doughnut series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircularOptions {
    #[serde(default)]
    pub start_angle: f64,
    #[serde(default = "default_end_angle")]
    pub end_angle: f64,
    /// Outer radius as a share of half the smaller plot side.
    #[serde(default = "default_radius_ratio")]
    pub radius_ratio: f64,
    /// Hole radius as a share of the outer radius; zero for pies.
    #[serde(default)]
    pub inner_radius_ratio: f64,
    #[serde(default)]
    pub explode_index: Option<usize>,
    #[serde(default)]
    pub explode_all: bool,
    #[serde(default = "default_explode_radius")]
    pub explode_radius: f64,
    #[serde(default)]
    pub cap_style: CapStyle,
}

impl Default for CircularOptions {
    fn default() -> Self {
        Self {
            start_angle: 0.0,
            end_angle: default_end_angle(),
            radius_ratio: default_radius_ratio(),
            inner_radius_ratio: 0.0,
            explode_index: None,
            explode_all: false,
            explode_radius: default_explode_radius(),
            cap_style: CapStyle::BothFlat,
        }
    }
}

impl CircularOptions {
    /// Defaults for doughnut series.
    #[must_use]
    pub fn doughnut() -> Self {
        Self::default().with_inner_radius_ratio(DEFAULT_DOUGHNUT_INNER_RATIO)
    }

    #[must_use]
    pub fn with_angles(mut self, start_angle: f64, end_angle: f64) -> Self {
        self.start_angle = start_angle;
        self.end_angle = end_angle;
        self
    }

    #[must_use]
    pub fn with_radius_ratio(mut self, radius_ratio: f64) -> Self {
        self.radius_ratio = radius_ratio;
        self
    }

    #[must_use]
    pub fn with_inner_radius_ratio(mut self, inner_radius_ratio: f64) -> Self {
        self.inner_radius_ratio = inner_radius_ratio;
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

    pub fn validate(self) -> ChartResult<Self> {
        ensure_finite("start_angle", self.start_angle)?;
        ensure_finite("end_angle", self.end_angle)?;
        ensure_ratio("radius_ratio", self.radius_ratio)?;
        ensure_ratio("inner_radius_ratio", self.inner_radius_ratio)?;
        ensure_non_negative("explode_radius", self.explode_radius)?;
        Ok(self)
    }
}

json_io!(CircularOptions, "circular options");

/// Options for radial bar series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadialBarOptions {
    #[serde(default)]
    pub start_angle: f64,
    #[serde(default = "default_end_angle")]
    pub end_angle: f64,
    #[serde(default = "default_radius_ratio")]
    pub radius_ratio: f64,
    #[serde(default = "default_radial_inner_ratio")]
    pub inner_radius_ratio: f64,
    /// Share of each ring's band left as a gap.
    #[serde(default = "default_gap_ratio")]
    pub gap_ratio: f64,
    /// Value mapped to a full sweep; the largest value when `None`.
    #[serde(default)]
    pub maximum: Option<f64>,
    #[serde(default)]
    pub cap_style: CapStyle,
}

impl Default for RadialBarOptions {
    fn default() -> Self {
        Self {
            start_angle: 0.0,
            end_angle: default_end_angle(),
            radius_ratio: default_radius_ratio(),
            inner_radius_ratio: default_radial_inner_ratio(),
            gap_ratio: default_gap_ratio(),
            maximum: None,
            cap_style: CapStyle::BothFlat,
        }
    }
}

impl RadialBarOptions {
    #[must_use]
    pub fn with_angles(mut self, start_angle: f64, end_angle: f64) -> Self {
        self.start_angle = start_angle;
        self.end_angle = end_angle;
        self
    }

    #[must_use]
    pub fn with_inner_radius_ratio(mut self, inner_radius_ratio: f64) -> Self {
        self.inner_radius_ratio = inner_radius_ratio;
        self
    }

    #[must_use]
    pub fn with_gap_ratio(mut self, gap_ratio: f64) -> Self {
        self.gap_ratio = gap_ratio;
        self
    }

    #[must_use]
    pub fn with_maximum(mut self, maximum: Option<f64>) -> Self {
        self.maximum = maximum;
        self
    }

    #[must_use]
    pub fn with_cap_style(mut self, cap_style: CapStyle) -> Self {
        self.cap_style = cap_style;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        ensure_finite("start_angle", self.start_angle)?;
        ensure_finite("end_angle", self.end_angle)?;
        ensure_ratio("radius_ratio", self.radius_ratio)?;
        ensure_ratio("inner_radius_ratio", self.inner_radius_ratio)?;
        ensure_ratio("gap_ratio", self.gap_ratio)?;
        if let Some(maximum) = self.maximum {
            if !maximum.is_finite() || maximum <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "`maximum` must be finite and > 0, got {maximum}"
                )));
            }
        }
        Ok(self)
    }
}

json_io!(RadialBarOptions, "radial bar options");

/// Options for funnel series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FunnelOptions {
    /// Share of the height spread as gaps between bands.
    #[serde(default)]
    pub gap_ratio: f64,
    /// Neck width in pixels.
    #[serde(default = "default_neck_width")]
    pub min_width: f64,
    #[serde(default)]
    pub explode_index: Option<usize>,
    #[serde(default = "default_explode_offset")]
    pub explode_offset: f64,
}

impl Default for FunnelOptions {
    fn default() -> Self {
        Self {
            gap_ratio: 0.0,
            min_width: default_neck_width(),
            explode_index: None,
            explode_offset: default_explode_offset(),
        }
    }
}

impl FunnelOptions {
    #[must_use]
    pub fn with_gap_ratio(mut self, gap_ratio: f64) -> Self {
        self.gap_ratio = gap_ratio;
        self
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

    pub fn validate(self) -> ChartResult<Self> {
        ensure_ratio("gap_ratio", self.gap_ratio)?;
        ensure_non_negative("min_width", self.min_width)?;
        ensure_finite("explode_offset", self.explode_offset)?;
        Ok(self)
    }
}

json_io!(FunnelOptions, "funnel options");

/// Options for pyramid series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PyramidOptions {
    #[serde(default)]
    pub gap_ratio: f64,
    #[serde(default)]
    pub explode_index: Option<usize>,
    #[serde(default = "default_explode_offset")]
    pub explode_offset: f64,
}

impl Default for PyramidOptions {
    fn default() -> Self {
        Self {
            gap_ratio: 0.0,
            explode_index: None,
            explode_offset: default_explode_offset(),
        }
    }
}

impl PyramidOptions {
    #[must_use]
    pub fn with_gap_ratio(mut self, gap_ratio: f64) -> Self {
        self.gap_ratio = gap_ratio;
        self
    }

    #[must_use]
    pub fn with_explode(mut self, explode_index: Option<usize>, explode_offset: f64) -> Self {
        self.explode_index = explode_index;
        self.explode_offset = explode_offset;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        ensure_ratio("gap_ratio", self.gap_ratio)?;
        ensure_finite("explode_offset", self.explode_offset)?;
        Ok(self)
    }
}

json_io!(PyramidOptions, "pyramid options");

/// Options for bubble series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BubbleOptions {
    #[serde(default = "default_min_radius")]
    pub min_radius: f64,
    #[serde(default = "default_max_radius")]
    pub max_radius: f64,
    /// Whether zero-size bubbles are drawn at `min_radius`.
    #[serde(default = "default_true")]
    pub show_zero_size: bool,
}

impl Default for BubbleOptions {
    fn default() -> Self {
        Self {
            min_radius: default_min_radius(),
            max_radius: default_max_radius(),
            show_zero_size: true,
        }
    }
}

impl BubbleOptions {
    #[must_use]
    pub fn with_radii(mut self, min_radius: f64, max_radius: f64) -> Self {
        self.min_radius = min_radius;
        self.max_radius = max_radius;
        self
    }

    #[must_use]
    pub fn with_show_zero_size(mut self, show_zero_size: bool) -> Self {
        self.show_zero_size = show_zero_size;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        ensure_non_negative("min_radius", self.min_radius)?;
        ensure_non_negative("max_radius", self.max_radius)?;
        if self.min_radius > self.max_radius {
            return Err(ChartError::InvalidConfig(format!(
                "`min_radius` ({}) must not exceed `max_radius` ({})",
                self.min_radius, self.max_radius
            )));
        }
        Ok(self)
    }
}

json_io!(BubbleOptions, "bubble options");

const DEFAULT_DOUGHNUT_INNER_RATIO: f64 = 0.4;

fn default_true() -> bool {
    true
}

fn default_spacing() -> f64 {
    0.2
}

fn default_outlier_size() -> f64 {
    8.0
}

fn default_error() -> f64 {
    1.0
}

fn default_cap_size() -> f64 {
    10.0
}

fn default_end_angle() -> f64 {
    360.0
}

fn default_radius_ratio() -> f64 {
    0.8
}

fn default_explode_radius() -> f64 {
    30.0
}

fn default_radial_inner_ratio() -> f64 {
    0.4
}

fn default_gap_ratio() -> f64 {
    0.2
}

fn default_neck_width() -> f64 {
    40.0
}

fn default_explode_offset() -> f64 {
    40.0
}

fn default_min_radius() -> f64 {
    10.0
}

fn default_max_radius() -> f64 {
    30.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(ColumnOptions::default().validate().is_ok());
        assert!(WaterfallOptions::default().validate().is_ok());
        assert!(BoxPlotOptions::default().validate().is_ok());
        assert!(ErrorBarOptions::default().validate().is_ok());
        assert!(CircularOptions::default().validate().is_ok());
        assert!(CircularOptions::doughnut().validate().is_ok());
        assert!(RadialBarOptions::default().validate().is_ok());
        assert!(FunnelOptions::default().validate().is_ok());
        assert!(PyramidOptions::default().validate().is_ok());
        assert!(BubbleOptions::default().validate().is_ok());
    }

    #[test]
    fn out_of_range_ratios_are_rejected() {
        assert!(ColumnOptions::default().with_spacing(1.5).validate().is_err());
        assert!(RadialBarOptions::default().with_gap_ratio(f64::NAN).validate().is_err());
        assert!(BubbleOptions::default().with_radii(20.0, 5.0).validate().is_err());
    }

    #[test]
    fn missing_json_fields_take_defaults() {
        let options = ErrorBarOptions::from_json_str(r#"{"error_type":"Percentage"}"#)
            .expect("parse options");
        assert_eq!(options.error_type, ErrorBarType::Percentage);
        assert_eq!(options.cap_size, 10.0);
        assert_eq!(options.vertical_direction, ErrorBarDirection::Both);
    }
}
