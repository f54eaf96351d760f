use chart_segments::ChartError;
use chart_segments::core::{BoxPlotMode, SeriesAnimation};
use chart_segments::segments::{CapStyle, ErrorBarType};
use chart_segments::series::{
    BoxPlotOptions, BubbleOptions, CircularOptions, ColumnOptions, ErrorBarOptions, FunnelOptions,
    RadialBarOptions, WaterfallOptions, band_fractions, circular_series, pie_segments,
    slice_angles,
};
use kurbo::Rect;

#[test]
fn column_options_round_trip_through_json() {
    let options = ColumnOptions::default()
        .with_spacing(0.4)
        .with_corner_radius(3.0);
    let json = options.to_json_pretty().expect("serialize");
    let decoded = ColumnOptions::from_json_str(&json).expect("parse");
    assert_eq!(decoded, options);
    assert!((decoded.half_width() - 0.3).abs() <= 1e-9);
}

#[test]
fn missing_json_fields_take_defaults() {
    let waterfall = WaterfallOptions::from_json_str("{}").expect("parse");
    assert_eq!(waterfall, WaterfallOptions::default());
    assert!(waterfall.allow_auto_sum);
    assert!(waterfall.show_connector);

    let circular = CircularOptions::from_json_str(r#"{"inner_radius_ratio": 0.5}"#).expect("parse");
    assert!((circular.end_angle - 360.0).abs() <= 1e-9);
    assert!((circular.radius_ratio - 0.8).abs() <= 1e-9);
    assert_eq!(circular.cap_style, CapStyle::BothFlat);

    let box_plot = BoxPlotOptions::from_json_str(r#"{"mode": "Normal"}"#).expect("parse");
    assert_eq!(box_plot.mode, BoxPlotMode::Normal);
    assert!(box_plot.show_mean);
}

#[test]
fn json_parsing_validates_values() {
    let error = ColumnOptions::from_json_str(r#"{"spacing": 1.5}"#).expect_err("out of range");
    assert!(matches!(error, ChartError::InvalidConfig(_)));

    let error = ColumnOptions::from_json_str("not json").expect_err("malformed");
    assert!(matches!(error, ChartError::InvalidData(_)));
}

#[test]
fn invalid_options_are_rejected() {
    assert!(ColumnOptions::default().with_corner_radius(-1.0).validate().is_err());
    assert!(BoxPlotOptions::default().with_outlier_size(0.0).validate().is_err());
    assert!(
        ErrorBarOptions::default()
            .with_custom_vertical(vec![f64::NAN], Vec::new())
            .validate()
            .is_err()
    );
    assert!(CircularOptions::default().with_radius_ratio(1.2).validate().is_err());
    assert!(RadialBarOptions::default().with_gap_ratio(-0.1).validate().is_err());
    assert!(FunnelOptions::default().with_min_width(f64::NAN).validate().is_err());
    assert!(BubbleOptions::default().with_radii(-1.0, 5.0).validate().is_err());
}

#[test]
fn error_bar_options_keep_custom_extents_in_json() {
    let options = ErrorBarOptions::default()
        .with_error_type(ErrorBarType::Custom)
        .with_custom_vertical(vec![1.0, 2.0], vec![0.5]);
    let json = options.to_json_pretty().expect("serialize");
    let decoded = ErrorBarOptions::from_json_str(&json).expect("parse");
    assert_eq!(decoded, options);
}

#[test]
fn builders_refuse_invalid_options() {
    let options = CircularOptions::default().with_explode(Some(0), -5.0);
    assert!(pie_segments(&[1.0], options).is_err());
    assert!(
        circular_series(
            options,
            Rect::new(0.0, 0.0, 100.0, 100.0),
            SeriesAnimation::idle()
        )
        .is_err()
    );
}

#[test]
fn slice_angles_split_a_partial_sweep() {
    let angles = slice_angles(&[1.0, -3.0], 90.0, 270.0);
    assert_eq!(angles, vec![(90.0, 45.0), (135.0, 135.0)]);

    let zero = slice_angles(&[0.0, 0.0], 0.0, 360.0);
    assert_eq!(zero, vec![(0.0, 0.0), (0.0, 0.0)]);

    let with_gap = slice_angles(&[1.0, f64::NAN, 1.0], 0.0, 360.0);
    assert!(with_gap[1].0.is_nan());
    assert_eq!(with_gap[2], (180.0, 180.0));
}

#[test]
fn band_fractions_skip_nan_values() {
    let bands = band_fractions(&[1.0, f64::NAN, 3.0], 0.0);
    assert_eq!(bands[0], (0.0, 0.25));
    assert!(bands[1].0.is_nan());
    assert_eq!(bands[2], (0.25, 1.0));

    let zero = band_fractions(&[0.0, 0.0], 0.0);
    assert_eq!(zero, vec![(0.0, 0.0), (0.0, 0.0)]);
}
