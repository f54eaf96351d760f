use chart_segments::core::{AxisState, CartesianTransform, SeriesAnimation, SeriesRanges};
use chart_segments::render::RenderFrame;
use chart_segments::segments::{ChartSegment, ColumnSegment, hit_test_segments};
use chart_segments::series::{CartesianSeries, ColumnOptions, column_segments, range_column_segments};
use kurbo::Rect;

fn transform() -> CartesianTransform {
    CartesianTransform::new(
        Rect::new(0.0, 0.0, 100.0, 100.0),
        AxisState::new(0.0, 10.0),
        AxisState::new(0.0, 10.0),
    )
    .expect("transform")
}

fn single_column(x: f64, y: f64) -> ColumnSegment {
    let mut ranges = SeriesRanges::new();
    column_segments(
        &[x],
        &[y],
        0.0,
        ColumnOptions::default().with_spacing(0.0),
        &mut ranges,
    )
    .expect("columns")
    .remove(0)
}

#[test]
fn column_maps_data_corners_to_screen_edges() {
    let transform = transform();
    let mut column = single_column(2.0, 5.0);
    column.on_layout(&CartesianSeries::new(&transform));

    assert!((column.left() - 15.0).abs() <= 1e-9);
    assert!((column.right() - 25.0).abs() <= 1e-9);
    assert!((column.top() - 50.0).abs() <= 1e-9);
    assert!((column.bottom() - 100.0).abs() <= 1e-9);
    let label = column.label_anchor().expect("label anchor");
    assert!((label.x - 20.0).abs() <= 1e-9);
    assert!((label.y - 50.0).abs() <= 1e-9);
}

#[test]
fn builder_grows_series_ranges() {
    let mut ranges = SeriesRanges::new();
    column_segments(
        &[1.0, 3.0],
        &[4.0, -2.0],
        0.0,
        ColumnOptions::default(),
        &mut ranges,
    )
    .expect("columns");

    assert!((ranges.x.start - 0.6).abs() <= 1e-9);
    assert!((ranges.x.end - 3.4).abs() <= 1e-9);
    assert_eq!(ranges.y.start, -2.0);
    assert_eq!(ranges.y.end, 4.0);
}

#[test]
fn builder_rejects_mismatched_lengths() {
    let mut ranges = SeriesRanges::new();
    let result = column_segments(&[1.0, 2.0], &[3.0], 0.0, ColumnOptions::default(), &mut ranges);
    assert!(result.is_err());
}

#[test]
fn inversed_value_axis_keeps_edges_ordered() {
    let transform = CartesianTransform::new(
        Rect::new(0.0, 0.0, 100.0, 100.0),
        AxisState::new(0.0, 10.0),
        AxisState::new(0.0, 10.0).with_inversed(true),
    )
    .expect("transform");
    let mut column = single_column(2.0, 5.0);
    column.on_layout(&CartesianSeries::new(&transform));

    assert!(column.top() <= column.bottom());
    assert!(column.top().abs() <= 1e-9);
    assert!((column.bottom() - 50.0).abs() <= 1e-9);
}

#[test]
fn negative_values_hang_below_the_baseline() {
    let transform = CartesianTransform::new(
        Rect::new(0.0, 0.0, 100.0, 100.0),
        AxisState::new(0.0, 10.0),
        AxisState::new(-5.0, 5.0),
    )
    .expect("transform");
    let mut column = single_column(2.0, -2.0);
    column.on_layout(&CartesianSeries::new(&transform));

    assert!((column.top() - 50.0).abs() <= 1e-9);
    assert!((column.bottom() - 70.0).abs() <= 1e-9);
}

#[test]
fn transposed_column_runs_along_the_horizontal_axis() {
    let transform = transform().with_transposed(true);
    let mut column = single_column(2.0, 5.0);
    column.on_layout(&CartesianSeries::new(&transform));

    assert!(column.left().abs() <= 1e-9);
    assert!((column.right() - 50.0).abs() <= 1e-9);
    assert!((column.top() - 75.0).abs() <= 1e-9);
    assert!((column.bottom() - 85.0).abs() <= 1e-9);
}

#[test]
fn column_left_of_visible_range_is_clipped() {
    let transform = CartesianTransform::new(
        Rect::new(0.0, 0.0, 100.0, 100.0),
        AxisState::new(4.3, 9.6),
        AxisState::new(0.0, 10.0),
    )
    .expect("transform");
    let mut column = single_column(1.0, 5.0);
    column.on_layout(&CartesianSeries::new(&transform));

    assert!(column.left().is_nan());
    assert!(column.label_anchor().is_none());
    let mut frame = RenderFrame::new(Rect::new(0.0, 0.0, 100.0, 100.0));
    column.draw(&mut frame);
    assert!(frame.is_empty());
    assert_eq!(column.data_point_index(10.0, 90.0), None);
}

#[test]
fn column_on_partially_visible_category_is_kept() {
    let transform = CartesianTransform::new(
        Rect::new(0.0, 0.0, 100.0, 100.0),
        AxisState::new(4.3, 9.6),
        AxisState::new(0.0, 10.0),
    )
    .expect("transform");
    let mut column = single_column(4.0, 5.0);
    column.on_layout(&CartesianSeries::new(&transform));
    assert!(!column.left().is_nan());
}

#[test]
fn nan_value_marks_column_empty() {
    let transform = transform();
    let mut column = single_column(2.0, f64::NAN);
    assert!(column.state().is_empty());
    column.on_layout(&CartesianSeries::new(&transform));

    let mut frame = RenderFrame::new(Rect::new(0.0, 0.0, 100.0, 100.0));
    column.draw(&mut frame);
    assert!(frame.is_empty());
    assert_eq!(column.data_point_index(20.0, 80.0), None);
}

#[test]
fn column_grows_from_its_midline_without_previous_values() {
    let transform = transform();
    let mut column = single_column(2.0, 5.0);

    column.on_layout(&CartesianSeries::new(&transform).with_animation(SeriesAnimation::running(0.0)));
    assert!((column.top() - 75.0).abs() <= 1e-9);
    assert!((column.bottom() - 75.0).abs() <= 1e-9);

    column.on_layout(&CartesianSeries::new(&transform).with_animation(SeriesAnimation::running(1.0)));
    assert!((column.top() - 50.0).abs() <= 1e-9);
    assert!((column.bottom() - 100.0).abs() <= 1e-9);
}

#[test]
fn column_blends_from_previous_values() {
    let transform = transform();
    let mut ranges = SeriesRanges::new();
    let mut column = single_column(2.0, 2.0);
    column.snapshot_previous();
    column.set_data(1.5, 2.5, 6.0, 0.0, &mut ranges);

    column.on_layout(&CartesianSeries::new(&transform).with_animation(SeriesAnimation::running(0.0)));
    assert!((column.top() - 80.0).abs() <= 1e-9);

    column.on_layout(&CartesianSeries::new(&transform).with_animation(SeriesAnimation::running(0.5)));
    assert!((column.top() - 60.0).abs() <= 1e-9);
    assert!((column.bottom() - 100.0).abs() <= 1e-9);

    column.on_layout(&CartesianSeries::new(&transform).with_animation(SeriesAnimation::running(1.0)));
    assert!((column.top() - 40.0).abs() <= 1e-9);
}

#[test]
fn draw_pushes_one_rect_with_laid_out_bounds() {
    let transform = transform();
    let mut column = single_column(2.0, 5.0);
    column.on_layout(&CartesianSeries::new(&transform));

    let mut frame = RenderFrame::new(Rect::new(0.0, 0.0, 100.0, 100.0));
    column.draw(&mut frame);
    let rects: Vec<_> = frame.rects().collect();
    assert_eq!(rects.len(), 1);
    let rect = rects[0].rect;
    assert!((rect.x0 - 15.0).abs() <= 1e-9);
    assert!((rect.y0 - 50.0).abs() <= 1e-9);
    assert!((rect.x1 - 25.0).abs() <= 1e-9);
    assert!((rect.y1 - 100.0).abs() <= 1e-9);
    assert!(frame.validate().is_ok());
}

#[test]
fn hit_test_reports_index_only_inside_bounds() {
    let transform = transform();
    let mut column = single_column(2.0, 5.0);
    column.on_layout(&CartesianSeries::new(&transform));

    assert_eq!(column.data_point_index(20.0, 80.0), Some(0));
    assert!(column.hit_test(20.0, 80.0));
    assert_eq!(column.data_point_index(50.0, 50.0), None);
    assert_eq!(column.data_point_index(-500.0, -500.0), None);
}

#[test]
fn hidden_column_neither_draws_nor_hits() {
    let transform = transform();
    let mut column = single_column(2.0, 5.0);
    column.on_layout(&CartesianSeries::new(&transform));
    column.state_mut().is_visible = false;

    let mut frame = RenderFrame::new(Rect::new(0.0, 0.0, 100.0, 100.0));
    column.draw(&mut frame);
    assert!(frame.is_empty());
    assert_eq!(column.data_point_index(20.0, 80.0), None);
}

#[test]
fn series_hit_test_prefers_topmost_segment() {
    let transform = transform();
    let mut ranges = SeriesRanges::new();
    let mut columns = column_segments(
        &[2.0, 2.0],
        &[5.0, 8.0],
        0.0,
        ColumnOptions::default(),
        &mut ranges,
    )
    .expect("columns");
    let series = CartesianSeries::new(&transform);
    for column in &mut columns {
        column.on_layout(&series);
    }

    assert_eq!(hit_test_segments(&columns, 20.0, 90.0), Some(1));
    assert_eq!(hit_test_segments(&columns, 90.0, 90.0), None);
}

#[test]
fn range_column_spans_high_and_low() {
    let transform = transform();
    let mut ranges = SeriesRanges::new();
    let mut segments = range_column_segments(
        &[5.0],
        &[8.0],
        &[3.0],
        ColumnOptions::default().with_spacing(0.0),
        &mut ranges,
    )
    .expect("range columns");
    let segment = &mut segments[0];
    segment.on_layout(&CartesianSeries::new(&transform));

    let edges = segment.edges();
    assert!((edges.left - 45.0).abs() <= 1e-9);
    assert!((edges.right - 55.0).abs() <= 1e-9);
    assert!((edges.top - 20.0).abs() <= 1e-9);
    assert!((edges.bottom - 70.0).abs() <= 1e-9);

    let high = segment.high_label_position().expect("high label");
    let low = segment.low_label_position().expect("low label");
    assert!((high.y - 20.0).abs() <= 1e-9);
    assert!((low.y - 70.0).abs() <= 1e-9);
    assert_eq!(segment.data_point_index(50.0, 50.0), Some(0));
    assert_eq!(segment.data_point_index(50.0, 90.0), None);
}

#[test]
fn range_column_forgets_previous_span_after_clear() {
    let transform = transform();
    let mut ranges = SeriesRanges::new();
    let mut segment = range_column_segments(
        &[5.0],
        &[8.0],
        &[3.0],
        ColumnOptions::default().with_spacing(0.0),
        &mut ranges,
    )
    .expect("range columns")
    .remove(0);
    segment.snapshot_previous();
    segment.set_data(4.5, 5.5, 6.0, 2.0, &mut ranges);

    let start = CartesianSeries::new(&transform).with_animation(SeriesAnimation::running(0.0));
    segment.on_layout(&start);
    assert!((segment.edges().top - 20.0).abs() <= 1e-9);
    assert!((segment.edges().bottom - 70.0).abs() <= 1e-9);

    segment.clear_previous();
    segment.on_layout(&start);
    assert!((segment.edges().top - 60.0).abs() <= 1e-9);
    assert!((segment.edges().bottom - 60.0).abs() <= 1e-9);

    segment.on_layout(&CartesianSeries::new(&transform));
    assert!((segment.edges().top - 40.0).abs() <= 1e-9);
    assert!((segment.edges().bottom - 80.0).abs() <= 1e-9);
}
