use chart_segments::core::{AxisState, CartesianTransform, SeriesRanges};
use chart_segments::render::{
    CirclePrimitive, Color, LinePrimitive, NullRenderer, Paint, Primitive, RectPrimitive,
    RenderFrame, Renderer, StrokeStyle,
};
use chart_segments::segments::draw_segments;
use chart_segments::series::{CartesianSeries, ColumnOptions, column_segments};
use kurbo::{Point, Rect};

fn fill(color: Color) -> Paint {
    Paint {
        fill: Some(color),
        stroke: None,
        opacity: 1.0,
    }
}

#[test]
fn frame_rejects_degenerate_viewport() {
    let frame = RenderFrame::new(Rect::new(0.0, 0.0, 0.0, 100.0));
    assert!(frame.validate().is_err());

    let frame = RenderFrame::new(Rect::new(0.0, 0.0, 100.0, 100.0));
    frame.validate().expect("empty frame is valid");
}

#[test]
fn frame_rejects_non_finite_geometry() {
    let mut frame = RenderFrame::new(Rect::new(0.0, 0.0, 100.0, 100.0));
    frame.push_circle(CirclePrimitive::new(
        Point::new(f64::NAN, 10.0),
        5.0,
        fill(Color::BLACK),
    ));
    assert!(frame.validate().is_err());

    let mut frame = RenderFrame::new(Rect::new(0.0, 0.0, 100.0, 100.0));
    frame.push_circle(CirclePrimitive::new(
        Point::new(10.0, 10.0),
        -1.0,
        fill(Color::BLACK),
    ));
    assert!(frame.validate().is_err());
}

#[test]
fn frame_rejects_invalid_paint() {
    let mut frame = RenderFrame::new(Rect::new(0.0, 0.0, 100.0, 100.0));
    frame.push_line(LinePrimitive::new(
        Point::new(0.0, 0.0),
        Point::new(10.0, 10.0),
        Paint::stroke_only(StrokeStyle::new(Color::BLACK, 0.0), 1.0),
    ));
    assert!(frame.validate().is_err());

    let mut frame = RenderFrame::new(Rect::new(0.0, 0.0, 100.0, 100.0));
    frame.push_rect(RectPrimitive::new(
        Rect::new(0.0, 0.0, 10.0, 10.0),
        fill(Color::rgba(1.5, 0.0, 0.0, 1.0)),
    ));
    assert!(frame.validate().is_err());
}

#[test]
fn primitives_keep_submission_order() {
    let mut frame = RenderFrame::new(Rect::new(0.0, 0.0, 100.0, 100.0));
    frame.push_rect(RectPrimitive::new(
        Rect::new(0.0, 0.0, 10.0, 10.0),
        fill(Color::BLACK),
    ));
    frame.push_line(LinePrimitive::new(
        Point::new(0.0, 0.0),
        Point::new(10.0, 10.0),
        Paint::stroke_only(StrokeStyle::new(Color::BLACK, 1.0), 1.0),
    ));

    assert_eq!(frame.len(), 2);
    assert!(matches!(frame.primitives[0], Primitive::Rect(_)));
    assert!(matches!(frame.primitives[1], Primitive::Line(_)));
    assert_eq!(frame.rects().count(), 1);
    assert_eq!(frame.lines().count(), 1);
    assert_eq!(frame.circles().count(), 0);
}

#[test]
fn null_renderer_counts_column_primitives() {
    let transform = CartesianTransform::new(
        Rect::new(0.0, 0.0, 100.0, 100.0),
        AxisState::new(0.0, 10.0),
        AxisState::new(0.0, 10.0),
    )
    .expect("transform");
    let mut ranges = SeriesRanges::new();
    let mut columns = column_segments(
        &[1.0, 2.0, 3.0],
        &[4.0, 5.0, 6.0],
        0.0,
        ColumnOptions::default(),
        &mut ranges,
    )
    .expect("columns");
    let series = CartesianSeries::new(&transform);
    for column in &mut columns {
        column.on_layout(&series);
    }

    let mut frame = RenderFrame::new(transform.area());
    draw_segments(&columns, &mut frame);

    let mut renderer = NullRenderer::default();
    renderer.render(&frame).expect("render");
    assert_eq!(renderer.last_primitive_count, 3);
    assert_eq!(renderer.last_path_count, 0);
}

#[test]
fn null_renderer_refuses_invalid_frames() {
    let mut frame = RenderFrame::new(Rect::new(0.0, 0.0, 100.0, 100.0));
    frame.push_circle(CirclePrimitive::new(
        Point::new(10.0, 10.0),
        f64::INFINITY,
        fill(Color::BLACK),
    ));
    let mut renderer = NullRenderer::default();
    assert!(renderer.render(&frame).is_err());
    assert_eq!(renderer.last_primitive_count, 0);
}

#[test]
fn json_snapshot_round_trips() {
    let mut frame = RenderFrame::new(Rect::new(0.0, 0.0, 100.0, 100.0));
    frame.push_circle(CirclePrimitive::new(
        Point::new(50.0, 50.0),
        5.0,
        fill(Color::rgb(0.2, 0.4, 0.6)),
    ));

    let json = frame.to_json().expect("json");
    assert!(json.contains("\"Circle\""));
    let decoded: RenderFrame = serde_json::from_str(&json).expect("decode");
    assert_eq!(decoded, frame);
}
