use chart_segments::core::SeriesAnimation;
use chart_segments::core::geometry::point_on_circle;
use chart_segments::render::RenderFrame;
use chart_segments::segments::pie::mid_angle;
use chart_segments::segments::{CapStyle, ChartSegment, PieSegment};
use chart_segments::series::{
    CircularOptions, CircularSeries, circular_series, doughnut_segments, pie_segments,
};
use kurbo::{Point, Rect};

const PLOT: Rect = Rect::new(0.0, 0.0, 200.0, 200.0);
const CENTER: Point = Point::new(100.0, 100.0);

fn series(options: CircularOptions) -> CircularSeries {
    circular_series(options, PLOT, SeriesAnimation::idle()).expect("circular series")
}

fn wrapped_slice() -> PieSegment {
    let mut slice = PieSegment::new(0);
    slice.set_data(1.0, 350.0, 30.0);
    slice.on_layout(&CircularSeries::new(CENTER, 80.0));
    slice
}

#[test]
fn series_radius_follows_the_shorter_plot_side() {
    let series = circular_series(
        CircularOptions::default(),
        Rect::new(0.0, 0.0, 300.0, 200.0),
        SeriesAnimation::idle(),
    )
    .expect("circular series");
    assert!((series.radius - 80.0).abs() <= 1e-9);
    assert!((series.center.x - 150.0).abs() <= 1e-9);

    let empty = circular_series(
        CircularOptions::default(),
        Rect::new(0.0, 0.0, 0.0, 200.0),
        SeriesAnimation::idle(),
    );
    assert!(empty.is_err());
}

#[test]
fn slice_crossing_zero_degrees_hits_on_both_sides() {
    let slice = wrapped_slice();
    assert_eq!(slice.data_point_index_at(355.0, 40.0), Some(0));
    assert_eq!(slice.data_point_index_at(5.0, 40.0), Some(0));
    assert_eq!(slice.data_point_index_at(200.0, 40.0), None);
    assert_eq!(slice.data_point_index_at(5.0, 90.0), None);
}

trait PolarHit {
    fn data_point_index_at(&self, degrees: f64, radius: f64) -> Option<usize>;
}

impl<S: ChartSegment> PolarHit for S {
    fn data_point_index_at(&self, degrees: f64, radius: f64) -> Option<usize> {
        let point = point_on_circle(CENTER, radius, degrees);
        self.data_point_index(point.x, point.y)
    }
}

#[test]
fn mid_angle_is_the_true_middle_of_the_sweep() {
    let slice = wrapped_slice();
    let expected = 365.0_f64.to_radians();
    assert!((slice.mid_angle().expect("mid angle") - expected).abs() <= 1e-9);
    assert!((mid_angle(90.0, -60.0) - 60.0_f64.to_radians()).abs() <= 1e-9);
}

#[test]
fn label_anchor_sits_at_half_radius_on_the_mid_angle() {
    let slice = wrapped_slice();
    let anchor = slice.label_anchor().expect("anchor");
    let expected = point_on_circle(CENTER, 40.0, 365.0);
    assert!((anchor.x - expected.x).abs() <= 1e-9);
    assert!((anchor.y - expected.y).abs() <= 1e-9);
}

#[test]
fn pie_slices_share_the_sweep_by_value() {
    let mut slices = pie_segments(&[1.0, 1.0, 2.0], CircularOptions::default()).expect("pie");
    let series = series(CircularOptions::default());
    for slice in &mut slices {
        slice.on_layout(&series);
    }

    let angles: Vec<_> = slices
        .iter()
        .map(|slice| (slice.start_angle(), slice.sweep_angle()))
        .collect();
    assert_eq!(angles, vec![(0.0, 90.0), (90.0, 90.0), (180.0, 180.0)]);
    assert_eq!(slices[2].data_point_index_at(270.0, 50.0), Some(2));
    assert_eq!(slices[0].data_point_index_at(270.0, 50.0), None);
}

#[test]
fn slices_sweep_open_from_the_series_start() {
    let mut slices = pie_segments(&[1.0, 1.0, 2.0], CircularOptions::default()).expect("pie");
    let options = CircularOptions::default();

    let start = circular_series(options, PLOT, SeriesAnimation::running(0.0)).expect("series");
    slices[1].on_layout(&start);
    let sector = slices[1].sector().expect("sector");
    assert!(sector.start_angle.abs() <= 1e-9);
    assert!(sector.sweep_angle.abs() <= 1e-9);

    let half = circular_series(options, PLOT, SeriesAnimation::running(0.5)).expect("series");
    slices[1].on_layout(&half);
    let sector = slices[1].sector().expect("sector");
    assert!((sector.start_angle - 45.0).abs() <= 1e-9);
    assert!((sector.sweep_angle - 45.0).abs() <= 1e-9);

    let done = circular_series(options, PLOT, SeriesAnimation::running(1.0)).expect("series");
    slices[1].on_layout(&done);
    let sector = slices[1].sector().expect("sector");
    assert!((sector.start_angle - 90.0).abs() <= 1e-9);
    assert!((sector.sweep_angle - 90.0).abs() <= 1e-9);
}

#[test]
fn slices_blend_from_previous_angles() {
    let mut slice = PieSegment::new(0);
    slice.set_data(1.0, 90.0, 90.0);
    slice.snapshot_previous();
    slice.set_data(2.0, 120.0, 60.0);

    let series = circular_series(CircularOptions::default(), PLOT, SeriesAnimation::running(0.5))
        .expect("series");
    slice.on_layout(&series);
    let sector = slice.sector().expect("sector");
    assert!((sector.start_angle - 105.0).abs() <= 1e-9);
    assert!((sector.sweep_angle - 75.0).abs() <= 1e-9);

    slice.clear_previous();
    slice.on_layout(&series);
    let sector = slice.sector().expect("sector");
    assert!((sector.start_angle - 60.0).abs() <= 1e-9);
}

#[test]
fn exploded_slice_moves_along_its_mid_angle() {
    let options = CircularOptions::default().with_explode(Some(0), 30.0);
    let mut slices = pie_segments(&[1.0, 3.0], options).expect("pie");
    let series = series(options);
    for slice in &mut slices {
        slice.on_layout(&series);
    }

    let moved = slices[0].sector().expect("sector").center;
    let offset = 30.0 * 45.0_f64.to_radians().cos();
    assert!((moved.x - (100.0 + offset)).abs() <= 1e-9);
    assert!((moved.y - (100.0 + offset)).abs() <= 1e-9);
    assert_eq!(slices[1].sector().expect("sector").center, CENTER);

    let bounds = slices[0].bounds();
    assert!((bounds.width() - 160.0).abs() <= 1e-9);
    assert!((bounds.center().x - moved.x).abs() <= 1e-9);
}

#[test]
fn explode_all_moves_every_slice() {
    let options = CircularOptions::default()
        .with_explode(None, 10.0)
        .with_explode_all(true);
    let mut slices = pie_segments(&[1.0, 1.0], options).expect("pie");
    let series = series(options);
    for slice in &mut slices {
        slice.on_layout(&series);
        assert_ne!(slice.sector().expect("sector").center, CENTER);
    }
}

#[test]
fn doughnut_hole_is_not_hit() {
    let options = CircularOptions::doughnut();
    let mut slices = doughnut_segments(&[1.0], options).expect("doughnut");
    let series = series(options);
    slices[0].on_layout(&series);

    let sector = slices[0].sector().expect("sector");
    assert!((sector.inner_radius - 32.0).abs() <= 1e-9);
    assert_eq!(slices[0].data_point_index_at(45.0, 20.0), None);
    assert_eq!(slices[0].data_point_index_at(45.0, 50.0), Some(0));

    let hole = slices[0].inner_bounds().expect("inner bounds");
    assert!((hole.width() - 64.0).abs() <= 1e-9);
}

#[test]
fn curved_doughnut_caps_still_draw_a_closed_path() {
    let options = CircularOptions::doughnut().with_cap_style(CapStyle::BothCurve);
    let mut slices = doughnut_segments(&[1.0, 2.0], options).expect("doughnut");
    let series = series(options);
    let mut frame = RenderFrame::new(PLOT);
    for slice in &mut slices {
        slice.on_layout(&series);
        slice.draw(&mut frame);
    }
    assert_eq!(frame.paths().count(), 2);
    assert!(frame.validate().is_ok());
}

#[test]
fn nan_slice_is_empty_and_silent() {
    let mut slices = pie_segments(&[1.0, f64::NAN], CircularOptions::default()).expect("pie");
    let series = series(CircularOptions::default());
    let mut frame = RenderFrame::new(PLOT);
    for slice in &mut slices {
        slice.on_layout(&series);
        slice.draw(&mut frame);
    }

    assert!(slices[1].state().is_empty());
    assert!(slices[1].sector().is_none());
    assert_eq!(frame.paths().count(), 1);
    assert_eq!(slices[0].data_point_index_at(90.0, 40.0), Some(0));
}
