use chart_segments::core::{AxisState, CartesianTransform, SeriesAnimation, SeriesRanges};
use chart_segments::render::RenderFrame;
use chart_segments::segments::{draw_segments, hit_test_segments};
use chart_segments::series::{
    CartesianSeries, CircularOptions, ColumnOptions, WaterfallOptions, circular_series,
    column_segments, layout_waterfall, pie_segments, waterfall_segments,
};
use criterion::{Criterion, criterion_group, criterion_main};
use kurbo::Rect;
use std::hint::black_box;

const PLOT: Rect = Rect::new(0.0, 0.0, 1920.0, 1080.0);

fn generated_values(count: usize) -> (Vec<f64>, Vec<f64>) {
    (0..count)
        .map(|i| {
            let x = i as f64;
            let y = 50.0 + (x * 0.07).sin() * 40.0;
            (x, y)
        })
        .unzip()
}

fn bench_column_layout_10k(c: &mut Criterion) {
    let (xs, ys) = generated_values(10_000);
    let transform = CartesianTransform::new(
        PLOT,
        AxisState::new(0.0, 10_000.0),
        AxisState::new(0.0, 100.0),
    )
    .expect("valid transform");
    let mut ranges = SeriesRanges::new();
    let mut columns =
        column_segments(&xs, &ys, 0.0, ColumnOptions::default(), &mut ranges).expect("columns");
    let series = CartesianSeries::new(&transform).with_animation(SeriesAnimation::running(0.5));

    c.bench_function("column_layout_10k", |b| {
        b.iter(|| {
            for column in &mut columns {
                column.on_layout(black_box(&series));
            }
        })
    });
}

fn bench_waterfall_layout_and_draw_2k(c: &mut Criterion) {
    let (xs, ys) = generated_values(2_000);
    let deltas: Vec<f64> = ys.iter().map(|y| y - 50.0).collect();
    let sums: Vec<bool> = (0..xs.len()).map(|i| i % 100 == 99).collect();
    let transform = CartesianTransform::new(
        PLOT,
        AxisState::new(0.0, 2_000.0),
        AxisState::new(-500.0, 500.0),
    )
    .expect("valid transform");
    let mut ranges = SeriesRanges::new();
    let mut bars = waterfall_segments(&xs, &deltas, &sums, WaterfallOptions::default(), &mut ranges)
        .expect("waterfall");
    let series = CartesianSeries::new(&transform);

    c.bench_function("waterfall_layout_and_draw_2k", |b| {
        b.iter(|| {
            layout_waterfall(&mut bars, black_box(&series));
            let mut frame = RenderFrame::new(PLOT);
            draw_segments(&bars, &mut frame);
            black_box(frame.len());
        })
    });
}

fn bench_pie_hit_test_1k(c: &mut Criterion) {
    let values: Vec<f64> = (1..=1_000).map(f64::from).collect();
    let options = CircularOptions::default();
    let series = circular_series(options, PLOT, SeriesAnimation::idle()).expect("series");
    let mut slices = pie_segments(&values, options).expect("pie");
    for slice in &mut slices {
        slice.on_layout(&series);
    }

    c.bench_function("pie_hit_test_1k", |b| {
        b.iter(|| hit_test_segments(black_box(&slices), black_box(900.0), black_box(600.0)))
    });
}

criterion_group!(
    benches,
    bench_column_layout_10k,
    bench_waterfall_layout_and_draw_2k,
    bench_pie_hit_test_1k
);
criterion_main!(benches);
