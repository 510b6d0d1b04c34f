use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use trellis_chart::api::{RenderContext, TrellisSettings};
use trellis_chart::core::{
    AxisScale, CategoryColumn, DataGrouper, DataTable, MeasureColumn, Row, Viewport,
    nearest_sample, sorted_distinct,
};

fn bench_scale_round_trip(c: &mut Criterion) {
    let scale = AxisScale::new((0.0, 10_000.0), (1080.0, 0.0)).expect("valid scale");

    c.bench_function("axis_scale_round_trip", |b| {
        b.iter(|| {
            let px = scale.map(black_box(4_321.123));
            let _ = scale.invert(px);
        })
    });
}

fn bench_nearest_sample_100k(c: &mut Criterion) {
    let samples = sorted_distinct((0..100_000).map(|i| f64::from(i) * 0.5));

    c.bench_function("nearest_sample_100k", |b| {
        b.iter(|| {
            let _ = nearest_sample(black_box(&samples), black_box(31_415.26));
        })
    });
}

fn generated_rows(count: usize) -> Vec<Row> {
    (0..count)
        .map(|i| Row {
            x_value: (i / 40) as f64,
            y_values_left: vec![Some(i as f64 * 0.25)],
            y_values_right: vec![Some(100.0 - (i % 100) as f64)],
            line_by: format!("line-{}", i % 20),
            visual_group_by: format!("group-{}", i % 5),
            trellis_by: format!("panel-{}", i % 2),
            tooltip_data: Vec::new(),
        })
        .collect()
}

fn bench_grouping_10k(c: &mut Criterion) {
    let rows = generated_rows(10_000);
    let grouper = DataGrouper::new();

    c.bench_function("grouping_10k", |b| {
        b.iter(|| {
            let _ = grouper.group(black_box(rows.clone()));
        })
    });
}

fn bench_render_context_5k(c: &mut Criterion) {
    let count = 5_000;
    let mut table = DataTable::with_numeric_x("x", (0..count).map(|i| (i / 25) as f64).collect());
    table.line_by = Some(CategoryColumn::text(
        "Series",
        (0..count).map(|i| format!("s{}", i % 25)),
    ));
    table.trellis_by = Some(CategoryColumn::text(
        "Panel",
        (0..count).map(|i| format!("p{}", i % 4)),
    ));
    table.left_measures = vec![MeasureColumn::new(
        "Value",
        (0..count).map(|i| Some(f64::from(i % 500))).collect(),
    )];
    let settings = TrellisSettings::default();
    let viewport = Viewport::new(1920.0, 1080.0);

    c.bench_function("render_context_5k", |b| {
        b.iter(|| {
            let _ = RenderContext::build(1, black_box(&table), &settings, viewport)
                .expect("context should build");
        })
    });
}

criterion_group!(
    benches,
    bench_scale_round_trip,
    bench_nearest_sample_100k,
    bench_grouping_10k,
    bench_render_context_5k
);
criterion_main!(benches);
