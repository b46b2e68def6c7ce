use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use sucrose::api::{Chart, ChartConfig, ChartKind};
use sucrose::axis::{AxisConfig, AxisLayout};
use sucrose::core::{ChartData, Scale, Series, SeriesValue, Viewport};
use sucrose::render::{HeuristicTextMeasurer, NullRenderer};

fn month_labels(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("Reporting Month {i}")).collect()
}

fn bench_crowded_axis_layout(c: &mut Criterion) {
    let scale = Scale::band(month_labels(48), (0.0, 600.0)).expect("valid band scale");
    let config = AxisConfig::bottom().with_wrap_ticks(true).with_stagger_ticks(true);
    let measurer = HeuristicTextMeasurer;

    c.bench_function("crowded_axis_layout_48", |b| {
        b.iter(|| {
            let _ = AxisLayout::compute(black_box(&config), black_box(&scale), &measurer)
                .expect("axis layout");
        })
    });
}

fn bench_linear_axis_layout(c: &mut Criterion) {
    let scale = Scale::linear((0.0, 1_250_000.0), (400.0, 0.0)).expect("valid linear scale");
    let config = AxisConfig::left().with_show_max_min(true);
    let measurer = HeuristicTextMeasurer;

    c.bench_function("linear_axis_layout", |b| {
        b.iter(|| {
            let _ = AxisLayout::compute(black_box(&config), black_box(&scale), &measurer)
                .expect("axis layout");
        })
    });
}

fn bench_bar_chart_render(c: &mut Criterion) {
    let series: Vec<Series> = (0..4)
        .map(|s| {
            let values = month_labels(24)
                .into_iter()
                .enumerate()
                .map(|(i, label)| SeriesValue::new(label, (i * (s + 1)) as f64 + 3.0))
                .collect();
            Series::new(format!("Series {s}"), values)
        })
        .collect();
    let config = ChartConfig::new(Viewport::new(960, 500));
    let mut chart = Chart::new(NullRenderer::default(), ChartKind::Bar, config)
        .and_then(|chart| chart.with_data(ChartData::new(series)))
        .expect("chart init");

    c.bench_function("bar_chart_render_4x24", |b| {
        b.iter(|| {
            let _ = chart.render().expect("render");
        })
    });
}

criterion_group!(
    benches,
    bench_crowded_axis_layout,
    bench_linear_axis_layout,
    bench_bar_chart_render
);
criterion_main!(benches);
