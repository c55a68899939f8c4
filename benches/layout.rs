use contact_layout::config::LayoutConfig;
use contact_layout::layout::{compute_regions, place_radially, simulate};
use contact_layout::model::Entity;
use contact_layout::render::render_svg;
use contact_layout::theme::Theme;
use contact_layout::{Layout, RenderConfig, compute_board, compute_dashboard};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

const MEMBERSHIPS: [&[&str]; 7] = [
    &["family"],
    &["friends"],
    &["work"],
    &["family", "friends"],
    &["friends", "work"],
    &["family", "work"],
    &["family", "friends", "work"],
];

fn contacts(count: usize) -> Vec<Entity> {
    (0..count)
        .map(|i| {
            Entity::new(i.to_string(), format!("Contact {i}"))
                .with_membership(MEMBERSHIPS[i % MEMBERSHIPS.len()].iter().copied())
                .with_weight((i % 5 + 1) as f64)
        })
        .collect()
}

fn bench_simulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulate");
    let config = LayoutConfig::default();
    let regions = compute_regions(1200.0, 800.0, config.regions.radius_multiplier);
    for count in [8usize, 32, 128] {
        let input = contacts(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &input, |b, data| {
            b.iter(|| {
                let mut entities = data.clone();
                let report = simulate(black_box(&mut entities), &regions, &config.simulation)
                    .expect("simulate failed");
                black_box(report.iterations);
            });
        });
    }
    group.finish();
}

fn bench_radial(c: &mut Criterion) {
    let mut group = c.benchmark_group("place_radially");
    let config = LayoutConfig::default();
    for count in [4usize, 12, 24] {
        let input = contacts(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &input, |b, data| {
            b.iter(|| {
                let balls = place_radially(1600.0, 1000.0, black_box(data), None, &config.radial);
                black_box(balls.len());
            });
        });
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let theme = Theme::soft();
    let config = LayoutConfig::default();
    let render_cfg = RenderConfig::default();
    let input = contacts(24);
    group.bench_function("board", |b| {
        b.iter(|| {
            let board = compute_board(black_box(&input), 1200.0, 800.0, &config)
                .expect("board failed");
            let svg = render_svg(&Layout::Board(board), &theme, &config, &render_cfg);
            black_box(svg.len());
        });
    });
    group.bench_function("dashboard", |b| {
        b.iter(|| {
            let dashboard = compute_dashboard(black_box(&input), 1600.0, 1000.0, None, &config);
            let svg = render_svg(&Layout::Dashboard(dashboard), &theme, &config, &render_cfg);
            black_box(svg.len());
        });
    });
    group.finish();
}

criterion_group!(benches, bench_simulation, bench_radial, bench_end_to_end);
criterion_main!(benches);
