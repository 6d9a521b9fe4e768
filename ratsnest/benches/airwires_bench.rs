use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ratsnest::geometry::Point;
use ratsnest::prelude::*;
use ratsnest::AirWiresBuilder;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// `side * side` isolated points on a 2.54 mm grid
fn grid_builder(side: i64) -> AirWiresBuilder {
    let mut builder = AirWiresBuilder::new();
    for row in 0..side {
        for column in 0..side {
            builder.add_point(Point::new(column * 2_540_000, row * 2_540_000));
        }
    }
    builder
}

fn bench_isolated_grid(c: &mut Criterion) {
    let builder = grid_builder(16);

    c.bench_function("air_wires_isolated_grid_256", |b| {
        b.iter(|| black_box(&builder).build_air_wires());
    });
}

fn bench_partly_routed_grid(c: &mut Criterion) {
    let mut builder = grid_builder(16);
    // Route every row, leaving the columns to the air wires
    for row in 0..16 {
        for column in 0..15 {
            builder.add_edge(row * 16 + column, row * 16 + column + 1);
        }
    }

    c.bench_function("air_wires_routed_rows_256", |b| {
        b.iter(|| black_box(&builder).build_air_wires());
    });
}

fn bench_analyze_fixture(c: &mut Criterion) {
    let snapshot = ratsnest::load_snapshot(&fixture_path("two_layer_board.json"))
        .expect("fixture should load");
    let options = RatsnestOptions::default();

    c.bench_function("analyze_board_fixture", |b| {
        b.iter(|| {
            RatsnestCore::analyze_board(
                black_box(&snapshot),
                black_box(&snapshot.boards[0]),
                black_box(&options),
            )
        });
    });
}

criterion_group!(
    benches,
    bench_isolated_grid,
    bench_partly_routed_grid,
    bench_analyze_fixture
);
criterion_main!(benches);
