//! Coordinate transform benchmarks.
//!
//! Measures construction cost of both transforms and per-point projection
//! throughput, the hot path when drawing many features onto one raster.
//!
//! Run with: cargo bench --package projection --bench transform_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use geo_common::{GeoBBox, TileCoord};
use projection::{CoordinateTransformer, TileTransform, ViewportTransform};

fn sample_points(count: usize) -> Vec<(f64, f64)> {
    (0..count)
        .map(|i| {
            let t = i as f64 / count as f64;
            (-10.0 + 20.0 * t, 40.0 + 10.0 * (1.0 - t))
        })
        .collect()
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");

    let bbox = GeoBBox::new(-10.0, 50.0, 10.0, 40.0);
    group.bench_function("viewport_new", |b| {
        b.iter(|| ViewportTransform::new(black_box(bbox), black_box(1920), black_box(1080)))
    });

    group.bench_function("tile_new", |b| {
        b.iter(|| TileTransform::new(black_box(14), black_box(8800), black_box(5373)))
    });

    group.bench_function("tile_set_tile", |b| {
        let mut tile = TileTransform::new(0, 0, 0);
        let coord = TileCoord::new(14, 8800, 5373);
        b.iter(|| tile.set_tile(black_box(coord)))
    });

    group.finish();
}

fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");

    let viewport = ViewportTransform::from_coords(-10.0, 50.0, 10.0, 40.0, 1920, 1080);
    let tile = TileTransform::new(4, 7, 5);

    for count in [1_000, 100_000] {
        let points = sample_points(count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("viewport", count), &points, |b, points| {
            b.iter(|| {
                points
                    .iter()
                    .map(|&(lon, lat)| viewport.project(lon, lat))
                    .fold(0.0, |acc, (x, y)| acc + x + y)
            })
        });

        group.bench_with_input(BenchmarkId::new("tile", count), &points, |b, points| {
            b.iter(|| {
                points
                    .iter()
                    .map(|&(lon, lat)| tile.project(lon, lat))
                    .fold(0.0, |acc, (x, y)| acc + x + y)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_construction, bench_projection);
criterion_main!(benches);
