// Copyright 2026 the Ponder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use ponder_quadtree::{DensityOptions, QuadTree};

const EXTENT: Rect = Rect::new(0.0, 0.0, 2000.0, 2000.0);

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_uniform_points(count: usize) -> Vec<Point> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for _ in 0..count {
        out.push(Point::new(
            rng.next_f64() * EXTENT.width(),
            rng.next_f64() * EXTENT.height(),
        ));
    }
    out
}

fn gen_clustered_points(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Point> {
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut centers = Vec::with_capacity(n_clusters);
    for _ in 0..n_clusters {
        centers.push((
            rng.next_f64() * EXTENT.width(),
            rng.next_f64() * EXTENT.height(),
        ));
    }
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            out.push(Point::new(
                (cx + dx).clamp(0.0, EXTENT.width()),
                (cy + dy).clamp(0.0, EXTENT.height()),
            ));
        }
    }
    out
}

fn build_tree(points: &[Point]) -> QuadTree<Point, fn(&Point) -> Point> {
    fn ident(p: &Point) -> Point {
        *p
    }
    QuadTree::build(
        points.iter().copied(),
        EXTENT,
        ident as fn(&Point) -> Point,
        1.0,
    )
    .expect("valid extent and resolution limit")
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &n in &[1024usize, 8192, 65536] {
        let points = gen_uniform_points(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("uniform_n{}", n), |b| {
            b.iter_batched(
                || points.clone(),
                |points| black_box(build_tree(&points)),
                BatchSize::SmallInput,
            )
        });
    }
    let points = gen_clustered_points(16, 4096, 64.0);
    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("clustered", |b| {
        b.iter_batched(
            || points.clone(),
            |points| black_box(build_tree(&points)),
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest");
    for &n in &[1024usize, 65536] {
        let tree = build_tree(&gen_uniform_points(n));
        let queries = gen_uniform_points(256);
        group.throughput(Throughput::Elements(queries.len() as u64));
        group.bench_function(format!("unbounded_n{}", n), |b| {
            b.iter(|| {
                let mut found = 0usize;
                for q in &queries {
                    if tree.nearest(q.x, q.y, None).is_some() {
                        found += 1;
                    }
                }
                black_box(found);
            })
        });
        group.bench_function(format!("radius50_n{}", n), |b| {
            b.iter(|| {
                let mut found = 0usize;
                for q in &queries {
                    if tree.nearest(q.x, q.y, Some(50.0)).is_some() {
                        found += 1;
                    }
                }
                black_box(found);
            })
        });
    }
    group.finish();
}

fn bench_range_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("range");
    let tree = build_tree(&gen_uniform_points(65536));
    group.bench_function("in_region_5pct", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for q in 0..64 {
                let x = (q % 8) as f64 * 250.0;
                let y = (q / 8) as f64 * 250.0;
                total += tree.in_region(Rect::new(x, y, x + 100.0, y + 100.0)).len();
            }
            black_box(total);
        })
    });
    group.bench_function("in_circle_r100", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for q in 0..64 {
                let x = 100.0 + (q % 8) as f64 * 250.0;
                let y = 100.0 + (q / 8) as f64 * 250.0;
                total += tree.in_circle(x, y, 100.0).len();
            }
            black_box(total);
        })
    });
    group.finish();
}

fn bench_density(c: &mut Criterion) {
    let mut group = c.benchmark_group("density");
    let uniform = build_tree(&gen_uniform_points(16384));
    let clustered = build_tree(&gen_clustered_points(16, 1024, 64.0));
    group.bench_function("areas_uniform", |b| {
        b.iter(|| black_box(uniform.density_areas(DensityOptions::default())))
    });
    group.bench_function("areas_clustered_capped", |b| {
        b.iter(|| {
            black_box(clustered.density_areas(DensityOptions {
                max_resolution: Some(8.0),
                ..Default::default()
            }))
        })
    });
    group.finish();
}

fn bench_local_values(c: &mut Criterion) {
    let mut group = c.benchmark_group("local_values");
    let tree = build_tree(&gen_uniform_points(16384));
    group.bench_function("two_values_capped", |b| {
        b.iter(|| black_box(tree.local_values(|p| vec![p.x, p.y], Some(8.0))))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_build,
    bench_nearest,
    bench_range_queries,
    bench_density,
    bench_local_values,
);
criterion_main!(benches);
