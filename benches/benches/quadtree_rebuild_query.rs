// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use vsm_index::{Aabb2D, QuadTree, SpatialIndex, SpatialItem};

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

fn gen_uniform_points(count: usize, half: f64) -> Vec<(u32, f64, f64)> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|i| {
            let x = rng.next_f64() * 2.0 * half - half;
            let y = rng.next_f64() * 2.0 * half - half;
            (i as u32, x, y)
        })
        .collect()
}

fn gen_clustered_points(
    n_clusters: usize,
    per_cluster: usize,
    spread: f64,
) -> Vec<(u32, f64, f64)> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    for _ in 0..n_clusters {
        let cx = rng.next_f64() * 1600.0 - 800.0;
        let cy = rng.next_f64() * 1600.0 - 800.0;
        for _ in 0..per_cluster {
            let x = cx + (rng.next_f64() - 0.5) * spread;
            let y = cy + (rng.next_f64() - 0.5) * spread;
            out.push((out.len() as u32, x, y));
        }
    }
    out
}

fn bench_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("spatial_index");
    for &n in &[1_000usize, 10_000, 50_000] {
        let points = gen_uniform_points(n, 1000.0);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("rebuild_uniform_n{}", n), |b| {
            b.iter_batched(
                SpatialIndex::<u32>::default,
                |mut idx| {
                    let summary = idx.rebuild(points.iter().copied());
                    black_box(summary);
                },
                BatchSize::SmallInput,
            )
        });
    }
    let points = gen_clustered_points(64, 256, 6.0);
    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("rebuild_clustered", |b| {
        b.iter_batched(
            SpatialIndex::<u32>::default,
            |mut idx| {
                let summary = idx.rebuild(points.iter().copied());
                black_box(summary);
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_query");
    for &capacity in &[4usize, 16, 64] {
        let mut qt = QuadTree::new(Aabb2D::centered(1000.0), capacity);
        for (id, x, y) in gen_uniform_points(20_000, 1000.0) {
            qt.insert(SpatialItem::new(x, y, id));
        }
        let view = Aabb2D::<f64>::from_xywh(-50.0, -50.0, 100.0, 100.0);
        group.bench_function(format!("viewport_cap{}", capacity), |b| {
            let mut out = Vec::new();
            b.iter(|| {
                out.clear();
                let visited = qt.query_into(black_box(&view), &mut out);
                black_box((visited, out.len()));
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rebuild, bench_query);
criterion_main!(benches);
