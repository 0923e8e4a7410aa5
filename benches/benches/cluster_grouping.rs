// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use vsm_index::SpatialItem;
use vsm_view::ClusterGrouper;

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

fn gen_items(count: usize, side: f64, seed: u64) -> Vec<SpatialItem<f64, u32>> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|i| SpatialItem::new(rng.next_f64() * side, rng.next_f64() * side, i as u32))
        .collect()
}

fn bench_grouping(c: &mut Criterion) {
    let grouper = ClusterGrouper::default();
    let mut group = c.benchmark_group("cluster");
    for &n in &[100usize, 500, 2_000] {
        // Dense: most items fall into a few large groups.
        let dense = gen_items(n, 8.0, 0x9E37_79B9_7F4A_7C15);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("dense_n{}", n), |b| {
            b.iter_batched(
                || dense.clone(),
                |items| black_box(grouper.cluster(items)),
                BatchSize::SmallInput,
            )
        });
        // Sparse: almost every item opens its own group.
        let sparse = gen_items(n, 400.0, 0xBADC_F00D_1234_5678);
        group.bench_function(format!("sparse_n{}", n), |b| {
            b.iter_batched(
                || sparse.clone(),
                |items| black_box(grouper.cluster(items)),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_grouping);
criterion_main!(benches);
