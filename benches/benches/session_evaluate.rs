// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use vsm_network::{Network, Tag};
use vsm_view::{Camera, SceneState, Session};

/// Seed with `fanout` children, each with `fanout` children, two levels down.
fn grown(fanout: u32) -> Network {
    let mut net = Network::new();
    net.create_seed().unwrap();
    net.add_children(Tag::SEED, fanout).unwrap();
    let first: Vec<Tag> = net.get(Tag::SEED).unwrap().children().to_vec();
    for tag in &first {
        net.add_children(tag.as_str(), fanout).unwrap();
    }
    let second: Vec<Tag> = first
        .iter()
        .flat_map(|t| net.get(t.as_str()).unwrap().children().to_vec())
        .collect();
    for tag in &second {
        net.add_children(tag.as_str(), fanout).unwrap();
    }
    net
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");
    for &fanout in &[6u32, 12] {
        let network = grown(fanout);
        let n = network.len();
        group.bench_function(format!("enter_low_nodes{}", n), |b| {
            b.iter_batched(
                || (Session::new(network.clone()), SceneState::new()),
                |(mut session, mut scene)| {
                    let report =
                        session.update_visibility(&Camera::default().at_distance(18.0), &mut scene);
                    black_box(report);
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("full_detail_nodes{}", n), |b| {
            let mut session = Session::new(network.clone());
            let mut scene = SceneState::new();
            let camera = Camera::default().at_distance(4.0);
            b.iter(|| black_box(session.update_visibility(&camera, &mut scene)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_evaluate);
criterion_main!(benches);
