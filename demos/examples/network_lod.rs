// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zooming out over a grown network.
//!
//! Grows a three-level network, then moves the camera away step by step. Each step prints
//! the counter line and, on level changes, what was applied to the scene.
//!
//! Set `RUST_LOG=debug` to see the evaluation details logged by the view crates.
//!
//! Run:
//! - `cargo run -p vsm_demos --example network_lod`

use tracing_subscriber::EnvFilter;
use vsm_network::{Network, Tag};
use vsm_view::{Camera, LodLevel, SceneState, Session, ViewConfig};

fn grow(network: &mut Network) -> Result<(), vsm_network::NetworkError> {
    network.create_seed()?;
    network.add_children(Tag::SEED, 12)?;
    let ring: Vec<Tag> = network
        .get(Tag::SEED)
        .map(|n| n.children().to_vec())
        .unwrap_or_default();
    for tag in &ring {
        network.add_children(tag.as_str(), 12)?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut network = Network::new();
    grow(&mut network)?;
    println!("grew {} nodes", network.len());

    // A low threshold makes clusters appear on this small network.
    let config = ViewConfig::from_json(r#"{ "cluster_threshold": 5 }"#)?;
    let mut session = Session::with_config(network, config)?;
    let mut scene = SceneState::new();

    for distance in [3.0, 6.0, 9.0, 12.0, 16.0, 20.0, 7.0] {
        let camera = Camera::default().at_distance(distance);
        let report = session.update_visibility(&camera, &mut scene);
        println!("z = {distance:>4}: {report}");
        if let Some(t) = report.transition {
            println!(
                "  applied {} (was {:?}); {} node(s) shown, {} cluster(s)",
                t.to,
                t.from,
                scene.visible_count(),
                scene.clusters().len()
            );
            for cluster in scene.clusters() {
                println!(
                    "    {} at ({:.2}, {:.2})",
                    cluster.label, cluster.centroid.x, cluster.centroid.y
                );
            }
        }
    }

    assert_eq!(session.level(), Some(LodLevel::Full));
    assert!(session.clusters().is_empty());
    Ok(())
}
