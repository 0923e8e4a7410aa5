// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Editing a network and saving it as JSON.
//!
//! Grows a network, renames and prunes nodes, regenerates a ring with a different child
//! count, and reloads the saved JSON.
//!
//! Run:
//! - `cargo run -p vsm_demos --example network_records`

use tracing_subscriber::EnvFilter;
use vsm_network::{Network, NetworkError, Tag};

fn main() -> Result<(), NetworkError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut net = Network::new();
    net.create_seed()?;
    net.add_children(Tag::SEED, 5)?;
    net.add_children("0/0/1-1", 4)?;
    net.rename("0/0/1-1", "S1 Operations")?;
    net.rename("0/0/1-2", "S2 Coordination")?;
    println!("== Grown ==\n  {} nodes", net.len());

    let hits: Vec<_> = net.search("operations").iter().map(|n| n.tag().clone()).collect();
    println!("== Search \"operations\" ==\n  {hits:?}");

    if let Some(path) = net.path_to_root("0/0/1-1-3") {
        let path: Vec<_> = path.iter().map(Tag::as_str).collect();
        println!("== Path to 0/0/1-1-3 ==\n  {}", path.join(" > "));
    }

    let removed = net.remove("0/0/1-1")?;
    println!("== Removed subtree ==\n  {removed:?}");

    net.set_child_count("0/0/1-2", 3)?;
    net.validate()?;

    let json = net.to_json()?;
    println!("== JSON ==\n{json}");

    let restored = Network::from_json(&json)?;
    assert_eq!(restored.len(), net.len());
    assert_eq!(
        restored.get("0/0/1-2").map(|n| n.name()),
        Some("S2 Coordination")
    );
    println!("== Reloaded ==\n  {} nodes", restored.len());
    Ok(())
}
