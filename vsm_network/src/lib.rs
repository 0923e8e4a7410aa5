// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! VSM Network: a tree of tagged nodes grown as nested regular polygons.
//!
//! A network starts from a single seed node (`"0/0/1"`) at the origin. Each node can spawn
//! between 3 and 12 children, which are laid out on a regular polygon around it; the
//! polygon edge shrinks with depth so deeper rings stay close to their parent.
//!
//! Nodes are addressed by their hierarchical [`Tag`] (`"0/0/1-3-2"` is the second child of
//! the third child of the seed). Internally they live in generational slots and are also
//! reachable through cheap [`NodeId`] handles that go stale when a node is removed.
//!
//! ## Editing
//!
//! - [`Network::create_seed`], [`Network::insert`]
//! - [`Network::add_children`], [`Network::set_child_count`]
//! - [`Network::remove`] (removes the whole subtree), [`Network::rename`],
//!   [`Network::set_position`], [`Network::clear`]
//!
//! ## Queries
//!
//! [`Network::get`], [`Network::is_descendant_of`], [`Network::path_to_root`],
//! [`Network::subtree`], [`Network::search`], and [`Network::spatial_entries`] for feeding a
//! spatial index.
//!
//! ## Persistence
//!
//! A network round-trips through [`NodeRecord`]s and a JSON object keyed by tag. Records
//! may arrive in any order; loading inserts parents before their children.
//!
//! # Example
//!
//! ```rust
//! use vsm_network::{Network, Tag};
//!
//! let mut net = Network::new();
//! net.create_seed().unwrap();
//! net.add_children(Tag::SEED, 6).unwrap();
//! net.add_children("0/0/1-2", 4).unwrap();
//! assert_eq!(net.len(), 1 + 6 + 4);
//!
//! assert!(net.is_descendant_of("0/0/1-2-3", Tag::SEED));
//!
//! let removed = net.remove("0/0/1-2").unwrap();
//! assert_eq!(removed.len(), 5);
//! assert_eq!(net.len(), 6);
//!
//! let json = net.to_json().unwrap();
//! let restored = vsm_network::Network::from_json(&json).unwrap();
//! assert_eq!(restored.len(), net.len());
//! ```
//!
//! ## Logging
//!
//! Structural edits emit [`tracing`] events: `info` for seed creation, growth, removal and
//! loading, `debug` per inserted node, and `warn` for dangling child references dropped
//! while loading records.

mod error;
mod geometry;
mod network;
mod record;
mod types;

pub use error::{NetworkError, NetworkResult};
pub use geometry::{edge_length, polygon_vertices};
pub use network::Network;
pub use record::NodeRecord;
pub use types::{GrowthSettings, Node, NodeId, Tag};

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn children_sit_one_edge_ring_away() {
        let mut net = Network::new();
        net.create_seed().unwrap();
        net.add_children(Tag::SEED, 4).unwrap();
        net.add_children("0/0/1-1", 3).unwrap();

        let parent = net.get("0/0/1-1").unwrap();
        let radius = edge_length(parent.layer(), net.settings()) * (1.0 + 3.0 / 12.0);
        for child in parent.children() {
            let c = net.get(child.as_str()).unwrap();
            assert_eq!(c.layer(), 2);
            assert!((c.position().distance(parent.position()) - radius).abs() < 1e-9);
        }
    }

    #[test]
    fn custom_settings_change_limits() {
        let settings = GrowthSettings {
            max_poly_order: 20,
            ..GrowthSettings::default()
        };
        let mut net = Network::with_settings(settings);
        net.create_seed().unwrap();
        assert_eq!(net.add_children(Tag::SEED, 20).unwrap().len(), 20);
    }

    #[test]
    fn records_preserve_names_and_positions() {
        let mut net = Network::new();
        net.create_seed().unwrap();
        net.add_children(Tag::SEED, 3).unwrap();
        net.rename("0/0/1-3", "Policy").unwrap();
        net.set_position("0/0/1-3", Point::new(4.0, 4.0)).unwrap();

        let restored = Network::from_records(net.to_records()).unwrap();
        let node = restored.get("0/0/1-3").unwrap();
        assert_eq!(node.name(), "Policy");
        assert_eq!(node.position(), Point::new(4.0, 4.0));
    }
}
