// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter helpers for VSM Network.
//!
//! ## Notes
//!
//! These helpers project a [`Network`] onto the view: spatial index rebuilds, the set of
//! nodes inside a viewport, and per-node visibility frames.
//! They keep network order; the spatial index query order is left to the clustering step.

use tracing::{debug, warn};
use vsm_index::{RebuildSummary, SpatialIndex};
use vsm_network::{Network, Tag};

use crate::effects::{NodeVisibility, VisibilityFrame};
use crate::viewport::{Camera, ViewportBounds};

/// Rebuild `index` from the current node positions.
///
/// Nodes outside the indexed world are left out and reported with a warning.
pub fn rebuild_index(index: &mut SpatialIndex<Tag>, network: &Network) -> RebuildSummary {
    let summary = index.rebuild(network.spatial_entries());
    if summary.rejected > 0 {
        warn!(
            rejected = summary.rejected,
            "nodes outside the world bounds were left out of the spatial index"
        );
    }
    debug!(inserted = summary.inserted, "rebuilt spatial index");
    summary
}

/// Every node, in network order.
pub fn all_tags(network: &Network) -> Vec<Tag> {
    network.tags().cloned().collect()
}

/// Nodes whose position lies inside `bounds`, in network order.
pub fn tags_in_bounds(network: &Network, bounds: &ViewportBounds) -> Vec<Tag> {
    network
        .iter()
        .filter(|n| bounds.contains(n.position()))
        .map(|n| n.tag().clone())
        .collect()
}

/// Build a full-detail visibility frame for every node.
pub fn visibility_frame(
    network: &Network,
    camera: &Camera,
    bounds: ViewportBounds,
) -> VisibilityFrame<Tag> {
    let target = camera.target();
    let nodes = network
        .iter()
        .map(|n| NodeVisibility {
            node: n.tag().clone(),
            position: n.position(),
            in_view: bounds.contains(n.position()),
            distance: n.position().distance(target),
        })
        .collect();
    VisibilityFrame {
        camera: *camera,
        bounds,
        nodes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use vsm_index::Aabb2D;

    fn network() -> Network {
        let mut net = Network::new();
        net.create_seed().unwrap();
        net.add_children(Tag::SEED, 4).unwrap();
        net
    }

    #[test]
    fn rebuild_reports_nodes_outside_the_world() {
        let mut net = network();
        net.set_position("0/0/1-1", Point::new(5000.0, 0.0)).unwrap();
        let mut index = SpatialIndex::new(Aabb2D::centered(100.0), 4);
        let summary = rebuild_index(&mut index, &net);
        assert_eq!(summary.inserted, 4);
        assert_eq!(summary.rejected, 1);
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn bounds_select_in_network_order() {
        let net = network();
        let bounds = ViewportBounds {
            min: Point::new(-0.5, -3.0),
            max: Point::new(3.0, 3.0),
        };
        let tags = tags_in_bounds(&net, &bounds);
        let tags: Vec<_> = tags.iter().map(Tag::as_str).collect();
        assert_eq!(tags, [Tag::SEED, "0/0/1-1", "0/0/1-2", "0/0/1-4"]);
    }

    #[test]
    fn frame_measures_planar_distance_to_the_target() {
        let net = network();
        let camera = Camera::default().looking_at(2.5, 0.0);
        let bounds = ViewportBounds {
            min: Point::new(0.5, -1.0),
            max: Point::new(5.0, 1.0),
        };
        let frame = visibility_frame(&net, &camera, bounds);
        assert_eq!(frame.nodes.len(), 5);
        let seed = &frame.nodes[0];
        assert!(!seed.in_view);
        assert!((seed.distance - 2.5).abs() < 1e-12);
        let first = &frame.nodes[1];
        assert!(first.in_view);
        assert!((first.distance - 0.5).abs() < 1e-9);
    }
}
