// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual side effects of level-of-detail changes.
//!
//! The view core decides *when* the scene must change; a [`LodEffects`] implementation
//! decides *how*. Renderers implement the trait against their own scene graph.
//! [`SceneState`] is an in-memory implementation that records the resulting visual state
//! per node, for headless use and tests.

use std::collections::HashMap;

use kurbo::Point;
use vsm_network::Tag;

use crate::cluster::Cluster;
use crate::lod::LodLevel;
use crate::viewport::{Camera, ViewportBounds};

/// Per-node input to a full-detail visibility pass.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeVisibility<P> {
    /// The node.
    pub node: P,
    /// Node position on the scene plane.
    pub position: Point,
    /// Whether the node lies inside the padded viewport.
    pub in_view: bool,
    /// Planar distance from the node to the point under the camera.
    pub distance: f64,
}

/// Everything a full-detail visibility pass needs, for one evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct VisibilityFrame<P> {
    /// Camera the frame was computed for.
    pub camera: Camera,
    /// Padded viewport.
    pub bounds: ViewportBounds,
    /// Every node, in network order.
    pub nodes: Vec<NodeVisibility<P>>,
}

/// Callbacks applying level-of-detail changes to a scene.
///
/// The `apply_*` methods are called once per level change, with every node of the network
/// (or every node left outside a cluster). [`update_visibility`](Self::update_visibility)
/// is called on each evaluation while the view is at [`LodLevel::Full`].
pub trait LodEffects<P> {
    /// Show every node in full detail and drop any clusters.
    fn apply_full(&mut self, nodes: &[P]);

    /// Show every node in simplified form and drop any clusters.
    fn apply_medium(&mut self, nodes: &[P]);

    /// Replace the previous clusters with `clusters`, hide their members, and show the
    /// `remainder` in simplified form.
    fn apply_clustered(&mut self, clusters: &[Cluster<P>], remainder: &[P]);

    /// Adjust per-node visibility and scale for the current camera.
    fn update_visibility(&mut self, frame: &VisibilityFrame<P>) {
        let _ = frame;
    }
}

bitflags::bitflags! {
    /// Which parts of a node are shown.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct VisualFlags: u8 {
        /// The node body.
        const MESH       = 0b0000_0001;
        /// The text label.
        const LABEL      = 0b0000_0010;
        /// The line to the parent.
        const CONNECTION = 0b0000_0100;
    }
}

/// Recorded visual state of one node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NodeVisual {
    /// Shown parts.
    pub flags: VisualFlags,
    /// Body scale.
    pub scale: f64,
    /// Label scale.
    pub label_scale: f64,
    /// Opacity of the line to the parent.
    pub connection_opacity: f64,
}

impl NodeVisual {
    /// Everything shown at natural size.
    pub const FULL: Self = Self {
        flags: VisualFlags::all(),
        scale: 1.0,
        label_scale: 1.0,
        connection_opacity: 1.0,
    };

    /// Simplified: smaller body, no label.
    pub const SIMPLIFIED: Self = Self {
        flags: VisualFlags::MESH.union(VisualFlags::CONNECTION),
        scale: 0.7,
        label_scale: 1.0,
        connection_opacity: 1.0,
    };

    /// Not shown at all.
    pub const HIDDEN: Self = Self {
        flags: VisualFlags::empty(),
        scale: 1.0,
        label_scale: 1.0,
        connection_opacity: 1.0,
    };

    /// Full-detail visual for a node at `distance` from the camera target.
    ///
    /// Nodes outside the viewport are hidden. Inside it, the body shrinks to 30% at
    /// distance 20, the label is only shown closer than 10 and shrinks to 20% at 15, and
    /// the connection fades to 10% opacity at 15.
    pub fn at_distance(in_view: bool, distance: f64) -> Self {
        if !in_view {
            return Self::HIDDEN;
        }
        let mut flags = VisualFlags::MESH | VisualFlags::CONNECTION;
        flags.set(VisualFlags::LABEL, distance < 10.0);
        Self {
            flags,
            scale: (1.0 - distance / 20.0).max(0.3),
            label_scale: (1.0 - distance / 15.0).max(0.2),
            connection_opacity: (1.0 - distance / 15.0).max(0.1),
        }
    }

    /// True if the node body is shown.
    pub fn is_visible(&self) -> bool {
        self.flags.contains(VisualFlags::MESH)
    }
}

/// A cluster as recorded by [`SceneState`].
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterVisual {
    /// Where the cluster marker sits.
    pub centroid: Point,
    /// Count label, e.g. `"12 nodes"`.
    pub label: String,
    /// Member tags.
    pub members: Vec<Tag>,
}

/// In-memory scene recording the effect of every callback.
#[derive(Clone, Debug, Default)]
pub struct SceneState {
    visuals: HashMap<Tag, NodeVisual>,
    clusters: Vec<ClusterVisual>,
    level: Option<LodLevel>,
    applied: usize,
}

impl SceneState {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded visual of a node, if any callback touched it.
    pub fn visual(&self, tag: &str) -> Option<&NodeVisual> {
        self.visuals.get(tag)
    }

    /// Current cluster markers.
    pub fn clusters(&self) -> &[ClusterVisual] {
        &self.clusters
    }

    /// Level of the last `apply_*` call.
    pub fn level(&self) -> Option<LodLevel> {
        self.level
    }

    /// Number of `apply_*` calls so far.
    pub fn applied(&self) -> usize {
        self.applied
    }

    /// Number of nodes whose body is shown.
    pub fn visible_count(&self) -> usize {
        self.visuals.values().filter(|v| v.is_visible()).count()
    }

    fn set_all(&mut self, nodes: &[Tag], visual: NodeVisual) {
        for tag in nodes {
            self.visuals.insert(tag.clone(), visual);
        }
    }
}

impl LodEffects<Tag> for SceneState {
    fn apply_full(&mut self, nodes: &[Tag]) {
        self.clusters.clear();
        self.set_all(nodes, NodeVisual::FULL);
        self.level = Some(LodLevel::Full);
        self.applied += 1;
    }

    fn apply_medium(&mut self, nodes: &[Tag]) {
        self.clusters.clear();
        self.set_all(nodes, NodeVisual::SIMPLIFIED);
        self.level = Some(LodLevel::Medium);
        self.applied += 1;
    }

    fn apply_clustered(&mut self, clusters: &[Cluster<Tag>], remainder: &[Tag]) {
        self.clusters.clear();
        for cluster in clusters {
            self.set_all(&cluster.members, NodeVisual::HIDDEN);
            self.clusters.push(ClusterVisual {
                centroid: cluster.centroid,
                label: cluster.label(),
                members: cluster.members.clone(),
            });
        }
        self.set_all(remainder, NodeVisual::SIMPLIFIED);
        self.level = Some(LodLevel::Low);
        self.applied += 1;
    }

    fn update_visibility(&mut self, frame: &VisibilityFrame<Tag>) {
        for n in &frame.nodes {
            self.visuals
                .insert(n.node.clone(), NodeVisual::at_distance(n.in_view, n.distance));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_scaling_clamps() {
        let near = NodeVisual::at_distance(true, 0.0);
        assert_eq!(near.flags, VisualFlags::all());
        assert_eq!(near.scale, 1.0);

        let mid = NodeVisual::at_distance(true, 10.0);
        assert!(!mid.flags.contains(VisualFlags::LABEL));
        assert!((mid.scale - 0.5).abs() < 1e-12);
        assert!((mid.connection_opacity - (1.0 - 10.0 / 15.0)).abs() < 1e-12);

        let far = NodeVisual::at_distance(true, 50.0);
        assert_eq!(far.scale, 0.3);
        assert_eq!(far.label_scale, 0.2);
        assert_eq!(far.connection_opacity, 0.1);

        assert_eq!(NodeVisual::at_distance(false, 0.0), NodeVisual::HIDDEN);
    }

    #[test]
    fn clustered_hides_members_and_simplifies_the_rest() {
        let mut scene = SceneState::new();
        let cluster = Cluster {
            centroid: Point::new(1.0, 1.0),
            members: vec![Tag::from("a"), Tag::from("b")],
        };
        scene.apply_clustered(&[cluster], &[Tag::from("c")]);
        assert_eq!(scene.level(), Some(LodLevel::Low));
        assert_eq!(scene.clusters().len(), 1);
        assert_eq!(scene.clusters()[0].label, "2 nodes");
        assert!(!scene.visual("a").unwrap().is_visible());
        assert_eq!(scene.visual("c"), Some(&NodeVisual::SIMPLIFIED));
        assert_eq!(scene.visible_count(), 1);

        scene.apply_full(&[Tag::from("a"), Tag::from("b"), Tag::from("c")]);
        assert!(scene.clusters().is_empty());
        assert_eq!(scene.visible_count(), 3);
        assert_eq!(scene.applied(), 2);
    }
}
