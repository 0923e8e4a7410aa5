// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the network: tags, node identifiers, nodes, and growth settings.

use core::borrow::Borrow;
use core::fmt;

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Hierarchical node identifier.
///
/// A tag encodes the ancestry of a node: the seed is `"0/0/1"`, its children are
/// `"0/0/1-1"`, `"0/0/1-2"`, ..., and their children append another `-k` segment.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    /// Tag of the seed node.
    pub const SEED: &'static str = "0/0/1";

    /// Wrap a string as a tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Tag of the `k`-th (1-based) child of this node.
    pub fn child(&self, k: u32) -> Self {
        Self(format!("{}-{k}", self.0))
    }
}

impl Borrow<str> for Tag {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Tag {
    fn from(tag: &str) -> Self {
        Self(tag.to_owned())
    }
}

impl From<String> for Tag {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

/// Identifier for a node slot in the network.
///
/// This is a small, copyable handle that stays stable while the node lives but becomes
/// invalid when the node is removed.
/// It consists of a slot index and a generation counter.
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to it is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// Use [`Network::is_alive`](crate::Network::is_alive) to check liveness. Tags are the
/// stable public identity of a node; ids are cheap handles for hot paths.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// A node of the network.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub(crate) tag: Tag,
    pub(crate) name: String,
    pub(crate) position: Point,
    pub(crate) layer: u32,
    pub(crate) poly_order: u32,
    pub(crate) parent: Option<Tag>,
    pub(crate) children: Vec<Tag>,
}

impl Node {
    /// Unique hierarchical tag.
    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// Display name; defaults to the tag.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position in the scene plane.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Depth in the tree; the seed is layer 0.
    pub fn layer(&self) -> u32 {
        self.layer
    }

    /// Branching factor used to place this node's children.
    pub fn poly_order(&self) -> u32 {
        self.poly_order
    }

    /// Parent tag, `None` for a root.
    pub fn parent(&self) -> Option<&Tag> {
        self.parent.as_ref()
    }

    /// Child tags in placement order.
    pub fn children(&self) -> &[Tag] {
        &self.children
    }
}

/// Parameters controlling how children are placed around their parent.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthSettings {
    /// Smallest polygon edge length, reached at deep layers.
    pub min_edge_length: f64,
    /// Edge length used around the seed (layer 0).
    pub max_edge_length: f64,
    /// Fewest children a node may spawn at once.
    pub min_poly_order: u32,
    /// Most children a node may spawn at once.
    pub max_poly_order: u32,
    /// Polygon order assigned to the seed and to freshly created nodes.
    pub seed_poly_order: u32,
}

impl Default for GrowthSettings {
    fn default() -> Self {
        Self {
            min_edge_length: 0.5,
            max_edge_length: 1.5,
            min_poly_order: 3,
            max_poly_order: 12,
            seed_poly_order: 6,
        }
    }
}
