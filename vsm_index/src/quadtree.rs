// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point quadtree with lazy subdivision and rectangle queries.
//!
//! ## Boundary policy
//!
//! Every cell splits at its midpoint into NW, NE, SW, SE (y-up). The split is half-open:
//! a point goes east iff `x >= mid_x` and north iff `y >= mid_y`. A point exactly on the
//! midpoint therefore always lands in [`Quadrant::NorthEast`], and a point on any shared
//! edge is stored exactly once. The outer edges of the root are closed, so the root
//! accepts points lying on its `max_x`/`max_y` edges.
//!
//! Queries use the same closed containment test as [`Aabb2D::contains_point`] and prune
//! only at node entry, so an item on the edge of a query box is never missed.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::types::{Aabb2D, Scalar, SpatialItem, le};

/// Deepest level a cell may be split to. Leaves at this depth accept items beyond capacity,
/// which keeps coincident points from splitting forever.
pub const MAX_DEPTH: usize = 32;

/// One of the four children of an internal cell, in storage order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// `x < mid_x`, `y >= mid_y`.
    NorthWest = 0,
    /// `x >= mid_x`, `y >= mid_y`.
    NorthEast = 1,
    /// `x < mid_x`, `y < mid_y`.
    SouthWest = 2,
    /// `x >= mid_x`, `y < mid_y`.
    SouthEast = 3,
}

impl Quadrant {
    /// All quadrants in storage order.
    pub const ALL: [Self; 4] = [
        Self::NorthWest,
        Self::NorthEast,
        Self::SouthWest,
        Self::SouthEast,
    ];

    /// Select the quadrant of a cell split at `(mid_x, mid_y)` that owns `(x, y)`.
    pub fn of<T: PartialOrd>(x: T, y: T, mid_x: T, mid_y: T) -> Self {
        let east = le(mid_x, x);
        let north = le(mid_y, y);
        match (north, east) {
            (true, false) => Self::NorthWest,
            (true, true) => Self::NorthEast,
            (false, false) => Self::SouthWest,
            (false, true) => Self::SouthEast,
        }
    }

    /// Bounds of this quadrant within `parent`.
    pub fn bounds_in<T: Scalar>(self, parent: &Aabb2D<T>) -> Aabb2D<T> {
        let (mx, my) = parent.center();
        match self {
            Self::NorthWest => Aabb2D::new(parent.min_x, my, mx, parent.max_y),
            Self::NorthEast => Aabb2D::new(mx, my, parent.max_x, parent.max_y),
            Self::SouthWest => Aabb2D::new(parent.min_x, parent.min_y, mx, my),
            Self::SouthEast => Aabb2D::new(mx, parent.min_y, parent.max_x, my),
        }
    }
}

/// State of a cell: either it holds items, or it has exactly four children.
#[derive(Clone, Debug)]
enum Cell<T, P> {
    Leaf(Vec<SpatialItem<T, P>>),
    Internal(Box<[QuadTree<T, P>; 4]>),
}

/// A point quadtree over a fixed rectangle.
///
/// Leaves hold up to `capacity` items. Inserting into a full leaf splits it once into four
/// quadrants and redistributes the held items; the split is only undone by [`QuadTree::clear`].
#[derive(Clone, Debug)]
pub struct QuadTree<T, P> {
    bounds: Aabb2D<T>,
    capacity: usize,
    depth: usize,
    cell: Cell<T, P>,
}

/// Shape summary of a quadtree, see [`QuadTree::stats`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct QuadTreeStats {
    /// Total number of cells (internal and leaf).
    pub node_count: usize,
    /// Number of leaf cells.
    pub leaf_count: usize,
    /// Number of stored items.
    pub item_count: usize,
    /// Depth of the deepest cell (root is 0).
    pub max_depth: usize,
    /// Largest item count held by a single leaf.
    pub max_leaf_items: usize,
}

impl<T: Scalar, P: Clone> QuadTree<T, P> {
    /// Create an empty tree covering `bounds`. A `capacity` of zero is treated as one.
    pub fn new(bounds: Aabb2D<T>, capacity: usize) -> Self {
        Self::with_depth(bounds, capacity.max(1), 0)
    }

    fn with_depth(bounds: Aabb2D<T>, capacity: usize, depth: usize) -> Self {
        Self {
            bounds,
            capacity,
            depth,
            cell: Cell::Leaf(Vec::new()),
        }
    }

    /// Bounds covered by this cell.
    pub fn bounds(&self) -> Aabb2D<T> {
        self.bounds
    }

    /// Leaf capacity shared by every cell of the tree.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether this cell has been split into quadrants.
    pub fn is_subdivided(&self) -> bool {
        matches!(self.cell, Cell::Internal(_))
    }

    /// Items held directly by this cell. Always empty for an internal cell.
    pub fn items(&self) -> &[SpatialItem<T, P>] {
        match &self.cell {
            Cell::Leaf(items) => items,
            Cell::Internal(_) => &[],
        }
    }

    /// The four children in [`Quadrant::ALL`] order, if subdivided.
    pub fn children(&self) -> Option<&[Self; 4]> {
        match &self.cell {
            Cell::Leaf(_) => None,
            Cell::Internal(children) => Some(children),
        }
    }

    /// Child for a given quadrant, if subdivided.
    pub fn child(&self, quadrant: Quadrant) -> Option<&Self> {
        self.children().map(|c| &c[quadrant as usize])
    }

    /// Number of items stored in this subtree.
    pub fn len(&self) -> usize {
        match &self.cell {
            Cell::Leaf(items) => items.len(),
            Cell::Internal(children) => children.iter().map(Self::len).sum(),
        }
    }

    /// True if no items are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert an item. Returns `false`, leaving the tree untouched, if the item lies
    /// outside this cell's bounds.
    pub fn insert(&mut self, item: SpatialItem<T, P>) -> bool {
        if !self.bounds.contains_point(item.x, item.y) {
            return false;
        }
        if let Cell::Leaf(items) = &mut self.cell
            && (items.len() < self.capacity || self.depth >= MAX_DEPTH)
        {
            items.push(item);
            return true;
        }
        if !self.is_subdivided() {
            self.subdivide();
        }
        self.insert_into_children(item)
    }

    fn insert_into_children(&mut self, item: SpatialItem<T, P>) -> bool {
        let (mx, my) = self.bounds.center();
        let quadrant = Quadrant::of(item.x, item.y, mx, my);
        match &mut self.cell {
            Cell::Internal(children) => children[quadrant as usize].insert(item),
            Cell::Leaf(_) => false,
        }
    }

    fn subdivide(&mut self) {
        let depth = self.depth + 1;
        let children = Quadrant::ALL
            .map(|q| Self::with_depth(q.bounds_in(&self.bounds), self.capacity, depth));
        let held = match core::mem::replace(&mut self.cell, Cell::Internal(Box::new(children))) {
            Cell::Leaf(items) => items,
            Cell::Internal(_) => return,
        };
        for item in held {
            let accepted = self.insert_into_children(item);
            debug_assert!(accepted, "an item inside the parent must fit one quadrant");
        }
    }

    /// Collect every item whose position lies within `range`.
    pub fn query(&self, range: &Aabb2D<T>) -> Vec<SpatialItem<T, P>> {
        let mut out = Vec::new();
        self.query_into(range, &mut out);
        out
    }

    /// Append every item within `range` to `out`. Returns the number of cells entered.
    ///
    /// A cell whose bounds do not touch `range` is entered (counted) but not descended.
    pub fn query_into(&self, range: &Aabb2D<T>, out: &mut Vec<SpatialItem<T, P>>) -> usize {
        if !self.bounds.intersects(range) {
            return 1;
        }
        match &self.cell {
            Cell::Leaf(items) => {
                out.extend(
                    items
                        .iter()
                        .filter(|it| range.contains_point(it.x, it.y))
                        .cloned(),
                );
                1
            }
            Cell::Internal(children) => {
                1 + children
                    .iter()
                    .map(|c| c.query_into(range, out))
                    .sum::<usize>()
            }
        }
    }

    /// Drop every item and subtree, leaving an empty leaf.
    pub fn clear(&mut self) {
        self.cell = Cell::Leaf(Vec::new());
    }

    /// Summarize the shape of this subtree.
    pub fn stats(&self) -> QuadTreeStats {
        let mut stats = QuadTreeStats::default();
        self.collect_stats(&mut stats);
        stats
    }

    fn collect_stats(&self, stats: &mut QuadTreeStats) {
        stats.node_count += 1;
        stats.max_depth = stats.max_depth.max(self.depth);
        match &self.cell {
            Cell::Leaf(items) => {
                stats.leaf_count += 1;
                stats.item_count += items.len();
                stats.max_leaf_items = stats.max_leaf_items.max(items.len());
            }
            Cell::Internal(children) => {
                for c in children.iter() {
                    c.collect_stats(stats);
                }
            }
        }
    }
}
