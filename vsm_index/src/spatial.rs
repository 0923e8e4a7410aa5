// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! World-bounded spatial index rebuilt from scratch on demand.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::quadtree::QuadTree;
use crate::types::{Aabb2D, SpatialItem};

/// Default half-extent of the indexed world: `[-1000, 1000]` on both axes.
pub const DEFAULT_WORLD_HALF_EXTENT: f64 = 1000.0;

/// Default leaf capacity of the quadtree.
pub const DEFAULT_CAPACITY: usize = 4;

/// Outcome of [`SpatialIndex::rebuild`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RebuildSummary {
    /// Entries stored in the new tree.
    pub inserted: usize,
    /// Entries dropped because they lay outside the world bounds.
    pub rejected: usize,
}

/// Owns the single authoritative quadtree of a view.
///
/// The tree is never updated in place: [`SpatialIndex::rebuild`] discards it and reinserts
/// every entry. Rebuilding is O(n log n) and is meant to run once per evaluation that needs
/// spatial grouping, not every frame.
#[derive(Clone, Debug)]
pub struct SpatialIndex<P> {
    world: Aabb2D<f64>,
    tree: QuadTree<f64, P>,
}

impl<P: Clone> Default for SpatialIndex<P> {
    fn default() -> Self {
        Self::new(
            Aabb2D::centered(DEFAULT_WORLD_HALF_EXTENT),
            DEFAULT_CAPACITY,
        )
    }
}

impl<P: Clone> SpatialIndex<P> {
    /// Create an empty index over `world` with the given leaf capacity.
    pub fn new(world: Aabb2D<f64>, capacity: usize) -> Self {
        Self {
            world,
            tree: QuadTree::new(world, capacity),
        }
    }

    /// Bounds of the indexed world.
    pub fn world_bounds(&self) -> Aabb2D<f64> {
        self.world
    }

    /// Leaf capacity of the underlying tree.
    pub fn capacity(&self) -> usize {
        self.tree.capacity()
    }

    /// Number of indexed entries.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// True if nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Read access to the underlying tree.
    pub fn tree(&self) -> &QuadTree<f64, P> {
        &self.tree
    }

    /// Replace the contents of the index with `entries` given as `(payload, x, y)`.
    pub fn rebuild<I>(&mut self, entries: I) -> RebuildSummary
    where
        I: IntoIterator<Item = (P, f64, f64)>,
    {
        self.tree.clear();
        let mut summary = RebuildSummary::default();
        for (payload, x, y) in entries {
            if self.tree.insert(SpatialItem::new(x, y, payload)) {
                summary.inserted += 1;
            } else {
                summary.rejected += 1;
            }
        }
        summary
    }

    /// Entries whose position lies within `bounds`.
    pub fn query(&self, bounds: &Aabb2D<f64>) -> Vec<SpatialItem<f64, P>> {
        self.tree.query(bounds)
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.tree.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn default_world_and_capacity() {
        let idx: SpatialIndex<u32> = SpatialIndex::default();
        assert_eq!(idx.world_bounds(), Aabb2D::new(-1000.0, -1000.0, 1000.0, 1000.0));
        assert_eq!(idx.capacity(), 4);
        assert!(idx.is_empty());
    }

    #[test]
    fn rebuild_discards_previous_contents() {
        let mut idx = SpatialIndex::default();
        let first = idx.rebuild((0..20_u32).map(|i| (i, f64::from(i), 0.0)));
        assert_eq!(first.inserted, 20);
        assert!(idx.tree().is_subdivided());

        let second = idx.rebuild([(100_u32, 1.0, 1.0), (101, 2.0, 2.0)]);
        assert_eq!(second, RebuildSummary { inserted: 2, rejected: 0 });
        assert_eq!(idx.len(), 2);
        assert!(!idx.tree().is_subdivided(), "rebuild starts from an empty leaf");
    }

    #[test]
    fn rebuild_counts_out_of_world_entries() {
        let mut idx = SpatialIndex::new(Aabb2D::centered(10.0), 4);
        let summary = idx.rebuild([(1_u8, 0.0, 0.0), (2, 11.0, 0.0), (3, -10.0, 10.0)]);
        assert_eq!(summary.inserted, 2);
        assert_eq!(summary.rejected, 1);
    }

    #[test]
    fn query_filters_by_bounds() {
        let mut idx = SpatialIndex::default();
        idx.rebuild([("a", 0.0, 0.0), ("b", 5.0, 5.0), ("c", -5.0, 2.0)]);
        let mut hits: Vec<_> = idx
            .query(&Aabb2D::new(-1.0, -1.0, 5.0, 5.0))
            .into_iter()
            .map(|it| it.payload)
            .collect();
        hits.sort_unstable();
        assert_eq!(hits, ["a", "b"]);
        assert!(idx.query(&Aabb2D::new(50.0, 50.0, 60.0, 60.0)).is_empty());
    }

    #[test]
    fn empty_index_queries_empty() {
        let mut idx: SpatialIndex<u32> = SpatialIndex::default();
        let summary = idx.rebuild(core::iter::empty());
        assert_eq!(summary, RebuildSummary::default());
        assert!(idx.query(&idx.world_bounds()).is_empty());
    }
}
