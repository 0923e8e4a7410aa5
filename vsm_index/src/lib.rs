// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! VSM Index: a point quadtree and a world-bounded spatial index.
//!
//! VSM Index is the spatial building block of the VSM network view.
//!
//! - [`QuadTree`] stores point-like [`SpatialItem`]s, splits a leaf into four quadrants
//!   once it overflows, and answers rectangle queries.
//! - [`SpatialIndex`] owns one quadtree over fixed world bounds and is rebuilt from the
//!   current node positions whenever spatial grouping is needed.
//!
//! It is generic over the scalar type `T` and does not depend on any geometry crate.
//! Higher layers project their nodes to `(payload, x, y)` and feed them here.
//!
//! # Example
//!
//! ```rust
//! use vsm_index::{Aabb2D, QuadTree, SpatialItem};
//!
//! let mut qt = QuadTree::new(Aabb2D::new(0.0, 0.0, 100.0, 100.0), 4);
//! assert!(qt.insert(SpatialItem::new(10.0, 10.0, "a")));
//! assert!(qt.insert(SpatialItem::new(75.0, 60.0, "b")));
//! assert!(!qt.insert(SpatialItem::new(150.0, 0.0, "outside")));
//!
//! let hits = qt.query(&Aabb2D::new(0.0, 0.0, 50.0, 50.0));
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].payload, "a");
//! ```
//!
//! Rebuilding the world index from node positions:
//!
//! ```rust
//! use vsm_index::{Aabb2D, SpatialIndex};
//!
//! let mut idx = SpatialIndex::default();
//! let summary = idx.rebuild([("0/0/1", 0.0, 0.0), ("0/0/1-1", 1.5, 0.0)]);
//! assert_eq!(summary.inserted, 2);
//!
//! let near_origin = idx.query(&Aabb2D::new(-1.0, -1.0, 1.0, 1.0));
//! assert_eq!(near_origin.len(), 1);
//! ```
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for floating-point coordinates. A NaN position is never
//! contained in any box, so inserting one is rejected like any other out-of-bounds point.

#![no_std]

extern crate alloc;

pub mod quadtree;
pub mod spatial;
pub mod types;

pub use quadtree::{MAX_DEPTH, QuadTree, QuadTreeStats, Quadrant};
pub use spatial::{RebuildSummary, SpatialIndex};
pub use types::{Aabb2D, Scalar, SpatialItem};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_positions_are_rejected() {
        let mut idx: SpatialIndex<u8> = SpatialIndex::default();
        let summary = idx.rebuild([(1, f64::NAN, 0.0), (2, 0.0, 0.0)]);
        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.rejected, 1);
    }
}
