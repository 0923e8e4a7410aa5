// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadtree basics: insert, subdivide, and query.
//!
//! Inserts a handful of points into a small quadtree, shows how it splits, and runs a
//! few range queries including one that touches a quadrant boundary.
//!
//! Run:
//! - `cargo run -p vsm_demos --example quadtree_basics`

use vsm_index::{Aabb2D, QuadTree, Quadrant, SpatialItem};

fn main() {
    let mut qt = QuadTree::new(Aabb2D::new(0.0, 0.0, 100.0, 100.0), 2);

    let points = [
        (10.0, 10.0, "a"),
        (80.0, 20.0, "b"),
        (50.0, 50.0, "mid"),
        (90.0, 90.0, "c"),
        (100.0, 100.0, "corner"),
    ];
    for (x, y, name) in points {
        let ok = qt.insert(SpatialItem::new(x, y, name));
        println!("insert {name:>6} at ({x:>5}, {y:>5}) -> {ok}");
    }
    assert!(!qt.insert(SpatialItem::new(-1.0, 50.0, "outside")));

    let stats = qt.stats();
    println!("== Stats ==\n  {stats:?}");

    // The midpoint belongs to the north-east quadrant.
    let ne = qt.child(Quadrant::NorthEast).expect("root has split");
    assert!(ne.query(&ne.bounds()).iter().any(|i| i.payload == "mid"));

    let lower_left = qt.query(&Aabb2D::new(0.0, 0.0, 50.0, 50.0));
    let names: Vec<_> = lower_left.iter().map(|i| i.payload).collect();
    println!("== Query [0,50]x[0,50] ==\n  {names:?}");
    assert_eq!(names.len(), 2);

    let mut out = Vec::new();
    let visited = qt.query_into(&Aabb2D::new(200.0, 200.0, 300.0, 300.0), &mut out);
    println!("== Disjoint query ==\n  visited {visited} cell(s), {} hit(s)", out.len());
    assert_eq!((visited, out.len()), (1, 0));
}
