// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Child placement: regular polygons around a parent, shrinking with depth.

use core::f64::consts::TAU;

use kurbo::{Point, Vec2};

use crate::types::GrowthSettings;

/// Polygon edge length used for children of a node at `layer`.
///
/// Halves, thirds, ... the maximum edge length with each layer, never going below the
/// minimum, so deep subtrees stay tight around their parent without collapsing.
pub fn edge_length(layer: u32, settings: &GrowthSettings) -> f64 {
    let base = settings.max_edge_length / (f64::from(layer) + 1.0);
    base.max(settings.min_edge_length)
}

/// Vertices of a regular polygon of `order` corners around `center`.
///
/// The circumradius grows with the number of corners (`edge * (1 + order / 12)`) so that
/// crowded rings keep their spacing. Vertex `i` sits at angle `i * 2π / order`, starting
/// on the positive x axis and turning counter-clockwise.
pub fn polygon_vertices(center: Point, edge_length: f64, order: u32) -> Vec<Point> {
    if order == 0 {
        return Vec::new();
    }
    let radius = edge_length * (1.0 + f64::from(order) / 12.0);
    let step = TAU / f64::from(order);
    (0..order)
        .map(|i| center + Vec2::from_angle(f64::from(i) * step) * radius)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_length_shrinks_to_the_floor() {
        let s = GrowthSettings::default();
        assert_eq!(edge_length(0, &s), 1.5);
        assert_eq!(edge_length(1, &s), 0.75);
        assert_eq!(edge_length(2, &s), 0.5);
        assert_eq!(edge_length(9, &s), 0.5);
    }

    #[test]
    fn hexagon_vertices_are_equidistant() {
        let center = Point::new(2.0, -1.0);
        let verts = polygon_vertices(center, 1.5, 6);
        assert_eq!(verts.len(), 6);
        let expected = 1.5 * 1.5;
        for v in &verts {
            assert!((v.distance(center) - expected).abs() < 1e-12);
        }
        assert!((verts[0].x - (2.0 + expected)).abs() < 1e-12);
        assert!((verts[0].y + 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_order_has_no_vertices() {
        assert!(polygon_vertices(Point::ORIGIN, 1.0, 0).is_empty());
    }
}
