// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use core::cmp::Ordering;
use core::fmt::Debug;

/// Axis-aligned bounding box in 2D.
///
/// Both edges are inclusive: a point on `max_x`/`max_y` is inside the box.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Aabb2D<T> {
    /// Minimum x (left)
    pub min_x: T,
    /// Minimum y (bottom, y-up)
    pub min_y: T,
    /// Maximum x (right)
    pub max_x: T,
    /// Maximum y (top, y-up)
    pub max_y: T,
}

impl<T> Aabb2D<T> {
    /// Create a new AABB from min/max corners.
    pub const fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl<T: Copy + PartialOrd> Aabb2D<T> {
    /// Whether this AABB contains the point (closed on every edge).
    pub fn contains_point(&self, x: T, y: T) -> bool {
        le(self.min_x, x) && le(self.min_y, y) && le(x, self.max_x) && le(y, self.max_y)
    }

    /// Whether the two AABBs overlap. Touching edges count as overlap.
    pub fn intersects(&self, other: &Self) -> bool {
        !self.intersect(other).is_empty()
    }

    /// The intersection of two AABBs.
    pub fn intersect(&self, other: &Self) -> Self {
        let min_x = max_t(self.min_x, other.min_x);
        let min_y = max_t(self.min_y, other.min_y);
        let max_x = min_t(self.max_x, other.max_x);
        let max_y = min_t(self.max_y, other.max_y);
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Return true if the AABB is inverted (no extent on some axis). Assumes no NaN.
    ///
    /// A degenerate box with `min == max` is not empty; it still contains that point.
    pub fn is_empty(&self) -> bool {
        lt(self.max_x, self.min_x) || lt(self.max_y, self.min_y)
    }
}

impl<T: Scalar> Aabb2D<T> {
    /// Center of the box.
    pub fn center(&self) -> (T, T) {
        (
            T::mid(self.min_x, self.max_x),
            T::mid(self.min_y, self.max_y),
        )
    }

    /// Width of the box (zero when inverted).
    pub fn width(&self) -> T {
        T::max_zero(T::sub(self.max_x, self.min_x))
    }

    /// Height of the box (zero when inverted).
    pub fn height(&self) -> T {
        T::max_zero(T::sub(self.max_y, self.min_y))
    }
}

impl Aabb2D<f64> {
    /// Create an AABB from origin and size in f64.
    pub const fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + w,
            max_y: y + h,
        }
    }

    /// Create a square AABB centered on the origin spanning `[-half, half]` on both axes.
    pub const fn centered(half: f64) -> Self {
        Self {
            min_x: -half,
            min_y: -half,
            max_x: half,
            max_y: half,
        }
    }
}

/// Numeric scalar abstraction used by the quadtree.
///
/// Only what subdivision needs: a midpoint for splitting, and subtraction for extents.
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Subtract two scalar values: a - b.
    fn sub(a: Self, b: Self) -> Self;

    /// Max of the scalar value and zero.
    fn max_zero(v: Self) -> Self;

    /// Midpoint between a and b (the split line of a quadtree cell).
    fn mid(a: Self, b: Self) -> Self;
}

impl Scalar for f32 {
    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn max_zero(v: Self) -> Self {
        v.max(0.0)
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        0.5 * (a + b)
    }
}

impl Scalar for f64 {
    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn max_zero(v: Self) -> Self {
        v.max(0.0)
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        0.5 * (a + b)
    }
}

impl Scalar for i64 {
    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a.saturating_sub(b)
    }

    #[inline]
    fn max_zero(v: Self) -> Self {
        v.max(0)
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        // Average without overflow, rounding toward negative infinity.
        (a & b) + ((a ^ b) >> 1)
    }
}

/// A point-like entry stored in the spatial index.
///
/// Carries only a position and a payload (usually a node tag); the index never owns the
/// full node state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpatialItem<T, P> {
    /// X coordinate.
    pub x: T,
    /// Y coordinate.
    pub y: T,
    /// User payload.
    pub payload: P,
}

impl<T, P> SpatialItem<T, P> {
    /// Create a new item at `(x, y)`.
    pub const fn new(x: T, y: T, payload: P) -> Self {
        Self { x, y, payload }
    }
}

pub(crate) fn min_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Greater) => b,
        _ => a,
    }
}

pub(crate) fn max_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Less) => b,
        _ => a,
    }
}

pub(crate) fn le<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o != Ordering::Greater)
        .unwrap_or(false)
}

pub(crate) fn lt<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o == Ordering::Less)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment_is_closed_on_every_edge() {
        let b = Aabb2D::new(0.0, 0.0, 10.0, 10.0);
        assert!(b.contains_point(0.0, 0.0));
        assert!(b.contains_point(10.0, 10.0));
        assert!(b.contains_point(10.0, 0.0));
        assert!(!b.contains_point(10.000_001, 5.0));
        assert!(!b.contains_point(f64::NAN, 5.0), "NaN never lies inside");
    }

    #[test]
    fn touching_boxes_intersect() {
        let a = Aabb2D::new(0, 0, 10, 10);
        let b = Aabb2D::new(10, 10, 20, 20);
        let c = Aabb2D::new(11, 0, 20, 10);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn integer_midpoint_does_not_overflow() {
        assert_eq!(i64::mid(i64::MAX - 1, i64::MAX), i64::MAX - 1);
        assert_eq!(i64::mid(-3, 3), 0);
        assert_eq!(Aabb2D::new(-4_i64, -4, 4, 4).center(), (0, 0));
    }

    #[test]
    fn extents_clamp_at_zero() {
        let inverted = Aabb2D::new(5.0, 5.0, 1.0, 1.0);
        assert!(inverted.is_empty());
        assert_eq!(inverted.width(), 0.0);
        assert_eq!(Aabb2D::centered(1000.0).height(), 2000.0);
    }
}
