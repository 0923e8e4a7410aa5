// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Camera description and the world-space region it sees.

use kurbo::{Point, Rect};
use vsm_index::Aabb2D;

/// Default vertical field of view, in degrees.
pub const DEFAULT_FOV_DEGREES: f64 = 60.0;

/// Default distance from the camera to the scene plane.
pub const DEFAULT_DISTANCE: f64 = 5.0;

/// Default padding added around the visible region, as a fraction of its larger side.
pub const DEFAULT_PADDING_RATIO: f64 = 0.1;

/// A perspective camera looking straight down at the scene plane.
///
/// `(x, y)` is the point on the plane under the camera and `distance` its height above
/// it; this is also the value level-of-detail decisions are made on.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    /// Plane x coordinate under the camera.
    pub x: f64,
    /// Plane y coordinate under the camera.
    pub y: f64,
    /// Distance from the plane. Expected to be positive.
    pub distance: f64,
    /// Vertical field of view in radians, expected in `(0, π)`.
    pub fov_y: f64,
    /// Width divided by height of the view.
    pub aspect: f64,
}

impl Camera {
    /// A camera above the origin at the default distance.
    pub fn perspective(fov_degrees: f64, aspect: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            distance: DEFAULT_DISTANCE,
            fov_y: fov_degrees.to_radians(),
            aspect,
        }
    }

    /// Same camera moved to `distance`.
    #[must_use]
    pub fn at_distance(mut self, distance: f64) -> Self {
        self.distance = distance;
        self
    }

    /// Same camera moved over `(x, y)`.
    #[must_use]
    pub fn looking_at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Plane point under the camera.
    pub fn target(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::perspective(DEFAULT_FOV_DEGREES, 1.0)
    }
}

/// Axis-aligned world box seen by the camera (inclusive on all edges).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewportBounds {
    /// Lower-left corner.
    pub min: Point,
    /// Upper-right corner.
    pub max: Point,
}

impl ViewportBounds {
    /// Horizontal extent.
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Vertical extent.
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Centre of the box.
    pub fn center(&self) -> Point {
        self.min.midpoint(self.max)
    }

    /// Returns true if `p` lies inside or on the edge of the box.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// The box as a spatial index query range.
    pub fn to_aabb(&self) -> Aabb2D<f64> {
        Aabb2D::new(self.min.x, self.min.y, self.max.x, self.max.y)
    }

    /// The box as a kurbo rectangle.
    pub fn to_rect(&self) -> Rect {
        Rect::from_points(self.min, self.max)
    }
}

/// Computes the padded visible region of a [`Camera`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewportCalculator {
    padding_ratio: f64,
}

impl Default for ViewportCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_PADDING_RATIO)
    }
}

impl ViewportCalculator {
    /// Create a calculator padding each side by `padding_ratio · max(width, height)`.
    pub fn new(padding_ratio: f64) -> Self {
        Self { padding_ratio }
    }

    /// Padding ratio in use.
    pub fn padding_ratio(&self) -> f64 {
        self.padding_ratio
    }

    /// Visible region of `camera` on the scene plane, padded on every side.
    ///
    /// The unpadded height is `2 · tan(fov_y / 2) · |distance|` and the width is
    /// `height · aspect`, centred under the camera. Padding lets nodes just outside the
    /// frame stay grouped and visible while panning.
    pub fn bounds(&self, camera: &Camera) -> ViewportBounds {
        let height = 2.0 * (camera.fov_y / 2.0).tan() * camera.distance.abs();
        let width = height * camera.aspect;
        let pad = self.padding_ratio * width.max(height);
        let half_w = width / 2.0 + pad;
        let half_h = height / 2.0 + pad;
        ViewportBounds {
            min: Point::new(camera.x - half_w, camera.y - half_h),
            max: Point::new(camera.x + half_w, camera.y + half_h),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn sixty_degree_camera_at_ten() {
        let camera = Camera::default().at_distance(10.0);
        let bounds = ViewportCalculator::default().bounds(&camera);
        let height = 2.0 * (30.0_f64).to_radians().tan() * 10.0;
        let pad = 0.1 * height;
        assert!((height - 11.547_005_383_792_516).abs() < EPS);
        assert!((bounds.height() - (height + 2.0 * pad)).abs() < EPS);
        assert!((bounds.width() - bounds.height()).abs() < EPS);
        assert!((bounds.min.x + height / 2.0 + pad).abs() < EPS);
        assert!((bounds.max.y - height / 2.0 - pad).abs() < EPS);
    }

    #[test]
    fn wide_aspect_pads_by_the_longer_side() {
        let camera = Camera::perspective(60.0, 2.0).at_distance(10.0);
        let bounds = ViewportCalculator::new(0.0).bounds(&camera);
        let padded = ViewportCalculator::default().bounds(&camera);
        assert!((bounds.width() - 2.0 * bounds.height()).abs() < EPS);
        let pad = (padded.width() - bounds.width()) / 2.0;
        assert!((pad - 0.1 * bounds.width()).abs() < EPS);
        assert!(((padded.height() - bounds.height()) / 2.0 - pad).abs() < EPS);
    }

    #[test]
    fn bounds_follow_the_camera_and_ignore_distance_sign() {
        let calc = ViewportCalculator::default();
        let a = calc.bounds(&Camera::default().looking_at(3.0, -4.0));
        assert!((a.center().x - 3.0).abs() < EPS);
        assert!((a.center().y + 4.0).abs() < EPS);
        let b = calc.bounds(&Camera::default().looking_at(3.0, -4.0).at_distance(-5.0));
        assert_eq!(a, b);
    }

    #[test]
    fn extents_are_non_negative_for_positive_distance() {
        let calc = ViewportCalculator::default();
        for fov in [1.0, 30.0, 60.0, 120.0, 179.0] {
            for distance in [1e-6, 0.5, 5.0, 500.0] {
                let b = calc.bounds(&Camera::perspective(fov, 1.5).at_distance(distance));
                assert!(b.width() >= 0.0 && b.height() >= 0.0, "fov {fov} distance {distance}");
            }
        }
    }

    #[test]
    fn conversions_and_containment() {
        let bounds = ViewportBounds {
            min: Point::new(-1.0, -2.0),
            max: Point::new(1.0, 2.0),
        };
        assert!(bounds.contains(Point::new(1.0, 2.0)));
        assert!(!bounds.contains(Point::new(1.0 + EPS, 0.0)));
        assert_eq!(bounds.to_aabb(), Aabb2D::new(-1.0, -2.0, 1.0, 2.0));
        assert_eq!(bounds.to_rect(), Rect::new(-1.0, -2.0, 1.0, 2.0));
    }
}
