// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Bounding sphere

use super::{BoundingBox, Plane3D, Triangle3D, Vector3};
use serde::{Deserialize, Serialize};

/// Sphere `|p - center| = radius`. A radius `<= 0` denotes an empty sphere.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Vector3,
    pub radius: f64,
}

impl Sphere {
    pub fn new(center: Vector3, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Conservative bound: centered on the points' bounding box, radius
    /// reaching the farthest point. Not the minimal enclosing sphere.
    pub fn from_points(points: &[Vector3]) -> Self {
        if points.is_empty() {
            return Self::default();
        }
        let center = BoundingBox::from_points(points).center();
        let radius = points
            .iter()
            .map(|p| center.distance_squared(p))
            .fold(0.0_f64, f64::max)
            .sqrt();
        Self { center, radius }
    }

    /// Same as `from_points` over a flat coordinate buffer; a trailing partial triple is ignored.
    pub fn from_coordinates(coordinates: &[f64]) -> Self {
        let points: Vec<Vector3> = coordinates
            .chunks_exact(3)
            .map(|c| Vector3::new(c[0], c[1], c[2]))
            .collect();
        Self::from_points(&points)
    }

    /// Sphere through the corners of `bbox`
    pub fn from_box(bbox: &BoundingBox) -> Self {
        if bbox.is_empty() {
            return Self::default();
        }
        Self {
            center: bbox.center(),
            radius: bbox.size().length() * 0.5,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.radius <= 0.0
    }

    pub fn contains_point(&self, point: &Vector3) -> bool {
        point.distance_squared(&self.center) <= self.radius * self.radius
    }

    /// Signed distance to the surface, negative inside
    pub fn distance_to_point(&self, point: &Vector3) -> f64 {
        point.distance(&self.center) - self.radius
    }

    /// Nearest point of the solid ball
    pub fn clamp_point(&self, point: &Vector3) -> Vector3 {
        if self.contains_point(point) {
            return *point;
        }
        self.center + (*point - self.center).normalize(self.radius)
    }

    pub fn bounding_box(&self) -> BoundingBox {
        if self.is_empty() {
            return BoundingBox::empty();
        }
        BoundingBox::from_center_and_size(
            self.center,
            Vector3::new(self.radius, self.radius, self.radius) * 2.0,
        )
    }

    pub fn translate(&mut self, offset: &Vector3) -> &mut Self {
        self.center.add_mut(offset);
        self
    }

    pub fn intersects_box(&self, bbox: &BoundingBox) -> bool {
        bbox.intersects_sphere(self)
    }

    pub fn intersects_plane(&self, plane: &Plane3D) -> bool {
        plane.distance_with_point(&self.center).abs() <= self.radius
    }

    pub fn intersects_sphere(&self, sphere: &Sphere) -> bool {
        let reach = self.radius + sphere.radius;
        self.center.distance_squared(&sphere.center) <= reach * reach
    }

    pub fn intersects_triangle(&self, triangle: &Triangle3D) -> bool {
        triangle
            .closest_point_with_point(&self.center)
            .distance_squared(&self.center)
            <= self.radius * self.radius
    }

    /// Ray cast against the sphere surface.
    ///
    /// Returns `0` when `origin` is inside, otherwise the smallest
    /// non-negative root along `direction` (in units of its length), or `-1`
    /// on a miss. `out_normal` receives the outward surface normal on a hit
    /// from outside.
    pub fn ray_intersection(
        &self,
        origin: &Vector3,
        direction: &Vector3,
        out_normal: &mut Vector3,
    ) -> f64 {
        if self.is_empty() {
            return -1.0;
        }

        let offset = *origin - self.center;
        let c = offset.length_squared() - self.radius * self.radius;
        if c <= 0.0 {
            return 0.0;
        }

        let a = direction.length_squared();
        if a == 0.0 {
            return -1.0;
        }
        let b = 2.0 * direction.dot(&offset);
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return -1.0;
        }

        let sqrt_d = discriminant.sqrt();
        let near = (-b - sqrt_d) / (2.0 * a);
        let far = (-b + sqrt_d) / (2.0 * a);
        let t = if near >= 0.0 {
            near
        } else if far >= 0.0 {
            far
        } else {
            return -1.0;
        };

        let hit = *origin + *direction * t;
        *out_normal = (hit - self.center) / self.radius;
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::DEFAULT_PRECISION;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_points_bounds_every_point() {
        let points = [
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(-3.0, 2.0, 1.0),
            Vector3::new(0.0, -4.0, 5.0),
        ];
        let sphere = Sphere::from_points(&points);
        for p in &points {
            assert!(sphere.distance_to_point(p) <= 1e-12);
        }
        assert_eq!(Sphere::from_points(&[]), Sphere::default());
        assert!(Sphere::from_points(&[]).is_empty());
    }

    #[test]
    fn test_from_coordinates_matches_points() {
        let sphere = Sphere::from_coordinates(&[0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 7.0]);
        assert!(sphere.center.equals(&Vector3::new(1.0, 0.0, 0.0), DEFAULT_PRECISION));
        assert_relative_eq!(sphere.radius, 1.0);
    }

    #[test]
    fn test_ray_from_outside() {
        let sphere = Sphere::new(Vector3::zero(), 1.0);
        let mut normal = Vector3::zero();
        let t = sphere.ray_intersection(&Vector3::new(-2.0, 0.0, 0.0), &Vector3::X_AXIS, &mut normal);
        assert_relative_eq!(t, 1.0);
        assert!(normal.equals(&Vector3::new(-1.0, 0.0, 0.0), DEFAULT_PRECISION));
    }

    #[test]
    fn test_ray_inside_behind_and_miss() {
        let sphere = Sphere::new(Vector3::zero(), 1.0);
        let mut normal = Vector3::zero();
        assert_eq!(sphere.ray_intersection(&Vector3::zero(), &Vector3::Y_AXIS, &mut normal), 0.0);
        assert_eq!(
            sphere.ray_intersection(&Vector3::new(-2.0, 0.0, 0.0), &-Vector3::X_AXIS, &mut normal),
            -1.0
        );
        assert_eq!(
            sphere.ray_intersection(&Vector3::new(-2.0, 3.0, 0.0), &Vector3::X_AXIS, &mut normal),
            -1.0
        );
    }

    #[test]
    fn test_ray_with_unnormalized_direction() {
        let sphere = Sphere::new(Vector3::new(0.0, 0.0, 10.0), 2.0);
        let mut normal = Vector3::zero();
        let origin = Vector3::zero();
        let direction = Vector3::new(0.0, 0.0, 4.0);
        let t = sphere.ray_intersection(&origin, &direction, &mut normal);
        assert_relative_eq!(t, 2.0);
        assert_relative_eq!((origin + direction * t).distance(&sphere.center), 2.0);
    }

    #[test]
    fn test_shape_overlaps() {
        let sphere = Sphere::new(Vector3::zero(), 1.0);
        let touching = Sphere::new(Vector3::new(2.0, 0.0, 0.0), 1.0);
        assert!(sphere.intersects_sphere(&touching));
        assert!(!sphere.intersects_sphere(&Sphere::new(Vector3::new(3.0, 0.0, 0.0), 0.5)));

        let plane = Plane3D::new(0.0, 1.0, 0.0, -0.5);
        assert!(sphere.intersects_plane(&plane));
        assert!(!sphere.intersects_plane(&Plane3D::new(0.0, 1.0, 0.0, -2.0)));

        let bbox = BoundingBox::new(Vector3::new(0.5, 0.5, 0.5), Vector3::new(2.0, 2.0, 2.0));
        assert!(sphere.intersects_box(&bbox));
        let far_box = BoundingBox::new(Vector3::new(0.8, 0.8, 0.8), Vector3::new(2.0, 2.0, 2.0));
        assert!(!sphere.intersects_box(&far_box));

        let triangle = Triangle3D::new(
            Vector3::new(-5.0, -5.0, 0.5),
            Vector3::new(5.0, -5.0, 0.5),
            Vector3::new(0.0, 5.0, 0.5),
        );
        assert!(sphere.intersects_triangle(&triangle));
        let mut lifted = triangle;
        lifted.p0.z = 2.0;
        lifted.p1.z = 2.0;
        lifted.p2.z = 2.0;
        assert!(!sphere.intersects_triangle(&lifted));
    }

    #[test]
    fn test_clamp_and_bounds() {
        let mut sphere = Sphere::new(Vector3::zero(), 2.0);
        assert!(sphere
            .clamp_point(&Vector3::new(10.0, 0.0, 0.0))
            .equals(&Vector3::new(2.0, 0.0, 0.0), DEFAULT_PRECISION));
        assert_eq!(sphere.clamp_point(&Vector3::new(0.5, 0.0, 0.0)), Vector3::new(0.5, 0.0, 0.0));

        sphere.translate(&Vector3::new(1.0, 1.0, 1.0));
        let bbox = sphere.bounding_box();
        assert_eq!(bbox.min, Vector3::new(-1.0, -1.0, -1.0));
        assert_eq!(bbox.max, Vector3::new(3.0, 3.0, 3.0));

        let enclosing = Sphere::from_box(&bbox);
        for corner in bbox.corners() {
            assert!(enclosing.distance_to_point(&corner).abs() < 1e-9);
        }
    }
}
