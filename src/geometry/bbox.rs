// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Axis-aligned bounding box

use super::{Sphere, Triangle3D, Vector3};
use crate::error::GeometryError;
use serde::{Deserialize, Serialize};

// Corner indices of the 12 outward-wound triangles, two per face.
const FACE_TRIANGLES: [[usize; 3]; 12] = [
    // +Z
    [4, 5, 6],
    [4, 6, 7],
    // -Z
    [1, 0, 3],
    [1, 3, 2],
    // +X
    [5, 1, 2],
    [5, 2, 6],
    // -X
    [0, 4, 7],
    [0, 7, 3],
    // +Y
    [7, 6, 2],
    [7, 2, 3],
    // -Y
    [0, 1, 5],
    [0, 5, 4],
];

/// Axis-aligned bounding box.
///
/// The empty box has `min = +∞` and `max = -∞` so that any expansion
/// replaces both corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Vector3,
    pub max: Vector3,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoundingBox {
    pub fn new(min: Vector3, max: Vector3) -> Self {
        Self { min, max }
    }

    pub fn empty() -> Self {
        Self {
            min: Vector3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Vector3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_points(points: &[Vector3]) -> Self {
        let mut bbox = Self::empty();
        for point in points {
            bbox.expand_to_include(point);
        }
        bbox
    }

    /// Build from a flat `x, y, z, x, y, z, ...` buffer. A trailing partial
    /// triple is ignored.
    pub fn from_coordinates(coordinates: &[f64]) -> Self {
        let mut bbox = Self::empty();
        for chunk in coordinates.chunks_exact(3) {
            bbox.expand_to_include(&Vector3::new(chunk[0], chunk[1], chunk[2]));
        }
        bbox
    }

    /// Like `from_coordinates`, but rejects buffers whose length is not a multiple of 3.
    pub fn try_from_coordinates(coordinates: &[f64]) -> Result<Self, GeometryError> {
        if coordinates.len() % 3 != 0 {
            return Err(GeometryError::CoordinateCount(coordinates.len()));
        }
        Ok(Self::from_coordinates(coordinates))
    }

    pub fn from_center_and_size(center: Vector3, size: Vector3) -> Self {
        let half = size * 0.5;
        Self::new(center - half, center + half)
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn expand_to_include(&mut self, point: &Vector3) -> &mut Self {
        self.min.min_mut(point);
        self.max.max_mut(point);
        self
    }

    /// Grow every face outward by `amount`
    pub fn expand_by_scalar(&mut self, amount: f64) -> &mut Self {
        self.min.sub_scalar_mut(amount);
        self.max.add_scalar_mut(amount);
        self
    }

    pub fn translate(&mut self, offset: &Vector3) -> &mut Self {
        self.min.add_mut(offset);
        self.max.add_mut(offset);
        self
    }

    pub fn center(&self) -> Vector3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vector3 {
        self.max - self.min
    }

    pub fn half_extents(&self) -> Vector3 {
        self.size() * 0.5
    }

    pub fn volume(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let size = self.size();
        size.x * size.y * size.z
    }

    /// Inclusive containment
    pub fn contains_point(&self, point: &Vector3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    pub fn contains_box(&self, other: &BoundingBox) -> bool {
        self.contains_point(&other.min) && self.contains_point(&other.max)
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox::new(self.min.min(&other.min), self.max.max(&other.max))
    }

    pub fn union_mut(&mut self, other: &BoundingBox) -> &mut Self {
        self.min.min_mut(&other.min);
        self.max.max_mut(&other.max);
        self
    }

    pub fn union_to<'a>(&self, other: &BoundingBox, out: &'a mut BoundingBox) -> &'a mut BoundingBox {
        *out = self.union(other);
        out
    }

    /// Overlap of two boxes. Disjoint inputs give `min > max` on some axis;
    /// check `is_empty` on the result.
    pub fn intersection(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox::new(self.min.max(&other.min), self.max.min(&other.max))
    }

    pub fn intersection_mut(&mut self, other: &BoundingBox) -> &mut Self {
        self.min.max_mut(&other.min);
        self.max.min_mut(&other.max);
        self
    }

    pub fn intersection_to<'a>(
        &self,
        other: &BoundingBox,
        out: &'a mut BoundingBox,
    ) -> &'a mut BoundingBox {
        *out = self.intersection(other);
        out
    }

    pub fn intersects_box(&self, other: &BoundingBox) -> bool {
        !(self.max.x < other.min.x
            || self.min.x > other.max.x
            || self.max.y < other.min.y
            || self.min.y > other.max.y
            || self.max.z < other.min.z
            || self.min.z > other.max.z)
    }

    pub fn intersects_sphere(&self, sphere: &Sphere) -> bool {
        if self.is_empty() || sphere.is_empty() {
            return false;
        }
        self.clamp_point(&sphere.center).distance_squared(&sphere.center)
            <= sphere.radius * sphere.radius
    }

    pub fn clamp_point(&self, point: &Vector3) -> Vector3 {
        point.clamp(&self.min, &self.max)
    }

    /// Zero for points inside the box
    pub fn distance_to_point(&self, point: &Vector3) -> f64 {
        self.clamp_point(point).distance(point)
    }

    /// Corners: the `min.z` face counter-clockwise from `min`, then the `max.z` face
    pub fn corners(&self) -> [Vector3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vector3::new(lo.x, lo.y, lo.z),
            Vector3::new(hi.x, lo.y, lo.z),
            Vector3::new(hi.x, hi.y, lo.z),
            Vector3::new(lo.x, hi.y, lo.z),
            Vector3::new(lo.x, lo.y, hi.z),
            Vector3::new(hi.x, lo.y, hi.z),
            Vector3::new(hi.x, hi.y, hi.z),
            Vector3::new(lo.x, hi.y, hi.z),
        ]
    }

    /// Closed surface of the box, 12 triangles with outward normals
    pub fn to_triangles(&self) -> Vec<Triangle3D> {
        let corners = self.corners();
        FACE_TRIANGLES
            .iter()
            .map(|[a, b, c]| Triangle3D::new(corners[*a], corners[*b], corners[*c]))
            .collect()
    }

    pub fn approx_eq(&self, other: &BoundingBox, precision: f64) -> bool {
        self.min.equals(&other.min, precision) && self.max.equals(&other.max, precision)
    }

    /// Separating-axis test against a triangle: the three box axes, the
    /// triangle normal and the nine edge-axis cross products.
    pub fn intersects_triangle(&self, triangle: &Triangle3D) -> bool {
        if self.is_empty() {
            return false;
        }

        let center = self.center();
        let half = self.half_extents();

        // Triangle in box-local space
        let t0 = triangle.p0 - center;
        let t1 = triangle.p1 - center;
        let t2 = triangle.p2 - center;
        let edges = [t1 - t0, t2 - t1, t0 - t2];

        let box_radius = |axis: &Vector3| {
            half.x * axis.x.abs() + half.y * axis.y.abs() + half.z * axis.z.abs()
        };
        let separated = |axis: &Vector3| {
            let p0 = t0.dot(axis);
            let p1 = t1.dot(axis);
            let p2 = t2.dot(axis);
            let r = box_radius(axis);
            p0.max(p1).max(p2) < -r || p0.min(p1).min(p2) > r
        };

        for axis in [Vector3::X_AXIS, Vector3::Y_AXIS, Vector3::Z_AXIS] {
            if separated(&axis) {
                return false;
            }
            for edge in &edges {
                let cross = axis.cross(edge);
                // Parallel edge and axis
                if cross.length_squared() < 1e-20 {
                    continue;
                }
                if separated(&cross) {
                    return false;
                }
            }
        }

        let normal = edges[0].cross(&edges[1]);
        if normal.length_squared() >= 1e-20 && separated(&normal) {
            return false;
        }

        true
    }

    /// Ray cast against the box faces.
    ///
    /// Returns `0` when `origin` is inside, the entry distance along
    /// `direction` (in units of its length) on a hit, `-1` on a miss.
    /// `out_normal` receives the entry face normal on a hit from outside.
    pub fn ray_intersection(
        &self,
        origin: &Vector3,
        direction: &Vector3,
        out_normal: &mut Vector3,
    ) -> f64 {
        if self.is_empty() {
            return -1.0;
        }
        if self.contains_point(origin) {
            return 0.0;
        }

        let half = self.half_extents();
        let p = *origin - self.center();

        for axis in 0..3 {
            let v = direction[axis];
            if v == 0.0 {
                continue;
            }
            // The face the ray approaches on this axis
            let (face, sign) = if v < 0.0 { (half[axis], 1.0) } else { (-half[axis], -1.0) };
            let t = (face - p[axis]) / v;
            if t <= 0.0 {
                continue;
            }

            let hit = p + *direction * t;
            let (u, w) = ((axis + 1) % 3, (axis + 2) % 3);
            if hit[u].abs() <= half[u] && hit[w].abs() <= half[w] {
                let mut normal = Vector3::zero();
                normal[axis] = sign;
                *out_normal = normal;
                return t;
            }
        }
        -1.0
    }
}
