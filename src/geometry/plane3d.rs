// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Implicit plane `a·x + b·y + c·z + d = 0`

use super::{Intersection, Line3D, PlaneClassification, Vector3};
use log::debug;
use nalgebra::{Matrix3, Vector3 as NVector3};
use serde::{Deserialize, Serialize};

/// Plane with unit normal `(a, b, c)` and `d = -normal · point_on_plane`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane3D {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Plane3D {
    /// Create a plane from raw coefficients, rescaled so the normal is unit length.
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        let mut plane = Self { a, b, c, d };
        plane.normalize();
        plane
    }

    /// Plane through three points, normal `(p1 - p0) × (p2 - p1)`.
    ///
    /// Collinear points give a zero normal.
    pub fn from_points(p0: Vector3, p1: Vector3, p2: Vector3) -> Self {
        let normal = (p1 - p0).cross(&(p2 - p1));
        Self::from_normal_and_point(normal, p0)
    }

    pub fn from_normal_and_point(normal: Vector3, point: Vector3) -> Self {
        let n = normal.unit();
        Self {
            a: n.x,
            b: n.y,
            c: n.z,
            d: -n.dot(&point),
        }
    }

    fn normalize(&mut self) {
        let len = (self.a * self.a + self.b * self.b + self.c * self.c).sqrt();
        if len > 0.0 {
            let inv = 1.0 / len;
            self.a *= inv;
            self.b *= inv;
            self.c *= inv;
            self.d *= inv;
        }
    }

    pub fn normal(&self) -> Vector3 {
        Vector3::new(self.a, self.b, self.c)
    }

    /// Point of the plane closest to the world origin
    pub fn origin(&self) -> Vector3 {
        self.normal() * -self.d
    }

    /// Flip the plane's orientation in place
    pub fn negate(&mut self) -> &mut Self {
        self.a = -self.a;
        self.b = -self.b;
        self.c = -self.c;
        self.d = -self.d;
        self
    }

    /// Signed distance, positive on the normal's side
    pub fn distance_with_point(&self, point: &Vector3) -> f64 {
        self.a * point.x + self.b * point.y + self.c * point.z + self.d
    }

    pub fn classify_point(&self, point: &Vector3, precision: f64) -> PlaneClassification {
        let distance = self.distance_with_point(point);
        if distance.abs() < precision {
            PlaneClassification::Intersect
        } else if distance < 0.0 {
            PlaneClassification::Back
        } else {
            PlaneClassification::Front
        }
    }

    pub fn on_with_point(&self, point: &Vector3, precision: f64) -> bool {
        self.classify_point(point, precision) == PlaneClassification::Intersect
    }

    pub fn project_point(&self, point: &Vector3) -> Vector3 {
        *point - self.normal() * self.distance_with_point(point)
    }

    pub fn closest_point_with_point(&self, point: &Vector3) -> Vector3 {
        self.project_point(point)
    }

    pub fn is_parallel(&self, plane: &Plane3D, precision: f64) -> bool {
        self.normal().is_parallel(&plane.normal(), precision)
    }

    /// Same point set, regardless of orientation
    pub fn equals(&self, plane: &Plane3D, precision: f64) -> bool {
        self.is_parallel(plane, precision) && self.on_with_point(&plane.origin(), precision)
    }

    /// Intersect with a line.
    ///
    /// A line lying in the plane yields `Line(line)`, a parallel line off the
    /// plane yields `None`. Parallelism is `|normal · direction| < precision`,
    /// a bound on the cosine between the two, not the `1 - |cos|` bound
    /// used by `Vector3::is_parallel`.
    pub fn intersect_with_line3d(&self, line: &Line3D, precision: f64) -> Intersection {
        let denom = self.normal().dot(&line.direction());
        if denom.abs() < precision {
            return if self.on_with_point(&line.position, precision) {
                Intersection::Line(*line)
            } else {
                Intersection::None
            };
        }
        let t = -self.distance_with_point(&line.position) / denom;
        Intersection::Point(line.get_point(t))
    }

    /// Intersect with another plane, yielding their common line.
    pub fn intersect_with_plane3d(&self, plane: &Plane3D, precision: f64) -> Intersection {
        if self.is_parallel(plane, precision) {
            debug!("plane intersection skipped: normals are parallel");
            return Intersection::None;
        }

        let direction = self.normal().cross(&plane.normal());

        // Fix one coordinate at zero and solve the remaining 2×2 system. The
        // three sub-determinants are the components of `direction`, so for
        // non-parallel planes at least one is non-zero; use the largest.
        let (a1, b1, c1, d1) = (self.a, self.b, self.c, self.d);
        let (a2, b2, c2, d2) = (plane.a, plane.b, plane.c, plane.d);
        let det_xy = a1 * b2 - a2 * b1;
        let det_xz = a1 * c2 - a2 * c1;
        let det_yz = b1 * c2 - b2 * c1;

        let position = if det_xy.abs() >= det_xz.abs() && det_xy.abs() >= det_yz.abs() && det_xy != 0.0 {
            Vector3::new(
                (b1 * d2 - b2 * d1) / det_xy,
                (a2 * d1 - a1 * d2) / det_xy,
                0.0,
            )
        } else if det_xz.abs() >= det_yz.abs() && det_xz != 0.0 {
            Vector3::new(
                (c1 * d2 - c2 * d1) / det_xz,
                0.0,
                (a2 * d1 - a1 * d2) / det_xz,
            )
        } else if det_yz != 0.0 {
            Vector3::new(
                0.0,
                (c1 * d2 - c2 * d1) / det_yz,
                (b2 * d1 - b1 * d2) / det_yz,
            )
        } else {
            return Intersection::None;
        };

        Intersection::Line(Line3D::new(position, direction))
    }

    /// Common point of three planes, or `None` if they do not meet in exactly one point.
    pub fn intersect_with_two_planes(&self, p1: &Plane3D, p2: &Plane3D) -> Option<Vector3> {
        let m = Matrix3::new(
            self.a, self.b, self.c, //
            p1.a, p1.b, p1.c, //
            p2.a, p2.b, p2.c,
        );
        let rhs = NVector3::new(-self.d, -p1.d, -p2.d);
        m.lu().solve(&rhs).map(Vector3::from)
    }
}
