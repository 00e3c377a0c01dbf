// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Bounded 3-D line segment

use super::{Intersection, Line3D, Vector3};
use crate::utils::math::clamp;
use serde::{Deserialize, Serialize};

/// Segment between `p0` (t = 0) and `p1` (t = 1).
///
/// `p0 == p1` is a legal zero-length segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment3D {
    pub p0: Vector3,
    pub p1: Vector3,
}

impl Segment3D {
    pub fn new(p0: Vector3, p1: Vector3) -> Self {
        Self { p0, p1 }
    }

    pub fn from_points(p0: Vector3, p1: Vector3) -> Self {
        Self::new(p0, p1)
    }

    /// Supporting line, positioned at `p0`
    pub fn get_line(&self) -> Line3D {
        Line3D::from_points(self.p0, self.p1)
    }

    pub fn get_point(&self, t: f64) -> Vector3 {
        self.p0.lerp(&self.p1, t)
    }

    /// Unit direction from `p0` to `p1` (zero for a degenerate segment)
    pub fn direction(&self) -> Vector3 {
        (self.p1 - self.p0).unit()
    }

    pub fn length_squared(&self) -> f64 {
        self.p0.distance_squared(&self.p1)
    }

    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    pub fn is_degenerate(&self) -> bool {
        self.length_squared() == 0.0
    }

    pub fn is_parallel(&self, segment: &Segment3D, precision: f64) -> bool {
        (self.p1 - self.p0).is_parallel(&(segment.p1 - segment.p0), precision)
    }

    /// Unclamped parameter of the projection of `point` onto the segment's line
    pub fn get_position_by_point(&self, point: &Vector3) -> f64 {
        let d = self.p1 - self.p0;
        let len2 = d.length_squared();
        if len2 == 0.0 {
            return 0.0;
        }
        (*point - self.p0).dot(&d) / len2
    }

    /// Squared distance from `point` to the closest point of the segment
    pub fn get_point_distance_square(&self, point: &Vector3) -> f64 {
        let t = self.get_position_by_point(point);
        if t <= 0.0 {
            point.distance_squared(&self.p0)
        } else if t >= 1.0 {
            point.distance_squared(&self.p1)
        } else {
            // |p - p0|² = perp² + (t·|p1 - p0|)²
            let d2 = point.distance_squared(&self.p0) - t * t * self.length_squared();
            d2.max(0.0)
        }
    }

    pub fn get_point_distance(&self, point: &Vector3) -> f64 {
        self.get_point_distance_square(point).sqrt()
    }

    pub fn on_with_point(&self, point: &Vector3, precision: f64) -> bool {
        self.get_point_distance(point) < precision
    }

    pub fn clamp_point(&self, point: &Vector3) -> Vector3 {
        self.get_point(clamp(self.get_position_by_point(point), 0.0, 1.0))
    }

    pub fn closest_point_with_point(&self, point: &Vector3) -> Vector3 {
        self.clamp_point(point)
    }

    /// Endpoints match, in either order
    pub fn equals(&self, segment: &Segment3D, precision: f64) -> bool {
        (self.p0.equals(&segment.p0, precision) && self.p1.equals(&segment.p1, precision))
            || (self.p0.equals(&segment.p1, precision) && self.p1.equals(&segment.p0, precision))
    }

    /// Intersect with an infinite line.
    ///
    /// A segment lying on the line yields `Segment(self)`.
    pub fn intersection_with_line(&self, line: &Line3D, precision: f64) -> Intersection {
        if self.is_degenerate() {
            return if line.on_with_point(&self.p0, precision) {
                Intersection::Point(self.p0)
            } else {
                Intersection::None
            };
        }

        match self.get_line().intersect_with_line(line, precision) {
            Intersection::Line(_) => Intersection::Segment(*self),
            Intersection::Point(p) if self.on_with_point(&p, precision) => Intersection::Point(p),
            _ => Intersection::None,
        }
    }

    /// Intersect with another segment.
    ///
    /// Collinear segments yield their overlap: a `Segment`, a single touching
    /// `Point`, or `None` when they are disjoint.
    pub fn intersection_with_segment(&self, segment: &Segment3D, precision: f64) -> Intersection {
        if segment.is_degenerate() {
            return if self.on_with_point(&segment.p0, precision) {
                Intersection::Point(segment.p0)
            } else {
                Intersection::None
            };
        }

        match self.intersection_with_line(&segment.get_line(), precision) {
            Intersection::Segment(_) => {
                let t0 = clamp(segment.get_position_by_point(&self.p0), 0.0, 1.0);
                let t1 = clamp(segment.get_position_by_point(&self.p1), 0.0, 1.0);
                let q0 = segment.get_point(t0);
                let q1 = segment.get_point(t1);
                if q0.equals(&q1, precision) {
                    if self.on_with_point(&q0, precision) {
                        Intersection::Point(q0)
                    } else {
                        Intersection::None
                    }
                } else {
                    Intersection::Segment(Segment3D::new(q0, q1))
                }
            }
            Intersection::Point(p) if segment.on_with_point(&p, precision) => {
                Intersection::Point(p)
            }
            _ => Intersection::None,
        }
    }
}
