// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Infinite 3-D line

use super::{Intersection, Plane3D, Vector3};
use serde::{Deserialize, Serialize};

/// Infinite line through `position` along a unit `direction`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line3D {
    pub position: Vector3,
    direction: Vector3,
}

impl Line3D {
    /// Create a line; `direction` is normalized.
    pub fn new(position: Vector3, direction: Vector3) -> Self {
        Self {
            position,
            direction: direction.unit(),
        }
    }

    pub fn from_position_and_direction(position: Vector3, direction: Vector3) -> Self {
        Self::new(position, direction)
    }

    /// Line through `p0` towards `p1`
    pub fn from_points(p0: Vector3, p1: Vector3) -> Self {
        Self::new(p0, p1 - p0)
    }

    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Vector3) -> &mut Self {
        self.direction = direction.unit();
        self
    }

    pub fn get_point(&self, t: f64) -> Vector3 {
        self.position + self.direction * t
    }

    pub fn closest_point_to_point(&self, point: &Vector3) -> Vector3 {
        let t = (*point - self.position).dot(&self.direction);
        self.get_point(t)
    }

    pub fn distance_with_point(&self, point: &Vector3) -> f64 {
        self.closest_point_to_point(point).distance(point)
    }

    pub fn on_with_point(&self, point: &Vector3, precision: f64) -> bool {
        self.distance_with_point(point) < precision
    }

    pub fn is_parallel(&self, line: &Line3D, precision: f64) -> bool {
        self.direction.is_parallel(&line.direction, precision)
    }

    /// Same set of points, regardless of how either line is parameterized
    pub fn equals(&self, line: &Line3D, precision: f64) -> bool {
        self.on_with_point(&line.position, precision)
            && self.on_with_point(&(line.position + line.direction), precision)
    }

    /// Intersect two lines.
    ///
    /// Coincident lines yield `Line(self)`, parallel or skew lines yield
    /// `None`, crossing lines yield the crossing point.
    pub fn intersect_with_line(&self, line: &Line3D, precision: f64) -> Intersection {
        if self.equals(line, precision) {
            return Intersection::Line(*self);
        }
        if self.is_parallel(line, precision) {
            return Intersection::None;
        }

        // Plane containing `self` whose normal lies in span(d1, d2); `line`
        // always crosses it because the directions are not parallel.
        let normal = self
            .direction
            .cross(&line.direction)
            .cross(&self.direction);
        let plane = Plane3D::from_normal_and_point(normal, self.position);

        match plane.intersect_with_line3d(line, precision) {
            Intersection::Point(candidate) if self.on_with_point(&candidate, precision) => {
                Intersection::Point(candidate)
            }
            _ => Intersection::None,
        }
    }
}
