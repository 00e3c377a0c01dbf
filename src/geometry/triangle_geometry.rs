// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Triangle soup with mesh-level queries
//!
//! All queries are linear scans over the member triangles; `is_closed` compares
//! every directed edge against every other.

use super::intersection::push_unique_point;
use super::{
    BoundingBox, Classification, Intersection, Line3D, Segment3D, Triangle3D, Vector3,
};
use crate::error::GeometryError;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// Ordered collection of triangles. Duplicates are allowed and closedness is
/// checked on demand, never enforced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleGeometry {
    triangles: Vec<Triangle3D>,
}

/// Merged result of intersecting a query against every triangle of a mesh
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshIntersection {
    /// Isolated crossing points, excluding any lying on a reported segment
    pub points: Vec<Vector3>,
    /// Coplanar overlaps
    pub segments: Vec<Segment3D>,
}

impl MeshIntersection {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.segments.is_empty()
    }

    fn merge(&mut self, hit: Intersection, precision: f64) {
        match hit {
            Intersection::Point(p) => {
                push_unique_point(&mut self.points, p, precision);
            }
            Intersection::Segment(s) => {
                if !self.segments.iter().any(|e| e.equals(&s, precision)) {
                    self.segments.push(s);
                }
            }
            Intersection::None | Intersection::Line(_) => {}
        }
    }

    fn finish(mut self, precision: f64) -> Self {
        let segments = &self.segments;
        self.points
            .retain(|p| !segments.iter().any(|s| s.on_with_point(p, precision)));
        self
    }
}

impl TriangleGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_triangles(triangles: Vec<Triangle3D>) -> Self {
        Self { triangles }
    }

    /// Build from a flat buffer, nine coordinates per triangle
    pub fn from_positions(positions: &[f64]) -> Result<Self, GeometryError> {
        if positions.len() % 3 != 0 {
            return Err(GeometryError::CoordinateCount(positions.len()));
        }
        let vertex_count = positions.len() / 3;
        if vertex_count % 3 != 0 {
            return Err(GeometryError::TriangleCount(vertex_count));
        }
        let triangles = positions.chunks_exact(9).map(Triangle3D::from_positions).collect();
        Ok(Self { triangles })
    }

    pub fn triangles(&self) -> &[Triangle3D] {
        &self.triangles
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn push(&mut self, triangle: Triangle3D) -> &mut Self {
        self.triangles.push(triangle);
        self
    }

    pub fn bounding_box(&self) -> BoundingBox {
        let mut bbox = BoundingBox::empty();
        for triangle in &self.triangles {
            for p in triangle.points() {
                bbox.expand_to_include(&p);
            }
        }
        bbox
    }

    /// Distinct vertices, in first-seen order
    pub fn points(&self, precision: f64) -> Vec<Vector3> {
        let mut points = Vec::new();
        for triangle in &self.triangles {
            for p in triangle.points() {
                push_unique_point(&mut points, p, precision);
            }
        }
        points
    }

    /// Distinct undirected edges, in first-seen order
    pub fn segments(&self, precision: f64) -> Vec<Segment3D> {
        let mut segments: Vec<Segment3D> = Vec::new();
        for triangle in &self.triangles {
            for edge in triangle.segments() {
                if !segments.iter().any(|s| s.equals(&edge, precision)) {
                    segments.push(edge);
                }
            }
        }
        segments
    }

    pub fn area(&self) -> f64 {
        self.triangles.iter().map(Triangle3D::area).sum()
    }

    /// Signed enclosed volume, positive for an outward-wound closed mesh
    pub fn volume(&self) -> f64 {
        self.triangles
            .iter()
            .map(|t| t.p0.dot(&t.p1.cross(&t.p2)))
            .sum::<f64>()
            / 6.0
    }

    /// Every directed edge has exactly one opposite directed edge.
    ///
    /// An empty mesh is not closed.
    pub fn is_closed(&self, precision: f64) -> bool {
        if self.triangles.is_empty() {
            return false;
        }

        let edges: Vec<(Vector3, Vector3)> = self
            .triangles
            .iter()
            .flat_map(|t| t.segments().map(|s| (s.p0, s.p1)))
            .collect();

        for (a, b) in &edges {
            let opposite = edges
                .iter()
                .filter(|(c, d)| c.equals(b, precision) && d.equals(a, precision))
                .count();
            if opposite != 1 {
                debug!(
                    "mesh not closed: edge {:?} -> {:?} has {} opposite edges",
                    a, b, opposite
                );
                return false;
            }
        }
        true
    }

    pub fn on_with_point(&self, point: &Vector3, precision: f64) -> bool {
        self.triangles.iter().any(|t| t.on_with_point(point, precision))
    }

    /// Nearest point on any member triangle, `None` for an empty mesh
    pub fn closest_point_with_point(&self, point: &Vector3) -> Option<Vector3> {
        self.nearest_triangle(point).map(|(_, p)| p)
    }

    fn nearest_triangle(&self, point: &Vector3) -> Option<(usize, Vector3)> {
        let mut best: Option<(usize, Vector3, f64)> = None;
        for (index, triangle) in self.triangles.iter().enumerate() {
            let candidate = triangle.closest_point_with_point(point);
            let distance = candidate.distance_squared(point);
            if best.map_or(true, |(_, _, d)| distance < d) {
                best = Some((index, candidate, distance));
            }
        }
        best.map(|(index, p, _)| (index, p))
    }

    /// Classify a point against a closed mesh.
    ///
    /// Open meshes classify everything as `Outside`. Otherwise the nearest
    /// surface point decides: among the triangles containing it, the one whose
    /// normal is most aligned with `nearest - point` gives the side. Concave
    /// ties between triangles that disagree in sign are not resolved.
    pub fn classify_point(&self, point: &Vector3, precision: f64) -> Classification {
        if !self.is_closed(precision) {
            debug!("classifying against an open mesh; reporting outside");
            return Classification::Outside;
        }
        if self.on_with_point(point, precision) {
            return Classification::OnSurface;
        }

        let Some((nearest_index, nearest)) = self.nearest_triangle(point) else {
            return Classification::Outside;
        };
        let toward = nearest - *point;

        let mut best_dot = self.triangles[nearest_index].normal().dot(&toward);
        for triangle in self.triangles.iter().filter(|t| t.on_with_point(&nearest, precision)) {
            let dot = triangle.normal().dot(&toward);
            trace!("candidate triangle {:?} dot {}", triangle, dot);
            if dot.abs() > best_dot.abs() {
                best_dot = dot;
            }
        }

        if best_dot > 0.0 {
            Classification::Inside
        } else {
            Classification::Outside
        }
    }

    pub fn intersection_with_line(&self, line: &Line3D, precision: f64) -> MeshIntersection {
        let mut result = MeshIntersection::default();
        for triangle in &self.triangles {
            result.merge(triangle.intersection_with_line(line, precision), precision);
        }
        result.finish(precision)
    }

    pub fn intersection_with_segment(&self, segment: &Segment3D, precision: f64) -> MeshIntersection {
        let mut result = MeshIntersection::default();
        for triangle in &self.triangles {
            result.merge(triangle.intersection_with_segment(segment, precision), precision);
        }
        result.finish(precision)
    }

    /// Nearest forward hit on any member triangle, `-1` on a miss
    pub fn ray_intersection(
        &self,
        origin: &Vector3,
        direction: &Vector3,
        out_normal: &mut Vector3,
    ) -> f64 {
        let mut nearest = -1.0;
        let mut normal = Vector3::zero();
        for triangle in &self.triangles {
            let t = triangle.ray_intersection(origin, direction, &mut normal);
            if t >= 0.0 && (nearest < 0.0 || t < nearest) {
                nearest = t;
                *out_normal = normal;
            }
        }
        nearest
    }
}

impl From<Vec<Triangle3D>> for TriangleGeometry {
    fn from(triangles: Vec<Triangle3D>) -> Self {
        Self::from_triangles(triangles)
    }
}
