// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! 3-D triangle: derived quantities, point containment, intersection,
//! decomposition and voxel rasterization

use super::{BoundingBox, Intersection, Line3D, Plane3D, PlaneClassification, Segment3D, Vector3};
use super::intersection::push_unique_point;
use log::trace;
use serde::{Deserialize, Serialize};

/// Tolerance `rasterize` uses when testing lattice points against the triangle
pub const RASTERIZE_TOLERANCE: f64 = 0.5;

/// Triangle `p0 → p1 → p2`. Collinear points are allowed and produce a zero normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle3D {
    pub p0: Vector3,
    pub p1: Vector3,
    pub p2: Vector3,
}

impl Triangle3D {
    pub fn new(p0: Vector3, p1: Vector3, p2: Vector3) -> Self {
        Self { p0, p1, p2 }
    }

    pub fn from_points(points: [Vector3; 3]) -> Self {
        Self::new(points[0], points[1], points[2])
    }

    /// Build from the first nine values of a flat coordinate buffer.
    ///
    /// Panics when fewer than nine values are given.
    pub fn from_positions(positions: &[f64]) -> Self {
        Self::new(
            Vector3::from_slice(positions, 0),
            Vector3::from_slice(positions, 1),
            Vector3::from_slice(positions, 2),
        )
    }

    pub fn points(&self) -> [Vector3; 3] {
        [self.p0, self.p1, self.p2]
    }

    /// Edges `p0p1`, `p1p2`, `p2p0`
    pub fn segments(&self) -> [Segment3D; 3] {
        [
            Segment3D::new(self.p0, self.p1),
            Segment3D::new(self.p1, self.p2),
            Segment3D::new(self.p2, self.p0),
        ]
    }

    pub fn plane(&self) -> Plane3D {
        Plane3D::from_points(self.p0, self.p1, self.p2)
    }

    /// Unit normal `(p1 - p0) × (p2 - p1)`, zero when degenerate
    pub fn normal(&self) -> Vector3 {
        (self.p1 - self.p0).cross(&(self.p2 - self.p1)).unit()
    }

    pub fn area(&self) -> f64 {
        (self.p1 - self.p0).cross(&(self.p2 - self.p0)).length() * 0.5
    }

    pub fn perimeter(&self) -> f64 {
        self.p0.distance(&self.p1) + self.p1.distance(&self.p2) + self.p2.distance(&self.p0)
    }

    pub fn is_degenerate(&self, precision: f64) -> bool {
        self.area() < precision
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.points())
    }

    /// Reverse the winding in place
    pub fn flip(&mut self) -> &mut Self {
        std::mem::swap(&mut self.p1, &mut self.p2);
        self
    }

    /// Same vertices in the same cyclic order
    pub fn equals(&self, triangle: &Triangle3D, precision: f64) -> bool {
        let a = self.points();
        let b = triangle.points();
        (0..3).any(|shift| (0..3).all(|i| a[i].equals(&b[(i + shift) % 3], precision)))
    }

    /// Centroid
    pub fn barycenter(&self) -> Vector3 {
        (self.p0 + self.p1 + self.p2) / 3.0
    }

    // Edge-vector weights shared by the circumcenter and orthocenter formulas.
    fn center_weights(&self) -> (f64, f64, f64) {
        let a = self.p2 - self.p1;
        let b = self.p0 - self.p2;
        let c = self.p1 - self.p0;
        let d1 = -b.dot(&c);
        let d2 = -c.dot(&a);
        let d3 = -a.dot(&b);
        (d2 * d3, d3 * d1, d1 * d2)
    }

    /// Center of the circumscribed circle; the barycenter for degenerate triangles
    pub fn circumcenter(&self) -> Vector3 {
        let (c1, c2, c3) = self.center_weights();
        let c = c1 + c2 + c3;
        if c == 0.0 {
            return self.barycenter();
        }
        (self.p0 * (c2 + c3) + self.p1 * (c3 + c1) + self.p2 * (c1 + c2)) / (2.0 * c)
    }

    /// Center of the inscribed circle
    pub fn incenter(&self) -> Vector3 {
        let a = self.p1.distance(&self.p2);
        let b = self.p2.distance(&self.p0);
        let c = self.p0.distance(&self.p1);
        let sum = a + b + c;
        if sum == 0.0 {
            return self.p0;
        }
        (self.p0 * a + self.p1 * b + self.p2 * c) / sum
    }

    /// Intersection of the three altitudes
    pub fn orthocenter(&self) -> Vector3 {
        let (c1, c2, c3) = self.center_weights();
        let c = c1 + c2 + c3;
        if c == 0.0 {
            return self.barycenter();
        }
        (self.p0 * c1 + self.p1 * c2 + self.p2 * c3) / c
    }

    /// Barycentric weights `(w0, w1, w2)` of the projection of `point`
    pub fn barycentric_coordinate(&self, point: &Vector3) -> Vector3 {
        let v0 = self.p1 - self.p0;
        let v1 = self.p2 - self.p0;
        let v2 = *point - self.p0;
        let d00 = v0.dot(&v0);
        let d01 = v0.dot(&v1);
        let d11 = v1.dot(&v1);
        let d20 = v2.dot(&v0);
        let d21 = v2.dot(&v1);
        let denom = d00 * d11 - d01 * d01;
        if denom == 0.0 {
            return Vector3::new(1.0, 0.0, 0.0);
        }
        let v = (d11 * d20 - d01 * d21) / denom;
        let w = (d00 * d21 - d01 * d20) / denom;
        Vector3::new(1.0 - v - w, v, w)
    }

    pub fn point_from_barycentric(&self, weights: &Vector3) -> Vector3 {
        self.p0 * weights.x + self.p1 * weights.y + self.p2 * weights.z
    }

    /// Point of the triangle (interior or boundary) closest to `point`
    pub fn closest_point_with_point(&self, point: &Vector3) -> Vector3 {
        let (a, b, c) = (self.p0, self.p1, self.p2);
        let ab = b - a;
        let ac = c - a;
        let ap = *point - a;

        let d1 = ab.dot(&ap);
        let d2 = ac.dot(&ap);
        if d1 <= 0.0 && d2 <= 0.0 {
            return a;
        }

        let bp = *point - b;
        let d3 = ab.dot(&bp);
        let d4 = ac.dot(&bp);
        if d3 >= 0.0 && d4 <= d3 {
            return b;
        }

        let vc = d1 * d4 - d3 * d2;
        if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
            let v = d1 / (d1 - d3);
            return a + ab * v;
        }

        let cp = *point - c;
        let d5 = ab.dot(&cp);
        let d6 = ac.dot(&cp);
        if d6 >= 0.0 && d5 <= d6 {
            return c;
        }

        let vb = d5 * d2 - d1 * d6;
        if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
            let w = d2 / (d2 - d6);
            return a + ac * w;
        }

        let va = d3 * d6 - d5 * d4;
        if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
            let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
            return b + (c - b) * w;
        }

        let denom = va + vb + vc;
        if denom == 0.0 {
            // Degenerate triangle: fall back to the nearest edge point
            return self
                .segments()
                .iter()
                .map(|s| s.clamp_point(point))
                .fold(a, |best, q| {
                    if q.distance_squared(point) < best.distance_squared(point) {
                        q
                    } else {
                        best
                    }
                });
        }
        let v = vb / denom;
        let w = vc / denom;
        a + ab * v + ac * w
    }

    pub fn distance_to_point(&self, point: &Vector3) -> f64 {
        self.closest_point_with_point(point).distance(point)
    }

    /// Point containment: on the supporting plane, then on an edge or on the
    /// inner side of all three edges.
    pub fn on_with_point(&self, point: &Vector3, precision: f64) -> bool {
        if self.plane().classify_point(point, precision) != PlaneClassification::Intersect {
            return false;
        }
        if self.segments().iter().any(|s| s.on_with_point(point, precision)) {
            return true;
        }

        let normal = self.normal();
        let [p0, p1, p2] = self.points();
        [(p0, p1), (p1, p2), (p2, p0)]
            .iter()
            .all(|(a, b)| (*b - *a).cross(&(*point - *a)).dot(&normal) > 0.0)
    }

    /// Intersect with an infinite line.
    ///
    /// A crossing line yields a `Point`. A coplanar line yields the `Segment`
    /// it cuts through the triangle, a touching `Point`, or `None`.
    pub fn intersection_with_line(&self, line: &Line3D, precision: f64) -> Intersection {
        match self.plane().intersect_with_line3d(line, precision) {
            Intersection::Point(p) if self.on_with_point(&p, precision) => Intersection::Point(p),
            Intersection::Line(_) => {
                let mut points: Vec<Vector3> = Vec::with_capacity(3);
                for edge in self.segments() {
                    match edge.intersection_with_line(line, precision) {
                        Intersection::Segment(s) => return Intersection::Segment(s),
                        Intersection::Point(p) => {
                            push_unique_point(&mut points, p, precision);
                        }
                        _ => {}
                    }
                }
                match points.as_slice() {
                    [] => Intersection::None,
                    [p] => Intersection::Point(*p),
                    [p, q, ..] => Intersection::Segment(Segment3D::new(*p, *q)),
                }
            }
            _ => Intersection::None,
        }
    }

    /// Intersect with a segment; coplanar overlaps are clipped to the segment.
    pub fn intersection_with_segment(&self, segment: &Segment3D, precision: f64) -> Intersection {
        if segment.is_degenerate() {
            return if self.on_with_point(&segment.p0, precision) {
                Intersection::Point(segment.p0)
            } else {
                Intersection::None
            };
        }

        match self.intersection_with_line(&segment.get_line(), precision) {
            Intersection::Point(p) if segment.on_with_point(&p, precision) => Intersection::Point(p),
            Intersection::Segment(s) => s.intersection_with_segment(segment, precision),
            _ => Intersection::None,
        }
    }

    /// Ray cast (Möller–Trumbore). Returns the hit distance along `direction`
    /// in units of its length, or `-1` on a miss. `out_normal` receives the
    /// triangle normal on a hit.
    pub fn ray_intersection(
        &self,
        origin: &Vector3,
        direction: &Vector3,
        out_normal: &mut Vector3,
    ) -> f64 {
        const EPS: f64 = 1e-12;

        let edge1 = self.p1 - self.p0;
        let edge2 = self.p2 - self.p0;
        let h = direction.cross(&edge2);
        let a = edge1.dot(&h);

        if a.abs() < EPS {
            return -1.0; // Ray parallel to triangle
        }

        let f = 1.0 / a;
        let s = *origin - self.p0;
        let u = f * s.dot(&h);
        if !(0.0..=1.0).contains(&u) {
            return -1.0;
        }

        let q = s.cross(&edge1);
        let v = f * direction.dot(&q);
        if v < 0.0 || u + v > 1.0 {
            return -1.0;
        }

        let t = f * edge2.dot(&q);
        if t < 0.0 {
            return -1.0;
        }
        *out_normal = self.normal();
        t
    }

    /// Split at a point of the triangle.
    ///
    /// Off-triangle points and vertices leave the triangle whole, edge
    /// points split it in two, interior points fan it into three. Winding is
    /// preserved.
    pub fn decompose_with_point(&self, point: &Vector3, precision: f64) -> Vec<Triangle3D> {
        if !self.on_with_point(point, precision) {
            return vec![*self];
        }
        let [p0, p1, p2] = self.points();
        if [p0, p1, p2].iter().any(|v| v.equals(point, precision)) {
            return vec![*self];
        }

        let p = *point;
        for (a, b, c) in [(p0, p1, p2), (p1, p2, p0), (p2, p0, p1)] {
            if Segment3D::new(a, b).on_with_point(&p, precision) {
                trace!("splitting triangle on edge at {:?}", p);
                return vec![Triangle3D::new(a, p, c), Triangle3D::new(p, b, c)];
            }
        }

        trace!("fanning triangle around interior point {:?}", p);
        vec![
            Triangle3D::new(p0, p1, p),
            Triangle3D::new(p1, p2, p),
            Triangle3D::new(p2, p0, p),
        ]
    }

    /// Apply `decompose_with_point` for each point in turn to every piece so far
    pub fn decompose_with_points(&self, points: &[Vector3], precision: f64) -> Vec<Triangle3D> {
        let mut pieces = vec![*self];
        for point in points {
            pieces = pieces
                .iter()
                .flat_map(|t| t.decompose_with_point(point, precision))
                .collect();
        }
        pieces
    }

    pub fn decompose_with_segment(&self, segment: &Segment3D, precision: f64) -> Vec<Triangle3D> {
        self.decompose_with_intersection(self.intersection_with_segment(segment, precision), precision)
    }

    pub fn decompose_with_line(&self, line: &Line3D, precision: f64) -> Vec<Triangle3D> {
        self.decompose_with_intersection(self.intersection_with_line(line, precision), precision)
    }

    fn decompose_with_intersection(&self, hit: Intersection, precision: f64) -> Vec<Triangle3D> {
        match hit {
            Intersection::Point(p) => self.decompose_with_point(&p, precision),
            Intersection::Segment(s) => self.decompose_with_points(&[s.p0, s.p1], precision),
            Intersection::None | Intersection::Line(_) => vec![*self],
        }
    }

    /// Integer lattice points within `RASTERIZE_TOLERANCE` of the triangle
    pub fn rasterize(&self) -> Vec<Vector3> {
        self.rasterize_with_tolerance(RASTERIZE_TOLERANCE)
    }

    /// Like `rasterize` with an explicit containment tolerance.
    ///
    /// Cost is proportional to the volume of the rounded bounding box.
    pub fn rasterize_with_tolerance(&self, tolerance: f64) -> Vec<Vector3> {
        let bbox = self.bounding_box();
        let min = bbox.min.round();
        let max = bbox.max.round();

        let mut result = Vec::new();
        let mut z = min.z;
        while z <= max.z {
            let mut y = min.y;
            while y <= max.y {
                let mut x = min.x;
                while x <= max.x {
                    let lattice = Vector3::new(x, y, z);
                    if self.on_with_point(&lattice, tolerance) {
                        result.push(lattice);
                    }
                    x += 1.0;
                }
                y += 1.0;
            }
            z += 1.0;
        }
        result
    }

    /// Rasterize on a lattice of `voxel_size` cells anchored at `origin`,
    /// returning world-space voxel positions.
    pub fn rasterize_custom(&self, voxel_size: &Vector3, origin: &Vector3) -> Vec<Vector3> {
        self.rasterize_custom_with_tolerance(voxel_size, origin, RASTERIZE_TOLERANCE)
    }

    /// Like `rasterize_custom` with a containment tolerance in voxel units.
    pub fn rasterize_custom_with_tolerance(
        &self,
        voxel_size: &Vector3,
        origin: &Vector3,
        tolerance: f64,
    ) -> Vec<Vector3> {
        let to_voxel = |p: Vector3| (p - *origin).divide(voxel_size);
        let local = Triangle3D::new(to_voxel(self.p0), to_voxel(self.p1), to_voxel(self.p2));
        local
            .rasterize_with_tolerance(tolerance)
            .into_iter()
            .map(|v| v.multiply(voxel_size) + *origin)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::DEFAULT_PRECISION;
    use approx::assert_relative_eq;

    fn unit_right() -> Triangle3D {
        Triangle3D::new(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn test_normal_area_perimeter() {
        let t = unit_right();
        assert_eq!(t.normal(), Vector3::Z_AXIS);
        assert_relative_eq!(t.area(), 0.5);
        assert_relative_eq!(t.perimeter(), 2.0 + 2f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_triangle_centers() {
        let t = unit_right();
        assert!(t.circumcenter().equals(&Vector3::new(0.5, 0.5, 0.0), DEFAULT_PRECISION));
        assert!(t.orthocenter().equals(&Vector3::zero(), DEFAULT_PRECISION));
        let r = (2.0 - 2f64.sqrt()) / 2.0;
        assert!(t.incenter().equals(&Vector3::new(r, r, 0.0), DEFAULT_PRECISION));
        assert!(t
            .barycenter()
            .equals(&Vector3::new(1.0 / 3.0, 1.0 / 3.0, 0.0), DEFAULT_PRECISION));
    }

    #[test]
    fn test_circumcenter_equidistant() {
        let t = Triangle3D::new(
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(-2.0, 0.5, 1.0),
            Vector3::new(0.0, -1.0, 4.0),
        );
        let c = t.circumcenter();
        let r0 = c.distance(&t.p0);
        assert_relative_eq!(c.distance(&t.p1), r0, epsilon = 1e-9);
        assert_relative_eq!(c.distance(&t.p2), r0, epsilon = 1e-9);
    }

    #[test]
    fn test_on_with_point() {
        let t = unit_right();
        for v in t.points() {
            assert!(t.on_with_point(&v, DEFAULT_PRECISION));
        }
        assert!(t.on_with_point(&t.barycenter(), DEFAULT_PRECISION));
        assert!(t.on_with_point(&Vector3::new(0.5, 0.5, 0.0), DEFAULT_PRECISION));
        assert!(!t.on_with_point(&Vector3::new(0.6, 0.6, 0.0), DEFAULT_PRECISION));
        assert!(!t.on_with_point(&Vector3::new(0.2, 0.2, 0.1), DEFAULT_PRECISION));
    }

    #[test]
    fn test_degenerate_triangle_contains_only_its_edges() {
        let t = Triangle3D::new(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(2.0, 0.0, 0.0),
        );
        assert_eq!(t.normal(), Vector3::zero());
        assert!(t.is_degenerate(DEFAULT_PRECISION));
        assert!(t.on_with_point(&Vector3::new(1.5, 0.0, 0.0), DEFAULT_PRECISION));
        assert!(!t.on_with_point(&Vector3::new(1.5, 1.0, 0.0), DEFAULT_PRECISION));
    }

    #[test]
    fn test_barycentric_round_trip() {
        let t = Triangle3D::new(
            Vector3::new(1.0, 0.0, 2.0),
            Vector3::new(3.0, 1.0, 2.0),
            Vector3::new(0.0, 4.0, 2.0),
        );
        let p = Vector3::new(1.2, 1.5, 2.0);
        let w = t.barycentric_coordinate(&p);
        assert_relative_eq!(w.x + w.y + w.z, 1.0, epsilon = 1e-12);
        assert!(t.point_from_barycentric(&w).equals(&p, DEFAULT_PRECISION));
    }

    #[test]
    fn test_closest_point_regions() {
        let t = unit_right();
        assert_eq!(t.closest_point_with_point(&Vector3::new(-1.0, -1.0, 0.0)), t.p0);
        assert_eq!(t.closest_point_with_point(&Vector3::new(3.0, -1.0, 0.0)), t.p1);
        assert!(t
            .closest_point_with_point(&Vector3::new(0.5, -2.0, 0.0))
            .equals(&Vector3::new(0.5, 0.0, 0.0), DEFAULT_PRECISION));
        assert!(t
            .closest_point_with_point(&Vector3::new(1.0, 1.0, 0.0))
            .equals(&Vector3::new(0.5, 0.5, 0.0), DEFAULT_PRECISION));
        assert!(t
            .closest_point_with_point(&Vector3::new(0.25, 0.25, 5.0))
            .equals(&Vector3::new(0.25, 0.25, 0.0), DEFAULT_PRECISION));
        assert_relative_eq!(t.distance_to_point(&Vector3::new(0.25, 0.25, 5.0)), 5.0);
    }

    #[test]
    fn test_crossing_line() {
        let t = unit_right();
        let line = Line3D::new(Vector3::new(0.25, 0.25, 1.0), -Vector3::Z_AXIS);
        let hit = t.intersection_with_line(&line, DEFAULT_PRECISION);
        assert!(hit.as_point().unwrap().equals(&Vector3::new(0.25, 0.25, 0.0), DEFAULT_PRECISION));

        let miss = Line3D::new(Vector3::new(2.0, 2.0, 1.0), -Vector3::Z_AXIS);
        assert!(t.intersection_with_line(&miss, DEFAULT_PRECISION).is_none());
    }

    #[test]
    fn test_coplanar_line_cuts_segment() {
        let t = unit_right();
        let line = Line3D::new(Vector3::new(-1.0, 0.25, 0.0), Vector3::X_AXIS);
        let cut = t
            .intersection_with_line(&line, DEFAULT_PRECISION)
            .as_segment()
            .unwrap();
        assert!(cut.equals(
            &Segment3D::new(Vector3::new(0.0, 0.25, 0.0), Vector3::new(0.75, 0.25, 0.0)),
            DEFAULT_PRECISION
        ));
    }

    #[test]
    fn test_coplanar_line_along_edge_and_through_vertex() {
        let t = unit_right();
        let along = Line3D::new(Vector3::new(5.0, 0.0, 0.0), Vector3::X_AXIS);
        let edge = t
            .intersection_with_line(&along, DEFAULT_PRECISION)
            .as_segment()
            .unwrap();
        assert!(edge.equals(&Segment3D::new(t.p0, t.p1), DEFAULT_PRECISION));

        // touches only the vertex p1
        let touching = Line3D::new(Vector3::new(0.0, -1.0, 0.0), Vector3::new(1.0, 1.0, 0.0));
        let point = t
            .intersection_with_line(&touching, DEFAULT_PRECISION)
            .as_point()
            .unwrap();
        assert!(point.equals(&t.p1, DEFAULT_PRECISION));
    }

    #[test]
    fn test_intersection_with_segment() {
        let t = unit_right();
        let through = Segment3D::new(Vector3::new(0.2, 0.2, -1.0), Vector3::new(0.2, 0.2, 1.0));
        assert!(t
            .intersection_with_segment(&through, DEFAULT_PRECISION)
            .as_point()
            .is_some());

        let short = Segment3D::new(Vector3::new(0.2, 0.2, 0.5), Vector3::new(0.2, 0.2, 1.0));
        assert!(t.intersection_with_segment(&short, DEFAULT_PRECISION).is_none());

        let coplanar = Segment3D::new(Vector3::new(-1.0, 0.25, 0.0), Vector3::new(0.5, 0.25, 0.0));
        let clipped = t
            .intersection_with_segment(&coplanar, DEFAULT_PRECISION)
            .as_segment()
            .unwrap();
        assert!(clipped.equals(
            &Segment3D::new(Vector3::new(0.0, 0.25, 0.0), Vector3::new(0.5, 0.25, 0.0)),
            DEFAULT_PRECISION
        ));
    }

    #[test]
    fn test_ray_intersection() {
        let t = unit_right();
        let mut normal = Vector3::zero();
        let d = t.ray_intersection(
            &Vector3::new(0.2, 0.2, 3.0),
            &Vector3::new(0.0, 0.0, -1.0),
            &mut normal,
        );
        assert_relative_eq!(d, 3.0);
        assert_eq!(normal, Vector3::Z_AXIS);

        let miss = t.ray_intersection(&Vector3::new(0.2, 0.2, 3.0), &Vector3::Z_AXIS, &mut normal);
        assert_eq!(miss, -1.0);
    }

    #[test]
    fn test_decompose_on_edge() {
        let t = unit_right();
        let p = Vector3::new(0.5, 0.0, 0.0);
        let pieces = t.decompose_with_point(&p, DEFAULT_PRECISION);
        assert_eq!(pieces.len(), 2);
        for piece in &pieces {
            assert!(piece.points().iter().any(|v| v.equals(&p, DEFAULT_PRECISION)));
            assert!(piece.normal().equals(&t.normal(), DEFAULT_PRECISION));
        }
        let area: f64 = pieces.iter().map(|x| x.area()).sum();
        assert_relative_eq!(area, t.area(), epsilon = 1e-12);
    }

    #[test]
    fn test_decompose_interior_vertex_and_outside() {
        let t = unit_right();
        let pieces = t.decompose_with_point(&Vector3::new(0.2, 0.2, 0.0), DEFAULT_PRECISION);
        assert_eq!(pieces.len(), 3);
        assert_eq!(t.decompose_with_point(&t.p2, DEFAULT_PRECISION), vec![t]);
        assert_eq!(
            t.decompose_with_point(&Vector3::new(5.0, 5.0, 0.0), DEFAULT_PRECISION),
            vec![t]
        );
    }

    #[test]
    fn test_decompose_with_segment_and_line() {
        let t = unit_right();
        let cut = Segment3D::new(Vector3::new(0.5, -1.0, 0.0), Vector3::new(0.5, 1.0, 0.0));
        let pieces = t.decompose_with_segment(&cut, DEFAULT_PRECISION);
        // split on edge p0p1 at (0.5, 0), then the piece holding (0.5, 0.5) on the hypotenuse
        assert_eq!(pieces.len(), 3);
        let area: f64 = pieces.iter().map(|x| x.area()).sum();
        assert_relative_eq!(area, t.area(), epsilon = 1e-12);

        let line = Line3D::new(Vector3::new(0.2, 0.2, 1.0), -Vector3::Z_AXIS);
        assert_eq!(t.decompose_with_line(&line, DEFAULT_PRECISION).len(), 3);
    }

    #[test]
    fn test_rasterize() {
        let t = Triangle3D::new(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(4.0, 0.0, 0.0),
            Vector3::new(0.0, 4.0, 0.0),
        );
        let voxels = t.rasterize();
        assert!(voxels.contains(&Vector3::new(0.0, 0.0, 0.0)));
        assert!(voxels.contains(&Vector3::new(1.0, 1.0, 0.0)));
        assert!(voxels.contains(&Vector3::new(4.0, 0.0, 0.0)));
        assert!(!voxels.contains(&Vector3::new(4.0, 4.0, 0.0)));
        assert!(voxels.iter().all(|v| v.z == 0.0));
    }

    #[test]
    fn test_rasterize_custom_scales_lattice() {
        let t = Triangle3D::new(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(2.0, 0.0, 0.0),
            Vector3::new(0.0, 2.0, 0.0),
        );
        let size = Vector3::new(0.5, 0.5, 0.5);
        let origin = Vector3::new(0.0, 0.0, 0.0);
        let voxels = t.rasterize_custom(&size, &origin);
        assert!(voxels.iter().any(|v| v.equals(&Vector3::new(0.5, 0.5, 0.0), DEFAULT_PRECISION)));
        assert!(voxels.iter().all(|v| t.on_with_point(v, 0.5 * 0.5 + DEFAULT_PRECISION)));
    }

    #[test]
    fn test_rasterize_custom_with_tolerance() {
        let t = Triangle3D::new(
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(3.0, 1.0, 1.0),
            Vector3::new(1.0, 3.0, 1.0),
        );
        let size = Vector3::new(0.5, 0.5, 0.5);
        let origin = Vector3::new(1.0, 1.0, 1.0);

        // 4 cells per leg: lattice points with i + j <= 4
        let exact = t.rasterize_custom_with_tolerance(&size, &origin, 1e-9);
        assert_eq!(exact.len(), 15);
        assert!(exact.iter().all(|v| t.on_with_point(v, DEFAULT_PRECISION)));

        let loose = t.rasterize_custom(&size, &origin);
        assert!(exact
            .iter()
            .all(|v| loose.iter().any(|w| w.equals(v, DEFAULT_PRECISION))));
    }

    #[test]
    fn test_equals_and_flip() {
        let t = unit_right();
        let rotated = Triangle3D::new(t.p1, t.p2, t.p0);
        assert!(t.equals(&rotated, DEFAULT_PRECISION));
        let mut flipped = t;
        flipped.flip();
        assert!(!t.equals(&flipped, DEFAULT_PRECISION));
        assert_eq!(flipped.normal(), -Vector3::Z_AXIS);
    }
}
