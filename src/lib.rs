// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geokernel
//!
//! A 3-D computational-geometry kernel: vectors, lines, segments, planes,
//! triangles, bounding boxes, spheres and triangle meshes, with the
//! intersection, classification and decomposition queries between them.
//! Every tolerance is an explicit argument; `DEFAULT_PRECISION` is the
//! conventional value.

pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod utils;

pub use config::KernelConfig;
pub use error::GeometryError;
pub use geometry::{
    BoundingBox, Classification, Intersection, Line3D, MeshIntersection, Plane3D,
    PlaneClassification, Segment3D, Sphere, Triangle3D, TriangleGeometry, Vector3,
};
pub use io::{export_stl, import_stl, load_geometry_json, load_points_json};
pub use utils::DEFAULT_PRECISION;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_cube() {
        let bbox = BoundingBox::new(Vector3::zero(), Vector3::new(10.0, 10.0, 10.0));
        let mesh = TriangleGeometry::from_triangles(bbox.to_triangles());
        assert!(mesh.is_closed(DEFAULT_PRECISION));
        assert_eq!(
            mesh.classify_point(&bbox.center(), DEFAULT_PRECISION),
            Classification::Inside
        );
    }
}
