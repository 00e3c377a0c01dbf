// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - primitives, bounding volumes and mesh queries

mod bbox;
mod classification;
pub mod intersection;
mod line3d;
mod plane3d;
mod segment3d;
mod sphere;
mod triangle3d;
mod triangle_geometry;
mod vector3;

pub use bbox::BoundingBox;
pub use classification::{Classification, PlaneClassification};
pub use intersection::{deduplicate_points, Intersection};
pub use line3d::Line3D;
pub use plane3d::Plane3D;
pub use segment3d::Segment3D;
pub use sphere::Sphere;
pub use triangle3d::{Triangle3D, RASTERIZE_TOLERANCE};
pub use triangle_geometry::{MeshIntersection, TriangleGeometry};
pub use vector3::Vector3;
