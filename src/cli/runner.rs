// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Command implementations for the `geokernel` tool

use crate::config::KernelConfig;
use crate::geometry::{
    deduplicate_points, BoundingBox, Classification, Sphere, TriangleGeometry, Vector3,
};
use crate::io;
use anyhow::{bail, Context, Result};
use log::debug;
use serde::Serialize;
use std::path::Path;
use std::time::{Duration, Instant};

/// Bounding volumes of a point cloud
#[derive(Debug, Clone, Serialize)]
pub struct BoundsReport {
    pub points: usize,
    pub bbox: BoundingBox,
    pub sphere: Sphere,
}

/// Summary of a mesh
#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub triangles: usize,
    pub degenerate: usize,
    pub closed: bool,
    pub area: f64,
    pub volume: f64,
    pub bbox: BoundingBox,
    #[serde(skip)]
    pub duration: Duration,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassifyReport {
    pub point: Vector3,
    pub classification: Classification,
}

/// A ray hit: distance along the ray and surface normal
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RayHit {
    pub distance: f64,
    pub normal: Vector3,
}

#[derive(Debug, Clone, Serialize)]
pub struct RaycastReport {
    pub origin: Vector3,
    pub direction: Vector3,
    pub mesh: Option<RayHit>,
    pub bbox: Option<RayHit>,
    pub sphere: Option<RayHit>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RasterizeReport {
    pub triangles: usize,
    pub voxel_size: f64,
    pub voxels: Vec<Vector3>,
}

/// Parse `"x,y,z"` into a vector
pub fn parse_vector(text: &str) -> Result<Vector3> {
    let values: Vec<f64> = text
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .with_context(|| format!("Invalid coordinate {:?} in {:?}", part, text))
        })
        .collect::<Result<_>>()?;
    match values.as_slice() {
        [x, y, z] => Ok(Vector3::new(*x, *y, *z)),
        _ => bail!("Expected three comma-separated values, got {:?}", text),
    }
}

fn hit_from(distance: f64, normal: Vector3) -> Option<RayHit> {
    (distance >= 0.0).then_some(RayHit { distance, normal })
}

/// Runs commands with the tolerances from a loaded configuration
pub struct Runner {
    config: KernelConfig,
}

impl Runner {
    pub fn new(config: KernelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    pub fn bounds(&self, points_path: &Path) -> Result<BoundsReport> {
        let points = io::load_points_json(points_path)?;
        Ok(BoundsReport {
            points: points.len(),
            bbox: BoundingBox::from_points(&points),
            sphere: Sphere::from_points(&points),
        })
    }

    pub fn inspect(&self, mesh_path: &Path) -> Result<InspectReport> {
        let mesh = io::load_geometry(mesh_path)?;
        let start = Instant::now();
        let precision = self.config.precision;
        let report = InspectReport {
            triangles: mesh.len(),
            degenerate: mesh
                .triangles()
                .iter()
                .filter(|t| t.is_degenerate(precision))
                .count(),
            closed: mesh.is_closed(precision),
            area: mesh.area(),
            volume: mesh.volume(),
            bbox: mesh.bounding_box(),
            duration: Duration::ZERO,
        };
        Ok(InspectReport {
            duration: start.elapsed(),
            ..report
        })
    }

    pub fn classify(&self, mesh_path: &Path, point: Vector3) -> Result<ClassifyReport> {
        let mesh = io::load_geometry(mesh_path)?;
        Ok(ClassifyReport {
            point,
            classification: mesh.classify_point(&point, self.config.precision),
        })
    }

    pub fn raycast(
        &self,
        mesh_path: &Path,
        origin: Vector3,
        direction: Vector3,
    ) -> Result<RaycastReport> {
        if direction.is_zero(self.config.precision) {
            bail!("Ray direction must be non-zero");
        }
        let mesh = io::load_geometry(mesh_path)?;
        Ok(Self::cast(&mesh, origin, direction))
    }

    fn cast(mesh: &TriangleGeometry, origin: Vector3, direction: Vector3) -> RaycastReport {
        let bbox = mesh.bounding_box();
        let sphere = Sphere::from_box(&bbox);

        let mut normal = Vector3::zero();
        let mesh_hit = hit_from(mesh.ray_intersection(&origin, &direction, &mut normal), normal);
        let mut normal = Vector3::zero();
        let bbox_hit = hit_from(bbox.ray_intersection(&origin, &direction, &mut normal), normal);
        let mut normal = Vector3::zero();
        let sphere_hit =
            hit_from(sphere.ray_intersection(&origin, &direction, &mut normal), normal);

        RaycastReport {
            origin,
            direction,
            mesh: mesh_hit,
            bbox: bbox_hit,
            sphere: sphere_hit,
        }
    }

    /// Voxelize every triangle on a lattice of `voxel_size` cells anchored at the mesh's minimum corner.
    pub fn rasterize(&self, mesh_path: &Path, voxel_size: f64) -> Result<RasterizeReport> {
        if voxel_size <= 0.0 {
            bail!("Voxel size must be positive, got {}", voxel_size);
        }
        let mesh = io::load_geometry(mesh_path)?;
        let origin = mesh.bounding_box().min;
        let size = Vector3::new(voxel_size, voxel_size, voxel_size);
        let tolerance = self.config.rasterize_tolerance;

        let mut voxels = Vec::new();
        for triangle in mesh.triangles() {
            voxels.extend(triangle.rasterize_custom_with_tolerance(&size, &origin, tolerance));
        }
        let voxels = deduplicate_points(&voxels, self.config.precision);
        debug!("rasterized {} triangles into {} voxels", mesh.len(), voxels.len());

        Ok(RasterizeReport {
            triangles: mesh.len(),
            voxel_size,
            voxels,
        })
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(KernelConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::export_stl;
    use approx::assert_relative_eq;
    use tempfile::TempDir;

    fn write_cube(dir: &TempDir) -> std::path::PathBuf {
        let path = dir.path().join("cube.stl");
        let cube = TriangleGeometry::from_triangles(
            BoundingBox::new(Vector3::zero(), Vector3::new(1.0, 1.0, 1.0)).to_triangles(),
        );
        export_stl(&cube, &path).unwrap();
        path
    }

    #[test]
    fn test_parse_vector() {
        assert_eq!(parse_vector("1, 2.5,-3").unwrap(), Vector3::new(1.0, 2.5, -3.0));
        assert!(parse_vector("1,2").is_err());
        assert!(parse_vector("1,two,3").is_err());
    }

    #[test]
    fn test_inspect_cube() {
        let dir = TempDir::new().unwrap();
        let report = Runner::default().inspect(&write_cube(&dir)).unwrap();
        assert_eq!(report.triangles, 12);
        assert_eq!(report.degenerate, 0);
        assert!(report.closed);
        assert_relative_eq!(report.volume, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_raycast_cube() {
        let dir = TempDir::new().unwrap();
        let report = Runner::default()
            .raycast(
                &write_cube(&dir),
                Vector3::new(-1.0, 0.25, 0.5),
                Vector3::X_AXIS,
            )
            .unwrap();
        let bbox_hit = report.bbox.unwrap();
        assert_relative_eq!(bbox_hit.distance, 1.0);
        assert_eq!(bbox_hit.normal, Vector3::new(-1.0, 0.0, 0.0));
        assert_relative_eq!(report.mesh.unwrap().distance, 1.0, epsilon = 1e-6);
        assert!(report.sphere.unwrap().distance < 1.0);
    }

    #[test]
    fn test_classify_and_rasterize() {
        let dir = TempDir::new().unwrap();
        let path = write_cube(&dir);
        let runner = Runner::default();
        let report = runner.classify(&path, Vector3::new(0.5, 0.5, 0.5)).unwrap();
        assert_eq!(report.classification, Classification::Inside);

        let raster = runner.rasterize(&path, 0.5).unwrap();
        // 3x3x3 lattice, all points on the surface except the center
        assert_eq!(raster.voxels.len(), 26);
    }
}
