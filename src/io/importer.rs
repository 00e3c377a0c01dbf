// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Point cloud and mesh importers

use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;
use std::fs::{self, File};
use std::path::Path;

use crate::error::GeometryError;
use crate::geometry::{Triangle3D, TriangleGeometry, Vector3};

/// Coordinates as either a flat `[x, y, z, ...]` array or a list of triples
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Coordinates {
    Flat(Vec<f64>),
    Triples(Vec<[f64; 3]>),
}

impl Coordinates {
    fn into_flat(self) -> Vec<f64> {
        match self {
            Coordinates::Flat(values) => values,
            Coordinates::Triples(triples) => triples.into_iter().flatten().collect(),
        }
    }
}

fn read_coordinates(path: &Path) -> Result<Vec<f64>> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file: {:?}", path))?;
    let coordinates: Coordinates = serde_json::from_str(&source)
        .map_err(GeometryError::from)
        .with_context(|| format!("Failed to parse JSON file: {:?}", path))?;
    Ok(coordinates.into_flat())
}

/// Load a point list from JSON
pub fn load_points_json(path: impl AsRef<Path>) -> Result<Vec<Vector3>> {
    let path = path.as_ref();
    let flat = read_coordinates(path)?;
    if flat.len() % 3 != 0 {
        return Err(GeometryError::CoordinateCount(flat.len()))
            .with_context(|| format!("Invalid point buffer in {:?}", path));
    }
    let points: Vec<Vector3> = flat
        .chunks_exact(3)
        .map(|c| Vector3::new(c[0], c[1], c[2]))
        .collect();
    debug!("loaded {} points from {:?}", points.len(), path);
    Ok(points)
}

/// Load a triangle mesh from JSON, three consecutive vertices per triangle
pub fn load_geometry_json(path: impl AsRef<Path>) -> Result<TriangleGeometry> {
    let path = path.as_ref();
    let flat = read_coordinates(path)?;
    let geometry = TriangleGeometry::from_positions(&flat)
        .with_context(|| format!("Invalid triangle buffer in {:?}", path))?;
    debug!("loaded {} triangles from {:?}", geometry.len(), path);
    Ok(geometry)
}

/// Load a triangle mesh from an ASCII or binary STL file
pub fn import_stl(path: impl AsRef<Path>) -> Result<TriangleGeometry> {
    let path = path.as_ref();
    let mut file =
        File::open(path).with_context(|| format!("Failed to open STL file: {:?}", path))?;
    let stl = stl_io::read_stl(&mut file)
        .map_err(GeometryError::from)
        .with_context(|| format!("Failed to read STL file: {:?}", path))?;

    let vertex = |index: usize| {
        let v = &stl.vertices[index];
        Vector3::new(v[0] as f64, v[1] as f64, v[2] as f64)
    };

    let triangles = stl
        .faces
        .iter()
        .map(|face| {
            Triangle3D::new(
                vertex(face.vertices[0]),
                vertex(face.vertices[1]),
                vertex(face.vertices[2]),
            )
        })
        .collect();
    let geometry = TriangleGeometry::from_triangles(triangles);
    debug!("imported {} triangles from {:?}", geometry.len(), path);
    Ok(geometry)
}

/// Load a mesh, choosing the format from the file extension (`.stl`, otherwise JSON)
pub fn load_geometry(path: impl AsRef<Path>) -> Result<TriangleGeometry> {
    let path = path.as_ref();
    let is_stl = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("stl"));
    if is_stl {
        import_stl(path)
    } else {
        load_geometry_json(path)
    }
}
