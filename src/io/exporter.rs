// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! STL exporter

use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use stl_io::{Normal, Triangle as StlTriangle, Vertex as StlVertex};

use crate::geometry::{TriangleGeometry, Vector3};

fn to_vertex(v: &Vector3) -> StlVertex {
    StlVertex::new([v.x as f32, v.y as f32, v.z as f32])
}

/// Write a mesh as binary STL. Facet normals are computed from the winding.
pub fn export_stl(geometry: &TriangleGeometry, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let triangles: Vec<StlTriangle> = geometry
        .triangles()
        .iter()
        .map(|tri| {
            let n = tri.normal();
            StlTriangle {
                normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                vertices: [to_vertex(&tri.p0), to_vertex(&tri.p1), to_vertex(&tri.p2)],
            }
        })
        .collect();

    let file =
        File::create(path).with_context(|| format!("Failed to create STL file: {:?}", path))?;
    let mut writer = BufWriter::new(file);
    stl_io::write_stl(&mut writer, triangles.iter())
        .with_context(|| format!("Failed to write STL file: {:?}", path))?;
    Ok(())
}
