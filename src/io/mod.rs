// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - loading coordinate buffers and meshes, exporting STL

mod exporter;
mod importer;

pub use exporter::export_stl;
pub use importer::{import_stl, load_geometry, load_geometry_json, load_points_json};
