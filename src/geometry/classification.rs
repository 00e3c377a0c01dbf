// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Point classification outcomes

use serde::{Deserialize, Serialize};

/// Side of a plane a point lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaneClassification {
    /// Negative signed distance
    Back,
    /// Positive signed distance
    Front,
    /// Within tolerance of the plane
    Intersect,
}

/// Position of a point relative to a closed triangle mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    Inside,
    Outside,
    OnSurface,
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Classification::Inside => "inside",
            Classification::Outside => "outside",
            Classification::OnSurface => "on surface",
        };
        f.write_str(name)
    }
}
