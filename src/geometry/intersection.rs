// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Shape-valued intersection results

use super::{Line3D, Segment3D, Vector3};
use serde::{Deserialize, Serialize};

/// Result of intersecting two primitives.
///
/// `None` means no well-defined intersection exists (parallel, skew or
/// disjoint inputs). It is a normal outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Intersection {
    None,
    Point(Vector3),
    Line(Line3D),
    Segment(Segment3D),
}

impl Intersection {
    pub fn is_none(&self) -> bool {
        matches!(self, Intersection::None)
    }

    pub fn as_point(&self) -> Option<Vector3> {
        match self {
            Intersection::Point(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_line(&self) -> Option<Line3D> {
        match self {
            Intersection::Line(l) => Some(*l),
            _ => None,
        }
    }

    pub fn as_segment(&self) -> Option<Segment3D> {
        match self {
            Intersection::Segment(s) => Some(*s),
            _ => None,
        }
    }
}

/// Append `point` unless an equal one (within `precision`) is already present.
pub(crate) fn push_unique_point(points: &mut Vec<Vector3>, point: Vector3, precision: f64) -> bool {
    if points.iter().any(|p| p.equals(&point, precision)) {
        return false;
    }
    points.push(point);
    true
}

/// Deduplicate points within `precision`, keeping first occurrences.
pub fn deduplicate_points(points: &[Vector3], precision: f64) -> Vec<Vector3> {
    let mut result: Vec<Vector3> = Vec::with_capacity(points.len());
    for &point in points {
        push_unique_point(&mut result, point, precision);
    }
    result
}
