// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Input decoding errors
//!
//! Geometric queries never fail; a missing intersection is reported through
//! `Intersection::None`. These errors only cover turning raw buffers and files
//! into kernel values.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("coordinate buffer length {0} is not a multiple of 3")]
    CoordinateCount(usize),

    #[error("vertex count {0} is not a multiple of 3")]
    TriangleCount(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GeometryError::CoordinateCount(7).to_string(),
            "coordinate buffer length 7 is not a multiple of 3"
        );
        assert_eq!(
            GeometryError::TriangleCount(4).to_string(),
            "vertex count 4 is not a multiple of 3"
        );
    }

    #[test]
    fn test_from_json_error() {
        let err: GeometryError = serde_json::from_str::<Vec<f64>>("[1,").unwrap_err().into();
        assert!(matches!(err, GeometryError::Json(_)));
    }
}
