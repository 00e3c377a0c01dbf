// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI subsystem for the geokernel tool

pub mod logger;
pub mod reporter;
pub mod runner;

pub use reporter::Reporter;
pub use runner::{
    parse_vector, BoundsReport, ClassifyReport, InspectReport, RasterizeReport, RayHit,
    RaycastReport, Runner,
};
