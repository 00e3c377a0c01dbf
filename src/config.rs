// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Tool configuration
//!
//! Values here only feed call-site parameters; kernel functions always take
//! their tolerance explicitly.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::GeometryError;
use crate::geometry::RASTERIZE_TOLERANCE;
use crate::utils::DEFAULT_PRECISION;

/// File read by `KernelConfig::load` when present in the working directory
pub const CONFIG_FILE: &str = "geokernel.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    /// Equality and intersection tolerance passed to kernel queries
    pub precision: f64,
    /// Containment tolerance used when voxelizing triangles
    pub rasterize_tolerance: f64,
    /// One of `error`, `warn`, `info`, `debug`, `trace`
    pub log_level: String,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            rasterize_tolerance: RASTERIZE_TOLERANCE,
            log_level: "warn".to_string(),
        }
    }
}

impl KernelConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: KernelConfig = toml::from_str(&content)
            .map_err(GeometryError::from)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load `geokernel.toml` if present, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `GEOKERNEL_*` overrides from `lookup`
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(precision) = lookup("GEOKERNEL_PRECISION") {
            self.precision = precision
                .parse()
                .with_context(|| format!("Invalid GEOKERNEL_PRECISION: {}", precision))?;
        }

        if let Some(tolerance) = lookup("GEOKERNEL_RASTERIZE_TOLERANCE") {
            self.rasterize_tolerance = tolerance
                .parse()
                .with_context(|| format!("Invalid GEOKERNEL_RASTERIZE_TOLERANCE: {}", tolerance))?;
        }

        if let Some(level) = lookup("GEOKERNEL_LOG_LEVEL") {
            self.log_level = level;
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Parsed `log_level`, falling back to `Warn` for unknown names
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Warn)
    }
}
