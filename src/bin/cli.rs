// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geokernel CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use geokernel::cli::{logger, parse_vector, Reporter, Runner};
use geokernel::geometry::Vector3;
use geokernel::KernelConfig;
use log::LevelFilter;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "geokernel")]
#[command(about = "Geokernel - 3-D geometry queries on point clouds and triangle meshes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./geokernel.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Bounding box and sphere of a JSON point list
    Bounds {
        /// Input JSON file
        input: PathBuf,
    },

    /// Triangle count, closedness, area, volume and bounds of a mesh
    Inspect {
        /// Input mesh (.stl or .json)
        input: PathBuf,
    },

    /// Classify a point as inside, outside or on the surface of a closed mesh
    Classify {
        /// Input mesh (.stl or .json)
        input: PathBuf,

        /// Query point as x,y,z
        #[arg(short, long, value_parser = parse_vector, allow_hyphen_values = true)]
        point: Vector3,
    },

    /// Cast a ray against a mesh, its bounding box and its bounding sphere
    Raycast {
        /// Input mesh (.stl or .json)
        input: PathBuf,

        /// Ray origin as x,y,z
        #[arg(short, long, value_parser = parse_vector, allow_hyphen_values = true)]
        origin: Vector3,

        /// Ray direction as x,y,z
        #[arg(short, long, value_parser = parse_vector, allow_hyphen_values = true)]
        direction: Vector3,
    },

    /// Voxelize the surface of a mesh
    Rasterize {
        /// Input mesh (.stl or .json)
        input: PathBuf,

        /// Lattice spacing
        #[arg(short, long, default_value = "1.0")]
        size: f64,
    },

    /// Show version information
    Version,
}

fn main() {
    if let Err(err) = run() {
        Reporter::report_error(&format!("{:#}", err));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            let mut config = KernelConfig::from_file(path)?;
            config.apply_env_overrides(|key| std::env::var(key).ok())?;
            config
        }
        None => KernelConfig::load()?,
    };

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        config.level_filter()
    };
    logger::init(level).context("Failed to install logger")?;
    log::debug!("precision {}, log level {}", config.precision, level);

    let runner = Runner::new(config);

    match &cli.command {
        Commands::Bounds { input } => {
            let report = runner.bounds(input)?;
            emit(cli.json, &report, || Reporter::report_bounds(&display(input), &report))?;
        }
        Commands::Inspect { input } => {
            let report = runner.inspect(input)?;
            emit(cli.json, &report, || {
                Reporter::report_inspection(&display(input), &report)
            })?;
        }
        Commands::Classify { input, point } => {
            let report = runner.classify(input, *point)?;
            emit(cli.json, &report, || {
                Reporter::report_classification(&display(input), &report)
            })?;
        }
        Commands::Raycast {
            input,
            origin,
            direction,
        } => {
            let report = runner.raycast(input, *origin, *direction)?;
            emit(cli.json, &report, || Reporter::report_raycast(&display(input), &report))?;
        }
        Commands::Rasterize { input, size } => {
            let report = runner.rasterize(input, *size)?;
            if report.voxels.is_empty() {
                Reporter::report_warning("no voxels produced");
            }
            emit(cli.json, &report, || {
                Reporter::report_rasterize(&display(input), &report)
            })?;
        }
        Commands::Version => {
            println!("Geokernel v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn display(path: &std::path::Path) -> String {
    path.display().to_string()
}

fn emit<T: Serialize>(json: bool, report: &T, pretty: impl FnOnce()) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
        println!("{}", text);
    } else {
        pretty();
    }
    Ok(())
}
