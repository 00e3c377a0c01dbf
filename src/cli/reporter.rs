// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use super::runner::{
    BoundsReport, ClassifyReport, InspectReport, RasterizeReport, RayHit, RaycastReport,
};
use crate::geometry::{BoundingBox, Classification, Vector3};
use colored::*;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    fn rule() {
        println!("{}", "━".repeat(80).bright_black());
    }

    fn header(label: &str, file: &str) {
        println!();
        Self::rule();
        println!("{} {}", label.bold(), file.cyan());
        Self::rule();
    }

    fn field(name: &str, value: String) {
        println!("  {:<12} {}", format!("{}:", name).bright_black(), value);
    }

    pub fn report_bounds(file: &str, report: &BoundsReport) {
        Self::header("Points:", file);
        Self::field("Count", report.points.to_string().cyan().to_string());
        Self::field("Box", Self::format_box(&report.bbox));
        Self::field(
            "Sphere",
            format!(
                "center {} radius {:.6}",
                Self::format_vector(&report.sphere.center),
                report.sphere.radius
            ),
        );
        Self::rule();
    }

    pub fn report_inspection(file: &str, report: &InspectReport) {
        Self::header("Mesh:", file);
        Self::field("Triangles", report.triangles.to_string().cyan().to_string());
        if report.degenerate > 0 {
            Self::field("Degenerate", report.degenerate.to_string().yellow().to_string());
        }
        let closed = if report.closed {
            "yes".green()
        } else {
            "no".red()
        };
        Self::field("Closed", closed.to_string());
        Self::field("Area", format!("{:.6}", report.area));
        if report.closed {
            Self::field("Volume", format!("{:.6}", report.volume));
        }
        Self::field("Box", Self::format_box(&report.bbox));
        Self::field(
            "Time",
            Self::format_duration(report.duration).yellow().to_string(),
        );
        Self::rule();
    }

    pub fn report_classification(file: &str, report: &ClassifyReport) {
        Self::header("Classify:", file);
        let label = match report.classification {
            Classification::Inside => "inside".green().bold(),
            Classification::Outside => "outside".red().bold(),
            Classification::OnSurface => "on surface".yellow().bold(),
        };
        Self::field("Point", Self::format_vector(&report.point));
        Self::field("Result", label.to_string());
        Self::rule();
    }

    pub fn report_raycast(file: &str, report: &RaycastReport) {
        Self::header("Raycast:", file);
        Self::field("Origin", Self::format_vector(&report.origin));
        Self::field("Direction", Self::format_vector(&report.direction));
        Self::field("Mesh", Self::format_hit(report.mesh.as_ref()));
        Self::field("Box", Self::format_hit(report.bbox.as_ref()));
        Self::field("Sphere", Self::format_hit(report.sphere.as_ref()));
        Self::rule();
    }

    pub fn report_rasterize(file: &str, report: &RasterizeReport) {
        Self::header("Rasterize:", file);
        Self::field("Triangles", report.triangles.to_string().cyan().to_string());
        Self::field("Voxel size", format!("{}", report.voxel_size));
        Self::field("Voxels", report.voxels.len().to_string().cyan().to_string());
        Self::rule();
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        println!("\n{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    fn format_hit(hit: Option<&RayHit>) -> String {
        match hit {
            Some(hit) if hit.distance == 0.0 => "origin inside".yellow().to_string(),
            Some(hit) => format!(
                "{} normal {}",
                format!("t = {:.6}", hit.distance).green(),
                Self::format_vector(&hit.normal)
            ),
            None => "miss".bright_black().to_string(),
        }
    }

    fn format_box(bbox: &BoundingBox) -> String {
        if bbox.is_empty() {
            return "empty".bright_black().to_string();
        }
        format!(
            "{} → {}",
            Self::format_vector(&bbox.min),
            Self::format_vector(&bbox.max)
        )
    }

    fn format_vector(v: &Vector3) -> String {
        format!("({:.4}, {:.4}, {:.4})", v.x, v.y, v.z)
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(
            Reporter::format_duration(Duration::from_micros(500)),
            "500µs"
        );
        assert_eq!(
            Reporter::format_duration(Duration::from_millis(5)),
            "5.00ms"
        );
        assert_eq!(Reporter::format_duration(Duration::from_secs(2)), "2.00s");
    }

    #[test]
    fn test_format_vector() {
        assert_eq!(
            Reporter::format_vector(&Vector3::new(1.0, -0.5, 2.25)),
            "(1.0000, -0.5000, 2.2500)"
        );
    }

    #[test]
    fn test_format_empty_box() {
        colored::control::set_override(false);
        assert_eq!(Reporter::format_box(&BoundingBox::empty()), "empty");
    }
}
