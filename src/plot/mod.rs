//! Chart rendering
//!
//! Thin sinks over `plotters` for the three chart kinds produced from a grid:
//! - `scatter.rs`: feature matrix `[X1, X2]` colored by target
//! - `surface.rs`: 3D surface over the grid matrix
//! - `contour.rs`: level bands plus iso-lines (marching squares)
//!
//! All charts are written as SVG.

pub mod contour;
pub mod scatter;
pub mod surface;

pub use contour::{contour, render_contour};
pub use scatter::scatter;
pub use surface::{render_surface, surface};

use crate::grid::error::{GridError, Result};
use plotters::style::RGBColor;
use std::ops::Range;

/// Which chart to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Scatter,
    Surface,
    Contour,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Scatter, ChartKind::Surface, ChartKind::Contour];

    /// Output file name for this chart
    pub fn file_name(&self) -> &'static str {
        match self {
            ChartKind::Scatter => "scatter.svg",
            ChartKind::Surface => "surface.svg",
            ChartKind::Contour => "contour.svg",
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ChartKind::Scatter => "scatter",
            ChartKind::Surface => "surface",
            ChartKind::Contour => "contour",
        };
        write!(f, "{}", name)
    }
}

pub(crate) fn plot_err<E: std::fmt::Display>(e: E) -> GridError {
    GridError::Plot(e.to_string())
}

pub(crate) fn rgb(color: [u8; 3]) -> RGBColor {
    RGBColor(color[0], color[1], color[2])
}

/// Axis range with 5% padding; a flat range is widened by 1 on each side
pub(crate) fn padded_range(min: f64, max: f64) -> Range<f64> {
    let span = max - min;
    if !span.is_finite() || span.abs() < f64::EPSILON {
        return (min - 1.0)..(max + 1.0);
    }
    let pad = span * 0.05;
    (min - pad)..(max + pad)
}

/// Padded axis range that plotters can lay ticks out on
///
/// Fails when the bounds or the padded span are not finite.
pub(crate) fn finite_axis(min: f64, max: f64) -> Result<Range<f64>> {
    let range = padded_range(min, max);
    if !(range.end - range.start).is_finite() {
        return Err(GridError::Plot(format!(
            "Value range [{}, {}] is too wide to draw",
            min, max
        )));
    }
    Ok(range)
}

#[cfg(test)]
pub(crate) fn scratch_svg(prefix: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("{}_{}.svg", prefix, uuid::Uuid::new_v4()))
}
