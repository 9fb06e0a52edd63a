//! Contour plots
//!
//! Each grid point is drawn as a cell filled with the color of its level band,
//! then iso-lines for every level are traced with marching squares and drawn
//! on top. Grid points sit at their 1-based `(X1, X2)` coordinates.

use super::{plot_err, rgb};
use crate::config::PlotConfig;
use crate::grid::error::{GridError, Result};
use crate::grid::matrix::GridMatrix;
use crate::grid::palettes::palette_registry;
use plotters::prelude::*;
use std::path::Path;

pub type Point = (f64, f64);
pub type Segment = (Point, Point);

/// `count` evenly spaced levels strictly inside `(min, max)`
///
/// Returns nothing for a flat or non-finite range.
pub fn contour_levels(min: f64, max: f64, count: usize) -> Vec<f64> {
    let span = max - min;
    if !span.is_finite() || span <= 0.0 {
        return Vec::new();
    }
    let step = span / (count + 1) as f64;
    (1..=count).map(|i| min + step * i as f64).collect()
}

/// Index of the band `value` falls into: the number of levels `<= value`
pub fn band_index(value: f64, levels: &[f64]) -> usize {
    levels.partition_point(|&level| level <= value)
}

/// Iso-line segments at `level`, traced with marching squares
///
/// Cells with a NaN or infinite corner are skipped. Saddle cells are resolved with the
/// mean of the four corners.
pub fn iso_segments(matrix: &GridMatrix, level: f64) -> Vec<Segment> {
    let mut segments = Vec::new();
    if matrix.rows() < 2 || matrix.cols() < 2 {
        return segments;
    }

    for c in 0..matrix.cols() - 1 {
        for r in 0..matrix.rows() - 1 {
            // Corners counter-clockwise from (r, c): bottom-left first
            let corners = [
                (point(r, c), matrix.at(r, c)),
                (point(r + 1, c), matrix.at(r + 1, c)),
                (point(r + 1, c + 1), matrix.at(r + 1, c + 1)),
                (point(r, c + 1), matrix.at(r, c + 1)),
            ];
            if corners.iter().any(|(_, v)| !v.is_finite()) {
                continue;
            }
            trace_cell(&corners, level, &mut segments);
        }
    }

    segments
}

fn point(r: usize, c: usize) -> Point {
    ((r + 1) as f64, (c + 1) as f64)
}

fn trace_cell(corners: &[(Point, f64); 4], level: f64, out: &mut Vec<Segment>) {
    // Crossing point on edge i (corner i -> corner i+1), if any
    let mut crossings: [Option<Point>; 4] = [None; 4];
    for (i, crossing) in crossings.iter_mut().enumerate() {
        let (pa, va) = corners[i];
        let (pb, vb) = corners[(i + 1) % 4];
        if (va >= level) != (vb >= level) {
            let t = (level - va) / (vb - va);
            *crossing = Some((pa.0 + t * (pb.0 - pa.0), pa.1 + t * (pb.1 - pa.1)));
        }
    }

    match crossings {
        [Some(bottom), Some(right), Some(top), Some(left)] => {
            let center = corners.iter().map(|(_, v)| v).sum::<f64>() / 4.0;
            if (center >= level) == (corners[0].1 >= level) {
                // Corners 1 and 3 are cut off
                out.push((bottom, right));
                out.push((top, left));
            } else {
                // Corners 0 and 2 are cut off
                out.push((left, bottom));
                out.push((right, top));
            }
        }
        _ => {
            let mut found = crossings.iter().flatten();
            if let (Some(&a), Some(&b)) = (found.next(), found.next()) {
                out.push((a, b));
            }
        }
    }
}

/// Contour plot of a flat value vector reshaped into an `n × n` grid
pub fn contour(
    values: &[f64],
    n: usize,
    path: &Path,
    size: (u32, u32),
    config: &PlotConfig,
) -> Result<()> {
    let matrix = GridMatrix::square(values, n)?;
    render_contour(&matrix, path, size, config)
}

/// Contour plot over a grid matrix
pub fn render_contour(
    matrix: &GridMatrix,
    path: &Path,
    size: (u32, u32),
    config: &PlotConfig,
) -> Result<()> {
    let (v_min, v_max) = matrix
        .finite_range()
        .ok_or_else(|| GridError::Plot("Contour has no finite values".to_string()))?;
    let levels = contour_levels(v_min, v_max, config.contour_levels);

    let palette = palette_registry()
        .get_or_default(&config.palette)
        .ok_or_else(|| GridError::Plot("No palette available".to_string()))?;

    let rows = matrix.rows();
    let cols = matrix.cols();

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(10).x_label_area_size(40).y_label_area_size(50);
    if let Some(title) = &config.plot_title {
        builder.caption(title, ("sans-serif", 20));
    }

    let mut chart = builder
        .build_cartesian_2d(0.5..rows as f64 + 0.5, 0.5..cols as f64 + 0.5)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(config.x_axis_label.as_str())
        .y_desc(config.y_axis_label.as_str())
        .draw()
        .map_err(plot_err)?;

    let n_bands = (levels.len() + 1) as f64;
    let cells = (0..cols).flat_map(|c| (0..rows).map(move |r| (r, c)));
    chart
        .draw_series(cells.filter_map(|(r, c)| {
            let value = matrix.at(r, c);
            if value.is_nan() {
                return None;
            }
            let band = band_index(value, &levels) as f64;
            let color = rgb(palette.interpolate(band / (n_bands - 1.0).max(1.0)));
            let (x, y) = point(r, c);
            Some(Rectangle::new(
                [(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)],
                color.filled(),
            ))
        }))
        .map_err(plot_err)?;

    for &level in &levels {
        chart
            .draw_series(
                iso_segments(matrix, level)
                    .into_iter()
                    .map(|(a, b)| PathElement::new(vec![a, b], BLACK.mix(0.8))),
            )
            .map_err(plot_err)?;
    }

    root.present().map_err(plot_err)?;
    Ok(())
}
