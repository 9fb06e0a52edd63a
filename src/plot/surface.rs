use super::{finite_axis, plot_err, rgb};
use crate::config::PlotConfig;
use crate::grid::error::{GridError, Result};
use crate::grid::matrix::GridMatrix;
use crate::grid::palettes::palette_registry;
use plotters::prelude::*;
use std::path::Path;

/// 3D surface of a flat value vector reshaped into an `n × n` grid
pub fn surface(
    values: &[f64],
    n: usize,
    path: &Path,
    size: (u32, u32),
    config: &PlotConfig,
) -> Result<()> {
    let matrix = GridMatrix::square(values, n)?;
    render_surface(&matrix, path, size, config)
}

/// 3D surface over a grid matrix
///
/// Rows run along the x axis, columns along the depth (z) axis and values
/// are the height. Both grid axes use the 1-based indices of the table.
/// Infinite values are clamped to the finite value range and NaN cells are
/// drawn at its floor.
pub fn render_surface(
    matrix: &GridMatrix,
    path: &Path,
    size: (u32, u32),
    config: &PlotConfig,
) -> Result<()> {
    let (v_min, v_max) = matrix
        .finite_range()
        .ok_or_else(|| GridError::Plot("Surface has no finite values".to_string()))?;
    let value_axis = finite_axis(v_min, v_max)?;

    let palette = palette_registry()
        .get_or_default(&config.palette)
        .ok_or_else(|| GridError::Plot("No palette available".to_string()))?;

    let rows = matrix.rows();
    let cols = matrix.cols();

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(20);
    if let Some(title) = &config.plot_title {
        builder.caption(title, ("sans-serif", 20));
    }

    let mut chart = builder
        .build_cartesian_3d(
            1.0..rows.max(2) as f64,
            value_axis,
            1.0..cols.max(2) as f64,
        )
        .map_err(plot_err)?;

    let (yaw, pitch) = (config.surface_yaw, config.surface_pitch);
    chart.with_projection(|mut pb| {
        pb.yaw = yaw;
        pb.pitch = pitch;
        pb.scale = 0.8;
        pb.into_matrix()
    });

    chart
        .configure_axes()
        .draw()
        .map_err(plot_err)?;

    let style = |v: &f64| -> ShapeStyle { rgb(palette.color_for(*v, v_min, v_max)).filled() };

    chart
        .draw_series(
            SurfaceSeries::xoz(
                (1..=rows).map(|r| r as f64),
                (1..=cols).map(|c| c as f64),
                |x: f64, z: f64| {
                    let v = matrix.at(x as usize - 1, z as usize - 1);
                    if v.is_nan() {
                        v_min
                    } else {
                        v.clamp(v_min, v_max)
                    }
                },
            )
            .style_func(&style),
        )
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}
