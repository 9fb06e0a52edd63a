use super::{finite_axis, plot_err, rgb};
use crate::config::PlotConfig;
use crate::grid::error::{GridError, Result};
use crate::grid::palettes::palette_registry;
use crate::grid::reshape::value_range;
use plotters::prelude::*;
use std::path::Path;

/// Scatter plot of a two-column feature matrix, points colored by target
pub fn scatter(
    features: &[[f64; 2]],
    target: &[f64],
    path: &Path,
    size: (u32, u32),
    config: &PlotConfig,
) -> Result<()> {
    if features.len() != target.len() {
        return Err(GridError::LengthMismatch {
            expected: features.len(),
            actual: target.len(),
        });
    }

    let (x_min, x_max) = value_range(features.iter().map(|f| f[0]))
        .ok_or_else(|| GridError::Plot("No points to plot".to_string()))?;
    let (y_min, y_max) = value_range(features.iter().map(|f| f[1]))
        .ok_or_else(|| GridError::Plot("No points to plot".to_string()))?;
    let (t_min, t_max) = value_range(target.iter().copied()).unwrap_or((0.0, 0.0));

    let palette = palette_registry()
        .get_or_default(&config.palette)
        .ok_or_else(|| GridError::Plot("No palette available".to_string()))?;

    let (x_axis, y_axis) = (finite_axis(x_min, x_max)?, finite_axis(y_min, y_max)?);

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(10).x_label_area_size(40).y_label_area_size(50);
    if let Some(title) = &config.plot_title {
        builder.caption(title, ("sans-serif", 20));
    }

    let mut chart = builder
        .build_cartesian_2d(x_axis, y_axis)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc(config.x_axis_label.as_str())
        .y_desc(config.y_axis_label.as_str())
        .draw()
        .map_err(plot_err)?;

    let radius = config.point_size.round() as u32;
    chart
        .draw_series(features.iter().zip(target).map(|(f, &y)| {
            Circle::new(
                (f[0], f[1]),
                radius,
                rgb(palette.color_for(y, t_min, t_max)).filled(),
            )
        }))
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::reshape::reshape;
    use crate::plot::scratch_svg;

    #[test]
    fn test_scatter_writes_svg() {
        let table = reshape(&[1.0, 4.0, 9.0, 16.0, 25.0, 36.0], 2, 3).unwrap();
        let path = scratch_svg("scatter");

        scatter(
            &table.features(),
            &table.target(),
            &path,
            (400, 300),
            &PlotConfig::default(),
        )
        .unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("<circle"));
    }

    #[test]
    fn test_scatter_length_mismatch() {
        let path = scratch_svg("scatter_bad");
        let err = scatter(
            &[[1.0, 1.0], [2.0, 1.0]],
            &[1.0],
            &path,
            (400, 300),
            &PlotConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            GridError::LengthMismatch {
                expected: 2,
                actual: 1
            }
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_scatter_rejects_unbounded_features() {
        let path = scratch_svg("scatter_wide");
        let err = scatter(
            &[[1.0, 1.0], [f64::INFINITY, 2.0]],
            &[1.0, 2.0],
            &path,
            (400, 300),
            &PlotConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, GridError::Plot(_)));

        let err = scatter(&[], &[], &path, (400, 300), &PlotConfig::default()).unwrap_err();
        assert!(matches!(err, GridError::Plot(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_scatter_non_finite_target() {
        let table = reshape(&[1.0, f64::NAN, f64::INFINITY, 4.0], 2, 2).unwrap();
        let path = scratch_svg("scatter_inf");

        scatter(
            &table.features(),
            &table.target(),
            &path,
            (400, 300),
            &PlotConfig::default(),
        )
        .unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(svg.contains("<circle"));
    }
}
