//! Plot configuration from properties
//!
//! All default values come from plot_properties.json via `PropertyReader`;
//! this module only applies validation ranges and groups the values.

use crate::grid::properties::{PlotDimension, PropertyReader};

#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Plot width (pixels or Auto)
    pub plot_width: PlotDimension,

    /// Plot height (pixels or Auto)
    pub plot_height: PlotDimension,

    /// Caption drawn above each chart
    pub plot_title: Option<String>,

    /// Scatter point radius in pixels
    pub point_size: f64,

    /// Continuous palette name
    pub palette: String,

    /// Number of contour levels
    pub contour_levels: usize,

    /// Surface view rotation (radians)
    pub surface_yaw: f64,

    /// Surface view elevation (radians)
    pub surface_pitch: f64,

    pub x_axis_label: String,
    pub y_axis_label: String,
    pub z_axis_label: String,
}

impl PlotConfig {
    pub fn from_properties(props: &PropertyReader) -> Self {
        let plot_width = PlotDimension::parse(&props.get_string("plot.width"), PlotDimension::Auto);
        let plot_height =
            PlotDimension::parse(&props.get_string("plot.height"), PlotDimension::Auto);

        Self {
            plot_width,
            plot_height,
            plot_title: props.get_optional_string("plot.title"),
            point_size: props.get_f64_in_range("point.size", 1.0, 50.0),
            palette: props.get_enum("palette"),
            contour_levels: props.get_usize_in_range("contour.levels", 2, 100),
            surface_yaw: props.get_f64_in_range(
                "surface.yaw",
                -std::f64::consts::PI,
                std::f64::consts::PI,
            ),
            surface_pitch: props.get_f64_in_range(
                "surface.pitch",
                -std::f64::consts::FRAC_PI_2,
                std::f64::consts::FRAC_PI_2,
            ),
            x_axis_label: props.get_string("axis.x.label"),
            y_axis_label: props.get_string("axis.y.label"),
            z_axis_label: props.get_string("axis.z.label"),
        }
    }

    /// Resolve plot dimensions to pixels for a `num_rows × num_cols` grid
    ///
    /// Rows run along the horizontal axis (X1), columns along the vertical (X2).
    pub fn resolve_dimensions(&self, num_rows: usize, num_cols: usize) -> (u32, u32) {
        (
            self.plot_width.resolve(num_rows),
            self.plot_height.resolve(num_cols),
        )
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self::from_properties(&PropertyReader::default())
    }
}
