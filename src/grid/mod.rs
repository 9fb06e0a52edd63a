//! Grid data module
//!
//! Everything needed to turn a flat observation column into gridded data:
//!
//! Structure:
//! - `source.rs`: Observation loading (first CSV column, positional)
//! - `reshape.rs`: Column-major coordinate reconstruction (`GridTable`)
//! - `matrix.rs`: Wide layout used by surface and contour plots
//! - `table_convert.rs`: DataFrame conversion and CSV export
//! - `properties.rs`: Property registry and typed reader
//! - `palettes.rs`: Continuous color palettes
//! - `error.rs`: Error types

pub mod error;
pub mod matrix;
pub mod palettes;
pub mod properties;
pub mod reshape;
pub mod source;
pub mod table_convert;

// Re-exports for convenience
pub use error::{GridError, Result};
pub use matrix::GridMatrix;
pub use palettes::{palette_registry, PaletteDefinition};
pub use properties::{PlotDimension, PropertyReader, PropertyValue};
pub use reshape::{reshape, GridRecord, GridTable};
pub use source::ObservationSource;
pub use table_convert::write_csv;
