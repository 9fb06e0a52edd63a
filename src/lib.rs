//! Surrogate grid library
//!
//! Reshapes flat simulation output into gridded `(X1, X2, y)` tables and
//! renders them as scatter, surface and contour charts.

pub mod config;
pub mod grid;
pub mod pipeline;
pub mod plot;

pub use grid::{reshape, GridError, GridRecord, GridTable, Result};
