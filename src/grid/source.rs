//! Observation source loading
//!
//! Observations are read positionally from the first column of a table.
//! Row order in the file IS the flattening order; nothing is sorted or
//! re-indexed, so callers must supply rows already in column-major grid order.

use super::error::{GridError, Result};
use polars::prelude::*;
use std::path::Path;

/// Flat sequence of observations sampled over a 2D grid
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObservationSource {
    values: Vec<f64>,
}

impl ObservationSource {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Read observations from the first column of a CSV file
    pub fn from_csv_path(path: &Path, has_header: bool) -> Result<Self> {
        if !path.exists() {
            return Err(GridError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Observation file not found: {}", path.display()),
            )));
        }

        let df = CsvReadOptions::default()
            .with_has_header(has_header)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()?;

        eprintln!(
            "CSV: Parsed {} with {} columns, {} rows",
            path.display(),
            df.width(),
            df.height()
        );

        Self::from_dataframe(&df)
    }

    /// Take the first column of a DataFrame as the observation sequence
    ///
    /// Non-numeric cells become nulls on cast and are reported as
    /// `MissingValue` with their 0-based position.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let column = df.get_columns().first().ok_or(GridError::EmptySource)?;
        let series = column.as_materialized_series().cast(&DataType::Float64)?;

        let values = series
            .f64()?
            .into_iter()
            .enumerate()
            .map(|(index, opt)| opt.ok_or(GridError::MissingValue { index }))
            .collect::<Result<Vec<f64>>>()?;

        Ok(Self { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl From<Vec<f64>> for ObservationSource {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}
