use thiserror::Error;

/// Errors that can occur while building or exporting a grid
#[derive(Debug, Error)]
pub enum GridError {
    /// Grid dimensions are zero (or their product does not fit in memory)
    #[error("Invalid grid dimensions: {num_rows} x {num_cols}")]
    InvalidDimensions { num_rows: usize, num_cols: usize },

    /// Source length does not match the grid size
    #[error("Length mismatch: expected {expected} values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Input table has no column to read observations from
    #[error("Observation source has no columns")]
    EmptySource,

    /// Null or non-numeric cell in the observation column
    #[error("Missing observation value at row {index}")]
    MissingValue { index: usize },

    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// DataFrame construction, CSV read or write error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Chart rendering error
    #[error("Plot error: {0}")]
    Plot(String),

    /// Invalid property file or value
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Type alias for Results using GridError
pub type Result<T> = std::result::Result<T, GridError>;
