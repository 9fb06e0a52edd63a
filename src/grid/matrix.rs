//! Wide (matrix) layout of grid values
//!
//! Surface and contour sinks take a flat value vector plus a grid dimension.
//! The vector is read with the same column-major convention as
//! [`reshape`](super::reshape::reshape), so `get(r, c)` here and
//! `GridTable::get(r + 1, c + 1)` always agree.

use super::error::{GridError, Result};
use super::reshape::{checked_size, value_range, GridTable};

#[derive(Debug, Clone, PartialEq)]
pub struct GridMatrix {
    rows: usize,
    cols: usize,
    /// Column-major storage
    values: Vec<f64>,
}

impl GridMatrix {
    /// Reshape a flat vector into an `n × n` matrix
    pub fn square(values: &[f64], n: usize) -> Result<Self> {
        Self::from_column_major(values.to_vec(), n, n)
    }

    /// Matrix view of a long-format table
    pub fn from_table(table: &GridTable) -> Self {
        Self {
            rows: table.num_rows(),
            cols: table.num_cols(),
            values: table.target(),
        }
    }

    fn from_column_major(values: Vec<f64>, rows: usize, cols: usize) -> Result<Self> {
        let expected = checked_size(rows, cols)?;
        if values.len() != expected {
            return Err(GridError::LengthMismatch {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self { rows, cols, values })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Value at 0-based `(row, col)`
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.values.get(col * self.rows + row).copied()
    }

    /// Value at 0-based `(row, col)` without the Option; callers stay in range
    pub(crate) fn at(&self, row: usize, col: usize) -> f64 {
        self.values[col * self.rows + row]
    }

    /// (min, max) of the finite values only
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        value_range(self.values.iter().copied().filter(|v| v.is_finite()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::reshape::reshape;

    #[test]
    fn test_square_matches_table() {
        let values: Vec<f64> = (0..9).map(|v| v as f64 * 1.5).collect();
        let matrix = GridMatrix::square(&values, 3).unwrap();
        let table = reshape(&values, 3, 3).unwrap();

        for r in 0..3 {
            for c in 0..3 {
                assert_eq!(matrix.get(r, c), table.get(r + 1, c + 1));
            }
        }
        assert_eq!(matrix.get(3, 0), None);
    }

    #[test]
    fn test_square_column_major() {
        let matrix = GridMatrix::square(&[10.0, 20.0, 30.0, 40.0], 2).unwrap();
        assert_eq!(matrix.get(0, 0), Some(10.0));
        assert_eq!(matrix.get(1, 0), Some(20.0));
        assert_eq!(matrix.get(0, 1), Some(30.0));
        assert_eq!(matrix.get(1, 1), Some(40.0));
    }

    #[test]
    fn test_square_errors() {
        assert!(matches!(
            GridMatrix::square(&[], 0),
            Err(GridError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            GridMatrix::square(&[1.0, 2.0, 3.0], 2),
            Err(GridError::LengthMismatch {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_from_rectangular_table() {
        let table = reshape(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3).unwrap();
        let matrix = GridMatrix::from_table(&table);

        assert_eq!(matrix.rows(), 2);
        assert_eq!(matrix.cols(), 3);
        assert_eq!(matrix.get(1, 2), Some(6.0));
        assert_eq!(matrix.finite_range(), Some((1.0, 6.0)));
    }

    #[test]
    fn test_finite_range_skips_infinities() {
        let matrix =
            GridMatrix::square(&[1.0, f64::INFINITY, f64::NAN, f64::NEG_INFINITY], 2).unwrap();
        assert_eq!(matrix.finite_range(), Some((1.0, 1.0)));

        let matrix = GridMatrix::square(&[f64::INFINITY], 1).unwrap();
        assert_eq!(matrix.finite_range(), None);
    }
}
