//! Grid coordinate reconstruction
//!
//! Simulation output arrives as one flat column of observations. The values
//! were produced by walking a `num_rows × num_cols` grid column by column
//! (rows vary fastest), so each position in the column maps back to exactly
//! one `(row, col)` cell. This module rebuilds those coordinates and returns a
//! long-format table with one `(X1, X2, y)` record per observation.

use super::error::{GridError, Result};

/// One observation with its 1-based grid coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridRecord {
    /// Row index, in `1..=num_rows`
    pub x1: usize,
    /// Column index, in `1..=num_cols`
    pub x2: usize,
    /// Observed value
    pub y: f64,
}

impl GridRecord {
    /// Record as an `(X1, X2, y)` float triple
    pub fn as_tuple(&self) -> (f64, f64, f64) {
        (self.x1 as f64, self.x2 as f64, self.y)
    }
}

/// Long-format table of grid records in column-major order
#[derive(Debug, Clone, PartialEq)]
pub struct GridTable {
    num_rows: usize,
    num_cols: usize,
    records: Vec<GridRecord>,
}

/// Reshape a flat column-major sequence into a long-format grid table
///
/// The source must hold exactly `num_rows * num_cols` values. Its order is
/// taken as given: element `k` belongs to row `k % num_rows + 1` of column
/// `k / num_rows + 1`.
///
/// # Errors
/// * `InvalidDimensions` if either dimension is zero
/// * `LengthMismatch` if the source length differs from the grid size
pub fn reshape(source: &[f64], num_rows: usize, num_cols: usize) -> Result<GridTable> {
    let expected = checked_size(num_rows, num_cols)?;

    if source.len() != expected {
        return Err(GridError::LengthMismatch {
            expected,
            actual: source.len(),
        });
    }

    let records = (1..=num_cols)
        .flat_map(|x2| (1..=num_rows).map(move |x1| (x1, x2)))
        .zip(source.iter().copied())
        .map(|((x1, x2), y)| GridRecord { x1, x2, y })
        .collect();

    Ok(GridTable {
        num_rows,
        num_cols,
        records,
    })
}

/// Validate dimensions and return the number of cells
pub(crate) fn checked_size(num_rows: usize, num_cols: usize) -> Result<usize> {
    if num_rows == 0 || num_cols == 0 {
        return Err(GridError::InvalidDimensions { num_rows, num_cols });
    }
    num_rows
        .checked_mul(num_cols)
        .ok_or(GridError::InvalidDimensions { num_rows, num_cols })
}

impl GridTable {
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[GridRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &GridRecord> {
        self.records.iter()
    }

    /// Value at 1-based `(row, col)`, None when outside the grid
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row == 0 || col == 0 || row > self.num_rows || col > self.num_cols {
            return None;
        }
        self.records
            .get((col - 1) * self.num_rows + (row - 1))
            .map(|r| r.y)
    }

    /// Two-column feature matrix `[X1, X2]` for regression-style modeling
    pub fn features(&self) -> Vec<[f64; 2]> {
        self.records
            .iter()
            .map(|r| [r.x1 as f64, r.x2 as f64])
            .collect()
    }

    /// Target vector `y`
    pub fn target(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.y).collect()
    }

    /// (min, max) of the observed values, ignoring NaN
    pub fn value_range(&self) -> Option<(f64, f64)> {
        value_range(self.records.iter().map(|r| r.y))
    }
}

impl<'a> IntoIterator for &'a GridTable {
    type Item = &'a GridRecord;
    type IntoIter = std::slice::Iter<'a, GridRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// (min, max) skipping NaN
pub(crate) fn value_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triples(table: &GridTable) -> Vec<(f64, f64, f64)> {
        table.iter().map(GridRecord::as_tuple).collect()
    }

    #[test]
    fn test_reshape_column_major_order() {
        let table = reshape(&[10.0, 20.0, 30.0, 40.0], 2, 2).unwrap();
        assert_eq!(
            triples(&table),
            vec![
                (1.0, 1.0, 10.0),
                (2.0, 1.0, 20.0),
                (1.0, 2.0, 30.0),
                (2.0, 2.0, 40.0),
            ]
        );
    }

    #[test]
    fn test_reshape_single_cell() {
        let table = reshape(&[5.0], 1, 1).unwrap();
        assert_eq!(triples(&table), vec![(1.0, 1.0, 5.0)]);
    }

    #[test]
    fn test_reshape_rectangular_bounds() {
        let source: Vec<f64> = (0..12).map(|v| v as f64).collect();
        let table = reshape(&source, 3, 4).unwrap();

        assert_eq!(table.len(), 12);
        assert_eq!(table.num_rows(), 3);
        assert_eq!(table.num_cols(), 4);
        for record in &table {
            assert!((1..=3).contains(&record.x1));
            assert!((1..=4).contains(&record.x2));
        }

        // Third column starts at flat index 6
        assert_eq!(table.records()[6], GridRecord { x1: 1, x2: 3, y: 6.0 });
        assert_eq!(table.get(3, 4), Some(11.0));
        assert_eq!(table.get(2, 1), Some(1.0));
        assert_eq!(table.get(4, 1), None);
        assert_eq!(table.get(0, 1), None);
    }

    #[test]
    fn test_reshape_is_deterministic() {
        let source = [0.5, -1.0, 2.25, 8.0, 3.0, 1.0];
        assert_eq!(reshape(&source, 2, 3).unwrap(), reshape(&source, 2, 3).unwrap());
    }

    #[test]
    fn test_reshape_length_mismatch() {
        let err = reshape(&[1.0, 2.0, 3.0], 2, 2).unwrap_err();
        assert!(matches!(
            err,
            GridError::LengthMismatch {
                expected: 4,
                actual: 3
            }
        ));

        // Extra tail values are rejected, not silently dropped
        let err = reshape(&[1.0, 2.0, 3.0, 4.0, 5.0], 2, 2).unwrap_err();
        assert!(matches!(err, GridError::LengthMismatch { .. }));
    }

    #[test]
    fn test_reshape_invalid_dimensions() {
        let err = reshape(&[], 0, 5).unwrap_err();
        assert!(matches!(
            err,
            GridError::InvalidDimensions {
                num_rows: 0,
                num_cols: 5
            }
        ));
        assert!(matches!(
            reshape(&[1.0], 1, 0),
            Err(GridError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            reshape(&[1.0], usize::MAX, 2),
            Err(GridError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_features_and_target() {
        let table = reshape(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3, 2).unwrap();
        assert_eq!(
            table.features(),
            vec![[1.0, 1.0], [2.0, 1.0], [3.0, 1.0], [1.0, 2.0], [2.0, 2.0], [3.0, 2.0]]
        );
        assert_eq!(table.target(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_value_range_skips_nan() {
        let table = reshape(&[f64::NAN, -2.0, 7.5, 1.0], 2, 2).unwrap();
        assert_eq!(table.value_range(), Some((-2.0, 7.5)));
        assert_eq!(value_range(std::iter::once(f64::NAN)), None);
    }
}
