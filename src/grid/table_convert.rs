//! GridTable to DataFrame conversion
//!
//! Converts the long-format grid table into a Polars DataFrame with the
//! columns `X1`, `X2`, `y` and writes it out as CSV for downstream modeling.

use super::error::Result;
use super::reshape::GridTable;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Column names of the exported table
pub const COLUMN_NAMES: [&str; 3] = ["X1", "X2", "y"];

impl GridTable {
    /// Convert to a Polars DataFrame
    ///
    /// All three columns are `Float64` so the table can be fed straight into
    /// regression code expecting a numeric feature matrix.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let x1: Vec<f64> = self.iter().map(|r| r.x1 as f64).collect();
        let x2: Vec<f64> = self.iter().map(|r| r.x2 as f64).collect();
        let y: Vec<f64> = self.iter().map(|r| r.y).collect();

        let columns = vec![
            Series::new(COLUMN_NAMES[0].into(), x1).into_column(),
            Series::new(COLUMN_NAMES[1].into(), x2).into_column(),
            Series::new(COLUMN_NAMES[2].into(), y).into_column(),
        ];

        Ok(DataFrame::new(columns)?)
    }
}

/// Write a grid table as CSV (header `X1,X2,y`)
pub fn write_csv(table: &GridTable, path: &Path) -> Result<()> {
    let mut df = table.to_dataframe()?;
    let mut file = File::create(path)?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::reshape::reshape;

    #[test]
    fn test_grid_table_to_dataframe() {
        let table = reshape(&[10.0, 20.0, 30.0, 40.0, 50.0, 60.0], 2, 3).unwrap();
        let df = table.to_dataframe().unwrap();

        // Verify structure
        assert_eq!(df.height(), 6);
        assert_eq!(df.width(), 3);

        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(names, vec!["X1", "X2", "y"]);

        for col in df.get_columns() {
            assert_eq!(col.dtype(), &DataType::Float64);
        }

        let float_column = |name: &str| -> Vec<f64> {
            df.column(name)
                .unwrap()
                .as_materialized_series()
                .f64()
                .unwrap()
                .into_no_null_iter()
                .collect()
        };
        assert_eq!(float_column("X1"), vec![1.0, 2.0, 1.0, 2.0, 1.0, 2.0]);
        assert_eq!(float_column("X2"), vec![1.0, 1.0, 2.0, 2.0, 3.0, 3.0]);
    }

    #[test]
    fn test_write_csv() {
        let table = reshape(&[1.0, 2.0, 3.0, 4.0], 2, 2).unwrap();
        let path = std::env::temp_dir().join(format!("grid_{}.csv", uuid::Uuid::new_v4()));

        write_csv(&table, &path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("X1,X2,y"));
        assert_eq!(contents.lines().count(), 5);
    }
}
