//! Grid generation pipeline
//!
//! The pipeline:
//! 1. Loads the observation column from CSV
//! 2. Reshapes it into a long-format grid table
//! 3. Writes the table as CSV
//! 4. Renders scatter, surface and contour charts

use crate::config::PlotConfig;
use crate::grid::{reshape, write_csv, GridMatrix, GridTable, ObservationSource, Result};
use crate::plot::{self, ChartKind};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// File name of the exported long-format table
pub const TABLE_FILE: &str = "grid.csv";

/// What to load and where to write
#[derive(Debug, Clone)]
pub struct PipelineInput {
    pub input: PathBuf,
    pub has_header: bool,
    pub num_rows: usize,
    pub num_cols: usize,
    pub out_dir: PathBuf,
}

/// Everything the pipeline produced
#[derive(Debug)]
pub struct PipelineOutput {
    pub table: GridTable,
    pub table_path: PathBuf,
    pub charts: Vec<(ChartKind, PathBuf)>,
}

fn log_phase(start: Instant, phase: &str) {
    eprintln!("[PHASE @{:.3}s] {}", start.elapsed().as_secs_f64(), phase);
}

/// Run the full pipeline from an observation file
pub fn run(input: &PipelineInput, config: &PlotConfig) -> Result<PipelineOutput> {
    let start = Instant::now();

    log_phase(start, "PHASE 1: Loading observations");
    println!("[1/4] Loading observations from {}...", input.input.display());
    let source = ObservationSource::from_csv_path(&input.input, input.has_header)?;
    println!("✓ Loaded {} observations", source.len());

    let output = export(&source, input.num_rows, input.num_cols, &input.out_dir, config)?;

    log_phase(start, "DONE");
    Ok(output)
}

/// Reshape an already-loaded source and write the table and charts
pub fn export(
    source: &ObservationSource,
    num_rows: usize,
    num_cols: usize,
    out_dir: &Path,
    config: &PlotConfig,
) -> Result<PipelineOutput> {
    println!("\n[2/4] Reshaping into {} × {} grid...", num_rows, num_cols);
    let table = reshape(source.values(), num_rows, num_cols)?;
    println!("✓ Grid table: {} records", table.len());
    if let Some((min, max)) = table.value_range() {
        println!("  y range: [{:.4}, {:.4}]", min, max);
    }

    std::fs::create_dir_all(out_dir)?;

    println!("\n[3/4] Writing table...");
    let table_path = out_dir.join(TABLE_FILE);
    write_csv(&table, &table_path)?;
    println!("✓ Wrote {}", table_path.display());

    println!("\n[4/4] Rendering charts...");
    let charts = render_charts(&table, out_dir, config)?;

    Ok(PipelineOutput {
        table,
        table_path,
        charts,
    })
}

/// Render every chart kind for a table into `out_dir`
pub fn render_charts(
    table: &GridTable,
    out_dir: &Path,
    config: &PlotConfig,
) -> Result<Vec<(ChartKind, PathBuf)>> {
    let size = config.resolve_dimensions(table.num_rows(), table.num_cols());
    let matrix = GridMatrix::from_table(table);
    println!("  Plot dimensions: {} × {}", size.0, size.1);

    let mut charts = Vec::with_capacity(ChartKind::ALL.len());
    for kind in ChartKind::ALL {
        let path = out_dir.join(kind.file_name());
        match kind {
            ChartKind::Scatter => {
                plot::scatter(&table.features(), &table.target(), &path, size, config)?
            }
            ChartKind::Surface => plot::render_surface(&matrix, &path, size, config)?,
            ChartKind::Contour => plot::render_contour(&matrix, &path, size, config)?,
        }
        println!("✓ {} → {}", kind, path.display());
        charts.push((kind, path));
    }

    Ok(charts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridError;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("grid_pipeline_{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_run_end_to_end() {
        let dir = scratch_dir();
        std::fs::create_dir_all(&dir).unwrap();

        // 3 × 3 grid, y = X1 * X2, written column-major
        let mut csv = String::from("y\n");
        for col in 1..=3 {
            for row in 1..=3 {
                csv.push_str(&format!("{}\n", row * col));
            }
        }
        let input_path = dir.join("obs.csv");
        std::fs::write(&input_path, csv).unwrap();

        let input = PipelineInput {
            input: input_path,
            has_header: true,
            num_rows: 3,
            num_cols: 3,
            out_dir: dir.join("out"),
        };
        let output = run(&input, &PlotConfig::default()).unwrap();

        assert_eq!(output.table.len(), 9);
        assert_eq!(output.table.get(2, 3), Some(6.0));
        assert!(output.table_path.exists());
        assert_eq!(output.charts.len(), 3);
        for (_, path) in &output.charts {
            assert!(path.exists());
        }

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_export_rejects_wrong_length() {
        let dir = scratch_dir();
        let source = ObservationSource::new(vec![1.0, 2.0, 3.0]);

        let err = export(&source, 2, 2, &dir, &PlotConfig::default()).unwrap_err();
        assert!(matches!(err, GridError::LengthMismatch { .. }));
        // Nothing is written on failure
        assert!(!dir.exists());
    }

    #[test]
    fn test_export_rectangular_grid() {
        let dir = scratch_dir();
        let values: Vec<f64> = (0..10).map(|v| v as f64 * 0.5).collect();
        let source = ObservationSource::new(values);

        let output = export(&source, 2, 5, &dir, &PlotConfig::default()).unwrap();

        assert_eq!(output.table.num_rows(), 2);
        assert_eq!(output.table.num_cols(), 5);
        assert_eq!(output.table.len(), 10);
        // Column-major: last record is (X1=2, X2=5)
        assert_eq!(output.table.get(2, 5), Some(4.5));
        assert_eq!(output.charts.len(), 3);
        for (_, path) in &output.charts {
            assert!(path.exists());
        }

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_export_non_finite_values() {
        let dir = scratch_dir();
        let source = ObservationSource::new(vec![1.0, f64::INFINITY, f64::NAN, 4.0]);

        let output = export(&source, 2, 2, &dir, &PlotConfig::default()).unwrap();
        assert_eq!(output.charts.len(), 3);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_export_rejects_unbounded_span() {
        let dir = scratch_dir();
        let source = ObservationSource::new(vec![-1e308, 1e308, 0.0, 1.0]);

        let err = export(&source, 2, 2, &dir, &PlotConfig::default()).unwrap_err();
        assert!(matches!(err, GridError::Plot(_)));

        std::fs::remove_dir_all(&dir).ok();
    }
}
