//! Surrogate grid - command-line entry point
//!
//! Reads a single column of simulation output, reshapes it into a gridded
//! `(X1, X2, y)` table and writes the table plus scatter, surface and contour
//! charts into an output directory.
//!
//! Usage:
//! ```bash
//! surrogate_grid --input obs.csv --rows 20 --cols 20 --out plots \
//!     --set palette=Jet --set contour.levels=15
//! ```
//!
//! `GRID_INPUT`, `GRID_ROWS`, `GRID_COLS` and `GRID_OUT` are used when the
//! matching flag is not given.

use anyhow::{anyhow, Context};
use std::path::{Path, PathBuf};
use surrogate_grid::config::PlotConfig;
use surrogate_grid::grid::PropertyReader;
use surrogate_grid::pipeline::{self, PipelineInput};

#[cfg(feature = "jemalloc")]
use tikv_jemallocator::Jemalloc;

#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

/// Raw command-line values before validation
#[derive(Debug, Default)]
struct Args {
    input: Option<String>,
    rows: Option<String>,
    cols: Option<String>,
    out: Option<String>,
    no_header: bool,
    properties: Option<String>,
    overrides: Vec<String>,
}

fn main() {
    println!("Surrogate Grid v{}\n", env!("CARGO_PKG_VERSION"));

    let args: Vec<String> = std::env::args().collect();
    let args = parse_args(&args);

    if let Err(e) = run(args) {
        eprintln!("\n✗ Failed: {:#}", e);
        eprintln!("\nUsage: surrogate_grid --input FILE --rows N --cols M [--out DIR]");
        eprintln!("         [--no-header] [--properties FILE] [--set name=value]...");
        std::process::exit(1);
    }

    println!("\nDone!");
}

/// Parse command-line arguments
fn parse_args(args: &[String]) -> Args {
    let mut parsed = Args::default();
    let mut i = 1;
    while i < args.len() {
        let next = args.get(i + 1).cloned();
        match (args[i].as_str(), next) {
            ("--input", Some(v)) => {
                parsed.input = Some(v);
                i += 2;
            }
            ("--rows", Some(v)) => {
                parsed.rows = Some(v);
                i += 2;
            }
            ("--cols", Some(v)) => {
                parsed.cols = Some(v);
                i += 2;
            }
            ("--out", Some(v)) => {
                parsed.out = Some(v);
                i += 2;
            }
            ("--properties", Some(v)) => {
                parsed.properties = Some(v);
                i += 2;
            }
            ("--set", Some(v)) => {
                parsed.overrides.push(v);
                i += 2;
            }
            ("--no-header", _) => {
                parsed.no_header = true;
                i += 1;
            }
            (other, _) => {
                eprintln!("⚠ Ignoring unknown argument '{}'", other);
                i += 1;
            }
        }
    }
    parsed
}

/// Flag value, or the environment variable when the flag is absent
fn arg_or_env(value: Option<String>, var: &str) -> Option<String> {
    value.or_else(|| std::env::var(var).ok())
}

fn parse_dimension(value: Option<String>, flag: &str, var: &str) -> anyhow::Result<usize> {
    let raw = arg_or_env(value, var).ok_or_else(|| anyhow!("{} (or {}) is required", flag, var))?;
    raw.trim()
        .parse::<usize>()
        .with_context(|| format!("{} must be a non-negative integer, got '{}'", flag, raw))
}

fn run(args: Args) -> anyhow::Result<()> {
    let input = arg_or_env(args.input, "GRID_INPUT")
        .ok_or_else(|| anyhow!("--input (or GRID_INPUT) is required"))?;
    let num_rows = parse_dimension(args.rows, "--rows", "GRID_ROWS")?;
    let num_cols = parse_dimension(args.cols, "--cols", "GRID_COLS")?;
    let out_dir = arg_or_env(args.out, "GRID_OUT").unwrap_or_else(|| "grid_output".to_string());

    let mut props = match &args.properties {
        Some(path) => PropertyReader::from_json_file(Path::new(path))
            .with_context(|| format!("Failed to load properties from {}", path))?,
        None => PropertyReader::default(),
    };
    for assignment in &args.overrides {
        props.set_override(assignment)?;
    }
    let config = PlotConfig::from_properties(&props);

    println!("Configuration:");
    println!("  Input: {}", input);
    println!("  Header row: {}", !args.no_header);
    println!("  Grid: {} × {}", num_rows, num_cols);
    println!("  Output: {}", out_dir);
    println!("  Palette: {}", config.palette);
    println!("  Contour levels: {}", config.contour_levels);
    println!();

    let pipeline_input = PipelineInput {
        input: PathBuf::from(input),
        has_header: !args.no_header,
        num_rows,
        num_cols,
        out_dir: PathBuf::from(out_dir),
    };

    let output = pipeline::run(&pipeline_input, &config)?;

    println!("\nOutputs:");
    println!("  Table: {}", output.table_path.display());
    for (kind, path) in &output.charts {
        println!("  {}: {}", kind, path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> Vec<String> {
        std::iter::once("surrogate_grid")
            .chain(items.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_args() {
        let args = parse_args(&argv(&[
            "--input", "obs.csv", "--rows", "4", "--cols", "5", "--no-header", "--set",
            "palette=Jet", "--set", "contour.levels=3",
        ]));
        assert_eq!(args.input.as_deref(), Some("obs.csv"));
        assert_eq!(args.rows.as_deref(), Some("4"));
        assert_eq!(args.cols.as_deref(), Some("5"));
        assert!(args.no_header);
        assert_eq!(args.overrides, vec!["palette=Jet", "contour.levels=3"]);
    }

    #[test]
    fn test_parse_args_trailing_flag() {
        let args = parse_args(&argv(&["--rows"]));
        assert_eq!(args.rows, None);
    }

    #[test]
    fn test_parse_dimension() {
        assert_eq!(parse_dimension(Some("12".into()), "--rows", "UNSET_VAR_X").unwrap(), 12);
        assert!(parse_dimension(Some("-1".into()), "--rows", "UNSET_VAR_X").is_err());
    }
}
