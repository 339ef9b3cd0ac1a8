//! Run IRR analysis for every cash-flow CSV in a directory
//!
//! Usage: batch_irr <DIR> [--output FILE]
//! Solver/curve settings come from IRR_* and NPV_CURVE_* environment variables.

use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::warn;

use cashflow_irr::cashflows::{list_series_files, load_series};
use cashflow_irr::scenario::{write_batch_csv, BatchRunner, NamedSeries};

#[derive(Parser)]
#[command(name = "batch_irr", about = "IRR analysis for a directory of cash-flow CSV files")]
struct Cli {
    /// Directory containing Period,CashFlow CSV files
    dir: PathBuf,

    /// Output CSV path
    #[arg(long, default_value = "irr_batch_output.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let start = Instant::now();

    let files = list_series_files(&cli.dir)
        .with_context(|| format!("Failed to read directory {}", cli.dir.display()))?;
    println!("Found {} series in {}", files.len(), cli.dir.display());

    let mut inputs = Vec::with_capacity(files.len());
    for path in &files {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        // Skip unreadable files rather than abort the whole batch
        match load_series(path) {
            Ok(series) => inputs.push(NamedSeries::new(name, series)),
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }

    let runner = BatchRunner::from_env();
    let reports = runner.run_batch(&inputs);

    let file = File::create(&cli.output)
        .with_context(|| format!("Failed to create {}", cli.output.display()))?;
    write_batch_csv(file, &reports)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;

    println!("Output written to {}", cli.output.display());

    let converged = reports.iter().filter(|r| r.report.outcome.is_converged()).count();
    println!("\nBatch Summary:");
    println!("  Series:    {}", reports.len());
    println!("  Converged: {}", converged);
    println!("  Failed:    {}", reports.len() - converged);
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
