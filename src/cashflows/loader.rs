//! Load cash-flow series from CSV files or inline text
//!
//! CSV layout:
//! ```text
//! Period,CashFlow
//! 0,-100000
//! 1,20000
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use csv::Reader;

use super::CashFlowSeries;
use crate::error::{CashFlowError, Result};

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Period")]
    period: u32,
    #[serde(rename = "CashFlow")]
    cash_flow: f64,
}

/// Load a cash-flow series from a CSV file. Non-finite flows are rejected.
pub fn load_series<P: AsRef<Path>>(path: P) -> Result<CashFlowSeries> {
    let reader = Reader::from_path(path)?;
    read_rows(reader)
}

/// Load a cash-flow series from any reader (e.g., string buffer, stdin)
pub fn load_series_from_reader<R: std::io::Read>(reader: R) -> Result<CashFlowSeries> {
    read_rows(Reader::from_reader(reader))
}

fn read_rows<R: std::io::Read>(mut reader: Reader<R>) -> Result<CashFlowSeries> {
    let mut series = CashFlowSeries::default();

    for (expected, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        if !row.cash_flow.is_finite() {
            return Err(CashFlowError::InvalidNumber {
                position: expected,
                value: row.cash_flow.to_string(),
            });
        }
        let expected = expected as u32;
        if row.period != expected {
            return Err(CashFlowError::PeriodOutOfOrder {
                expected,
                found: row.period,
            });
        }
        series.push(row.cash_flow);
    }

    if series.is_empty() {
        return Err(CashFlowError::Empty);
    }

    Ok(series)
}

/// Parse an inline comma-separated list such as `"-100, 121"`.
/// NaN and infinite values are rejected.
pub fn parse_series(text: &str) -> Result<CashFlowSeries> {
    let mut series = CashFlowSeries::default();

    for (position, field) in text.split(',').enumerate() {
        let field = field.trim();
        let value = field
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| CashFlowError::InvalidNumber {
                position,
                value: field.to_string(),
            })?;
        series.push(value);
    }

    Ok(series)
}

/// List every `*.csv` file in a directory, sorted by path
pub fn list_series_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("csv")) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
