//! Batch runner for evaluating many cash-flow series
//!
//! Holds the solver and curve settings once, then evaluates any number of
//! independent series. Each evaluation is a pure call, so batches are spread
//! across the rayon pool and come back in input order.

use std::io::Write;

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cashflows::CashFlowSeries;
use crate::error::Result;
use crate::report::IrrReport;
use crate::valuation::{CurveConfig, SolverConfig};

/// A series with a caller-chosen label (file name, scenario id, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedSeries {
    pub name: String,
    pub series: CashFlowSeries,
}

impl NamedSeries {
    pub fn new(name: impl Into<String>, series: CashFlowSeries) -> Self {
        Self {
            name: name.into(),
            series,
        }
    }
}

/// Report for one named series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedReport {
    pub name: String,
    pub report: IrrReport,
}

/// Pre-configured runner for batch IRR analysis
///
/// # Example
/// ```ignore
/// let runner = BatchRunner::from_env();
/// let reports = runner.run_batch(&inputs);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BatchRunner {
    solver: SolverConfig,
    curve: CurveConfig,
}

impl BatchRunner {
    /// Create runner with default solver and curve settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create runner from environment variables
    pub fn from_env() -> Self {
        Self {
            solver: SolverConfig::from_env(),
            curve: CurveConfig::from_env(),
        }
    }

    /// Create runner with explicit settings
    pub fn with_config(solver: SolverConfig, curve: CurveConfig) -> Self {
        Self { solver, curve }
    }

    /// Analyse a single series
    pub fn run(&self, series: &CashFlowSeries) -> IrrReport {
        IrrReport::build(series, &self.solver, &self.curve)
    }

    /// Analyse many series in parallel, preserving input order
    pub fn run_batch(&self, inputs: &[NamedSeries]) -> Vec<NamedReport> {
        let reports: Vec<NamedReport> = inputs
            .par_iter()
            .map(|input| NamedReport {
                name: input.name.clone(),
                report: self.run(&input.series),
            })
            .collect();

        let converged = reports.iter().filter(|r| r.report.outcome.is_converged()).count();
        info!("Batch complete: {} of {} series converged", converged, reports.len());

        reports
    }

    pub fn solver(&self) -> &SolverConfig {
        &self.solver
    }

    pub fn curve(&self) -> &CurveConfig {
        &self.curve
    }

    /// Mutable access for per-run overrides
    pub fn solver_mut(&mut self) -> &mut SolverConfig {
        &mut self.solver
    }
}

/// Write one summary row per report as CSV
/// (`Name,Periods,Status,IRR_Pct,NPV_At_Guess,TotalCashFlow`).
/// Names are quoted as needed, so commas in file names are safe.
pub fn write_batch_csv<W: Write>(writer: W, reports: &[NamedReport]) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["Name", "Periods", "Status", "IRR_Pct", "NPV_At_Guess", "TotalCashFlow"])?;

    for named in reports {
        let report = &named.report;
        let irr = report
            .irr_pct
            .map(|pct| format!("{:.6}", pct))
            .unwrap_or_else(|| "N/A".to_string());
        out.write_record([
            named.name.clone(),
            report.periods.to_string(),
            report.status.clone(),
            irr,
            format!("{:.8}", report.npv_at_guess),
            format!("{:.2}", report.total_cash_flow),
        ])?;
    }

    out.flush()?;
    Ok(())
}
