//! Result structures for displaying an IRR analysis

use serde::{Deserialize, Serialize};

use crate::cashflows::CashFlowSeries;
use crate::valuation::{
    compute_irr_with, compute_npv, CurveConfig, IrrOutcome, NpvCurvePoint, SolverConfig,
};

/// Format a decimal rate as a percentage with two decimals, or "N/A" when
/// the rate is NaN or infinite
pub fn format_rate_pct(rate: f64) -> String {
    if rate.is_finite() {
        format!("{:.2}%", rate * 100.0)
    } else {
        "N/A".to_string()
    }
}

/// Complete analysis of one cash-flow series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrrReport {
    /// Solver result
    pub outcome: IrrOutcome,

    /// `converged`, `undefined`, `did_not_converge` or `diverged`
    pub status: String,

    /// IRR in percent, if the solver converged
    pub irr_pct: Option<f64>,

    /// IRR formatted for display ("N/A" on failure)
    pub irr_display: String,

    /// NPV at the solver's first seed rate
    pub npv_at_guess: f64,

    /// Undiscounted sum of all flows
    pub total_cash_flow: f64,

    /// Number of periods, including period 0
    pub periods: usize,

    /// The analysed flows
    pub cash_flows: CashFlowSeries,

    /// NPV curve for charting; serde_json writes non-finite NPVs as null
    pub curve: Vec<NpvCurvePoint>,
}

impl IrrReport {
    /// Solve, evaluate and sample the curve for one series
    pub fn build(series: &CashFlowSeries, solver: &SolverConfig, curve: &CurveConfig) -> Self {
        let flows = series.as_slice();
        let outcome = compute_irr_with(flows, solver);

        Self {
            outcome,
            status: outcome.status().to_string(),
            irr_pct: outcome.rate().map(|r| r * 100.0),
            irr_display: format_rate_pct(outcome.as_f64()),
            npv_at_guess: compute_npv(flows, solver.first_guess),
            total_cash_flow: series.total(),
            periods: series.len(),
            cash_flows: series.clone(),
            curve: curve.sample(flows),
        }
    }

    /// Summary statistics
    pub fn summary(&self) -> ReportSummary {
        let flows = self.cash_flows.as_slice();
        let total_inflows: f64 = flows.iter().filter(|&&cf| cf > 0.0).sum();
        let total_outflows: f64 = flows.iter().filter(|&&cf| cf < 0.0).sum();

        // Non-finite samples (rates at or below -100%) are skipped
        let peak_npv = self
            .curve
            .iter()
            .map(|p| p.npv)
            .filter(|npv| npv.is_finite())
            .reduce(f64::max);

        ReportSummary {
            periods: self.periods,
            total_inflows,
            total_outflows,
            net_cash_flow: self.total_cash_flow,
            sign_changes: self.cash_flows.sign_changes(),
            status: self.outcome.status().to_string(),
            irr_display: self.irr_display.clone(),
            peak_curve_npv: peak_npv,
        }
    }
}

/// Summary statistics for a report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub periods: usize,
    pub total_inflows: f64,
    pub total_outflows: f64,
    pub net_cash_flow: f64,
    pub sign_changes: usize,
    pub status: String,
    pub irr_display: String,
    pub peak_curve_npv: Option<f64>,
}
