//! Cash-flow IRR - NPV, IRR and NPV-curve calculations for periodic cash flows
//!
//! This library provides:
//! - Net present value of a cash-flow series at a periodic rate
//! - Internal rate of return via the secant method, with typed failure outcomes
//! - NPV curve sampling over a rate range for charting
//! - CSV / inline loading of cash-flow series
//! - Batch evaluation of many independent series

pub mod error;
pub mod cashflows;
pub mod valuation;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use error::{CashFlowError, Result};
pub use cashflows::CashFlowSeries;
pub use valuation::{
    compute_irr, compute_irr_nan, compute_irr_with, compute_npv, compute_npv_curve,
    CurveConfig, IrrOutcome, NpvCurvePoint, SolverConfig,
};
pub use report::{format_rate_pct, IrrReport};
pub use scenario::BatchRunner;
