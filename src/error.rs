//! Error types for loading and parsing cash-flow series

use thiserror::Error;

/// A specialized Result type for cash-flow input handling.
pub type Result<T> = std::result::Result<T, CashFlowError>;

/// Errors raised while reading a cash-flow series.
///
/// Valuation itself never fails with an error: the solver reports problems
/// through [`crate::valuation::IrrOutcome`] and NPV through non-finite values.
#[derive(Error, Debug)]
pub enum CashFlowError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid cash flow '{value}' at position {position}")]
    InvalidNumber { position: usize, value: String },

    #[error("Period {found} out of order: expected period {expected}")]
    PeriodOutOfOrder { expected: u32, found: u32 },

    #[error("Cash-flow series is empty")]
    Empty,
}
