//! Discounting, IRR solving and NPV curve sampling

mod npv;
mod irr;
mod curve;

pub use npv::compute_npv;
pub use irr::{
    annualize_rate, compute_irr, compute_irr_nan, compute_irr_with, IrrOutcome, SolverConfig,
    DEFAULT_FIRST_GUESS, DEFAULT_MAX_ITERATIONS, DEFAULT_MAX_RATE, DEFAULT_MIN_RATE,
    DEFAULT_SECOND_GUESS, DEFAULT_TOLERANCE,
};
pub use curve::{compute_npv_curve, CurveConfig, NpvCurvePoint};
