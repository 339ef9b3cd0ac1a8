//! Internal Rate of Return (IRR) calculation
//!
//! Secant-method root finder over NPV(rate) = 0, seeded from two fixed guesses.
//! Failures are reported as distinct [`IrrOutcome`] variants; callers that only
//! need a display value can collapse them to `NaN` with [`IrrOutcome::as_f64`].

use std::env;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::npv::compute_npv;

/// Default first secant seed (10%)
pub const DEFAULT_FIRST_GUESS: f64 = 0.10;

/// Default second secant seed (20%)
pub const DEFAULT_SECOND_GUESS: f64 = 0.20;

/// Default iteration cap
pub const DEFAULT_MAX_ITERATIONS: u32 = 1000;

/// Default tolerance on |NPV| and on the gap between successive rates
pub const DEFAULT_TOLERANCE: f64 = 1e-5;

/// Iterates below this rate are treated as diverged
pub const DEFAULT_MIN_RATE: f64 = -0.999;

/// Iterates above this rate are treated as diverged
pub const DEFAULT_MAX_RATE: f64 = 1000.0;

/// Configuration for the secant IRR solver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Maximum number of secant steps before giving up
    pub max_iterations: u32,

    /// Convergence tolerance (applied to |NPV| and to |rate1 - rate2|)
    pub tolerance: f64,

    /// First seed rate
    pub first_guess: f64,

    /// Second seed rate
    pub second_guess: f64,

    /// Lower divergence bound on the iterate
    pub min_rate: f64,

    /// Upper divergence bound on the iterate
    pub max_rate: f64,
}

impl SolverConfig {
    /// Default configuration with a custom iteration cap and tolerance
    pub fn with_limits(max_iterations: u32, tolerance: f64) -> Self {
        Self {
            max_iterations,
            tolerance,
            ..Self::default()
        }
    }

    /// Default configuration with custom seeds
    pub fn with_guesses(first_guess: f64, second_guess: f64) -> Self {
        Self {
            first_guess,
            second_guess,
            ..Self::default()
        }
    }

    /// Build a configuration from environment variables, falling back to the
    /// defaults for anything missing or unparseable:
    ///   IRR_MAX_ITERATIONS, IRR_TOLERANCE, IRR_GUESS_LOW, IRR_GUESS_HIGH
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            max_iterations: env::var("IRR_MAX_ITERATIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_iterations),
            tolerance: env::var("IRR_TOLERANCE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.tolerance),
            first_guess: env::var("IRR_GUESS_LOW")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.first_guess),
            second_guess: env::var("IRR_GUESS_HIGH")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.second_guess),
            ..defaults
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
            first_guess: DEFAULT_FIRST_GUESS,
            second_guess: DEFAULT_SECOND_GUESS,
            min_rate: DEFAULT_MIN_RATE,
            max_rate: DEFAULT_MAX_RATE,
        }
    }
}

/// Result of an IRR solve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "rate", rename_all = "snake_case")]
pub enum IrrOutcome {
    /// Periodic rate at which NPV is within tolerance of zero
    Converged(f64),

    /// The series has no sign change, so there is no rate to find
    Undefined,

    /// Iteration cap reached without meeting the tolerance
    DidNotConverge,

    /// The iterate left the plausible rate range
    Diverged,
}

impl IrrOutcome {
    /// The solved rate, if any
    pub fn rate(&self) -> Option<f64> {
        match *self {
            IrrOutcome::Converged(rate) => Some(rate),
            _ => None,
        }
    }

    /// The solved rate, or `NaN` for every failure mode
    pub fn as_f64(&self) -> f64 {
        self.rate().unwrap_or(f64::NAN)
    }

    pub fn is_converged(&self) -> bool {
        matches!(self, IrrOutcome::Converged(_))
    }

    /// Convert a converged periodic rate to an annual effective rate.
    /// Failures stay as they are.
    pub fn annualized(&self, periods_per_year: u32) -> IrrOutcome {
        match *self {
            IrrOutcome::Converged(rate) => {
                IrrOutcome::Converged(annualize_rate(rate, periods_per_year))
            }
            other => other,
        }
    }

    /// Short machine-readable label
    pub fn status(&self) -> &'static str {
        match self {
            IrrOutcome::Converged(_) => "converged",
            IrrOutcome::Undefined => "undefined",
            IrrOutcome::DidNotConverge => "did_not_converge",
            IrrOutcome::Diverged => "diverged",
        }
    }
}

/// Calculate the IRR with the default configuration
/// (seeds 10%/20%, 1000 iterations, tolerance 1e-5).
pub fn compute_irr(cash_flows: &[f64]) -> IrrOutcome {
    compute_irr_with(cash_flows, &SolverConfig::default())
}

/// Calculate the IRR and collapse any failure to `NaN`.
///
/// # Arguments
/// * `cash_flows` - Cash flows by period (index 0 = present)
/// * `max_iterations` - Secant step cap
/// * `tolerance` - Convergence tolerance
///
/// # Returns
/// * `f64` - Periodic IRR as a decimal, or `NaN` if undefined, not converged or diverged
pub fn compute_irr_nan(cash_flows: &[f64], max_iterations: u32, tolerance: f64) -> f64 {
    compute_irr_with(cash_flows, &SolverConfig::with_limits(max_iterations, tolerance)).as_f64()
}

/// Calculate the Internal Rate of Return of a cash-flow series using the
/// secant method on NPV.
///
/// Series with more than one sign change can have several IRRs; the result
/// is whichever root the secant path from the seeds reaches.
pub fn compute_irr_with(cash_flows: &[f64], config: &SolverConfig) -> IrrOutcome {
    // A sign change is required for NPV to cross zero
    let has_positive = cash_flows.iter().any(|&cf| cf > 0.0);
    let has_negative = cash_flows.iter().any(|&cf| cf < 0.0);
    if !has_positive || !has_negative {
        return IrrOutcome::Undefined;
    }

    let tolerance = config.tolerance;
    let mut rate1 = config.first_guess;
    let mut rate2 = config.second_guess;
    let mut npv1 = compute_npv(cash_flows, rate1);
    let mut npv2 = compute_npv(cash_flows, rate2);

    for iteration in 0..config.max_iterations {
        if npv1.abs() < tolerance {
            debug!("IRR converged on first point after {} steps: {}", iteration, rate1);
            return IrrOutcome::Converged(rate1);
        }
        if npv2.abs() < tolerance {
            debug!("IRR converged on second point after {} steps: {}", iteration, rate2);
            return IrrOutcome::Converged(rate2);
        }
        if (rate1 - rate2).abs() < tolerance {
            debug!(
                "IRR rates collapsed after {} steps: {} (residual {:.3e})",
                iteration, rate1, npv1
            );
            return IrrOutcome::Converged(rate1);
        }

        // npv2 == npv1 is left to IEEE semantics: an infinite step trips the
        // divergence bound below, a NaN step runs the iteration cap out
        let rate3 = rate2 - npv2 * (rate2 - rate1) / (npv2 - npv1);

        rate1 = rate2;
        npv1 = npv2;
        rate2 = rate3;
        npv2 = compute_npv(cash_flows, rate3);

        if rate2 < config.min_rate || rate2 > config.max_rate {
            warn!("IRR diverged after {} steps (rate {})", iteration + 1, rate2);
            return IrrOutcome::Diverged;
        }
    }

    warn!(
        "IRR did not converge in {} iterations (last rate {}, npv {:.3e})",
        config.max_iterations, rate2, npv2
    );
    IrrOutcome::DidNotConverge
}

/// Convert a periodic rate to an annual effective rate: `(1 + r)^p - 1`.
///
/// A `periods_per_year` of 0 has no compounding meaning and is treated as 1,
/// so the periodic rate comes back unchanged.
pub fn annualize_rate(periodic_rate: f64, periods_per_year: u32) -> f64 {
    let periods = periods_per_year.max(1);
    match i32::try_from(periods) {
        Ok(n) => (1.0 + periodic_rate).powi(n) - 1.0,
        Err(_) => (1.0 + periodic_rate).powf(f64::from(periods)) - 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_single_signed_series_is_undefined() {
        assert_eq!(compute_irr(&[100.0, 200.0, 300.0]), IrrOutcome::Undefined);
        assert_eq!(compute_irr(&[-100.0, -200.0, -300.0]), IrrOutcome::Undefined);
        assert_eq!(compute_irr(&[0.0, 0.0, 0.0]), IrrOutcome::Undefined);
        assert_eq!(compute_irr(&[]), IrrOutcome::Undefined);
        // Zeros do not count as either sign
        assert_eq!(compute_irr(&[0.0, 50.0, 0.0]), IrrOutcome::Undefined);
        assert!(compute_irr_nan(&[100.0, 200.0], 1000, 1e-5).is_nan());
    }

    #[test]
    fn test_two_period_exact() {
        let irr = compute_irr(&[-100.0, 121.0]).rate().unwrap();
        assert_abs_diff_eq!(irr, 0.21, epsilon = 1e-5);
    }

    #[test]
    fn test_five_period_project() {
        let cashflows = [-100000.0, 20000.0, 25000.0, 30000.0, 40000.0];
        let irr = compute_irr(&cashflows).rate().unwrap();

        // Root of NPV = 0 is ~5.21%; the rate gap closes before |NPV| < 1e-5
        // at this magnitude, so only check the rate
        assert!(irr > 0.05 && irr < 0.055, "Expected ~5.2% IRR, got {}", irr);
        assert!(compute_npv(&cashflows, irr).abs() < 1.0);
    }

    #[test]
    fn test_round_trip_npv_within_tolerance() {
        let series: [&[f64]; 3] = [
            &[-100.0, 121.0],
            &[-100.0, 50.0, 60.0],
            &[-10000.0, 3000.0, 4200.0, 6800.0],
        ];

        for cashflows in series {
            let irr = compute_irr(cashflows).rate().unwrap();
            let npv = compute_npv(cashflows, irr);
            assert!(
                npv.abs() < DEFAULT_TOLERANCE,
                "NPV at IRR {} should be ~0, got {} for {:?}",
                irr, npv, cashflows
            );
        }
    }

    #[test]
    fn test_monthly_series_annualized() {
        // $1000 in, $1100 back after 12 months
        let mut cashflows = vec![-1000.0];
        cashflows.extend(vec![0.0; 11]);
        cashflows.push(1100.0);

        let outcome = compute_irr(&cashflows);
        let monthly = outcome.rate().unwrap();
        assert_abs_diff_eq!(monthly, 1.1_f64.powf(1.0 / 12.0) - 1.0, epsilon = 1e-4);

        let annual = outcome.annualized(12).rate().unwrap();
        assert!((annual - 0.10).abs() < 0.001, "Expected ~10% annual IRR, got {}", annual);
    }

    #[test]
    fn test_divergence_guard() {
        // A huge payoff on a tiny outlay pushes the secant iterate past 1000
        let outcome = compute_irr(&[-1.0, 10000.0]);
        assert_eq!(outcome, IrrOutcome::Diverged);
        assert!(outcome.as_f64().is_nan());
    }

    #[test]
    fn test_divergence_guard_lower_bound() {
        // Tiny payoff: the first secant step lands near -130, below -0.999
        let outcome = compute_irr(&[-100.0, 1.0]);
        assert_eq!(outcome, IrrOutcome::Diverged);
    }

    #[test]
    fn test_nan_flow_runs_out_iteration_cap() {
        // NaN propagates through every NPV, no check can succeed and the
        // divergence bounds never trip
        let outcome = compute_irr(&[-100.0, f64::NAN, 121.0]);
        assert_eq!(outcome, IrrOutcome::DidNotConverge);
        assert!(compute_irr_nan(&[-100.0, f64::NAN, 121.0], 50, 1e-5).is_nan());
    }

    #[test]
    fn test_tighter_divergence_bound() {
        // Root is 900%: reachable with the default bound, not with a bound of 5
        let cashflows = [-100.0, 1000.0];
        let irr = compute_irr(&cashflows).rate().unwrap();
        assert_abs_diff_eq!(irr, 9.0, epsilon = 1e-4);

        let config = SolverConfig {
            max_rate: 5.0,
            ..SolverConfig::default()
        };
        assert_eq!(compute_irr_with(&cashflows, &config), IrrOutcome::Diverged);
    }

    #[test]
    fn test_iteration_cap() {
        let cashflows = [-100000.0, 20000.0, 25000.0, 30000.0, 40000.0];
        let config = SolverConfig::with_limits(2, DEFAULT_TOLERANCE);
        assert_eq!(compute_irr_with(&cashflows, &config), IrrOutcome::DidNotConverge);
        assert!(compute_irr_nan(&cashflows, 2, DEFAULT_TOLERANCE).is_nan());

        let config = SolverConfig::with_limits(0, DEFAULT_TOLERANCE);
        assert_eq!(compute_irr_with(&cashflows, &config), IrrOutcome::DidNotConverge);
    }

    #[test]
    fn test_seed_on_root_returns_immediately() {
        // NPV(0.21) is exactly zero, so seeding there converges on the first check
        let config = SolverConfig::with_guesses(0.21, 0.5);
        let irr = compute_irr_with(&[-100.0, 121.0], &config).rate().unwrap();
        assert_eq!(irr, 0.21);
    }

    #[test]
    fn test_collapsed_seeds_treated_as_converged() {
        let config = SolverConfig::with_guesses(0.3, 0.3);
        assert_eq!(
            compute_irr_with(&[-100.0, 121.0], &config),
            IrrOutcome::Converged(0.3)
        );
    }

    #[test]
    fn test_multiple_sign_changes_returns_root_on_secant_path() {
        // NPV = 0 at both 10% and 20%; the first seed is already a root
        let outcome = compute_irr(&[-100.0, 230.0, -132.0]);
        let irr = outcome.rate().unwrap();
        assert_abs_diff_eq!(irr, 0.10, epsilon = 1e-9);
    }

    #[test]
    fn test_idempotent() {
        let cashflows = [-10000.0, 3000.0, 4200.0, 6800.0];
        let first = compute_irr(&cashflows);
        let second = compute_irr(&cashflows);
        assert_eq!(first, second);
        assert_eq!(
            compute_irr_nan(&cashflows, 1000, 1e-5).to_bits(),
            compute_irr_nan(&cashflows, 1000, 1e-5).to_bits()
        );
    }

    #[test]
    fn test_outcome_accessors() {
        assert_eq!(IrrOutcome::Converged(0.05).rate(), Some(0.05));
        assert_eq!(IrrOutcome::Undefined.rate(), None);
        assert!(IrrOutcome::DidNotConverge.as_f64().is_nan());
        assert_eq!(IrrOutcome::Diverged.annualized(12), IrrOutcome::Diverged);
        assert_eq!(IrrOutcome::Diverged.status(), "diverged");
        assert!(IrrOutcome::Converged(0.0).is_converged());
    }

    #[test]
    fn test_annualize_rate() {
        assert_abs_diff_eq!(annualize_rate(0.01, 12), 1.01_f64.powi(12) - 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(annualize_rate(0.07, 1), 0.07, epsilon = 1e-12);
    }

    #[test]
    fn test_annualize_rate_zero_periods_is_identity() {
        assert_abs_diff_eq!(annualize_rate(0.05, 0), 0.05, epsilon = 1e-12);

        let annual = compute_irr(&[-100.0, 121.0]).annualized(0).rate().unwrap();
        assert_abs_diff_eq!(annual, 0.21, epsilon = 1e-5);
    }

    #[test]
    fn test_annualize_rate_large_period_count_keeps_sign() {
        // Exponent beyond i32::MAX must not wrap to a negative power
        let annual = annualize_rate(1e-12, u32::MAX);
        assert!(annual > 0.0, "Expected positive annual rate, got {}", annual);
        assert_abs_diff_eq!(annual, (1e-12_f64 * u32::MAX as f64).exp_m1(), epsilon = 1e-5);
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let json = serde_json::to_string(&IrrOutcome::Converged(0.21)).unwrap();
        assert_eq!(json, r#"{"status":"converged","rate":0.21}"#);

        let json = serde_json::to_string(&IrrOutcome::Diverged).unwrap();
        assert_eq!(json, r#"{"status":"diverged"}"#);
    }
}
