//! Net Present Value of a periodic cash-flow series

/// Calculate the Net Present Value of a series of cash flows at a periodic rate.
///
/// Flow `i` is discounted by `(1 + rate)^i`, so index 0 is the present and is
/// never discounted.
///
/// # Arguments
/// * `cash_flows` - Cash flows by period (positive = inflow, negative = outflow)
/// * `rate` - Periodic discount rate as a decimal (e.g., 0.10 for 10%)
///
/// # Returns
/// * `f64` - The NPV. Rates at or below -1 are not rejected: the result is
///   infinite or NaN and the caller is expected to check `is_finite()`.
pub fn compute_npv(cash_flows: &[f64], rate: f64) -> f64 {
    let growth = 1.0 + rate;
    cash_flows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / growth.powi(t as i32))
        .sum()
}
