//! NPV curve sampling for charting
//!
//! Sweeps a rate range on an even grid and evaluates NPV at each point.

use std::env;

use serde::{Deserialize, Serialize};

use super::npv::compute_npv;

/// One sample of the NPV curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NpvCurvePoint {
    /// Discount rate in percent (e.g., 10.0 for 10%)
    pub rate: f64,

    /// NPV at that rate. Infinite or NaN at rates at or below -100%;
    /// serde_json writes those as null.
    pub npv: f64,
}

/// Range and resolution of an NPV curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveConfig {
    /// Lowest rate sampled, as a decimal
    pub min_rate: f64,

    /// Highest rate sampled, as a decimal
    pub max_rate: f64,

    /// Number of intervals; the curve has `steps + 1` points
    pub steps: usize,
}

impl CurveConfig {
    /// Build from NPV_CURVE_MIN_RATE, NPV_CURVE_MAX_RATE and NPV_CURVE_STEPS,
    /// using the defaults for anything missing or unparseable
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            min_rate: env::var("NPV_CURVE_MIN_RATE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.min_rate),
            max_rate: env::var("NPV_CURVE_MAX_RATE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_rate),
            steps: env::var("NPV_CURVE_STEPS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.steps),
        }
    }

    pub fn sample(&self, cash_flows: &[f64]) -> Vec<NpvCurvePoint> {
        compute_npv_curve(cash_flows, self.min_rate, self.max_rate, self.steps)
    }
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            min_rate: -0.5,
            max_rate: 1.0,
            steps: 50,
        }
    }
}

/// Sample NPV over `[min_rate, max_rate]` at `steps + 1` evenly spaced rates,
/// both ends included.
///
/// Rates are reported in percent. Non-finite NPVs (rates at or below -1) are
/// passed through unchanged. With `steps == 0` the curve is the single point
/// at `min_rate`.
pub fn compute_npv_curve(
    cash_flows: &[f64],
    min_rate: f64,
    max_rate: f64,
    steps: usize,
) -> Vec<NpvCurvePoint> {
    if steps == 0 {
        return vec![NpvCurvePoint {
            rate: min_rate * 100.0,
            npv: compute_npv(cash_flows, min_rate),
        }];
    }

    let span = max_rate - min_rate;
    (0..=steps)
        .map(|i| {
            // Scale before dividing so the last point lands exactly on max_rate
            let rate = min_rate + span * i as f64 / steps as f64;
            NpvCurvePoint {
                rate: rate * 100.0,
                npv: compute_npv(cash_flows, rate),
            }
        })
        .collect()
}
