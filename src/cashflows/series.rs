//! Cash-flow series container

use serde::{Deserialize, Serialize};

/// Ordered periodic cash flows. Index 0 is the present (usually the initial
/// outlay); index `i` is the net flow at the end of period `i`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CashFlowSeries {
    flows: Vec<f64>,
}

impl CashFlowSeries {
    pub fn new(flows: Vec<f64>) -> Self {
        Self { flows }
    }

    /// Build a series the way the calculator form does: the initial
    /// investment is always stored as an outlay, whatever sign it was entered
    /// with, and the later flows keep their own signs.
    pub fn from_investment(initial_investment: f64, flows: &[f64]) -> Self {
        let mut all = Vec::with_capacity(flows.len() + 1);
        all.push(-initial_investment.abs());
        all.extend_from_slice(flows);
        Self { flows: all }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.flows
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// Append the flow for the next period
    pub fn push(&mut self, flow: f64) {
        self.flows.push(flow);
    }

    /// True when the series has at least one strictly positive and one
    /// strictly negative flow
    pub fn has_sign_change(&self) -> bool {
        let has_positive = self.flows.iter().any(|&cf| cf > 0.0);
        let has_negative = self.flows.iter().any(|&cf| cf < 0.0);
        has_positive && has_negative
    }

    /// Undiscounted sum of all flows
    pub fn total(&self) -> f64 {
        self.flows.iter().sum()
    }

    /// Number of sign flips between consecutive non-zero flows.
    /// More than one means the series may have several IRRs.
    pub fn sign_changes(&self) -> usize {
        let signs: Vec<bool> = self
            .flows
            .iter()
            .filter(|cf| **cf != 0.0)
            .map(|cf| *cf > 0.0)
            .collect();
        signs.windows(2).filter(|w| w[0] != w[1]).count()
    }
}

impl From<Vec<f64>> for CashFlowSeries {
    fn from(flows: Vec<f64>) -> Self {
        Self::new(flows)
    }
}

impl From<&[f64]> for CashFlowSeries {
    fn from(flows: &[f64]) -> Self {
        Self::new(flows.to_vec())
    }
}

impl AsRef<[f64]> for CashFlowSeries {
    fn as_ref(&self) -> &[f64] {
        &self.flows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_investment_forces_outlay() {
        let series = CashFlowSeries::from_investment(1000.0, &[400.0, -50.0, 800.0]);
        assert_eq!(series.as_slice(), &[-1000.0, 400.0, -50.0, 800.0]);

        let series = CashFlowSeries::from_investment(-1000.0, &[1200.0]);
        assert_eq!(series.as_slice(), &[-1000.0, 1200.0]);
    }

    #[test]
    fn test_sign_change_detection() {
        assert!(CashFlowSeries::new(vec![-1.0, 2.0]).has_sign_change());
        assert!(!CashFlowSeries::new(vec![1.0, 2.0]).has_sign_change());
        assert!(!CashFlowSeries::new(vec![-1.0, 0.0]).has_sign_change());
        assert!(!CashFlowSeries::default().has_sign_change());
    }

    #[test]
    fn test_sign_changes_ignores_zeros() {
        assert_eq!(CashFlowSeries::new(vec![-100.0, 0.0, 50.0, 60.0]).sign_changes(), 1);
        assert_eq!(CashFlowSeries::new(vec![-100.0, 230.0, 0.0, -132.0]).sign_changes(), 2);
        assert_eq!(CashFlowSeries::new(vec![5.0, 5.0]).sign_changes(), 0);
    }

    #[test]
    fn test_total_and_push() {
        let mut series = CashFlowSeries::new(vec![-100.0]);
        series.push(60.0);
        series.push(70.0);
        assert_eq!(series.len(), 3);
        assert_eq!(series.total(), 30.0);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let series = CashFlowSeries::new(vec![-100.0, 121.0]);
        assert_eq!(serde_json::to_string(&series).unwrap(), "[-100.0,121.0]");
    }
}
