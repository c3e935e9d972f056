//! Leakage: what a balance loses each year to inflation, tax and interest drag

use serde::{Deserialize, Serialize};

use crate::assumptions::RateSet;

/// Annualized losses on a snapshot of assets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeakageReport {
    pub inflation_loss: f64,
    pub tax_loss: f64,
    pub interest_drag: f64,
    pub total: f64,
}

impl LeakageReport {
    /// Linear in `assets`; `total` is the sum of the three parts
    pub fn analyze(assets: f64, tax_rate: f64, inflation_rate: f64, interest_rate: f64) -> Self {
        let inflation_loss = assets * inflation_rate;
        let tax_loss = assets * tax_rate;
        let interest_drag = assets * interest_rate;

        Self {
            inflation_loss,
            tax_loss,
            interest_drag,
            total: inflation_loss + tax_loss + interest_drag,
        }
    }

    pub fn from_rates(assets: f64, rates: &RateSet) -> Self {
        Self::analyze(assets, rates.tax, rates.inflation, rates.interest_drag)
    }
}

/// Leakage with no interest drag
pub fn analyze_leakage(assets: f64, tax_rate: f64, inflation_rate: f64) -> LeakageReport {
    LeakageReport::analyze(assets, tax_rate, inflation_rate, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_components() {
        let report = LeakageReport::analyze(100_000.0, 0.15, 0.05, 0.01);

        assert_eq!(report.inflation_loss, 5_000.0);
        assert_eq!(report.tax_loss, 15_000.0);
        assert_eq!(report.interest_drag, 1_000.0);
        assert_eq!(report.total, 21_000.0);
    }

    #[test]
    fn test_total_is_sum_of_parts() {
        for assets in [0.0, 1.0, 1234.56, 987_654.321] {
            let r = LeakageReport::analyze(assets, 0.3, 0.07, 0.013);
            assert_eq!(r.total, r.inflation_loss + r.tax_loss + r.interest_drag);
        }
    }

    #[test]
    fn test_linear_in_assets() {
        let single = LeakageReport::analyze(40_000.0, 0.2, 0.06, 0.02);
        let double = LeakageReport::analyze(80_000.0, 0.2, 0.06, 0.02);

        assert_eq!(double.inflation_loss, 2.0 * single.inflation_loss);
        assert_eq!(double.tax_loss, 2.0 * single.tax_loss);
        assert_eq!(double.interest_drag, 2.0 * single.interest_drag);
    }

    #[test]
    fn test_default_interest_is_zero() {
        let report = analyze_leakage(10_000.0, 0.1, 0.05);
        assert_eq!(report.interest_drag, 0.0);
        assert_eq!(report.total, 1_500.0);
    }

    #[test]
    fn test_from_rates() {
        let rates = RateSet::new(0.12, 0.1, 0.04).with_interest_drag(0.005);
        let report = LeakageReport::from_rates(20_000.0, &rates);

        assert_eq!(report, LeakageReport::analyze(20_000.0, 0.1, 0.04, 0.005));
    }
}
