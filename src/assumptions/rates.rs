//! Rate assumptions and real-rate composition

use serde::{Deserialize, Serialize};

/// How growth, tax and inflation combine into a single real rate.
///
/// Different versions of the calculator disagree on this, so the policy is
/// kept as a caller choice rather than baked into the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateComposition {
    /// `growth - inflation`, no tax haircut
    Additive,
    /// `(growth - inflation) * (1 - tax)`
    TaxedDifference,
    /// `growth * (1 - tax) - inflation`
    #[default]
    Multiplicative,
}

/// Annual rate assumptions, all expressed as fractions (0.05 = 5%)
///
/// No cross-field invariant is enforced: growth below inflation is a valid
/// configuration and simply yields decaying real wealth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateSet {
    /// Nominal annual growth / yield
    pub growth: f64,

    /// Tax rate applied to returns
    pub tax: f64,

    /// Annual inflation
    pub inflation: f64,

    /// Fees or interest drag on the balance
    pub interest_drag: f64,
}

impl RateSet {
    pub fn new(growth: f64, tax: f64, inflation: f64) -> Self {
        Self {
            growth,
            tax,
            inflation,
            interest_drag: 0.0,
        }
    }

    pub fn with_interest_drag(mut self, interest_drag: f64) -> Self {
        self.interest_drag = interest_drag;
        self
    }

    /// Compose the real annual rate under the chosen convention
    pub fn real_rate(&self, composition: RateComposition) -> f64 {
        match composition {
            RateComposition::Additive => self.growth - self.inflation,
            RateComposition::TaxedDifference => (self.growth - self.inflation) * (1.0 - self.tax),
            RateComposition::Multiplicative => self.growth * (1.0 - self.tax) - self.inflation,
        }
    }
}

impl Default for RateSet {
    fn default() -> Self {
        // 15% money-market yield against 5% inflation
        Self::new(0.15, 0.0, 0.05)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_compositions() {
        let rates = RateSet::new(0.10, 0.20, 0.03);

        let real = |composition| rates.real_rate(composition);

        assert_abs_diff_eq!(real(RateComposition::Additive), 0.07, epsilon = 1e-12);
        assert_abs_diff_eq!(real(RateComposition::TaxedDifference), 0.056, epsilon = 1e-12);
        assert_abs_diff_eq!(real(RateComposition::Multiplicative), 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_tax_compositions_agree() {
        let rates = RateSet::new(0.08, 0.0, 0.02);
        let additive = rates.real_rate(RateComposition::Additive);

        let taxed = rates.real_rate(RateComposition::TaxedDifference);
        let multiplicative = rates.real_rate(RateComposition::Multiplicative);

        assert_abs_diff_eq!(taxed, additive, epsilon = 1e-12);
        assert_abs_diff_eq!(multiplicative, additive, epsilon = 1e-12);
    }

    #[test]
    fn test_growth_below_inflation_is_negative() {
        let rates = RateSet::new(0.02, 0.0, 0.06);
        assert!(rates.real_rate(RateComposition::Additive) < 0.0);
    }

    #[test]
    fn test_composition_serde_names() {
        let json = serde_json::to_string(&RateComposition::TaxedDifference).unwrap();
        assert_eq!(json, "\"taxed_difference\"");
    }
}
