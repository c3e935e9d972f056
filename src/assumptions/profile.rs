//! Cash flow profile of the household

use serde::{Deserialize, Serialize};

/// Monthly income/expense picture plus the assets already saved
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CashFlowProfile {
    /// Monthly take-home income
    pub income: f64,

    /// Monthly spending
    pub expenses: f64,

    /// Balance already invested at period 0
    pub starting_assets: f64,
}

impl CashFlowProfile {
    pub fn new(income: f64, expenses: f64, starting_assets: f64) -> Self {
        Self {
            income,
            expenses,
            starting_assets,
        }
    }

    /// Monthly surplus; negative means spending exceeds income
    pub fn surplus(&self) -> f64 {
        self.income - self.expenses
    }

    /// Surplus contributed once per year in the yearly projection
    pub fn annualized_surplus(&self) -> f64 {
        self.surplus() * 12.0
    }

    /// A deficit turns the scenario from growing wealth into protecting it
    pub fn is_deficit(&self) -> bool {
        self.surplus() < 0.0
    }
}

impl Default for CashFlowProfile {
    fn default() -> Self {
        Self::new(20_000.0, 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surplus() {
        let profile = CashFlowProfile::new(5_000.0, 3_500.0, 10_000.0);
        assert_eq!(profile.surplus(), 1_500.0);
        assert_eq!(profile.annualized_surplus(), 18_000.0);
        assert!(!profile.is_deficit());
    }

    #[test]
    fn test_deficit() {
        let profile = CashFlowProfile::new(2_000.0, 2_600.0, 0.0);
        assert!(profile.is_deficit());
        assert_eq!(profile.annualized_surplus(), -7_200.0);
    }
}
