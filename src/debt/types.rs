//! Debt records and repayment strategies

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A single debt: outstanding balance and annual nominal rate (compounded monthly)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    /// Optional label (card, loan, ...)
    #[serde(default)]
    pub name: String,

    /// Outstanding balance
    pub balance: f64,

    /// Annual nominal interest rate
    pub rate: f64,
}

impl Debt {
    pub fn new(balance: f64, rate: f64) -> Self {
        Self {
            name: String::new(),
            balance,
            rate,
        }
    }

    pub fn named(name: impl Into<String>, balance: f64, rate: f64) -> Self {
        Self {
            name: name.into(),
            balance,
            rate,
        }
    }

    pub fn monthly_rate(&self) -> f64 {
        self.rate / 12.0
    }

    pub fn is_cleared(&self) -> bool {
        self.balance <= 0.0
    }

    /// Interest accrued over one month at the current balance
    pub fn monthly_interest(&self) -> f64 {
        if self.is_cleared() {
            0.0
        } else {
            self.balance * self.monthly_rate()
        }
    }
}

/// Order in which surplus payment attacks the debts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepaymentStrategy {
    /// Highest interest rate first
    #[default]
    Avalanche,
    /// Smallest balance first
    Snowball,
}

impl RepaymentStrategy {
    pub const ALL: [RepaymentStrategy; 2] =
        [RepaymentStrategy::Avalanche, RepaymentStrategy::Snowball];

    fn compare(&self, a: &Debt, b: &Debt) -> Ordering {
        match self {
            RepaymentStrategy::Avalanche => b.rate.total_cmp(&a.rate),
            RepaymentStrategy::Snowball => a.balance.total_cmp(&b.balance),
        }
    }
}

impl fmt::Display for RepaymentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepaymentStrategy::Avalanche => write!(f, "avalanche"),
            RepaymentStrategy::Snowball => write!(f, "snowball"),
        }
    }
}

impl FromStr for RepaymentStrategy {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "avalanche" => Ok(RepaymentStrategy::Avalanche),
            "snowball" => Ok(RepaymentStrategy::Snowball),
            other => Err(EngineError::InvalidInput(format!(
                "Unknown repayment strategy: {}",
                other
            ))),
        }
    }
}

/// Indices of `debts` in the order the strategy pays them.
///
/// Computed once per simulation from the starting balances. The sort is
/// stable, so ties keep their input order.
pub fn attack_order(debts: &[Debt], strategy: RepaymentStrategy) -> Vec<usize> {
    let mut order: Vec<usize> = (0..debts.len()).collect();
    order.sort_by(|&a, &b| strategy.compare(&debts[a], &debts[b]));
    order
}

/// Sum of one month's interest across the portfolio
pub fn total_monthly_interest(debts: &[Debt]) -> f64 {
    debts.iter().map(Debt::monthly_interest).sum()
}
