//! Output structures for wealth projections

use serde::{Deserialize, Serialize};

use super::annuity::{deposit_path, monthly_balances, months_to_target};

/// Balance at the end of one period (period 0 is the starting balance)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub period: u32,
    pub balance: f64,
}

/// Complete yearly projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Real rate applied each period
    pub real_rate: f64,

    /// Contribution added before compounding each period
    pub periodic_contribution: f64,

    /// One point per period, `periods + 1` in total
    pub points: Vec<ProjectionPoint>,
}

impl ProjectionResult {
    pub fn new(real_rate: f64, periodic_contribution: f64, balances: Vec<f64>) -> Self {
        let points = balances
            .into_iter()
            .enumerate()
            .map(|(period, balance)| ProjectionPoint {
                period: period as u32,
                balance,
            })
            .collect();

        Self {
            real_rate,
            periodic_contribution,
            points,
        }
    }

    pub fn balances(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.balance).collect()
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let starting_balance = self.points.first().map(|p| p.balance).unwrap_or(0.0);
        let final_balance = self.points.last().map(|p| p.balance).unwrap_or(0.0);
        let periods = self.points.len().saturating_sub(1) as u32;
        let total_contributed = self.periodic_contribution * periods as f64;

        ProjectionSummary {
            periods,
            starting_balance,
            final_balance,
            total_contributed,
            real_growth: final_balance - starting_balance - total_contributed,
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub periods: u32,
    pub starting_balance: f64,
    pub final_balance: f64,
    pub total_contributed: f64,
    /// Final balance beyond what was put in (negative when the real rate is)
    pub real_growth: f64,
}

/// Monthly savings path alongside what was actually deposited
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthPath {
    pub balances: Vec<f64>,
    pub deposits: Vec<f64>,
}

/// One CSV/JSON row of a growth path
#[derive(Debug, Clone, Serialize)]
pub struct GrowthRow {
    pub month: usize,
    pub wealth: f64,
    pub deposits: f64,
}

impl GrowthPath {
    /// Monthly path for `years`, contributing `pmt` at each month end
    pub fn monthly(pv: f64, pmt: f64, annual_rate: f64, years: u32) -> Self {
        let months = years.saturating_mul(12);
        Self {
            balances: monthly_balances(pv, pmt, annual_rate, months),
            deposits: deposit_path(pv, pmt, months),
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = GrowthRow> + '_ {
        self.balances
            .iter()
            .zip(&self.deposits)
            .enumerate()
            .map(|(month, (&wealth, &deposits))| GrowthRow { month, wealth, deposits })
    }

    pub fn months_to_target(&self, target: f64) -> Option<usize> {
        months_to_target(&self.balances, target)
    }

    pub fn summary(&self) -> GrowthSummary {
        let final_balance = self.balances.last().copied().unwrap_or(0.0);
        let total_deposited = self.deposits.last().copied().unwrap_or(0.0);

        GrowthSummary {
            months: self.balances.len().saturating_sub(1),
            final_balance,
            total_deposited,
            interest_earned: final_balance - total_deposited,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthSummary {
    pub months: usize,
    pub final_balance: f64,
    pub total_deposited: f64,
    pub interest_earned: f64,
}
