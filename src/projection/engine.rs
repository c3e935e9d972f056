//! Yearly wealth projection

use log::{debug, warn};

use crate::assumptions::{CashFlowProfile, RateComposition, RateSet};
use super::cashflows::ProjectionResult;

/// Compound a balance forward one period at a time.
///
/// `balance[0] = starting_assets` and
/// `balance[n+1] = (balance[n] + periodic_surplus) * (1 + real_rate)`.
/// The contribution lands before compounding. Non-finite input propagates.
pub fn project(
    starting_assets: f64,
    periodic_surplus: f64,
    real_rate: f64,
    periods: u32,
) -> Vec<f64> {
    let mut balances = Vec::with_capacity(periods as usize + 1);
    let mut balance = starting_assets;
    balances.push(balance);

    for _ in 0..periods {
        balance = (balance + periodic_surplus) * (1.0 + real_rate);
        balances.push(balance);
    }

    balances
}

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Number of yearly periods to project
    pub periods: u32,

    /// How the real rate is composed from the rate set
    pub composition: RateComposition,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            periods: 5,
            composition: RateComposition::default(),
        }
    }
}

/// Projection engine bound to one rate set
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    rates: RateSet,
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(rates: RateSet, config: ProjectionConfig) -> Self {
        Self { rates, config }
    }

    pub fn rates(&self) -> &RateSet {
        &self.rates
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    pub fn real_rate(&self) -> f64 {
        self.rates.real_rate(self.config.composition)
    }

    /// Project a household's wealth using its annualized surplus
    pub fn project_profile(&self, profile: &CashFlowProfile) -> ProjectionResult {
        if profile.is_deficit() {
            warn!(
                "Monthly expenses exceed income by {:.2}; projecting a drawdown",
                -profile.surplus()
            );
        }
        self.project_balance(profile.starting_assets, profile.annualized_surplus())
    }

    /// Project an explicit starting balance and yearly contribution
    pub fn project_balance(
        &self,
        starting_assets: f64,
        annual_contribution: f64,
    ) -> ProjectionResult {
        let real_rate = self.real_rate();
        debug!(
            "Projecting {} periods at real rate {:.4} ({:?})",
            self.config.periods, real_rate, self.config.composition
        );

        let periods = self.config.periods;
        let balances = project(starting_assets, annual_contribution, real_rate, periods);
        ProjectionResult::new(real_rate, annual_contribution, balances)
    }
}
