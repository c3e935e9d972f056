//! Scenario runner composing projection, leakage and debt payoff
//!
//! Validates and resolves a [`ScenarioConfig`] once, then runs the pure
//! components against it as many times as needed.

use log::info;
use rayon::prelude::*;
use serde::Serialize;

use crate::assumptions::ScenarioConfig;
use crate::debt::{Debt, DebtPayoffSimulator, PayoffResult, RepaymentStrategy};
use crate::error::Result;
use crate::leakage::LeakageReport;
use crate::projection::{
    opportunity_cost, required_monthly_payment, GrowthPath, GrowthSummary, ProjectionConfig,
    ProjectionEngine, ProjectionResult,
};

/// Everything one scenario produces
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    /// Real rate used by the yearly projection
    pub real_rate: f64,

    /// Yearly real-terms projection
    pub yearly: ProjectionResult,

    /// Monthly nominal savings path
    pub growth_path: GrowthPath,
    pub growth: GrowthSummary,

    /// First month the nominal path reaches the milestone target
    pub milestone_month: Option<usize>,

    /// Monthly saving needed to hit the milestone within the horizon
    pub required_monthly_payment: Option<f64>,

    /// Annual leakage on the final nominal balance
    pub leakage: LeakageReport,

    /// What the monthly surplus grows to if invested for the horizon
    pub opportunity_cost: f64,

    /// Repayment strategy from the config
    pub strategy: RepaymentStrategy,

    /// One payoff result per strategy, configured strategy first; empty without debts
    pub debt: Vec<PayoffResult>,
}

impl ScenarioReport {
    /// Payoff under the configured strategy
    pub fn chosen_debt(&self) -> Option<&PayoffResult> {
        self.debt.iter().find(|result| result.strategy == self.strategy)
    }
}

/// One growth rate in a sweep
#[derive(Debug, Clone, Serialize)]
pub struct SweepPoint {
    pub growth: f64,
    pub real_rate: f64,
    pub final_real_balance: f64,
    pub final_nominal_balance: f64,
    pub milestone_month: Option<usize>,
}

/// Pre-validated scenario ready to run
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    config: ScenarioConfig,
    debts: Vec<Debt>,
    simulator: DebtPayoffSimulator,
}

impl ScenarioRunner {
    /// Validate the config and load any debts file
    pub fn new(config: ScenarioConfig) -> Result<Self> {
        config.validate()?;
        let debts = config.resolve_debts()?;

        Ok(Self {
            config,
            debts,
            simulator: DebtPayoffSimulator::new(),
        })
    }

    /// Use a custom simulator (ceiling, tracing)
    pub fn with_simulator(mut self, simulator: DebtPayoffSimulator) -> Self {
        self.simulator = simulator;
        self
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    pub fn debts(&self) -> &[Debt] {
        &self.debts
    }

    pub fn projection_engine(&self) -> ProjectionEngine {
        ProjectionEngine::new(
            self.config.rates,
            ProjectionConfig {
                periods: self.config.horizon_years,
                composition: self.config.composition,
            },
        )
    }

    fn horizon_months(&self) -> u32 {
        self.config.horizon_years.saturating_mul(12)
    }

    /// Monthly nominal savings path at the configured growth rate
    pub fn growth_path(&self) -> GrowthPath {
        let profile = &self.config.profile;
        GrowthPath::monthly(
            profile.starting_assets,
            profile.surplus(),
            self.config.rates.growth,
            self.config.horizon_years,
        )
    }

    /// Run the debt simulator with the configured payment
    pub fn run_debt(&self, strategy: RepaymentStrategy) -> PayoffResult {
        self.simulator.simulate(&self.debts, self.config.debt_payment, strategy)
    }

    /// Payoff results for every strategy, in parallel, configured strategy first
    pub fn compare_strategies(&self) -> Vec<PayoffResult> {
        let chosen = self.config.strategy;
        let mut strategies = vec![chosen];
        strategies.extend(RepaymentStrategy::ALL.iter().filter(|&&s| s != chosen));

        strategies
            .par_iter()
            .map(|&strategy| self.run_debt(strategy))
            .collect()
    }

    /// Run the full scenario
    pub fn run(&self) -> ScenarioReport {
        let config = &self.config;
        let engine = self.projection_engine();
        let yearly = engine.project_profile(&config.profile);

        let growth_path = self.growth_path();
        let growth = growth_path.summary();
        let milestone_month = growth_path.months_to_target(config.milestone_target);

        let required = required_monthly_payment(
            config.milestone_target,
            config.profile.starting_assets,
            config.rates.growth,
            self.horizon_months(),
        )
        .ok();

        let leakage = LeakageReport::from_rates(growth.final_balance, &config.rates);
        let opportunity_cost = opportunity_cost(
            config.profile.surplus().max(0.0),
            config.rates.growth,
            config.horizon_years,
        );

        let debt = if self.debts.is_empty() {
            Vec::new()
        } else {
            self.compare_strategies()
        };

        info!(
            "Scenario complete: {} years, real rate {:.4}, final nominal {:.2}, milestone {:?}",
            config.horizon_years, yearly.real_rate, growth.final_balance, milestone_month
        );

        ScenarioReport {
            real_rate: yearly.real_rate,
            yearly,
            growth_path,
            growth,
            milestone_month,
            required_monthly_payment: required,
            leakage,
            opportunity_cost,
            strategy: config.strategy,
            debt,
        }
    }

    /// Re-run the projections for several growth rates, in parallel
    pub fn run_rate_sweep(&self, growth_rates: &[f64]) -> Vec<SweepPoint> {
        growth_rates
            .par_iter()
            .map(|&growth| {
                let mut config = self.config.clone();
                config.rates.growth = growth;
                let runner = Self {
                    config,
                    debts: Vec::new(),
                    simulator: self.simulator.clone(),
                };

                let yearly = runner.projection_engine().project_profile(&runner.config.profile);
                let path = runner.growth_path();

                SweepPoint {
                    growth,
                    real_rate: yearly.real_rate,
                    final_real_balance: yearly.summary().final_balance,
                    final_nominal_balance: path.summary().final_balance,
                    milestone_month: path.months_to_target(runner.config.milestone_target),
                }
            })
            .collect()
    }
}
