//! Month-by-month debt payoff simulation

use log::{debug, warn};
use serde::Serialize;

use super::state::PayoffState;
use super::types::{Debt, RepaymentStrategy};

/// Safety ceiling on simulated months
pub const DEFAULT_MAX_MONTHS: u32 = 1000;

/// How a simulation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PayoffOutcome {
    /// Every balance reached zero after `months`
    PaidOff { months: u32 },
    /// Ceiling reached with balance still outstanding
    NotPaidOff { months_simulated: u32 },
}

impl PayoffOutcome {
    pub fn months_to_zero(&self) -> Option<u32> {
        match self {
            PayoffOutcome::PaidOff { months } => Some(*months),
            PayoffOutcome::NotPaidOff { .. } => None,
        }
    }

    pub fn is_paid_off(&self) -> bool {
        matches!(self, PayoffOutcome::PaidOff { .. })
    }
}

/// One simulated month, recorded after interest accrual
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyDebtRow {
    pub month: u32,
    pub paid: f64,
    pub interest: f64,
    pub balances: Vec<f64>,
    pub total_balance: f64,
}

/// Result of a payoff run
#[derive(Debug, Clone, Serialize)]
pub struct PayoffResult {
    pub strategy: RepaymentStrategy,
    pub outcome: PayoffOutcome,
    pub total_interest: f64,
    pub total_paid: f64,

    /// Per-month rows, empty unless tracing was requested
    pub trace: Vec<MonthlyDebtRow>,
}

impl PayoffResult {
    pub fn months_to_zero(&self) -> Option<u32> {
        self.outcome.months_to_zero()
    }

    pub fn is_paid_off(&self) -> bool {
        self.outcome.is_paid_off()
    }
}

/// Payoff simulator with a bounded horizon
#[derive(Debug, Clone)]
pub struct DebtPayoffSimulator {
    max_months: u32,
    record_trace: bool,
}

impl DebtPayoffSimulator {
    pub fn new() -> Self {
        Self {
            max_months: DEFAULT_MAX_MONTHS,
            record_trace: false,
        }
    }

    pub fn with_max_months(mut self, max_months: u32) -> Self {
        self.max_months = max_months;
        self
    }

    pub fn with_trace(mut self, record_trace: bool) -> Self {
        self.record_trace = record_trace;
        self
    }

    pub fn max_months(&self) -> u32 {
        self.max_months
    }

    /// Pay down `debts` with a fixed monthly budget.
    ///
    /// Each month: pay along the attack order, then accrue interest on what
    /// is left. Stops when every balance is cleared or at the ceiling.
    pub fn simulate(
        &self,
        debts: &[Debt],
        monthly_payment: f64,
        strategy: RepaymentStrategy,
    ) -> PayoffResult {
        let mut state = PayoffState::new(debts, strategy);
        let mut trace = Vec::new();

        debug!(
            "Debt payoff: {} debts, payment {:.2}/month, {} order {:?}",
            debts.len(),
            monthly_payment,
            strategy,
            state.order()
        );

        let outcome = loop {
            if state.is_clear() {
                break PayoffOutcome::PaidOff { months: state.month };
            }
            if state.month >= self.max_months {
                warn!(
                    "Debt not paid off within {} months ({} strategy, {:.2} outstanding)",
                    self.max_months,
                    strategy,
                    state.total_balance()
                );
                break PayoffOutcome::NotPaidOff {
                    months_simulated: state.month,
                };
            }

            let paid = state.apply_payments(monthly_payment);
            let interest = state.accrue_interest();
            state.month += 1;

            if self.record_trace {
                trace.push(MonthlyDebtRow {
                    month: state.month,
                    paid,
                    interest,
                    balances: state.balances(),
                    total_balance: state.total_balance(),
                });
            }
        };

        PayoffResult {
            strategy,
            outcome,
            total_interest: state.total_interest,
            total_paid: state.total_paid,
            trace,
        }
    }
}

impl Default for DebtPayoffSimulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Months until the portfolio is debt-free under `strategy`
pub fn payoff_months(
    debts: &[Debt],
    monthly_payment: f64,
    strategy: RepaymentStrategy,
) -> PayoffOutcome {
    DebtPayoffSimulator::new()
        .simulate(debts, monthly_payment, strategy)
        .outcome
}
