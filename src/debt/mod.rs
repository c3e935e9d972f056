//! Debt portfolio payoff under avalanche or snowball ordering

pub mod loader;
mod simulator;
mod state;
mod types;

pub use loader::{load_debts, load_debts_from_reader};
pub use simulator::{
    payoff_months, DebtPayoffSimulator, MonthlyDebtRow, PayoffOutcome, PayoffResult,
    DEFAULT_MAX_MONTHS,
};
pub use state::PayoffState;
pub use types::{attack_order, total_monthly_interest, Debt, RepaymentStrategy};
