//! Wealth projection: yearly real-rate recurrence and monthly annuity math

pub mod annuity;
mod cashflows;
mod engine;

pub use annuity::{
    balance_at_month, future_value_of_annuity, future_value_of_annuity_iterative, monthly_balances,
    monthly_balances_iterative, months_to_target, opportunity_cost, required_monthly_payment,
    AnnuityTiming,
};
pub use cashflows::{
    GrowthPath, GrowthRow, GrowthSummary, ProjectionPoint, ProjectionResult, ProjectionSummary,
};
pub use engine::{project, ProjectionConfig, ProjectionEngine};
