//! Wealth Reality - projection engine for personal-finance scenarios
//!
//! This library provides:
//! - Yearly real-rate wealth projections and monthly annuity balance paths
//! - Leakage analysis (inflation, tax and interest drag on a balance)
//! - Opportunity cost of an uninvested monthly amount
//! - Debt payoff simulation under avalanche or snowball ordering
//!
//! All computations are pure and synchronous. Configuration and file loading
//! are the only fallible operations.

pub mod assumptions;
pub mod debt;
pub mod error;
pub mod leakage;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use assumptions::{CashFlowProfile, RateComposition, RateSet, ScenarioConfig};
pub use debt::{
    payoff_months, Debt, DebtPayoffSimulator, PayoffOutcome, PayoffResult, RepaymentStrategy,
};
pub use error::{EngineError, Result};
pub use leakage::{analyze_leakage, LeakageReport};
pub use projection::{project, ProjectionEngine, ProjectionPoint, ProjectionResult};
pub use scenario::{ScenarioReport, ScenarioRunner};
