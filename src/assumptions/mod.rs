//! Scenario assumptions: rates, household cash flow, and the config that carries them

pub mod loader;
mod profile;
mod rates;

pub use loader::{ScenarioConfig, ENV_PREFIX, MAX_HORIZON_YEARS};
pub use profile::CashFlowProfile;
pub use rates::{RateComposition, RateSet};
