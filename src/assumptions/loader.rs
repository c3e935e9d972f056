//! Scenario configuration: defaults, JSON files and environment overrides
//!
//! The numeric engine never validates its inputs. This is the boundary where
//! caller-supplied values get checked before a run.

use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use super::{CashFlowProfile, RateComposition, RateSet};
use crate::debt::{load_debts, Debt, RepaymentStrategy};
use crate::error::{EngineError, Result};

/// Prefix for environment overrides (`WR_INCOME`, `WR_GROWTH`, ...)
pub const ENV_PREFIX: &str = "WR_";

/// Longest horizon a scenario may ask for; monthly paths hold `12 * years + 1` balances
pub const MAX_HORIZON_YEARS: u32 = 200;

/// Every scalar input a scenario needs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub profile: CashFlowProfile,
    pub rates: RateSet,
    pub composition: RateComposition,

    /// Projection horizon in years
    pub horizon_years: u32,

    /// Monthly budget put towards debts
    pub debt_payment: f64,
    pub strategy: RepaymentStrategy,

    /// Balance the milestone search looks for
    pub milestone_target: f64,

    pub debts: Vec<Debt>,

    /// Extra debts appended from a CSV file
    pub debts_file: Option<PathBuf>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            profile: CashFlowProfile::default(),
            rates: RateSet::default(),
            composition: RateComposition::default(),
            horizon_years: 5,
            debt_payment: 0.0,
            strategy: RepaymentStrategy::default(),
            milestone_target: 1_000_000.0,
            debts: Vec::new(),
            debts_file: None,
        }
    }
}

fn parse_override<T: FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim().parse().map_err(|_| {
        EngineError::InvalidInput(format!("{}{}: cannot parse '{}'", ENV_PREFIX, key, raw))
    })
}

fn check_finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EngineError::InvalidInput(format!("{} must be finite, got {}", name, value)))
    }
}

impl ScenarioConfig {
    /// Load a scenario from a JSON file; missing fields take defaults
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        debug!("Loaded scenario config from {}", path.display());
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Apply `WR_*` variables from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| env::var(format!("{}{}", ENV_PREFIX, key)).ok())
    }

    /// Apply overrides from any lookup keyed by the unprefixed name
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let set_f64 = |key: &str, target: &mut f64| -> Result<()> {
            if let Some(raw) = lookup(key) {
                *target = parse_override(key, &raw)?;
                debug!("Override {}{} = {}", ENV_PREFIX, key, target);
            }
            Ok(())
        };

        set_f64("INCOME", &mut self.profile.income)?;
        set_f64("EXPENSES", &mut self.profile.expenses)?;
        set_f64("ASSETS", &mut self.profile.starting_assets)?;
        set_f64("GROWTH", &mut self.rates.growth)?;
        set_f64("TAX", &mut self.rates.tax)?;
        set_f64("INFLATION", &mut self.rates.inflation)?;
        set_f64("INTEREST_DRAG", &mut self.rates.interest_drag)?;
        set_f64("DEBT_PAYMENT", &mut self.debt_payment)?;
        set_f64("MILESTONE", &mut self.milestone_target)?;

        if let Some(raw) = lookup("YEARS") {
            self.horizon_years = parse_override("YEARS", &raw)?;
        }
        if let Some(raw) = lookup("STRATEGY") {
            self.strategy = raw.parse()?;
        }
        if let Some(raw) = lookup("COMPOSITION") {
            let value = serde_json::Value::String(raw.trim().to_string());
            self.composition = serde_json::from_value(value).map_err(|_| {
                EngineError::InvalidInput(format!("{}COMPOSITION: unknown '{}'", ENV_PREFIX, raw))
            })?;
        }

        Ok(())
    }

    /// Reject non-finite numbers, negative debts and an empty or oversized horizon
    pub fn validate(&self) -> Result<()> {
        check_finite("income", self.profile.income)?;
        check_finite("expenses", self.profile.expenses)?;
        check_finite("starting assets", self.profile.starting_assets)?;
        check_finite("growth", self.rates.growth)?;
        check_finite("tax", self.rates.tax)?;
        check_finite("inflation", self.rates.inflation)?;
        check_finite("interest drag", self.rates.interest_drag)?;
        check_finite("debt payment", self.debt_payment)?;
        check_finite("milestone target", self.milestone_target)?;

        if self.horizon_years == 0 {
            return Err(EngineError::ZeroHorizon);
        }
        if self.horizon_years > MAX_HORIZON_YEARS {
            return Err(EngineError::InvalidInput(format!(
                "horizon of {} years exceeds the {} year limit",
                self.horizon_years, MAX_HORIZON_YEARS
            )));
        }

        for (i, debt) in self.debts.iter().enumerate() {
            let balance_ok = debt.balance.is_finite() && debt.balance >= 0.0;
            let rate_ok = debt.rate.is_finite() && debt.rate >= 0.0;
            if !balance_ok || !rate_ok {
                return Err(EngineError::InvalidInput(format!(
                    "debt {} has balance {} and rate {}; both must be finite and non-negative",
                    i + 1,
                    debt.balance,
                    debt.rate
                )));
            }
        }

        Ok(())
    }

    /// Inline debts followed by any loaded from `debts_file`
    pub fn resolve_debts(&self) -> Result<Vec<Debt>> {
        let mut debts = self.debts.clone();
        if let Some(path) = &self.debts_file {
            debts.extend(load_debts(path)?);
        }
        Ok(debts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_calculator() {
        let config = ScenarioConfig::default();

        assert_eq!(config.profile.surplus(), 20_000.0);
        assert_eq!(config.profile.starting_assets, 0.0);
        assert_eq!(config.rates.growth, 0.15);
        assert_eq!(config.rates.inflation, 0.05);
        assert_eq!(config.horizon_years, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ScenarioConfig::from_json_str(
            r#"{
                "profile": { "income": 4000, "expenses": 3000 },
                "rates": { "growth": 0.07 },
                "composition": "additive",
                "strategy": "snowball",
                "debts": [ { "balance": 1500, "rate": 0.19 } ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.profile.surplus(), 1_000.0);
        assert_eq!(config.rates.growth, 0.07);
        assert_eq!(config.rates.inflation, 0.05);
        assert_eq!(config.composition, RateComposition::Additive);
        assert_eq!(config.strategy, RepaymentStrategy::Snowball);
        assert_eq!(config.debts, vec![Debt::new(1_500.0, 0.19)]);
        assert_eq!(config.horizon_years, 5);
    }

    #[test]
    fn test_overrides() {
        let mut config = ScenarioConfig::default();
        config
            .apply_overrides(lookup(&[
                ("INCOME", "5500"),
                ("YEARS", "30"),
                ("STRATEGY", "snowball"),
                ("COMPOSITION", "taxed_difference"),
                ("TAX", " 0.25 "),
            ]))
            .unwrap();

        assert_eq!(config.profile.income, 5_500.0);
        assert_eq!(config.horizon_years, 30);
        assert_eq!(config.strategy, RepaymentStrategy::Snowball);
        assert_eq!(config.composition, RateComposition::TaxedDifference);
        assert_eq!(config.rates.tax, 0.25);
    }

    #[test]
    fn test_bad_override_rejected() {
        let mut config = ScenarioConfig::default();
        let err = config.apply_overrides(lookup(&[("GROWTH", "fast")])).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));

        let err = config.apply_overrides(lookup(&[("COMPOSITION", "fisher")])).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        let mut config = ScenarioConfig::default();
        config.rates.inflation = f64::NAN;
        assert!(matches!(config.validate(), Err(EngineError::InvalidInput(_))));

        let mut config = ScenarioConfig::default();
        config.horizon_years = 0;
        assert!(matches!(config.validate(), Err(EngineError::ZeroHorizon)));

        let mut config = ScenarioConfig::default();
        config.debts.push(Debt::new(-10.0, 0.1));
        assert!(matches!(config.validate(), Err(EngineError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_bounds_horizon() {
        let mut config = ScenarioConfig::default();
        config.horizon_years = MAX_HORIZON_YEARS;
        assert!(config.validate().is_ok());

        config.horizon_years = 400_000_000;
        assert!(matches!(config.validate(), Err(EngineError::InvalidInput(_))));

        let mut config = ScenarioConfig::default();
        config.apply_overrides(lookup(&[("YEARS", "4000000000")])).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_file_and_debts_file() {
        let mut debts_csv = tempfile::NamedTempFile::new().unwrap();
        writeln!(debts_csv, "name,balance,rate\nstore card,900,0.29").unwrap();

        let mut json = tempfile::NamedTempFile::new().unwrap();
        let path = debts_csv.path().to_string_lossy().replace('\\', "\\\\");
        let debts_json = r#"[{"name": "loan", "balance": 4000, "rate": 0.08}]"#;
        write!(json, r#"{{ "debts": {}, "debts_file": "{}" }}"#, debts_json, path).unwrap();

        let config = ScenarioConfig::from_json_path(json.path()).unwrap();
        let debts = config.resolve_debts().unwrap();

        assert_eq!(debts.len(), 2);
        assert_eq!(debts[0].name, "loan");
        assert_eq!(debts[1], Debt::named("store card", 900.0, 0.29));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = Path::new("/nonexistent/scenario.json");
        let err = ScenarioConfig::from_json_path(path).unwrap_err();
        assert!(matches!(err, EngineError::Io(_)));
    }
}
