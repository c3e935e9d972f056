//! Load debt lists from CSV
//!
//! Expected columns: `name` (optional), `balance`, and exactly one of `rate`
//! or `rate_percent` per row.
//!
//! `rate` is an annual fraction, except that a value above 1 is read as a
//! percentage (24 -> 0.24). That makes fractional rates above 100% APR
//! unreachable through `rate`: 1.5 means 1.5%, not 150%. Use `rate_percent`
//! (always a percentage, 150 -> 1.5) for those.

use std::io::Read;
use std::path::Path;

use csv::{Reader, ReaderBuilder, Trim};
use log::debug;
use serde::Deserialize;

use super::Debt;
use crate::error::{EngineError, Result};

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    name: Option<String>,
    balance: f64,
    #[serde(default)]
    rate: Option<f64>,
    #[serde(default)]
    rate_percent: Option<f64>,
}

impl CsvRow {
    fn into_debt(self, line: usize) -> Result<Debt> {
        if !self.balance.is_finite() || self.balance < 0.0 {
            return Err(EngineError::InvalidInput(format!(
                "row {}: balance must be a non-negative number, got {}",
                line, self.balance
            )));
        }

        let raw = match (self.rate, self.rate_percent) {
            (Some(_), Some(_)) => {
                return Err(EngineError::InvalidInput(format!(
                    "row {}: give either rate or rate_percent, not both",
                    line
                )));
            }
            (None, None) => {
                return Err(EngineError::InvalidInput(format!("row {}: missing rate", line)));
            }
            (Some(rate), None) | (None, Some(rate)) => rate,
        };
        if !raw.is_finite() || raw < 0.0 {
            return Err(EngineError::InvalidInput(format!(
                "row {}: rate must be a non-negative number, got {}",
                line, raw
            )));
        }

        let rate = if self.rate_percent.is_some() {
            raw / 100.0
        } else if raw > 1.0 {
            debug!("row {}: rate {} read as a percentage", line, raw);
            raw / 100.0
        } else {
            raw
        };
        Ok(Debt::named(self.name.unwrap_or_default(), self.balance, rate))
    }
}

fn read_debts<R: Read>(mut reader: Reader<R>) -> Result<Vec<Debt>> {
    let mut debts = Vec::new();

    for (i, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        debts.push(row.into_debt(i + 1)?);
    }

    Ok(debts)
}

/// Load debts from a CSV file
pub fn load_debts<P: AsRef<Path>>(path: P) -> Result<Vec<Debt>> {
    let reader = ReaderBuilder::new().trim(Trim::All).from_path(path)?;
    read_debts(reader)
}

/// Load debts from any reader (string buffer, stdin, ...)
pub fn load_debts_from_reader<R: Read>(reader: R) -> Result<Vec<Debt>> {
    read_debts(ReaderBuilder::new().trim(Trim::All).from_reader(reader))
}
