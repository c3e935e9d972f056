//! Monthly compounding: annuity balances, opportunity cost and its inverse
//!
//! Every closed form here has an iterative twin. The iterative versions are
//! the reference semantics; the closed forms must agree with them to well
//! within 1e-6 relative for ordinary inputs.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Periodic rates at or below this magnitude use the linear (zero-rate) formula
pub const NEAR_ZERO_RATE: f64 = 1e-12;

/// When a contribution lands within its period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnuityTiming {
    /// End of period: contribution earns nothing in the period it is made
    Ordinary,
    /// Start of period: contribution compounds for the full period
    #[default]
    Due,
}

/// `(1 + r)^n - 1` without cancellation for small `r`
fn growth_factor(r: f64, n: u32) -> f64 {
    if n == 0 {
        return 0.0;
    }
    if r <= -1.0 {
        return (1.0 + r).powi(n as i32) - 1.0;
    }
    (n as f64 * r.ln_1p()).exp_m1()
}

fn is_near_zero(r: f64) -> bool {
    r.abs() <= NEAR_ZERO_RATE
}

/// Balance after `months` of ordinary contributions, closed form:
/// `pv*(1+r)^m + pmt*((1+r)^m - 1)/r` with `r = annual_rate / 12`.
pub fn balance_at_month(pv: f64, pmt: f64, annual_rate: f64, months: u32) -> f64 {
    let r = annual_rate / 12.0;
    if is_near_zero(r) {
        return pv + pmt * months as f64;
    }
    let g = growth_factor(r, months);
    pv * (1.0 + g) + pmt * g / r
}

/// Monthly balance path, closed form. Length `months + 1`, index 0 is `pv`.
pub fn monthly_balances(pv: f64, pmt: f64, annual_rate: f64, months: u32) -> Vec<f64> {
    (0..=months)
        .map(|m| balance_at_month(pv, pmt, annual_rate, m))
        .collect()
}

/// Monthly balance path by recurrence: `b[m] = b[m-1] * (1 + r) + pmt`
pub fn monthly_balances_iterative(pv: f64, pmt: f64, annual_rate: f64, months: u32) -> Vec<f64> {
    let r = annual_rate / 12.0;
    let mut balances = Vec::with_capacity(months as usize + 1);
    let mut balance = pv;
    balances.push(balance);

    for _ in 0..months {
        balance = balance * (1.0 + r) + pmt;
        balances.push(balance);
    }

    balances
}

/// Cumulative deposits with no growth: `pv + pmt * m`
pub fn deposit_path(pv: f64, pmt: f64, months: u32) -> Vec<f64> {
    (0..=months).map(|m| pv + pmt * m as f64).collect()
}

/// Future value of investing `amount` every month for `years`, closed form.
///
/// `Due` matches the reference accumulation `value = (value + amount) * (1 + r)`.
pub fn future_value_of_annuity(
    amount: f64,
    annual_rate: f64,
    years: u32,
    timing: AnnuityTiming,
) -> f64 {
    let r = annual_rate / 12.0;
    let n = years.saturating_mul(12);
    if is_near_zero(r) {
        return amount * n as f64;
    }

    let ordinary = amount * growth_factor(r, n) / r;
    match timing {
        AnnuityTiming::Ordinary => ordinary,
        AnnuityTiming::Due => ordinary * (1.0 + r),
    }
}

/// Future value of a monthly contribution by direct accumulation
pub fn future_value_of_annuity_iterative(
    amount: f64,
    annual_rate: f64,
    years: u32,
    timing: AnnuityTiming,
) -> f64 {
    let r = annual_rate / 12.0;
    let mut value = 0.0;

    for _ in 0..years.saturating_mul(12) {
        value = match timing {
            AnnuityTiming::Ordinary => value * (1.0 + r) + amount,
            AnnuityTiming::Due => (value + amount) * (1.0 + r),
        };
    }

    value
}

/// Opportunity cost of not investing `amount` per month: what it would grow to
pub fn opportunity_cost(amount: f64, annual_rate: f64, years: u32) -> f64 {
    future_value_of_annuity(amount, annual_rate, years, AnnuityTiming::Due)
}

/// Monthly contribution (ordinary timing) needed to grow `pv` to `target` in `months`
pub fn required_monthly_payment(
    target: f64,
    pv: f64,
    annual_rate: f64,
    months: u32,
) -> Result<f64> {
    if months == 0 {
        return Err(EngineError::ZeroHorizon);
    }

    let r = annual_rate / 12.0;
    if is_near_zero(r) {
        return Ok((target - pv) / months as f64);
    }

    let g = growth_factor(r, months);
    if g == 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "rate {} gives no growth over {} months",
            annual_rate, months
        )));
    }
    Ok((target - pv * (1.0 + g)) * r / g)
}

/// First index whose balance reaches `target`
pub fn months_to_target(balances: &[f64], target: f64) -> Option<usize> {
    balances.iter().position(|&b| b >= target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const RATES: [f64; 4] = [0.0, 0.01, 0.08, 0.20];
    const YEARS: [u32; 3] = [1, 10, 30];

    #[test]
    fn test_closed_form_matches_recurrence() {
        for &rate in &RATES {
            for &years in &YEARS {
                let months = years * 12;
                let closed = monthly_balances(5_000.0, 250.0, rate, months);
                let iterative = monthly_balances_iterative(5_000.0, 250.0, rate, months);

                assert_eq!(closed.len(), months as usize + 1);
                assert_eq!(iterative.len(), months as usize + 1);
                for (c, i) in closed.iter().zip(&iterative) {
                    assert_relative_eq!(*c, *i, max_relative = 1e-6);
                }
            }
        }
    }

    #[test]
    fn test_future_value_forms_agree() {
        for timing in [AnnuityTiming::Ordinary, AnnuityTiming::Due] {
            for &rate in &RATES {
                for &years in &YEARS {
                    let closed = future_value_of_annuity(100.0, rate, years, timing);
                    let iterative = future_value_of_annuity_iterative(100.0, rate, years, timing);
                    assert_relative_eq!(closed, iterative, max_relative = 1e-6);
                }
            }
        }
    }

    #[test]
    fn test_known_future_values() {
        // 100/month, 8%, 10 years
        assert_relative_eq!(
            future_value_of_annuity(100.0, 0.08, 10, AnnuityTiming::Ordinary),
            18_294.603518,
            max_relative = 1e-9
        );
        assert_relative_eq!(opportunity_cost(100.0, 0.08, 10), 18_416.567542, max_relative = 1e-9);
    }

    #[test]
    fn test_zero_rate_is_linear() {
        assert_eq!(future_value_of_annuity(150.0, 0.0, 2, AnnuityTiming::Due), 3_600.0);
        assert_eq!(
            monthly_balances(1_000.0, 50.0, 0.0, 3),
            vec![1_000.0, 1_050.0, 1_100.0, 1_150.0]
        );
    }

    #[test]
    fn test_near_zero_rate_stays_accurate() {
        for rate in [1e-13, 1e-10, 1e-7, -1e-9] {
            let closed = future_value_of_annuity(100.0, rate, 30, AnnuityTiming::Due);
            let iterative = future_value_of_annuity_iterative(100.0, rate, 30, AnnuityTiming::Due);
            assert!(closed.is_finite());
            assert_relative_eq!(closed, iterative, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_huge_horizon_does_not_overflow() {
        let value = future_value_of_annuity(100.0, 0.05, 400_000_000, AnnuityTiming::Due);
        assert!(!value.is_nan());
        assert!(value > future_value_of_annuity(100.0, 0.05, 100, AnnuityTiming::Due));

        let linear = future_value_of_annuity(100.0, 0.0, u32::MAX, AnnuityTiming::Ordinary);
        assert_eq!(linear, 100.0 * u32::MAX as f64);
    }

    #[test]
    fn test_balance_with_starting_value() {
        assert_relative_eq!(
            balance_at_month(5_000.0, 200.0, 0.06, 24),
            10_722.18993,
            max_relative = 1e-9
        );
        assert_eq!(balance_at_month(5_000.0, 200.0, 0.06, 0), 5_000.0);
    }

    #[test]
    fn test_deposit_path() {
        assert_eq!(deposit_path(100.0, 10.0, 2), vec![100.0, 110.0, 120.0]);
    }

    #[test]
    fn test_required_payment_for_a_million_in_a_year() {
        let pmt = required_monthly_payment(1_000_000.0, 0.0, 0.15, 12).unwrap();
        assert_relative_eq!(pmt, 77_758.312345, max_relative = 1e-9);

        // Feeding it back reaches the target
        assert_relative_eq!(balance_at_month(0.0, pmt, 0.15, 12), 1_000_000.0, max_relative = 1e-9);
    }

    #[test]
    fn test_required_payment_zero_rate_and_horizon() {
        assert_eq!(required_monthly_payment(1_200.0, 0.0, 0.0, 12).unwrap(), 100.0);
        assert!(matches!(
            required_monthly_payment(1_000.0, 0.0, 0.05, 0),
            Err(EngineError::ZeroHorizon)
        ));
    }

    #[test]
    fn test_months_to_target() {
        let balances = monthly_balances(0.0, 20_000.0, 0.15, 60);
        let month = months_to_target(&balances, 1_000_000.0).unwrap();

        assert!(balances[month] >= 1_000_000.0);
        assert!(balances[month - 1] < 1_000_000.0);
        assert_eq!(months_to_target(&balances, 1e12), None);
        assert_eq!(months_to_target(&[5.0, 6.0], 5.0), Some(0));
    }
}
