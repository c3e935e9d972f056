//! Working state for a single payoff simulation

use super::types::{attack_order, Debt, RepaymentStrategy};

/// Owned copy of the portfolio being paid down.
///
/// The simulator never touches the caller's list: balances are cloned in at
/// construction and only this copy is mutated month to month.
#[derive(Debug, Clone)]
pub struct PayoffState {
    /// Months simulated so far
    pub month: u32,

    /// Private working balances
    pub debts: Vec<Debt>,

    /// Fixed attack order (indices into `debts`)
    order: Vec<usize>,

    /// Cumulative interest accrued
    pub total_interest: f64,

    /// Cumulative payments applied
    pub total_paid: f64,
}

impl PayoffState {
    pub fn new(debts: &[Debt], strategy: RepaymentStrategy) -> Self {
        Self {
            month: 0,
            debts: debts.to_vec(),
            order: attack_order(debts, strategy),
            total_interest: 0.0,
            total_paid: 0.0,
        }
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// True once every balance is at or below zero
    pub fn is_clear(&self) -> bool {
        self.debts.iter().all(Debt::is_cleared)
    }

    pub fn total_balance(&self) -> f64 {
        self.debts.iter().map(|d| d.balance.max(0.0)).sum()
    }

    pub fn balances(&self) -> Vec<f64> {
        self.debts.iter().map(|d| d.balance).collect()
    }

    /// Walk the attack order, paying each open debt until the budget runs out.
    /// Returns the amount applied, which never exceeds `monthly_payment`.
    pub fn apply_payments(&mut self, monthly_payment: f64) -> f64 {
        let mut remaining = monthly_payment;

        for &idx in &self.order {
            if remaining <= 0.0 {
                break;
            }
            let debt = &mut self.debts[idx];
            if debt.balance <= 0.0 {
                continue;
            }
            let payment = remaining.min(debt.balance);
            debt.balance = (debt.balance - payment).max(0.0);
            remaining -= payment;
        }

        let paid = monthly_payment.max(0.0) - remaining.max(0.0);
        self.total_paid += paid;
        paid
    }

    /// Accrue one month of interest on every open balance
    pub fn accrue_interest(&mut self) -> f64 {
        let mut accrued = 0.0;
        for debt in self.debts.iter_mut().filter(|d| d.balance > 0.0) {
            let interest = debt.balance * debt.monthly_rate();
            debt.balance += interest;
            accrued += interest;
        }
        self.total_interest += accrued;
        accrued
    }
}
