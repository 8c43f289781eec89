//! The headline figures of the dashboard: total balance, total debt and net
//! value.

use crate::{balance::Balance, debt::Debt};

/// Totals across all of a user's balances and outstanding debts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FinancialSummary {
    /// The sum of all balances.
    pub total_balance: f64,
    /// The sum of all debts that have not been paid.
    pub total_debts: f64,
    /// `total_balance` minus `total_debts`.
    pub net_value: f64,
}

impl FinancialSummary {
    /// Whether the user has at least as much money as they owe.
    pub fn is_positive(&self) -> bool {
        self.net_value >= 0.0
    }

    /// The net value without its sign, the sign is conveyed by [Self::net_label].
    pub fn display_net_value(&self) -> f64 {
        self.net_value.abs()
    }

    /// "positive" or "negative" depending on the sign of the net value.
    pub fn net_label(&self) -> &'static str {
        if self.is_positive() {
            "positive"
        } else {
            "negative"
        }
    }
}

/// Sum balances and unpaid debts.
///
/// Paid debts are ignored. Empty inputs give a summary of zeros.
pub fn compute_totals(balances: &[Balance], debts: &[Debt]) -> FinancialSummary {
    let total_balance: f64 = balances.iter().map(|balance| balance.amount).sum();
    let total_debts: f64 = debts
        .iter()
        .filter(|debt| !debt.is_paid)
        .map(|debt| debt.amount)
        .sum();

    FinancialSummary {
        total_balance,
        total_debts,
        net_value: total_balance - total_debts,
    }
}
