//! Month-by-month totals for the trend chart.
//!
//! Balances are bucketed by the month they were recorded in, unpaid debts by
//! the month they are due in. Each year always has exactly twelve buckets.

use time::Month;
use time_tz::Tz;

use crate::{balance::Balance, debt::Debt, timezone::to_local};

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// The totals for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyTotals {
    /// The calendar month.
    pub month: Month,
    /// The sum of balances recorded during the month.
    pub balance_total: f64,
    /// The sum of unpaid debts due during the month.
    pub debt_total: f64,
    /// `balance_total` minus `debt_total`.
    pub net_total: f64,
}

impl MonthlyTotals {
    fn empty(month: Month) -> Self {
        Self {
            month,
            balance_total: 0.0,
            debt_total: 0.0,
            net_total: 0.0,
        }
    }

    /// The month as a number from 1 (January) to 12 (December).
    pub fn number(&self) -> u8 {
        self.month as u8
    }
}

/// Formats a month as a three-letter abbreviation, e.g. "Jan".
pub fn month_label(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

/// Builds the twelve monthly totals for `year`, January first.
///
/// # Arguments
/// * `balances` - Every balance, attributed to the month of its `created_at`
///   on the wall clock of `timezone` at that instant
/// * `debts` - Every debt, attributed to the month of its `due_date`. Paid
///   debts are skipped.
/// * `year` - The calendar year to build the series for. Records from other
///   years are ignored.
/// * `timezone` - The timezone of the person looking at the chart
///
/// # Returns
/// One entry per month, in calendar order. Months without records are zero.
pub fn build_monthly_series(
    balances: &[Balance],
    debts: &[Debt],
    year: i32,
    timezone: &Tz,
) -> [MonthlyTotals; 12] {
    let mut series = MONTHS.map(MonthlyTotals::empty);

    for balance in balances {
        let local_date = to_local(balance.created_at, timezone).date();

        if local_date.year() == year {
            series[month_index(local_date.month())].balance_total += balance.amount;
        }
    }

    for debt in debts.iter().filter(|debt| !debt.is_paid) {
        if debt.due_date.year() == year {
            series[month_index(debt.due_date.month())].debt_total += debt.amount;
        }
    }

    for totals in &mut series {
        totals.net_total = totals.balance_total - totals.debt_total;
    }

    tracing::debug!(
        "built monthly series for {year} from {} balances and {} debts",
        balances.len(),
        debts.len()
    );

    series
}

fn month_index(month: Month) -> usize {
    month as usize - 1
}
