//! Billz keeps track of a person's money: balances, debts, discount coupons
//! and loyalty cards.
//!
//! Storage and authentication live in an external hosted backend. This
//! library takes the rows fetched from that backend and derives everything
//! the dashboard displays: totals, net value, the month-by-month trend and
//! the status groupings for coupons and debts.

#![warn(missing_docs)]

mod balance;
mod config;
mod coupon;
mod dashboard;
mod debt;
mod discount_card;
mod format;
mod monthly;
mod record_id;
mod report;
mod scan_code;
mod snapshot;
mod summary;
mod timezone;

pub use balance::{Balance, BalanceKind};
pub use config::Config;
pub use coupon::{
    Coupon, CouponPartition, CouponStatus, CouponUsedUpdate, DiscountKind, categorize_coupons,
};
pub use dashboard::Dashboard;
pub use debt::{Debt, DebtPaidUpdate, DebtPartition, DebtStatus, Recurrence, categorize_debts};
pub use discount_card::DiscountCard;
pub use format::{CalendarDay, format_calendar_date, format_monetary, try_format_monetary};
pub use monthly::{MonthlyTotals, build_monthly_series, month_label};
pub use record_id::RecordId;
pub use report::render_report;
pub use scan_code::ScanPayload;
pub use snapshot::Snapshot;
pub use summary::{FinancialSummary, compute_totals};
pub use timezone::{get_timezone, to_local};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A row from the store carried a negative amount or discount value.
    ///
    /// Holds the ID of the offending record and the amount.
    #[error("record {0} has a negative amount ({1})")]
    NegativeAmount(RecordId, f64),

    /// A row from the store carried an amount that is NaN or infinite.
    #[error("record {0} has an amount that is not a finite number")]
    NonFiniteAmount(RecordId),

    /// A debt row marked as recurring without a recurrence unit, or with a
    /// recurrence unit while not marked as recurring.
    #[error("debt {0} must have a recurrence type if and only if it is recurring")]
    InconsistentRecurrence(RecordId),

    /// The string is not a three letter ISO 4217 currency code.
    #[error("\"{0}\" is not an ISO 4217 currency code")]
    InvalidCurrencyCode(String),

    /// The number formatting library rejected the amount or the format.
    #[error("could not format currency amount: {0}")]
    CurrencyFormat(String),

    /// The name does not match a timezone in the IANA database.
    #[error("\"{0}\" is not a valid canonical timezone name")]
    InvalidTimezone(String),

    /// A snapshot or config document is not valid JSON or does not have the
    /// expected shape.
    #[error("could not parse JSON: {0}")]
    ParseJson(String),

    /// A snapshot or config file could not be read.
    #[error("could not read file: {0}")]
    ReadFile(String),

    /// A scannable payload could not be encoded as JSON.
    #[error("could not encode scan code payload: {0}")]
    PayloadEncoding(String),
}

/// Check that an amount read from the store is usable for arithmetic.
///
/// # Errors
/// Returns [Error::NonFiniteAmount] for NaN or infinite amounts and
/// [Error::NegativeAmount] for amounts below zero.
pub(crate) fn validate_amount(id: &RecordId, amount: f64) -> Result<f64, Error> {
    if !amount.is_finite() {
        return Err(Error::NonFiniteAmount(id.clone()));
    }

    if amount < 0.0 {
        return Err(Error::NegativeAmount(id.clone(), amount));
    }

    Ok(amount)
}
