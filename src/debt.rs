//! Debts are amounts the user owes, due on a given date and optionally
//! repeating.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{Error, record_id::RecordId, validate_amount};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// How often a recurring debt repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    /// Repeats every week.
    Weekly,
    /// Repeats every month.
    Monthly,
    /// Repeats every year.
    Yearly,
}

impl Recurrence {
    /// The label shown next to a recurring debt.
    pub fn label(self) -> &'static str {
        match self {
            Recurrence::Weekly => "Weekly",
            Recurrence::Monthly => "Monthly",
            Recurrence::Yearly => "Yearly",
        }
    }
}

impl Display for Recurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether a debt still has to be paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebtStatus {
    /// The debt is outstanding and counts towards the total owed.
    Unpaid,
    /// The debt has been settled.
    Paid,
}

/// An obligation with a due date.
#[derive(Debug, Clone, PartialEq)]
pub struct Debt {
    /// The id the store assigned to the debt.
    pub id: RecordId,
    /// What the debt is for.
    pub description: String,
    /// The amount owed, never negative.
    pub amount: f64,
    /// The date the debt must be paid by.
    pub due_date: Date,
    /// How often the debt repeats, `None` for one-off debts.
    pub recurrence: Option<Recurrence>,
    /// Whether the debt has been paid. The only field that is ever updated.
    pub is_paid: bool,
    /// When the debt was recorded.
    pub created_at: OffsetDateTime,
}

impl Debt {
    /// Whether the debt repeats.
    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }

    /// The status group the debt is listed under.
    pub fn status(&self) -> DebtStatus {
        if self.is_paid {
            DebtStatus::Paid
        } else {
            DebtStatus::Unpaid
        }
    }

    /// The update that flips the paid flag of this debt.
    ///
    /// The caller sends the update to the store and then fetches the
    /// records again.
    pub fn toggle_paid(&self) -> DebtPaidUpdate {
        DebtPaidUpdate {
            id: self.id.clone(),
            is_paid: !self.is_paid,
        }
    }
}

/// A single-field update request for the paid flag of a debt.
///
/// Only `is_paid` is serialised, `id` selects the row to update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebtPaidUpdate {
    /// The debt to update.
    #[serde(skip)]
    pub id: RecordId,
    /// The new value of the paid flag.
    pub is_paid: bool,
}

/// Debts split into the two lists shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DebtPartition<'a> {
    /// Debts that still have to be paid, in input order.
    pub unpaid: Vec<&'a Debt>,
    /// Debts that have been paid, in input order.
    pub paid: Vec<&'a Debt>,
}

/// Split debts into unpaid and paid debts, keeping their relative order.
pub fn categorize_debts(debts: &[Debt]) -> DebtPartition<'_> {
    let (unpaid, paid): (Vec<&Debt>, Vec<&Debt>) = debts
        .iter()
        .partition(|debt| debt.status() == DebtStatus::Unpaid);

    DebtPartition { unpaid, paid }
}

/// A debt exactly as the store returns it.
#[derive(Debug, Deserialize)]
pub(crate) struct DebtRow {
    id: RecordId,
    description: String,
    amount: f64,
    #[serde(with = "iso_date")]
    due_date: Date,
    #[serde(default)]
    is_recurring: bool,
    #[serde(default)]
    recurrence_type: Option<Recurrence>,
    #[serde(default)]
    is_paid: bool,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

impl TryFrom<DebtRow> for Debt {
    type Error = Error;

    fn try_from(row: DebtRow) -> Result<Self, Self::Error> {
        let amount = validate_amount(&row.id, row.amount)?;

        let recurrence = match (row.is_recurring, row.recurrence_type) {
            (true, Some(recurrence)) => Some(recurrence),
            (false, None) => None,
            _ => return Err(Error::InconsistentRecurrence(row.id)),
        };

        Ok(Debt {
            id: row.id,
            description: row.description,
            amount,
            due_date: row.due_date,
            recurrence,
            is_paid: row.is_paid,
            created_at: row.created_at,
        })
    }
}
