//! Loading the full set of a user's rows as fetched from the store.
//!
//! This is the boundary where store rows become domain types: amounts are
//! checked and the recurrence fields of debts are reconciled here so the
//! derivation functions can trust their inputs.

use std::{fs, path::Path};

use serde::Deserialize;

use crate::{
    Error,
    balance::{Balance, BalanceRow},
    coupon::{Coupon, CouponRow},
    debt::{Debt, DebtRow},
    discount_card::DiscountCard,
};

/// The JSON document holding one array of rows per table.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SnapshotRows {
    balances: Vec<BalanceRow>,
    debts: Vec<DebtRow>,
    coupons: Vec<CouponRow>,
    discount_cards: Vec<DiscountCard>,
}

/// Every record belonging to one user.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    /// The user's balances, in the order the store returned them.
    pub balances: Vec<Balance>,
    /// The user's debts, earliest due date first.
    pub debts: Vec<Debt>,
    /// The user's coupons, earliest expiry first.
    pub coupons: Vec<Coupon>,
    /// The user's discount cards, in the order the store returned them.
    pub discount_cards: Vec<DiscountCard>,
}

impl Snapshot {
    /// Parse a snapshot from JSON text of the form
    /// `{"balances": [...], "debts": [...], "coupons": [...], "discount_cards": [...]}`.
    ///
    /// Missing tables are treated as empty.
    ///
    /// # Errors
    /// Returns [Error::ParseJson] if the text does not have the expected
    /// shape, or the validation error of the first invalid row.
    pub fn from_json(text: &str) -> Result<Self, Error> {
        let rows: SnapshotRows = serde_json::from_str(text)
            .map_err(|error| Error::ParseJson(error.to_string()))?;

        Self::try_from(rows)
    }

    /// Read and parse a snapshot file.
    ///
    /// # Errors
    /// Returns [Error::ReadFile] if the file cannot be read, otherwise see
    /// [Snapshot::from_json].
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path)
            .map_err(|error| Error::ReadFile(format!("{}: {error}", path.display())))?;

        Self::from_json(&text)
    }
}

impl TryFrom<SnapshotRows> for Snapshot {
    type Error = Error;

    fn try_from(rows: SnapshotRows) -> Result<Self, Self::Error> {
        let balances = rows
            .balances
            .into_iter()
            .map(Balance::try_from)
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|error| tracing::warn!("rejected balance row: {error}"))?;

        let mut debts = rows
            .debts
            .into_iter()
            .map(Debt::try_from)
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|error| tracing::warn!("rejected debt row: {error}"))?;
        debts.sort_by_key(|debt| debt.due_date);

        let mut coupons = rows
            .coupons
            .into_iter()
            .map(Coupon::try_from)
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|error| tracing::warn!("rejected coupon row: {error}"))?;
        coupons.sort_by_key(|coupon| coupon.valid_until);

        tracing::debug!(
            "loaded snapshot with {} balances, {} debts, {} coupons and {} discount cards",
            balances.len(),
            debts.len(),
            coupons.len(),
            rows.discount_cards.len()
        );

        Ok(Snapshot {
            balances,
            debts,
            coupons,
            discount_cards: rows.discount_cards,
        })
    }
}
