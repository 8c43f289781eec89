//! Balances record money that has come into the user's accounts.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, record_id::RecordId, validate_amount};

/// Whether a balance entry is a salary payment or a general balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceKind {
    /// A salary payment.
    Salary,
    /// Any other balance, e.g. savings or a top up.
    Balance,
}

/// An amount of money the user has recorded as available.
///
/// Balances are never edited after they are created.
#[derive(Debug, Clone, PartialEq)]
pub struct Balance {
    /// The id the store assigned to the balance.
    pub id: RecordId,
    /// The amount of money, never negative.
    pub amount: f64,
    /// The ISO 4217 code of the currency the amount is in.
    pub currency: String,
    /// What kind of money the balance is.
    pub kind: BalanceKind,
    /// When the balance was recorded.
    pub created_at: OffsetDateTime,
}

/// A balance exactly as the store returns it.
#[derive(Debug, Deserialize)]
pub(crate) struct BalanceRow {
    id: RecordId,
    amount: f64,
    currency: String,
    #[serde(rename = "type")]
    kind: BalanceKind,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

impl TryFrom<BalanceRow> for Balance {
    type Error = Error;

    fn try_from(row: BalanceRow) -> Result<Self, Self::Error> {
        let amount = validate_amount(&row.id, row.amount)?;

        Ok(Balance {
            id: row.id,
            amount,
            currency: row.currency,
            kind: row.kind,
            created_at: row.created_at,
        })
    }
}


#[cfg(test)]
mod balance_row_tests {
    use time::macros::datetime;

    use crate::{
        Error,
        balance::{Balance, BalanceKind, BalanceRow},
    };

    #[test]
    fn parses_store_row() {
        let row: BalanceRow = serde_json::from_str(
            r#"{
                "id": "6d1f",
                "user_id": "u1",
                "amount": 1500.5,
                "currency": "EUR",
                "type": "salary",
                "created_at": "2024-03-01T09:30:00+00:00",
                "updated_at": "2024-03-01T09:30:00+00:00"
            }"#,
        )
        .unwrap();

        let balance = Balance::try_from(row).unwrap();

        assert_eq!(
            balance,
            Balance {
                id: "6d1f".to_owned(),
                amount: 1500.5,
                currency: "EUR".to_owned(),
                kind: BalanceKind::Salary,
                created_at: datetime!(2024-03-01 09:30 UTC),
            }
        );
    }

    #[test]
    fn rejects_negative_amount() {
        let row: BalanceRow = serde_json::from_str(
            r#"{
                "id": "6d1f",
                "amount": -1.0,
                "currency": "EUR",
                "type": "balance",
                "created_at": "2024-03-01T09:30:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(
            Balance::try_from(row),
            Err(Error::NegativeAmount("6d1f".to_owned(), -1.0))
        );
    }

    #[test]
    fn rejects_unknown_kind() {
        let result = serde_json::from_str::<BalanceRow>(
            r#"{
                "id": "6d1f",
                "amount": 1.0,
                "currency": "EUR",
                "type": "bonus",
                "created_at": "2024-03-01T09:30:00Z"
            }"#,
        );

        assert!(result.is_err());
    }
}
