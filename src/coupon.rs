//! Discount coupons and the rules that decide whether a coupon can still be
//! used.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{Error, format::format_monetary, record_id::RecordId, validate_amount};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// How the discount of a coupon is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    /// The discount value is a percentage of the price.
    Percentage,
    /// The discount value is a fixed amount of money.
    Fixed,
}

/// Which list a coupon is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouponStatus {
    /// Not used and still valid.
    Active,
    /// Already redeemed. Expiry is not checked for used coupons.
    Used,
    /// Not used and past its validity date.
    Expired,
}

/// A discount offer for a store.
#[derive(Debug, Clone, PartialEq)]
pub struct Coupon {
    /// The id the store assigned to the coupon.
    pub id: RecordId,
    /// A short name for the coupon.
    pub name: String,
    /// Free text describing the offer.
    pub description: String,
    /// The size of the discount, never negative.
    pub discount_value: f64,
    /// Whether `discount_value` is a percentage or an amount of money.
    pub discount_kind: DiscountKind,
    /// The last day the coupon can be used on.
    pub valid_until: Date,
    /// The store the coupon is for.
    pub store: String,
    /// Whether the coupon has been redeemed. The only field that is ever
    /// updated.
    pub is_used: bool,
}

impl Coupon {
    /// The status of the coupon at the instant `now`.
    ///
    /// `valid_until` is compared against the calendar date of `now` in the
    /// offset `now` carries, so a coupon stays active for the whole of its
    /// last day.
    pub fn status(&self, now: OffsetDateTime) -> CouponStatus {
        if self.is_used {
            CouponStatus::Used
        } else if self.valid_until >= now.date() {
            CouponStatus::Active
        } else {
            CouponStatus::Expired
        }
    }

    /// The discount as shown to the user, e.g. "20%" or "5,00 €".
    ///
    /// Fixed discounts are formatted in `currency`.
    pub fn discount_label(&self, currency: &str) -> String {
        match self.discount_kind {
            DiscountKind::Percentage => format!("{}%", self.discount_value),
            DiscountKind::Fixed => format_monetary(self.discount_value, currency),
        }
    }

    /// The update that marks this coupon as redeemed.
    pub fn mark_used(&self) -> CouponUsedUpdate {
        CouponUsedUpdate {
            id: self.id.clone(),
            is_used: true,
        }
    }
}

/// A single-field update request for the used flag of a coupon.
///
/// Only `is_used` is serialised, `id` selects the row to update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CouponUsedUpdate {
    /// The coupon to update.
    #[serde(skip)]
    pub id: RecordId,
    /// The new value of the used flag.
    pub is_used: bool,
}

/// Coupons split into the three lists shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CouponPartition<'a> {
    /// Coupons that can still be redeemed, in input order.
    pub active: Vec<&'a Coupon>,
    /// Coupons that have been redeemed, in input order.
    pub used: Vec<&'a Coupon>,
    /// Coupons that expired before being redeemed, in input order.
    pub expired: Vec<&'a Coupon>,
}

/// Split coupons into active, used and expired coupons as of `now`.
///
/// Every coupon lands in exactly one list and the relative order of the
/// input is kept within each list.
pub fn categorize_coupons(coupons: &[Coupon], now: OffsetDateTime) -> CouponPartition<'_> {
    let mut partition = CouponPartition::default();

    for coupon in coupons {
        match coupon.status(now) {
            CouponStatus::Active => partition.active.push(coupon),
            CouponStatus::Used => partition.used.push(coupon),
            CouponStatus::Expired => partition.expired.push(coupon),
        }
    }

    partition
}

/// A coupon exactly as the store returns it.
#[derive(Debug, Deserialize)]
pub(crate) struct CouponRow {
    id: RecordId,
    name: String,
    #[serde(default)]
    description: String,
    discount_value: f64,
    #[serde(rename = "discount_type")]
    discount_kind: DiscountKind,
    #[serde(with = "iso_date")]
    valid_until: Date,
    store: String,
    #[serde(default)]
    is_used: bool,
}

impl TryFrom<CouponRow> for Coupon {
    type Error = Error;

    fn try_from(row: CouponRow) -> Result<Self, Self::Error> {
        let discount_value = validate_amount(&row.id, row.discount_value)?;

        Ok(Coupon {
            id: row.id,
            name: row.name,
            description: row.description,
            discount_value,
            discount_kind: row.discount_kind,
            valid_until: row.valid_until,
            store: row.store,
            is_used: row.is_used,
        })
    }
}


#[cfg(test)]
mod categorize_coupons_tests {
    use time::macros::{date, datetime};

    use super::{categorize_coupons, test_utils::create_test_coupon};

    fn ids<'a>(coupons: &[&'a super::Coupon]) -> Vec<&'a str> {
        coupons.iter().map(|coupon| coupon.id.as_str()).collect()
    }

    #[test]
    fn splits_expired_active_and_used() {
        let coupons = vec![
            create_test_coupon("1", date!(2020 - 01 - 01), false),
            create_test_coupon("2", date!(2999 - 01 - 01), false),
            create_test_coupon("3", date!(2020 - 01 - 01), true),
        ];

        let partition = categorize_coupons(&coupons, datetime!(2024-01-01 0:00 UTC));

        assert_eq!(ids(&partition.expired), ["1"]);
        assert_eq!(ids(&partition.active), ["2"]);
        assert_eq!(ids(&partition.used), ["3"]);
    }

    #[test]
    fn used_coupon_is_used_regardless_of_expiry() {
        let coupons = vec![
            create_test_coupon("old", date!(2000 - 01 - 01), true),
            create_test_coupon("new", date!(2999 - 01 - 01), true),
        ];

        let partition = categorize_coupons(&coupons, datetime!(2024-01-01 0:00 UTC));

        assert_eq!(ids(&partition.used), ["old", "new"]);
        assert!(partition.active.is_empty());
        assert!(partition.expired.is_empty());
    }

    #[test]
    fn coupon_is_active_on_its_last_day() {
        let coupons = vec![create_test_coupon("1", date!(2024 - 06 - 30), false)];

        let last_day = categorize_coupons(&coupons, datetime!(2024-06-30 23:59 UTC));
        let day_after = categorize_coupons(&coupons, datetime!(2024-07-01 0:00 UTC));

        assert_eq!(ids(&last_day.active), ["1"]);
        assert_eq!(ids(&day_after.expired), ["1"]);
    }

    #[test]
    fn uses_the_calendar_date_of_the_observer() {
        let coupons = vec![create_test_coupon("1", date!(2024 - 06 - 30), false)];

        // 23:30 UTC on the 30th is already the 1st in Auckland.
        let now = datetime!(2024-06-30 23:30 UTC).to_offset(time::macros::offset!(+12));
        let partition = categorize_coupons(&coupons, now);

        assert_eq!(ids(&partition.expired), ["1"]);
    }

    #[test]
    fn preserves_input_order_within_each_list() {
        let coupons = vec![
            create_test_coupon("a", date!(2030 - 01 - 01), false),
            create_test_coupon("b", date!(2020 - 01 - 01), false),
            create_test_coupon("c", date!(2025 - 01 - 01), false),
            create_test_coupon("d", date!(2019 - 01 - 01), false),
        ];

        let partition = categorize_coupons(&coupons, datetime!(2024-01-01 0:00 UTC));

        assert_eq!(ids(&partition.active), ["a", "c"]);
        assert_eq!(ids(&partition.expired), ["b", "d"]);
    }
}

#[cfg(test)]
mod coupon_tests {
    use time::macros::date;

    use super::{CouponUsedUpdate, DiscountKind, test_utils::create_test_coupon};

    #[test]
    fn percentage_label() {
        let coupon = create_test_coupon("1", date!(2024 - 01 - 01), false);

        assert_eq!(coupon.discount_label("EUR"), "10%");
    }

    #[test]
    fn fixed_label_uses_currency() {
        let mut coupon = create_test_coupon("1", date!(2024 - 01 - 01), false);
        coupon.discount_kind = DiscountKind::Fixed;
        coupon.discount_value = 5.0;

        assert_eq!(coupon.discount_label("EUR"), "5,00 €");
        assert_eq!(coupon.discount_label("USD"), "$5.00");
    }

    #[test]
    fn mark_used_serialises_only_the_flag() {
        let coupon = create_test_coupon("9", date!(2024 - 01 - 01), false);

        let update = coupon.mark_used();

        assert_eq!(
            update,
            CouponUsedUpdate {
                id: "9".to_owned(),
                is_used: true
            }
        );
        assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"is_used":true}"#);
    }
}

#[cfg(test)]
mod coupon_row_tests {
    use time::macros::date;

    use crate::{
        Error,
        coupon::{Coupon, CouponRow, DiscountKind},
    };

    #[test]
    fn parses_store_row() {
        let row: CouponRow = serde_json::from_str(
            r#"{
                "id": "c1",
                "user_id": "u1",
                "name": "Spring sale",
                "description": "20% off shoes",
                "discount_value": 20,
                "discount_type": "percentage",
                "valid_until": "2024-04-30",
                "store": "Shoe Shop",
                "is_used": false,
                "created_at": "2024-03-01T09:30:00+00:00"
            }"#,
        )
        .unwrap();

        let coupon = Coupon::try_from(row).unwrap();

        assert_eq!(coupon.name, "Spring sale");
        assert_eq!(coupon.discount_kind, DiscountKind::Percentage);
        assert_eq!(coupon.valid_until, date!(2024 - 04 - 30));
        assert!(!coupon.is_used);
    }

    #[test]
    fn rejects_negative_discount() {
        let row: CouponRow = serde_json::from_str(
            r#"{
                "id": "c2",
                "name": "Broken",
                "discount_value": -5,
                "discount_type": "fixed",
                "valid_until": "2024-04-30",
                "store": "Shoe Shop"
            }"#,
        )
        .unwrap();

        assert_eq!(
            Coupon::try_from(row),
            Err(Error::NegativeAmount("c2".to_owned(), -5.0))
        );
    }
}
