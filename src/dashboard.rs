//! Everything the dashboard shows, derived from one snapshot.

use time::OffsetDateTime;
use time_tz::Tz;

use crate::{
    coupon::{CouponPartition, categorize_coupons},
    debt::{DebtPartition, categorize_debts},
    discount_card::DiscountCard,
    monthly::{MonthlyTotals, build_monthly_series},
    snapshot::Snapshot,
    summary::{FinancialSummary, compute_totals},
    timezone::to_local,
};

/// Holds all the data needed to render the dashboard.
///
/// The dashboard borrows from the snapshot it was built from. After any
/// change the caller fetches a new snapshot and builds a new dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard<'a> {
    /// The year the monthly series covers.
    pub year: i32,
    /// Total balance, total unpaid debt and net value.
    pub summary: FinancialSummary,
    /// Totals for each month of `year`, January first.
    pub monthly: [MonthlyTotals; 12],
    /// Debts grouped into unpaid and paid.
    pub debts: DebtPartition<'a>,
    /// Coupons grouped into active, used and expired as of `now`.
    pub coupons: CouponPartition<'a>,
    /// The user's discount cards.
    pub discount_cards: &'a [DiscountCard],
}

impl<'a> Dashboard<'a> {
    /// Derive the dashboard for `snapshot`.
    ///
    /// # Arguments
    /// * `snapshot` - The user's records
    /// * `now` - The current instant, used to decide which coupons expired
    /// * `year` - The year to build the monthly series for
    /// * `timezone` - The timezone of the person viewing the dashboard
    pub fn build(
        snapshot: &'a Snapshot,
        now: OffsetDateTime,
        year: i32,
        timezone: &Tz,
    ) -> Self {
        let summary = compute_totals(&snapshot.balances, &snapshot.debts);
        let monthly = build_monthly_series(&snapshot.balances, &snapshot.debts, year, timezone);
        let debts = categorize_debts(&snapshot.debts);
        let coupons = categorize_coupons(&snapshot.coupons, to_local(now, timezone));

        tracing::debug!(
            "built dashboard: net value {:.2}, {} unpaid debts, {} active coupons",
            summary.net_value,
            debts.unpaid.len(),
            coupons.active.len()
        );

        Self {
            year,
            summary,
            monthly,
            debts,
            coupons,
            discount_cards: &snapshot.discount_cards,
        }
    }
}

#[cfg(test)]
mod dashboard_tests {
    use time::macros::{date, datetime};

    use crate::{
        balance::test_utils::create_test_balance,
        coupon::test_utils::create_test_coupon,
        dashboard::Dashboard,
        debt::test_utils::create_test_debt,
        snapshot::Snapshot,
        summary::FinancialSummary,
        timezone::get_timezone,
    };

    fn create_test_snapshot() -> Snapshot {
        Snapshot {
            balances: vec![create_test_balance("b1", 1000.0, datetime!(2024-02-10 9:00 UTC))],
            debts: vec![
                create_test_debt("d1", 300.0, date!(2024 - 02 - 20), false),
                create_test_debt("d2", 200.0, date!(2024 - 03 - 01), true),
            ],
            coupons: vec![
                create_test_coupon("c1", date!(2024 - 02 - 29), false),
                create_test_coupon("c2", date!(2024 - 03 - 31), false),
            ],
            discount_cards: Vec::new(),
        }
    }

    #[test]
    fn combines_summary_series_and_partitions() {
        let snapshot = create_test_snapshot();

        let dashboard = Dashboard::build(
            &snapshot,
            datetime!(2024-03-15 12:00 UTC),
            2024,
            get_timezone("Etc/UTC").unwrap(),
        );

        assert_eq!(
            dashboard.summary,
            FinancialSummary {
                total_balance: 1000.0,
                total_debts: 300.0,
                net_value: 700.0,
            }
        );
        assert_eq!(dashboard.monthly[1].net_total, 700.0);
        assert_eq!(dashboard.debts.unpaid.len(), 1);
        assert_eq!(dashboard.debts.paid.len(), 1);
        assert_eq!(dashboard.coupons.expired[0].id, "c1");
        assert_eq!(dashboard.coupons.active[0].id, "c2");
    }

    #[test]
    fn judges_coupons_in_the_observer_timezone() {
        let snapshot = create_test_snapshot();

        // Still the 29th of February in UTC, already the 1st of March in Auckland.
        let now = datetime!(2024-02-29 20:00 UTC);
        let utc = Dashboard::build(&snapshot, now, 2024, get_timezone("Etc/UTC").unwrap());
        let auckland =
            Dashboard::build(&snapshot, now, 2024, get_timezone("Pacific/Auckland").unwrap());

        assert_eq!(utc.coupons.active.len(), 2);
        assert_eq!(auckland.coupons.expired[0].id, "c1");
    }
}
