//! Plain-text rendering of the dashboard for the terminal.

use std::fmt::{self, Display};

use crate::{
    dashboard::Dashboard,
    format::{format_calendar_date, format_monetary},
    monthly::month_label,
    scan_code::ScanPayload,
};

const MONTH_COLUMN_WIDTH: usize = 5;
const AMOUNT_COLUMN_WIDTH: usize = 16;

struct Report<'d, 'a> {
    dashboard: &'d Dashboard<'a>,
    currency: &'d str,
}

impl Report<'_, '_> {
    fn money(&self, amount: f64) -> String {
        format_monetary(amount, self.currency)
    }

    fn write_summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = &self.dashboard.summary;

        writeln!(f, "Summary")?;
        writeln!(f, "  Total balance: {}", self.money(summary.total_balance))?;
        writeln!(f, "  Total debts:   {}", self.money(summary.total_debts))?;
        writeln!(
            f,
            "  Net value:     {} ({})",
            self.money(summary.display_net_value()),
            summary.net_label()
        )
    }

    fn write_monthly_table(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Monthly trend {}", self.dashboard.year)?;
        writeln!(
            f,
            "  {:<MONTH_COLUMN_WIDTH$}{:>AMOUNT_COLUMN_WIDTH$}{:>AMOUNT_COLUMN_WIDTH$}{:>AMOUNT_COLUMN_WIDTH$}",
            "", "Balance", "Debts", "Net"
        )?;

        for totals in &self.dashboard.monthly {
            writeln!(
                f,
                "  {:<MONTH_COLUMN_WIDTH$}{:>AMOUNT_COLUMN_WIDTH$}{:>AMOUNT_COLUMN_WIDTH$}{:>AMOUNT_COLUMN_WIDTH$}",
                month_label(totals.month),
                self.money(totals.balance_total),
                self.money(totals.debt_total),
                self.money(totals.net_total)
            )?;
        }

        Ok(())
    }

    fn write_debts(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let debts = &self.dashboard.debts;

        writeln!(f, "Debts")?;
        writeln!(f, "  Pending ({})", debts.unpaid.len())?;
        for debt in &debts.unpaid {
            write!(
                f,
                "    {} {} due {}",
                debt.description,
                self.money(debt.amount),
                format_calendar_date(&debt.due_date)
            )?;
            match debt.recurrence {
                Some(recurrence) => writeln!(f, " [{recurrence}]")?,
                None => writeln!(f)?,
            }
        }

        writeln!(f, "  Paid ({})", debts.paid.len())?;
        for debt in &debts.paid {
            writeln!(
                f,
                "    {} {} was due {}",
                debt.description,
                self.money(debt.amount),
                format_calendar_date(&debt.due_date)
            )?;
        }

        Ok(())
    }

    fn write_coupons(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let coupons = &self.dashboard.coupons;

        writeln!(f, "Coupons")?;
        let groups = [
            ("Active", &coupons.active, "valid until"),
            ("Used", &coupons.used, "valid until"),
            ("Expired", &coupons.expired, "expired on"),
        ];

        for (title, group, date_label) in groups {
            writeln!(f, "  {title} ({})", group.len())?;
            for coupon in group {
                writeln!(
                    f,
                    "    {} at {}: {} off, {date_label} {}",
                    coupon.name,
                    coupon.store,
                    coupon.discount_label(self.currency),
                    format_calendar_date(&coupon.valid_until)
                )?;
            }
        }

        Ok(())
    }

    fn write_discount_cards(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Discount cards ({})", self.dashboard.discount_cards.len())?;

        for card in self.dashboard.discount_cards {
            let payload = ScanPayload::for_discount_card(card)
                .to_json()
                .map_err(|error| {
                    tracing::error!("could not encode discount card {}: {error}", card.id);
                    fmt::Error
                })?;

            writeln!(f, "    {} at {}", card.name, card.store)?;
            if let Some(card_number) = &card.card_number {
                writeln!(f, "      number: {card_number}")?;
            }
            writeln!(f, "      code: {payload}")?;
        }

        Ok(())
    }
}

impl Display for Report<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_summary(f)?;
        writeln!(f)?;
        self.write_monthly_table(f)?;
        writeln!(f)?;
        self.write_debts(f)?;
        writeln!(f)?;
        self.write_coupons(f)?;
        writeln!(f)?;
        self.write_discount_cards(f)
    }
}

/// Render the dashboard as a plain-text report with amounts in `currency`.
pub fn render_report(dashboard: &Dashboard<'_>, currency: &str) -> String {
    Report {
        dashboard,
        currency,
    }
    .to_string()
}
