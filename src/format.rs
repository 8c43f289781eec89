//! Formatting of money amounts and calendar dates for display.

use numfmt::{Formatter, Precision};
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, format_description::BorrowedFormatItem,
    macros::format_description,
};

use crate::Error;

/// Amounts at or above this many cents have a whole part of 1e12 or more,
/// which the number formatter writes in scientific notation.
const MAX_FORMATTED_CENTS: f64 = 1e14;

const CALENDAR_DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[day]/[month]/[year]");

/// Where the currency symbol goes and which characters separate digits.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CurrencyStyle {
    symbol: &'static str,
    symbol_after: bool,
    symbol_spaced: bool,
    group_separator: char,
    decimal_separator: char,
}

impl CurrencyStyle {
    const fn prefix(symbol: &'static str, symbol_spaced: bool) -> Self {
        Self {
            symbol,
            symbol_after: false,
            symbol_spaced,
            group_separator: ',',
            decimal_separator: '.',
        }
    }

    const fn continental(
        symbol: &'static str,
        symbol_after: bool,
        group_separator: char,
    ) -> Self {
        Self {
            symbol,
            symbol_after,
            symbol_spaced: true,
            group_separator,
            decimal_separator: ',',
        }
    }
}

/// The display conventions for `code`.
///
/// Codes without a known symbol are written after the amount, e.g.
/// "1,234.50 CHF".
fn currency_style(code: &str) -> Result<CurrencyStyle, Error> {
    let is_iso_code = code.len() == 3 && code.bytes().all(|byte| byte.is_ascii_uppercase());

    if !is_iso_code {
        return Err(Error::InvalidCurrencyCode(code.to_owned()));
    }

    let style = match code {
        "EUR" => CurrencyStyle::continental("€", true, ' '),
        "BRL" => CurrencyStyle::continental("R$", false, '.'),
        "USD" => CurrencyStyle::prefix("$", false),
        "GBP" => CurrencyStyle::prefix("£", false),
        _ => CurrencyStyle {
            symbol: "",
            symbol_after: true,
            symbol_spaced: true,
            group_separator: ',',
            decimal_separator: '.',
        },
    };

    Ok(style)
}

/// Formats `amount` in the currency `currency_code`, e.g. "1 234,50 €".
///
/// The amount is always rounded to two decimal places, halves away from zero.
/// If the amount or the code cannot be formatted, falls back to the amount
/// with two decimals followed by the code, e.g. "12.30 XX".
pub fn format_monetary(amount: f64, currency_code: &str) -> String {
    try_format_monetary(amount, currency_code).unwrap_or_else(|error| {
        tracing::warn!("falling back to plain currency formatting: {error}");
        format!("{amount:.2} {currency_code}")
    })
}

/// Formats `amount` in the currency `currency_code`.
///
/// # Errors
/// Returns [Error::InvalidCurrencyCode] if `currency_code` is not three
/// uppercase ASCII letters and [Error::CurrencyFormat] if the amount is not
/// finite or too large to format.
pub fn try_format_monetary(amount: f64, currency_code: &str) -> Result<String, Error> {
    let style = currency_style(currency_code)?;

    if !amount.is_finite() {
        return Err(Error::CurrencyFormat(format!("{amount} is not a finite number")));
    }

    let cents = (amount.abs() * 100.0).round();

    if cents >= MAX_FORMATTED_CENTS {
        return Err(Error::CurrencyFormat(format!("{amount} is too large")));
    }

    let cents = cents as u64;
    let units = group_digits(cents / 100, style.group_separator)?;
    let number = format!("{units}{}{:02}", style.decimal_separator, cents % 100);

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    let symbol = if style.symbol.is_empty() {
        currency_code
    } else {
        style.symbol
    };
    let space = if style.symbol_spaced { " " } else { "" };

    let formatted = if style.symbol_after {
        format!("{sign}{number}{space}{symbol}")
    } else {
        format!("{sign}{symbol}{space}{number}")
    };

    Ok(formatted)
}

/// Writes a whole number with thousands separators, e.g. "12 345".
fn group_digits(units: u64, separator: char) -> Result<String, Error> {
    let formatter = Formatter::currency("")
        .map_err(|error| Error::CurrencyFormat(format!("{error:?}")))?
        .precision(Precision::Decimals(0));

    // numfmt always groups with commas.
    let grouped = formatter.fmt_string(units as f64);

    if !grouped.bytes().all(|byte| byte.is_ascii_digit() || byte == b',') {
        return Err(Error::CurrencyFormat(format!("{units} was written as {grouped}")));
    }

    Ok(grouped.replace(',', &separator.to_string()))
}

/// Values that have a calendar date.
pub trait CalendarDay {
    /// The calendar date of the value.
    fn calendar_day(&self) -> Date;
}

impl CalendarDay for Date {
    fn calendar_day(&self) -> Date {
        *self
    }
}

impl CalendarDay for PrimitiveDateTime {
    fn calendar_day(&self) -> Date {
        self.date()
    }
}

/// Timestamps use the date in the offset they carry.
impl CalendarDay for OffsetDateTime {
    fn calendar_day(&self) -> Date {
        self.date()
    }
}

/// Formats a date or timestamp as a day/month/year date, e.g. "05/03/2024".
pub fn format_calendar_date(date: &impl CalendarDay) -> String {
    let date = date.calendar_day();

    date.format(CALENDAR_DATE_FORMAT)
        .inspect_err(|error| tracing::warn!("could not format date {date}: {error}"))
        .unwrap_or_else(|_| date.to_string())
}

#[cfg(test)]
mod format_monetary_tests {
    use super::format_monetary;

    #[test]
    fn formats_euro_with_decimal_comma() {
        assert_eq!(format_monetary(1234.5, "EUR"), "1 234,50 €");
        assert_eq!(format_monetary(12345.5, "EUR"), "12 345,50 €");
        assert_eq!(format_monetary(7.0, "EUR"), "7,00 €");
    }

    #[test]
    fn formats_zero() {
        let formatted = format_monetary(0.0, "EUR");

        assert!(!formatted.is_empty());
        assert!(formatted.contains('0'));
        assert_eq!(formatted, "0,00 €");
    }

    #[test]
    fn formats_dollars_with_prefix_symbol() {
        assert_eq!(format_monetary(1234567.891, "USD"), "$1,234,567.89");
        assert_eq!(format_monetary(-12.3, "USD"), "-$12.30");
    }

    #[test]
    fn formats_real_with_spaced_prefix() {
        assert_eq!(format_monetary(99.99, "BRL"), "R$ 99,99");
        assert_eq!(format_monetary(1234.5, "BRL"), "R$ 1.234,50");
    }

    #[test]
    fn writes_code_for_currency_without_symbol() {
        assert_eq!(format_monetary(1500.0, "CHF"), "1,500.00 CHF");
    }

    #[test]
    fn rounds_to_two_decimal_places() {
        assert_eq!(format_monetary(0.996, "EUR"), "1,00 €");
        assert_eq!(format_monetary(10.004, "USD"), "$10.00");
    }

    #[test]
    fn tiny_negative_amount_has_no_sign() {
        assert_eq!(format_monetary(-0.001, "USD"), "$0.00");
    }

    #[test]
    fn falls_back_for_invalid_code() {
        assert_eq!(format_monetary(12.3, "euro"), "12.30 euro");
        assert_eq!(format_monetary(0.0, ""), "0.00 ");
    }

    #[test]
    fn falls_back_for_values_it_cannot_format() {
        assert_eq!(format_monetary(f64::NAN, "EUR"), "NaN EUR");
        assert_eq!(format_monetary(f64::INFINITY, "EUR"), "inf EUR");
        assert!(format_monetary(1e300, "EUR").ends_with(".00 EUR"));
    }

    #[test]
    fn formats_largest_grouped_amount() {
        assert_eq!(format_monetary(999_999_999_999.99, "EUR"), "999 999 999 999,99 €");
        assert_eq!(format_monetary(999_999_999_999.99, "USD"), "$999,999,999,999.99");
    }

    #[test]
    fn falls_back_for_trillions() {
        assert_eq!(format_monetary(9_999_999_999_999.0, "EUR"), "9999999999999.00 EUR");
        assert_eq!(format_monetary(1_000_000_000_000.0, "USD"), "1000000000000.00 USD");
    }
}
