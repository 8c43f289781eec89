//! Canonical timezone lookup and conversion of instants to local time.

use time::OffsetDateTime;
use time_tz::{Offset, TimeZone, Tz};

/// Looks up a canonical timezone name, e.g. "Europe/Lisbon".
///
/// Returns `None` if the name is not in the timezone database.
pub fn get_timezone(canonical_timezone: &str) -> Option<&'static Tz> {
    time_tz::timezones::get_by_name(canonical_timezone)
}

/// The instant `at` as seen on a wall clock in `timezone`.
///
/// The offset is the one in force at `at`, so "Pacific/Auckland" is +13:00 in
/// January and +12:00 in July.
pub fn to_local(at: OffsetDateTime, timezone: &Tz) -> OffsetDateTime {
    at.to_offset(timezone.get_offset_utc(&at).to_utc())
}
