//! Display settings shared by the dashboard and the report.

use std::{fs, path::Path};

use serde::Deserialize;
use time_tz::Tz;

use crate::{Error, timezone::get_timezone};

/// The currency used when no other is configured.
pub const DEFAULT_CURRENCY: &str = "EUR";

/// The timezone used when no other is configured.
pub const DEFAULT_TIMEZONE: &str = "Etc/UTC";

/// How amounts and dates are presented to the user.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The ISO 4217 code amounts are displayed in, e.g. "EUR".
    pub currency: String,

    /// The local timezone as a canonical timezone name, e.g. "Europe/Lisbon".
    pub local_timezone: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_owned(),
            local_timezone: DEFAULT_TIMEZONE.to_owned(),
        }
    }
}

impl Config {
    /// Read a config from a JSON file. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns [Error::ReadFile] if the file cannot be read and
    /// [Error::ParseJson] if it is not a JSON object of config fields.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path)
            .map_err(|error| Error::ReadFile(format!("{}: {error}", path.display())))?;

        serde_json::from_str(&text).map_err(|error| Error::ParseJson(error.to_string()))
    }

    /// The configured timezone.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezone] if the timezone name is unknown.
    pub fn timezone(&self) -> Result<&'static Tz, Error> {
        get_timezone(&self.local_timezone)
            .ok_or_else(|| Error::InvalidTimezone(self.local_timezone.clone()))
    }
}
