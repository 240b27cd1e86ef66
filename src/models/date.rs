//! Expense dates as stored
//!
//! Stored dates are ISO 8601 strings. Full timestamps, timestamps with an
//! offset and bare calendar days all occur in existing data. The text is kept
//! as read and written back unchanged; the parsed instant is used for
//! filtering and display.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Local date-time layouts without an offset
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// The `date` field of a stored expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDate {
    text: String,
    instant: Option<DateTime<Utc>>,
}

impl ExpenseDate {
    /// Interpret stored text
    ///
    /// A bare day (`2024-03-01`) is midnight UTC and a timestamp without an
    /// offset is local time. Text that is not a date is kept, with no instant.
    pub fn parse(text: impl Into<String>) -> Self {
        let text = text.into();
        let instant = parse_instant(text.trim());
        Self { text, instant }
    }

    pub fn instant(&self) -> Option<DateTime<Utc>> {
        self.instant
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Calendar day in the local timezone
    pub fn local_day(&self) -> Option<NaiveDate> {
        self.instant
            .map(|instant| instant.with_timezone(&Local).date_naive())
    }

    /// Render with a chrono format string in local time, or the raw text
    pub fn format_local(&self, fmt: &str) -> String {
        match self.instant {
            Some(instant) => instant.with_timezone(&Local).format(fmt).to_string(),
            None => self.text.clone(),
        }
    }
}

fn parse_instant(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Utc));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            return naive
                .and_local_timezone(Local)
                .earliest()
                .map(|local| local.with_timezone(&Utc));
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

impl From<DateTime<Utc>> for ExpenseDate {
    fn from(instant: DateTime<Utc>) -> Self {
        Self {
            text: instant.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            instant: Some(instant),
        }
    }
}

impl PartialEq<DateTime<Utc>> for ExpenseDate {
    fn eq(&self, other: &DateTime<Utc>) -> bool {
        self.instant == Some(*other)
    }
}

impl fmt::Display for ExpenseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for ExpenseDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for ExpenseDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::parse)
    }
}
