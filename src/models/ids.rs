//! Expense identifiers
//!
//! Ids are integers so the stored layout matches what the mobile app wrote
//! (`Date.now()` milliseconds). New ids are still derived from the clock but
//! never collide: a fresh id is always greater than every id already stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Unique identifier of a stored expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(i64);

impl ExpenseId {
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn as_i64(&self) -> i64 {
        self.0
    }

    /// Next id after the given existing ids, seeded from `now`
    ///
    /// Result is `max(now in milliseconds, largest existing + 1)`.
    pub fn next<I>(existing: I, now: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = ExpenseId>,
    {
        let clock = now.timestamp_millis();
        match existing.into_iter().max() {
            Some(ExpenseId(max)) if max >= clock => Self(max.saturating_add(1)),
            _ => Self(clock),
        }
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ExpenseId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}
