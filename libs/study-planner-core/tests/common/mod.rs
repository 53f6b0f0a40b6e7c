//! Shared helpers for integration tests.

#![allow(dead_code)]

pub mod fixtures;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Fixed clock for a test scenario.
pub struct TestClock {
    pub now: DateTime<Utc>,
}

impl TestClock {
    /// Monday 2025-03-03, 08:00 UTC.
    pub fn monday_morning() -> Self {
        Self {
            now: Utc.with_ymd_and_hms(2025, 3, 3, 8, 0, 0).unwrap(),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    pub fn days_later(&self, days: i64) -> DateTime<Utc> {
        self.now + chrono::Duration::days(days)
    }
}
