//! Day arithmetic shared by the scheduling components.

use chrono::{DateTime, Duration, NaiveDate, Utc};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Days from `from` to `to`, rounded up. Negative when `to` is earlier.
///
/// A partial day counts as a full one, so a topic due yesterday evening is
/// one day overdue this morning.
pub fn ceil_days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    let millis = (to - from).num_milliseconds() as f64;
    (millis / MILLIS_PER_DAY).ceil() as i64
}

/// Whole days elapsed from `from` to `to`, rounded down.
pub fn whole_days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_days()
}

/// `at` shifted forward by `days` days, saturating at the latest
/// representable instant.
pub fn add_days(at: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    at.checked_add_signed(Duration::days(i64::from(days)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Calendar days in `[start, end)`. Empty when `end <= start`.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let count = (end - start).num_days().max(0);
    (0..count).map(move |offset| start + Duration::days(offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_partial_day_rounds_up() {
        let from = Utc.with_ymd_and_hms(2025, 1, 1, 20, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2025, 1, 2, 8, 0, 0).unwrap();
        assert_eq!(ceil_days_between(from, to), 1);
        assert_eq!(whole_days_between(from, to), 0);
    }

    #[test]
    fn test_negative_span() {
        let from = Utc.with_ymd_and_hms(2025, 1, 5, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(ceil_days_between(from, to), -4);
    }

    #[test]
    fn test_add_days_saturates() {
        let at = DateTime::<Utc>::MAX_UTC - Duration::days(2);
        assert_eq!(add_days(at, 1), at + Duration::days(1));
        assert_eq!(add_days(at, u32::MAX), DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn test_date_range() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 30).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 2, 2).unwrap();
        let days: Vec<_> = date_range(start, end).collect();
        assert_eq!(days.len(), 3);
        assert_eq!(days[2], NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
        assert_eq!(date_range(end, start).count(), 0);
    }
}
