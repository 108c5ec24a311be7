//! Calendar utilities.
//!
//! Every timestamp entering the engine is normalized to a UTC calendar date
//! here. Mixing local and UTC midnights shifts leave days near midnight and
//! DST changes, so nothing downstream deals with time of day.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::models::{DateInterval, YearMonth};

/// Converts an instant to its UTC calendar date.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::normalize;
/// use chrono::{DateTime, NaiveDate};
///
/// // 00:30 in India is still the previous day in UTC
/// let instant = DateTime::parse_from_rfc3339("2025-11-14T00:30:00+05:30").unwrap();
/// assert_eq!(normalize(&instant), NaiveDate::from_ymd_opt(2025, 11, 13).unwrap());
/// ```
pub fn normalize<Tz: TimeZone>(instant: &DateTime<Tz>) -> NaiveDate {
    instant.with_timezone(&Utc).date_naive()
}

/// Converts a naive timestamp, read as UTC, to its calendar date.
pub fn normalize_naive(timestamp: NaiveDateTime) -> NaiveDate {
    timestamp.and_utc().date_naive()
}

/// Inclusive day count of an interval.
pub fn day_span(interval: &DateInterval) -> u32 {
    interval.day_span()
}

/// Shifts `date` by `days`, which may be negative.
///
/// Returns `None` when the result falls outside the representable range.
pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::try_days(days)?)
}

/// True when `date` falls in `month`.
pub fn in_month(date: NaiveDate, month: YearMonth) -> bool {
    month.contains(date)
}

/// Every date from `start` to `end` inclusive; empty when `end < start`.
pub fn dates_between(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let count = (end - start).num_days() + 1;
    (0..count.max(0)).map(move |offset| start + Duration::days(offset))
}
