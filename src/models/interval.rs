//! Inclusive calendar date intervals.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// An inclusive `[start, end]` range of calendar dates.
///
/// Intervals can only be built through [`DateInterval::new`] (or
/// deserialization, which goes through the same check), so every value in
/// circulation has `start <= end`.
///
/// # Example
///
/// ```
/// use leave_engine::models::DateInterval;
/// use chrono::NaiveDate;
///
/// let interval = DateInterval::new(
///     NaiveDate::from_ymd_opt(2025, 11, 13).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 11, 15).unwrap(),
/// )
/// .unwrap();
/// assert_eq!(interval.day_span(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval", into = "RawInterval")]
pub struct DateInterval {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawInterval {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl TryFrom<RawInterval> for DateInterval {
    type Error = EngineError;

    fn try_from(raw: RawInterval) -> Result<Self, Self::Error> {
        DateInterval::new(raw.start_date, raw.end_date)
    }
}

impl From<DateInterval> for RawInterval {
    fn from(interval: DateInterval) -> Self {
        RawInterval {
            start_date: interval.start,
            end_date: interval.end,
        }
    }
}

impl DateInterval {
    /// Creates an interval, rejecting `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> EngineResult<Self> {
        if end < start {
            return Err(EngineError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// A one-day interval.
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// First day of the interval.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the interval.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days covered, counting both ends.
    pub fn day_span(&self) -> u32 {
        ((self.end - self.start).num_days() + 1) as u32
    }

    /// True when `date` falls within the interval.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// True when the two intervals share at least one day.
    pub fn overlaps(&self, other: &DateInterval) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// True when the interval covers exactly one day.
    pub fn is_single_day(&self) -> bool {
        self.start == self.end
    }

    /// Iterates every date in the interval in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let start = self.start;
        (0..i64::from(self.day_span())).map(move |offset| start + Duration::days(offset))
    }
}
