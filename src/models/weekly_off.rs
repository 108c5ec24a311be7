//! Per-employee weekly-off pattern.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The set of weekdays an employee does not work, numbered 0 (Sunday)
/// through 6 (Saturday).
///
/// Employees without a shift record fall back to Sunday only.
///
/// # Example
///
/// ```
/// use leave_engine::models::WeeklyOffPattern;
/// use chrono::NaiveDate;
///
/// let pattern = WeeklyOffPattern::new([0, 6]).unwrap();
/// // 2025-11-22 is a Saturday
/// assert!(pattern.is_week_off(NaiveDate::from_ymd_opt(2025, 11, 22).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct WeeklyOffPattern {
    days: BTreeSet<u8>,
}

/// Sunday in the 0..=6 numbering.
pub const SUNDAY: u8 = 0;

impl Default for WeeklyOffPattern {
    fn default() -> Self {
        Self {
            days: BTreeSet::from([SUNDAY]),
        }
    }
}

impl WeeklyOffPattern {
    /// Builds a pattern from weekday numbers, rejecting anything above 6.
    ///
    /// An empty list is a valid pattern (the employee works every day).
    pub fn new(days: impl IntoIterator<Item = u8>) -> EngineResult<Self> {
        let mut set = BTreeSet::new();
        for value in days {
            if value > 6 {
                return Err(EngineError::InvalidWeekday { value });
            }
            set.insert(value);
        }
        Ok(Self { days: set })
    }

    /// Resolves the pattern from an optional shift record.
    ///
    /// A missing shift record degrades to the Sunday-only default. An empty
    /// list is kept: the employee works every day.
    pub fn from_shift(weekly_off_days: Option<&[u8]>) -> EngineResult<Self> {
        match weekly_off_days {
            Some(days) => Self::new(days.iter().copied()),
            None => Ok(Self::default()),
        }
    }

    /// True when `date` falls on a weekly-off day.
    pub fn is_week_off(&self, date: NaiveDate) -> bool {
        self.contains_weekday(date.weekday())
    }

    /// True when `weekday` is an off day.
    pub fn contains_weekday(&self, weekday: Weekday) -> bool {
        self.days.contains(&(weekday.num_days_from_sunday() as u8))
    }

    /// The off days in ascending 0..=6 order.
    pub fn days(&self) -> impl Iterator<Item = u8> + '_ {
        self.days.iter().copied()
    }

    /// Number of off days per week.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// True when the employee has no off days.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl TryFrom<Vec<u8>> for WeeklyOffPattern {
    type Error = EngineError;

    fn try_from(days: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(days)
    }
}

impl From<WeeklyOffPattern> for Vec<u8> {
    fn from(pattern: WeeklyOffPattern) -> Self {
        pattern.days.into_iter().collect()
    }
}
