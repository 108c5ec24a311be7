//! Holiday and weekly-off lookup.
//!
//! This module answers whether a date is a non-working day for an employee
//! and why. Holiday and week-off are reported as separate flags because a
//! date can be both, and some rules only care about one of them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Holiday, WeeklyOffPattern};

/// Why a date is not a working day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonWorkingKind {
    /// A company holiday.
    Holiday,
    /// A weekly-off day from the employee's shift.
    WeekOff,
}

/// Classification of a single date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayClassification<'a> {
    /// The date falls inside at least one holiday interval.
    pub is_holiday: bool,
    /// The date's weekday is in the weekly-off pattern.
    pub is_week_off: bool,
    /// The first listed holiday covering the date.
    pub holiday: Option<&'a Holiday>,
}

impl DayClassification<'_> {
    /// True for holidays and week-offs alike.
    pub fn is_non_working(&self) -> bool {
        self.is_holiday || self.is_week_off
    }

    /// The reason to display, preferring holiday over week-off.
    pub fn kind(&self) -> Option<NonWorkingKind> {
        if self.is_holiday {
            Some(NonWorkingKind::Holiday)
        } else if self.is_week_off {
            Some(NonWorkingKind::WeekOff)
        } else {
            None
        }
    }
}

/// Non-working-day index over a holiday list and one weekly-off pattern.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::HolidayCalendar;
/// use leave_engine::models::{Holiday, WeeklyOffPattern};
/// use chrono::NaiveDate;
///
/// let holidays = vec![Holiday::single_day(
///     "Holiday",
///     NaiveDate::from_ymd_opt(2025, 11, 14).unwrap(),
/// )];
/// let pattern = WeeklyOffPattern::default();
/// let calendar = HolidayCalendar::new(&holidays, &pattern);
///
/// let day = calendar.classify(NaiveDate::from_ymd_opt(2025, 11, 14).unwrap());
/// assert!(day.is_holiday);
/// assert!(!day.is_week_off);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HolidayCalendar<'a> {
    holidays: &'a [Holiday],
    weekly_off: &'a WeeklyOffPattern,
}

impl<'a> HolidayCalendar<'a> {
    /// Creates an index over the given holidays and pattern.
    pub fn new(holidays: &'a [Holiday], weekly_off: &'a WeeklyOffPattern) -> Self {
        Self {
            holidays,
            weekly_off,
        }
    }

    /// Classifies `date`.
    pub fn classify(&self, date: NaiveDate) -> DayClassification<'a> {
        let holiday = self.holidays.iter().find(|h| h.covers(date));
        DayClassification {
            is_holiday: holiday.is_some(),
            is_week_off: self.weekly_off.is_week_off(date),
            holiday,
        }
    }

    /// True when `date` is a holiday or a week-off.
    pub fn is_non_working(&self, date: NaiveDate) -> bool {
        self.classify(date).is_non_working()
    }

    /// The holidays indexed.
    pub fn holidays(&self) -> &'a [Holiday] {
        self.holidays
    }

    /// The weekly-off pattern indexed.
    pub fn weekly_off(&self) -> &'a WeeklyOffPattern {
        self.weekly_off
    }
}

/// One-shot form of [`HolidayCalendar::classify`].
pub fn is_non_working_day<'a>(
    date: NaiveDate,
    weekly_off: &'a WeeklyOffPattern,
    holidays: &'a [Holiday],
) -> DayClassification<'a> {
    HolidayCalendar::new(holidays, weekly_off).classify(date)
}
