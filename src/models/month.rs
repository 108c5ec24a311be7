//! Calendar month identifier.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::DateInterval;

/// A calendar month, serialized as `"YYYY-MM"`.
///
/// # Example
///
/// ```
/// use leave_engine::models::YearMonth;
/// use chrono::NaiveDate;
///
/// let november: YearMonth = "2025-11".parse().unwrap();
/// assert_eq!(november.last_day(), NaiveDate::from_ymd_opt(2025, 11, 30).unwrap());
/// assert!(november.contains(NaiveDate::from_ymd_opt(2025, 11, 14).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a month, rejecting month numbers outside 1..=12.
    ///
    /// The following month must also be representable, so that
    /// [`YearMonth::last_day`] is always defined.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        let representable = NaiveDate::from_ymd_opt(year, month, 1).is_some()
            && following(year, month).is_some_and(|(y, m)| NaiveDate::from_ymd_opt(y, m, 1).is_some());
        if !representable {
            return Err(EngineError::InvalidMonth {
                value: format!("{}-{:02}", year, month),
            });
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> EngineResult<Self> {
        Self::new(date.year(), date.month())
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The month number, 1 through 12.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("YearMonth is validated on construction")
    }

    /// The last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        following(self.year, self.month)
            .and_then(|(y, m)| NaiveDate::from_ymd_opt(y, m, 1))
            .and_then(|first| first.pred_opt())
            .expect("YearMonth is validated on construction")
    }

    /// The following month.
    pub fn next(&self) -> EngineResult<Self> {
        let (year, month) = following(self.year, self.month).ok_or_else(|| {
            EngineError::InvalidMonth {
                value: format!("{}+1", self),
            }
        })?;
        Self::new(year, month)
    }

    /// The whole month as an inclusive interval.
    pub fn interval(&self) -> DateInterval {
        DateInterval::new(self.first_day(), self.last_day())
            .expect("month bounds are ordered")
    }

    /// True when `date` falls in this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

/// Year and month number after `(year, month)`.
fn following(year: i32, month: u32) -> Option<(i32, u32)> {
    if month == 12 {
        Some((year.checked_add(1)?, 1))
    } else {
        Some((year, month + 1))
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidMonth {
            value: s.to_string(),
        };
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        YearMonth::new(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for YearMonth {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(month: YearMonth) -> Self {
        month.to_string()
    }
}
