//! Company holiday model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::DateInterval;

/// A named company holiday spanning one or more days.
///
/// Holidays are read-only input to the engine and may overlap one another.
///
/// # Example
///
/// ```
/// use leave_engine::models::Holiday;
/// use chrono::NaiveDate;
///
/// let diwali = Holiday::new(
///     "Diwali",
///     None,
///     NaiveDate::from_ymd_opt(2025, 10, 20).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 10, 22).unwrap(),
/// )
/// .unwrap();
/// assert_eq!(diwali.interval.day_span(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HolidayRecord", into = "HolidayRecord")]
pub struct Holiday {
    /// Display name of the holiday.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// The days the holiday covers.
    pub interval: DateInterval,
}

/// Wire shape of a holiday record.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HolidayRecord {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl TryFrom<HolidayRecord> for Holiday {
    type Error = EngineError;

    fn try_from(record: HolidayRecord) -> Result<Self, Self::Error> {
        Holiday::new(
            record.name,
            record.description,
            record.start_date,
            record.end_date,
        )
    }
}

impl From<Holiday> for HolidayRecord {
    fn from(holiday: Holiday) -> Self {
        HolidayRecord {
            name: holiday.name,
            description: holiday.description,
            start_date: holiday.interval.start(),
            end_date: holiday.interval.end(),
        }
    }
}

impl Holiday {
    /// Creates a holiday covering `[start_date, end_date]`.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> EngineResult<Self> {
        Ok(Self {
            name: name.into(),
            description,
            interval: DateInterval::new(start_date, end_date)?,
        })
    }

    /// A one-day holiday.
    pub fn single_day(name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            description: None,
            interval: DateInterval::single(date),
        }
    }

    /// True when `date` falls on this holiday.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.interval.contains(date)
    }
}
