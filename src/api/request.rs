//! Request types for the leave accounting API.
//!
//! This module defines the JSON request bodies for the `/leave-stats`,
//! `/roster-summary` and `/payroll` endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::EmployeeLeaveInput;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, DateInterval, Holiday, LeaveRequest, WeeklyOffPattern, YearMonth,
};

/// One employee's raw data as sent by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeDataRequest {
    /// The employee being summarised.
    pub employee_id: String,
    /// Week-off weekday numbers from the employee's shift (0 = Sunday).
    #[serde(default)]
    pub weekly_off_days: Option<Vec<u8>>,
    /// Leave requests in any status.
    #[serde(default)]
    pub leave_requests: Vec<LeaveRequest>,
    /// Attendance records.
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
}

/// Fails when `interval` covers more than `max_days` days.
fn check_span(interval: &DateInterval, max_days: u32) -> EngineResult<()> {
    let days = interval.day_span();
    if days > max_days {
        return Err(EngineError::IntervalTooLong {
            start: interval.start(),
            end: interval.end(),
            days,
            max_days,
        });
    }
    Ok(())
}

fn check_holiday_spans(holidays: Option<&[Holiday]>, max_days: u32) -> EngineResult<()> {
    holidays
        .unwrap_or_default()
        .iter()
        .try_for_each(|h| check_span(&h.interval, max_days))
}

impl EmployeeDataRequest {
    /// Rejects leave requests longer than `max_days`.
    pub fn check_spans(&self, max_days: u32) -> EngineResult<()> {
        self.leave_requests
            .iter()
            .try_for_each(|l| check_span(&l.interval, max_days))
    }
}

impl TryFrom<EmployeeDataRequest> for EmployeeLeaveInput {
    type Error = EngineError;

    fn try_from(request: EmployeeDataRequest) -> Result<Self, Self::Error> {
        let weekly_off = request
            .weekly_off_days
            .map(WeeklyOffPattern::new)
            .transpose()?;

        Ok(EmployeeLeaveInput {
            employee_id: request.employee_id,
            leave_requests: request.leave_requests,
            weekly_off,
            attendance: request.attendance,
        })
    }
}

/// Request body for the `/leave-stats` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveStatsRequest {
    /// The month to summarise, as `YYYY-MM`.
    pub month: YearMonth,
    /// The employee's data.
    #[serde(flatten)]
    pub employee: EmployeeDataRequest,
    /// Company holidays; the configured calendar is used when omitted.
    #[serde(default)]
    pub holidays: Option<Vec<Holiday>>,
    /// The last date eligible for the absence scan; the server date when omitted.
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

impl LeaveStatsRequest {
    /// Rejects leave and holiday ranges longer than `max_days`.
    pub fn check_spans(&self, max_days: u32) -> EngineResult<()> {
        self.employee.check_spans(max_days)?;
        check_holiday_spans(self.holidays.as_deref(), max_days)
    }
}

/// Request body for the `/roster-summary` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterSummaryRequest {
    /// The month to summarise, as `YYYY-MM`.
    pub month: YearMonth,
    /// Every employee on the roster.
    pub employees: Vec<EmployeeDataRequest>,
    /// Company holidays; the configured calendar is used when omitted.
    #[serde(default)]
    pub holidays: Option<Vec<Holiday>>,
    /// The last date eligible for the absence scan; the server date when omitted.
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

impl RosterSummaryRequest {
    /// Rejects leave and holiday ranges longer than `max_days`.
    pub fn check_spans(&self, max_days: u32) -> EngineResult<()> {
        for employee in &self.employees {
            employee.check_spans(max_days)?;
        }
        check_holiday_spans(self.holidays.as_deref(), max_days)
    }

    /// Converts every roster entry, failing on the first invalid one.
    pub fn employee_inputs(&self) -> EngineResult<Vec<EmployeeLeaveInput>> {
        self.employees
            .iter()
            .cloned()
            .map(EmployeeLeaveInput::try_from)
            .collect()
    }
}

/// Query parameters for the `/roster-summary` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RosterSummaryQuery {
    /// `csv` for a CSV body; JSON otherwise.
    #[serde(default)]
    pub format: Option<String>,
}

impl RosterSummaryQuery {
    /// True when a CSV body was requested.
    pub fn wants_csv(&self) -> bool {
        self.format
            .as_deref()
            .is_some_and(|f| f.eq_ignore_ascii_case("csv"))
    }
}

/// Request body for the `/payroll` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// The payroll month, as `YYYY-MM`.
    pub month: YearMonth,
    /// The employee's data.
    #[serde(flatten)]
    pub employee: EmployeeDataRequest,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Overrides the policy's per-day salary divisor.
    #[serde(default)]
    pub working_days_per_month: Option<u32>,
    /// Company holidays; the configured calendar is used when omitted.
    #[serde(default)]
    pub holidays: Option<Vec<Holiday>>,
    /// The last date eligible for the absence scan; the server date when omitted.
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

impl PayrollRequest {
    /// Rejects leave and holiday ranges longer than `max_days`.
    pub fn check_spans(&self, max_days: u32) -> EngineResult<()> {
        self.employee.check_spans(max_days)?;
        check_holiday_spans(self.holidays.as_deref(), max_days)
    }
}
