//! Attendance punch records.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Status value marking a record as an absence.
pub const ABSENT_STATUS: &str = "absent";

/// One day of punch-clock data for an employee.
///
/// Produced by the punch-clock subsystem; read-only to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee the record belongs to.
    pub employee_id: String,
    /// The attendance date, already normalized to UTC.
    pub date: NaiveDate,
    /// Punch-in time.
    #[serde(default)]
    pub punch_in: Option<DateTime<Utc>>,
    /// Punch-out time.
    #[serde(default)]
    pub punch_out: Option<DateTime<Utc>>,
    /// Attendance status set by the punch clock or an admin.
    #[serde(default)]
    pub status: Option<String>,
    /// Worked-status label set by shift evaluation.
    #[serde(default)]
    pub worked_status: Option<String>,
}

impl AttendanceRecord {
    /// True when either status field marks the day as absent.
    ///
    /// # Example
    ///
    /// ```
    /// use leave_engine::models::AttendanceRecord;
    /// use chrono::NaiveDate;
    ///
    /// let record = AttendanceRecord {
    ///     employee_id: "emp_001".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2025, 11, 5).unwrap(),
    ///     punch_in: None,
    ///     punch_out: None,
    ///     status: Some("Absent".to_string()),
    ///     worked_status: None,
    /// };
    /// assert!(record.indicates_absence());
    /// ```
    pub fn indicates_absence(&self) -> bool {
        [&self.status, &self.worked_status]
            .into_iter()
            .flatten()
            .any(|s| s.trim().eq_ignore_ascii_case(ABSENT_STATUS))
    }

    /// True when the employee punched in and the day is not marked absent.
    pub fn has_worked(&self) -> bool {
        self.punch_in.is_some() && !self.indicates_absence()
    }

    /// Hours between punch-in and punch-out, when both are present.
    pub fn worked_hours(&self) -> Option<Decimal> {
        let (punch_in, punch_out) = (self.punch_in?, self.punch_out?);
        let minutes = (punch_out - punch_in).num_minutes().max(0);
        Some(Decimal::new(minutes, 0) / Decimal::new(60, 0))
    }
}
