//! Unplanned absence detection.
//!
//! A working day in the elapsed part of the month with no approved leave and
//! no attendance showing the employee present is an unplanned absence. A
//! missing attendance record counts as absence evidence.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{AttendanceRecord, AuditStep, YearMonth};

use super::calendar::dates_between;
use super::holiday_index::HolidayCalendar;
use super::sandwich::BookedDays;

/// The result of an unplanned absence scan, including the audit step.
#[derive(Debug, Clone)]
pub struct AbsenceScanResult {
    /// Dates counted as unplanned absences, ascending.
    pub dates: Vec<NaiveDate>,
    /// The audit step recording this scan.
    pub audit_step: AuditStep,
}

/// Attendance per date: `true` when at least one record shows presence.
fn presence_by_date<'a>(
    attendance: impl IntoIterator<Item = &'a AttendanceRecord>,
) -> BTreeMap<NaiveDate, bool> {
    let mut presence = BTreeMap::new();
    for record in attendance {
        let entry = presence.entry(record.date).or_insert(false);
        *entry |= !record.indicates_absence();
    }
    presence
}

/// Scans `month` up to and including `today` for unplanned absences.
///
/// Dates are skipped when they are holidays or week-offs, or when any
/// approved leave covers them (half-day included). Every remaining date is
/// an absence unless an attendance record for it shows the employee present.
/// A `today` before the month starts yields no dates.
///
/// # Arguments
///
/// * `month` - The month to scan
/// * `today` - The last date eligible for scanning
/// * `calendar` - Holidays and the employee's weekly-off pattern
/// * `booked` - Approved leave for the employee
/// * `attendance` - The employee's attendance records; other dates are ignored
/// * `step_number` - The audit step number to assign
pub fn scan_unplanned_absences<'a>(
    month: YearMonth,
    today: NaiveDate,
    calendar: &HolidayCalendar<'_>,
    booked: &BookedDays,
    attendance: impl IntoIterator<Item = &'a AttendanceRecord>,
    step_number: u32,
) -> AbsenceScanResult {
    let scan_end = month.last_day().min(today);
    let presence = presence_by_date(attendance);

    let mut non_working_skipped: u32 = 0;
    let mut leave_skipped: u32 = 0;
    let mut present_days: u32 = 0;
    let mut dates = Vec::new();

    for date in dates_between(month.first_day(), scan_end) {
        if calendar.is_non_working(date) {
            non_working_skipped += 1;
        } else if booked.is_booked(date) {
            leave_skipped += 1;
        } else if presence.get(&date).copied().unwrap_or(false) {
            present_days += 1;
        } else {
            dates.push(date);
        }
    }

    let scanned = if scan_end < month.first_day() {
        "nothing (month not started)".to_string()
    } else {
        format!("{} to {}", month.first_day(), scan_end)
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "unplanned_absence_scan".to_string(),
        rule_name: "Unplanned Absence Scan".to_string(),
        input: serde_json::json!({
            "month": month.to_string(),
            "today": today.to_string(),
            "attendance_dates": presence.len()
        }),
        output: serde_json::json!({
            "unplanned_absence_days": dates.len(),
            "absence_dates": dates.iter().map(|d| d.to_string()).collect::<Vec<_>>(),
            "non_working_days_skipped": non_working_skipped,
            "leave_days_skipped": leave_skipped,
            "present_days": present_days
        }),
        reasoning: format!(
            "Scanned {}: {} unplanned absence(s), {} non-working day(s) and {} leave day(s) skipped",
            scanned,
            dates.len(),
            non_working_skipped,
            leave_skipped
        ),
    };

    AbsenceScanResult { dates, audit_step }
}
