//! Monthly leave and attendance aggregation.
//!
//! This module ties the calendar, holiday index, sandwich detector and
//! absence scan together into one [`LeaveReport`] per employee-month. It is
//! the single entry point every caller (leave page, roster summary, payroll)
//! goes through.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::LeavePolicy;
use crate::models::{
    AttendanceRecord, AuditStep, Holiday, LeaveReport, LeaveRequest, MonthlyLeaveStats,
    SandwichPattern, WeeklyOffPattern, YearMonth,
};

use super::absence::scan_unplanned_absences;
use super::holiday_index::HolidayCalendar;
use super::sandwich::{BookedDays, detect_booked_sandwiches};

/// Everything the engine needs about one employee.
///
/// Collections may hold other employees' records; only those matching
/// `employee_id` are used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeLeaveInput {
    /// The employee being summarised.
    pub employee_id: String,
    /// Leave requests in any status.
    #[serde(default)]
    pub leave_requests: Vec<LeaveRequest>,
    /// The employee's shift week-off pattern, if a shift record exists.
    #[serde(default, alias = "weekly_off_days")]
    pub weekly_off: Option<WeeklyOffPattern>,
    /// Attendance records.
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
}

impl EmployeeLeaveInput {
    /// Creates an input with no leave, shift or attendance data.
    pub fn new(employee_id: impl Into<String>) -> Self {
        Self {
            employee_id: employee_id.into(),
            ..Self::default()
        }
    }

    /// This employee's leave requests.
    pub fn own_leaves(&self) -> impl Iterator<Item = &LeaveRequest> + '_ {
        self.leave_requests
            .iter()
            .filter(move |l| l.employee_id == self.employee_id)
    }

    /// This employee's attendance records.
    pub fn own_attendance(&self) -> impl Iterator<Item = &AttendanceRecord> + '_ {
        self.attendance
            .iter()
            .filter(move |r| r.employee_id == self.employee_id)
    }
}

/// The result of counting approved leave in a month.
#[derive(Debug, Clone)]
pub struct ApprovedLeaveResult {
    /// Sum of the full spans of approved leaves touching the month.
    pub days: u32,
    /// Ids of the leaves counted.
    pub leave_ids: Vec<String>,
    /// The audit step recording this count.
    pub audit_step: AuditStep,
}

/// Counts approved leave days for `month`.
///
/// A leave overlapping the month contributes its whole span, including days
/// outside the month. A leave crossing a month boundary is therefore counted
/// in full in each month it touches.
pub fn count_approved_days<'a>(
    leaves: impl IntoIterator<Item = &'a LeaveRequest>,
    month: YearMonth,
    step_number: u32,
) -> ApprovedLeaveResult {
    let window = month.interval();
    let mut days: u32 = 0;
    let mut leave_ids = Vec::new();
    let mut cross_month = 0;

    for leave in leaves {
        if !leave.is_approved() || !leave.interval.overlaps(&window) {
            continue;
        }
        days += leave.interval.day_span();
        leave_ids.push(leave.id.clone());
        if leave.interval.start() < window.start() || leave.interval.end() > window.end() {
            cross_month += 1;
        }
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "approved_leave".to_string(),
        rule_name: "Approved Leave Days".to_string(),
        input: serde_json::json!({
            "month": month.to_string()
        }),
        output: serde_json::json!({
            "approved_days": days,
            "leave_ids": leave_ids,
            "cross_month_leaves": cross_month
        }),
        reasoning: if cross_month > 0 {
            format!(
                "{} approved leave(s) totalling {} day(s); {} cross the month boundary and are counted in full",
                leave_ids.len(),
                days,
                cross_month
            )
        } else {
            format!(
                "{} approved leave(s) totalling {} day(s)",
                leave_ids.len(),
                days
            )
        },
    };

    ApprovedLeaveResult {
        days,
        leave_ids,
        audit_step,
    }
}

/// Picks the employee's shift pattern, or the policy default when there is
/// no shift record. An empty shift pattern means no off days.
fn resolve_weekly_off<'a>(
    shift: Option<&'a WeeklyOffPattern>,
    policy: &'a LeavePolicy,
    step_number: u32,
) -> (&'a WeeklyOffPattern, AuditStep) {
    let (pattern, source) = match shift {
        Some(pattern) => (pattern, "shift"),
        None => (&policy.default_weekly_off, "policy_default"),
    };
    let days: Vec<u8> = pattern.days().collect();

    let audit_step = AuditStep {
        step_number,
        rule_id: "weekly_off_resolution".to_string(),
        rule_name: "Weekly-Off Resolution".to_string(),
        input: serde_json::json!({
            "shift_weekly_off_days": shift.map(|p| p.days().collect::<Vec<u8>>())
        }),
        output: serde_json::json!({
            "weekly_off_days": days,
            "source": source
        }),
        reasoning: if source == "shift" {
            format!("Using shift week-off days {:?}", days)
        } else {
            format!(
                "No shift week-off configured, using policy default {:?}",
                days
            )
        },
    };

    (pattern, audit_step)
}

fn sandwich_audit_step(
    patterns: &[SandwichPattern],
    sandwich_days: u32,
    step_number: u32,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "sandwich_detection".to_string(),
        rule_name: "Sandwich Leave Detection".to_string(),
        input: serde_json::json!({
            "detected_over": "all approved leave"
        }),
        output: serde_json::json!({
            "patterns": patterns.len(),
            "sandwich_days": sandwich_days
        }),
        reasoning: if patterns.is_empty() {
            "No non-working block is bridged by full-day leave in this month".to_string()
        } else {
            patterns
                .iter()
                .map(|p| p.reason.as_str())
                .collect::<Vec<_>>()
                .join("; ")
        },
    }
}

fn balance_audit_step(stats: &MonthlyLeaveStats, step_number: u32) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "leave_balance".to_string(),
        rule_name: "Leave Balance".to_string(),
        input: serde_json::json!({
            "approved_days": stats.approved_days,
            "sandwich_days": stats.sandwich_days,
            "unplanned_absence_days": stats.unplanned_absence_days,
            "monthly_credit": stats.monthly_credit
        }),
        output: serde_json::json!({
            "total_consumed_days": stats.total_consumed_days,
            "pending_balance": stats.pending_balance,
            "extra_leave_days": stats.extra_leave_days
        }),
        reasoning: format!(
            "{} consumed against a credit of {}: balance {}, extra {}",
            stats.total_consumed_days,
            stats.monthly_credit,
            stats.pending_balance,
            stats.extra_leave_days
        ),
    }
}

/// Computes the leave report for one employee and one month.
///
/// Sandwiches are detected over all of the employee's approved leave so that
/// brackets crossing the month boundary are seen, then kept only when an
/// anchor falls inside the month. Absences are scanned up to `today`.
///
/// Missing inputs degrade instead of failing: no holidays means no holiday
/// sandwiches, no shift pattern means the policy default week-off, and no
/// attendance means every elapsed working day without leave is an absence.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::{EmployeeLeaveInput, compute_monthly_stats};
/// use leave_engine::config::LeavePolicy;
/// use leave_engine::models::YearMonth;
/// use chrono::NaiveDate;
///
/// let input = EmployeeLeaveInput::new("emp_001");
/// let month = YearMonth::new(2025, 11).unwrap();
/// // Scanning stops before the month starts, so nothing is consumed
/// let today = NaiveDate::from_ymd_opt(2025, 10, 31).unwrap();
///
/// let report = compute_monthly_stats(&input, &[], month, &LeavePolicy::default(), today);
/// assert_eq!(report.stats.total_consumed_days, 0);
/// assert_eq!(report.stats.pending_balance, 1);
/// ```
pub fn compute_monthly_stats(
    input: &EmployeeLeaveInput,
    holidays: &[Holiday],
    month: YearMonth,
    policy: &LeavePolicy,
    today: NaiveDate,
) -> LeaveReport {
    let mut audit_trace: Vec<AuditStep> = Vec::new();
    let mut step_number: u32 = 1;

    debug!(
        employee_id = %input.employee_id,
        month = %month,
        holidays = holidays.len(),
        "Computing monthly leave stats"
    );

    let (weekly_off, weekly_off_step) =
        resolve_weekly_off(input.weekly_off.as_ref(), policy, step_number);
    audit_trace.push(weekly_off_step);
    step_number += 1;

    let approved = count_approved_days(input.own_leaves(), month, step_number);
    audit_trace.push(approved.audit_step);
    step_number += 1;

    let booked = BookedDays::from_leaves(input.own_leaves());
    let sandwich_patterns =
        detect_booked_sandwiches(&booked, holidays, weekly_off, &month.interval());
    let sandwich_days: u32 = sandwich_patterns.iter().map(|p| p.charged_days).sum();
    audit_trace.push(sandwich_audit_step(
        &sandwich_patterns,
        sandwich_days,
        step_number,
    ));
    step_number += 1;

    let calendar = HolidayCalendar::new(holidays, weekly_off);
    let absences = scan_unplanned_absences(
        month,
        today,
        &calendar,
        &booked,
        input.own_attendance(),
        step_number,
    );
    audit_trace.push(absences.audit_step);
    step_number += 1;

    let stats = MonthlyLeaveStats::from_parts(
        input.employee_id.clone(),
        month,
        approved.days,
        sandwich_days,
        absences.dates.len() as u32,
        policy.monthly_credit,
    );
    audit_trace.push(balance_audit_step(&stats, step_number));

    info!(
        employee_id = %stats.employee_id,
        month = %month,
        approved_days = stats.approved_days,
        sandwich_days = stats.sandwich_days,
        unplanned_absence_days = stats.unplanned_absence_days,
        extra_leave_days = stats.extra_leave_days,
        "Monthly leave stats computed"
    );

    LeaveReport {
        stats,
        sandwich_patterns,
        unplanned_absences: absences.dates,
        audit_trace,
    }
}


#[cfg(test)]
mod properties {
    use super::*;
    use crate::calculation::calendar::add_days;
    use crate::calculation::holiday_index::is_non_working_day;
    use crate::models::{HalfDaySession, LeaveStatus};
    use proptest::prelude::*;

    fn base_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()
    }

    /// Leave requests anywhere in October to December 2025.
    fn leave_strategy() -> impl Strategy<Value = LeaveRequest> {
        (0i64..90, 0i64..5, any::<bool>(), 0u8..4).prop_map(|(offset, len, half, status)| {
            let start = add_days(base_date(), offset).unwrap();
            let (end, session) = if half {
                (start, Some(HalfDaySession::MorningHalf))
            } else {
                (add_days(start, len).unwrap(), None)
            };
            let status = match status {
                0 => LeaveStatus::Pending,
                1 => LeaveStatus::Rejected,
                _ => LeaveStatus::Approved,
            };
            LeaveRequest::new("p", "emp_001", start, end, session, status, "Casual").unwrap()
        })
    }

    fn holiday_strategy() -> impl Strategy<Value = Holiday> {
        (0i64..90, 0i64..3).prop_map(|(offset, len)| {
            let start = add_days(base_date(), offset).unwrap();
            Holiday::new("Generated", None, start, add_days(start, len).unwrap()).unwrap()
        })
    }

    fn input_strategy() -> impl Strategy<Value = EmployeeLeaveInput> {
        (
            prop::collection::vec(leave_strategy(), 0..8),
            prop::collection::btree_set(0u8..7, 0..3),
            prop::collection::btree_set(0i64..90, 0..60),
        )
            .prop_map(|(leave_requests, off_days, present_offsets)| {
                let attendance = present_offsets
                    .into_iter()
                    .map(|offset| AttendanceRecord {
                        employee_id: "emp_001".to_string(),
                        date: add_days(base_date(), offset).unwrap(),
                        punch_in: None,
                        punch_out: None,
                        status: Some("present".to_string()),
                        worked_status: None,
                    })
                    .collect();
                EmployeeLeaveInput {
                    employee_id: "emp_001".to_string(),
                    leave_requests,
                    weekly_off: Some(WeeklyOffPattern::new(off_days).unwrap()),
                    attendance,
                }
            })
    }

    fn november() -> YearMonth {
        YearMonth::new(2025, 11).unwrap()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_total_is_sum_of_parts(
            input in input_strategy(),
            holidays in prop::collection::vec(holiday_strategy(), 0..5),
            today_offset in 0i64..90,
        ) {
            let today = add_days(base_date(), today_offset).unwrap();
            let report = compute_monthly_stats(&input, &holidays, november(), &LeavePolicy::default(), today);
            let stats = &report.stats;
            prop_assert_eq!(
                stats.total_consumed_days,
                stats.approved_days + stats.sandwich_days + stats.unplanned_absence_days
            );
            prop_assert_eq!(
                stats.sandwich_days,
                report.sandwich_patterns.iter().map(|p| p.charged_days).sum::<u32>()
            );
            prop_assert_eq!(stats.unplanned_absence_days as usize, report.unplanned_absences.len());
        }

        #[test]
        fn prop_balance_and_extra_never_both_positive(
            input in input_strategy(),
            holidays in prop::collection::vec(holiday_strategy(), 0..5),
            credit in 0u32..4,
        ) {
            let policy = LeavePolicy { monthly_credit: credit, ..LeavePolicy::default() };
            let today = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
            let stats = compute_monthly_stats(&input, &holidays, november(), &policy, today).stats;
            prop_assert!(!(stats.pending_balance > 0 && stats.extra_leave_days > 0));
        }

        #[test]
        fn prop_computation_is_idempotent(
            input in input_strategy(),
            holidays in prop::collection::vec(holiday_strategy(), 0..5),
        ) {
            let today = NaiveDate::from_ymd_opt(2025, 11, 20).unwrap();
            let policy = LeavePolicy::default();
            let first = compute_monthly_stats(&input, &holidays, november(), &policy, today);
            let second = compute_monthly_stats(&input, &holidays, november(), &policy, today);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_absences_never_on_non_working_days(
            input in input_strategy(),
            holidays in prop::collection::vec(holiday_strategy(), 0..5),
        ) {
            let today = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
            let policy = LeavePolicy::default();
            let report = compute_monthly_stats(&input, &holidays, november(), &policy, today);
            let weekly_off = input
                .weekly_off
                .clone()
                .unwrap_or_else(|| policy.default_weekly_off.clone());
            for date in &report.unplanned_absences {
                prop_assert!(!is_non_working_day(*date, &weekly_off, &holidays).is_non_working());
                prop_assert!(november().contains(*date));
            }
        }

        #[test]
        fn prop_half_day_alone_never_anchors_sandwich(
            offset in 0i64..90,
            holidays in prop::collection::vec(holiday_strategy(), 0..5),
        ) {
            let date = add_days(base_date(), offset).unwrap();
            let half = LeaveRequest::new(
                "h", "emp_001", date, date,
                Some(HalfDaySession::AfternoonHalf), LeaveStatus::Approved, "Casual",
            ).unwrap();
            let input = EmployeeLeaveInput {
                leave_requests: vec![half],
                ..EmployeeLeaveInput::new("emp_001")
            };
            let today = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
            let report = compute_monthly_stats(&input, &holidays, november(), &LeavePolicy::default(), today);
            prop_assert!(report.sandwich_patterns.is_empty());
        }
    }
}
