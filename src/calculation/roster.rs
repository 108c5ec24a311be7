//! Roster-wide leave summary and CSV export.

use chrono::NaiveDate;
use tracing::info;

use crate::config::LeavePolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{Holiday, MonthlyLeaveStats, YearMonth};

use super::aggregator::{EmployeeLeaveInput, compute_monthly_stats};

/// Column headers of the roster CSV export, in order.
pub const ROSTER_CSV_HEADERS: [&str; 9] = [
    "employee_id",
    "month",
    "approved_days",
    "sandwich_days",
    "unplanned_absence_days",
    "total_consumed_days",
    "monthly_credit",
    "pending_balance",
    "extra_leave_days",
];

/// Computes monthly stats for every employee in the roster, in input order.
pub fn summarize_roster(
    roster: &[EmployeeLeaveInput],
    holidays: &[Holiday],
    month: YearMonth,
    policy: &LeavePolicy,
    today: NaiveDate,
) -> Vec<MonthlyLeaveStats> {
    let summary: Vec<MonthlyLeaveStats> = roster
        .iter()
        .map(|input| compute_monthly_stats(input, holidays, month, policy, today).stats)
        .collect();

    info!(
        month = %month,
        employees = summary.len(),
        total_extra_leave_days = summary.iter().map(|s| s.extra_leave_days).sum::<u32>(),
        "Roster summary computed"
    );

    summary
}

/// Spreadsheet applications evaluate cells starting with these characters.
fn needs_formula_guard(value: &str) -> bool {
    matches!(value.chars().next(), Some('=' | '+' | '-' | '@'))
}

fn guard_cell(value: &str) -> String {
    if needs_formula_guard(value) {
        format!("'{}", value)
    } else {
        value.to_string()
    }
}

/// Renders roster stats as CSV with a header row.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::roster_to_csv;
/// use leave_engine::models::{MonthlyLeaveStats, YearMonth};
///
/// let month = YearMonth::new(2025, 11).unwrap();
/// let stats = vec![MonthlyLeaveStats::from_parts("emp_001", month, 2, 1, 0, 1)];
/// let csv = roster_to_csv(&stats).unwrap();
/// assert!(csv.ends_with("emp_001,2025-11,2,1,0,3,1,0,2\n"));
/// ```
pub fn roster_to_csv(stats: &[MonthlyLeaveStats]) -> EngineResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(ROSTER_CSV_HEADERS)
        .map_err(|e| EngineError::ExportError {
            message: e.to_string(),
        })?;

    for row in stats {
        writer
            .write_record([
                guard_cell(&row.employee_id),
                row.month.to_string(),
                row.approved_days.to_string(),
                row.sandwich_days.to_string(),
                row.unplanned_absence_days.to_string(),
                row.total_consumed_days.to_string(),
                row.monthly_credit.to_string(),
                row.pending_balance.to_string(),
                row.extra_leave_days.to_string(),
            ])
            .map_err(|e| EngineError::ExportError {
                message: e.to_string(),
            })?;
    }

    let bytes = writer.into_inner().map_err(|e| EngineError::ExportError {
        message: e.to_string(),
    })?;

    String::from_utf8(bytes).map_err(|e| EngineError::ExportError {
        message: e.to_string(),
    })
}
