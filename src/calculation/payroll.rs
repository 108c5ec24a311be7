//! Loss-of-pay payroll calculation.
//!
//! Leave beyond the monthly credit is deducted from the base salary at a
//! per-day rate of `base_salary / working_days_per_month`.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

use crate::config::LeavePolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, Holiday, PayrollSummary, YearMonth};

use super::aggregator::{EmployeeLeaveInput, compute_monthly_stats};

/// Computes the loss-of-pay deduction for `extra_leave_days`.
///
/// # Returns
///
/// The deduction rounded to 2 decimal places, or a `CalculationError` when
/// `working_days_per_month` is zero or `base_salary` is negative.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::lop_deduction;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let deduction = lop_deduction(2, Decimal::from_str("30000").unwrap(), 30).unwrap();
/// assert_eq!(deduction, Decimal::from_str("2000.00").unwrap());
/// ```
pub fn lop_deduction(
    extra_leave_days: u32,
    base_salary: Decimal,
    working_days_per_month: u32,
) -> EngineResult<Decimal> {
    if working_days_per_month == 0 {
        return Err(EngineError::CalculationError {
            message: "working_days_per_month must be greater than zero".to_string(),
        });
    }
    if base_salary < Decimal::ZERO {
        return Err(EngineError::CalculationError {
            message: format!("base salary {} is negative", base_salary),
        });
    }

    let per_day = per_day_rate(base_salary, working_days_per_month)?;
    let deduction = Decimal::from(extra_leave_days)
        .checked_mul(per_day)
        .ok_or_else(|| EngineError::CalculationError {
            message: format!(
                "loss-of-pay for {} days at {} per day overflows",
                extra_leave_days, per_day
            ),
        })?;
    Ok(deduction.round_dp(2))
}

/// Unrounded per-day salary.
fn per_day_rate(base_salary: Decimal, working_days_per_month: u32) -> EngineResult<Decimal> {
    base_salary
        .checked_div(Decimal::from(working_days_per_month))
        .ok_or_else(|| EngineError::CalculationError {
            message: format!(
                "cannot divide base salary {} by {} working days",
                base_salary, working_days_per_month
            ),
        })
}

/// Counts distinct dates in `month` on which `employee_id` worked.
pub fn count_worked_days(
    attendance: &[AttendanceRecord],
    employee_id: &str,
    month: YearMonth,
) -> u32 {
    attendance
        .iter()
        .filter(|r| r.employee_id == employee_id && month.contains(r.date) && r.has_worked())
        .map(|r| r.date)
        .collect::<BTreeSet<NaiveDate>>()
        .len() as u32
}

/// Computes the employee's salary for `month` after loss-of-pay.
///
/// `working_days_override` replaces the policy's divisor when given.
pub fn calculate_payroll(
    input: &EmployeeLeaveInput,
    holidays: &[Holiday],
    month: YearMonth,
    policy: &LeavePolicy,
    today: NaiveDate,
    base_salary: Decimal,
    working_days_override: Option<u32>,
) -> EngineResult<PayrollSummary> {
    let working_days_per_month = working_days_override.unwrap_or(policy.working_days_per_month);
    let report = compute_monthly_stats(input, holidays, month, policy, today);
    let stats = report.stats;

    let lop_days = stats.extra_leave_days;
    let lop = lop_deduction(lop_days, base_salary, working_days_per_month)?;
    let per_day_salary = per_day_rate(base_salary, working_days_per_month)?.round_dp(2);
    let net_salary = (base_salary - lop).max(Decimal::ZERO);
    let worked_days = count_worked_days(&input.attendance, &input.employee_id, month);

    info!(
        employee_id = %stats.employee_id,
        month = %month,
        lop_days,
        lop_deduction = %lop,
        net_salary = %net_salary,
        "Payroll calculated"
    );

    Ok(PayrollSummary {
        employee_id: stats.employee_id.clone(),
        month,
        base_salary,
        working_days_per_month,
        per_day_salary,
        worked_days,
        lop_days,
        lop_deduction: lop,
        net_salary,
        leave_stats: stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LeaveRequest, LeaveStatus};
    use chrono::{TimeZone, Utc};
    use std::str::FromStr;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn november() -> YearMonth {
        YearMonth::new(2025, 11).unwrap()
    }

    fn worked(employee_id: &str, date: &str) -> AttendanceRecord {
        let day = make_date(date);
        AttendanceRecord {
            employee_id: employee_id.to_string(),
            date: day,
            punch_in: Some(Utc.from_utc_datetime(&day.and_hms_opt(9, 0, 0).unwrap())),
            punch_out: Some(Utc.from_utc_datetime(&day.and_hms_opt(17, 0, 0).unwrap())),
            status: Some("present".to_string()),
            worked_status: None,
        }
    }

    #[test]
    fn test_lop_deduction_basic() {
        assert_eq!(lop_deduction(2, dec("30000"), 30).unwrap(), dec("2000.00"));
    }

    #[test]
    fn test_lop_deduction_rounds_to_cents() {
        // 25000 / 30 = 833.333..., times 1
        assert_eq!(lop_deduction(1, dec("25000"), 30).unwrap(), dec("833.33"));
    }

    #[test]
    fn test_lop_deduction_zero_days() {
        assert_eq!(lop_deduction(0, dec("30000"), 30).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_lop_deduction_zero_divisor_is_error() {
        assert!(matches!(
            lop_deduction(1, dec("30000"), 0),
            Err(EngineError::CalculationError { .. })
        ));
    }

    #[test]
    fn test_lop_deduction_negative_salary_is_error() {
        assert!(lop_deduction(1, dec("-1"), 30).is_err());
    }

    #[test]
    fn test_lop_deduction_overflow_is_error() {
        assert!(matches!(
            lop_deduction(2, Decimal::MAX, 1),
            Err(EngineError::CalculationError { .. })
        ));
        assert_eq!(lop_deduction(1, Decimal::MAX, 1).unwrap(), Decimal::MAX);
    }

    #[test]
    fn test_count_worked_days_distinct_dates_only() {
        let mut absent = worked("emp_001", "2025-11-07");
        absent.status = Some("absent".to_string());
        let attendance = vec![
            worked("emp_001", "2025-11-05"),
            worked("emp_001", "2025-11-05"),
            worked("emp_001", "2025-11-06"),
            absent,
            worked("emp_002", "2025-11-06"),
            worked("emp_001", "2025-12-01"),
        ];
        assert_eq!(count_worked_days(&attendance, "emp_001", november()), 2);
    }

    #[test]
    fn test_calculate_payroll_with_lop() {
        let leave = LeaveRequest::new(
            "l1",
            "emp_001",
            make_date("2025-11-10"),
            make_date("2025-11-12"),
            None,
            LeaveStatus::Approved,
            "Casual",
        )
        .unwrap();
        let input = EmployeeLeaveInput {
            leave_requests: vec![leave],
            attendance: vec![worked("emp_001", "2025-11-03")],
            ..EmployeeLeaveInput::new("emp_001")
        };

        // Month not started: only the 3 approved days count
        let summary = calculate_payroll(
            &input,
            &[],
            november(),
            &LeavePolicy::default(),
            make_date("2025-10-31"),
            dec("30000"),
            None,
        )
        .unwrap();

        assert_eq!(summary.lop_days, 2);
        assert_eq!(summary.per_day_salary, dec("1000.00"));
        assert_eq!(summary.lop_deduction, dec("2000.00"));
        assert_eq!(summary.net_salary, dec("28000.00"));
        assert_eq!(summary.worked_days, 1);
        assert_eq!(summary.leave_stats.total_consumed_days, 3);
    }

    #[test]
    fn test_calculate_payroll_override_divisor() {
        let input = EmployeeLeaveInput::new("emp_001");
        let summary = calculate_payroll(
            &input,
            &[],
            november(),
            &LeavePolicy::default(),
            make_date("2025-10-31"),
            dec("26000"),
            Some(26),
        )
        .unwrap();
        assert_eq!(summary.working_days_per_month, 26);
        assert_eq!(summary.per_day_salary, dec("1000.00"));
        assert_eq!(summary.lop_deduction, Decimal::ZERO);
        assert_eq!(summary.net_salary, dec("26000"));
    }

    #[test]
    fn test_net_salary_never_negative() {
        // No attendance in a 30-day month: 25 absences against a 5-day divisor
        let input = EmployeeLeaveInput::new("emp_001");
        let summary = calculate_payroll(
            &input,
            &[],
            november(),
            &LeavePolicy::default(),
            make_date("2025-11-30"),
            dec("1000"),
            Some(5),
        )
        .unwrap();
        assert_eq!(summary.net_salary, Decimal::ZERO);
    }

    #[test]
    fn test_calculate_payroll_zero_divisor_fails() {
        let input = EmployeeLeaveInput::new("emp_001");
        let result = calculate_payroll(
            &input,
            &[],
            november(),
            &LeavePolicy::default(),
            make_date("2025-11-30"),
            dec("1000"),
            Some(0),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_calculate_payroll_overflowing_salary_fails() {
        // No attendance all month, so loss-of-pay days are charged
        let input = EmployeeLeaveInput::new("emp_001");
        let result = calculate_payroll(
            &input,
            &[],
            november(),
            &LeavePolicy::default(),
            make_date("2025-11-30"),
            Decimal::MAX,
            Some(1),
        );
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }
}
