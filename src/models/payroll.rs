//! Payroll figures derived from leave accounting.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{MonthlyLeaveStats, YearMonth};

/// Monthly salary after loss-of-pay deduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSummary {
    /// The employee paid.
    pub employee_id: String,
    /// The payroll month.
    pub month: YearMonth,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Divisor used to derive the per-day salary.
    pub working_days_per_month: u32,
    /// `base_salary / working_days_per_month`, rounded to cents.
    pub per_day_salary: Decimal,
    /// Distinct days with a punch-in and no absence mark.
    pub worked_days: u32,
    /// Loss-of-pay days (the stats' `extra_leave_days`).
    pub lop_days: u32,
    /// Amount deducted for loss of pay.
    pub lop_deduction: Decimal,
    /// `base_salary - lop_deduction`, floored at zero.
    pub net_salary: Decimal,
    /// The leave figures the deduction was based on.
    pub leave_stats: MonthlyLeaveStats,
}
