//! Output models for the leave accounting engine.
//!
//! This module contains [`MonthlyLeaveStats`], the sandwich patterns that
//! feed it, and the [`LeaveReport`] that bundles both with an audit trace.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::YearMonth;

/// What kind of non-working block a sandwich pattern bridges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SandwichKind {
    /// A company holiday bracketed by full-day leave.
    Holiday,
    /// A run of weekly-off days bracketed by full-day leave.
    Weekend,
}

/// A non-working block charged as leave because full-day approved leave
/// sits on both sides of it.
///
/// # Example
///
/// ```
/// use leave_engine::models::{SandwichKind, SandwichPattern};
/// use chrono::NaiveDate;
///
/// let pattern = SandwichPattern {
///     kind: SandwichKind::Weekend,
///     anchor_dates: [
///         NaiveDate::from_ymd_opt(2025, 11, 21).unwrap(),
///         NaiveDate::from_ymd_opt(2025, 11, 24).unwrap(),
///     ],
///     charged_days: 2,
///     reason: "2 week-off days bridged".to_string(),
///     holiday_name: None,
/// };
/// assert!(pattern.touches(NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
///                         NaiveDate::from_ymd_opt(2025, 11, 30).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SandwichPattern {
    /// Holiday or weekend bridge.
    pub kind: SandwichKind,
    /// The leave days immediately before and after the block.
    pub anchor_dates: [NaiveDate; 2],
    /// Days charged as leave for the block.
    pub charged_days: u32,
    /// Human-readable explanation.
    pub reason: String,
    /// The bridged holiday, for holiday patterns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holiday_name: Option<String>,
}

impl SandwichPattern {
    /// True when either anchor date lies in `[start, end]`.
    pub fn touches(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.anchor_dates
            .iter()
            .any(|date| *date >= start && *date <= end)
    }
}

/// Leave consumption for one employee in one month.
///
/// Invariants:
/// - `total_consumed_days == approved_days + sandwich_days + unplanned_absence_days`
/// - at most one of `pending_balance` and `extra_leave_days` is positive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyLeaveStats {
    /// The employee the figures belong to.
    pub employee_id: String,
    /// The month evaluated.
    pub month: YearMonth,
    /// Days of approved leave overlapping the month.
    pub approved_days: u32,
    /// Non-working days charged through sandwich patterns.
    pub sandwich_days: u32,
    /// Working days absent without approved leave.
    pub unplanned_absence_days: u32,
    /// Sum of the three figures above.
    pub total_consumed_days: u32,
    /// Leave days credited for the month.
    pub monthly_credit: u32,
    /// Credit left unused.
    pub pending_balance: u32,
    /// Days beyond the credit, deducted as loss of pay.
    pub extra_leave_days: u32,
}

impl MonthlyLeaveStats {
    /// Builds the stats record, deriving totals and balance from the parts.
    pub fn from_parts(
        employee_id: impl Into<String>,
        month: YearMonth,
        approved_days: u32,
        sandwich_days: u32,
        unplanned_absence_days: u32,
        monthly_credit: u32,
    ) -> Self {
        let total_consumed_days = approved_days + sandwich_days + unplanned_absence_days;
        Self {
            employee_id: employee_id.into(),
            month,
            approved_days,
            sandwich_days,
            unplanned_absence_days,
            total_consumed_days,
            monthly_credit,
            pending_balance: monthly_credit.saturating_sub(total_consumed_days),
            extra_leave_days: total_consumed_days.saturating_sub(monthly_credit),
        }
    }
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// Everything the engine derives for one employee-month.
///
/// A pure function of the engine inputs: identical inputs give identical
/// reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveReport {
    /// The headline figures.
    pub stats: MonthlyLeaveStats,
    /// Sandwich patterns touching the month.
    pub sandwich_patterns: Vec<SandwichPattern>,
    /// Dates counted as unplanned absences, ascending.
    pub unplanned_absences: Vec<NaiveDate>,
    /// How each figure was reached.
    pub audit_trace: Vec<AuditStep>,
}
