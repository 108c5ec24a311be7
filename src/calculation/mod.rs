//! Calculation logic for the leave accounting engine.
//!
//! This module contains the calendar helpers, the holiday and weekly-off
//! index, sandwich leave detection, the unplanned absence scan, the monthly
//! aggregator that combines them, and the roster and payroll callers built
//! on top of the aggregator.

mod absence;
mod aggregator;
mod calendar;
mod holiday_index;
mod payroll;
mod roster;
mod sandwich;

pub use absence::{AbsenceScanResult, scan_unplanned_absences};
pub use aggregator::{
    ApprovedLeaveResult, EmployeeLeaveInput, compute_monthly_stats, count_approved_days,
};
pub use calendar::{add_days, dates_between, day_span, in_month, normalize, normalize_naive};
pub use holiday_index::{DayClassification, HolidayCalendar, NonWorkingKind, is_non_working_day};
pub use payroll::{calculate_payroll, count_worked_days, lop_deduction};
pub use roster::{ROSTER_CSV_HEADERS, roster_to_csv, summarize_roster};
pub use sandwich::{
    BookedDays, detect_booked_sandwiches, detect_holiday_sandwiches, detect_sandwiches,
    detect_weekend_sandwiches,
};
