//! Core data models for the leave accounting engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod holiday;
mod interval;
mod leave_report;
mod leave_request;
mod month;
mod payroll;
mod weekly_off;

pub use attendance::{ABSENT_STATUS, AttendanceRecord};
pub use holiday::Holiday;
pub use interval::DateInterval;
pub use leave_report::{
    AuditStep, LeaveReport, MonthlyLeaveStats, SandwichKind, SandwichPattern,
};
pub use leave_request::{Actor, HalfDaySession, LeaveAction, LeaveRequest, LeaveStatus};
pub use month::YearMonth;
pub use payroll::PayrollSummary;
pub use weekly_off::{SUNDAY, WeeklyOffPattern};
