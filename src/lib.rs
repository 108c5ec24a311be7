//! Leave and attendance accounting engine
//!
//! This crate turns an employee's approved leave, company holidays, weekly-off
//! pattern and attendance punches into monthly leave consumption: approved
//! days, sandwich days, unplanned absences, remaining balance and
//! loss-of-pay days. Roster summaries and payroll deductions are built on
//! the same monthly aggregation.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
