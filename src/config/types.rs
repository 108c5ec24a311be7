//! Configuration types for leave accounting.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;

use crate::models::{Holiday, WeeklyOffPattern};

/// Leave-days credited per calendar month unless configured otherwise.
pub const DEFAULT_MONTHLY_CREDIT: u32 = 1;

/// Divisor used for per-day salary unless configured otherwise.
pub const DEFAULT_WORKING_DAYS_PER_MONTH: u32 = 30;

/// Longest leave or holiday range accepted from a request, in days.
pub const DEFAULT_MAX_INTERVAL_DAYS: u32 = 366;

/// Policy constants applied by the aggregator and payroll.
///
/// # Example
///
/// ```
/// use leave_engine::config::LeavePolicy;
///
/// let policy = LeavePolicy::default();
/// assert_eq!(policy.monthly_credit, 1);
/// assert_eq!(policy.working_days_per_month, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LeavePolicy {
    /// Human-readable policy name.
    #[serde(default = "default_policy_name")]
    pub name: String,
    /// Leave-days credited per calendar month.
    #[serde(default = "default_monthly_credit")]
    pub monthly_credit: u32,
    /// Weekly-off pattern for employees without a shift record.
    #[serde(default, rename = "default_weekly_off_days")]
    pub default_weekly_off: WeeklyOffPattern,
    /// Divisor for per-day salary in loss-of-pay deductions.
    #[serde(default = "default_working_days_per_month")]
    pub working_days_per_month: u32,
    /// Longest leave or holiday range accepted from a request, in days.
    #[serde(default = "default_max_interval_days")]
    pub max_interval_days: u32,
}

impl Default for LeavePolicy {
    fn default() -> Self {
        Self {
            name: default_policy_name(),
            monthly_credit: DEFAULT_MONTHLY_CREDIT,
            default_weekly_off: WeeklyOffPattern::default(),
            working_days_per_month: DEFAULT_WORKING_DAYS_PER_MONTH,
            max_interval_days: DEFAULT_MAX_INTERVAL_DAYS,
        }
    }
}

fn default_policy_name() -> String {
    "Default leave policy".to_string()
}

fn default_monthly_credit() -> u32 {
    DEFAULT_MONTHLY_CREDIT
}

fn default_working_days_per_month() -> u32 {
    DEFAULT_WORKING_DAYS_PER_MONTH
}

fn default_max_interval_days() -> u32 {
    DEFAULT_MAX_INTERVAL_DAYS
}

/// One holiday calendar file from the `holidays/` directory.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidayFile {
    /// The year the file describes, for reference only.
    #[serde(default)]
    pub year: Option<i32>,
    /// Holidays listed in the file.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
}

/// The complete configuration loaded from a configuration directory.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Leave policy constants.
    policy: LeavePolicy,
    /// Company holidays, sorted by start date.
    holidays: Vec<Holiday>,
}

impl EngineConfig {
    /// Creates a configuration, sorting holidays by start date.
    pub fn new(policy: LeavePolicy, holidays: Vec<Holiday>) -> Self {
        let mut sorted_holidays = holidays;
        sorted_holidays.sort_by_key(|h| h.interval.start());
        Self {
            policy,
            holidays: sorted_holidays,
        }
    }

    /// Returns the leave policy.
    pub fn policy(&self) -> &LeavePolicy {
        &self.policy
    }

    /// Returns the company holidays.
    pub fn holidays(&self) -> &[Holiday] {
        &self.holidays
    }
}
