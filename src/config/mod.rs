//! Configuration loading and management for the leave accounting engine.
//!
//! This module loads the leave policy (monthly credit, default weekly-off
//! pattern, payroll divisor) and company holiday calendars from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use leave_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded policy: {}", config.policy().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_MAX_INTERVAL_DAYS, DEFAULT_MONTHLY_CREDIT, DEFAULT_WORKING_DAYS_PER_MONTH,
    EngineConfig, HolidayFile, LeavePolicy,
};
