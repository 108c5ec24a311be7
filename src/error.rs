//! Error types for the leave accounting engine.
//!
//! Malformed input is rejected at construction and ingestion time using the
//! variants below. Once values exist, the accounting functions themselves are
//! infallible.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the leave accounting engine.
///
/// # Example
///
/// ```
/// use leave_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/policy.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/policy.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An interval ended before it started.
    #[error("Invalid interval: end {end} is before start {start}")]
    InvalidInterval {
        /// The interval start.
        start: NaiveDate,
        /// The interval end.
        end: NaiveDate,
    },

    /// A leave or holiday spans more days than the policy allows.
    #[error("Interval {start} to {end} spans {days} days, more than the maximum of {max_days}")]
    IntervalTooLong {
        /// The interval start.
        start: NaiveDate,
        /// The interval end.
        end: NaiveDate,
        /// The inclusive day count.
        days: u32,
        /// The configured maximum.
        max_days: u32,
    },

    /// A leave request carried inconsistent data.
    #[error("Invalid leave request '{request_id}': {message}")]
    InvalidLeaveRequest {
        /// The ID of the offending request.
        request_id: String,
        /// What made the request invalid.
        message: String,
    },

    /// A weekday number outside 0..=6 was supplied.
    #[error("Invalid weekday number {value}: expected 0 (Sunday) through 6 (Saturday)")]
    InvalidWeekday {
        /// The rejected value.
        value: u8,
    },

    /// A year-month string or value could not be interpreted.
    #[error("Invalid month '{value}': expected YYYY-MM")]
    InvalidMonth {
        /// The rejected input.
        value: String,
    },

    /// A leave request status change is not permitted.
    #[error("Cannot {action} leave request '{request_id}' in status {status} as {actor}")]
    InvalidTransition {
        /// The ID of the request.
        request_id: String,
        /// The attempted action.
        action: String,
        /// The current status.
        status: String,
        /// Who attempted the change.
        actor: String,
    },

    /// Writing an export failed.
    #[error("Export failed: {message}")]
    ExportError {
        /// A description of the failure.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/policy.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/policy.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_interval_displays_bounds() {
        let error = EngineError::InvalidInterval {
            start: NaiveDate::from_ymd_opt(2025, 11, 15).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 11, 13).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid interval: end 2025-11-13 is before start 2025-11-15"
        );
    }

    #[test]
    fn test_invalid_leave_request_displays_id_and_message() {
        let error = EngineError::InvalidLeaveRequest {
            request_id: "lv_001".to_string(),
            message: "half-day session on a multi-day interval".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid leave request 'lv_001': half-day session on a multi-day interval"
        );
    }

    #[test]
    fn test_invalid_weekday_displays_value() {
        let error = EngineError::InvalidWeekday { value: 7 };
        assert!(error.to_string().contains("Invalid weekday number 7"));
    }

    #[test]
    fn test_invalid_transition_displays_context() {
        let error = EngineError::InvalidTransition {
            request_id: "lv_001".to_string(),
            action: "approve".to_string(),
            status: "Rejected".to_string(),
            actor: "admin".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Cannot approve leave request 'lv_001' in status Rejected as admin"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_month() -> EngineResult<()> {
            Err(EngineError::InvalidMonth {
                value: "2025-13".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_month()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
