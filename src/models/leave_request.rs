//! Leave request model and its approval lifecycle.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::DateInterval;

/// Which half of the day a half-day leave covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HalfDaySession {
    /// First half of the working day.
    MorningHalf,
    /// Second half of the working day.
    AfternoonHalf,
}

impl HalfDaySession {
    /// The label used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            HalfDaySession::MorningHalf => "Morning Half",
            HalfDaySession::AfternoonHalf => "Afternoon Half",
        }
    }
}

impl fmt::Display for HalfDaySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HalfDaySession {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning half" | "morning_half" | "morning" => Ok(HalfDaySession::MorningHalf),
            "afternoon half" | "afternoon_half" | "afternoon" => Ok(HalfDaySession::AfternoonHalf),
            other => Err(format!("unknown half-day session '{}'", other)),
        }
    }
}

/// Approval state of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LeaveStatus {
    /// Awaiting an admin decision.
    #[default]
    #[serde(alias = "pending")]
    Pending,
    /// Approved by an admin; participates in leave accounting.
    #[serde(alias = "approved")]
    Approved,
    /// Rejected by an admin.
    #[serde(alias = "rejected")]
    Rejected,
    /// Withdrawn by the employee or an admin.
    #[serde(alias = "cancelled", alias = "Canceled", alias = "canceled")]
    Cancelled,
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaveStatus::Pending => write!(f, "Pending"),
            LeaveStatus::Approved => write!(f, "Approved"),
            LeaveStatus::Rejected => write!(f, "Rejected"),
            LeaveStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// A status change requested on a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveAction {
    /// Grant the request.
    Approve,
    /// Refuse the request.
    Reject,
    /// Withdraw the request.
    Cancel,
}

impl fmt::Display for LeaveAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaveAction::Approve => write!(f, "approve"),
            LeaveAction::Reject => write!(f, "reject"),
            LeaveAction::Cancel => write!(f, "cancel"),
        }
    }
}

/// Who is performing a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Actor {
    /// The employee who owns the request.
    Employee,
    /// An HR administrator.
    Admin,
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Actor::Employee => write!(f, "employee"),
            Actor::Admin => write!(f, "admin"),
        }
    }
}

/// A leave request for one employee.
///
/// A request with a [`HalfDaySession`] must cover a single day; every other
/// request is a full-day leave for each day of its interval.
///
/// # Example
///
/// ```
/// use leave_engine::models::{HalfDaySession, LeaveRequest, LeaveStatus};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2025, 11, 13).unwrap();
/// let leave = LeaveRequest::new(
///     "lv_001",
///     "emp_001",
///     date,
///     date,
///     Some(HalfDaySession::MorningHalf),
///     LeaveStatus::Approved,
///     "Casual",
/// )
/// .unwrap();
/// assert!(leave.is_half_day());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LeaveRequestRecord", into = "LeaveRequestRecord")]
pub struct LeaveRequest {
    /// Unique identifier for the request.
    pub id: String,
    /// The employee the request belongs to.
    pub employee_id: String,
    /// The days requested.
    pub interval: DateInterval,
    /// Set for half-day leave.
    pub half_day_session: Option<HalfDaySession>,
    /// Approval state.
    pub status: LeaveStatus,
    /// Free-form leave category (e.g. "Casual", "Sick").
    pub leave_type: String,
}

/// Wire shape of a leave request.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LeaveRequestRecord {
    #[serde(default)]
    id: String,
    employee_id: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    #[serde(default)]
    half_day_session: String,
    #[serde(default)]
    status: LeaveStatus,
    #[serde(default)]
    leave_type: String,
}

impl TryFrom<LeaveRequestRecord> for LeaveRequest {
    type Error = EngineError;

    fn try_from(record: LeaveRequestRecord) -> Result<Self, Self::Error> {
        let session = if record.half_day_session.trim().is_empty() {
            None
        } else {
            Some(
                record
                    .half_day_session
                    .parse::<HalfDaySession>()
                    .map_err(|message| EngineError::InvalidLeaveRequest {
                        request_id: record.id.clone(),
                        message,
                    })?,
            )
        };

        LeaveRequest::new(
            record.id,
            record.employee_id,
            record.start_date,
            record.end_date,
            session,
            record.status,
            record.leave_type,
        )
    }
}

impl From<LeaveRequest> for LeaveRequestRecord {
    fn from(request: LeaveRequest) -> Self {
        LeaveRequestRecord {
            id: request.id,
            employee_id: request.employee_id,
            start_date: request.interval.start(),
            end_date: request.interval.end(),
            half_day_session: request
                .half_day_session
                .map(|s| s.as_str().to_string())
                .unwrap_or_default(),
            status: request.status,
            leave_type: request.leave_type,
        }
    }
}

impl LeaveRequest {
    /// Creates a validated leave request.
    ///
    /// Fails when the interval is reversed or when a half-day session is
    /// attached to more than one day.
    pub fn new(
        id: impl Into<String>,
        employee_id: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        half_day_session: Option<HalfDaySession>,
        status: LeaveStatus,
        leave_type: impl Into<String>,
    ) -> EngineResult<Self> {
        let id = id.into();
        let interval = DateInterval::new(start_date, end_date)?;

        if half_day_session.is_some() && !interval.is_single_day() {
            return Err(EngineError::InvalidLeaveRequest {
                request_id: id,
                message: format!(
                    "half-day session requires a single day, got {} to {}",
                    start_date, end_date
                ),
            });
        }

        Ok(Self {
            id,
            employee_id: employee_id.into(),
            interval,
            half_day_session,
            status,
            leave_type: leave_type.into(),
        })
    }

    /// True for half-day leave.
    pub fn is_half_day(&self) -> bool {
        self.half_day_session.is_some()
    }

    /// True once an admin has approved the request.
    pub fn is_approved(&self) -> bool {
        self.status == LeaveStatus::Approved
    }

    /// Applies a status change.
    ///
    /// Allowed transitions:
    /// - Pending to Approved or Rejected, by an admin
    /// - Pending to Cancelled, by the employee or an admin
    ///
    /// Approved, Rejected and Cancelled are terminal.
    pub fn apply(&mut self, action: LeaveAction, actor: Actor) -> EngineResult<LeaveStatus> {
        let next = match (self.status, action, actor) {
            (LeaveStatus::Pending, LeaveAction::Approve, Actor::Admin) => LeaveStatus::Approved,
            (LeaveStatus::Pending, LeaveAction::Reject, Actor::Admin) => LeaveStatus::Rejected,
            (LeaveStatus::Pending, LeaveAction::Cancel, _) => LeaveStatus::Cancelled,
            _ => {
                return Err(EngineError::InvalidTransition {
                    request_id: self.id.clone(),
                    action: action.to_string(),
                    status: self.status.to_string(),
                    actor: actor.to_string(),
                });
            }
        };
        self.status = next;
        Ok(next)
    }
}
