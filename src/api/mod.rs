//! HTTP API module for the leave accounting engine.
//!
//! This module exposes the engine to the leave page, the admin roster
//! summary and payroll over JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    EmployeeDataRequest, LeaveStatsRequest, PayrollRequest, RosterSummaryQuery,
    RosterSummaryRequest,
};
pub use response::{ApiError, ApiErrorResponse, LeaveStatsResponse, PayrollResponse};
pub use state::AppState;
