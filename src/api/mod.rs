//! HTTP API module for the payroll compliance engine.
//!
//! This module provides the REST API endpoints for pay-date scheduling,
//! compliance deadlines, reconciliation and the batch approval lifecycle.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ApproveRequest, CalendarQuery, DeadlinesQuery, EmployeePayRequest, IngestBatchRequest,
    PayDatesQuery, ReconciliationQuery, RejectRequest, SnapshotRequest, SubmitRequest,
};
pub use response::{ApiError, DeadlinesResponse, PayDatesResponse};
pub use state::AppState;
