//! Response types for the payroll compliance API.
//!
//! This module defines the error response structures, the success
//! envelopes for the scheduling endpoints, and the mapping from
//! [`EngineError`] to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::schedule::{ComplianceDeadline, PayDate, PayFrequency};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a malformed query string error response.
    pub fn malformed_query(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_QUERY", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let (status, code) = match &error {
            EngineError::UnknownFrequency { .. } => (StatusCode::BAD_REQUEST, "UNKNOWN_FREQUENCY"),
            EngineError::UnknownJurisdiction { .. } => {
                (StatusCode::BAD_REQUEST, "UNKNOWN_JURISDICTION")
            }
            EngineError::InvalidPeriod { .. } => (StatusCode::BAD_REQUEST, "INVALID_PERIOD"),
            EngineError::NotesRequired { .. } => (StatusCode::BAD_REQUEST, "NOTES_REQUIRED"),
            EngineError::InvalidState { .. } => (StatusCode::CONFLICT, "INVALID_STATE"),
            EngineError::BatchNotFound { .. } | EngineError::PeriodNotFound { .. } => {
                (StatusCode::NOT_FOUND, "BATCH_NOT_FOUND")
            }
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
            }
        };
        ApiErrorResponse {
            status,
            error: ApiError::new(code, error.to_string()),
        }
    }
}

/// Success envelope for `GET /pay-dates`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayDatesResponse {
    /// The requested year.
    pub year: i32,
    /// The requested month.
    pub month: u32,
    /// The resolved pay frequency.
    pub frequency: PayFrequency,
    /// Ordered pay dates.
    pub pay_dates: Vec<PayDate>,
}

/// Success envelope for `GET /compliance-deadlines`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeadlinesResponse {
    /// The requested year.
    pub year: i32,
    /// The requested month.
    pub month: u32,
    /// The normalised jurisdiction code.
    pub jurisdiction: String,
    /// Ordered deadlines for the month.
    pub deadlines: Vec<ComplianceDeadline>,
}
