//! Error types for the payroll compliance engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during scheduling, reconciliation
//! and approval processing.

use thiserror::Error;
use uuid::Uuid;

/// The main error type for the payroll compliance engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_compliance::error::EngineError;
///
/// let error = EngineError::UnknownJurisdiction {
///     code: "XX".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unknown jurisdiction: XX");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Pay frequency code was not recognised.
    #[error("Unknown pay frequency: {code}")]
    UnknownFrequency {
        /// The frequency code that was not recognised.
        code: String,
    },

    /// Jurisdiction code has no entry in the rule table.
    #[error("Unknown jurisdiction: {code}")]
    UnknownJurisdiction {
        /// The jurisdiction code that was not found.
        code: String,
    },

    /// A period input (year or month) was malformed.
    #[error("Invalid {field} '{value}': {message}")]
    InvalidPeriod {
        /// The field that was invalid ("month" or "year").
        field: String,
        /// The value that was rejected.
        value: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// An approval action that requires notes was called without them.
    #[error("{action} requires non-empty notes")]
    NotesRequired {
        /// The action that was attempted.
        action: String,
    },

    /// A state transition was attempted from a state that does not
    /// satisfy its guard. Names the required precondition so the caller
    /// can decide whether to retry, resubmit, or escalate.
    #[error("{action} requires {required}, found {found}")]
    InvalidState {
        /// The action that was attempted.
        action: String,
        /// The precondition the action requires.
        required: String,
        /// The state that was actually found.
        found: String,
    },

    /// Batch id unknown or not in the caller's tenant scope.
    #[error("Payroll batch not found: {id}")]
    BatchNotFound {
        /// The batch id that was not found.
        id: Uuid,
    },

    /// No batch has been ingested for the requested (company, year, month).
    #[error("No payroll batch found for company {company_id} in {year}-{month:02}")]
    PeriodNotFound {
        /// The company whose batch was requested.
        company_id: Uuid,
        /// The requested year.
        year: i32,
        /// The requested month.
        month: u32,
    },

    /// Rule-table file was not found at the specified path.
    #[error("Rule file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Rule-table file could not be parsed.
    #[error("Failed to parse rule file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Builds an `InvalidPeriod` error for an out-of-range month.
    pub fn invalid_month(month: u32) -> Self {
        EngineError::InvalidPeriod {
            field: "month".to_string(),
            value: month.to_string(),
            message: "month must be between 1 and 12".to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
