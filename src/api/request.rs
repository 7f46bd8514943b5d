//! Request types for the payroll compliance API.
//!
//! This module defines the query and JSON body structures for the API
//! endpoints, plus their conversions into domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::models::{BatchSnapshot, EmployeePay, ProcessingStatus};

/// Query parameters for `GET /pay-dates`.
#[derive(Debug, Clone, Deserialize)]
pub struct PayDatesQuery {
    /// The requested year.
    pub year: i32,
    /// The requested month (1-12).
    pub month: u32,
    /// Pay frequency code (e.g. "MONTHLY").
    pub frequency: String,
}

/// Query parameters for `GET /compliance-deadlines`.
#[derive(Debug, Clone, Deserialize)]
pub struct DeadlinesQuery {
    /// The requested year.
    pub year: i32,
    /// The requested month (1-12).
    pub month: u32,
    /// Jurisdiction code (e.g. "IN").
    pub jurisdiction: String,
}

/// Query parameters for `GET /calendar`.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarQuery {
    /// The requested year.
    pub year: i32,
    /// The requested month (1-12).
    pub month: u32,
    /// Pay frequency code.
    pub frequency: String,
    /// Jurisdiction code.
    pub jurisdiction: String,
    /// Company whose batch status should be included, if any.
    #[serde(default)]
    pub company_id: Option<Uuid>,
}

/// Query parameters for `GET /reconciliation`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReconciliationQuery {
    /// The company whose batches are reconciled.
    pub company_id: Uuid,
    /// The current batch's month (1-12).
    pub month: u32,
    /// The current batch's year.
    pub year: i32,
}

/// Per-employee figures in a batch ingestion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeePayRequest {
    /// The employee's display name.
    pub name: String,
    /// Gross pay for the period.
    pub gross: Decimal,
    /// Total deductions for the period.
    pub deductions: Decimal,
}

/// Snapshot section of a batch ingestion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotRequest {
    /// Number of employees in the run.
    pub headcount: u32,
    /// Total gross pay.
    pub gross_total: Decimal,
    /// Total deductions.
    pub deductions_total: Decimal,
    /// Total net pay.
    pub net_total: Decimal,
    /// Per-employee figures keyed by employee id.
    #[serde(default)]
    pub per_employee: BTreeMap<String, EmployeePayRequest>,
}

/// Request body for `POST /batches` — the hand-off from the external
/// processing pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestBatchRequest {
    /// The company that owns the batch.
    pub company_id: Uuid,
    /// Calendar year of the payroll run.
    pub year: i32,
    /// Calendar month of the payroll run (1-12).
    pub month: u32,
    /// Processing status reported by the pipeline.
    pub processing_status: ProcessingStatus,
    /// Currency symbol for the monetary totals.
    pub currency: String,
    /// The batch snapshot.
    pub snapshot: SnapshotRequest,
}

/// Request body for `POST /batches/:id/submit-for-approval`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitRequest {
    /// The actor performing the submission; defaults to "system".
    #[serde(default)]
    pub actor: Option<String>,
    /// Optional submission notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request body for `POST /batches/:id/approve`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApproveRequest {
    /// The actor performing the approval; defaults to "system".
    #[serde(default)]
    pub actor: Option<String>,
}

/// Request body for `POST /batches/:id/reject`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RejectRequest {
    /// The actor performing the rejection; defaults to "system".
    #[serde(default)]
    pub actor: Option<String>,
    /// The rejection notes. Required; validated by the handler so the
    /// failure surfaces as a NOTES_REQUIRED error, not a parse error.
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<EmployeePayRequest> for EmployeePay {
    fn from(req: EmployeePayRequest) -> Self {
        EmployeePay {
            name: req.name,
            gross: req.gross,
            deductions: req.deductions,
        }
    }
}

impl From<SnapshotRequest> for BatchSnapshot {
    fn from(req: SnapshotRequest) -> Self {
        BatchSnapshot {
            headcount: req.headcount,
            gross_total: req.gross_total,
            deductions_total: req.deductions_total,
            net_total: req.net_total,
            per_employee: req
                .per_employee
                .into_iter()
                .map(|(id, pay)| (id, pay.into()))
                .collect(),
        }
    }
}
