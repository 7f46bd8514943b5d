//! Payroll batch model and its status axes.
//!
//! A [`PayrollBatch`] identifies one company's payroll run for a
//! (month, year). It carries two orthogonal status axes: the processing
//! status driven by the external payroll pipeline, and the approval status
//! owned exclusively by this engine's state machine.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::snapshot::BatchSnapshot;

/// Processing status of a payroll batch.
///
/// Set by the external processing pipeline; this engine reads it but
/// never drives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessingStatus {
    /// Batch has been created but processing has not started.
    Pending,
    /// The payroll computation is running.
    Processing,
    /// All employees were processed successfully.
    Completed,
    /// Processing failed entirely.
    Failed,
    /// Processing finished with some employees failing.
    Partial,
}

impl ProcessingStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Processing => "PROCESSING",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
            Self::Partial => "PARTIAL",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "PENDING" => Some(Self::Pending),
            "PROCESSING" => Some(Self::Processing),
            "COMPLETED" => Some(Self::Completed),
            "FAILED" => Some(Self::Failed),
            "PARTIAL" => Some(Self::Partial),
            _ => None,
        }
    }
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Approval status of a payroll batch.
///
/// The reviewed system models "not yet submitted" as an absent value;
/// here it is an explicit variant so every legal and illegal transition
/// is enumerable. Valid transitions:
/// - NotSubmitted → PendingApproval (submit)
/// - PendingApproval → Approved (approve, terminal)
/// - PendingApproval → Rejected (reject)
/// - Rejected → PendingApproval (resubmit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalState {
    /// Batch has never been submitted for approval.
    NotSubmitted,
    /// Batch is awaiting an approve/reject decision.
    PendingApproval,
    /// Batch is approved for disbursement (terminal).
    Approved,
    /// Batch was rejected and may be resubmitted.
    Rejected,
}

impl ApprovalState {
    /// Returns the string representation of the state.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotSubmitted => "NOT_SUBMITTED",
            Self::PendingApproval => "PENDING_APPROVAL",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Parses a state from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "NOT_SUBMITTED" => Some(Self::NotSubmitted),
            "PENDING_APPROVAL" => Some(Self::PendingApproval),
            "APPROVED" => Some(Self::Approved),
            "REJECTED" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns true if no further transitions are possible.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl fmt::Display for ApprovalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Aggregate totals for a payroll batch, as computed by the external
/// payroll engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchTotals {
    /// Number of employees in the batch.
    pub employee_count: u32,
    /// Total gross pay across all employees.
    pub gross_total: Decimal,
    /// Total net pay across all employees.
    pub net_total: Decimal,
    /// Total deductions across all employees.
    pub deductions_total: Decimal,
}

/// One append-only audit record for an approval transition.
///
/// Records are pushed by the state machine and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Who performed the transition.
    pub actor: String,
    /// The action that was performed ("submit_for_approval", "approve", "reject").
    pub action: String,
    /// Approval state before the transition.
    pub from_state: ApprovalState,
    /// Approval state after the transition.
    pub to_state: ApprovalState,
    /// When the transition happened.
    pub at: DateTime<Utc>,
    /// Notes supplied with the action, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One company's payroll run for a given (month, year).
///
/// Mutated only through the approval state machine and by the external
/// processing pipeline that sets [`ProcessingStatus`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollBatch {
    /// Unique identifier of the batch.
    pub id: Uuid,
    /// The company that owns this batch.
    pub company_id: Uuid,
    /// Calendar year of the payroll run.
    pub year: i32,
    /// Calendar month of the payroll run (1-12).
    pub month: u32,
    /// Processing status, driven by the external pipeline.
    pub processing_status: ProcessingStatus,
    /// Approval status, owned by this engine.
    pub approval_status: ApprovalState,
    /// Aggregate totals.
    pub totals: BatchTotals,
    /// Currency symbol for the monetary totals.
    pub currency: String,
    /// When the batch was last submitted for approval.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    /// When the batch was approved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    /// When the batch was last rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected_at: Option<DateTime<Utc>>,
    /// Rejection notes; present only while the batch is Rejected.
    /// Cleared on resubmission but retained in the audit trail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_notes: Option<String>,
    /// Per-employee snapshot used for reconciliation.
    pub snapshot: BatchSnapshot,
    /// Append-only approval audit trail.
    pub audit_trail: Vec<AuditRecord>,
}

impl PayrollBatch {
    /// Creates a new batch from the external pipeline's hand-off.
    ///
    /// The batch starts with [`ApprovalState::NotSubmitted`] and an empty
    /// audit trail; timestamps and rejection notes are unset.
    pub fn new(
        company_id: Uuid,
        year: i32,
        month: u32,
        processing_status: ProcessingStatus,
        currency: String,
        snapshot: BatchSnapshot,
    ) -> Self {
        let totals = BatchTotals {
            employee_count: snapshot.headcount,
            gross_total: snapshot.gross_total,
            net_total: snapshot.net_total,
            deductions_total: snapshot.deductions_total,
        };
        Self {
            id: Uuid::new_v4(),
            company_id,
            year,
            month,
            processing_status,
            approval_status: ApprovalState::NotSubmitted,
            totals,
            currency,
            submitted_at: None,
            approved_at: None,
            rejected_at: None,
            rejection_notes: None,
            snapshot,
            audit_trail: Vec::new(),
        }
    }
}
