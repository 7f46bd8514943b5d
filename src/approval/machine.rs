//! Approval state machine for payroll batches.
//!
//! The approval lifecycle is a single pure transition function over a
//! tagged action type, so every legal and illegal transition is enumerable
//! and unit-testable independent of any interface. Valid transitions:
//!
//! - NotSubmitted → PendingApproval (submit)
//! - PendingApproval → Approved (approve, terminal)
//! - PendingApproval → Rejected (reject)
//! - Rejected → PendingApproval (resubmit)

use chrono::{DateTime, Utc};

use crate::error::{EngineError, EngineResult};
use crate::models::{ApprovalState, AuditRecord, PayrollBatch, ProcessingStatus};

/// An action against a batch's approval lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApprovalAction {
    /// Submit the batch for approval. Legal from NotSubmitted or Rejected,
    /// and only once processing has completed.
    Submit {
        /// Optional submission notes, recorded in the audit trail.
        notes: Option<String>,
    },
    /// Approve a pending batch. Signals downstream disbursement eligibility.
    Approve,
    /// Reject a pending batch. Notes are required.
    Reject {
        /// The reason for rejection.
        notes: String,
    },
}

impl ApprovalAction {
    /// Returns the action name used in audit records and error messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Submit { .. } => "submit_for_approval",
            Self::Approve => "approve",
            Self::Reject { .. } => "reject",
        }
    }
}

/// The outcome of a validated transition: the new state plus the audit
/// record to append.
#[derive(Debug, Clone)]
pub struct ApprovalTransition {
    /// The approval state after the transition.
    pub new_state: ApprovalState,
    /// The audit record describing the transition.
    pub audit: AuditRecord,
}

/// Validates an approval action against the batch's current state.
///
/// Pure: performs no mutation. `now` is passed explicitly so tests are
/// deterministic and replayable.
///
/// # Errors
///
/// * [`EngineError::InvalidState`] when the action's guard fails; the
///   message names the required precondition and the state found.
/// * [`EngineError::NotesRequired`] when `Reject` carries empty notes.
pub fn transition(
    processing: ProcessingStatus,
    current: ApprovalState,
    action: &ApprovalAction,
    actor: &str,
    now: DateTime<Utc>,
) -> EngineResult<ApprovalTransition> {
    let (new_state, notes) = match action {
        ApprovalAction::Submit { notes } => {
            if processing != ProcessingStatus::Completed {
                return Err(EngineError::InvalidState {
                    action: action.name().to_string(),
                    required: "processing status COMPLETED".to_string(),
                    found: processing.as_str().to_string(),
                });
            }
            if !matches!(
                current,
                ApprovalState::NotSubmitted | ApprovalState::Rejected
            ) {
                return Err(EngineError::InvalidState {
                    action: action.name().to_string(),
                    required: "approval status NOT_SUBMITTED or REJECTED".to_string(),
                    found: current.as_str().to_string(),
                });
            }
            (ApprovalState::PendingApproval, notes.clone())
        }
        ApprovalAction::Approve => {
            if current != ApprovalState::PendingApproval {
                return Err(EngineError::InvalidState {
                    action: action.name().to_string(),
                    required: "approval status PENDING_APPROVAL".to_string(),
                    found: current.as_str().to_string(),
                });
            }
            (ApprovalState::Approved, None)
        }
        ApprovalAction::Reject { notes } => {
            if notes.trim().is_empty() {
                return Err(EngineError::NotesRequired {
                    action: action.name().to_string(),
                });
            }
            if current != ApprovalState::PendingApproval {
                return Err(EngineError::InvalidState {
                    action: action.name().to_string(),
                    required: "approval status PENDING_APPROVAL".to_string(),
                    found: current.as_str().to_string(),
                });
            }
            (ApprovalState::Rejected, Some(notes.clone()))
        }
    };

    Ok(ApprovalTransition {
        new_state,
        audit: AuditRecord {
            actor: actor.to_string(),
            action: action.name().to_string(),
            from_state: current,
            to_state: new_state,
            at: now,
            notes,
        },
    })
}

/// Applies a validated action to a batch.
///
/// All-or-nothing: the guard is evaluated before any field changes, so a
/// failed action leaves the batch untouched. The caller is responsible for
/// holding whatever lock makes the read-guard-write sequence atomic.
pub fn apply(
    batch: &mut PayrollBatch,
    action: &ApprovalAction,
    actor: &str,
    now: DateTime<Utc>,
) -> EngineResult<()> {
    let outcome = transition(
        batch.processing_status,
        batch.approval_status,
        action,
        actor,
        now,
    )?;

    match action {
        ApprovalAction::Submit { .. } => {
            batch.submitted_at = Some(now);
            // Prior rejection notes stop blocking the batch on resubmission;
            // they stay visible in the audit trail.
            batch.rejection_notes = None;
        }
        ApprovalAction::Approve => {
            batch.approved_at = Some(now);
        }
        ApprovalAction::Reject { notes } => {
            batch.rejected_at = Some(now);
            batch.rejection_notes = Some(notes.clone());
        }
    }
    batch.approval_status = outcome.new_state;
    batch.audit_trail.push(outcome.audit);
    Ok(())
}

/// Check if an approval state transition is valid, independent of the
/// processing axis.
#[must_use]
pub fn is_valid_transition(from: ApprovalState, to: ApprovalState) -> bool {
    matches!(
        (from, to),
        (ApprovalState::NotSubmitted, ApprovalState::PendingApproval)
            | (
                ApprovalState::PendingApproval,
                ApprovalState::Approved | ApprovalState::Rejected
            )
            | (ApprovalState::Rejected, ApprovalState::PendingApproval)
    )
}
