//! Month calendar view.
//!
//! Composes the pay-date scheduler, the compliance deadline calendar and
//! the month's batch status into one view for display.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::RuleSet;
use crate::error::EngineResult;
use crate::models::{ApprovalState, PayrollBatch, ProcessingStatus};

use super::deadlines::{compute_deadlines, ComplianceDeadline};
use super::pay_dates::{compute_pay_dates, PayDate, PayFrequency};

/// Status summary of the month's payroll batch, when one exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStatusSummary {
    /// The batch's id.
    pub batch_id: Uuid,
    /// Processing status set by the external pipeline.
    pub processing_status: ProcessingStatus,
    /// Approval status owned by this engine.
    pub approval_status: ApprovalState,
}

impl From<&PayrollBatch> for BatchStatusSummary {
    fn from(batch: &PayrollBatch) -> Self {
        Self {
            batch_id: batch.id,
            processing_status: batch.processing_status,
            approval_status: batch.approval_status,
        }
    }
}

/// Composed calendar view for one (year, month).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCalendar {
    /// The requested year.
    pub year: i32,
    /// The requested month (1-12).
    pub month: u32,
    /// The pay frequency the pay dates were computed for.
    pub frequency: PayFrequency,
    /// The jurisdiction the deadlines were computed for.
    pub jurisdiction: String,
    /// Ordered pay dates for the month.
    pub pay_dates: Vec<PayDate>,
    /// Ordered statutory deadlines for the month.
    pub deadlines: Vec<ComplianceDeadline>,
    /// Status of the month's batch, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch: Option<BatchStatusSummary>,
}

/// Builds the composed calendar view for one month.
///
/// # Errors
///
/// Propagates scheduling and jurisdiction-lookup errors; the whole view is
/// rejected on any failing input, never partially filled.
pub fn month_calendar(
    year: i32,
    month: u32,
    frequency: PayFrequency,
    jurisdiction: &str,
    batch: Option<&PayrollBatch>,
    rules: &RuleSet,
) -> EngineResult<MonthCalendar> {
    let pay_dates = compute_pay_dates(year, month, frequency, rules.schedule())?;
    let deadlines = compute_deadlines(year, month, jurisdiction, rules)?;

    Ok(MonthCalendar {
        year,
        month,
        frequency,
        jurisdiction: jurisdiction.to_uppercase(),
        pay_dates,
        deadlines,
        batch: batch.map(BatchStatusSummary::from),
    })
}
