//! Core data models for the payroll compliance engine.
//!
//! This module contains all the domain models used throughout the engine.

mod batch;
mod report;
mod snapshot;

pub use batch::{ApprovalState, AuditRecord, BatchTotals, PayrollBatch, ProcessingStatus};
pub use report::{AnomalyType, ReconciliationAnomaly, ReconciliationReport};
pub use snapshot::{BatchSnapshot, EmployeePay};
