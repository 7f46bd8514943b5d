//! Payroll compliance and reconciliation engine.
//!
//! This crate governs the payroll compliance cycle for a multi-tenant HR
//! platform: computing statutory pay dates and filing deadlines for a
//! company's jurisdiction and pay frequency, comparing successive monthly
//! payroll runs to surface anomalies, and gating disbursement through an
//! approval state machine.

#![warn(missing_docs)]

pub mod api;
pub mod approval;
pub mod config;
pub mod error;
pub mod models;
pub mod reconciliation;
pub mod schedule;
pub mod store;
