//! Rule-table configuration for the payroll compliance engine.
//!
//! This module provides the data-driven rule tables the engine operates
//! on: jurisdiction deadline rules, pay-date scheduling parameters and
//! reconciliation parameters. Tables load from YAML files or fall back to
//! compiled-in defaults.

mod loader;
mod types;

pub use loader::RuleLoader;
pub use types::{
    AnomalyOrder, DeadlineCategory, DeadlineRule, JurisdictionRules, JurisdictionsConfig,
    ReconciliationRules, RuleSet, ScheduleRules,
};
