//! Batch reconciliation: diffing successive monthly payroll runs and
//! classifying anomalies.

mod engine;

#[cfg(test)]
mod engine_props;

pub use engine::reconcile;
