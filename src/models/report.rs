//! Reconciliation report models.
//!
//! A [`ReconciliationReport`] is recomputed on demand from two batch
//! snapshots and never cached across batch mutation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Classification of a detected discrepancy between two payroll runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnomalyType {
    /// Employee present in the previous run but absent from the current one.
    Missing,
    /// Employee present in the current run but absent from the previous one.
    New,
    /// Employee's gross pay changed between runs.
    SalaryChange,
    /// Employee's total deductions changed between runs.
    DeductionChange,
}

impl AnomalyType {
    /// Returns the string representation of the anomaly type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Missing => "MISSING",
            Self::New => "NEW",
            Self::SalaryChange => "SALARY_CHANGE",
            Self::DeductionChange => "DEDUCTION_CHANGE",
        }
    }
}

/// A detected discrepancy for one employee between two consecutive runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationAnomaly {
    /// The employee the anomaly concerns.
    pub employee_id: String,
    /// The employee's display name.
    pub employee_name: String,
    /// Classification of the discrepancy.
    #[serde(rename = "type")]
    pub anomaly_type: AnomalyType,
    /// Gross pay in the previous run; zero when the employee is new.
    pub previous_gross: Decimal,
    /// Gross pay in the current run; zero when the employee is missing.
    pub current_gross: Decimal,
    /// Percentage change for SALARY_CHANGE/DEDUCTION_CHANGE anomalies.
    /// `None` when the previous value was zero, since no percentage exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_percent: Option<Decimal>,
    /// Human-readable description of the discrepancy.
    pub details: String,
}

/// Diff report between the current month's batch and the prior month's.
///
/// Ephemeral; recomputed on demand from the two snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// Calendar month of the current batch (1-12).
    pub month: u32,
    /// Calendar year of the current batch.
    pub year: i32,
    /// Gross total of the current batch.
    pub current_batch_total: Decimal,
    /// Gross total of the previous batch; zero when no baseline exists.
    pub previous_batch_total: Decimal,
    /// `current_batch_total - previous_batch_total`.
    pub variance: Decimal,
    /// Variance as a percentage of the previous total; zero when the
    /// previous total is zero.
    pub variance_percent: Decimal,
    /// `current.headcount - previous.headcount`.
    pub headcount_change: i64,
    /// Detected anomalies, in the configured order.
    pub anomalies: Vec<ReconciliationAnomaly>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_anomaly_type_serialization() {
        assert_eq!(
            serde_json::to_string(&AnomalyType::SalaryChange).unwrap(),
            "\"SALARY_CHANGE\""
        );
        assert_eq!(
            serde_json::to_string(&AnomalyType::Missing).unwrap(),
            "\"MISSING\""
        );
    }

    #[test]
    fn test_anomaly_serializes_type_field() {
        let anomaly = ReconciliationAnomaly {
            employee_id: "emp_001".to_string(),
            employee_name: "Asha Rao".to_string(),
            anomaly_type: AnomalyType::New,
            previous_gross: Decimal::ZERO,
            current_gross: dec("3200.00"),
            change_percent: None,
            details: "present in current run only".to_string(),
        };
        let json = serde_json::to_string(&anomaly).unwrap();
        assert!(json.contains("\"type\":\"NEW\""));
        assert!(!json.contains("change_percent"));
    }

    #[test]
    fn test_report_round_trip() {
        let report = ReconciliationReport {
            month: 3,
            year: 2025,
            current_batch_total: dec("5000.00"),
            previous_batch_total: dec("4800.00"),
            variance: dec("200.00"),
            variance_percent: dec("4.17"),
            headcount_change: 0,
            anomalies: vec![],
        };
        let json = serde_json::to_string(&report).unwrap();
        let back: ReconciliationReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
