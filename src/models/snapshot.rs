//! Batch snapshot model.
//!
//! A [`BatchSnapshot`] is the read-only projection of a payroll run that
//! the external payroll computation engine hands to this engine. It is the
//! sole input to reconciliation; callers pass immutable snapshots, never
//! live references to a batch mid-update.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-employee pay figures within a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePay {
    /// The employee's display name.
    pub name: String,
    /// Gross pay for the period.
    pub gross: Decimal,
    /// Total deductions for the period.
    pub deductions: Decimal,
}

/// Read-only projection of one payroll run, supplied by the external
/// payroll engine.
///
/// Employee entries are keyed by employee id in a `BTreeMap` so iteration
/// order is deterministic across runs.
///
/// # Example
///
/// ```
/// use payroll_compliance::models::{BatchSnapshot, EmployeePay};
/// use rust_decimal::Decimal;
/// use std::collections::BTreeMap;
/// use std::str::FromStr;
///
/// let mut per_employee = BTreeMap::new();
/// per_employee.insert(
///     "emp_001".to_string(),
///     EmployeePay {
///         name: "Asha Rao".to_string(),
///         gross: Decimal::from_str("3200.00").unwrap(),
///         deductions: Decimal::from_str("450.00").unwrap(),
///     },
/// );
/// let snapshot = BatchSnapshot {
///     headcount: 1,
///     gross_total: Decimal::from_str("3200.00").unwrap(),
///     deductions_total: Decimal::from_str("450.00").unwrap(),
///     net_total: Decimal::from_str("2750.00").unwrap(),
///     per_employee,
/// };
/// assert_eq!(snapshot.headcount, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSnapshot {
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
    pub per_employee: BTreeMap<String, EmployeePay>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_snapshot_serialization_round_trip() {
        let mut per_employee = BTreeMap::new();
        per_employee.insert(
            "emp_001".to_string(),
            EmployeePay {
                name: "Asha Rao".to_string(),
                gross: dec("3200.00"),
                deductions: dec("450.00"),
            },
        );
        let snapshot = BatchSnapshot {
            headcount: 1,
            gross_total: dec("3200.00"),
            deductions_total: dec("450.00"),
            net_total: dec("2750.00"),
            per_employee,
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"gross_total\":\"3200.00\""));
        let back: BatchSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_per_employee_defaults_to_empty() {
        let json = r#"{
            "headcount": 0,
            "gross_total": "0",
            "deductions_total": "0",
            "net_total": "0"
        }"#;
        let snapshot: BatchSnapshot = serde_json::from_str(json).unwrap();
        assert!(snapshot.per_employee.is_empty());
    }

    #[test]
    fn test_per_employee_iterates_in_key_order() {
        let mut per_employee = BTreeMap::new();
        for id in ["emp_003", "emp_001", "emp_002"] {
            per_employee.insert(
                id.to_string(),
                EmployeePay {
                    name: id.to_string(),
                    gross: dec("100"),
                    deductions: dec("0"),
                },
            );
        }
        let keys: Vec<&String> = per_employee.keys().collect();
        assert_eq!(keys, vec!["emp_001", "emp_002", "emp_003"]);
    }
}
