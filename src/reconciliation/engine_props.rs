//! Property-based tests for the reconciliation engine.

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::config::ReconciliationRules;
use crate::models::{BatchSnapshot, EmployeePay};
use crate::reconciliation::reconcile;

/// Strategy for a snapshot with up to eight employees and cent-precise pay.
fn arb_snapshot() -> impl Strategy<Value = BatchSnapshot> {
    prop::collection::btree_map(
        "emp_[0-9]{3}",
        (0i64..5_000_00, 0i64..1_000_00),
        0..8,
    )
    .prop_map(|entries| {
        let per_employee: BTreeMap<String, EmployeePay> = entries
            .into_iter()
            .map(|(id, (gross, deductions))| {
                (
                    id.clone(),
                    EmployeePay {
                        name: id,
                        gross: Decimal::new(gross, 2),
                        deductions: Decimal::new(deductions, 2),
                    },
                )
            })
            .collect();
        let gross_total: Decimal = per_employee.values().map(|p| p.gross).sum();
        let deductions_total: Decimal = per_employee.values().map(|p| p.deductions).sum();
        BatchSnapshot {
            headcount: per_employee.len() as u32,
            net_total: gross_total - deductions_total,
            gross_total,
            deductions_total,
            per_employee,
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Reconciling a snapshot against itself is always clean.
    #[test]
    fn prop_self_reconciliation_is_clean(snapshot in arb_snapshot()) {
        let report = reconcile(2025, 6, &snapshot, Some(&snapshot), &ReconciliationRules::default());
        prop_assert!(report.anomalies.is_empty());
        prop_assert_eq!(report.variance, Decimal::ZERO);
        prop_assert_eq!(report.variance_percent, Decimal::ZERO);
        prop_assert_eq!(report.headcount_change, 0);
    }

    /// Variance is antisymmetric under swapping current and previous.
    #[test]
    fn prop_variance_is_antisymmetric(a in arb_snapshot(), b in arb_snapshot()) {
        let rules = ReconciliationRules::default();
        let forward = reconcile(2025, 6, &a, Some(&b), &rules);
        let backward = reconcile(2025, 6, &b, Some(&a), &rules);
        prop_assert_eq!(forward.variance, -backward.variance);
        prop_assert_eq!(forward.headcount_change, -backward.headcount_change);
    }

    /// Every MISSING anomaly names an employee absent from the current run,
    /// and every NEW anomaly one absent from the previous run.
    #[test]
    fn prop_anomaly_membership_is_consistent(a in arb_snapshot(), b in arb_snapshot()) {
        use crate::models::AnomalyType;
        let report = reconcile(2025, 6, &a, Some(&b), &ReconciliationRules::default());
        for anomaly in &report.anomalies {
            match anomaly.anomaly_type {
                AnomalyType::Missing => {
                    prop_assert!(!a.per_employee.contains_key(&anomaly.employee_id));
                    prop_assert!(b.per_employee.contains_key(&anomaly.employee_id));
                }
                AnomalyType::New => {
                    prop_assert!(a.per_employee.contains_key(&anomaly.employee_id));
                    prop_assert!(!b.per_employee.contains_key(&anomaly.employee_id));
                }
                AnomalyType::SalaryChange | AnomalyType::DeductionChange => {
                    prop_assert!(a.per_employee.contains_key(&anomaly.employee_id));
                    prop_assert!(b.per_employee.contains_key(&anomaly.employee_id));
                }
            }
        }
    }

    /// A missing baseline never produces anomalies.
    #[test]
    fn prop_missing_baseline_is_anomaly_free(snapshot in arb_snapshot()) {
        let report = reconcile(2025, 1, &snapshot, None, &ReconciliationRules::default());
        prop_assert!(report.anomalies.is_empty());
        prop_assert_eq!(report.previous_batch_total, Decimal::ZERO);
        prop_assert_eq!(report.headcount_change, i64::from(snapshot.headcount));
    }
}
