//! Batch-to-batch reconciliation.
//!
//! Compares the current month's batch snapshot against the prior month's
//! and produces a [`ReconciliationReport`] with anomaly classification.
//! The engine performs no mutation; callers pass immutable snapshots read
//! at a consistent point.

use rust_decimal::Decimal;

use crate::config::{AnomalyOrder, ReconciliationRules};
use crate::models::{
    AnomalyType, BatchSnapshot, EmployeePay, ReconciliationAnomaly, ReconciliationReport,
};

/// Percentage change from `previous`, or `None` when no percentage exists.
fn percent_change(previous: Decimal, delta: Decimal) -> Option<Decimal> {
    if previous.is_zero() {
        None
    } else {
        Some((delta / previous) * Decimal::ONE_HUNDRED)
    }
}

/// Fixes a percentage to two fraction digits for stable wire output.
fn two_dp(mut percent: Decimal) -> Decimal {
    percent.rescale(2);
    percent
}

/// Whether a change passes the configured emission threshold.
///
/// A change with no computable percentage (previous value zero) is always
/// emitted; there is no percentage to compare against the floor.
fn passes_threshold(delta: Decimal, percent: Option<Decimal>, threshold: Decimal) -> bool {
    if delta.is_zero() {
        return false;
    }
    percent.is_none_or(|p| p.abs() >= threshold)
}

fn change_anomaly(
    anomaly_type: AnomalyType,
    employee_id: &str,
    current: &EmployeePay,
    previous_value: Decimal,
    current_value: Decimal,
    previous_gross: Decimal,
    quantity: &str,
) -> ReconciliationAnomaly {
    let percent = percent_change(previous_value, current_value - previous_value);
    ReconciliationAnomaly {
        employee_id: employee_id.to_string(),
        employee_name: current.name.clone(),
        anomaly_type,
        previous_gross,
        current_gross: current.gross,
        change_percent: percent.map(two_dp),
        details: format!(
            "{} changed from {} to {}",
            quantity, previous_value, current_value
        ),
    }
}

/// Reconciles the current batch snapshot against the previous month's.
///
/// When `previous` is `None` — no batch exists for the prior period — the
/// report carries `previous_batch_total = 0`, `headcount_change` equal to
/// the current headcount and an empty anomaly list: absence of a baseline
/// is a distinct state from a baseline-detected change, so employees are
/// not all flagged as NEW.
///
/// # Example
///
/// ```
/// use payroll_compliance::config::ReconciliationRules;
/// use payroll_compliance::models::BatchSnapshot;
/// use payroll_compliance::reconciliation::reconcile;
/// use rust_decimal::Decimal;
///
/// let snapshot = BatchSnapshot {
///     headcount: 0,
///     gross_total: Decimal::ZERO,
///     deductions_total: Decimal::ZERO,
///     net_total: Decimal::ZERO,
///     per_employee: Default::default(),
/// };
/// let report = reconcile(2025, 3, &snapshot, Some(&snapshot), &ReconciliationRules::default());
/// assert!(report.anomalies.is_empty());
/// assert_eq!(report.variance, Decimal::ZERO);
/// ```
pub fn reconcile(
    year: i32,
    month: u32,
    current: &BatchSnapshot,
    previous: Option<&BatchSnapshot>,
    rules: &ReconciliationRules,
) -> ReconciliationReport {
    let Some(previous) = previous else {
        return ReconciliationReport {
            month,
            year,
            current_batch_total: current.gross_total,
            previous_batch_total: Decimal::ZERO,
            variance: current.gross_total,
            variance_percent: two_dp(Decimal::ZERO),
            headcount_change: i64::from(current.headcount),
            anomalies: Vec::new(),
        };
    };

    let variance = current.gross_total - previous.gross_total;
    let variance_percent =
        two_dp(percent_change(previous.gross_total, variance).unwrap_or(Decimal::ZERO));
    let headcount_change = i64::from(current.headcount) - i64::from(previous.headcount);

    let threshold = rules.change_threshold_percent;
    let mut anomalies: Vec<ReconciliationAnomaly> = Vec::new();

    for (employee_id, prev_pay) in &previous.per_employee {
        if !current.per_employee.contains_key(employee_id) {
            anomalies.push(ReconciliationAnomaly {
                employee_id: employee_id.clone(),
                employee_name: prev_pay.name.clone(),
                anomaly_type: AnomalyType::Missing,
                previous_gross: prev_pay.gross,
                current_gross: Decimal::ZERO,
                change_percent: None,
                details: "present in previous run only".to_string(),
            });
        }
    }

    for (employee_id, cur_pay) in &current.per_employee {
        match previous.per_employee.get(employee_id) {
            None => {
                anomalies.push(ReconciliationAnomaly {
                    employee_id: employee_id.clone(),
                    employee_name: cur_pay.name.clone(),
                    anomaly_type: AnomalyType::New,
                    previous_gross: Decimal::ZERO,
                    current_gross: cur_pay.gross,
                    change_percent: None,
                    details: "present in current run only".to_string(),
                });
            }
            Some(prev_pay) => {
                // One employee may emit both change anomalies in a single pass.
                let gross_delta = cur_pay.gross - prev_pay.gross;
                let gross_percent = percent_change(prev_pay.gross, gross_delta);
                if passes_threshold(gross_delta, gross_percent, threshold) {
                    anomalies.push(change_anomaly(
                        AnomalyType::SalaryChange,
                        employee_id,
                        cur_pay,
                        prev_pay.gross,
                        cur_pay.gross,
                        prev_pay.gross,
                        "gross pay",
                    ));
                }

                let deduction_delta = cur_pay.deductions - prev_pay.deductions;
                let deduction_percent = percent_change(prev_pay.deductions, deduction_delta);
                if passes_threshold(deduction_delta, deduction_percent, threshold) {
                    anomalies.push(change_anomaly(
                        AnomalyType::DeductionChange,
                        employee_id,
                        cur_pay,
                        prev_pay.deductions,
                        cur_pay.deductions,
                        prev_pay.gross,
                        "deductions",
                    ));
                }
            }
        }
    }

    sort_anomalies(&mut anomalies, rules.anomaly_order);

    ReconciliationReport {
        month,
        year,
        current_batch_total: current.gross_total,
        previous_batch_total: previous.gross_total,
        variance,
        variance_percent,
        headcount_change,
        anomalies,
    }
}

/// Applies the configured ordering to the anomaly list.
fn sort_anomalies(anomalies: &mut [ReconciliationAnomaly], order: AnomalyOrder) {
    match order {
        AnomalyOrder::EmployeeId => {
            anomalies.sort_by(|a, b| {
                a.employee_id
                    .cmp(&b.employee_id)
                    .then_with(|| a.anomaly_type.as_str().cmp(b.anomaly_type.as_str()))
            });
        }
        AnomalyOrder::Magnitude => {
            // Percent-less anomalies (previous value zero) sort first.
            anomalies.sort_by(|a, b| {
                let key = |x: &ReconciliationAnomaly| x.change_percent.map(|p| p.abs());
                match (key(b), key(a)) {
                    (None, None) => a.employee_id.cmp(&b.employee_id),
                    (None, Some(_)) => std::cmp::Ordering::Greater,
                    (Some(_), None) => std::cmp::Ordering::Less,
                    (Some(bp), Some(ap)) => {
                        bp.cmp(&ap).then_with(|| a.employee_id.cmp(&b.employee_id))
                    }
                }
            });
        }
    }
}
