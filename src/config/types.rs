//! Rule-table types for the payroll compliance engine.
//!
//! This module contains the strongly-typed rule structures that are
//! deserialized from YAML rule files. Deadline rules are data, not control
//! flow: adding a jurisdiction is a new table entry with no change to the
//! interpreter.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};

/// Category of a statutory deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeadlineCategory {
    /// Tax remittance or deposit deadlines.
    Tax,
    /// Statutory compliance remittances (provident fund, state insurance).
    Compliance,
    /// Periodic statutory filings.
    Filing,
}

impl std::fmt::Display for DeadlineCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeadlineCategory::Tax => write!(f, "tax"),
            DeadlineCategory::Compliance => write!(f, "compliance"),
            DeadlineCategory::Filing => write!(f, "filing"),
        }
    }
}

/// One deadline rule within a jurisdiction's table.
///
/// The calendar interprets each rule independently and filters the results
/// to the requested month.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeadlineRule {
    /// Recurs every month at the weekday nearest to (and not after) `day`.
    MonthlyDay {
        /// Nominal day of month the deadline targets.
        day: u32,
        /// Label shown to the caller (e.g. "TDS Remittance Due").
        label: String,
        /// Deadline category.
        category: DeadlineCategory,
    },
    /// Falls on a fixed calendar date, emitted only for that month.
    FixedDate {
        /// The month the deadline belongs to (1-12).
        month: u32,
        /// The day of that month.
        day: u32,
        /// Label shown to the caller (e.g. "Form 24Q (Q1) Due").
        label: String,
        /// Deadline category.
        category: DeadlineCategory,
    },
}

/// Deadline rule table for one jurisdiction.
#[derive(Debug, Clone, Deserialize)]
pub struct JurisdictionRules {
    /// Jurisdiction code (e.g. "IN", "US").
    pub code: String,
    /// Human-readable jurisdiction name.
    pub name: String,
    /// The deadline rules for this jurisdiction.
    pub rules: Vec<DeadlineRule>,
}

/// Jurisdictions rule file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct JurisdictionsConfig {
    /// All configured jurisdictions.
    pub jurisdictions: Vec<JurisdictionRules>,
}

/// Pay-date scheduling parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleRules {
    /// Reference Friday anchoring the bi-weekly 14-day cadence.
    ///
    /// Any known Friday works, since 14-day periodicity is anchor-invariant
    /// modulo 14. A mis-tuned (non-Friday) anchor makes the cadence miss
    /// every Friday, which triggers the defined first-Friday fallback.
    pub biweekly_anchor: NaiveDate,
}

impl Default for ScheduleRules {
    fn default() -> Self {
        Self {
            // 2021-01-01 was a Friday.
            biweekly_anchor: NaiveDate::from_ymd_opt(2021, 1, 1)
                .expect("valid anchor date"),
        }
    }
}

/// Ordering applied to the anomaly list of a reconciliation report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyOrder {
    /// Sort by employee id, ascending. Deterministic across runs.
    EmployeeId,
    /// Sort by descending absolute change percent, employee id tiebreak.
    /// Anomalies without a percent (previous value zero) sort first.
    Magnitude,
}

/// Reconciliation tuning parameters.
///
/// The reviewed system's threshold and ordering were not observable, so
/// both are explicit configuration rather than hidden constants.
#[derive(Debug, Clone, Deserialize)]
pub struct ReconciliationRules {
    /// Minimum absolute change percent for SALARY_CHANGE/DEDUCTION_CHANGE
    /// anomalies to be emitted. Zero means any non-zero change.
    pub change_threshold_percent: Decimal,
    /// Ordering of the emitted anomaly list.
    pub anomaly_order: AnomalyOrder,
}

impl Default for ReconciliationRules {
    fn default() -> Self {
        Self {
            change_threshold_percent: Decimal::ZERO,
            anomaly_order: AnomalyOrder::EmployeeId,
        }
    }
}

/// The complete rule set the engine operates on.
///
/// Aggregates the jurisdiction deadline tables, scheduling parameters and
/// reconciliation parameters, whether loaded from YAML files or built in.
#[derive(Debug, Clone)]
pub struct RuleSet {
    jurisdictions: HashMap<String, JurisdictionRules>,
    schedule: ScheduleRules,
    reconciliation: ReconciliationRules,
}

impl RuleSet {
    /// Builds a rule set from its parts.
    pub fn new(
        jurisdictions: Vec<JurisdictionRules>,
        schedule: ScheduleRules,
        reconciliation: ReconciliationRules,
    ) -> Self {
        let jurisdictions = jurisdictions
            .into_iter()
            .map(|j| (j.code.to_uppercase(), j))
            .collect();
        Self {
            jurisdictions,
            schedule,
            reconciliation,
        }
    }

    /// Returns the compiled-in default rule set.
    ///
    /// Mirrors the shipped `config/rules/` files so the engine is usable
    /// with no files on disk.
    pub fn builtin() -> Self {
        use DeadlineCategory::{Compliance, Filing, Tax};
        use DeadlineRule::{FixedDate, MonthlyDay};

        let india = JurisdictionRules {
            code: "IN".to_string(),
            name: "India".to_string(),
            rules: vec![
                MonthlyDay {
                    day: 7,
                    label: "TDS Remittance Due".to_string(),
                    category: Tax,
                },
                MonthlyDay {
                    day: 15,
                    label: "PF Remittance Due".to_string(),
                    category: Compliance,
                },
                MonthlyDay {
                    day: 15,
                    label: "ESI Remittance Due".to_string(),
                    category: Compliance,
                },
                FixedDate {
                    month: 7,
                    day: 31,
                    label: "Form 24Q (Q1) Due".to_string(),
                    category: Filing,
                },
                FixedDate {
                    month: 10,
                    day: 31,
                    label: "Form 24Q (Q2) Due".to_string(),
                    category: Filing,
                },
                FixedDate {
                    month: 1,
                    day: 31,
                    label: "Form 24Q (Q3) Due".to_string(),
                    category: Filing,
                },
                FixedDate {
                    month: 5,
                    day: 31,
                    label: "Form 24Q (Q4) Due".to_string(),
                    category: Filing,
                },
            ],
        };

        let us = JurisdictionRules {
            code: "US".to_string(),
            name: "United States".to_string(),
            rules: vec![
                MonthlyDay {
                    day: 15,
                    label: "Federal Tax Deposit Due".to_string(),
                    category: Tax,
                },
                FixedDate {
                    month: 4,
                    day: 30,
                    label: "Form 941 (Q1) Due".to_string(),
                    category: Filing,
                },
                FixedDate {
                    month: 7,
                    day: 31,
                    label: "Form 941 (Q2) Due".to_string(),
                    category: Filing,
                },
                FixedDate {
                    month: 10,
                    day: 31,
                    label: "Form 941 (Q3) Due".to_string(),
                    category: Filing,
                },
                FixedDate {
                    month: 1,
                    day: 31,
                    label: "Form 941 (Q4) Due".to_string(),
                    category: Filing,
                },
                FixedDate {
                    month: 1,
                    day: 31,
                    label: "Annual Wage Filing (W-2) Due".to_string(),
                    category: Filing,
                },
            ],
        };

        Self::new(
            vec![india, us],
            ScheduleRules::default(),
            ReconciliationRules::default(),
        )
    }

    /// Looks up a jurisdiction's rule table by code.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownJurisdiction`] when the code has no
    /// table entry.
    pub fn jurisdiction(&self, code: &str) -> EngineResult<&JurisdictionRules> {
        self.jurisdictions
            .get(&code.to_uppercase())
            .ok_or_else(|| EngineError::UnknownJurisdiction {
                code: code.to_string(),
            })
    }

    /// Returns the codes of all configured jurisdictions, sorted.
    pub fn jurisdiction_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.jurisdictions.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    /// Returns the pay-date scheduling parameters.
    pub fn schedule(&self) -> &ScheduleRules {
        &self.schedule
    }

    /// Returns the reconciliation parameters.
    pub fn reconciliation(&self) -> &ReconciliationRules {
        &self.reconciliation
    }
}
