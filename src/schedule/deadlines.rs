//! Statutory compliance deadline calendar.
//!
//! This module interprets a jurisdiction's deadline rule table for a given
//! (year, month). Every rule resolves independently; the results are then
//! filtered to deadlines whose resolved date falls inside the requested
//! month. A rule whose nominal date maps outside that month is silently
//! dropped for the call, not returned as "upcoming".

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::{DeadlineCategory, DeadlineRule, RuleSet};
use crate::error::EngineResult;

use super::pay_dates::{back_to_weekday, month_bounds};

/// A derived statutory deadline. Never persisted; recomputed per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceDeadline {
    /// The resolved deadline date, always within the requested month.
    pub date: NaiveDate,
    /// Human-readable label (e.g. "TDS Remittance Due").
    pub label: String,
    /// Deadline category.
    pub category: DeadlineCategory,
}

impl ComplianceDeadline {
    /// Days from `today` until the deadline; negative when it has passed.
    ///
    /// `today` is passed explicitly so callers and tests control the clock.
    #[must_use]
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        (self.date - today).num_days()
    }

    /// Whether the deadline has passed as of `today`.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.date < today
    }
}

/// Resolves one rule to a concrete deadline for (year, month).
///
/// Returns `None` when the rule's date does not exist in the calendar
/// (e.g. a fixed Feb 30); the in-month filter handles everything else.
fn resolve_rule(rule: &DeadlineRule, year: i32, month: u32) -> Option<ComplianceDeadline> {
    match rule {
        DeadlineRule::MonthlyDay {
            day,
            label,
            category,
        } => {
            let target = NaiveDate::from_ymd_opt(year, month, *day)?;
            Some(ComplianceDeadline {
                date: back_to_weekday(target),
                label: label.clone(),
                category: *category,
            })
        }
        DeadlineRule::FixedDate {
            month: rule_month,
            day,
            label,
            category,
        } => {
            let date = NaiveDate::from_ymd_opt(year, *rule_month, *day)?;
            Some(ComplianceDeadline {
                date,
                label: label.clone(),
                category: *category,
            })
        }
    }
}

/// Computes the statutory deadlines for a (year, month, jurisdiction).
///
/// Results are ordered by date, then label.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::UnknownJurisdiction`] when the code
/// has no rule table and [`crate::error::EngineError::InvalidPeriod`] for a
/// malformed period.
///
/// # Example
///
/// ```
/// use payroll_compliance::config::RuleSet;
/// use payroll_compliance::schedule::compute_deadlines;
///
/// let rules = RuleSet::builtin();
/// let deadlines = compute_deadlines(2025, 7, "IN", &rules).unwrap();
/// assert!(deadlines.iter().any(|d| d.label == "Form 24Q (Q1) Due"));
/// ```
pub fn compute_deadlines(
    year: i32,
    month: u32,
    jurisdiction: &str,
    rules: &RuleSet,
) -> EngineResult<Vec<ComplianceDeadline>> {
    let (first, last) = month_bounds(year, month)?;
    let table = rules.jurisdiction(jurisdiction)?;

    let mut deadlines: Vec<ComplianceDeadline> = table
        .rules
        .iter()
        .filter_map(|rule| resolve_rule(rule, year, month))
        .filter(|d| d.date >= first && d.date <= last)
        .collect();

    deadlines.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.label.cmp(&b.label)));
    Ok(deadlines)
}
