//! Statutory pay-date scheduling.
//!
//! This module computes the ordered set of pay dates for a (year, month,
//! frequency). All resolution is backward-walking: a target that lands on a
//! weekend moves to the preceding weekday, never forward. No holiday
//! calendar is modeled; only weekday/weekend is checked.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::config::ScheduleRules;
use crate::error::{EngineError, EngineResult};

/// Cadence at which a company pays its employees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayFrequency {
    /// One pay date: the last weekday of the month.
    Monthly,
    /// Two pay dates: mid-month and the last weekday of the month.
    SemiMonthly,
    /// Fridays on a 14-day cadence from a fixed reference Friday.
    BiWeekly,
    /// Every Friday in the month.
    Weekly,
}

impl PayFrequency {
    /// Returns the string representation of the frequency.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "MONTHLY",
            Self::SemiMonthly => "SEMI_MONTHLY",
            Self::BiWeekly => "BI_WEEKLY",
            Self::Weekly => "WEEKLY",
        }
    }

    /// Parses a frequency code.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownFrequency`] for unrecognised codes —
    /// the whole request is rejected, never partially answered.
    pub fn parse(code: &str) -> EngineResult<Self> {
        match code.to_uppercase().as_str() {
            "MONTHLY" => Ok(Self::Monthly),
            "SEMI_MONTHLY" => Ok(Self::SemiMonthly),
            "BI_WEEKLY" => Ok(Self::BiWeekly),
            "WEEKLY" => Ok(Self::Weekly),
            _ => Err(EngineError::UnknownFrequency {
                code: code.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for PayFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A derived pay date. Never persisted; recomputed per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayDate {
    /// The resolved calendar date. Always a weekday.
    pub date: NaiveDate,
    /// Always true: resolution excludes weekends by construction.
    pub is_working_day: bool,
}

impl PayDate {
    fn on(date: NaiveDate) -> Self {
        Self {
            date,
            is_working_day: true,
        }
    }
}

/// Returns the first and last calendar day of a (year, month).
///
/// # Errors
///
/// Returns [`EngineError::InvalidPeriod`] for months outside 1-12 or years
/// outside the supported calendar range.
pub fn month_bounds(year: i32, month: u32) -> EngineResult<(NaiveDate, NaiveDate)> {
    if !(1..=12).contains(&month) {
        return Err(EngineError::invalid_month(month));
    }
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        EngineError::InvalidPeriod {
            field: "year".to_string(),
            value: year.to_string(),
            message: "year is outside the supported calendar range".to_string(),
        }
    })?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| EngineError::InvalidPeriod {
            field: "year".to_string(),
            value: year.to_string(),
            message: "year is outside the supported calendar range".to_string(),
        })?;
    Ok((first, last))
}

/// Walks a date backward one day at a time until it is a weekday.
///
/// The walk never moves forward: a Saturday target resolves to the
/// preceding Friday, never the following Monday. This asymmetry is part of
/// the scheduling contract.
#[must_use]
pub fn back_to_weekday(mut date: NaiveDate) -> NaiveDate {
    while matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        date = date.pred_opt().expect("date walk stays within calendar range");
    }
    date
}

/// Returns every Friday in the (year, month), ascending.
fn fridays_in_month(first: NaiveDate, last: NaiveDate) -> Vec<NaiveDate> {
    let offset = (Weekday::Fri.num_days_from_monday() + 7
        - first.weekday().num_days_from_monday())
        % 7;
    let mut fridays = Vec::with_capacity(5);
    let mut day = first + Duration::days(i64::from(offset));
    while day <= last {
        fridays.push(day);
        day = day + Duration::days(7);
    }
    fridays
}

/// Computes the ordered set of pay dates for a (year, month, frequency).
///
/// All returned dates are distinct weekdays within the requested month.
///
/// # Behavior
///
/// - `MONTHLY`: the last weekday of the month.
/// - `SEMI_MONTHLY`: the weekday nearest to (and not after) the 15th, plus
///   the last weekday of the month.
/// - `WEEKLY`: every Friday in the month.
/// - `BI_WEEKLY`: Fridays aligned to a 14-day cadence from the configured
///   anchor Friday. When alignment yields no matches (mis-tuned anchor),
///   falls back to every second Friday starting from the month's first
///   Friday. The fallback is defined behavior, not an accident.
///
/// # Example
///
/// ```
/// use payroll_compliance::config::ScheduleRules;
/// use payroll_compliance::schedule::{compute_pay_dates, PayFrequency};
/// use chrono::NaiveDate;
///
/// // February 2025 ends on a Friday.
/// let dates = compute_pay_dates(2025, 2, PayFrequency::Monthly, &ScheduleRules::default()).unwrap();
/// assert_eq!(dates.len(), 1);
/// assert_eq!(dates[0].date, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
/// ```
pub fn compute_pay_dates(
    year: i32,
    month: u32,
    frequency: PayFrequency,
    schedule: &ScheduleRules,
) -> EngineResult<Vec<PayDate>> {
    let (first, last) = month_bounds(year, month)?;

    let dates = match frequency {
        PayFrequency::Monthly => vec![back_to_weekday(last)],
        PayFrequency::SemiMonthly => {
            let mid_target = NaiveDate::from_ymd_opt(year, month, 15)
                .expect("every month has a 15th");
            vec![back_to_weekday(mid_target), back_to_weekday(last)]
        }
        PayFrequency::Weekly => fridays_in_month(first, last),
        PayFrequency::BiWeekly => {
            let fridays = fridays_in_month(first, last);
            let anchor = schedule.biweekly_anchor;
            let aligned: Vec<NaiveDate> = fridays
                .iter()
                .copied()
                .filter(|d| (*d - anchor).num_days().rem_euclid(14) == 0)
                .collect();
            if aligned.is_empty() {
                fridays.into_iter().step_by(2).collect()
            } else {
                aligned
            }
        }
    };

    Ok(dates.into_iter().map(PayDate::on).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn compute(y: i32, m: u32, f: PayFrequency) -> Vec<NaiveDate> {
        compute_pay_dates(y, m, f, &ScheduleRules::default())
            .unwrap()
            .into_iter()
            .map(|p| p.date)
            .collect()
    }

    // ==========================================================================
    // PD-001: monthly resolves to the last weekday
    // ==========================================================================
    #[test]
    fn test_pd_001_monthly_february_2025_ends_on_friday() {
        // 2025-02-28 is a Friday, the last calendar day of the month
        assert_eq!(compute(2025, 2, PayFrequency::Monthly), vec![date(2025, 2, 28)]);
    }

    #[test]
    fn test_pd_002_monthly_walks_back_over_weekend() {
        // 2025-08-31 is a Sunday; the last weekday is Friday the 29th
        assert_eq!(compute(2025, 8, PayFrequency::Monthly), vec![date(2025, 8, 29)]);
    }

    // ==========================================================================
    // PD-003: semi-monthly backward walk is a contract, not an accident
    // ==========================================================================
    #[test]
    fn test_pd_003_saturday_fifteenth_resolves_to_friday_fourteenth() {
        // 2025-02-15 is a Saturday; resolution must yield Friday the 14th,
        // never Monday the 17th
        let dates = compute(2025, 2, PayFrequency::SemiMonthly);
        assert_eq!(dates, vec![date(2025, 2, 14), date(2025, 2, 28)]);
    }

    #[test]
    fn test_pd_004_sunday_fifteenth_resolves_to_friday_thirteenth() {
        // 2025-06-15 is a Sunday
        let dates = compute(2025, 6, PayFrequency::SemiMonthly);
        assert_eq!(dates[0], date(2025, 6, 13));
    }

    #[test]
    fn test_pd_005_weekday_fifteenth_is_kept_exactly() {
        // 2025-01-15 is a Wednesday
        let dates = compute(2025, 1, PayFrequency::SemiMonthly);
        assert_eq!(dates, vec![date(2025, 1, 15), date(2025, 1, 31)]);
    }

    // ==========================================================================
    // PD-006: weekly returns every Friday
    // ==========================================================================
    #[test]
    fn test_pd_006_weekly_january_2025() {
        assert_eq!(
            compute(2025, 1, PayFrequency::Weekly),
            vec![
                date(2025, 1, 3),
                date(2025, 1, 10),
                date(2025, 1, 17),
                date(2025, 1, 24),
                date(2025, 1, 31),
            ]
        );
    }

    #[test]
    fn test_pd_007_weekly_month_starting_on_friday() {
        // 2025-08-01 is a Friday
        let dates = compute(2025, 8, PayFrequency::Weekly);
        assert_eq!(dates.first(), Some(&date(2025, 8, 1)));
        assert_eq!(dates.len(), 5);
    }

    // ==========================================================================
    // PD-008: bi-weekly cadence is anchored and 14 days apart
    // ==========================================================================
    #[test]
    fn test_pd_008_biweekly_january_2025_aligned_to_default_anchor() {
        assert_eq!(
            compute(2025, 1, PayFrequency::BiWeekly),
            vec![date(2025, 1, 10), date(2025, 1, 24)]
        );
    }

    #[test]
    fn test_pd_009_biweekly_consecutive_dates_differ_by_fourteen_days() {
        for month in 1..=12 {
            let dates = compute(2025, month, PayFrequency::BiWeekly);
            for pair in dates.windows(2) {
                assert_eq!((pair[1] - pair[0]).num_days(), 14);
            }
        }
    }

    #[test]
    fn test_pd_010_biweekly_cadence_is_anchor_invariant_modulo_fourteen() {
        // 2021-01-15 is also a Friday, 14 days after the default anchor
        let shifted = ScheduleRules {
            biweekly_anchor: date(2021, 1, 15),
        };
        let default_dates = compute(2025, 3, PayFrequency::BiWeekly);
        let shifted_dates: Vec<NaiveDate> =
            compute_pay_dates(2025, 3, PayFrequency::BiWeekly, &shifted)
                .unwrap()
                .into_iter()
                .map(|p| p.date)
                .collect();
        assert_eq!(default_dates, shifted_dates);
    }

    // ==========================================================================
    // PD-011: bi-weekly fallback is defined behavior
    // ==========================================================================
    #[test]
    fn test_pd_011_mistuned_anchor_falls_back_to_every_second_friday() {
        // A Saturday anchor can never align with a Friday modulo 14, so the
        // cadence yields zero matches and the fallback must kick in.
        let mistuned = ScheduleRules {
            biweekly_anchor: date(2021, 1, 2),
        };
        let dates: Vec<NaiveDate> =
            compute_pay_dates(2025, 1, PayFrequency::BiWeekly, &mistuned)
                .unwrap()
                .into_iter()
                .map(|p| p.date)
                .collect();
        assert_eq!(
            dates,
            vec![date(2025, 1, 3), date(2025, 1, 17), date(2025, 1, 31)]
        );
    }

    // ==========================================================================
    // Parsing and validation
    // ==========================================================================
    #[test]
    fn test_frequency_parse_is_case_insensitive() {
        assert_eq!(PayFrequency::parse("monthly").unwrap(), PayFrequency::Monthly);
        assert_eq!(
            PayFrequency::parse("SEMI_MONTHLY").unwrap(),
            PayFrequency::SemiMonthly
        );
        assert_eq!(
            PayFrequency::parse("bi_weekly").unwrap(),
            PayFrequency::BiWeekly
        );
        assert_eq!(PayFrequency::parse("WEEKLY").unwrap(), PayFrequency::Weekly);
    }

    #[test]
    fn test_unknown_frequency_rejects_whole_request() {
        let err = PayFrequency::parse("fortnightly").unwrap_err();
        assert!(matches!(err, EngineError::UnknownFrequency { .. }));
    }

    #[test]
    fn test_month_zero_is_invalid() {
        let err =
            compute_pay_dates(2025, 0, PayFrequency::Monthly, &ScheduleRules::default())
                .unwrap_err();
        assert!(matches!(err, EngineError::InvalidPeriod { .. }));
    }

    #[test]
    fn test_month_thirteen_is_invalid() {
        let err =
            compute_pay_dates(2025, 13, PayFrequency::Monthly, &ScheduleRules::default())
                .unwrap_err();
        assert!(matches!(err, EngineError::InvalidPeriod { .. }));
    }

    #[test]
    fn test_month_bounds_handles_december() {
        let (first, last) = month_bounds(2025, 12).unwrap();
        assert_eq!(first, date(2025, 12, 1));
        assert_eq!(last, date(2025, 12, 31));
    }

    #[test]
    fn test_month_bounds_handles_leap_february() {
        let (_, last) = month_bounds(2024, 2).unwrap();
        assert_eq!(last, date(2024, 2, 29));
    }

    #[test]
    fn test_all_dates_within_month_and_on_weekdays() {
        for month in 1..=12 {
            for frequency in [
                PayFrequency::Monthly,
                PayFrequency::SemiMonthly,
                PayFrequency::BiWeekly,
                PayFrequency::Weekly,
            ] {
                let (first, last) = month_bounds(2026, month).unwrap();
                for pay_date in
                    compute_pay_dates(2026, month, frequency, &ScheduleRules::default()).unwrap()
                {
                    assert!(pay_date.date >= first && pay_date.date <= last);
                    assert!(!matches!(
                        pay_date.date.weekday(),
                        Weekday::Sat | Weekday::Sun
                    ));
                    assert!(pay_date.is_working_day);
                }
            }
        }
    }

    #[test]
    fn test_monthly_no_later_weekday_exists_in_month() {
        for month in 1..=12 {
            let (_, last) = month_bounds(2025, month).unwrap();
            let dates = compute(2025, month, PayFrequency::Monthly);
            assert_eq!(dates.len(), 1);
            // Every day after the returned date up to month end is a weekend
            let mut day = dates[0].succ_opt().unwrap();
            while day <= last {
                assert!(matches!(day.weekday(), Weekday::Sat | Weekday::Sun));
                day = day.succ_opt().unwrap();
            }
        }
    }

    #[test]
    fn test_pay_date_serialization() {
        let pay_date = PayDate::on(date(2025, 2, 28));
        let json = serde_json::to_string(&pay_date).unwrap();
        assert!(json.contains("\"date\":\"2025-02-28\""));
        assert!(json.contains("\"is_working_day\":true"));
    }

    #[test]
    fn test_frequency_serialization() {
        assert_eq!(
            serde_json::to_string(&PayFrequency::SemiMonthly).unwrap(),
            "\"SEMI_MONTHLY\""
        );
    }
}
