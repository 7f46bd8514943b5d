//! Property-based tests for the scheduling components.

use chrono::{Datelike, Weekday};
use proptest::prelude::*;

use crate::config::{RuleSet, ScheduleRules};
use crate::schedule::{compute_deadlines, compute_pay_dates, month_bounds, PayFrequency};

fn arb_frequency() -> impl Strategy<Value = PayFrequency> {
    prop_oneof![
        Just(PayFrequency::Monthly),
        Just(PayFrequency::SemiMonthly),
        Just(PayFrequency::BiWeekly),
        Just(PayFrequency::Weekly),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every computed pay date is a weekday inside the requested month.
    #[test]
    fn prop_pay_dates_are_weekdays_in_month(
        year in 1990i32..2100,
        month in 1u32..=12,
        frequency in arb_frequency(),
    ) {
        let (first, last) = month_bounds(year, month).unwrap();
        let dates = compute_pay_dates(year, month, frequency, &ScheduleRules::default()).unwrap();
        for pay_date in &dates {
            prop_assert!(pay_date.date >= first && pay_date.date <= last);
            prop_assert!(!matches!(pay_date.date.weekday(), Weekday::Sat | Weekday::Sun));
        }
    }

    /// Pay dates are strictly ascending and distinct within one call.
    #[test]
    fn prop_pay_dates_are_ordered_and_distinct(
        year in 1990i32..2100,
        month in 1u32..=12,
        frequency in arb_frequency(),
    ) {
        let dates = compute_pay_dates(year, month, frequency, &ScheduleRules::default()).unwrap();
        for pair in dates.windows(2) {
            prop_assert!(pair[0].date < pair[1].date);
        }
    }

    /// Any two consecutive bi-weekly dates differ by exactly 14 days.
    #[test]
    fn prop_biweekly_cadence_is_fourteen_days(
        year in 1990i32..2100,
        month in 1u32..=12,
    ) {
        let dates =
            compute_pay_dates(year, month, PayFrequency::BiWeekly, &ScheduleRules::default())
                .unwrap();
        for pair in dates.windows(2) {
            prop_assert_eq!((pair[1].date - pair[0].date).num_days(), 14);
        }
    }

    /// Monthly always returns exactly one date.
    #[test]
    fn prop_monthly_returns_exactly_one_date(
        year in 1990i32..2100,
        month in 1u32..=12,
    ) {
        let dates =
            compute_pay_dates(year, month, PayFrequency::Monthly, &ScheduleRules::default())
                .unwrap();
        prop_assert_eq!(dates.len(), 1);
    }

    /// Semi-monthly always returns exactly two dates.
    #[test]
    fn prop_semi_monthly_returns_exactly_two_dates(
        year in 1990i32..2100,
        month in 1u32..=12,
    ) {
        let dates =
            compute_pay_dates(year, month, PayFrequency::SemiMonthly, &ScheduleRules::default())
                .unwrap();
        prop_assert_eq!(dates.len(), 2);
    }

    /// Every resolved deadline lies within the requested month.
    #[test]
    fn prop_deadlines_are_filtered_to_the_requested_month(
        year in 1990i32..2100,
        month in 1u32..=12,
        jurisdiction in prop_oneof![Just("IN"), Just("US")],
    ) {
        let rules = RuleSet::builtin();
        let (first, last) = month_bounds(year, month).unwrap();
        let deadlines = compute_deadlines(year, month, jurisdiction, &rules).unwrap();
        for deadline in &deadlines {
            prop_assert!(deadline.date >= first && deadline.date <= last);
        }
    }
}
