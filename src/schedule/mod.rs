//! Scheduling components: pay dates, compliance deadlines and the
//! composed month calendar view.
//!
//! Everything in this module is a pure function of its inputs and safely
//! memoizable per (year, month, frequency/jurisdiction) key.

mod calendar;
mod deadlines;
mod pay_dates;

#[cfg(test)]
mod schedule_props;

pub use calendar::{month_calendar, BatchStatusSummary, MonthCalendar};
pub use deadlines::{compute_deadlines, ComplianceDeadline};
pub use pay_dates::{back_to_weekday, compute_pay_dates, month_bounds, PayDate, PayFrequency};
