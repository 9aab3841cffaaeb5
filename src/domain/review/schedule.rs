//! Recurrence scheduler.
//!
//! Computes the next cycle's opening and due dates purely from the current
//! moment and the document's configured interval and review period. No side
//! effects; callers decide what to do with a null schedule.

use serde::{Deserialize, Serialize};

use super::document::{ReviewInterval, ReviewPeriod};
use crate::domain::foundation::Timestamp;

/// The next cycle's dates. Either may be absent: a `custom` interval with
/// no configured day count yields no next cycle at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSchedule {
    pub opens_for_review: Option<Timestamp>,
    pub next_due: Option<Timestamp>,
}

impl ReviewSchedule {
    /// A schedule with no next-cycle dates.
    pub fn none() -> Self {
        Self {
            opens_for_review: None,
            next_due: None,
        }
    }
}

/// Computes the next schedule from the current moment.
///
/// `opens_for_review = now + interval`, using calendar month/year addition
/// for the named intervals. `next_due = opens_for_review + period`. A
/// `custom` interval without `interval_days`, or a missing period, yields
/// null in the corresponding slot.
pub fn next_schedule(
    now: Timestamp,
    interval: ReviewInterval,
    interval_days: Option<u32>,
    period: Option<ReviewPeriod>,
) -> ReviewSchedule {
    let opens_for_review = match interval {
        ReviewInterval::Monthly => Some(now.add_months(1)),
        ReviewInterval::Quarterly => Some(now.add_months(3)),
        ReviewInterval::Semiannually => Some(now.add_months(6)),
        ReviewInterval::Annually => Some(now.add_years(1)),
        ReviewInterval::Custom => interval_days.map(|days| now.add_days(i64::from(days))),
    };

    let next_due = match (opens_for_review, period) {
        (Some(opens), Some(ReviewPeriod::OneWeek)) => Some(opens.add_days(7)),
        (Some(opens), Some(ReviewPeriod::TwoWeeks)) => Some(opens.add_days(14)),
        (Some(opens), Some(ReviewPeriod::ThreeWeeks)) => Some(opens.add_days(21)),
        (Some(opens), Some(ReviewPeriod::OneMonth)) => Some(opens.add_months(1)),
        _ => None,
    };

    ReviewSchedule {
        opens_for_review,
        next_due,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn ts(s: &str) -> Timestamp {
        let dt = DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc);
        Timestamp::from_datetime(dt)
    }

    #[test]
    fn quarterly_two_weeks_matches_calendar() {
        let now = ts("2024-01-15T00:00:00Z");
        let schedule = next_schedule(
            now,
            ReviewInterval::Quarterly,
            None,
            Some(ReviewPeriod::TwoWeeks),
        );

        assert_eq!(schedule.opens_for_review, Some(ts("2024-04-15T00:00:00Z")));
        assert_eq!(schedule.next_due, Some(ts("2024-04-29T00:00:00Z")));
    }

    #[test]
    fn monthly_adds_one_calendar_month() {
        let now = ts("2024-01-31T00:00:00Z");
        let schedule = next_schedule(now, ReviewInterval::Monthly, None, None);
        // Clamped to end of February (leap year), not Jan 31 + 30 days
        assert_eq!(schedule.opens_for_review, Some(ts("2024-02-29T00:00:00Z")));
    }

    #[test]
    fn annually_adds_one_calendar_year() {
        let now = ts("2024-06-01T00:00:00Z");
        let schedule = next_schedule(
            now,
            ReviewInterval::Annually,
            None,
            Some(ReviewPeriod::OneWeek),
        );
        assert_eq!(schedule.opens_for_review, Some(ts("2025-06-01T00:00:00Z")));
        assert_eq!(schedule.next_due, Some(ts("2025-06-08T00:00:00Z")));
    }

    #[test]
    fn semiannually_adds_six_months() {
        let now = ts("2024-01-15T00:00:00Z");
        let schedule = next_schedule(now, ReviewInterval::Semiannually, None, None);
        assert_eq!(schedule.opens_for_review, Some(ts("2024-07-15T00:00:00Z")));
    }

    #[test]
    fn custom_uses_configured_days() {
        let now = ts("2024-01-15T00:00:00Z");
        let schedule = next_schedule(
            now,
            ReviewInterval::Custom,
            Some(10),
            Some(ReviewPeriod::ThreeWeeks),
        );
        assert_eq!(schedule.opens_for_review, Some(ts("2024-01-25T00:00:00Z")));
        assert_eq!(schedule.next_due, Some(ts("2024-02-15T00:00:00Z")));
    }

    #[test]
    fn custom_without_days_yields_null_schedule() {
        let now = ts("2024-01-15T00:00:00Z");
        let schedule = next_schedule(
            now,
            ReviewInterval::Custom,
            None,
            Some(ReviewPeriod::TwoWeeks),
        );
        assert!(schedule.opens_for_review.is_none());
        assert!(schedule.next_due.is_none());
    }

    #[test]
    fn missing_period_yields_null_due_date() {
        let now = ts("2024-01-15T00:00:00Z");
        let schedule = next_schedule(now, ReviewInterval::Monthly, None, None);
        assert!(schedule.opens_for_review.is_some());
        assert!(schedule.next_due.is_none());
    }

    #[test]
    fn one_month_period_uses_calendar_month() {
        let now = ts("2023-12-31T00:00:00Z");
        let schedule = next_schedule(
            now,
            ReviewInterval::Monthly,
            None,
            Some(ReviewPeriod::OneMonth),
        );
        assert_eq!(schedule.opens_for_review, Some(ts("2024-01-31T00:00:00Z")));
        assert_eq!(schedule.next_due, Some(ts("2024-02-29T00:00:00Z")));
    }
}
