//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Creates a new timestamp by adding the specified number of days.
    ///
    /// Negative values subtract days.
    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Creates a new timestamp by adding whole calendar months.
    ///
    /// Jan 31 + 1 month clamps to the last day of February, matching
    /// conventional date-picker semantics.
    pub fn add_months(&self, months: u32) -> Self {
        Self(self.0 + Months::new(months))
    }

    /// Creates a new timestamp by adding whole calendar years.
    pub fn add_years(&self, years: u32) -> Self {
        Self(self.0 + Months::new(years * 12))
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use std::thread::sleep;
    use std::time::Duration;

    fn ts(s: &str) -> Timestamp {
        let dt = DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc);
        Timestamp::from_datetime(dt)
    }

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let t = Timestamp::now();
        let after = Utc::now();

        assert!(t.as_datetime() >= &before);
        assert!(t.as_datetime() <= &after);
    }

    #[test]
    fn timestamp_is_before_works_correctly() {
        let t1 = Timestamp::now();
        sleep(Duration::from_millis(10));
        let t2 = Timestamp::now();

        assert!(t1.is_before(&t2));
        assert!(!t2.is_before(&t1));
    }

    #[test]
    fn timestamp_is_after_works_correctly() {
        let t1 = Timestamp::now();
        sleep(Duration::from_millis(10));
        let t2 = Timestamp::now();

        assert!(t2.is_after(&t1));
        assert!(!t1.is_after(&t2));
    }

    #[test]
    fn add_days_moves_forward() {
        let t = ts("2024-01-15T00:00:00Z");
        let later = t.add_days(14);
        assert_eq!(later.as_datetime().day(), 29);
        assert_eq!(later.as_datetime().month(), 1);
    }

    #[test]
    fn add_months_uses_calendar_arithmetic() {
        let t = ts("2024-01-15T00:00:00Z");
        let later = t.add_months(3);
        assert_eq!(later.as_datetime().year(), 2024);
        assert_eq!(later.as_datetime().month(), 4);
        assert_eq!(later.as_datetime().day(), 15);
    }

    #[test]
    fn add_months_clamps_end_of_month() {
        let t = ts("2024-01-31T00:00:00Z");
        let later = t.add_months(1);
        // 2024 is a leap year
        assert_eq!(later.as_datetime().month(), 2);
        assert_eq!(later.as_datetime().day(), 29);
    }

    #[test]
    fn add_years_keeps_calendar_date() {
        let t = ts("2024-03-01T12:00:00Z");
        let later = t.add_years(1);
        assert_eq!(later.as_datetime().year(), 2025);
        assert_eq!(later.as_datetime().month(), 3);
        assert_eq!(later.as_datetime().day(), 1);
    }

    #[test]
    fn timestamp_serializes_to_json() {
        let t = ts("2024-01-15T10:30:00Z");
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains("2024-01-15"));
    }

    #[test]
    fn timestamp_deserializes_from_json() {
        let json = "\"2024-01-15T10:30:00Z\"";
        let t: Timestamp = serde_json::from_str(json).unwrap();
        assert_eq!(t.as_datetime().year(), 2024);
    }

    #[test]
    fn timestamp_ordering_works() {
        let t1 = ts("2024-01-15T00:00:00Z");
        let t2 = ts("2024-01-16T00:00:00Z");
        assert!(t1 < t2);
        assert!(t2 > t1);
    }
}
