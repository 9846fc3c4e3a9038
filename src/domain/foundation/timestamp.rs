//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
///
/// Grant expiry is evaluated lazily: it is always a pure comparison of a
/// stored timestamp against a caller-supplied "now", never a timer.
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

    /// Creates a new timestamp by adding the specified number of hours.
    pub fn plus_hours(&self, hours: i64) -> Self {
        Self(self.0 + Duration::hours(hours))
    }

    /// Creates a new timestamp by subtracting the specified number of hours.
    pub fn minus_hours(&self, hours: i64) -> Self {
        Self(self.0 - Duration::hours(hours))
    }

    /// Creates a new timestamp by adding the specified number of seconds.
    pub fn plus_secs(&self, secs: i64) -> Self {
        Self(self.0 + Duration::seconds(secs))
    }

    /// Renders the timestamp as RFC 3339 for wire responses.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
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

    #[test]
    fn timestamp_ordering_works() {
        let ts = Timestamp::now();
        let later = ts.plus_hours(1);

        assert!(ts.is_before(&later));
        assert!(later.is_after(&ts));
        assert!(ts < later);
    }

    #[test]
    fn plus_and_minus_hours_are_inverse() {
        let ts = Timestamp::now();
        assert_eq!(ts.plus_hours(48).minus_hours(48), ts);
    }

    #[test]
    fn plus_secs_adds_seconds() {
        let ts = Timestamp::now();
        assert_eq!(ts.plus_secs(3600), ts.plus_hours(1));
    }

    #[test]
    fn timestamp_serializes_to_rfc3339_json() {
        let dt = DateTime::parse_from_rfc3339("2026-01-15T10:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let ts = Timestamp::from_datetime(dt);

        let json = serde_json::to_string(&ts).unwrap();
        assert!(json.contains("2026-01-15"));
    }
}
