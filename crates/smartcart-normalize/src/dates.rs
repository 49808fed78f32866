//! Feed timestamp parsing.
//!
//! The feeds publish local Israel time with no zone designator, in
//! `YYYY-MM-DD HH:MM:SS` form (dates and hours sometimes arrive in separate
//! fields). Values are parsed naive and interpreted uniformly as UTC so
//! window comparisons against the injected pass time stay internally
//! consistent and deterministic.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Parses a full feed timestamp, e.g. `"2025-05-25 10:24:00"`.
#[must_use]
pub fn parse_feed_datetime(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value.trim(), "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|dt| dt.and_utc())
}

/// Parses a date-only feed field, e.g. `"2025-05-01"`.
#[must_use]
pub fn parse_feed_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Parses an hour-only feed field, accepting `"HH:MM:SS"` and `"HH:MM"`.
#[must_use]
pub fn parse_feed_time(value: &str) -> Option<NaiveTime> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .ok()
}

/// Merges separate date and hour fields into one instant, falling back to
/// `default_time` when the hour field is empty or garbage.
///
/// Returns `(instant, hour_defaulted)`; `None` when the date itself is
/// unparseable.
#[must_use]
pub fn merge_date_and_hour(
    date: &str,
    hour: &str,
    default_time: NaiveTime,
) -> Option<(DateTime<Utc>, bool)> {
    let date = parse_feed_date(date)?;
    match parse_feed_time(hour) {
        Some(time) => Some((date.and_time(time).and_utc(), false)),
        None => Some((date.and_time(default_time).and_utc(), true)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parses_full_timestamp() {
        let dt = parse_feed_datetime("2025-05-25 10:24:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-05-25T10:24:00+00:00");
    }

    #[test]
    fn rejects_garbage_timestamp() {
        assert!(parse_feed_datetime("25/05/2025").is_none());
        assert!(parse_feed_datetime("").is_none());
    }

    #[test]
    fn parses_hour_with_and_without_seconds() {
        assert_eq!(parse_feed_time("23:59:00").unwrap().hour(), 23);
        assert_eq!(parse_feed_time("08:30").unwrap().minute(), 30);
        assert!(parse_feed_time("noon").is_none());
    }

    #[test]
    fn merge_uses_hour_when_present() {
        let midnight = NaiveTime::MIN;
        let (dt, defaulted) = merge_date_and_hour("2025-05-01", "08:00:00", midnight).unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-05-01T08:00:00+00:00");
        assert!(!defaulted);
    }

    #[test]
    fn merge_defaults_hour_when_missing() {
        let end_of_day = NaiveTime::from_hms_opt(23, 59, 0).unwrap();
        let (dt, defaulted) = merge_date_and_hour("2025-05-31", "", end_of_day).unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-05-31T23:59:00+00:00");
        assert!(defaulted);
    }

    #[test]
    fn merge_fails_on_unparseable_date() {
        assert!(merge_date_and_hour("soon", "08:00:00", NaiveTime::MIN).is_none());
    }
}
