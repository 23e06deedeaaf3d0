use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Parse a backend timestamp.
///
/// Accepts RFC 3339 (`2025-06-01T10:15:00Z`, `...+02:00`) and the naive
/// ISO form Python's `isoformat()` writes (`2025-06-01T10:15:00.123456`),
/// which is read as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Parse a backend timestamp into Unix milliseconds
pub fn parse_timestamp_millis(value: &str) -> Option<i64> {
    parse_timestamp(value).map(|dt| dt.timestamp_millis())
}

/// Format a timestamp the way events are written (RFC 3339, millisecond precision)
pub fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}
