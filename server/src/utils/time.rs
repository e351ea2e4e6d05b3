//! Time utility functions

use chrono::{DateTime, Utc};

/// Unix seconds of `0001-01-01T00:00:00Z`, the zero instant of a calendar
/// timestamp. Clients that send an unset date serialize to this value.
pub const ZERO_TIMESTAMP_SECS: i64 = -62_135_596_800;

/// Parse a strict RFC 3339 timestamp (`YYYY-MM-DDTHH:MM:SS[.frac](Z|±HH:MM)`).
///
/// Returns `None` for malformed input, a date/time separator other than `T`,
/// or a value equal to the zero instant.
pub fn parse_rfc3339_strict(value: &str) -> Option<DateTime<Utc>> {
    if value.as_bytes().get(10) != Some(&b'T') {
        return None;
    }

    let parsed = DateTime::parse_from_rfc3339(value).ok()?;
    let parsed = parsed.with_timezone(&Utc);
    if parsed.timestamp() == ZERO_TIMESTAMP_SECS && parsed.timestamp_subsec_nanos() == 0 {
        return None;
    }
    Some(parsed)
}

/// Current time as Unix seconds
pub fn unix_now() -> i64 {
    Utc::now().timestamp()
}
