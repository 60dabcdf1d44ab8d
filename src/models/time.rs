//! Tolerant timestamp parsing and UTC calendar helpers.
//!
//! All calendar math in this crate is UTC-only: the upstream feeds carry no
//! timezone discipline, and the derived structures (monthly buckets, lunar
//! phases) must be reproducible across machines and locales.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Julian day number of the Unix epoch (1970-01-01 00:00:00 UTC).
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Parse an ISO-ish timestamp string into milliseconds since the Unix epoch.
///
/// Accepted formats, tried in order:
/// - RFC 3339 (`2023-06-01T12:30:00Z`, with offset)
/// - `YYYY-MM-DDTHH:MM:SS` (assumed UTC)
/// - `YYYY-MM-DD HH:MM:SS` (assumed UTC)
/// - `YYYY-MM-DD` (midnight UTC)
///
/// Returns `None` for anything else; callers drop such records.
pub fn parse_timestamp_ms(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).timestamp_millis());
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN).and_utc().timestamp_millis());
    }
    None
}

/// Split a Unix-epoch-milliseconds timestamp into UTC (year, month) with the
/// month in `0..=11`, the indexing the monthly aggregator uses.
pub fn year_month(timestamp_ms: i64) -> Option<(i32, usize)> {
    let dt = DateTime::<Utc>::from_timestamp_millis(timestamp_ms)?;
    Some((dt.year(), dt.month0() as usize))
}

/// UTC calendar date of a Unix-epoch-milliseconds timestamp.
pub fn utc_date(timestamp_ms: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms).map(|dt| dt.date_naive())
}

/// Julian day of a calendar date at 00:00 UTC.
pub fn julian_day(date: NaiveDate) -> f64 {
    let unix_seconds = date.and_time(NaiveTime::MIN).and_utc().timestamp();
    unix_seconds as f64 / 86_400.0 + UNIX_EPOCH_JD
}
