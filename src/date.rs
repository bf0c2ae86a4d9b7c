//! Publish date parsing and formatting.
//!
//! Front matter dates are free-form strings. The accepted shapes are:
//!
//! - `2024-06-01` (midnight UTC)
//! - `2024-06-01 10:30` / `2024-06-01 10:30:00` (UTC)
//! - `2024-06-01T10:30` / `2024-06-01T10:30:00` (UTC)
//! - RFC 3339: `2024-06-01T10:30:00Z`, `2024-06-01T10:30:00+02:00`
//!
//! Anything else is "no date": it sorts last and gets no sitemap `lastmod`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parse a front matter date. Returns `None` when unparseable.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.and_utc())
}

/// ISO-8601 UTC with millisecond precision: `2024-06-01T00:00:00.000Z`.
pub fn to_iso_string(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}
