//! Parsing of legacy check timestamps.

use chrono::{DateTime, NaiveDateTime};

use crate::config::CHECKED_AT_FORMAT;

/// Layouts accepted for the `date` value of a serialized `DateTime`.
const NAIVE_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parses a legacy date string into a naive date-time.
///
/// PHP writes `2019-11-14 10:00:00.000000`; ISO 8601 with a `T` separator and
/// RFC 3339 strings with an offset are accepted too. An offset is dropped
/// without converting, so the wall-clock fields are kept as written.
pub(crate) fn parse_legacy_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(raw, layout).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.naive_local())
        })
}

/// Renders a check timestamp in the canonical `YYYY-MM-DD HH:MM:SS` form.
pub(crate) fn format_checked_at(datetime: &NaiveDateTime) -> String {
    datetime.format(CHECKED_AT_FORMAT).to_string()
}
