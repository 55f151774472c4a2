use chrono::{DateTime, SecondsFormat, Utc};

/// Current UTC time as stored in the database.
pub fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}

/// Fixed-width RFC 3339 (microseconds, `Z` suffix), so that lexical order of
/// stored timestamps matches chronological order.
pub fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}
