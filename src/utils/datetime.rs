//! Date and time utility functions
//!
//! The backend returns timestamps as RFC 3339 strings most of the time, but
//! older records carry naive `YYYY-MM-DD HH:MM:SS` values. Everything here
//! falls back to the raw string when it can't be parsed.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

/// Default date format for table cells
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
/// Default time format for table cells
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M";

/// Parse a backend timestamp into local time.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Local>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Local));
    }

    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, DEFAULT_DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    Some(
        Local
            .from_local_datetime(&naive)
            .single()
            .unwrap_or_else(|| Local.from_utc_datetime(&naive)),
    )
}

/// Format a timestamp for a table cell: `<date> <time>`.
pub fn format_timestamp(value: &str, date_format: &str, time_format: &str) -> String {
    match parse_timestamp(value) {
        Some(dt) => format!("{} {}", dt.format(date_format), dt.format(time_format)),
        None => value.to_string(),
    }
}

/// Format a timestamp relative to today, e.g. "today at 14:30" or "3 days ago".
pub fn format_human_datetime(value: &str, date_format: &str, time_format: &str) -> String {
    let Some(dt) = parse_timestamp(value) else {
        return value.to_string();
    };
    let today = Local::now().date_naive();
    let days = (today - dt.date_naive()).num_days();
    let time = dt.format(time_format);

    match days {
        0 => format!("today at {}", time),
        1 => format!("yesterday at {}", time),
        2..=30 => format!("{} days ago", days),
        _ => dt.format(date_format).to_string(),
    }
}
