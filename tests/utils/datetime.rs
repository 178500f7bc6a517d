use chrono::{Duration, Local, TimeZone};
use panelist::utils::datetime::*;

#[test]
fn test_parse_rfc3339() {
    let dt = parse_timestamp("2024-03-05T10:20:30Z").unwrap();
    let expected = chrono::Utc.with_ymd_and_hms(2024, 3, 5, 10, 20, 30).unwrap();
    assert_eq!(dt.with_timezone(&chrono::Utc), expected);
}

#[test]
fn test_parse_naive_formats() {
    assert!(parse_timestamp("2024-03-05T10:20:30.123").is_some());
    assert!(parse_timestamp("2024-03-05 10:20:30").is_some());
    assert!(parse_timestamp("2024-03-05").is_some());
    assert!(parse_timestamp("not a date").is_none());
}

#[test]
fn test_format_timestamp_uses_formats() {
    let formatted = format_timestamp("2024-03-05 10:20:30", "%d/%m/%Y", "%H:%M");
    assert_eq!(formatted, "05/03/2024 10:20");
}

#[test]
fn test_format_timestamp_falls_back_to_raw() {
    assert_eq!(format_timestamp("soon", DEFAULT_DATE_FORMAT, DEFAULT_TIME_FORMAT), "soon");
}

#[test]
fn test_format_human_datetime_today() {
    let now = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let formatted = format_human_datetime(&now, DEFAULT_DATE_FORMAT, DEFAULT_TIME_FORMAT);
    assert!(formatted.starts_with("today at "), "got {}", formatted);
}

#[test]
fn test_format_human_datetime_yesterday() {
    let yesterday = (Local::now() - Duration::days(1)).format("%Y-%m-%d").to_string();
    let formatted = format_human_datetime(&yesterday, DEFAULT_DATE_FORMAT, DEFAULT_TIME_FORMAT);
    assert_eq!(formatted, "yesterday at 00:00");
}

#[test]
fn test_format_human_datetime_days_ago() {
    let past = (Local::now() - Duration::days(5)).format("%Y-%m-%d").to_string();
    assert_eq!(
        format_human_datetime(&past, DEFAULT_DATE_FORMAT, DEFAULT_TIME_FORMAT),
        "5 days ago"
    );
}

#[test]
fn test_format_human_datetime_old_dates() {
    assert_eq!(
        format_human_datetime("2020-01-15", DEFAULT_DATE_FORMAT, DEFAULT_TIME_FORMAT),
        "2020-01-15"
    );
}
