//! Text shown for a record field in tables and the view dialog.

use crate::config::DisplayConfig;
use crate::constants::MAX_CELL_CHARS;
use crate::record::{Record, Status};
use crate::schema::{FieldKind, FieldSpec};
use crate::utils::datetime;

pub fn format_field(field: &FieldSpec, record: &Record, display: &DisplayConfig) -> String {
    match &field.kind {
        FieldKind::Count => record.count(field.key).to_string(),
        FieldKind::Secret => "••••••".to_string(),
        FieldKind::Timestamp => record
            .text(field.key)
            .map(|value| datetime::format_timestamp(&value, &display.date_format, &display.time_format))
            .unwrap_or_else(|| "-".to_string()),
        FieldKind::Choice(_) if field.key == "status" => match record.text(field.key) {
            // Unknown statuses are shown verbatim
            Some(value) => Status::parse(&value)
                .map(|status| status.label().to_string())
                .unwrap_or(value),
            None => "-".to_string(),
        },
        FieldKind::Text | FieldKind::Image | FieldKind::Choice(_) | FieldKind::Lookup => {
            record.text(field.key).unwrap_or_else(|| "-".to_string())
        }
    }
}

/// Shorten `text` to `max` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

/// Table cell text: single line, bounded length.
pub fn table_cell(field: &FieldSpec, record: &Record, display: &DisplayConfig) -> String {
    let text = format_field(field, record, display).replace('\n', " ");
    truncate(&text, MAX_CELL_CHARS)
}
