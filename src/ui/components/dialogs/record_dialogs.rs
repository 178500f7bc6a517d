//! Rendering of the per-record dialogs: view, create/edit form, delete
//! confirmation and status change.

use super::common::{
    create_dialog_block, create_input_paragraph, create_instructions_paragraph, create_selection_paragraph, shortcuts,
};
use crate::config::DisplayConfig;
use crate::constants::{SUBMITTING_TEXT, UPLOADING_TEXT};
use crate::dialog::{Draft, StatusChange, StatusFocus};
use crate::record::Record;
use crate::schema::{FieldKind, FormMode, ResourceSchema};
use crate::ui::components::cell::format_field;
use crate::ui::layout::LayoutManager;
use crate::utils::datetime;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

/// Height of one form field (borders + content)
const FIELD_HEIGHT: u16 = 3;

pub fn render_view_dialog(
    f: &mut Frame,
    area: Rect,
    schema: &ResourceSchema,
    record: &Record,
    image_url: Option<String>,
    display: &DisplayConfig,
) {
    let label_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let mut lines = vec![Line::from(vec![
        Span::styled("ID: ", label_style),
        Span::raw(record.id().to_string()),
    ])];

    for field in schema.fields.iter().filter(|f| f.kind != FieldKind::Secret) {
        let value = match field.kind {
            FieldKind::Timestamp => record
                .text(field.key)
                .map(|v| datetime::format_human_datetime(&v, &display.date_format, &display.time_format))
                .unwrap_or_else(|| "-".to_string()),
            _ => format_field(field, record, display),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", field.label), label_style),
            Span::raw(value),
        ]));
    }

    if let Some(updated) = record.updated_at() {
        lines.push(Line::from(vec![
            Span::styled("Updated At: ", label_style),
            Span::raw(datetime::format_human_datetime(
                &updated,
                &display.date_format,
                &display.time_format,
            )),
        ]));
    }
    if let Some(url) = image_url {
        lines.push(Line::from(vec![
            Span::styled("Image URL: ", label_style),
            Span::styled(url, Style::default().fg(Color::Blue)),
        ]));
    }

    let height = lines.len() as u16 + 5;
    let dialog_area = LayoutManager::centered_rect_lines(70, height, area);
    f.render_widget(Clear, dialog_area);

    let title = format!(" {} ", capitalize_words(schema.singular));
    let main_block = create_dialog_block(title, Color::Cyan);
    let inner_area = main_block.inner(dialog_area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner_area);

    let body = Paragraph::new(lines).wrap(Wrap { trim: false });
    let instructions = create_instructions_paragraph(&[shortcuts::E_EDIT, shortcuts::SEPARATOR, shortcuts::ESC_CLOSE]);

    f.render_widget(main_block, dialog_area);
    f.render_widget(body, chunks[0]);
    f.render_widget(instructions, chunks[1]);
}

pub fn render_form_dialog(f: &mut Frame, area: Rect, schema: &ResourceSchema, draft: &Draft, employees: &[String]) {
    let field_count = draft.len() as u16;
    let height = field_count * FIELD_HEIGHT + 6;
    let dialog_area = LayoutManager::centered_rect_lines(65, height, area);
    f.render_widget(Clear, dialog_area);

    let verb = match draft.mode {
        FormMode::Create => "New",
        FormMode::Edit => "Edit",
    };
    let title = format!(" {} {} ", verb, capitalize_words(schema.singular));
    let main_block = create_dialog_block(title, Color::Cyan);
    let inner_area = main_block.inner(dialog_area);

    let mut constraints: Vec<Constraint> = (0..field_count).map(|_| Constraint::Length(FIELD_HEIGHT)).collect();
    constraints.push(Constraint::Length(1)); // Progress line
    constraints.push(Constraint::Length(1)); // Instructions
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(constraints)
        .split(inner_area);

    f.render_widget(main_block, dialog_area);

    for (index, key) in draft.keys().enumerate() {
        let Some(field) = schema.field(key) else {
            continue;
        };
        let focused = index == draft.focus;
        let value = draft.value(key).unwrap_or_default();

        let widget = match &field.kind {
            FieldKind::Choice(_) => create_selection_paragraph(value, field.label, focused),
            FieldKind::Lookup if !employees.is_empty() => {
                let shown = if value.is_empty() { "(none)" } else { value };
                create_selection_paragraph(shown, field.label, focused)
            }
            FieldKind::Secret => {
                let masked = "•".repeat(value.chars().count());
                create_input_paragraph(&masked, field.label, focused)
            }
            FieldKind::Image => {
                let current = if value.is_empty() { "none" } else { value };
                let title = format!("{} (current: {}) - file path", field.label, current);
                create_input_paragraph(&draft.upload_path, &title, focused)
            }
            _ => create_input_paragraph(value, field.label, focused),
        };
        f.render_widget(widget, chunks[index]);
    }

    let progress = if draft.uploading {
        UPLOADING_TEXT
    } else if draft.submitting {
        SUBMITTING_TEXT
    } else {
        ""
    };
    f.render_widget(
        Paragraph::new(progress)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center),
        chunks[field_count as usize],
    );

    let mut instructions = vec![shortcuts::TAB_NEXT, shortcuts::SEPARATOR, shortcuts::ARROWS_CHOOSE];
    if schema.image_field().is_some() {
        instructions.push(shortcuts::SEPARATOR);
        instructions.push(shortcuts::CTRL_U_UPLOAD);
    }
    instructions.extend([
        shortcuts::SEPARATOR,
        shortcuts::ENTER_SAVE,
        shortcuts::SEPARATOR,
        shortcuts::ESC_CANCEL,
    ]);
    f.render_widget(
        create_instructions_paragraph(&instructions),
        chunks[field_count as usize + 1],
    );
}

pub fn render_delete_dialog(f: &mut Frame, area: Rect, singular: &str, submitting: bool) {
    let dialog_area = LayoutManager::centered_rect_lines(50, 7, area);
    f.render_widget(Clear, dialog_area);

    let block = create_dialog_block(" ⚠ Confirm Delete ", Color::Red);
    let inner_area = block.inner(dialog_area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(1), Constraint::Length(1)])
        .split(inner_area);

    let message = Paragraph::new(format!("Are you sure you want to delete this {}?", singular))
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    let progress = Paragraph::new(if submitting { SUBMITTING_TEXT } else { "" })
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center);
    let instructions =
        create_instructions_paragraph(&[shortcuts::ENTER_CONFIRM, shortcuts::SEPARATOR, shortcuts::ESC_CANCEL]);

    f.render_widget(block, dialog_area);
    f.render_widget(message, chunks[0]);
    f.render_widget(progress, chunks[1]);
    f.render_widget(instructions, chunks[2]);
}

pub fn render_status_dialog(f: &mut Frame, area: Rect, change: &StatusChange) {
    let dialog_area = LayoutManager::centered_rect_lines(50, 12, area);
    f.render_widget(Clear, dialog_area);

    let block = create_dialog_block(" Change User Status ", Color::Magenta);
    let inner_area = block.inner(dialog_area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner_area);

    let status = create_selection_paragraph(change.status.label(), "Status", change.focus == StatusFocus::Status);
    let duration = create_input_paragraph(&change.duration, "Duration", change.focus == StatusFocus::Duration);
    let progress = Paragraph::new(if change.submitting { SUBMITTING_TEXT } else { "" })
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center);
    let instructions = create_instructions_paragraph(&[
        shortcuts::TAB_NEXT,
        shortcuts::SEPARATOR,
        shortcuts::ARROWS_CHOOSE,
        shortcuts::SEPARATOR,
        shortcuts::ENTER_SAVE,
        shortcuts::SEPARATOR,
        shortcuts::ESC_CANCEL,
    ]);

    f.render_widget(block, dialog_area);
    f.render_widget(status, chunks[0]);
    f.render_widget(duration, chunks[1]);
    f.render_widget(progress, chunks[2]);
    f.render_widget(instructions, chunks[3]);
}

fn capitalize_words(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
