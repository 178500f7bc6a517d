use super::common::{create_dialog_block, create_input_paragraph, create_instructions_paragraph, shortcuts};
use crate::constants::{DIALOG_TITLE_HELP, DIALOG_TITLE_LOGS, DIALOG_TITLE_SIGN_IN, HELP_TEXT, SIGN_IN_PROMPT};
use crate::logger::Logger;
use crate::ui::layout::LayoutManager;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
    Frame,
};

/// Returns the scroll offset clamped to the content.
pub fn render_help_dialog(
    f: &mut Frame,
    area: Rect,
    scroll_offset: usize,
    scrollbar_state: &mut ScrollbarState,
) -> usize {
    let (width, height) = LayoutManager::help_panel_dimensions(area.width, area.height);
    let help_area = LayoutManager::centered_rect(width, height, area);
    render_scrollable_text(f, help_area, DIALOG_TITLE_HELP, HELP_TEXT, scroll_offset, scrollbar_state)
}

pub fn render_logs_dialog(
    f: &mut Frame,
    area: Rect,
    logger: &Logger,
    scroll_offset: usize,
    scrollbar_state: &mut ScrollbarState,
) -> usize {
    let logs_area = LayoutManager::centered_rect(90, 90, area);
    let logs = logger.get_logs();
    let logs_content = if logs.is_empty() {
        "No logs available".to_string()
    } else {
        logs.join("\n")
    };
    render_scrollable_text(f, logs_area, DIALOG_TITLE_LOGS, &logs_content, scroll_offset, scrollbar_state)
}

/// Bordered text box with a scrollbar once the text overflows
fn render_scrollable_text(
    f: &mut Frame,
    area: Rect,
    title: &str,
    content: &str,
    scroll_offset: usize,
    scrollbar_state: &mut ScrollbarState,
) -> usize {
    f.render_widget(Clear, area);

    let lines: Vec<&str> = content.lines().collect();
    let total_lines = lines.len();
    let visible_height = area.height.saturating_sub(2) as usize;

    let max_scroll = total_lines.saturating_sub(visible_height);
    let clamped_offset = scroll_offset.min(max_scroll);

    *scrollbar_state = scrollbar_state
        .content_length(total_lines)
        .viewport_content_length(visible_height)
        .position(clamped_offset);

    let visible_text = lines
        .iter()
        .skip(clamped_offset)
        .take(visible_height)
        .copied()
        .collect::<Vec<_>>()
        .join("\n");

    let paragraph = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .title_alignment(Alignment::Center),
        )
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Left);

    f.render_widget(paragraph, area);

    if total_lines > visible_height {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"))
            .track_symbol(Some("│"))
            .thumb_symbol("▐")
            .style(Style::default().fg(Color::Gray))
            .thumb_style(Style::default().fg(Color::White));

        f.render_stateful_widget(scrollbar, area, scrollbar_state);
    }
    clamped_offset
}

/// Token prompt shown when a request found no credential
pub fn render_sign_in_dialog(f: &mut Frame, area: Rect, input_buffer: &str, error: Option<&str>) {
    let dialog_area = LayoutManager::centered_rect_lines(60, 11, area);
    f.render_widget(Clear, dialog_area);

    let main_block = create_dialog_block(DIALOG_TITLE_SIGN_IN, Color::Yellow);
    let inner_area = main_block.inner(dialog_area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Prompt
            Constraint::Length(3), // Token input
            Constraint::Length(1), // Error line
            Constraint::Length(1), // Instructions
        ])
        .split(inner_area);

    // Never echo the token itself
    let masked = "•".repeat(input_buffer.chars().count());

    let prompt = Paragraph::new(SIGN_IN_PROMPT)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    let error_line = Paragraph::new(error.unwrap_or_default().to_string())
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center);
    let instructions = create_instructions_paragraph(&[shortcuts::ENTER_SAVE, shortcuts::SEPARATOR, shortcuts::ESC_CANCEL]);

    f.render_widget(main_block, dialog_area);
    f.render_widget(prompt, chunks[0]);
    f.render_widget(create_input_paragraph(&masked, "API Token", true), chunks[1]);
    f.render_widget(error_line, chunks[2]);
    f.render_widget(instructions, chunks[3]);
}
