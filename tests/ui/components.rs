#[path = "components/dialog_component.rs"]
mod dialog_component;

#[path = "components/screen_component.rs"]
mod screen_component;

#[path = "components/status_bar.rs"]
mod status_bar;

use ratatui::{backend::TestBackend, Terminal};

/// Everything drawn on the test terminal, row by row.
pub fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn key(code: crossterm::event::KeyCode) -> crossterm::event::KeyEvent {
    crossterm::event::KeyEvent::new(code, crossterm::event::KeyModifiers::NONE)
}
