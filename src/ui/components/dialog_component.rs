//! Application-level modal dialogs: help, logs and the sign-in prompt.
//!
//! Record dialogs are drawn by the screens themselves since their state
//! belongs to each screen's controller.

use crate::constants::ERROR_TOKEN_EMPTY;
use crate::logger::Logger;
use crate::ui::components::dialogs::system_dialogs;
use crate::ui::core::{
    actions::{Action, DialogType},
    Component,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Rect, widgets::ScrollbarState, Frame};

pub struct DialogComponent {
    pub dialog_type: Option<DialogType>,
    pub input_buffer: String,
    pub cursor_position: usize,
    pub error: Option<String>,
    // Scrolling support for long content dialogs
    pub scroll_offset: usize,
    pub scrollbar_state: ScrollbarState,
    logger: Option<Logger>,
}

impl Default for DialogComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogComponent {
    pub fn new() -> Self {
        Self {
            dialog_type: None,
            input_buffer: String::new(),
            cursor_position: 0,
            error: None,
            scroll_offset: 0,
            scrollbar_state: ScrollbarState::new(0),
            logger: None,
        }
    }

    pub fn set_logger(&mut self, logger: Logger) {
        self.logger = Some(logger);
    }

    pub fn is_visible(&self) -> bool {
        self.dialog_type.is_some()
    }

    pub fn is_showing(&self, dialog_type: &DialogType) -> bool {
        self.dialog_type.as_ref() == Some(dialog_type)
    }

    /// Show a validation error under the sign-in input
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    fn clear_dialog(&mut self) {
        self.dialog_type = None;
        self.input_buffer.clear();
        self.cursor_position = 0;
        self.error = None;
        self.scroll_offset = 0;
        self.scrollbar_state = ScrollbarState::new(0);
    }

    fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1);
    }

    fn page_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(10);
    }

    fn page_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(10);
    }

    /// Byte index of the cursor, which counts characters
    fn byte_position(&self) -> usize {
        self.input_buffer
            .chars()
            .take(self.cursor_position)
            .map(|ch| ch.len_utf8())
            .sum()
    }

    pub fn insert_str(&mut self, text: &str) {
        for c in text.chars().filter(|c| !c.is_control()) {
            let byte_pos = self.byte_position();
            self.input_buffer.insert(byte_pos, c);
            self.cursor_position += 1;
        }
    }

    fn handle_scroll_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::PageDown => self.page_down(),
            KeyCode::Home => self.scroll_offset = 0,
            // Clamped to the content on the next render
            KeyCode::End => self.scroll_offset = usize::MAX,
            _ => return false,
        }
        true
    }

    fn handle_sign_in_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => Action::HideDialog,
            KeyCode::Enter => {
                let token = self.input_buffer.trim().to_string();
                if token.is_empty() {
                    self.set_error(ERROR_TOKEN_EMPTY);
                    Action::None
                } else {
                    Action::SaveToken(token)
                }
            }
            KeyCode::Backspace => {
                if self.cursor_position > 0 {
                    self.cursor_position -= 1;
                    let byte_pos = self.byte_position();
                    self.input_buffer.remove(byte_pos);
                }
                Action::None
            }
            KeyCode::Left => {
                self.cursor_position = self.cursor_position.saturating_sub(1);
                Action::None
            }
            KeyCode::Right => {
                if self.cursor_position < self.input_buffer.chars().count() {
                    self.cursor_position += 1;
                }
                Action::None
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input_buffer.clear();
                self.cursor_position = 0;
                Action::None
            }
            KeyCode::Char(c) => {
                self.insert_str(&c.to_string());
                self.error = None;
                Action::None
            }
            _ => Action::None,
        }
    }
}

impl Component for DialogComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match &self.dialog_type {
            None => Action::None,
            Some(DialogType::Help) => match key.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Action::HideDialog,
                _ => {
                    self.handle_scroll_key(key);
                    Action::None
                }
            },
            Some(DialogType::Logs) => match key.code {
                KeyCode::Esc | KeyCode::Char('G') | KeyCode::Char('q') => Action::HideDialog,
                _ => {
                    self.handle_scroll_key(key);
                    Action::None
                }
            },
            Some(DialogType::SignIn) => self.handle_sign_in_key(key),
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::ShowDialog(dialog_type) => {
                self.clear_dialog();
                self.dialog_type = Some(dialog_type);
                Action::None
            }
            Action::HideDialog => {
                self.clear_dialog();
                Action::None
            }
            _ => action,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        match self.dialog_type.clone() {
            None => {}
            Some(DialogType::Help) => {
                self.scroll_offset =
                    system_dialogs::render_help_dialog(f, rect, self.scroll_offset, &mut self.scrollbar_state);
            }
            Some(DialogType::Logs) => {
                let logger = self.logger.clone().unwrap_or_default();
                self.scroll_offset =
                    system_dialogs::render_logs_dialog(f, rect, &logger, self.scroll_offset, &mut self.scrollbar_state);
            }
            Some(DialogType::SignIn) => {
                system_dialogs::render_sign_in_dialog(f, rect, &self.input_buffer, self.error.as_deref());
            }
        }
    }
}
