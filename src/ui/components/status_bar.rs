//! Status bar component

use crate::constants::{LOADING_TEXT, STATUS_BAR_HINTS};
use crate::notify::{Notification, Severity};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::Paragraph,
    Frame,
};

/// Status bar component
pub struct StatusBar;

impl StatusBar {
    /// Render the newest notification, the loading indicator, or key hints
    pub fn render(f: &mut Frame, area: Rect, notification: Option<&Notification>, loading: bool) {
        let (text, style) = match notification {
            Some(notification) => {
                let (icon, color) = match notification.severity {
                    Severity::Success => ("✅", Color::Green),
                    Severity::Info => ("ℹ", Color::Blue),
                    Severity::Error => ("❌", Color::Red),
                };
                (
                    format!("{} {}", icon, notification.message),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )
            }
            None if loading => (LOADING_TEXT.to_string(), Style::default().fg(Color::Yellow)),
            None => (STATUS_BAR_HINTS.to_string(), Style::default().fg(Color::Gray)),
        };

        let status_bar = Paragraph::new(text).alignment(Alignment::Center).style(style);
        f.render_widget(status_bar, area);
    }
}
