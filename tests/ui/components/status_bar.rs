use super::screen_text;
use panelist::constants::{LOADING_TEXT, STATUS_BAR_HINTS};
use panelist::notify::Notification;
use panelist::ui::components::StatusBar;
use ratatui::{backend::TestBackend, Terminal};

fn render(notification: Option<&Notification>, loading: bool) -> String {
    let mut terminal = Terminal::new(TestBackend::new(120, 1)).unwrap();
    terminal
        .draw(|f| StatusBar::render(f, f.area(), notification, loading))
        .unwrap();
    screen_text(&terminal)
}

#[test]
fn test_shows_hints_when_idle() {
    assert!(render(None, false).contains(STATUS_BAR_HINTS.split(" • ").next().unwrap()));
}

#[test]
fn test_shows_loading() {
    assert!(render(None, true).contains(LOADING_TEXT.trim_start_matches("⟳ ")));
}

#[test]
fn test_notification_wins_over_loading() {
    let notification = Notification::error("Error fetching banners");
    let text = render(Some(&notification), true);
    assert!(text.contains("Error fetching banners"));
    assert!(!text.contains("Loading"));
}
