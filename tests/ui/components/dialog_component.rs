use super::{key, screen_text};
use crossterm::event::KeyCode;
use panelist::constants::ERROR_TOKEN_EMPTY;
use panelist::logger::Logger;
use panelist::ui::components::DialogComponent;
use panelist::ui::core::{Action, Component, DialogType};
use ratatui::{backend::TestBackend, Terminal};

fn sign_in_dialog() -> DialogComponent {
    let mut dialog = DialogComponent::new();
    dialog.update(Action::ShowDialog(DialogType::SignIn));
    dialog
}

#[test]
fn test_show_and_hide() {
    let mut dialog = DialogComponent::new();
    assert!(!dialog.is_visible());

    assert!(matches!(dialog.update(Action::ShowDialog(DialogType::Help)), Action::None));
    assert!(dialog.is_showing(&DialogType::Help));

    assert!(matches!(dialog.handle_key_events(key(KeyCode::Esc)), Action::HideDialog));
    dialog.update(Action::HideDialog);
    assert!(!dialog.is_visible());
}

#[test]
fn test_unrelated_actions_pass_through() {
    let mut dialog = DialogComponent::new();
    assert!(matches!(dialog.update(Action::Quit), Action::Quit));
}

#[test]
fn test_sign_in_emits_trimmed_token() {
    let mut dialog = sign_in_dialog();
    dialog.insert_str("  abc.def ");
    match dialog.handle_key_events(key(KeyCode::Enter)) {
        Action::SaveToken(token) => assert_eq!(token, "abc.def"),
        other => panic!("unexpected action {:?}", other),
    }
}

#[test]
fn test_sign_in_rejects_empty_token() {
    let mut dialog = sign_in_dialog();
    assert!(matches!(dialog.handle_key_events(key(KeyCode::Enter)), Action::None));
    assert_eq!(dialog.error.as_deref(), Some(ERROR_TOKEN_EMPTY));

    // Typing clears the error
    dialog.handle_key_events(key(KeyCode::Char('x')));
    assert!(dialog.error.is_none());
}

#[test]
fn test_sign_in_editing_handles_multibyte_input() {
    let mut dialog = sign_in_dialog();
    dialog.insert_str("aé");
    dialog.handle_key_events(key(KeyCode::Left));
    dialog.handle_key_events(key(KeyCode::Char('b')));
    assert_eq!(dialog.input_buffer, "abé");

    dialog.handle_key_events(key(KeyCode::Right));
    dialog.handle_key_events(key(KeyCode::Backspace));
    assert_eq!(dialog.input_buffer, "ab");
}

#[test]
fn test_sign_in_never_renders_the_token() {
    let mut dialog = sign_in_dialog();
    dialog.insert_str("supersecret");

    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    terminal.draw(|f| dialog.render(f, f.area())).unwrap();
    let text = screen_text(&terminal);

    assert!(text.contains("API Token"));
    assert!(!text.contains("supersecret"));
    assert!(text.contains("•••••••••••"));
}

#[test]
fn test_logs_dialog_scroll_is_clamped() {
    let logger = Logger::new();
    for i in 0..5 {
        logger.log(format!("entry {}", i));
    }
    let mut dialog = DialogComponent::new();
    dialog.set_logger(logger);
    dialog.update(Action::ShowDialog(DialogType::Logs));
    dialog.handle_key_events(key(KeyCode::End));

    let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
    terminal.draw(|f| dialog.render(f, f.area())).unwrap();

    // Everything fits, so the offset falls back to the top
    assert_eq!(dialog.scroll_offset, 0);
    assert!(screen_text(&terminal).contains("entry 4"));
}
