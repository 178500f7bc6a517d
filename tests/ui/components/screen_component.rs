use super::{key, screen_text};
use crate::support::MockApi;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use panelist::api::{AdminApi, Page};
use panelist::config::Config;
use panelist::controller::{Command, Outcome, TableController};
use panelist::dialog::DialogState;
use panelist::resources;
use panelist::ui::components::ScreenComponent;
use panelist::ui::core::{Action, Component, Screen};
use ratatui::{backend::TestBackend, Terminal};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn banners_screen() -> ScreenComponent {
    let config = Config::default();
    let controller = TableController::new(resources::banners().unwrap(), 10, Duration::from_secs(6));
    let api: Arc<dyn AdminApi> = Arc::new(MockApi::default());
    let mut screen = ScreenComponent::new(Screen::Banners, controller, &config, api);

    let commands = screen.ensure_loaded();
    let Some(Command::Fetch { generation, .. }) = commands.first().cloned() else {
        panic!("expected an initial fetch");
    };
    screen.handle_outcome(Outcome::Fetched {
        generation,
        result: Ok(Page {
            records: crate::support::records(vec![
                json!({"id": 1, "banner_name": "Summer", "banner_title": "Big sale", "type": "promo", "status": "active", "image": "summer.png"}),
                json!({"id": 2, "banner_name": "Winter", "banner_title": "Cold deals", "type": "home", "status": "banned"}),
            ]),
            total: None,
            total_pages: None,
        }),
    });
    screen
}

fn draw(screen: &mut ScreenComponent) -> String {
    let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
    terminal.draw(|f| screen.render(f, f.area())).unwrap();
    screen_text(&terminal)
}

#[test]
fn test_first_visit_loads_once() {
    let mut screen = banners_screen();
    assert!(screen.ensure_loaded().is_empty());
    // Reload always fetches again
    assert!(!screen.reload().is_empty());
}

#[test]
fn test_renders_rows_and_verbatim_unknown_status() {
    let mut screen = banners_screen();
    let text = draw(&mut screen);
    assert!(text.contains("Summer"));
    assert!(text.contains("Winter"));
    assert!(text.contains("Active"));
    assert!(text.contains("banned"));
    assert!(text.contains("Page 1 of 1"));
}

#[test]
fn test_selection_moves_within_rows() {
    let mut screen = banners_screen();
    screen.handle_key_events(key(KeyCode::Char('j')));
    screen.handle_key_events(key(KeyCode::Char('j')));
    assert_eq!(screen.selected(), 1);
    screen.handle_key_events(key(KeyCode::Char('k')));
    assert_eq!(screen.selected(), 0);
}

#[test]
fn test_search_captures_input() {
    let mut screen = banners_screen();
    screen.handle_key_events(key(KeyCode::Char('/')));
    assert!(screen.is_capturing_input());
    for c in "wint".chars() {
        screen.handle_key_events(key(KeyCode::Char(c)));
    }
    assert_eq!(screen.controller().visible_records().len(), 1);

    screen.handle_key_events(key(KeyCode::Enter));
    assert!(!screen.is_search_editing());
    assert_eq!(screen.controller().filter().search, "wint");
}

#[test]
fn test_view_dialog_shows_image_url() {
    let mut screen = banners_screen();
    screen.handle_key_events(key(KeyCode::Enter));
    assert!(matches!(screen.controller().dialog(), DialogState::Viewing(_)));
    let text = draw(&mut screen);
    assert!(text.contains("http://backend.test/uploads/summer.png"));

    screen.handle_key_events(key(KeyCode::Char('e')));
    assert!(matches!(screen.controller().dialog(), DialogState::Editing(_)));
}

#[test]
fn test_form_typing_and_choice_cycling() {
    let mut screen = banners_screen();
    screen.handle_key_events(key(KeyCode::Char('a')));
    assert!(screen.is_capturing_input());

    for c in "Spring".chars() {
        screen.handle_key_events(key(KeyCode::Char(c)));
    }
    // banner_name, banner_title, image, type
    for _ in 0..3 {
        screen.handle_key_events(key(KeyCode::Tab));
    }
    screen.handle_key_events(key(KeyCode::Right));
    // Typing into a choice field is ignored
    screen.handle_key_events(key(KeyCode::Char('x')));

    let draft = screen.controller().dialog().draft().expect("create form");
    assert_eq!(draft.value("banner_name"), Some("Spring"));
    assert_eq!(draft.value("type"), Some("promo"));

    let text = draw(&mut screen);
    assert!(text.contains("New Banner"));
}

#[test]
fn test_form_submit_dispatches_mutation() {
    let mut screen = banners_screen();
    screen.handle_key_events(key(KeyCode::Char('a')));
    match screen.handle_key_events(key(KeyCode::Enter)) {
        Action::Dispatch { screen: target, commands } => {
            assert_eq!(target, Screen::Banners);
            assert!(matches!(commands.as_slice(), [Command::Mutate(_)]));
        }
        other => panic!("unexpected action {:?}", other),
    }
    // Keys other than Esc are ignored while the request is in flight
    screen.handle_key_events(key(KeyCode::Char('z')));
    assert_eq!(
        screen.controller().dialog().draft().and_then(|d| d.value("banner_name")),
        Some("")
    );
}

#[test]
fn test_upload_shortcut() {
    let mut screen = banners_screen();
    screen.handle_key_events(key(KeyCode::Char('e')));
    screen.handle_key_events(key(KeyCode::Tab));
    screen.handle_key_events(key(KeyCode::Tab));
    screen.handle_paste("/tmp/new.png\n");

    let ctrl_u = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
    match screen.handle_key_events(ctrl_u) {
        Action::Dispatch { commands, .. } => {
            assert!(matches!(commands.as_slice(), [Command::Upload { file, .. }] if file.ends_with("new.png")));
        }
        other => panic!("unexpected action {:?}", other),
    }
}

#[test]
fn test_delete_needs_confirmation() {
    let mut screen = banners_screen();
    screen.handle_key_events(key(KeyCode::Char('d')));
    assert!(matches!(screen.controller().dialog(), DialogState::Deleting { .. }));
    assert!(draw(&mut screen).contains("Are you sure you want to delete this banner?"));

    screen.handle_key_events(key(KeyCode::Char('n')));
    assert_eq!(screen.controller().dialog(), &DialogState::Closed);
}

#[test]
fn test_status_key_only_on_users() {
    let mut screen = banners_screen();
    screen.handle_key_events(key(KeyCode::Char('s')));
    assert_eq!(screen.controller().dialog(), &DialogState::Closed);
}

#[test]
fn test_empty_table_message() {
    let config = Config::default();
    let controller = TableController::new(resources::categories().unwrap(), 10, Duration::from_secs(6));
    let api: Arc<dyn AdminApi> = Arc::new(MockApi::default());
    let mut screen = ScreenComponent::new(Screen::Categories, controller, &config, api);

    assert!(draw(&mut screen).contains(panelist::constants::EMPTY_TABLE_TEXT));
    screen.handle_key_events(key(KeyCode::Char('e')));
    assert_eq!(screen.controller().dialog(), &DialogState::Closed);
    assert_eq!(
        screen.controller().notifications().current().map(|n| n.message.as_str()),
        Some(panelist::constants::ERROR_NO_SELECTION)
    );
}
