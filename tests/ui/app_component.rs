use crate::support::MockApi;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use panelist::api::ApiError;
use panelist::auth::CredentialStore;
use panelist::config::Config;
use panelist::logger::Logger;
use panelist::resources;
use panelist::ui::app_component::AppComponent;
use panelist::ui::core::{Component, DialogType, EventType, Screen};
use ratatui::{backend::TestBackend, Terminal};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn press(code: KeyCode) -> EventType {
    EventType::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn credentials(name: &str) -> CredentialStore {
    let dir = std::env::temp_dir().join(format!("panelist-app-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    CredentialStore::new("PANELIST_APP_TEST_UNSET", Some(dir.join("token")))
}

fn app(api: Arc<MockApi>, name: &str) -> AppComponent {
    AppComponent::new(
        &Config::default(),
        resources::all().unwrap(),
        api,
        credentials(name),
        Logger::new(),
    )
}

/// Feed finished background work back into the app until nothing is running.
async fn settle(app: &mut AppComponent) {
    for _ in 0..100 {
        tokio::time::sleep(Duration::from_millis(10)).await;
        // Counted before draining: a task sends its outcome before it finishes
        let running = app.active_task_count();
        let actions = app.process_background_actions();
        if running == 0 && actions.is_empty() {
            return;
        }
        for action in actions {
            let action = app.update(action);
            app.handle_app_action(action).await;
        }
    }
    panic!("background tasks did not finish");
}

#[tokio::test]
async fn test_start_loads_default_screen() {
    let api = Arc::new(MockApi::with_records(vec![json!({"id": 1, "category_name": "Sports"})]));
    let mut app = app(api.clone(), "start");

    app.start();
    settle(&mut app).await;

    assert_eq!(app.active_screen(), Screen::Categories);
    let screen = app.screen(Screen::Categories).unwrap();
    assert_eq!(screen.controller().records().len(), 1);
    assert_eq!(api.list_calls(), 1);
}

#[tokio::test]
async fn test_switching_screens_loads_each_once() {
    let api = Arc::new(MockApi::default());
    let mut app = app(api.clone(), "switch");
    app.start();
    settle(&mut app).await;

    app.handle_event(press(KeyCode::Char('2'))).await.unwrap();
    assert_eq!(app.active_screen(), Screen::Banners);
    settle(&mut app).await;

    app.handle_event(press(KeyCode::BackTab)).await.unwrap();
    assert_eq!(app.active_screen(), Screen::Categories);
    app.handle_event(press(KeyCode::Tab)).await.unwrap();
    settle(&mut app).await;

    assert_eq!(api.list_calls(), 2);
}

#[tokio::test]
async fn test_global_keys_do_not_reach_an_open_form() {
    let api = Arc::new(MockApi::with_records(vec![json!({"id": 1})]));
    let mut app = app(api, "form");
    app.start();
    settle(&mut app).await;

    app.handle_event(press(KeyCode::Char('a'))).await.unwrap();
    app.handle_event(press(KeyCode::Char('q'))).await.unwrap();
    app.handle_event(press(KeyCode::Char('2'))).await.unwrap();

    assert!(!app.should_quit());
    assert_eq!(app.active_screen(), Screen::Categories);
    let draft = app
        .screen(Screen::Categories)
        .and_then(|s| s.controller().dialog().draft().cloned())
        .expect("create form open");
    assert_eq!(draft.value("category_name"), Some("q2"));
}

#[tokio::test]
async fn test_help_dialog_and_quit() {
    let api = Arc::new(MockApi::default());
    let mut app = app(api, "help");

    app.handle_event(press(KeyCode::Char('?'))).await.unwrap();
    assert!(app.dialog().is_showing(&DialogType::Help));

    // 'q' closes the dialog first
    app.handle_event(press(KeyCode::Char('q'))).await.unwrap();
    assert!(!app.dialog().is_visible());
    assert!(!app.should_quit());

    app.handle_event(EventType::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)))
        .await
        .unwrap();
    assert!(app.should_quit());
}

#[tokio::test]
async fn test_missing_token_prompts_and_saving_reloads() {
    let api = Arc::new(MockApi::default());
    api.queue_page(Err(ApiError::MissingCredential));
    let mut app = app(api.clone(), "sign-in");

    app.start();
    settle(&mut app).await;
    assert!(app.dialog().is_showing(&DialogType::SignIn));

    app.handle_event(EventType::Paste("fresh-token\n".to_string())).await.unwrap();
    app.handle_event(press(KeyCode::Enter)).await.unwrap();
    assert!(!app.dialog().is_visible());
    settle(&mut app).await;

    assert_eq!(api.list_calls(), 2);
    let screen = app.screen(Screen::Categories).unwrap();
    assert!(screen
        .controller()
        .notifications()
        .iter()
        .any(|n| n.message == panelist::constants::SUCCESS_TOKEN_SAVED));
    let token_file = std::env::temp_dir()
        .join(format!("panelist-app-sign-in-{}", std::process::id()))
        .join("token");
    assert_eq!(std::fs::read_to_string(token_file).unwrap(), "fresh-token");
}

#[tokio::test]
async fn test_render_smoke() {
    let api = Arc::new(MockApi::with_records(vec![json!({"id": 1, "category_name": "Sports", "status": "active"})]));
    let mut app = app(api, "render");
    app.start();
    settle(&mut app).await;
    app.handle_event(press(KeyCode::Char('G'))).await.unwrap();

    let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
    terminal.draw(|f| app.render(f, f.area())).unwrap();
    let text = super::ui_components::screen_text(&terminal);

    assert!(text.contains("Post Categories"));
    assert!(text.contains("Banners"));
    assert!(text.contains("Users"));
}
