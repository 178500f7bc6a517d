use crate::support::MockApi;
use panelist::api::ListQuery;
use panelist::controller::{Command, Outcome};
use panelist::ui::core::actions::{Action, Screen};
use panelist::ui::core::task_manager::TaskManager;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_spawned_command_reports_back() {
    let api = Arc::new(MockApi::with_records(vec![json!({"id": 1}), json!({"id": 2})]));
    let (mut manager, mut rx) = TaskManager::new(api.clone());

    manager.spawn_command(
        Screen::Banners,
        Command::Fetch {
            generation: 4,
            path: "/api/banner".to_string(),
            query: ListQuery::default(),
        },
    );
    assert_eq!(manager.task_count(), 1);

    let action = tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("task finished in time")
        .expect("channel open");
    match action {
        Action::CommandFinished {
            screen,
            outcome: Outcome::Fetched { generation, result },
        } => {
            assert_eq!(screen, Screen::Banners);
            assert_eq!(generation, 4);
            assert_eq!(result.unwrap().records.len(), 2);
        }
        other => panic!("unexpected action {:?}", other),
    }

    // The task may need a moment to be marked finished after sending
    tokio::time::sleep(Duration::from_millis(20)).await;
    let finished = manager.cleanup_finished_tasks();
    assert_eq!(finished.len(), 1);
    assert!(finished[0].1.contains("banners: fetch #4"));
    assert_eq!(manager.task_count(), 0);
}

#[tokio::test]
async fn test_cancel_all_tasks() {
    let api = Arc::new(MockApi::default());
    let (mut manager, _rx) = TaskManager::new(api);
    manager.spawn_command(Screen::Users, Command::FetchEmployees);
    manager.cancel_all_tasks();
    assert_eq!(manager.task_count(), 0);
}
