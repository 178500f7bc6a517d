#[path = "core/actions.rs"]
mod actions;

#[path = "core/event_handler.rs"]
mod event_handler;

#[path = "core/task_manager.rs"]
mod task_manager;
