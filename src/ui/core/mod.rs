//! Core UI functionality for Panelist.
//!
//! - [`actions`] - Action definitions and the screen enumeration
//! - [`component`] - Base component trait
//! - [`event_handler`] - Terminal event polling and ticks
//! - [`task_manager`] - Background API calls feeding results back as actions
//!
//! Components turn key events into [`Action`]s. Actions that need the
//! backend carry controller commands; the [`TaskManager`] runs them on the
//! tokio runtime and sends the outcomes back through a channel that the app
//! drains on every tick.

pub mod actions;
pub mod component;
pub mod event_handler;
pub mod task_manager;

pub use actions::{Action, DialogType, Screen};
pub use component::Component;
pub use event_handler::{EventHandler, EventType};
pub use task_manager::{TaskId, TaskManager};
