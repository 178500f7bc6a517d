//! Reusable UI components

pub mod cell;
pub mod dialog_component;
pub mod dialogs;
pub mod screen_component;
pub mod status_bar;

pub use dialog_component::DialogComponent;
pub use screen_component::ScreenComponent;
pub use status_bar::StatusBar;
