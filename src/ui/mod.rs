//! Terminal user interface for Panelist
//!
//! One tab per managed resource, each backed by a table controller. Key
//! events flow through the component tree, API calls run in the background
//! and their outcomes come back as actions.

pub mod app_component;
pub mod components;
pub mod core;
pub mod layout;
pub mod renderer;

pub use layout::LayoutManager;
pub use renderer::run_app;
