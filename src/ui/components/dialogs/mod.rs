//! Dialog rendering functions

pub mod common;
pub mod record_dialogs;
pub mod system_dialogs;
