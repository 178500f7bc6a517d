//! Constants used throughout the application
//!
//! User-visible messages, help text and layout values live here so the
//! controller and the UI agree on wording.

// Success Messages
pub const SUCCESS_IMAGE_UPLOADED: &str = "Image uploaded successfully";
pub const SUCCESS_TOKEN_SAVED: &str = "✅ Token saved, reloading";

// Error Messages
pub const ERROR_EMPLOYEES_FETCH: &str = "Error fetching employees";
pub const ERROR_TOKEN_SAVE_FAILED: &str = "❌ Failed to save token";
pub const ERROR_TOKEN_EMPTY: &str = "❌ Token cannot be empty";
pub const ERROR_NO_SELECTION: &str = "No row selected";

// UI Messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
pub const DIALOG_TITLE_LOGS: &str = "🔍 Logs - Press 'Esc', 'G' or 'q' to close";
pub const DIALOG_TITLE_HELP: &str = "❓ Help - Press 'Esc' or '?' to close";
pub const DIALOG_TITLE_SIGN_IN: &str = "🔑 Sign in";
pub const SIGN_IN_PROMPT: &str = "No token found, please paste an API token to continue";
pub const LOADING_TEXT: &str = "⟳ Loading...";
pub const EMPTY_TABLE_TEXT: &str = "No records";
pub const UPLOADING_TEXT: &str = "Uploading...";
pub const SUBMITTING_TEXT: &str = "Saving...";

pub const STATUS_BAR_HINTS: &str =
    "Enter: view • e: edit • a: new • d: delete • s: status • /: search • ?: help • q: quit";

/// Key binding reference shown by the help dialog.
pub const HELP_TEXT: &str = "\
Screens
  1 / 2 / 3       Categories / Banners / Users
  Tab, Shift+Tab  Next / previous screen

Table
  j/k, Up/Down    Move selection
  n / p           Next / previous page
  PageDown/Up     Next / previous page
  z               Cycle rows per page
  f               Cycle status filter
  t               Cycle type filter
  /               Edit search (Enter applies, Esc leaves)
  r               Reload
  Enter or v      View record
  e               Edit record
  a               New record
  d               Delete record
  s               Change user status

Dialogs
  Tab, Shift+Tab  Next / previous field
  Left/Right      Change a choice field
  Ctrl+U          Upload the file path typed in an image field
  Enter           Save / confirm
  Esc             Close without saving

Other
  G               Logs
  ?               This help
  q, Ctrl+C       Quit";

// UI Layout Constants
/// Height of the filter bar above the table
pub const FILTER_BAR_HEIGHT: u16 = 3;
/// Height of the pager footer below the table
pub const PAGER_HEIGHT: u16 = 1;
/// Minimum width of a table column
pub const MIN_COLUMN_WIDTH: u16 = 6;
/// Maximum characters of a cell before truncation
pub const MAX_CELL_CHARS: usize = 48;
