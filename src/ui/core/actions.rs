use crate::controller::{Command, Outcome};

/// The screens of the panel, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Categories,
    Banners,
    Users,
}

impl Screen {
    pub const ALL: [Screen; 3] = [Screen::Categories, Screen::Banners, Screen::Users];

    /// Key used in the configuration file and by the resource schemas
    pub fn key(&self) -> &'static str {
        match self {
            Screen::Categories => "categories",
            Screen::Banners => "banners",
            Screen::Users => "users",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|screen| screen.key() == key)
    }

    pub fn index(&self) -> usize {
        match self {
            Screen::Categories => 0,
            Screen::Banners => 1,
            Screen::Users => 2,
        }
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    SwitchScreen(Screen),
    NextScreen,
    PreviousScreen,

    // Backend round trips
    Dispatch {
        screen: Screen,
        commands: Vec<Command>,
    },
    CommandFinished {
        screen: Screen,
        outcome: Outcome,
    },

    // Authentication
    SaveToken(String),

    // UI operations
    ShowDialog(DialogType),
    HideDialog,

    // App control
    Quit,
    None,
}

/// Application-level dialogs. Record dialogs belong to the screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogType {
    Help,
    Logs,
    SignIn,
}
