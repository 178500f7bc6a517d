use crate::api::AdminApi;
use crate::auth::CredentialStore;
use crate::config::Config;
use crate::constants::{ERROR_TOKEN_SAVE_FAILED, SUCCESS_TOKEN_SAVED};
use crate::controller::{Command, TableController};
use crate::logger::Logger;
use crate::notify::Notification;
use crate::schema::ResourceSchema;
use crate::ui::components::{DialogComponent, ScreenComponent, StatusBar};
use crate::ui::core::{
    actions::{Action, DialogType, Screen},
    event_handler::EventType,
    task_manager::TaskManager,
    Component,
};
use crate::ui::layout::LayoutManager;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Tabs,
    Frame,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

pub struct AppComponent {
    // Component composition
    screens: Vec<ScreenComponent>,
    dialog: DialogComponent,

    active: Screen,

    // Services
    credentials: CredentialStore,
    task_manager: TaskManager,
    background_action_rx: mpsc::UnboundedReceiver<Action>,
    logger: Logger,

    should_quit: bool,
}

impl AppComponent {
    pub fn new(
        config: &Config,
        schemas: Vec<ResourceSchema>,
        api: Arc<dyn AdminApi>,
        credentials: CredentialStore,
        logger: Logger,
    ) -> Self {
        let (task_manager, background_action_rx) = TaskManager::new(Arc::clone(&api));

        let screens = Screen::ALL
            .into_iter()
            .zip(schemas)
            .map(|(screen, schema)| {
                let controller = TableController::new(schema, config.ui.page_size, config.ui.notification_ttl());
                ScreenComponent::new(screen, controller, config, Arc::clone(&api))
            })
            .collect();

        let mut dialog = DialogComponent::new();
        dialog.set_logger(logger.clone());

        Self {
            screens,
            dialog,
            active: Screen::from_key(&config.ui.default_screen).unwrap_or_default(),
            credentials,
            task_manager,
            background_action_rx,
            logger,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn active_screen(&self) -> Screen {
        self.active
    }

    pub fn screen(&self, screen: Screen) -> Option<&ScreenComponent> {
        self.screens.get(screen.index())
    }

    fn screen_mut(&mut self, screen: Screen) -> Option<&mut ScreenComponent> {
        self.screens.get_mut(screen.index())
    }

    pub fn dialog(&self) -> &DialogComponent {
        &self.dialog
    }

    /// Get the number of running API calls
    pub fn active_task_count(&self) -> usize {
        self.task_manager.task_count()
    }

    /// Load the startup screen
    pub fn start(&mut self) {
        self.logger.log(format!("AppComponent: starting on {}", self.active.key()));
        self.switch_to(self.active);
    }

    fn switch_to(&mut self, screen: Screen) {
        self.active = screen;
        let commands = match self.screen_mut(screen) {
            Some(component) => component.ensure_loaded(),
            None => Vec::new(),
        };
        self.run_commands(screen, commands);
    }

    /// Spawn API calls; a sign-in request opens the token prompt instead.
    fn run_commands(&mut self, screen: Screen, commands: Vec<Command>) {
        for command in commands {
            match command {
                Command::SignIn => {
                    if !self.dialog.is_showing(&DialogType::SignIn) {
                        self.logger.log("No credential available, asking for a token".to_string());
                        self.dialog.update(Action::ShowDialog(DialogType::SignIn));
                    }
                }
                command => {
                    self.task_manager.spawn_command(screen, command);
                }
            }
        }
    }

    /// Handle global keyboard shortcuts that aren't screen-specific
    fn handle_global_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') => {
                self.logger.log("Global key: 'q' - quitting application".to_string());
                Action::Quit
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.logger.log("Global key: Ctrl+C - quitting application".to_string());
                Action::Quit
            }
            KeyCode::Char('?') | KeyCode::Char('h') => Action::ShowDialog(DialogType::Help),
            KeyCode::Char('G') => Action::ShowDialog(DialogType::Logs),
            KeyCode::Char('1') => Action::SwitchScreen(Screen::Categories),
            KeyCode::Char('2') => Action::SwitchScreen(Screen::Banners),
            KeyCode::Char('3') => Action::SwitchScreen(Screen::Users),
            KeyCode::Tab => Action::NextScreen,
            KeyCode::BackTab => Action::PreviousScreen,
            _ => Action::None,
        }
    }

    /// Handle app-level actions that require business logic
    pub async fn handle_app_action(&mut self, action: Action) -> Action {
        match action {
            Action::Quit => {
                self.should_quit = true;
                Action::None
            }
            Action::SwitchScreen(screen) => {
                self.logger.log(format!("Switching to {}", screen.key()));
                self.switch_to(screen);
                Action::None
            }
            Action::NextScreen => {
                self.switch_to(self.active.next());
                Action::None
            }
            Action::PreviousScreen => {
                self.switch_to(self.active.previous());
                Action::None
            }
            Action::Dispatch { screen, commands } => {
                self.run_commands(screen, commands);
                Action::None
            }
            Action::CommandFinished { screen, outcome } => {
                self.logger.log(format!("{}: received {}", screen.key(), describe_outcome(&outcome)));
                let commands = match self.screen_mut(screen) {
                    Some(component) => component.handle_outcome(outcome),
                    None => Vec::new(),
                };
                self.run_commands(screen, commands);
                Action::None
            }
            Action::SaveToken(token) => {
                self.save_token(&token);
                Action::None
            }
            other => other,
        }
    }

    fn save_token(&mut self, token: &str) {
        let active = self.active;
        match self.credentials.save(token) {
            Ok(()) => {
                self.logger.log("Token saved, reloading".to_string());
                self.dialog.update(Action::HideDialog);
                let commands = match self.screen_mut(active) {
                    Some(component) => {
                        component.notify(Notification::success(SUCCESS_TOKEN_SAVED));
                        component.reload()
                    }
                    None => Vec::new(),
                };
                self.run_commands(active, commands);
            }
            Err(e) => {
                self.logger.log(format!("Failed to save token: {:#}", e));
                self.dialog.set_error(format!("{}: {}", ERROR_TOKEN_SAVE_FAILED, e));
            }
        }
    }

    /// Drain outcomes of finished API calls
    pub fn process_background_actions(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        while let Ok(action) = self.background_action_rx.try_recv() {
            actions.push(action);
        }

        let finished = self.task_manager.cleanup_finished_tasks();
        for (_, description) in finished {
            self.logger.log(format!("Background: finished {}", description));
        }

        actions
    }

    /// Expire notifications; returns true when something visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let active = self.active;
        match self.screen_mut(active) {
            Some(component) => {
                let before = component.controller().notifications().len();
                component.tick(now);
                before != component.controller().notifications().len()
            }
            None => false,
        }
    }

    /// Process an event through the component hierarchy
    pub async fn handle_event(&mut self, event_type: EventType) -> anyhow::Result<()> {
        let active = self.active;
        let action = match event_type {
            EventType::Key(key) => {
                if self.dialog.is_visible() {
                    // Dialog has priority when visible
                    self.dialog.handle_key_events(key)
                } else if self.screen(active).is_some_and(ScreenComponent::is_capturing_input) {
                    match self.screen_mut(active) {
                        Some(component) => component.handle_key_events(key),
                        None => Action::None,
                    }
                } else {
                    let global = self.handle_global_key(key);
                    if matches!(global, Action::None) {
                        match self.screen_mut(active) {
                            Some(component) => component.handle_key_events(key),
                            None => Action::None,
                        }
                    } else {
                        global
                    }
                }
            }
            EventType::Paste(text) => {
                if self.dialog.is_showing(&DialogType::SignIn) {
                    self.dialog.insert_str(text.trim());
                    Action::None
                } else {
                    match self.screen_mut(active) {
                        Some(component) => component.handle_paste(&text),
                        None => Action::None,
                    }
                }
            }
            EventType::Resize(_, _) | EventType::Tick | EventType::Other => Action::None,
        };

        let action = self.dialog.update(action);
        self.handle_app_action(action).await;
        Ok(())
    }
}

impl Component for AppComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        // This shouldn't be called directly - use handle_event instead
        self.handle_global_key(key)
    }

    fn update(&mut self, action: Action) -> Action {
        self.dialog.update(action)
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let chunks = LayoutManager::main_layout(rect);

        let titles: Vec<Line> = self
            .screens
            .iter()
            .enumerate()
            .map(|(i, screen)| Line::from(format!(" {} {} ", i + 1, screen.title())))
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.active.index())
            .style(Style::default().fg(Color::Gray))
            .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .divider("│");
        f.render_widget(tabs, chunks[0]);

        let active = self.active;
        if let Some(component) = self.screen_mut(active) {
            component.render(f, chunks[1]);
            let controller = component.controller();
            StatusBar::render(
                f,
                chunks[2],
                controller.notifications().current(),
                controller.is_loading(),
            );
        }

        // Render dialog on top if visible
        if self.dialog.is_visible() {
            self.dialog.render(f, rect);
        }
    }
}

fn describe_outcome(outcome: &crate::controller::Outcome) -> String {
    use crate::controller::Outcome;
    let status = |ok: bool| if ok { "ok" } else { "error" };
    match outcome {
        Outcome::Fetched { generation, result } => format!("fetch #{} ({})", generation, status(result.is_ok())),
        Outcome::Employees(result) => format!("employees ({})", status(result.is_ok())),
        Outcome::Mutated { kind, result, .. } => format!("{:?} ({})", kind, status(result.is_ok())),
        Outcome::Uploaded { result, .. } => format!("upload ({})", status(result.is_ok())),
    }
}
