//! Terminal setup and the async event loop

use crate::api::AdminApi;
use crate::auth::CredentialStore;
use crate::config::Config;
use crate::logger::Logger;
use crate::resources;
use crate::ui::app_component::AppComponent;
use crate::ui::core::{actions::Action, Component, EventHandler, EventType};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::sync::Arc;
use std::time::Instant;

/// Run the admin panel until the user quits
pub async fn run_app(
    config: Config,
    api: Arc<dyn AdminApi>,
    credentials: CredentialStore,
    logger: Logger,
) -> anyhow::Result<()> {
    let schemas = resources::all()?;
    let mut app = AppComponent::new(&config, schemas, api, credentials, logger);
    let mut event_handler = EventHandler::new();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.start();
    let result = run_app_loop(&mut terminal, &mut app, &mut event_handler).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableBracketedPaste)?;
    terminal.show_cursor()?;

    result
}

async fn run_app_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppComponent,
    event_handler: &mut EventHandler,
) -> anyhow::Result<()> {
    let mut needs_render = true;

    loop {
        if needs_render {
            terminal.draw(|f| app.render(f, f.area()))?;
            needs_render = false;
        }

        let event = event_handler.next_event().await?;

        match event {
            EventType::Key(_) | EventType::Paste(_) | EventType::Resize(_, _) => {
                app.handle_event(event).await?;
                needs_render = true;
            }
            EventType::Tick => {
                let background_actions = app.process_background_actions();
                for action in background_actions {
                    let processed_action = app.update(action);
                    if let Action::Quit = app.handle_app_action(processed_action).await {
                        return Ok(());
                    }
                    needs_render = true;
                }

                if app.tick(Instant::now()) {
                    needs_render = true;
                }
            }
            EventType::Other => {}
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
