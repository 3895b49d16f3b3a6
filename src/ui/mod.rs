//! TUI module using ratatui.
//!
//! One screen: the input area, a Generate action, the four style actions
//! once a summary exists, and the artifact panels below them. Model calls are
//! awaited inline, so the screen shows a busy status and then blocks until
//! the call completes.

pub mod app;
pub mod event;
pub mod render;
pub mod terminal;

pub use app::{Action, App, Focus, Status};

use crate::agent::Agent;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UiError {
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, UiError>;

/// Run the interactive UI until the user quits
pub async fn run(agent: Agent) -> Result<()> {
    let _guard = terminal::TerminalGuard::new();
    let mut terminal = terminal::init()?;

    let mut app = App::new();
    tracing::info!("ui started");

    while !app.should_quit {
        terminal.draw(|frame| render::draw(frame, &app))?;

        let action = match event::poll_event(Duration::from_millis(250))? {
            Some(event) => event::to_action(event, app.focus),
            None => continue,
        };

        if app.begin(&action) {
            // Show the busy status before blocking on the model
            terminal.draw(|frame| render::draw(frame, &app))?;
        }
        app.perform(action, &agent).await;
    }

    tracing::info!("ui stopped");
    Ok(())
}
