//! Event handling for crossterm terminal events
//!
//! Polls for key and paste events and maps them to [`Action`]s.

use super::app::{Action, Focus};
use super::Result;
use crate::style::Style;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

const PAGE: i16 = 10;

/// Terminal events the UI reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Paste(String),
}

/// Poll for the next event with timeout
pub fn poll_event(timeout: Duration) -> Result<Option<AppEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(AppEvent::Key(key))),
        Event::Paste(text) => Ok(Some(AppEvent::Paste(text))),
        _ => Ok(None),
    }
}

pub fn to_action(event: AppEvent, focus: Focus) -> Action {
    match event {
        AppEvent::Paste(text) if focus == Focus::Input => Action::Paste(text),
        AppEvent::Paste(_) => Action::Nothing,
        AppEvent::Key(key) => key_action(key, focus),
    }
}

fn key_action(key: KeyEvent, focus: Focus) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Bindings that work regardless of focus
    match key.code {
        KeyCode::Char('c') if ctrl => return Action::Quit,
        KeyCode::Esc => return Action::Quit,
        KeyCode::Tab | KeyCode::BackTab => return Action::ToggleFocus,
        KeyCode::PageUp => return Action::Scroll(-PAGE),
        KeyCode::PageDown => return Action::Scroll(PAGE),
        KeyCode::F(n) => {
            return Style::from_index(n as usize).map_or(Action::Nothing, Action::ApplyStyle)
        }
        KeyCode::Char('n') if ctrl => return Action::NewSession,
        _ => {}
    }

    match focus {
        Focus::Input => match key.code {
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => Action::Insert('\n'),
            KeyCode::Enter => Action::Generate,
            KeyCode::Backspace => Action::Backspace,
            KeyCode::Char('u') if ctrl => Action::ClearInput,
            KeyCode::Char(c) if !ctrl => Action::Insert(c),
            _ => Action::Nothing,
        },
        Focus::Results => match key.code {
            KeyCode::Enter | KeyCode::Char('g') => Action::Generate,
            KeyCode::Char(c @ '1'..='4') => c
                .to_digit(10)
                .and_then(|n| Style::from_index(n as usize))
                .map_or(Action::Nothing, Action::ApplyStyle),
            KeyCode::Up | KeyCode::Char('k') => Action::Scroll(-1),
            KeyCode::Down | KeyCode::Char('j') => Action::Scroll(1),
            KeyCode::Char('q') => Action::Quit,
            _ => Action::Nothing,
        },
    }
}
