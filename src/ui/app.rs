//! Application state and action handling for the TUI.

use crate::agent::Agent;
use crate::session::{Phase, Session};
use crate::style::Style;

/// Which pane receives plain key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Results,
}

/// Line shown at the bottom of the screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Busy(String),
    Error(String),
}

/// Everything a key press can ask for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Generate,
    ApplyStyle(Style),
    Insert(char),
    Paste(String),
    Backspace,
    ClearInput,
    NewSession,
    ToggleFocus,
    Scroll(i16),
    Quit,
    Nothing,
}

pub struct App {
    pub input: String,
    pub session: Session,
    pub focus: Focus,
    pub status: Status,
    /// Vertical scroll offset of the results pane
    pub scroll: u16,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            session: Session::new(),
            focus: Focus::Input,
            status: Status::Info("Paste a URL or article text, then press Enter.".to_string()),
            scroll: 0,
            should_quit: false,
        }
    }

    /// Mark a model-bound action as busy. Returns whether it will call out.
    pub fn begin(&mut self, action: &Action) -> bool {
        let message = match action {
            Action::Generate if !self.input.trim().is_empty() => "Summarizing...".to_string(),
            Action::ApplyStyle(style) if self.session.summary().is_some() => {
                format!("Rewriting summary: {}...", style.label())
            }
            _ => return false,
        };
        self.status = Status::Busy(message);
        true
    }

    pub async fn perform(&mut self, action: Action, agent: &Agent) {
        match action {
            Action::Generate => self.generate(agent).await,
            Action::ApplyStyle(style) => self.apply_style(agent, style).await,
            Action::Insert(c) => self.input.push(c),
            Action::Paste(text) => self.input.push_str(&text),
            Action::Backspace => {
                self.input.pop();
            }
            Action::ClearInput => self.input.clear(),
            Action::NewSession => {
                self.input.clear();
                self.session.reset();
                self.scroll = 0;
                self.focus = Focus::Input;
                self.status = Status::Info("New session.".to_string());
            }
            Action::ToggleFocus => {
                self.focus = match self.focus {
                    Focus::Input => Focus::Results,
                    Focus::Results => Focus::Input,
                };
            }
            Action::Scroll(delta) => {
                self.scroll = self.scroll.saturating_add_signed(delta);
            }
            Action::Quit => self.should_quit = true,
            Action::Nothing => {}
        }
    }

    async fn generate(&mut self, agent: &Agent) {
        self.status = match self.session.generate(agent, &self.input).await {
            Ok(Phase::Empty) => {
                let message = self
                    .session
                    .error()
                    .map(|e| e.message.clone())
                    .unwrap_or_default();
                Status::Error(message)
            }
            Ok(_) => Status::Info("Summary ready. Pick a style with F1-F4.".to_string()),
            Err(err) => Status::Error(err.to_string()),
        };
        self.scroll = 0;
    }

    async fn apply_style(&mut self, agent: &Agent, style: Style) {
        self.status = match self.session.apply_style(agent, style).await {
            Ok(_) => match self.session.last_style().map(|s| &s.result) {
                Some(Err(err)) => Status::Error(err.message.clone()),
                _ => Status::Info(format!("Styled: {}", style.label())),
            },
            Err(err) => Status::Error(err.to_string()),
        };
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Mock;

    #[tokio::test]
    async fn test_editing_input() {
        let agent = Mock::new().agent();
        let mut app = App::new();

        app.perform(Action::Insert('h'), &agent).await;
        app.perform(Action::Paste("ttps://x".to_string()), &agent).await;
        assert_eq!(app.input, "https://x");

        app.perform(Action::Backspace, &agent).await;
        assert_eq!(app.input, "https://");

        app.perform(Action::ClearInput, &agent).await;
        assert!(app.input.is_empty());
    }

    #[tokio::test]
    async fn test_begin_only_marks_real_calls_busy() {
        let mut app = App::new();
        assert!(!app.begin(&Action::Generate));
        assert!(!app.begin(&Action::ApplyStyle(Style::Playful)));
        assert!(!matches!(app.status, Status::Busy(_)));

        app.input = "text".to_string();
        assert!(app.begin(&Action::Generate));
        assert_eq!(app.status, Status::Busy("Summarizing...".to_string()));
    }

    #[tokio::test]
    async fn test_generate_then_style() {
        let mock = Mock::new();
        let agent = mock.agent();
        let mut app = App::new();
        app.input = "Some article".to_string();
        app.scroll = 7;

        app.perform(Action::Generate, &agent).await;
        assert_eq!(app.session.phase(), Phase::Summarized);
        assert_eq!(app.scroll, 0);
        assert!(matches!(app.status, Status::Info(_)));

        app.perform(Action::ApplyStyle(Style::Eli5), &agent).await;
        assert_eq!(app.session.phase(), Phase::Styled);
    }

    #[tokio::test]
    async fn test_style_before_summary_reports_error() {
        let mock = Mock::new();
        let mut app = App::new();

        app.perform(Action::ApplyStyle(Style::Playful), &mock.agent()).await;

        assert!(matches!(app.status, Status::Error(_)));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_new_session_clears_everything() {
        let mock = Mock::new();
        let agent = mock.agent();
        let mut app = App::new();
        app.input = "Some article".to_string();
        app.perform(Action::Generate, &agent).await;
        app.perform(Action::ToggleFocus, &agent).await;

        app.perform(Action::NewSession, &agent).await;

        assert!(app.input.is_empty());
        assert_eq!(app.session.phase(), Phase::Empty);
        assert_eq!(app.focus, Focus::Input);
    }

    #[tokio::test]
    async fn test_scroll_saturates() {
        let agent = Mock::new().agent();
        let mut app = App::new();
        app.perform(Action::Scroll(-10), &agent).await;
        assert_eq!(app.scroll, 0);
        app.perform(Action::Scroll(5), &agent).await;
        assert_eq!(app.scroll, 5);
    }
}
