//! Layout and rendering
//!
//! ```text
//! ┌ RECAP  [summarized]  Article title ───────────────────────────────────┐
//! └ [Tab] focus  [Ctrl+N] new  [Ctrl+U] clear  [Esc] quit ───────────────┘
//! ┌ Article URL or text ──────────────────────────────────────────────────┐
//! ┌ Actions ──────────────────────────────────────────────────────────────┐
//! │ [Enter] Generate Summary   [F1] Explain Like I'm 5  [F2] ...          │
//! ┌ Results ──────────────────────────────────────────────────────────────┐
//! │ Original Summary / Detected Content Type / Analysis / Styled Summary  │
//! status line
//! ```

use super::app::{App, Focus, Status};
use crate::session::{ArtifactError, Phase, Session};
use crate::style::Style as RewriteStyle;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(6), // Input
            Constraint::Length(3), // Actions
            Constraint::Min(5),    // Results
            Constraint::Length(1), // Status
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    render_input(frame, chunks[1], app);
    render_actions(frame, chunks[2], app);
    render_results(frame, chunks[3], app);
    render_status(frame, chunks[4], app);
}

fn focused_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let phase = match app.session.phase() {
        Phase::Empty => "no summary",
        Phase::Summarized => "summarized",
        Phase::Styled => "styled",
    };

    let mut spans = vec![
        Span::styled(
            "RECAP",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(format!("[{phase}]"), Style::default().fg(Color::Gray)),
    ];
    if let Some(title) = app.session.title() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            title.to_string(),
            Style::default().add_modifier(Modifier::ITALIC),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title_bottom(" [Tab] focus  [Ctrl+N] new  [Ctrl+U] clear  [Esc] quit "),
    );
    frame.render_widget(header, area);
}

fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Input;
    let mut text = app.input.clone();
    if focused {
        text.push('▏');
    }

    let input = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focused_border(focused))
                .title(" Article URL or text "),
        );
    frame.render_widget(input, area);
}

fn render_actions(frame: &mut Frame, area: Rect, app: &App) {
    let key = Style::default().fg(Color::Yellow);
    let mut spans = vec![
        Span::styled("[Enter]", key),
        Span::raw(" Generate Summary"),
    ];

    // Style actions appear only once there is a summary to restyle
    if app.session.summary().is_some() {
        for (i, style) in RewriteStyle::ALL.iter().enumerate() {
            spans.push(Span::raw("   "));
            spans.push(Span::styled(format!("[F{}]", i + 1), key));
            spans.push(Span::raw(format!(" {}", style.label())));
        }
    }

    let actions = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Actions "));
    frame.render_widget(actions, area);
}

fn render_results(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Results;
    let results = Paragraph::new(result_lines(&app.session))
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focused_border(focused))
                .title(" Results "),
        );
    frame.render_widget(results, area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let (text, color) = match &app.status {
        Status::Info(text) => (text.as_str(), Color::Gray),
        Status::Busy(text) => (text.as_str(), Color::Cyan),
        Status::Error(text) => (text.as_str(), Color::Red),
    };
    frame.render_widget(
        Paragraph::new(Span::styled(text.to_string(), Style::default().fg(color))),
        area,
    );
}

/// The artifact panels, in display order
pub fn result_lines(session: &Session) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(err) = session.error() {
        section(&mut lines, "⚠ Could not summarize");
        lines.push(error_line(&err.message));
        return lines;
    }

    let Some(summary) = session.summary() else {
        lines.push(Line::styled(
            "Nothing yet. Paste a URL or article text and press Enter.",
            Style::default().fg(Color::DarkGray),
        ));
        return lines;
    };

    section(&mut lines, "📄 Original Summary");
    text_lines(&mut lines, summary);

    if let Some(content_type) = session.content_type() {
        section(&mut lines, "📚 Detected Content Type");
        artifact_lines(&mut lines, content_type.as_ref().map(|r| r.justification.as_str()));
    }

    if let Some(analysis) = session.analysis() {
        section(&mut lines, "🧠 Analysis of Messaging, Biases, and Blind Spots");
        artifact_lines(&mut lines, analysis.as_ref().map(String::as_str));
    }

    if let Some(styled) = session.last_style() {
        section(&mut lines, "✨ Styled Summary");
        lines.push(Line::styled(
            format!("{}:", styled.style.label()),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        artifact_lines(&mut lines, styled.result.as_ref().map(String::as_str));
    }

    lines
}

fn section(lines: &mut Vec<Line<'static>>, title: &str) {
    if !lines.is_empty() {
        lines.push(Line::default());
    }
    lines.push(Line::styled(
        title.to_string(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ));
}

fn text_lines(lines: &mut Vec<Line<'static>>, text: &str) {
    lines.extend(text.lines().map(|l| Line::raw(l.to_string())));
}

fn error_line(message: &str) -> Line<'static> {
    Line::styled(message.to_string(), Style::default().fg(Color::Red))
}

fn artifact_lines(lines: &mut Vec<Line<'static>>, artifact: Result<&str, &ArtifactError>) {
    match artifact {
        Ok(text) => text_lines(lines, text),
        Err(err) => lines.push(error_line(&err.message)),
    }
}
