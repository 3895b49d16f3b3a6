//! Session state and the interaction state machine.
//!
//! A [`Session`] holds the artifacts derived from one article: summary,
//! analysis, content type and the most recently applied style. Its phase is
//! derived from which of those slots are filled:
//!
//! ```text
//!   Empty ──generate──▶ Summarized ──style──▶ Styled
//!     ▲                     │  ▲                 │
//!     └──── failed ─────────┘  └──── generate ───┘
//! ```
//!
//! Every `generate` clears all derived artifacts before computing new ones,
//! so nothing from a previous article survives a new summary. Failures are
//! kept as tagged [`ArtifactError`]s and never passed to the next producer.

use crate::agent::{Agent, AgentError, ContentReport};
use crate::scraper::{ScraperError, Source};
use crate::style::Style;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("nothing to summarize: paste a URL or some article text")]
    EmptyInput,
    #[error("generate a summary before choosing a style")]
    NoSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Empty,
    Summarized,
    Styled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    Retrieval,
    Generation,
}

/// A failed artifact, with the message shown in place of the content
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{message}")]
pub struct ArtifactError {
    pub kind: FailureKind,
    pub message: String,
}

impl From<ScraperError> for ArtifactError {
    fn from(err: ScraperError) -> Self {
        Self {
            kind: FailureKind::Retrieval,
            message: err.to_string(),
        }
    }
}

impl From<AgentError> for ArtifactError {
    fn from(err: AgentError) -> Self {
        Self {
            kind: FailureKind::Generation,
            message: err.to_string(),
        }
    }
}

pub type Artifact<T> = Result<T, ArtifactError>;

/// The single retained style result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledSummary {
    pub style: Style,
    pub result: Artifact<String>,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct Session {
    source: Option<Source>,
    title: Option<String>,
    summary: Option<String>,
    analysis: Option<Artifact<String>>,
    content_type: Option<Artifact<ContentReport>>,
    last_style: Option<StyledSummary>,
    error: Option<ArtifactError>,
    generated_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        match (&self.summary, &self.last_style) {
            (None, _) => Phase::Empty,
            (Some(_), None) => Phase::Summarized,
            (Some(_), Some(_)) => Phase::Styled,
        }
    }

    /// Summarize `input` and recompute every derived artifact.
    ///
    /// URL input is fetched first. Summary and content type are computed
    /// concurrently from the source text, then the summary is analyzed.
    /// Empty input leaves the session untouched.
    pub async fn generate(&mut self, agent: &Agent, input: &str) -> Result<Phase, SessionError> {
        let source = Source::from_input(input).ok_or(SessionError::EmptyInput)?;
        self.reset();
        tracing::info!(url = source.is_url(), "generating summary");

        let retrieved = match &source {
            Source::Url(url) => agent
                .retrieve(url)
                .await
                .map(|article| (article.title, article.text)),
            Source::Text(text) => Ok((None, text.clone())),
        };
        self.source = Some(source);

        let text = match retrieved {
            Ok((title, text)) => {
                self.title = title;
                text
            }
            Err(err) => {
                tracing::warn!(error = %err, "retrieval failed; not summarizing");
                self.error = Some(err.into());
                return Ok(self.phase());
            }
        };

        let (summary, content_type) =
            tokio::join!(agent.summarize(&text), agent.detect_content_type(&text));

        let summary = match summary {
            Ok(summary) => summary,
            Err(err) => {
                tracing::warn!(error = %err, "summary failed");
                self.error = Some(err.into());
                return Ok(self.phase());
            }
        };

        let analysis = agent.analyze(&summary).await;

        self.content_type = Some(content_type.map_err(ArtifactError::from));
        self.analysis = Some(analysis.map_err(ArtifactError::from));
        self.summary = Some(summary);
        self.generated_at = Some(Utc::now());

        tracing::debug!(phase = ?self.phase(), "summary ready");
        Ok(self.phase())
    }

    /// Rewrite the current summary in `style`, replacing any previous style result
    pub async fn apply_style(&mut self, agent: &Agent, style: Style) -> Result<Phase, SessionError> {
        let summary = self.summary.as_deref().ok_or(SessionError::NoSummary)?;
        tracing::info!(style = style.label(), "rewriting summary");

        let result = agent
            .rewrite(summary, style.instruction())
            .await
            .map_err(ArtifactError::from);
        if let Err(err) = &result {
            tracing::warn!(error = %err, "rewrite failed");
        }

        self.last_style = Some(StyledSummary { style, result });
        Ok(self.phase())
    }

    /// Drop every artifact and return to `Empty`
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn source(&self) -> Option<&Source> {
        self.source.as_ref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn analysis(&self) -> Option<&Artifact<String>> {
        self.analysis.as_ref()
    }

    pub fn content_type(&self) -> Option<&Artifact<ContentReport>> {
        self.content_type.as_ref()
    }

    pub fn last_style(&self) -> Option<&StyledSummary> {
        self.last_style.as_ref()
    }

    /// Why the last `generate` produced no summary
    pub fn error(&self) -> Option<&ArtifactError> {
        self.error.as_ref()
    }

    pub fn generated_at(&self) -> Option<DateTime<Utc>> {
        self.generated_at
    }
}
