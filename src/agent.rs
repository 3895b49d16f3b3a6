//! Derived-artifact producers.
//!
//! Each producer is a prompt template plus one call to the completion client.
//! Nothing is cached: every call goes to the model.

use crate::completion::{CompletionClient, CompletionError, OpenAiClient};
use crate::config::Config;
use crate::scraper::{Article, HttpRetriever, Retriever, ScraperError};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Error summarizing text: {0}")]
    Summarize(CompletionError),
    #[error("Error analyzing summary: {0}")]
    Analyze(CompletionError),
    #[error("Error detecting content type: {0}")]
    Classify(CompletionError),
    #[error("Error rewriting summary: {0}")]
    Rewrite(CompletionError),
    #[error("failed to set up article retrieval: {0}")]
    RetrieverSetup(#[from] ScraperError),
    #[error("failed to set up completion client: {0}")]
    ClientSetup(#[from] CompletionError),
}

/// Content categories the classifier chooses from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContentType {
    News,
    Opinion,
    Research,
    Blog,
    Other,
}

impl ContentType {
    const ALL: [ContentType; 5] = [
        ContentType::News,
        ContentType::Opinion,
        ContentType::Research,
        ContentType::Blog,
        ContentType::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ContentType::News => "News",
            ContentType::Opinion => "Opinion",
            ContentType::Research => "Research",
            ContentType::Blog => "Blog",
            ContentType::Other => "Other",
        }
    }

    /// Category named in a free-text classifier reply.
    ///
    /// Labels are matched as capitalized words, so prose like "other news
    /// outlets" does not count. The first specific category wins; `Other` is
    /// returned when it is the only label named or when none is.
    pub fn from_reply(reply: &str) -> Self {
        reply
            .split(|c: char| !c.is_alphabetic())
            .filter_map(|word| Self::ALL.into_iter().find(|kind| kind.label() == word))
            .find(|kind| *kind != ContentType::Other)
            .unwrap_or(ContentType::Other)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifier output: the category plus the model's justification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentReport {
    pub kind: ContentType,
    pub justification: String,
}

/// Prompt templates
pub mod prompts {
    pub fn summarize(text: &str) -> String {
        format!("Summarize the following text clearly and concisely:\n\n{text}")
    }

    pub fn analyze(summary: &str) -> String {
        format!(
            "Analyze the following summary. Identify the messaging, any possible biases, \
             and blind spots in the article:\n\n{summary}"
        )
    }

    pub fn classify(text: &str) -> String {
        format!(
            "Classify the following text into one of the content types: News, Opinion, \
             Research, Blog, or Other. Provide a brief justification for your \
             classification.\n\n{text}"
        )
    }

    pub fn rewrite(summary: &str, instruction: &str) -> String {
        format!("{instruction}:\n\n{summary}")
    }
}

/// Retrieval plus the four producers, sharing one completion client
#[derive(Clone)]
pub struct Agent {
    retriever: Arc<dyn Retriever>,
    client: Arc<dyn CompletionClient>,
    temperature: f32,
    classify_temperature: f32,
}

impl Agent {
    pub fn new(
        retriever: Arc<dyn Retriever>,
        client: Arc<dyn CompletionClient>,
        temperature: f32,
        classify_temperature: f32,
    ) -> Self {
        Self {
            retriever,
            client,
            temperature,
            classify_temperature,
        }
    }

    /// Build the HTTP retriever and OpenAI client described by `config`
    pub fn from_config(config: &Config) -> Result<Self, AgentError> {
        let retriever = HttpRetriever::new(&config.scraper)?;
        let client = OpenAiClient::new(config)?;
        tracing::debug!(model = client.model(), "agent ready");

        Ok(Self::new(
            Arc::new(retriever),
            Arc::new(client),
            config.agent.temperature,
            config.agent.classify_temperature,
        ))
    }

    pub async fn retrieve(&self, url: &str) -> Result<Article, ScraperError> {
        self.retriever.fetch(url).await
    }

    pub async fn summarize(&self, text: &str) -> Result<String, AgentError> {
        self.client
            .complete(&prompts::summarize(text), self.temperature)
            .await
            .map_err(AgentError::Summarize)
    }

    pub async fn analyze(&self, summary: &str) -> Result<String, AgentError> {
        self.client
            .complete(&prompts::analyze(summary), self.temperature)
            .await
            .map_err(AgentError::Analyze)
    }

    pub async fn detect_content_type(&self, text: &str) -> Result<ContentReport, AgentError> {
        let reply = self
            .client
            .complete(&prompts::classify(text), self.classify_temperature)
            .await
            .map_err(AgentError::Classify)?;

        Ok(ContentReport {
            kind: ContentType::from_reply(&reply),
            justification: reply,
        })
    }

    pub async fn rewrite(&self, summary: &str, instruction: &str) -> Result<String, AgentError> {
        self.client
            .complete(&prompts::rewrite(summary, instruction), self.temperature)
            .await
            .map_err(AgentError::Rewrite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Mock, Reply};

    #[test]
    fn test_content_type_from_reply() {
        assert_eq!(
            ContentType::from_reply("Opinion. The author argues..."),
            ContentType::Opinion
        );
        assert_eq!(
            ContentType::from_reply("Content type: **News**\nJustification: reports events."),
            ContentType::News
        );
        assert_eq!(
            ContentType::from_reply("This is a research paper (Research)."),
            ContentType::Research
        );
        assert_eq!(ContentType::from_reply("I cannot tell."), ContentType::Other);
        assert_eq!(ContentType::from_reply(""), ContentType::Other);
        // Substrings inside other words do not count
        assert_eq!(ContentType::from_reply("Newsletter-ish blogging"), ContentType::Other);
        // Lowercase prose does not outrank the chosen label
        assert_eq!(
            ContentType::from_reply("Unlike other news coverage, this piece is an Opinion column."),
            ContentType::Opinion
        );
        assert_eq!(
            ContentType::from_reply("This is not news reporting; it is Opinion."),
            ContentType::Opinion
        );
        // A specific label beats a mention of Other
        assert_eq!(
            ContentType::from_reply("Other would be wrong here: this is Research."),
            ContentType::Research
        );
        assert_eq!(
            ContentType::from_reply("Other. It fits none of the categories."),
            ContentType::Other
        );
    }

    #[test]
    fn test_rewrite_prompt_shape() {
        assert_eq!(
            prompts::rewrite("Summary X", "Make this summary more detailed"),
            "Make this summary more detailed:\n\nSummary X"
        );
        assert!(prompts::summarize("A B C.").ends_with("\n\nA B C."));
    }

    #[tokio::test]
    async fn test_producers_use_their_temperatures() {
        let mock = Mock::new();
        let agent = mock.agent();

        agent.summarize("text").await.unwrap();
        agent.analyze("summary").await.unwrap();
        agent.detect_content_type("text").await.unwrap();
        agent.rewrite("summary", "Be playful").await.unwrap();

        let temps: Vec<f32> = mock.completions().iter().map(|(_, t)| *t).collect();
        assert_eq!(temps, vec![0.7, 0.7, 0.5, 0.7]);
    }

    #[tokio::test]
    async fn test_classifier_keeps_justification() {
        let mock = Mock::new().with_classification("Blog: informal first-person tone.");
        let report = mock.agent().detect_content_type("text").await.unwrap();
        assert_eq!(report.kind, ContentType::Blog);
        assert_eq!(report.justification, "Blog: informal first-person tone.");
    }

    #[tokio::test]
    async fn test_failure_is_prefixed_per_producer() {
        let mock = Mock::new().with_summary(Reply::Fail);
        let err = mock.agent().summarize("text").await.unwrap_err();
        assert!(err.to_string().starts_with("Error summarizing text: "));
    }
}
