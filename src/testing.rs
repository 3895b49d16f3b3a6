//! Recording mocks for the retriever and completion client.

use crate::agent::Agent;
use crate::completion::{CompletionClient, CompletionError};
use crate::scraper::{Article, Retriever, ScraperError};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Fetch(String),
    Complete { prompt: String, temperature: f32 },
}

#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Text(String),
    Fail,
}

impl From<&str> for Reply {
    fn from(text: &str) -> Self {
        Reply::Text(text.to_string())
    }
}

type Log = Arc<Mutex<Vec<Call>>>;

/// Builder for an [`Agent`] whose collaborators answer from canned replies
/// and record every call in one shared, ordered log.
pub(crate) struct Mock {
    log: Log,
    article: Reply,
    summary: Reply,
    analysis: Reply,
    classification: Reply,
    rewrite: Option<Reply>,
}

impl Mock {
    pub fn new() -> Self {
        Self {
            log: Arc::default(),
            article: "Article text.".into(),
            summary: "Summary X".into(),
            analysis: "Analysis".into(),
            classification: "News: it reports events.".into(),
            rewrite: None,
        }
    }

    pub fn with_article(mut self, reply: impl Into<Reply>) -> Self {
        self.article = reply.into();
        self
    }

    pub fn with_summary(mut self, reply: impl Into<Reply>) -> Self {
        self.summary = reply.into();
        self
    }

    pub fn with_analysis(mut self, reply: impl Into<Reply>) -> Self {
        self.analysis = reply.into();
        self
    }

    pub fn with_classification(mut self, reply: impl Into<Reply>) -> Self {
        self.classification = reply.into();
        self
    }

    /// Fixed rewrite reply; by default a rewrite echoes `styled: <instruction>`
    pub fn with_rewrite(mut self, reply: impl Into<Reply>) -> Self {
        self.rewrite = Some(reply.into());
        self
    }

    pub fn agent(&self) -> Agent {
        self.agent_with_retriever(Arc::new(MockRetriever {
            log: self.log.clone(),
            article: self.article.clone(),
        }))
    }

    pub fn agent_with_retriever(&self, retriever: Arc<dyn Retriever>) -> Agent {
        let client = MockClient {
            log: self.log.clone(),
            summary: self.summary.clone(),
            analysis: self.analysis.clone(),
            classification: self.classification.clone(),
            rewrite: self.rewrite.clone(),
        };
        Agent::new(retriever, Arc::new(client), 0.7, 0.5)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.log.lock().unwrap().clone()
    }

    pub fn completions(&self) -> Vec<(String, f32)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Complete {
                    prompt,
                    temperature,
                } => Some((prompt, temperature)),
                Call::Fetch(_) => None,
            })
            .collect()
    }

    pub fn prompts_starting_with(&self, prefix: &str) -> Vec<String> {
        self.completions()
            .into_iter()
            .map(|(prompt, _)| prompt)
            .filter(|prompt| prompt.starts_with(prefix))
            .collect()
    }

    pub fn clear(&self) {
        self.log.lock().unwrap().clear();
    }
}

struct MockRetriever {
    log: Log,
    article: Reply,
}

#[async_trait]
impl Retriever for MockRetriever {
    async fn fetch(&self, url: &str) -> Result<Article, ScraperError> {
        self.log.lock().unwrap().push(Call::Fetch(url.to_string()));
        match &self.article {
            Reply::Text(text) => Ok(Article {
                title: Some("Mock title".to_string()),
                text: text.clone(),
                truncated: false,
            }),
            Reply::Fail => Err(ScraperError::NoContent(url.to_string())),
        }
    }
}

struct MockClient {
    log: Log,
    summary: Reply,
    analysis: Reply,
    classification: Reply,
    rewrite: Option<Reply>,
}

#[async_trait]
impl CompletionClient for MockClient {
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String, CompletionError> {
        self.log.lock().unwrap().push(Call::Complete {
            prompt: prompt.to_string(),
            temperature,
        });

        let reply = if prompt.starts_with("Summarize") {
            self.summary.clone()
        } else if prompt.starts_with("Analyze") {
            self.analysis.clone()
        } else if prompt.starts_with("Classify") {
            self.classification.clone()
        } else {
            self.rewrite.clone().unwrap_or_else(|| {
                let instruction = prompt.split(":\n\n").next().unwrap_or_default();
                Reply::Text(format!("styled: {instruction}"))
            })
        };

        match reply {
            Reply::Text(text) => Ok(text),
            Reply::Fail => Err(CompletionError::Api {
                status: 401,
                body: "invalid api key".to_string(),
            }),
        }
    }
}
