//! Article retrieval and text extraction.
//!
//! Uses reqwest for fetching and scraper for HTML parsing. Only paragraph
//! elements contribute to the extracted text, and the result is capped at a
//! fixed number of characters to bound the size of downstream prompts.

use crate::config::ScraperConfig;
use async_trait::async_trait;
use lazy_static::lazy_static;
use reqwest::Client;
use scraper::{Html, Selector};
use serde::Serialize;
use thiserror::Error;

lazy_static! {
    static ref PARAGRAPH: Selector = Selector::parse("p").unwrap();
    static ref TITLE: Selector = Selector::parse("title").unwrap();
    static ref H1: Selector = Selector::parse("h1").unwrap();
}

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("Error fetching article: {0}")]
    FetchError(#[from] reqwest::Error),
    #[error("Error fetching article: no paragraph text found at {0}")]
    NoContent(String),
}

/// What the user typed into the input area
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Source {
    /// Anything starting with `http`; fetched before summarizing
    Url(String),
    /// Pasted article text, summarized exactly as given
    Text(String),
}

impl Source {
    /// Classify raw input. Returns `None` for empty or whitespace-only input.
    pub fn from_input(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.starts_with("http") {
            Some(Source::Url(trimmed.to_string()))
        } else {
            Some(Source::Text(input.to_string()))
        }
    }

    pub fn is_url(&self) -> bool {
        matches!(self, Source::Url(_))
    }
}

/// Extracted content from a webpage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Page title
    pub title: Option<String>,
    /// Paragraph text, already truncated
    pub text: String,
    /// Whether truncation dropped any text
    pub truncated: bool,
}

/// Fetches articles by URL.
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Article, ScraperError>;
}

/// Retriever backed by a single HTTP GET.
pub struct HttpRetriever {
    client: Client,
    max_chars: usize,
}

impl HttpRetriever {
    pub fn new(config: &ScraperConfig) -> Result<Self, ScraperError> {
        Ok(Self {
            client: create_client(config)?,
            max_chars: config.max_chars,
        })
    }
}

#[async_trait]
impl Retriever for HttpRetriever {
    async fn fetch(&self, url: &str) -> Result<Article, ScraperError> {
        fetch_article(&self.client, url, self.max_chars).await
    }
}

/// Create a configured HTTP client for scraping
fn create_client(config: &ScraperConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder().user_agent(config.user_agent.as_str());
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// Fetch a URL and extract its paragraph text
pub async fn fetch_article(
    client: &Client,
    url: &str,
    max_chars: usize,
) -> Result<Article, ScraperError> {
    tracing::info!(url, "fetching article");

    let response = client.get(url).send().await.map_err(|e| {
        tracing::warn!(url, error = %e, "fetch failed");
        e
    })?;
    tracing::debug!(url, status = %response.status(), "received response");

    let html = response.text().await?;
    let article = parse_article(&html, max_chars);
    if article.text.trim().is_empty() {
        return Err(ScraperError::NoContent(url.to_string()));
    }

    tracing::info!(
        url,
        chars = article.text.chars().count(),
        truncated = article.truncated,
        "extracted article text"
    );
    Ok(article)
}

/// Build an [`Article`] from an already-fetched HTML document
pub fn parse_article(html: &str, max_chars: usize) -> Article {
    let document = Html::parse_document(html);
    let full = extract_paragraph_text(&document);
    let truncated = full.chars().count() > max_chars;

    Article {
        title: extract_title(&document),
        text: truncate_chars(&full, max_chars),
        truncated,
    }
}

/// Extract the page title from <title> or <h1>
fn extract_title(document: &Html) -> Option<String> {
    [&*TITLE, &*H1].into_iter().find_map(|selector| {
        let element = document.select(selector).next()?;
        let title: String = element.text().collect();
        let title = title.trim();
        (!title.is_empty()).then(|| title.to_string())
    })
}

/// Text of every paragraph in document order, separated by single spaces
pub fn extract_paragraph_text(document: &Html) -> String {
    document
        .select(&PARAGRAPH)
        .map(|element| element.text().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keep at most `max` characters (not bytes) of `text`
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_from_input() {
        assert_eq!(Source::from_input(""), None);
        assert_eq!(Source::from_input("   \n\t"), None);
        assert_eq!(
            Source::from_input("  https://example.com/article \n"),
            Some(Source::Url("https://example.com/article".to_string()))
        );
        assert_eq!(
            Source::from_input("httpbin is a service"),
            Some(Source::Url("httpbin is a service".to_string()))
        );
        assert_eq!(
            Source::from_input(" Once upon a time\n"),
            Some(Source::Text(" Once upon a time\n".to_string()))
        );
    }

    #[test]
    fn test_extracts_only_paragraphs_in_order() {
        let html = r#"
            <html><head><title> The Title </title><script>var p = 1;</script></head>
            <body>
              <h1>Heading</h1>
              <p>First <b>bold</b> paragraph.</p>
              <ul><li>list item</li></ul>
              <div><p>Second.</p></div>
              <p>Third.</p>
            </body></html>
        "#;
        let article = parse_article(html, 7000);
        assert_eq!(article.text, "First bold paragraph. Second. Third.");
        assert_eq!(article.title.as_deref(), Some("The Title"));
        assert!(!article.truncated);
    }

    #[test]
    fn test_title_falls_back_to_h1() {
        let html = "<html><body><h1>Only heading</h1><p>x</p></body></html>";
        let article = parse_article(html, 7000);
        assert_eq!(article.title.as_deref(), Some("Only heading"));
    }

    #[test]
    fn test_no_paragraphs_gives_empty_text() {
        let html = "<html><body><div>no paragraphs here</div></body></html>";
        let article = parse_article(html, 7000);
        assert_eq!(article.text, "");
        assert_eq!(article.title, None);
    }

    #[test]
    fn test_truncation_bounds_long_documents() {
        let body: String = (0..2000).map(|i| format!("<p>paragraph {i}</p>")).collect();
        let html = format!("<html><body>{body}</body></html>");
        let article = parse_article(&html, 7000);
        assert_eq!(article.text.chars().count(), 7000);
        assert!(article.truncated);
    }

    #[test]
    fn test_truncate_chars_counts_characters() {
        assert_eq!(truncate_chars("héllo wörld", 4), "héll");
        assert_eq!(truncate_chars("short", 7000), "short");
        assert_eq!(truncate_chars("", 3), "");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[tokio::test]
    async fn test_network_failure_is_fetch_error() {
        let retriever = HttpRetriever::new(&ScraperConfig::default()).unwrap();
        // Nothing listens on port 1
        let err = retriever.fetch("http://127.0.0.1:1/article").await.unwrap_err();
        assert!(err.to_string().starts_with("Error fetching article: "));
    }
}
