//! # Recap
//!
//! A TUI for summarizing articles with an LLM, then digging into them.
//!
//! ## Features
//!
//! - **Summaries from URL or text**: paragraph text is fetched and capped before it reaches the model
//! - **Content type and bias analysis**: computed alongside every new summary
//! - **Restyled rewrites**: ELI5, more detailed, playful or a 5-slide outline, one at a time
//! - **Tagged failures**: a failed fetch or model call is shown as an error, never summarized

pub mod agent;
pub mod completion;
pub mod config;
pub mod scraper;
pub mod session;
pub mod style;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;

pub use agent::{Agent, ContentReport, ContentType};
pub use config::Config;
pub use session::{Phase, Session};
pub use style::Style;
