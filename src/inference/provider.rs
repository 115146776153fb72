use std::fmt;

use async_trait::async_trait;
use log::{info, warn};

use super::types::GeneratedContent;

/// Errors that can occur during provider operations.
/// None of them escape `generate_topic_content`.
#[derive(Debug)]
pub enum ProviderError {
    /// Provider misconfigured (missing API key, bad URL).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// API returned an error response.
    Api { status: u16, message: String },
    /// Failed to parse the provider's response.
    Parse(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Config(msg) => write!(f, "config error: {msg}"),
            ProviderError::Network(msg) => write!(f, "network error: {msg}"),
            ProviderError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ProviderError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Everything a provider needs to generate lesson content.
pub struct GenerationRequest<'a> {
    pub topic_title: &'a str,
    pub model: &'a str,
}

#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Generates summary, flashcards and questions for one topic.
    async fn generate(
        &self,
        request: GenerationRequest<'_>,
    ) -> Result<GeneratedContent, ProviderError>;
}

/// Stand-in used when no API key is configured. Always fails.
pub struct Unconfigured {
    reason: String,
}

impl Unconfigured {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl ContentGenerator for Unconfigured {
    fn name(&self) -> &str {
        "unconfigured"
    }

    async fn generate(
        &self,
        _request: GenerationRequest<'_>,
    ) -> Result<GeneratedContent, ProviderError> {
        Err(ProviderError::Config(self.reason.clone()))
    }
}

/// Generates content for `topic_title`, never failing: any provider error
/// is logged and replaced by [`GeneratedContent::fallback`].
pub async fn generate_topic_content(
    generator: &dyn ContentGenerator,
    topic_title: &str,
    model: &str,
) -> GeneratedContent {
    info!(
        "Generating content for {:?} via {} ({})",
        topic_title,
        generator.name(),
        model
    );
    match generator
        .generate(GenerationRequest { topic_title, model })
        .await
    {
        Ok(content) => {
            info!(
                "Generated {} flashcards, {} questions for {:?}",
                content.flashcards.len(),
                content.questions.len(),
                topic_title
            );
            content
        }
        Err(e) => {
            warn!("Content generation failed for {:?}: {}", topic_title, e);
            GeneratedContent::fallback()
        }
    }
}
