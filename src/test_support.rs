//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::core::profile::UserProfile;
use crate::core::session::RewardPolicy;
use crate::core::state::App;
use crate::inference::{ContentGenerator, GeneratedContent, GenerationRequest, ProviderError};

/// A generator for tests that never reach a provider. Always returns an
/// empty payload.
pub struct NoopGenerator;

#[async_trait]
impl ContentGenerator for NoopGenerator {
    fn name(&self) -> &str {
        "noop"
    }

    async fn generate(
        &self,
        _request: GenerationRequest<'_>,
    ) -> Result<GeneratedContent, ProviderError> {
        Ok(GeneratedContent::default())
    }
}

/// Replies with a fixed outcome and remembers the last requested title.
/// `Err(msg)` is reported as a network error.
pub struct ScriptedGenerator {
    outcome: Result<GeneratedContent, String>,
    last_title: Mutex<Option<String>>,
}

impl ScriptedGenerator {
    pub fn new(outcome: Result<GeneratedContent, String>) -> Self {
        Self {
            outcome,
            last_title: Mutex::new(None),
        }
    }

    pub fn last_title(&self) -> Option<String> {
        self.last_title.lock().ok().and_then(|t| t.clone())
    }
}

#[async_trait]
impl ContentGenerator for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(
        &self,
        request: GenerationRequest<'_>,
    ) -> Result<GeneratedContent, ProviderError> {
        if let Ok(mut last) = self.last_title.lock() {
            *last = Some(request.topic_title.to_string());
        }
        self.outcome.clone().map_err(ProviderError::Network)
    }
}

/// Creates a test App with a NoopGenerator and default profile.
pub fn test_app() -> App {
    App::new(
        Arc::new(NoopGenerator),
        "test-model".to_string(),
        UserProfile::default(),
        RewardPolicy::default(),
    )
}

/// Flattens a TestBackend buffer into one string of cell symbols.
pub fn buffer_text(terminal: &ratatui::Terminal<ratatui::backend::TestBackend>) -> String {
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect()
}
