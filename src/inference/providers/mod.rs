mod gemini;
mod openrouter;

use std::sync::Arc;

use log::{info, warn};

pub use gemini::GeminiProvider;
pub use openrouter::OpenRouterProvider;

use super::{ContentGenerator, Unconfigured};
use crate::Provider;
use crate::core::config::ResolvedConfig;

/// Builds the generator selected by `config`. A missing API key yields an
/// [`Unconfigured`] generator, so every request falls back.
pub fn build_generator(config: &ResolvedConfig) -> Arc<dyn ContentGenerator> {
    let Some(api_key) = config.api_key().map(str::to_string) else {
        warn!("No API key for {:?}; generated topics will use the fallback", config.provider);
        return Arc::new(Unconfigured::new(format!(
            "no API key configured for {:?}",
            config.provider
        )));
    };
    info!("Using {:?} generator with model {}", config.provider, config.model_name);
    match config.provider {
        Provider::Gemini => Arc::new(GeminiProvider::new(
            api_key,
            Some(config.gemini_base_url.clone()),
        )),
        Provider::OpenRouter => Arc::new(OpenRouterProvider::new(
            api_key,
            Some(config.openrouter_base_url.clone()),
        )),
    }
}
