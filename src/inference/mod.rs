pub mod provider;
pub mod providers;
pub mod types;

pub use provider::{
    ContentGenerator, GenerationRequest, ProviderError, Unconfigured, generate_topic_content,
};
pub use providers::{GeminiProvider, OpenRouterProvider, build_generator};
pub use types::{FALLBACK_SUMMARY, GeneratedContent, clean_json};
