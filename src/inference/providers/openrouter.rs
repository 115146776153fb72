//! OpenRouter provider using the Chat Completions API with a JSON schema
//! response format.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::core::config::DEFAULT_OPENROUTER_BASE_URL;
use crate::inference::types::{parse_generated, topic_prompt};
use crate::inference::{ContentGenerator, GeneratedContent, GenerationRequest, ProviderError};

// ============================================================================
// OpenRouter Chat Completions Types
// ============================================================================

#[derive(Serialize, Debug)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Serialize, Debug)]
struct JsonSchemaFormat {
    name: &'static str,
    strict: bool,
    schema: serde_json::Value,
}

#[derive(Serialize, Debug)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str, // always "json_schema"
    json_schema: JsonSchemaFormat,
}

#[derive(Serialize, Debug)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    response_format: ResponseFormat,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize, Debug)]
struct ChoiceMessage {
    content: Option<String>,
}

// ============================================================================
// Provider Implementation
// ============================================================================

pub struct OpenRouterProvider {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenRouterProvider {
    /// Creates a new OpenRouter provider.
    ///
    /// # Arguments
    /// * `api_key` - OpenRouter API key
    /// * `base_url` - Optional custom base URL (defaults to OpenRouter's API)
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_OPENROUTER_BASE_URL.to_string()),
            client: reqwest::Client::new(),
        }
    }

    async fn send_request(&self, request: &ChatRequest) -> Result<ChatResponse, ProviderError> {
        let json_body = serde_json::to_string(request)
            .map_err(|e| ProviderError::Parse(format!("Request serialization failed: {e}")))?;
        debug!("Raw OpenRouter request: {}", json_body);

        let response = self
            .client
            .post(format!(
                "{}/chat/completions",
                self.base_url.trim_end_matches('/')
            ))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .body(json_body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        debug!("OpenRouter response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("OpenRouter API error: {} - {}", status, err_body);
            return Err(ProviderError::Api {
                status,
                message: err_body,
            });
        }

        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))
    }
}

#[async_trait]
impl ContentGenerator for OpenRouterProvider {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn generate(
        &self,
        request: GenerationRequest<'_>,
    ) -> Result<GeneratedContent, ProviderError> {
        let body = ChatRequest {
            model: request.model.to_string(),
            messages: vec![Message {
                role: "user",
                content: topic_prompt(request.topic_title),
            }],
            response_format: ResponseFormat {
                format_type: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: "topic_content",
                    strict: false,
                    schema: GeneratedContent::json_schema(),
                },
            },
        };

        info!("OpenRouter chat completion: model={}", request.model);
        let response = self.send_request(&body).await?;
        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ProviderError::Parse("No response from AI".to_string()))?;
        debug!("OpenRouter raw text: {}", text);
        parse_generated(&text)
    }
}
