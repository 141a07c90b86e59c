//! OpenAI-compatible Chat Completions engine

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::InferenceConfig;
use crate::error::InferenceError;
use crate::ports::{InferenceEngine, InferenceRequest, InferenceResponse, MessageRole, TokenUsage};

/// Inference engine backed by `POST /v1/chat/completions`
pub struct OpenAiEngine {
    client: Client,
    config: InferenceConfig,
    api_key: SecretString,
}

impl std::fmt::Debug for OpenAiEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiEngine")
            .field("base_url", &self.config.resolved_base_url())
            .field("model", &self.config.resolved_model())
            .finish_non_exhaustive()
    }
}

impl OpenAiEngine {
    /// Create a new OpenAI-compatible engine
    pub fn new(config: InferenceConfig, api_key: SecretString) -> Result<Self, InferenceError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| InferenceError::ConnectionFailed(e.to_string()))?;

        info!(
            base_url = %config.resolved_base_url(),
            model = %config.resolved_model(),
            "Initialized OpenAI inference engine"
        );

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.config.resolved_base_url())
    }

    fn resolve_model<'a>(&'a self, request: &'a InferenceRequest) -> &'a str {
        request
            .model
            .as_deref()
            .unwrap_or_else(|| self.config.resolved_model())
    }

    /// System prompt first, then the conversation turns
    fn chat_messages<'a>(&'a self, request: &'a InferenceRequest) -> Vec<ChatMessage<'a>> {
        let system = request
            .system
            .as_deref()
            .unwrap_or(self.config.system_prompt.as_str());

        std::iter::once(ChatMessage {
            role: "system",
            content: system,
        })
        .chain(request.messages.iter().map(|m| ChatMessage {
            role: match m.role {
                MessageRole::User => "user",
                MessageRole::Assistant => "assistant",
            },
            content: m.content.as_str(),
        }))
        .collect()
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[async_trait]
impl InferenceEngine for OpenAiEngine {
    #[instrument(skip(self, request), fields(provider = "openai", model = %self.resolve_model(&request)))]
    async fn generate(
        &self,
        request: InferenceRequest,
    ) -> Result<InferenceResponse, InferenceError> {
        let model = self.resolve_model(&request);
        let body = ChatRequest {
            model,
            messages: self.chat_messages(&request),
            temperature: request.temperature.unwrap_or(self.config.temperature),
            max_tokens: request.max_tokens.unwrap_or(self.config.max_tokens),
        };

        debug!(url = %self.completions_url(), "Sending request to OpenAI");

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| InferenceError::from_transport(&e, self.config.timeout_ms))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, "OpenAI request failed");
            return Err(InferenceError::from_status(status, &text));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(InferenceError::EmptyResponse)?;

        let usage = parsed
            .usage
            .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens));
        debug!(tokens = ?usage, "Inference completed");

        Ok(InferenceResponse {
            content,
            model: parsed.model.unwrap_or_else(|| model.to_string()),
            usage,
        })
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn default_model(&self) -> &str {
        self.config.resolved_model()
    }
}
