//! Anthropic Messages API engine

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::InferenceConfig;
use crate::error::InferenceError;
use crate::ports::{InferenceEngine, InferenceMessage, InferenceRequest, InferenceResponse, TokenUsage};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Inference engine backed by `POST /v1/messages`
pub struct AnthropicEngine {
    client: Client,
    config: InferenceConfig,
    api_key: SecretString,
}

impl std::fmt::Debug for AnthropicEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicEngine")
            .field("base_url", &self.config.resolved_base_url())
            .field("model", &self.config.resolved_model())
            .finish_non_exhaustive()
    }
}

impl AnthropicEngine {
    /// Create a new Anthropic engine
    pub fn new(config: InferenceConfig, api_key: SecretString) -> Result<Self, InferenceError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| InferenceError::ConnectionFailed(e.to_string()))?;

        info!(
            base_url = %config.resolved_base_url(),
            model = %config.resolved_model(),
            "Initialized Anthropic inference engine"
        );

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.resolved_base_url())
    }

    fn resolve_model<'a>(&'a self, request: &'a InferenceRequest) -> &'a str {
        request
            .model
            .as_deref()
            .unwrap_or_else(|| self.config.resolved_model())
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: &'a [InferenceMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

#[async_trait]
impl InferenceEngine for AnthropicEngine {
    #[instrument(skip(self, request), fields(provider = "anthropic", model = %self.resolve_model(&request)))]
    async fn generate(
        &self,
        request: InferenceRequest,
    ) -> Result<InferenceResponse, InferenceError> {
        let model = self.resolve_model(&request);
        let body = MessagesRequest {
            model,
            system: request
                .system
                .as_deref()
                .or(Some(self.config.system_prompt.as_str())),
            messages: &request.messages,
            temperature: request.temperature.unwrap_or(self.config.temperature),
            max_tokens: request.max_tokens.unwrap_or(self.config.max_tokens),
        };

        debug!(url = %self.messages_url(), "Sending request to Anthropic");

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| InferenceError::from_transport(&e, self.config.timeout_ms))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, "Anthropic request failed");
            return Err(InferenceError::from_status(status, &text));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        let content = parsed
            .content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .ok_or(InferenceError::EmptyResponse)?;

        let usage = parsed
            .usage
            .map(|u| TokenUsage::new(u.input_tokens, u.output_tokens));
        debug!(tokens = ?usage, "Inference completed");

        Ok(InferenceResponse {
            content,
            model: parsed.model.unwrap_or_else(|| model.to_string()),
            usage,
        })
    }

    fn provider_name(&self) -> &'static str {
        "anthropic"
    }

    fn default_model(&self) -> &str {
        self.config.resolved_model()
    }
}
