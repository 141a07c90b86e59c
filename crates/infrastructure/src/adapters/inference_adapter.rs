//! Inference adapter - Implements InferencePort using ai_core

use std::sync::Arc;
use std::time::Instant;

use ai_core::{InferenceConfig, InferenceEngine, InferenceError, InferenceRequest, create_engine};
use application::{
    error::ApplicationError,
    ports::{InferencePort, InferenceResult},
};
use async_trait::async_trait;
use secrecy::SecretString;
use tracing::{debug, instrument};

/// Adapter for the hosted language-model engines
pub struct InferenceAdapter {
    engine: Arc<dyn InferenceEngine>,
}

impl std::fmt::Debug for InferenceAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceAdapter")
            .field("provider", &self.engine.provider_name())
            .field("model", &self.engine.default_model())
            .finish()
    }
}

impl InferenceAdapter {
    /// Build the engine selected by `config.provider`
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Configuration`] for a blank key.
    pub fn new(config: InferenceConfig, api_key: SecretString) -> Result<Self, ApplicationError> {
        let engine = create_engine(config, api_key).map_err(Self::map_error)?;
        Ok(Self::with_engine(engine))
    }

    pub fn with_engine(engine: Arc<dyn InferenceEngine>) -> Self {
        Self { engine }
    }

    /// Convert ai_core error to application error
    fn map_error(e: InferenceError) -> ApplicationError {
        match e {
            InferenceError::RateLimited => ApplicationError::RateLimited,
            InferenceError::Configuration(msg) => ApplicationError::Configuration(msg),
            other => ApplicationError::Generation(other.to_string()),
        }
    }
}

#[async_trait]
impl InferencePort for InferenceAdapter {
    #[instrument(skip(self, system_prompt, message), fields(provider = self.engine.provider_name(), message_len = message.len()))]
    async fn generate_with_system(
        &self,
        system_prompt: &str,
        message: &str,
    ) -> Result<InferenceResult, ApplicationError> {
        let start = Instant::now();

        let request = InferenceRequest::with_system(system_prompt, message);
        let response = self
            .engine
            .generate(request)
            .await
            .map_err(Self::map_error)?;

        #[allow(clippy::cast_possible_truncation)]
        let latency_ms = start.elapsed().as_millis() as u64;

        debug!(
            model = %response.model,
            tokens = ?response.usage.as_ref().map(|u| u.total_tokens),
            latency_ms = latency_ms,
            "Inference completed"
        );

        Ok(InferenceResult {
            content: response.content,
            model: response.model,
            tokens_used: response.usage.map(|u| u.total_tokens),
            latency_ms,
        })
    }

    fn current_model(&self) -> String {
        self.engine.default_model().to_string()
    }
}
