//! AI Core - text-generation engines
//!
//! Provides the [`InferenceEngine`] abstraction with two hosted backends:
//! Anthropic's Messages API and the OpenAI (or compatible) Chat Completions API.

pub mod anthropic;
pub mod config;
pub mod error;
pub mod openai;
pub mod ports;

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

pub use anthropic::AnthropicEngine;
pub use config::{DEFAULT_SYSTEM_PROMPT, InferenceConfig, LlmProvider};
pub use error::InferenceError;
pub use openai::OpenAiEngine;
pub use ports::{
    InferenceEngine, InferenceMessage, InferenceRequest, InferenceResponse, MessageRole,
    TokenUsage,
};

/// Build the engine selected by `config.provider`
///
/// # Errors
///
/// Returns [`InferenceError::Configuration`] when the API key is blank, or a
/// connection error if the HTTP client cannot be created.
pub fn create_engine(
    config: InferenceConfig,
    api_key: SecretString,
) -> Result<Arc<dyn InferenceEngine>, InferenceError> {
    if api_key.expose_secret().trim().is_empty() {
        return Err(InferenceError::Configuration(format!(
            "API key for provider '{}' is required",
            config.provider
        )));
    }

    Ok(match config.provider {
        LlmProvider::Anthropic => Arc::new(AnthropicEngine::new(config, api_key)?),
        LlmProvider::OpenAi => Arc::new(OpenAiEngine::new(config, api_key)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_engine_selects_provider() {
        let engine = create_engine(
            InferenceConfig::for_provider(LlmProvider::OpenAi),
            SecretString::from("sk-test"),
        )
        .unwrap();
        assert_eq!(engine.provider_name(), "openai");
        assert_eq!(engine.default_model(), "gpt-3.5-turbo");

        let engine =
            create_engine(InferenceConfig::default(), SecretString::from("sk-ant")).unwrap();
        assert_eq!(engine.provider_name(), "anthropic");
    }

    #[test]
    fn create_engine_rejects_blank_key() {
        let result = create_engine(InferenceConfig::default(), SecretString::from("  "));
        assert!(matches!(result, Err(InferenceError::Configuration(_))));
    }
}
