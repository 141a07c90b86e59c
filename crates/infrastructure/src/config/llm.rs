//! Language-model configuration

use ai_core::{DEFAULT_SYSTEM_PROMPT, InferenceConfig, LlmProvider};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Text-generation backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmAppConfig {
    #[serde(default)]
    pub provider: LlmProvider,

    /// API key (sensitive - uses `SecretString`)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Model name; the provider default when unset
    #[serde(default)]
    pub model: Option<String>,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Override of the provider's API base URL
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

const fn default_temperature() -> f32 {
    0.7
}

const fn default_max_tokens() -> u32 {
    500
}

const fn default_timeout_ms() -> u64 {
    30_000
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

impl Default for LlmAppConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            api_key: None,
            model: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_ms: default_timeout_ms(),
            base_url: None,
            system_prompt: default_system_prompt(),
        }
    }
}

impl LlmAppConfig {
    /// Whether a non-blank API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().trim().is_empty())
    }

    /// Engine configuration for `ai_core`
    #[must_use]
    pub fn to_inference_config(&self) -> InferenceConfig {
        InferenceConfig {
            provider: self.provider,
            model: self.model.clone().filter(|m| !m.trim().is_empty()),
            base_url: self.base_url.clone().filter(|u| !u.trim().is_empty()),
            timeout_ms: self.timeout_ms,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            system_prompt: self.system_prompt.clone(),
        }
    }
}
