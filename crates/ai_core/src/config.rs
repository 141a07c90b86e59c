//! Configuration for inference engines

use serde::{Deserialize, Serialize};

/// Default weather-assistant system prompt
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful AI weather assistant. Your task is to analyze weather data and provide helpful, engaging, and contextual messages about the current weather.

Some guidelines:
1. Be conversational and personable
2. Vary your messages to avoid repetition
3. Include practical advice based on the weather conditions
4. Note significant changes in weather when they occur
5. Mention the time of day and how it relates to the weather when relevant
6. Make appropriate seasonal references
7. Keep responses concise and focused (1-3 sentences)
8. Occasionally include interesting weather facts
9. Adjust your tone based on severe weather (more serious for dangerous conditions)

Your messages should be directly useful to someone wondering about current weather conditions.";

/// Supported text-generation backends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// Anthropic Messages API
    #[default]
    Anthropic,
    /// OpenAI (or compatible) Chat Completions API
    #[serde(alias = "open_ai")]
    OpenAi,
}

impl LlmProvider {
    /// Provider name as used in configuration
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::OpenAi => "openai",
        }
    }

    /// Model used when none (or an incompatible one) is configured
    pub const fn default_model(self) -> &'static str {
        match self {
            Self::Anthropic => "claude-3-haiku-20240307",
            Self::OpenAi => "gpt-3.5-turbo",
        }
    }

    /// Public API endpoint
    pub const fn default_base_url(self) -> &'static str {
        match self {
            Self::Anthropic => "https://api.anthropic.com",
            Self::OpenAi => "https://api.openai.com",
        }
    }

    /// Substring every model id of this provider's family contains
    const fn model_family(self) -> &'static str {
        match self {
            Self::Anthropic => "claude",
            Self::OpenAi => "gpt",
        }
    }
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LlmProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anthropic" => Ok(Self::Anthropic),
            "openai" | "open_ai" => Ok(Self::OpenAi),
            other => Err(format!("unsupported LLM provider: {other}")),
        }
    }
}

/// Configuration for the inference engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Which backend to call
    #[serde(default)]
    pub provider: LlmProvider,

    /// Model id; falls back to the provider default
    #[serde(default)]
    pub model: Option<String>,

    /// API base URL override
    #[serde(default)]
    pub base_url: Option<String>,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Temperature for sampling (0.0 - 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// System prompt sent with every request
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

const fn default_timeout_ms() -> u64 {
    30_000
}

const fn default_max_tokens() -> u32 {
    500
}

const fn default_temperature() -> f32 {
    0.7
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            model: None,
            base_url: None,
            timeout_ms: default_timeout_ms(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            system_prompt: default_system_prompt(),
        }
    }
}

impl InferenceConfig {
    /// Config for a provider with all other settings defaulted
    pub fn for_provider(provider: LlmProvider) -> Self {
        Self {
            provider,
            ..Default::default()
        }
    }

    /// Model actually sent upstream
    ///
    /// A blank model, or one from another provider's family, is replaced by the
    /// provider default.
    pub fn resolved_model(&self) -> &str {
        let family = self.provider.model_family();
        self.model
            .as_deref()
            .map(str::trim)
            .filter(|m| m.to_ascii_lowercase().contains(family))
            .unwrap_or(self.provider.default_model())
    }

    /// Base URL without a trailing slash
    pub fn resolved_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(self.provider.default_base_url())
            .trim_end_matches('/')
    }
}
