use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Default OpenAI-compatible endpoint (Together AI)
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.together.xyz/v1";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "meta-llama/Llama-4-Scout-17B-16E-Instruct";

/// Completion provider configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LlmConfig {
    /// Base URL of the OpenAI-compatible API
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Bearer token for the provider
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Model identifier sent with every completion
    #[serde(default = "default_model")]
    pub model: String,
    /// Model context window, in tokens
    #[serde(default = "default_context_window")]
    pub context_window: u32,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Default advisory output hint for requests that omit `max_tokens`
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl LlmConfig {
    /// Configured base URL, or the default provider endpoint
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded default base URL is invalid (should never happen).
    pub fn base_url(&self) -> Url {
        self.base_url
            .clone()
            .unwrap_or_else(|| Url::parse(DEFAULT_LLM_BASE_URL).expect("valid default URL"))
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            model: default_model(),
            context_window: default_context_window(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_owned()
}

const fn default_context_window() -> u32 {
    16_000
}

const fn default_temperature() -> f64 {
    0.7
}

const fn default_max_tokens() -> u32 {
    128
}
