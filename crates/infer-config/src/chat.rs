use serde::Deserialize;

/// Output governance and prompt configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChatConfig {
    /// Lower bound for a request's advisory `max_tokens`
    #[serde(default)]
    pub output_min_tokens: u32,
    /// Process-wide word budget applied to every response
    #[serde(default = "default_output_max_tokens")]
    pub output_max_tokens: u32,
    /// Override for the plain chat system prompt
    #[serde(default)]
    pub system_prompt: Option<String>,
    /// Override for the tool-enabled system prompt
    #[serde(default)]
    pub tool_system_prompt: Option<String>,
}

impl ChatConfig {
    /// Clamp a requested output hint into the configured bounds
    pub fn clamp_max_tokens(&self, requested: u32) -> u32 {
        requested.clamp(self.output_min_tokens, self.output_max_tokens.max(self.output_min_tokens))
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            output_min_tokens: 0,
            output_max_tokens: default_output_max_tokens(),
            system_prompt: None,
            tool_system_prompt: None,
        }
    }
}

const fn default_output_max_tokens() -> u32 {
    768
}
