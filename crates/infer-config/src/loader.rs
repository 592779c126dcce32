use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if token bounds are inverted or exceed the
    /// context window, or the model settings are unusable
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_llm_config()?;
        self.validate_output_bounds()?;
        Ok(())
    }

    fn validate_llm_config(&self) -> anyhow::Result<()> {
        if self.llm.model.trim().is_empty() {
            anyhow::bail!("llm.model must not be empty");
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            anyhow::bail!("llm.temperature must be between 0.0 and 2.0, got {}", self.llm.temperature);
        }

        Ok(())
    }

    fn validate_output_bounds(&self) -> anyhow::Result<()> {
        let window = self.llm.context_window;
        let chat = &self.chat;

        if chat.output_min_tokens > chat.output_max_tokens {
            anyhow::bail!(
                "chat.output_min_tokens ({}) must not exceed chat.output_max_tokens ({})",
                chat.output_min_tokens,
                chat.output_max_tokens
            );
        }

        for (name, value) in [
            ("chat.output_max_tokens", chat.output_max_tokens),
            ("llm.max_tokens", self.llm.max_tokens),
            ("weather.max_tokens", self.weather.max_tokens),
        ] {
            if value > window {
                anyhow::bail!("{name} ({value}) exceeds llm.context_window ({window})");
            }
        }

        Ok(())
    }
}
