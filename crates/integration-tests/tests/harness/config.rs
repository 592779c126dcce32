//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use infer_config::{ChatConfig, Config, HealthConfig, LlmConfig, ServerConfig, TelemetryConfig, WeatherConfig};
use secrecy::SecretString;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: SocketAddr::from(([127, 0, 0, 1], 0)),
                    health: HealthConfig::default(),
                },
                llm: LlmConfig::default(),
                weather: WeatherConfig::default(),
                chat: ChatConfig::default(),
                telemetry: TelemetryConfig::default(),
            },
        }
    }

    /// Point the provider client at a mock OpenAI-compatible backend
    pub fn with_llm(mut self, base_url: &str) -> Self {
        self.config.llm.base_url = Some(base_url.parse().expect("valid URL"));
        self.config.llm.api_key = Some(SecretString::from("test-key"));
        self.config.llm.model = "mock-model".to_owned();
        self
    }

    /// Point the weather tool at a mock OpenWeatherMap backend
    pub fn with_weather(mut self, base_url: &str) -> Self {
        self.config.weather.base_url = Some(base_url.parse().expect("valid URL"));
        self.config.weather.api_key = Some(SecretString::from("owm-test-key"));
        self
    }

    /// Set the process-wide output word budget
    pub fn with_output_max_tokens(mut self, max: u32) -> Self {
        self.config.chat.output_max_tokens = max;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config, checking it the way the loader does
    pub fn build(self) -> Config {
        self.config.validate().expect("test config is valid");
        self.config
    }
}
