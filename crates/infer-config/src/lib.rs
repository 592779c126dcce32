#![allow(clippy::must_use_candidate)]

pub mod chat;
mod env;
pub mod llm;
mod loader;
pub mod server;
pub mod telemetry;
pub mod weather;

use serde::Deserialize;

pub use chat::*;
pub use llm::*;
pub use server::*;
pub use telemetry::*;
pub use weather::*;

/// Top-level service configuration
///
/// Built once at startup and handed to each subsystem's constructor.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Completion provider configuration
    #[serde(default)]
    pub llm: LlmConfig,
    /// Weather API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Output budget and prompt configuration
    #[serde(default)]
    pub chat: ChatConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
