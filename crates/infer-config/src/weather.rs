use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Default OpenWeatherMap current-weather endpoint
pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Weather lookup tool configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeatherConfig {
    /// Current-weather endpoint
    #[serde(default)]
    pub base_url: Option<Url>,
    /// OpenWeatherMap API key, sent as `appid`
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Advisory output hint for the tool-selecting turn
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl WeatherConfig {
    /// Configured endpoint, or the public OpenWeatherMap one
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded default base URL is invalid (should never happen).
    pub fn base_url(&self) -> Url {
        self.base_url
            .clone()
            .unwrap_or_else(|| Url::parse(DEFAULT_WEATHER_BASE_URL).expect("valid default URL"))
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            max_tokens: default_max_tokens(),
        }
    }
}

const fn default_max_tokens() -> u32 {
    128
}
