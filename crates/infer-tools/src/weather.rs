//! Current-weather lookup against the OpenWeatherMap API
//!
//! The tool never fails from the caller's point of view: any upstream
//! problem (non-200 status, timeout, connection error, unexpected body)
//! yields an "unknown" reading so the model can still answer.

use std::collections::BTreeSet;
use std::time::Duration;

use infer_config::WeatherConfig;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use url::Url;

use crate::error::ToolError;
use crate::registry::ToolDefinition;

/// Name the model uses to call the weather tool
pub const WEATHER_TOOL_NAME: &str = "get_current_weather_from_owm";

/// Upper bound for a single upstream lookup
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Placeholder value for fields of a failed lookup
const UNKNOWN: &str = "unknown";

/// Measurement system requested from the upstream API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// Value of the upstream `units` query parameter
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }

    /// Parse a model-supplied unit name, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "metric" => Some(Self::Metric),
            "imperial" => Some(Self::Imperial),
            _ => None,
        }
    }

    pub const fn temperature_unit(self) -> &'static str {
        match self {
            Self::Metric => "°C",
            Self::Imperial => "°F",
        }
    }

    pub const fn pressure_unit(self) -> &'static str {
        match self {
            Self::Metric => "hPa",
            Self::Imperial => "inHg",
        }
    }

    pub const fn speed_unit(self) -> &'static str {
        match self {
            Self::Metric => "m/s",
            Self::Imperial => "mph",
        }
    }
}

/// Normalized reading returned to the model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReading {
    pub location: String,
    pub country: String,
    pub temperature: Number,
    pub humidity: Number,
    pub pressure: Number,
    pub pressure_unit: &'static str,
    pub feels_like: Number,
    pub wind_speed: Number,
    pub description: String,
    pub temperature_unit: &'static str,
    pub speed_unit: &'static str,
}

/// Degraded reading used whenever the lookup fails
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnknownWeather {
    pub location: String,
    pub temperature: &'static str,
    pub description: &'static str,
}

impl UnknownWeather {
    pub fn new(location: &str) -> Self {
        Self {
            location: location.to_owned(),
            temperature: UNKNOWN,
            description: UNKNOWN,
        }
    }
}

// -- Upstream payload --

#[derive(Debug, Deserialize)]
struct OwmPayload {
    name: String,
    sys: OwmSys,
    main: OwmMain,
    wind: OwmWind,
    weather: Vec<OwmCondition>,
}

#[derive(Debug, Deserialize)]
struct OwmSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: Number,
    humidity: Number,
    pressure: Number,
    feels_like: Number,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: Number,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    description: String,
}

/// Why a lookup degraded; only ever logged
#[derive(Debug, thiserror::Error)]
enum LookupError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream returned {0}")]
    Status(StatusCode),
    #[error("unexpected payload: {0}")]
    Payload(String),
}

/// OpenWeatherMap current-weather client
#[derive(Debug)]
pub struct WeatherTool {
    client: Client,
    base_url: Url,
    api_key: Option<SecretString>,
}

impl WeatherTool {
    /// Create from weather configuration
    ///
    /// # Errors
    ///
    /// Returns `ToolError::Client` if the HTTP client cannot be built.
    pub fn new(config: &WeatherConfig) -> Result<Self, ToolError> {
        let client = Client::builder().timeout(LOOKUP_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: config.base_url(),
            api_key: config.api_key.clone(),
        })
    }

    /// Function-calling metadata advertised to the model
    pub fn definition() -> ToolDefinition {
        ToolDefinition {
            name: WEATHER_TOOL_NAME.to_owned(),
            description: "Get the current weather in a given location".to_owned(),
            parameter_schema: serde_json::json!({
                "location": {
                    "type": "string",
                    "description": "The city or state, e.g. San Francisco, CA",
                },
                "unit_sys": {
                    "type": "string",
                    "enum": ["metric", "imperial"],
                },
            }),
            required_parameters: BTreeSet::from(["location".to_owned()]),
        }
    }

    /// Invoke with model-supplied arguments
    ///
    /// Accepts `unit_sys` (as advertised) or `unit`; anything missing or
    /// unrecognized falls back to metric.
    pub async fn call(&self, arguments: &Map<String, Value>) -> String {
        let location = arguments.get("location").and_then(Value::as_str).unwrap_or_default();

        let units = arguments
            .get("unit_sys")
            .or_else(|| arguments.get("unit"))
            .and_then(Value::as_str)
            .map_or(Some(UnitSystem::Metric), UnitSystem::parse)
            .unwrap_or_else(|| {
                tracing::debug!(tool = WEATHER_TOOL_NAME, "unrecognized unit system, using metric");
                UnitSystem::Metric
            });

        self.fetch(location, units).await
    }

    /// Look up the current weather, returning a JSON-encoded reading
    ///
    /// Never fails: on any error the result is an `UnknownWeather` payload.
    pub async fn fetch(&self, location: &str, units: UnitSystem) -> String {
        match self.lookup(location, units).await {
            Ok(reading) => encode(&reading, location),
            Err(e) => {
                tracing::warn!(tool = WEATHER_TOOL_NAME, location, error = %e, "weather lookup degraded");
                encode(&UnknownWeather::new(location), location)
            }
        }
    }

    async fn lookup(&self, location: &str, units: UnitSystem) -> Result<WeatherReading, LookupError> {
        let appid = self.api_key.as_ref().map_or("", |k| k.expose_secret());

        let response = self
            .client
            .get(self.base_url.clone())
            .query(&[("q", location), ("appid", appid), ("units", units.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(LookupError::Status(status));
        }

        let body = response.text().await?;
        parse_reading(&body, units)
    }
}

/// Map an upstream 200 body into the normalized reading
fn parse_reading(body: &str, units: UnitSystem) -> Result<WeatherReading, LookupError> {
    let payload: OwmPayload = serde_json::from_str(body).map_err(|e| LookupError::Payload(e.to_string()))?;

    let description = payload
        .weather
        .into_iter()
        .next()
        .map(|condition| condition.description)
        .ok_or_else(|| LookupError::Payload("empty weather list".to_owned()))?;

    Ok(WeatherReading {
        location: payload.name,
        country: payload.sys.country,
        temperature: payload.main.temp,
        humidity: payload.main.humidity,
        pressure: payload.main.pressure,
        pressure_unit: units.pressure_unit(),
        feels_like: payload.main.feels_like,
        wind_speed: payload.wind.speed,
        description,
        temperature_unit: units.temperature_unit(),
        speed_unit: units.speed_unit(),
    })
}

/// Serialize a reading, degrading to a literal unknown payload on failure
fn encode<T: Serialize>(value: &T, location: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        tracing::error!(tool = WEATHER_TOOL_NAME, error = %e, "failed to encode weather reading");
        serde_json::json!({
            "location": location,
            "temperature": UNKNOWN,
            "description": UNKNOWN,
        })
        .to_string()
    })
}
