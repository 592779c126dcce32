//! Mock OpenWeatherMap current-weather endpoint for integration tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde_json::{Value, json};

use super::Served;

/// How the mock answers every lookup
#[derive(Debug, Clone)]
pub enum WeatherReply {
    /// HTTP 200 with this body
    Reading(Value),
    /// Bare error status
    Status(StatusCode),
}

/// Mock weather backend that records every query
pub struct MockWeather {
    served: Served,
    state: Arc<MockWeatherState>,
}

struct MockWeatherState {
    reply: WeatherReply,
    queries: Mutex<Vec<HashMap<String, String>>>,
}

impl MockWeather {
    /// Start a mock reporting clear skies over Bergamo
    pub async fn bergamo() -> anyhow::Result<Self> {
        Self::start(WeatherReply::Reading(json!({
            "name": "Bergamo",
            "sys": {"country": "IT"},
            "main": {"temp": 18, "humidity": 60, "pressure": 1015, "feels_like": 17.4},
            "wind": {"speed": 2.1},
            "weather": [{"description": "clear sky"}],
        })))
        .await
    }

    pub async fn start(reply: WeatherReply) -> anyhow::Result<Self> {
        let state = Arc::new(MockWeatherState {
            reply,
            queries: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/data/2.5/weather", routing::get(handle_weather))
            .with_state(Arc::clone(&state));

        Ok(Self {
            served: Served::start(app).await?,
            state,
        })
    }

    /// Endpoint to configure as the weather base URL
    pub fn base_url(&self) -> String {
        format!("http://{}/data/2.5/weather", self.served.addr)
    }

    /// Query strings received so far
    pub fn queries(&self) -> Vec<HashMap<String, String>> {
        self.state.queries.lock().unwrap().clone()
    }

    pub fn hits(&self) -> usize {
        self.state.queries.lock().unwrap().len()
    }
}

async fn handle_weather(
    State(state): State<Arc<MockWeatherState>>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state.queries.lock().unwrap().push(query);

    match &state.reply {
        WeatherReply::Reading(body) => Json(body.clone()).into_response(),
        WeatherReply::Status(status) => (*status, "city not found").into_response(),
    }
}
