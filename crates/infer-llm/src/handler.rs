//! Axum route handlers for the inference endpoints

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use futures_util::{Stream, StreamExt};
use infer_config::Config;
use infer_core::{ErrorBody, HttpError};
use serde::Deserialize;

use crate::error::InferenceError;
use crate::orchestrator::{Orchestrator, TokenStream};

const ROOT_MESSAGE: &str = "Navigate to /docs to see the API documentation.";
const DEFAULT_CHAT_PROMPT: &str = "Tell me about Nicolas Cage.";
const DEFAULT_WEATHER_PROMPT: &str = "Bergamo, Italy";

/// Shared state for inference route handlers
#[derive(Clone)]
pub struct InferenceState {
    orchestrator: Orchestrator,
    chat_max_tokens: u32,
    weather_max_tokens: u32,
}

impl InferenceState {
    /// Pair an orchestrator with the configured per-route defaults
    pub const fn new(orchestrator: Orchestrator, config: &Config) -> Self {
        Self {
            orchestrator,
            chat_max_tokens: config.llm.max_tokens,
            weather_max_tokens: config.weather.max_tokens,
        }
    }
}

/// Inbound chat request; every field is optional
#[derive(Debug, Default, Deserialize)]
pub struct ChatInput {
    #[serde(default)]
    pub user_prompt: Option<String>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

impl ChatInput {
    fn resolve(self, default_prompt: &str, default_max_tokens: u32) -> (String, u32) {
        (
            self.user_prompt.unwrap_or_else(|| default_prompt.to_owned()),
            self.max_tokens.unwrap_or(default_max_tokens),
        )
    }
}

/// Build the router with all inference endpoints
pub fn inference_router(state: InferenceState) -> Router {
    Router::new()
        .route("/", routing::get(root))
        .route("/inference/batch", routing::post(batch))
        .route("/inference/stream", routing::post(stream))
        .route("/inference/weather", routing::post(weather))
        .with_state(state)
}

/// Handle `GET /`
async fn root() -> Json<&'static str> {
    Json(ROOT_MESSAGE)
}

/// Handle `POST /inference/batch`
async fn batch(State(state): State<InferenceState>, input: Result<Json<ChatInput>, JsonRejection>) -> Response {
    let input = match input {
        Ok(Json(input)) => input,
        Err(rejection) => return error_response(&rejected(&rejection)),
    };
    let (prompt, max_tokens) = input.resolve(DEFAULT_CHAT_PROMPT, state.chat_max_tokens);

    match state.orchestrator.batch(&prompt, max_tokens).await {
        Ok(answer) => Json(answer).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Handle `POST /inference/stream`
async fn stream(State(state): State<InferenceState>, input: Result<Json<ChatInput>, JsonRejection>) -> Response {
    let input = match input {
        Ok(Json(input)) => input,
        Err(rejection) => return error_response(&rejected(&rejection)),
    };
    let (prompt, max_tokens) = input.resolve(DEFAULT_CHAT_PROMPT, state.chat_max_tokens);

    match state.orchestrator.stream(&prompt, max_tokens).await {
        Ok(fragments) => sse_response(fragments).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Handle `POST /inference/weather`
async fn weather(State(state): State<InferenceState>, input: Result<Json<ChatInput>, JsonRejection>) -> Response {
    let input = match input {
        Ok(Json(input)) => input,
        Err(rejection) => return error_response(&rejected(&rejection)),
    };
    let (prompt, max_tokens) = input.resolve(DEFAULT_WEATHER_PROMPT, state.weather_max_tokens);

    match state.orchestrator.tool_augmented(&prompt, max_tokens).await {
        Ok(answer) => Json(answer).into_response(),
        Err(e) => error_response(&e),
    }
}

fn rejected(rejection: &JsonRejection) -> InferenceError {
    InferenceError::InvalidRequest(rejection.body_text())
}

/// One `data:` event per fragment, each a JSON string
///
/// A failure after the stream has started becomes a final `error` event.
fn sse_response(fragments: TokenStream) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let events = fragments.map(|item| match item {
        Ok(chunk) => Event::default().json_data(chunk.delta_content),
        Err(e) => Event::default().event("error").json_data(ErrorBody::of(&e)),
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Convert an inference error to a JSON error response
fn error_response(error: &InferenceError) -> Response {
    if error.status_code().is_server_error() {
        tracing::error!(error = %error, "inference request failed");
    } else {
        tracing::debug!(error = %error, "inference request rejected");
    }

    (error.status_code(), Json(ErrorBody::of(error))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_route_defaults() {
        let input: ChatInput = serde_json::from_str("{}").unwrap();
        let (prompt, max_tokens) = input.resolve(DEFAULT_WEATHER_PROMPT, 128);

        assert_eq!(prompt, "Bergamo, Italy");
        assert_eq!(max_tokens, 128);
    }

    #[test]
    fn supplied_fields_win() {
        let input: ChatInput = serde_json::from_str(r#"{"user_prompt":"hi","max_tokens":7}"#).unwrap();
        assert_eq!(input.resolve(DEFAULT_CHAT_PROMPT, 128), ("hi".to_owned(), 7));
    }

    #[test]
    fn out_of_range_max_tokens_is_invalid_request() {
        let error = InferenceError::InvalidRequest("max_tokens: invalid value".to_owned());
        let json = serde_json::to_value(ErrorBody::of(&error)).unwrap();

        assert_eq!(error.status_code(), http::StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["type"], "invalid_request_error");
        assert!(json["error"]["message"].as_str().unwrap().contains("max_tokens"));
    }

    #[test]
    fn error_body_uses_client_message() {
        let body = ErrorBody::of(&InferenceError::ProviderUnavailable("secret detail".to_owned()));
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["error"]["type"], "provider_unavailable");
        assert!(!json.to_string().contains("secret detail"));
    }
}
