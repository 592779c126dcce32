//! Mock LLM backend server for integration tests
//!
//! Implements a minimal OpenAI-compatible chat completions endpoint that
//! replays scripted replies in order and records every request body.

use std::collections::VecDeque;
use std::fmt::Write as _;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde_json::{Value, json};

use super::Served;

const DEFAULT_CONTENT: &str = "Hello from mock LLM";

/// One scripted provider turn
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Assistant text answer
    Text(String),
    /// Assistant turn requesting `(id, name, arguments)` tool calls
    ToolCalls(Vec<(String, String, String)>),
    /// A response carrying no choices
    NoChoices,
    /// SSE stream of content deltas followed by `[DONE]`
    Stream(Vec<String>),
    /// SSE stream whose first chunk carries no choices
    StreamWithoutChoices,
    /// Error status with an OpenAI-style error body
    Fail(StatusCode),
}

impl MockReply {
    pub fn text(content: &str) -> Self {
        Self::Text(content.to_owned())
    }

    pub fn tool_call(id: &str, name: &str, arguments: &str) -> Self {
        Self::ToolCalls(vec![(id.to_owned(), name.to_owned(), arguments.to_owned())])
    }

    pub fn stream(deltas: &[&str]) -> Self {
        Self::Stream(deltas.iter().map(|d| (*d).to_owned()).collect())
    }
}

/// Mock LLM backend that returns scripted responses
pub struct MockLlm {
    served: Served,
    state: Arc<MockLlmState>,
}

struct MockLlmState {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<Value>>,
}

impl MockLlm {
    /// Start a mock that answers every request with a fixed greeting
    pub async fn start() -> anyhow::Result<Self> {
        Self::scripted([]).await
    }

    /// Start a mock that replays `replies` in order, then falls back to the greeting
    pub async fn scripted(replies: impl IntoIterator<Item = MockReply>) -> anyhow::Result<Self> {
        let state = Arc::new(MockLlmState {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/chat/completions", routing::post(handle_chat_completions))
            .with_state(Arc::clone(&state));

        Ok(Self {
            served: Served::start(app).await?,
            state,
        })
    }

    /// Base URL for configuring the mock as the provider
    ///
    /// Includes `/v1` since the provider appends `/chat/completions`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.served.addr)
    }

    /// Request bodies received so far, in arrival order
    pub fn requests(&self) -> Vec<Value> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Number of completion requests received
    pub fn completion_count(&self) -> usize {
        self.state.requests.lock().unwrap().len()
    }
}

async fn handle_chat_completions(State(state): State<Arc<MockLlmState>>, Json(req): Json<Value>) -> Response {
    state.requests.lock().unwrap().push(req.clone());

    let reply = state
        .replies
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| MockReply::text(DEFAULT_CONTENT));
    let model = req["model"].as_str().unwrap_or("mock-model").to_owned();

    match reply {
        MockReply::Text(content) => Json(completion(&model, json!({"role": "assistant", "content": content}))).into_response(),
        MockReply::ToolCalls(calls) => {
            let tool_calls: Vec<Value> = calls
                .into_iter()
                .map(|(id, name, arguments)| {
                    json!({"id": id, "type": "function", "function": {"name": name, "arguments": arguments}})
                })
                .collect();
            let message = json!({"role": "assistant", "content": null, "tool_calls": tool_calls});
            Json(completion(&model, message)).into_response()
        }
        MockReply::NoChoices => Json(json!({
            "id": "chatcmpl-test-123",
            "object": "chat.completion",
            "model": model,
            "choices": [],
        }))
        .into_response(),
        MockReply::Stream(deltas) => sse(&stream_body(&model, &deltas)),
        MockReply::StreamWithoutChoices => {
            let usage = json!({
                "id": "chatcmpl-test-stream",
                "object": "chat.completion.chunk",
                "model": model,
                "choices": [],
                "usage": {"prompt_tokens": 10, "completion_tokens": 0, "total_tokens": 10},
            });
            let late = stream_chunk(&model, json!({"content": "too late"}), None);
            sse(&format!("data: {usage}\n\ndata: {late}\n\ndata: [DONE]\n\n"))
        }
        MockReply::Fail(status) => (
            status,
            Json(json!({
                "error": {
                    "message": "mock server intentional failure",
                    "type": "server_error"
                }
            })),
        )
            .into_response(),
    }
}

fn completion(model: &str, message: Value) -> Value {
    let finish_reason = if message.get("tool_calls").is_some() { "tool_calls" } else { "stop" };
    json!({
        "id": "chatcmpl-test-123",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": model,
        "choices": [{"index": 0, "message": message, "finish_reason": finish_reason}],
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15},
    })
}

fn stream_chunk(model: &str, delta: Value, finish_reason: Option<&str>) -> Value {
    json!({
        "id": "chatcmpl-test-stream",
        "object": "chat.completion.chunk",
        "created": 1_700_000_000,
        "model": model,
        "choices": [{"index": 0, "delta": delta, "finish_reason": finish_reason}],
    })
}

/// Role chunk, one chunk per delta, a finishing chunk, then `[DONE]`
fn stream_body(model: &str, deltas: &[String]) -> String {
    let mut body = String::new();

    let role = stream_chunk(model, json!({"role": "assistant"}), None);
    let _ = write!(body, "data: {role}\n\n");

    for delta in deltas {
        let chunk = stream_chunk(model, json!({"content": delta}), None);
        let _ = write!(body, "data: {chunk}\n\n");
    }

    let finish = stream_chunk(model, json!({}), Some("stop"));
    let _ = write!(body, "data: {finish}\n\n");
    body.push_str("data: [DONE]\n\n");

    body
}

fn sse(body: &str) -> Response {
    ([(header::CONTENT_TYPE, "text/event-stream")], body.to_owned()).into_response()
}
