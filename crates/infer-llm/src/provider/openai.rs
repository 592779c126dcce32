//! OpenAI-compatible provider implementation

use async_trait::async_trait;
use eventsource_stream::Eventsource;
use futures_util::StreamExt;
use infer_config::LlmConfig;
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use super::{CompletionStream, Provider};
use crate::convert::openai::openai_chunk_to_event;
use crate::error::InferenceError;
use crate::protocol::openai::{OpenAiRequest, OpenAiResponse, OpenAiStreamChunk};
use crate::types::{CompletionRequest, CompletionResponse, StreamEvent};

/// OpenAI-compatible provider (Together AI, vLLM, `OpenAI` itself)
pub struct OpenAiProvider {
    name: String,
    client: Client,
    base_url: Url,
    api_key: Option<SecretString>,
}

impl OpenAiProvider {
    /// Create from provider configuration
    ///
    /// # Errors
    ///
    /// Returns `InferenceError::Internal` if the HTTP client cannot be built.
    pub fn new(name: impl Into<String>, config: &LlmConfig) -> Result<Self, InferenceError> {
        let client = Client::builder()
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build provider HTTP client: {e}"))?;

        Ok(Self {
            name: name.into(),
            client,
            base_url: config.base_url(),
            api_key: config.api_key.clone(),
        })
    }

    /// Build the chat completions URL
    fn completions_url(&self) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/chat/completions")
    }

    fn post(&self, wire_request: &OpenAiRequest) -> RequestBuilder {
        let builder = self.client.post(self.completions_url()).json(wire_request);

        match &self.api_key {
            Some(key) => builder.bearer_auth(key.expose_secret()),
            None => builder,
        }
    }

    /// Send the request and reject non-2xx responses
    async fn send(&self, wire_request: &OpenAiRequest) -> Result<reqwest::Response, InferenceError> {
        let response = self.post(wire_request).send().await.map_err(|e| {
            tracing::error!(provider = %self.name, error = %e, "upstream request failed");
            InferenceError::ProviderUnavailable(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(provider = %self.name, status = %status, "upstream returned error");
            return Err(InferenceError::ProviderUnavailable(format!("provider returned {status}: {body}")));
        }

        Ok(response)
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, InferenceError> {
        let wire_request: OpenAiRequest = request.into();

        let wire_response: OpenAiResponse = self
            .send(&wire_request)
            .await?
            .json()
            .await
            .map_err(|e| InferenceError::ProviderUnavailable(format!("failed to parse response: {e}")))?;

        Ok(wire_response.into())
    }

    async fn complete_stream(&self, request: &CompletionRequest) -> Result<CompletionStream, InferenceError> {
        let mut wire_request: OpenAiRequest = request.into();
        wire_request.stream = Some(true);

        let response = self.send(&wire_request).await?;

        let mapped = response.bytes_stream().eventsource().filter_map(|result| async move {
            match result {
                Ok(event) => {
                    let data = event.data.trim();
                    if data == "[DONE]" {
                        return Some(Ok(StreamEvent::Done));
                    }

                    match serde_json::from_str::<OpenAiStreamChunk>(data) {
                        Ok(chunk) => Some(Ok(openai_chunk_to_event(chunk))),
                        Err(e) => {
                            tracing::debug!(error = %e, data = %data, "skipping unparseable SSE chunk");
                            None
                        }
                    }
                }
                Err(e) => Some(Err(InferenceError::Streaming(e.to_string()))),
            }
        });

        Ok(Box::pin(mapped))
    }
}
