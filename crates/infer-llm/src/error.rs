use http::StatusCode;
use infer_core::HttpError;
use thiserror::Error;

/// Errors that terminate an inference request
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Provider returned no usable completion
    #[error("chat completion is empty")]
    EmptyCompletion,

    /// Transport-level failure talking to the provider (timeout, connection, non-2xx)
    #[error("provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The model emitted tool arguments that are not a JSON object
    #[error("malformed arguments for tool {tool}: {source}")]
    MalformedToolArguments {
        tool: String,
        #[source]
        source: serde_json::Error,
    },

    /// Error while reading a provider stream
    #[error("streaming error: {0}")]
    Streaming(String),

    /// Client sent a malformed or invalid request
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Unexpected internal error
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl HttpError for InferenceError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::EmptyCompletion => StatusCode::NOT_FOUND,
            Self::ProviderUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::MalformedToolArguments { .. } => StatusCode::BAD_GATEWAY,
            Self::Streaming(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::EmptyCompletion => "not_found_error",
            Self::ProviderUnavailable(_) => "provider_unavailable",
            Self::MalformedToolArguments { .. } => "tool_arguments_error",
            Self::Streaming(_) => "streaming_error",
            Self::InvalidRequest(_) => "invalid_request_error",
            Self::Internal(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::ProviderUnavailable(_) => "the completion provider is unavailable".to_owned(),
            Self::MalformedToolArguments { tool, .. } => format!("model produced malformed arguments for tool {tool}"),
            Self::Internal(_) => "an internal error occurred".to_owned(),
            other => other.to_string(),
        }
    }
}
