//! Provider trait and implementations for completion backends

pub mod openai;

use std::pin::Pin;

use async_trait::async_trait;
use futures_util::Stream;

use crate::error::InferenceError;
use crate::types::{CompletionRequest, CompletionResponse, StreamEvent};

/// Boxed stream of events from a streamed completion
pub type CompletionStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, InferenceError>> + Send>>;

/// Trait implemented by each completion backend
///
/// The orchestrator depends only on this contract, never on a provider's
/// SDK shape. Implementations do not retry.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Human-readable provider name
    fn name(&self) -> &str;

    /// Send a non-streaming completion request
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, InferenceError>;

    /// Send a streaming completion request
    ///
    /// Dropping the returned stream releases the underlying connection.
    async fn complete_stream(&self, request: &CompletionRequest) -> Result<CompletionStream, InferenceError>;
}
