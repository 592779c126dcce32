//! Chat inference orchestration
//!
//! Builds provider requests for batch, streamed and tool-augmented chat,
//! runs the two-phase tool-calling protocol against the [`infer_tools`]
//! registry, and governs output length with a word-count budget.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod budget;
pub mod conversation;
pub mod convert;
pub mod error;
#[cfg(feature = "http")]
pub mod handler;
pub mod orchestrator;
pub mod prompts;
pub mod protocol;
pub mod provider;
pub mod types;

pub use error::InferenceError;
#[cfg(feature = "http")]
pub use handler::{InferenceState, inference_router};
pub use orchestrator::{Orchestrator, TokenStream};
pub use provider::Provider;
pub use types::{CompletionRequest, CompletionResponse, StreamChunk, StreamEvent};
