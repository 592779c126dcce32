//! Internal canonical types for completion requests and responses
//!
//! These are provider-agnostic; the wire format in `protocol` converts to
//! and from them.

pub mod message;
pub mod request;
pub mod response;
pub mod stream;
pub mod tool;

pub use message::{FunctionCall, Message, Role, ToolCall};
pub use request::{CompletionParams, CompletionRequest};
pub use response::{Choice, ChoiceMessage, CompletionResponse, FinishReason, Usage};
pub use stream::{StreamChunk, StreamEvent};
pub use tool::{FunctionDefinition, ToolChoice, ToolDefinition};
