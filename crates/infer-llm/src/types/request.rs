use super::message::Message;
use super::tool::{ToolChoice, ToolDefinition};

/// Sampling knobs forwarded to the provider
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionParams {
    pub temperature: Option<f64>,
    /// Advisory only; the output budget is enforced separately
    pub max_tokens: Option<u32>,
}

/// Provider-agnostic completion request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub params: CompletionParams,
    /// Tools advertised to the model; `None` on turns that must not call tools
    pub tools: Option<Vec<ToolDefinition>>,
    pub tool_choice: Option<ToolChoice>,
    pub stream: bool,
}
