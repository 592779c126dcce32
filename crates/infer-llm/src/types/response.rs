use super::message::ToolCall;

/// Why the provider stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    Length,
    ToolCalls,
    ContentFilter,
}

/// Provider-reported token accounting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub index: u32,
    pub message: ChoiceMessage,
    pub finish_reason: Option<FinishReason>,
}

/// One provider turn: text, tool calls, or (structurally) both
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChoiceMessage {
    pub content: Option<String>,
    /// Tool-call directives in the order the provider returned them
    pub tool_calls: Vec<ToolCall>,
}

impl ChoiceMessage {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            tool_calls: Vec::new(),
        }
    }

    pub const fn with_tool_calls(tool_calls: Vec<ToolCall>) -> Self {
        Self {
            content: None,
            tool_calls,
        }
    }
}

/// Provider-agnostic completion response
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    pub id: String,
    pub model: String,
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

impl CompletionResponse {
    /// First choice's message; `None` when the provider returned no choices
    pub fn into_first_message(self) -> Option<ChoiceMessage> {
        self.choices.into_iter().next().map(|choice| choice.message)
    }
}
