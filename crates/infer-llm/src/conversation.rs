//! Role-tagged message sequences for each inference mode

use crate::types::{Message, Role, ToolCall};

/// Ordered messages for one request, system prompt first
///
/// Owned by a single request and never shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Two-message conversation for batch and stream modes
    pub fn for_chat(system_prompt: &str, user_prompt: &str) -> Self {
        Self::seed(system_prompt, user_prompt)
    }

    /// Two-message conversation for tool-augmented mode
    ///
    /// Tool results are appended later with [`Self::push_tool_calls`] and
    /// [`Self::push_tool_result`].
    pub fn for_tools(system_prompt: &str, user_prompt: &str) -> Self {
        Self::seed(system_prompt, user_prompt)
    }

    fn seed(system_prompt: &str, user_prompt: &str) -> Self {
        Self {
            messages: vec![Message::system(system_prompt), Message::user(user_prompt)],
        }
    }

    /// Record the assistant turn that requested `calls`
    pub fn push_tool_calls(&mut self, calls: Vec<ToolCall>) {
        self.messages.push(Message::assistant_tool_calls(calls));
    }

    /// Append a tool result answering `call`
    ///
    /// Results whose call id was never requested by a preceding assistant
    /// turn are dropped.
    pub fn push_tool_result(&mut self, call: &ToolCall, content: impl Into<String>) {
        if !self.was_requested(&call.id) {
            tracing::warn!(call_id = %call.id, "dropping tool result without a matching tool call");
            return;
        }
        self.messages.push(Message::tool_result(call, content));
    }

    fn was_requested(&self, call_id: &str) -> bool {
        self.messages
            .iter()
            .filter(|m| m.role == Role::Assistant)
            .filter_map(|m| m.tool_calls.as_deref())
            .flatten()
            .any(|c| c.id == call_id)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}
