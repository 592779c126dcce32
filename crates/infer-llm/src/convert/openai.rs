//! Conversion between internal types and `OpenAI` wire format

use crate::protocol::openai::{
    OpenAiFunction, OpenAiFunctionCall, OpenAiMessage, OpenAiRequest, OpenAiResponse, OpenAiStreamChunk, OpenAiTool,
    OpenAiToolCall, OpenAiUsage,
};
use crate::types::{
    Choice, ChoiceMessage, CompletionRequest, CompletionResponse, FinishReason, FunctionCall, Message, Role,
    StreamChunk, StreamEvent, ToolCall, Usage,
};

// -- Outbound: internal request -> OpenAI wire request --

impl From<&CompletionRequest> for OpenAiRequest {
    fn from(req: &CompletionRequest) -> Self {
        Self {
            model: req.model.clone(),
            messages: req.messages.iter().map(Into::into).collect(),
            temperature: req.params.temperature,
            max_completion_tokens: req.params.max_tokens,
            stream: req.stream.then_some(true),
            tools: req.tools.as_ref().map(|tools| {
                tools
                    .iter()
                    .map(|t| OpenAiTool {
                        tool_type: "function".to_owned(),
                        function: OpenAiFunction {
                            name: t.function.name.clone(),
                            description: Some(t.function.description.clone()),
                            parameters: Some(t.function.parameters.clone()),
                        },
                    })
                    .collect()
            }),
            tool_choice: req.tool_choice.map(|choice| choice.as_str().to_owned()),
        }
    }
}

impl From<&Message> for OpenAiMessage {
    fn from(msg: &Message) -> Self {
        let role = match msg.role {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
        };

        // Assistant tool-call turns carry no text; send null rather than ""
        let content = if msg.content.is_empty() && msg.tool_calls.is_some() {
            None
        } else {
            Some(msg.content.clone())
        };

        let tool_calls = msg.tool_calls.as_ref().map(|calls| {
            calls
                .iter()
                .map(|tc| OpenAiToolCall {
                    id: tc.id.clone(),
                    tool_type: "function".to_owned(),
                    function: OpenAiFunctionCall {
                        name: tc.function.name.clone(),
                        arguments: tc.function.arguments.clone(),
                    },
                })
                .collect()
        });

        Self {
            role,
            content,
            name: msg.name.clone(),
            tool_calls,
            tool_call_id: msg.tool_call_id.clone(),
        }
    }
}

// -- Inbound: OpenAI wire response -> internal types --

impl From<OpenAiResponse> for CompletionResponse {
    fn from(resp: OpenAiResponse) -> Self {
        Self {
            id: resp.id,
            model: resp.model,
            choices: resp
                .choices
                .into_iter()
                .map(|c| Choice {
                    index: c.index,
                    finish_reason: c.finish_reason.as_deref().and_then(parse_finish_reason),
                    message: ChoiceMessage {
                        content: c.message.content,
                        tool_calls: c
                            .message
                            .tool_calls
                            .unwrap_or_default()
                            .into_iter()
                            .map(|tc| ToolCall {
                                id: tc.id,
                                function: FunctionCall {
                                    name: tc.function.name,
                                    arguments: tc.function.arguments,
                                },
                            })
                            .collect(),
                    },
                })
                .collect(),
            usage: resp.usage.map(Into::into),
        }
    }
}

impl From<OpenAiUsage> for Usage {
    fn from(usage: OpenAiUsage) -> Self {
        Self {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        }
    }
}

// -- Stream conversion --

/// Convert an `OpenAI` stream chunk into an internal stream event
///
/// Only the first choice is followed. A chunk without choices ends the
/// turn: it becomes `Usage` if the host attached statistics, else `Done`.
pub fn openai_chunk_to_event(chunk: OpenAiStreamChunk) -> StreamEvent {
    match chunk.choices.into_iter().next() {
        Some(choice) => StreamEvent::Chunk(StreamChunk {
            delta_content: choice.delta.content.unwrap_or_default(),
            is_final: choice.finish_reason.is_some(),
        }),
        None => chunk.usage.map_or(StreamEvent::Done, |usage| StreamEvent::Usage(usage.into())),
    }
}

/// Parse a finish reason string
fn parse_finish_reason(s: &str) -> Option<FinishReason> {
    match s {
        "stop" | "eos" => Some(FinishReason::Stop),
        "length" => Some(FinishReason::Length),
        "tool_calls" => Some(FinishReason::ToolCalls),
        "content_filter" => Some(FinishReason::ContentFilter),
        _ => None,
    }
}
