//! Batch, streamed and tool-augmented inference over a [`Provider`]

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_util::{Stream, StreamExt};
use infer_config::{ChatConfig, Config};
use infer_tools::{RegisteredTool, ToolRegistry};
use serde_json::{Map, Value};
use tokio::sync::mpsc;

use crate::budget::{self, Admission, StreamBudget};
use crate::conversation::Conversation;
use crate::error::InferenceError;
use crate::prompts::{CHAT_SYSTEM_PROMPT, TOOL_SYSTEM_PROMPT};
use crate::provider::openai::OpenAiProvider;
use crate::provider::{CompletionStream, Provider};
use crate::types::{
    CompletionParams, CompletionRequest, Message, StreamChunk, StreamEvent, ToolCall, ToolChoice, ToolDefinition,
};

/// Fragments buffered between the producer task and the response writer
const STREAM_BUFFER: usize = 16;

/// Core controller for one-shot, streamed and tool-augmented chat
///
/// Cheap to clone; all state is immutable after construction and shared
/// across concurrent requests.
#[derive(Clone)]
pub struct Orchestrator {
    inner: Arc<OrchestratorInner>,
}

struct OrchestratorInner {
    provider: Arc<dyn Provider>,
    tools: ToolRegistry,
    model: String,
    temperature: f64,
    chat: ChatConfig,
    tool_turn_max_tokens: u32,
}

/// A tool call resolved against the registry with parsed arguments
struct PendingCall<'a> {
    tool: &'a RegisteredTool,
    call: ToolCall,
    arguments: Map<String, Value>,
}

impl Orchestrator {
    pub fn new(provider: Arc<dyn Provider>, tools: ToolRegistry, config: &Config) -> Self {
        Self {
            inner: Arc::new(OrchestratorInner {
                provider,
                tools,
                model: config.llm.model.clone(),
                temperature: config.llm.temperature,
                chat: config.chat.clone(),
                tool_turn_max_tokens: config.weather.max_tokens,
            }),
        }
    }

    /// Build the OpenAI-compatible provider and built-in tools from configuration
    pub fn from_config(config: &Config) -> Result<Self, InferenceError> {
        let provider = OpenAiProvider::new("default", &config.llm)?;
        let tools = ToolRegistry::from_config(config).map_err(anyhow::Error::from)?;

        tracing::info!(
            provider = provider.name(),
            model = %config.llm.model,
            tools = tools.len(),
            "orchestrator ready"
        );

        Ok(Self::new(Arc::new(provider), tools, config))
    }

    /// Single completion, trimmed to the output budget
    pub async fn batch(&self, user_prompt: &str, max_tokens: u32) -> Result<String, InferenceError> {
        let conversation = Conversation::for_chat(self.chat_prompt(), user_prompt);
        let request = self.request(conversation.into_messages(), self.hint(max_tokens), false);

        let content = self
            .inner
            .provider
            .complete(&request)
            .await?
            .into_first_message()
            .and_then(|message| message.content)
            .filter(|content| !content.is_empty())
            .ok_or(InferenceError::EmptyCompletion)?;

        Ok(budget::truncate(&content, self.output_budget()))
    }

    /// Streamed completion, forwarded until the provider ends or the budget is spent
    ///
    /// Dropping the returned stream stops the producer and releases the
    /// provider connection.
    pub async fn stream(&self, user_prompt: &str, max_tokens: u32) -> Result<TokenStream, InferenceError> {
        let conversation = Conversation::for_chat(self.chat_prompt(), user_prompt);
        let request = self.request(conversation.into_messages(), self.hint(max_tokens), true);

        let upstream = self.inner.provider.complete_stream(&request).await?;
        let (tx, rx) = mpsc::channel(STREAM_BUFFER);
        tokio::spawn(forward_stream(upstream, StreamBudget::new(self.output_budget()), tx));

        Ok(TokenStream { rx })
    }

    /// Two-phase completion with one round of tool calls
    ///
    /// The first turn forces a tool choice. Directives naming unknown tools
    /// are skipped. Any arguments that are not a JSON object abort the
    /// request before a tool runs. The follow-up turn advertises no tools
    /// and further tool calls on it are ignored.
    pub async fn tool_augmented(&self, user_prompt: &str, max_tokens: u32) -> Result<String, InferenceError> {
        let mut conversation = Conversation::for_tools(self.tool_prompt(), user_prompt);

        let advertised: Vec<ToolDefinition> = self
            .inner
            .tools
            .describe_all()
            .into_iter()
            .map(ToolDefinition::from)
            .collect();
        let first = CompletionRequest {
            tools: Some(advertised),
            tool_choice: Some(ToolChoice::Required),
            ..self.request(
                conversation.messages().to_vec(),
                self.inner.tool_turn_max_tokens,
                false,
            )
        };

        let message = self
            .inner
            .provider
            .complete(&first)
            .await?
            .into_first_message()
            .ok_or(InferenceError::EmptyCompletion)?;

        if message.tool_calls.is_empty() {
            tracing::debug!("model answered without calling a tool");
            let content = message
                .content
                .filter(|content| !content.is_empty())
                .ok_or(InferenceError::EmptyCompletion)?;
            return Ok(budget::truncate(&content, self.output_budget()));
        }

        let pending = self.resolve_calls(message.tool_calls)?;
        if !pending.is_empty() {
            conversation.push_tool_calls(pending.iter().map(|p| p.call.clone()).collect());
            for PendingCall { tool, call, arguments } in &pending {
                let result = tool.invoke(arguments).await;
                conversation.push_tool_result(call, result);
            }
        }

        let second = self.request(conversation.into_messages(), self.hint(max_tokens), false);
        let message = self
            .inner
            .provider
            .complete(&second)
            .await?
            .into_first_message()
            .ok_or(InferenceError::EmptyCompletion)?;

        if !message.tool_calls.is_empty() {
            tracing::warn!(
                calls = message.tool_calls.len(),
                "ignoring tool calls requested on the follow-up turn"
            );
        }

        Ok(budget::truncate(
            message.content.as_deref().unwrap_or_default(),
            self.output_budget(),
        ))
    }

    /// Match directives to registered tools and parse their arguments
    fn resolve_calls(&self, calls: Vec<ToolCall>) -> Result<Vec<PendingCall<'_>>, InferenceError> {
        let mut pending = Vec::with_capacity(calls.len());

        for call in calls {
            let tool = match self.inner.tools.lookup(&call.function.name) {
                Ok(tool) => tool,
                Err(e) => {
                    tracing::warn!(call_id = %call.id, error = %e, "skipping tool call");
                    continue;
                }
            };

            let arguments = serde_json::from_str::<Map<String, Value>>(&call.function.arguments).map_err(|source| {
                InferenceError::MalformedToolArguments {
                    tool: call.function.name.clone(),
                    source,
                }
            })?;

            pending.push(PendingCall { tool, call, arguments });
        }

        Ok(pending)
    }

    fn request(&self, messages: Vec<Message>, max_tokens: u32, stream: bool) -> CompletionRequest {
        CompletionRequest {
            model: self.inner.model.clone(),
            messages,
            params: CompletionParams {
                temperature: Some(self.inner.temperature),
                max_tokens: Some(max_tokens),
            },
            tools: None,
            tool_choice: None,
            stream,
        }
    }

    /// Advisory provider hint for a request-supplied `max_tokens`
    fn hint(&self, requested: u32) -> u32 {
        self.inner.chat.clamp_max_tokens(requested)
    }

    /// Process-wide word budget for every response
    fn output_budget(&self) -> usize {
        usize::try_from(self.inner.chat.output_max_tokens).unwrap_or(usize::MAX)
    }

    fn chat_prompt(&self) -> &str {
        self.inner.chat.system_prompt.as_deref().unwrap_or(CHAT_SYSTEM_PROMPT)
    }

    fn tool_prompt(&self) -> &str {
        self.inner
            .chat
            .tool_system_prompt
            .as_deref()
            .unwrap_or(TOOL_SYSTEM_PROMPT)
    }
}

/// Pull from the provider, gate each fragment, and hand it to the consumer
///
/// Returns (dropping `upstream`) when the provider ends the turn, the
/// budget is spent, an upstream error has been forwarded, or the receiver
/// is gone.
async fn forward_stream(
    mut upstream: CompletionStream,
    mut budget: StreamBudget,
    tx: mpsc::Sender<Result<StreamChunk, InferenceError>>,
) {
    loop {
        let event = tokio::select! {
            () = tx.closed() => {
                tracing::debug!("stream consumer went away");
                return;
            }
            event = upstream.next() => event,
        };

        let chunk = match event {
            Some(Ok(StreamEvent::Chunk(chunk))) => chunk,
            Some(Ok(StreamEvent::Usage(_) | StreamEvent::Done)) | None => return,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "provider stream failed");
                let _ = tx.send(Err(e)).await;
                return;
            }
        };

        if chunk.delta_content.is_empty() {
            continue;
        }

        let is_final = chunk.is_final;
        let (text, last) = match budget.admit(chunk.delta_content) {
            Admission::Continue(text) => (text, false),
            Admission::Last(text) => (text, true),
            Admission::Closed => return,
        };

        let fragment = StreamChunk {
            delta_content: text,
            is_final: is_final || last,
        };
        if tx.send(Ok(fragment)).await.is_err() {
            return;
        }

        if last {
            tracing::debug!(words = budget.seen(), "output budget reached, closing stream");
            return;
        }
    }
}

/// Consumer side of a streamed completion
///
/// Yields fragments in arrival order. A provider failure mid-stream is
/// yielded once as an `Err` and the stream then ends.
pub struct TokenStream {
    rx: mpsc::Receiver<Result<StreamChunk, InferenceError>>,
}

impl Stream for TokenStream {
    type Item = Result<StreamChunk, InferenceError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}
