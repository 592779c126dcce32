use super::response::Usage;

/// What a provider stream yields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Text for the first choice
    Chunk(StreamChunk),
    /// A chunk with no choice payload; ends the turn
    Usage(Usage),
    /// `[DONE]`
    Done,
}

/// Fragment of streamed output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamChunk {
    pub delta_content: String,
    /// Set when the provider reported a finish reason, or the output budget closed the stream
    pub is_final: bool,
}

impl StreamChunk {
    pub fn new(delta_content: impl Into<String>) -> Self {
        Self {
            delta_content: delta_content.into(),
            is_final: false,
        }
    }
}
