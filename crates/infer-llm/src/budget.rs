//! Output-length governance by whitespace-delimited word count
//!
//! Word count stands in for provider tokens. The rules here are fixed for
//! compatibility with existing clients and must not be swapped for a real
//! tokenizer.

/// Characters stripped from both ends of a truncated output
fn is_edge_noise(c: char) -> bool {
    c.is_whitespace() || matches!(c, '"' | '\u{201c}' | '\u{201d}')
}

/// Number of whitespace-delimited words in `text`
pub fn count_tokens(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Keep the first `max_tokens` words of `text`
///
/// Words are rejoined with single spaces, then leading/trailing whitespace
/// and enclosing double quotes are removed. `max_tokens == 0` yields `""`.
pub fn truncate(text: &str, max_tokens: usize) -> String {
    let kept = text.split_whitespace().take(max_tokens).collect::<Vec<_>>().join(" ");
    kept.trim_matches(is_edge_noise).to_owned()
}

/// Outcome of offering one chunk to a [`StreamBudget`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// Forward the chunk and keep reading
    Continue(String),
    /// Forward the chunk, then stop reading the upstream stream
    Last(String),
    /// The budget is spent; forward nothing
    Closed,
}

/// Streaming variant of [`truncate`]
///
/// Keeps a running word count across chunks. The chunk whose words bring
/// the total to the budget is still forwarded whole; chunks are never
/// split. Once it has signalled stop the gate forwards nothing further.
#[derive(Debug, Clone)]
pub struct StreamBudget {
    max_tokens: usize,
    seen: usize,
    closed: bool,
}

impl StreamBudget {
    pub const fn new(max_tokens: usize) -> Self {
        Self {
            max_tokens,
            seen: 0,
            closed: max_tokens == 0,
        }
    }

    /// Offer the next chunk of text
    pub fn admit(&mut self, chunk: impl Into<String>) -> Admission {
        if self.closed {
            return Admission::Closed;
        }

        let chunk = chunk.into();
        self.seen += count_tokens(&chunk);

        if self.seen >= self.max_tokens {
            self.closed = true;
            Admission::Last(chunk)
        } else {
            Admission::Continue(chunk)
        }
    }

    /// Words counted so far
    pub const fn seen(&self) -> usize {
        self.seen
    }

    /// Whether stop has been signalled
    pub const fn is_closed(&self) -> bool {
        self.closed
    }
}
