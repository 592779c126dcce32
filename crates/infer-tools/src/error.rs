use thiserror::Error;

/// Errors raised while building or querying the tool registry
#[derive(Debug, Error)]
pub enum ToolError {
    /// The model referenced a tool that is not registered
    #[error("tool not found: {name}")]
    NotFound { name: String },

    /// Two tools were registered under the same name
    #[error("duplicate tool name: {name}")]
    Duplicate { name: String },

    /// A tool's HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
