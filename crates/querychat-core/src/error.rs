//! Error types for querychat

use thiserror::Error;

/// Result type alias for querychat operations
pub type AgentResult<T> = Result<T, AgentError>;

/// Main error type for querychat
///
/// Configuration errors are fatal at startup; everything else is recoverable
/// per conversation turn.
#[derive(Error, Debug)]
pub enum AgentError {
    /// Configuration related errors
    #[error("configuration error: {0}")]
    Config(String),

    /// A required environment variable is absent at startup
    #[error("missing required environment variable {0}")]
    MissingEnv(&'static str),

    /// LLM client errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Tool execution errors
    #[error("tool error: {tool_name}: {message}")]
    Tool { tool_name: String, message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AgentError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an LLM error
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm(message.into())
    }

    /// Create a tool error
    pub fn tool(tool_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Tool {
            tool_name: tool_name.into(),
            message: message.into(),
        }
    }

    /// Whether this error should terminate the process rather than the turn
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Config(_) | Self::MissingEnv(_))
    }
}
