//! Base trait and error type for tools

use crate::tools::types::{ToolCall, ToolResult, ToolSchema};
use async_trait::async_trait;
use std::time::Instant;

/// Error type for tool operations
///
/// Tool failures never escape the tool surface as a crash; they are rendered
/// into a failed [`ToolResult`] and relayed to the model as text.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Invalid arguments provided to the tool
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The statement was rejected by the read-only policy
    #[error("Denied: {0}")]
    Denied(String),

    /// A table-name argument failed identifier sanitation
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// The database driver reported a failure
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Base trait for all tools
///
/// Tools are capabilities the model can invoke. Each tool has a JSON schema
/// for its arguments, optional up-front validation, and async execution.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool's unique name
    ///
    /// Names are lowercase with underscores (e.g. "list_tables") and must be
    /// unique within a registry.
    fn name(&self) -> &str;

    /// Get the tool's description
    ///
    /// Included in the request so the model knows when to use this tool.
    fn description(&self) -> &str;

    /// Get the tool's JSON schema for input parameters
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with the given arguments
    async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError>;

    /// Validate the tool call arguments before execution
    ///
    /// Default implementation does nothing. Override for custom validation.
    fn validate(&self, call: &ToolCall) -> Result<(), ToolError> {
        let _ = call;
        Ok(())
    }

    /// Whether this tool only reads data (no side effects)
    fn is_read_only(&self) -> bool {
        false
    }

    /// Execute the tool with timing and error handling
    ///
    /// Validation and execution errors are folded into a failed result so
    /// callers always get a [`ToolResult`] back.
    async fn execute_with_timing(&self, call: &ToolCall) -> ToolResult {
        let start_time = Instant::now();

        if let Err(err) = self.validate(call) {
            return ToolResult::error(&call.id, self.name(), err.to_string())
                .with_execution_time(start_time.elapsed().as_millis() as u64);
        }

        match self.execute(call).await {
            Ok(mut result) => {
                result.execution_time_ms = Some(start_time.elapsed().as_millis() as u64);
                result
            }
            Err(err) => ToolResult::error(&call.id, self.name(), err.to_string())
                .with_execution_time(start_time.elapsed().as_millis() as u64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the text argument"
        }

        fn schema(&self) -> ToolSchema {
            ToolSchema::new("echo", "Echo the text argument", vec![])
        }

        fn validate(&self, call: &ToolCall) -> Result<(), ToolError> {
            call.get_string("text")
                .map(|_| ())
                .ok_or_else(|| ToolError::InvalidArguments("missing 'text'".to_string()))
        }

        async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
            let text = call.get_string("text").unwrap_or_default();
            Ok(ToolResult::success(&call.id, self.name(), text))
        }
    }

    #[tokio::test]
    async fn validation_failure_becomes_error_result() {
        let call = ToolCall::new("c1", "echo", HashMap::new());
        let result = EchoTool.execute_with_timing(&call).await;

        assert!(!result.success);
        assert!(result.error.unwrap().contains("missing 'text'"));
        assert!(result.execution_time_ms.is_some());
    }

    #[tokio::test]
    async fn successful_execution_carries_output() {
        let mut arguments = HashMap::new();
        arguments.insert("text".to_string(), serde_json::json!("hello"));
        let call = ToolCall::new("c2", "echo", arguments);

        let result = EchoTool.execute_with_timing(&call).await;
        assert!(result.success);
        assert_eq!(result.output.as_deref(), Some("hello"));
    }
}
