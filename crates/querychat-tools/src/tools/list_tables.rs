//! Table listing

use crate::format::format_table;
use crate::pool::Database;
use async_trait::async_trait;
use querychat_core::tools::{Tool, ToolCall, ToolError, ToolResult, ToolSchema};
use std::sync::Arc;

/// Lists every table in the configured schema. Takes no arguments.
pub struct ListTablesTool {
    db: Arc<Database>,
}

impl ListTablesTool {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Tool for ListTablesTool {
    fn name(&self) -> &str {
        "list_tables"
    }

    fn description(&self) -> &str {
        "List all tables in the current database."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(self.name(), self.description(), vec![])
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let output = self
            .db
            .fetch("SHOW TABLES")
            .await
            .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;

        if output.rows.is_empty() {
            return Ok(ToolResult::success(
                &call.id,
                self.name(),
                "The database contains no tables.",
            ));
        }

        Ok(ToolResult::success(
            &call.id,
            self.name(),
            format_table(&output.columns, &output.rows),
        ))
    }

    fn is_read_only(&self) -> bool {
        true
    }
}
