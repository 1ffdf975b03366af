//! Arbitrary read-only SQL execution

use crate::format::format_table;
use crate::guard;
use crate::limit::enforce_row_limit;
use crate::pool::Database;
use async_trait::async_trait;
use querychat_core::tools::{Tool, ToolCall, ToolError, ToolParameter, ToolResult, ToolSchema};
use std::sync::Arc;
use tracing::info;

/// Executes a model-written SELECT, SHOW, or DESCRIBE statement.
///
/// The statement is classified and validated before it touches the driver,
/// and a SELECT is rewritten to carry a bounded LIMIT.
pub struct ExecuteSqlQueryTool {
    db: Arc<Database>,
}

impl ExecuteSqlQueryTool {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn query_argument(call: &ToolCall) -> Result<String, ToolError> {
        call.get_string("query")
            .ok_or_else(|| ToolError::InvalidArguments("missing 'query' argument".to_string()))
    }
}

#[async_trait]
impl Tool for ExecuteSqlQueryTool {
    fn name(&self) -> &str {
        "execute_sql_query"
    }

    fn description(&self) -> &str {
        "Execute a read-only SQL query (SELECT, SHOW, or DESCRIBE) against the MySQL database \
         and return the result as a text table. SELECT results are capped at 20 rows."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            self.name(),
            self.description(),
            vec![ToolParameter::string(
                "query",
                "The SQL query to execute. Only SELECT, SHOW, and DESCRIBE are allowed.",
            )],
        )
    }

    fn validate(&self, call: &ToolCall) -> Result<(), ToolError> {
        let query = Self::query_argument(call)?;
        guard::validate(&query)?;
        Ok(())
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let query = Self::query_argument(call)?;
        let kind = guard::validate(&query)?;
        let bounded = enforce_row_limit(&query, kind);

        info!(%kind, "running model query");

        let output = self
            .db
            .fetch(&bounded)
            .await
            .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;

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
