//! Combined table summary: structure, row count, sample rows

use crate::format::{format_table, SqlValue};
use crate::guard::sanitize_identifier;
use crate::pool::Database;
use async_trait::async_trait;
use querychat_core::tools::{Tool, ToolCall, ToolError, ToolParameter, ToolResult, ToolSchema};
use std::sync::Arc;

const SAMPLE_ROWS: u32 = 5;

/// One-shot table overview so the model does not need three round trips.
///
/// Combines DESCRIBE, a COUNT(*), and a handful of sample rows into a single
/// text report.
pub struct GetTableInfoTool {
    db: Arc<Database>,
}

impl GetTableInfoTool {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn table_argument(call: &ToolCall) -> Result<String, ToolError> {
        call.get_string("table_name")
            .ok_or_else(|| ToolError::InvalidArguments("missing 'table_name' argument".to_string()))
    }
}

#[async_trait]
impl Tool for GetTableInfoTool {
    fn name(&self) -> &str {
        "get_table_info"
    }

    fn description(&self) -> &str {
        "Get a full overview of a table: its structure, total row count, and a few sample rows."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            self.name(),
            self.description(),
            vec![ToolParameter::string(
                "table_name",
                "Name of the table to inspect.",
            )],
        )
    }

    fn validate(&self, call: &ToolCall) -> Result<(), ToolError> {
        let table = Self::table_argument(call)?;
        sanitize_identifier(&table)?;
        Ok(())
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let table = Self::table_argument(call)?;
        let table = sanitize_identifier(&table)?;

        let structure = self
            .db
            .fetch(&format!("DESCRIBE `{table}`"))
            .await
            .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;

        let count = self
            .db
            .fetch(&format!("SELECT COUNT(*) AS row_count FROM `{table}`"))
            .await
            .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;

        let sample = self
            .db
            .fetch(&format!("SELECT * FROM `{table}` LIMIT {SAMPLE_ROWS}"))
            .await
            .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;

        let total_rows = match count.first_value() {
            Some(SqlValue::Int(n)) => n.to_string(),
            Some(SqlValue::UInt(n)) => n.to_string(),
            Some(other) => other.to_string(),
            None => "unknown".to_string(),
        };

        let report = format!(
            "Table: {table}\nTotal rows: {total_rows}\n\nStructure:\n{}\n\nSample rows (up to {SAMPLE_ROWS}):\n{}",
            format_table(&structure.columns, &structure.rows),
            format_table(&sample.columns, &sample.rows),
        );

        Ok(ToolResult::success(&call.id, self.name(), report))
    }

    fn is_read_only(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use querychat_core::config::MysqlConfig;
    use std::collections::HashMap;

    fn tool() -> GetTableInfoTool {
        let config = MysqlConfig {
            host: "localhost".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: String::new(),
            database: "test".to_string(),
        };
        GetTableInfoTool::new(Arc::new(Database::connect_lazy(&config, false)))
    }

    #[tokio::test]
    async fn rejects_backtick_in_identifier() {
        let tool = tool();
        let mut arguments = HashMap::new();
        arguments.insert("table_name".to_string(), serde_json::json!("t`x"));
        let call = ToolCall::new("c1", "get_table_info", arguments);

        let result = tool.execute_with_timing(&call).await;
        assert!(!result.success);
        assert!(result.error.unwrap().contains("Invalid identifier"));
    }

    #[tokio::test]
    async fn schema_requires_table_name() {
        let schema = tool().schema();
        assert_eq!(
            schema.parameters["required"],
            serde_json::json!(["table_name"])
        );
    }
}
