//! Table structure inspection via INFORMATION_SCHEMA

use crate::format::format_table;
use crate::guard::sanitize_identifier;
use crate::pool::Database;
use async_trait::async_trait;
use querychat_core::tools::{Tool, ToolCall, ToolError, ToolParameter, ToolResult, ToolSchema};
use std::sync::Arc;

/// Returns the column definitions of one table.
///
/// Reads INFORMATION_SCHEMA.COLUMNS rather than running DESCRIBE so the
/// output includes column comments. The table name is an identifier, not a
/// bindable value, so it is sanitized before being interpolated.
pub struct DescribeTableTool {
    db: Arc<Database>,
}

impl DescribeTableTool {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn table_argument(call: &ToolCall) -> Result<String, ToolError> {
        call.get_string("table_name")
            .ok_or_else(|| ToolError::InvalidArguments("missing 'table_name' argument".to_string()))
    }

    // Scoped via DATABASE() so the configured schema name is never
    // interpolated into a string literal. The table name is sanitized to
    // [A-Za-z0-9_] before it gets here.
    fn columns_query(table: &str) -> String {
        format!(
            "SELECT COLUMN_NAME, COLUMN_TYPE, IS_NULLABLE, COLUMN_KEY, COLUMN_DEFAULT, EXTRA, \
             COLUMN_COMMENT FROM INFORMATION_SCHEMA.COLUMNS WHERE TABLE_SCHEMA = DATABASE() AND \
             TABLE_NAME = '{table}' ORDER BY ORDINAL_POSITION"
        )
    }
}

#[async_trait]
impl Tool for DescribeTableTool {
    fn name(&self) -> &str {
        "describe_table"
    }

    fn description(&self) -> &str {
        "Get the structure of a table: column names, types, nullability, keys, defaults, \
         and comments."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            self.name(),
            self.description(),
            vec![ToolParameter::string(
                "table_name",
                "Name of the table to describe.",
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

        let sql = Self::columns_query(table);

        let output = self
            .db
            .fetch(&sql)
            .await
            .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;

        if output.rows.is_empty() {
            return Ok(ToolResult::success(
                &call.id,
                self.name(),
                format!("Table '{table}' does not exist or has no columns."),
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
