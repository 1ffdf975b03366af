//! Tools exposed to the language model
//!
//! Each tool validates its arguments before any SQL is constructed, runs a
//! single read-only statement through the shared pool, and renders the result
//! as plain text for the model to read.

pub mod describe_table;
pub mod execute_query;
pub mod list_tables;
pub mod table_info;

pub use describe_table::DescribeTableTool;
pub use execute_query::ExecuteSqlQueryTool;
pub use list_tables::ListTablesTool;
pub use table_info::GetTableInfoTool;

use crate::pool::Database;
use querychat_core::tools::Tool;
use std::sync::Arc;

/// Build the full set of database tools over a shared pool handle.
pub fn get_database_tools(db: Arc<Database>) -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(ExecuteSqlQueryTool::new(Arc::clone(&db))),
        Arc::new(DescribeTableTool::new(Arc::clone(&db))),
        Arc::new(ListTablesTool::new(Arc::clone(&db))),
        Arc::new(GetTableInfoTool::new(db)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use querychat_core::config::MysqlConfig;

    fn lazy_db() -> Arc<Database> {
        let config = MysqlConfig {
            host: "localhost".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: String::new(),
            database: "test".to_string(),
        };
        Arc::new(Database::connect_lazy(&config, false))
    }

    #[tokio::test]
    async fn exposes_all_four_tools() {
        let tools = get_database_tools(lazy_db());
        let names: Vec<&str> = tools.iter().map(|t| t.name()).collect();
        assert_eq!(
            names,
            vec![
                "execute_sql_query",
                "describe_table",
                "list_tables",
                "get_table_info"
            ]
        );
        assert!(tools.iter().all(|t| t.is_read_only()));
    }
}
