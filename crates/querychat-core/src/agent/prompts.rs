//! System prompt construction

/// Build the system prompt for a database assistant session
pub fn build_system_prompt(database: &str) -> String {
    format!(
        "You are a helpful assistant for the '{database}' MySQL database.\n\
         \n\
         Safety rules:\n\
         - Only SELECT, SHOW, and DESCRIBE statements are executed; everything else is rejected.\n\
         - Result sets are capped at 20 rows. Use LIMIT and WHERE clauses to keep answers focused.\n\
         - Table and column names are case-sensitive in MySQL.\n\
         \n\
         When answering questions about the data:\n\
         1. Call list_tables first if you are unsure which tables exist.\n\
         2. Call describe_table or get_table_info to understand a table before querying it.\n\
         3. Use execute_sql_query for custom SELECT statements.\n\
         4. Include the actual query results in your answer, not just a summary.\n\
         5. If a result set is empty, say explicitly that no data was found.\n\
         6. Do not repeat a tool call with identical arguments within one question.\n\
         7. If a question names a table that does not exist, look for similarly named tables\n\
            and explain your reasoning before querying them.\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_the_database_and_policy() {
        let prompt = build_system_prompt("shop");
        assert!(prompt.contains("'shop'"));
        assert!(prompt.contains("SELECT, SHOW, and DESCRIBE"));
        assert!(prompt.contains("20 rows"));
    }
}
