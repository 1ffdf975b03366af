//! MySQL connection pool wrapper
//!
//! Thin layer over an `sqlx` pool: acquire/execute/release per statement,
//! autocommit only, no transaction ever opened, no connection held across
//! tool calls. Rows are decoded into [`SqlValue`] cells keyed by the driver's
//! column type name, with a generic fallback chain for anything unrecognized.

use crate::format::SqlValue;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use querychat_core::config::MysqlConfig;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::{Column, Executor, Row, TypeInfo};
use tracing::debug;

const MIN_CONNECTIONS: u32 = 1;
const MAX_CONNECTIONS: u32 = 10;

/// A decoded result set: ordered column names plus rows of cells
#[derive(Debug, Clone, Default)]
pub struct QueryOutput {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<SqlValue>>,
}

impl QueryOutput {
    /// First cell of the first row, if any
    pub fn first_value(&self) -> Option<&SqlValue> {
        self.rows.first().and_then(|row| row.first())
    }
}

/// Pooled MySQL database handle shared by the tools
pub struct Database {
    pool: MySqlPool,
    echo_sql: bool,
}

impl Database {
    /// Connect to MySQL and verify the connection with a probe query.
    pub async fn connect(config: &MysqlConfig, echo_sql: bool) -> Result<Self, sqlx::Error> {
        let pool = MySqlPoolOptions::new()
            .min_connections(MIN_CONNECTIONS)
            .max_connections(MAX_CONNECTIONS)
            .connect_with(Self::options(config))
            .await?;

        sqlx::query("SELECT 1").execute(&pool).await?;

        Ok(Self { pool, echo_sql })
    }

    /// Create a handle whose pool connects on first use.
    ///
    /// No query I/O happens until a statement is executed, but the pool must
    /// still be built inside a Tokio runtime. Used by tests that only
    /// exercise the validation paths.
    pub fn connect_lazy(config: &MysqlConfig, echo_sql: bool) -> Self {
        let pool = MySqlPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_lazy_with(Self::options(config));

        Self { pool, echo_sql }
    }

    fn options(config: &MysqlConfig) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database)
            .charset("utf8mb4")
    }

    /// Execute a statement and decode the full result set.
    ///
    /// Each call acquires a pooled connection for the duration of the round
    /// trip and releases it before returning.
    pub async fn fetch(&self, sql: &str) -> Result<QueryOutput, sqlx::Error> {
        if self.echo_sql {
            println!("Executing query: {sql}");
        }
        debug!(%sql, "executing statement");

        let rows = sqlx::query(sql).fetch_all(&self.pool).await?;

        let mut columns: Vec<String> = rows
            .first()
            .map(|row| row.columns().iter().map(|c| c.name().to_string()).collect())
            .unwrap_or_default();

        // An empty result set carries no metadata; recover the header from a
        // prepare round trip so the formatter can still render it.
        if rows.is_empty() {
            if let Ok(description) = self.pool.describe(sql).await {
                columns = description
                    .columns()
                    .iter()
                    .map(|c| c.name().to_string())
                    .collect();
            }
        }

        let rows = rows
            .iter()
            .map(|row| (0..row.len()).map(|i| decode_cell(row, i)).collect())
            .collect();

        Ok(QueryOutput { columns, rows })
    }

    /// Close the pool, waiting for in-flight statements to finish.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Decode one cell using the column's MySQL type name as a hint
fn decode_cell(row: &MySqlRow, idx: usize) -> SqlValue {
    let type_name = row.column(idx).type_info().name();

    match type_name {
        "NULL" => SqlValue::Null,
        "BOOLEAN" => row
            .try_get::<Option<bool>, _>(idx)
            .ok()
            .flatten()
            .map(SqlValue::Bool)
            .unwrap_or(SqlValue::Null),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => row
            .try_get::<Option<i64>, _>(idx)
            .ok()
            .flatten()
            .map(SqlValue::Int)
            .unwrap_or(SqlValue::Null),
        "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
        | "BIGINT UNSIGNED" | "YEAR" | "BIT" => row
            .try_get::<Option<u64>, _>(idx)
            .ok()
            .flatten()
            .map(SqlValue::UInt)
            .unwrap_or(SqlValue::Null),
        "FLOAT" => row
            .try_get::<Option<f32>, _>(idx)
            .ok()
            .flatten()
            .map(|v| SqlValue::Float(f64::from(v)))
            .unwrap_or(SqlValue::Null),
        "DOUBLE" => row
            .try_get::<Option<f64>, _>(idx)
            .ok()
            .flatten()
            .map(SqlValue::Float)
            .unwrap_or(SqlValue::Null),
        "DECIMAL" => row
            .try_get::<Option<sqlx::types::Decimal>, _>(idx)
            .ok()
            .flatten()
            .map(|v| SqlValue::Text(v.to_string()))
            .unwrap_or(SqlValue::Null),
        "DATE" => row
            .try_get::<Option<NaiveDate>, _>(idx)
            .ok()
            .flatten()
            .map(SqlValue::Date)
            .unwrap_or(SqlValue::Null),
        "DATETIME" => row
            .try_get::<Option<NaiveDateTime>, _>(idx)
            .ok()
            .flatten()
            .map(SqlValue::DateTime)
            .unwrap_or(SqlValue::Null),
        "TIMESTAMP" => row
            .try_get::<Option<DateTime<Utc>>, _>(idx)
            .ok()
            .flatten()
            .map(|v| SqlValue::DateTime(v.naive_utc()))
            .unwrap_or(SqlValue::Null),
        "TIME" => row
            .try_get::<Option<NaiveTime>, _>(idx)
            .ok()
            .flatten()
            .map(SqlValue::Time)
            .unwrap_or(SqlValue::Null),
        "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" => row
            .try_get::<Option<Vec<u8>>, _>(idx)
            .ok()
            .flatten()
            .map(SqlValue::Bytes)
            .unwrap_or(SqlValue::Null),
        _ => decode_fallback(row, idx),
    }
}

/// Generic decode chain for text and unrecognized types
fn decode_fallback(row: &MySqlRow, idx: usize) -> SqlValue {
    if let Ok(v) = row.try_get::<Option<String>, _>(idx) {
        return v.map(SqlValue::Text).unwrap_or(SqlValue::Null);
    }
    if let Ok(v) = row.try_get::<Option<Vec<u8>>, _>(idx) {
        return v.map(SqlValue::Bytes).unwrap_or(SqlValue::Null);
    }
    if let Ok(v) = row.try_get::<Option<i64>, _>(idx) {
        return v.map(SqlValue::Int).unwrap_or(SqlValue::Null);
    }
    if let Ok(v) = row.try_get::<Option<u64>, _>(idx) {
        return v.map(SqlValue::UInt).unwrap_or(SqlValue::Null);
    }
    if let Ok(v) = row.try_get::<Option<f64>, _>(idx) {
        return v.map(SqlValue::Float).unwrap_or(SqlValue::Null);
    }
    SqlValue::Null
}
