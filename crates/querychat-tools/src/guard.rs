//! Read-only query guard
//!
//! Classifies a candidate SQL string by its first keyword and rejects
//! anything that is not a SELECT, SHOW, or DESCRIBE statement before it can
//! reach the driver. This is a fixed keyword classification, not a SQL
//! parser; it is deliberately conservative (any interior semicolon followed
//! by more content rejects the whole string).

use querychat_core::tools::ToolError;
use std::fmt;
use thiserror::Error;

/// Statement classification derived from the leading keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Show,
    Describe,
    Other,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatementKind::Select => write!(f, "SELECT"),
            StatementKind::Show => write!(f, "SHOW"),
            StatementKind::Describe => write!(f, "DESCRIBE"),
            StatementKind::Other => write!(f, "OTHER"),
        }
    }
}

/// Rejection reasons produced by the guard
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GuardError {
    #[error("statement kind {kind} is not allowed; only SELECT, SHOW, and DESCRIBE queries may be executed")]
    DeniedOperation { kind: StatementKind },

    #[error("multiple SQL statements are not allowed in a single query")]
    MultipleStatements,

    #[error("invalid identifier {name:?}: only letters, digits, and underscores are allowed")]
    InvalidIdentifier { name: String },
}

impl From<GuardError> for ToolError {
    fn from(err: GuardError) -> Self {
        match err {
            GuardError::InvalidIdentifier { name } => ToolError::InvalidIdentifier(name),
            other => ToolError::Denied(other.to_string()),
        }
    }
}

/// Skip leading whitespace and SQL comments (`--`, `#`, `/* */`)
fn skip_leading_trivia(mut sql: &str) -> &str {
    loop {
        sql = sql.trim_start();
        if let Some(rest) = sql.strip_prefix("--") {
            sql = rest.split_once('\n').map(|(_, tail)| tail).unwrap_or("");
        } else if let Some(rest) = sql.strip_prefix('#') {
            sql = rest.split_once('\n').map(|(_, tail)| tail).unwrap_or("");
        } else if let Some(rest) = sql.strip_prefix("/*") {
            sql = rest.split_once("*/").map(|(_, tail)| tail).unwrap_or("");
        } else {
            return sql;
        }
    }
}

/// Classify a SQL string by its first keyword token.
///
/// Case-insensitive; `DESC` is accepted as a synonym for `DESCRIBE`.
pub fn classify(sql: &str) -> StatementKind {
    let body = skip_leading_trivia(sql);
    let keyword: String = body
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();

    if keyword.eq_ignore_ascii_case("select") {
        StatementKind::Select
    } else if keyword.eq_ignore_ascii_case("show") {
        StatementKind::Show
    } else if keyword.eq_ignore_ascii_case("describe") || keyword.eq_ignore_ascii_case("desc") {
        StatementKind::Describe
    } else {
        StatementKind::Other
    }
}

/// Validate a SQL string against the read-only policy.
///
/// A trailing semicolon is tolerated, but a semicolon followed by further
/// content rejects the whole string so a write cannot be smuggled in behind
/// a benign read. A semicolon inside a string literal also rejects; that is
/// a false positive the policy accepts.
pub fn validate(sql: &str) -> Result<StatementKind, GuardError> {
    let body = sql.trim();
    if let Some(pos) = body.find(';') {
        if !body[pos + 1..].trim().is_empty() {
            return Err(GuardError::MultipleStatements);
        }
    }

    match classify(sql) {
        StatementKind::Other => Err(GuardError::DeniedOperation {
            kind: StatementKind::Other,
        }),
        kind => Ok(kind),
    }
}

/// Check a table-name argument against the safe identifier set.
///
/// Identifiers end up interpolated into statement positions that cannot be
/// parameterized (DESCRIBE, FROM), so anything outside `[A-Za-z0-9_]` is
/// rejected before any SQL is constructed.
pub fn sanitize_identifier(name: &str) -> Result<&str, GuardError> {
    let valid = !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_');

    if valid {
        Ok(name)
    } else {
        Err(GuardError::InvalidIdentifier {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_permitted_statements() {
        assert_eq!(classify("SELECT * FROM users"), StatementKind::Select);
        assert_eq!(classify("  select 1"), StatementKind::Select);
        assert_eq!(classify("SHOW TABLES"), StatementKind::Show);
        assert_eq!(classify("DESCRIBE orders"), StatementKind::Describe);
        assert_eq!(classify("desc orders"), StatementKind::Describe);
    }

    #[test]
    fn classifies_writes_as_other() {
        for sql in [
            "INSERT INTO users VALUES (1)",
            "UPDATE users SET name = 'x'",
            "DELETE FROM users",
            "DROP TABLE users",
            "ALTER TABLE users ADD COLUMN x INT",
            "CREATE TABLE t (id INT)",
            "TRUNCATE users",
            "GRANT ALL ON *.* TO 'x'",
            "",
            "1234",
        ] {
            assert_eq!(classify(sql), StatementKind::Other, "sql: {sql}");
        }
    }

    #[test]
    fn skips_leading_comments() {
        assert_eq!(
            classify("-- just looking\nSELECT 1"),
            StatementKind::Select
        );
        assert_eq!(classify("# comment\nSHOW TABLES"), StatementKind::Show);
        assert_eq!(
            classify("/* multi\nline */ SELECT id FROM t"),
            StatementKind::Select
        );
        assert_eq!(classify("/* unterminated"), StatementKind::Other);
    }

    #[test]
    fn validate_accepts_reads() {
        assert_eq!(validate("SELECT 1"), Ok(StatementKind::Select));
        assert_eq!(validate("SELECT 1;"), Ok(StatementKind::Select));
        assert_eq!(validate("SHOW TABLES"), Ok(StatementKind::Show));
    }

    #[test]
    fn validate_rejects_writes() {
        assert_eq!(
            validate("DROP TABLE users"),
            Err(GuardError::DeniedOperation {
                kind: StatementKind::Other
            })
        );
    }

    #[test]
    fn validate_rejects_smuggled_second_statement() {
        assert_eq!(
            validate("SELECT * FROM users; DROP TABLE users;"),
            Err(GuardError::MultipleStatements)
        );
        assert_eq!(
            validate("SELECT 1; SELECT 2"),
            Err(GuardError::MultipleStatements)
        );
    }

    #[test]
    fn identifier_sanitation() {
        assert_eq!(sanitize_identifier("orders"), Ok("orders"));
        assert_eq!(sanitize_identifier("user_events_2024"), Ok("user_events_2024"));

        for bad in ["users; DROP TABLE x", "1;drop", "a-b", "a b", "", "t`x", "\u{e9}tude"] {
            assert!(sanitize_identifier(bad).is_err(), "identifier: {bad}");
        }
    }

    #[test]
    fn guard_errors_map_to_tool_errors() {
        let err: ToolError = GuardError::InvalidIdentifier {
            name: "1;drop".to_string(),
        }
        .into();
        assert!(matches!(err, ToolError::InvalidIdentifier(_)));

        let err: ToolError = GuardError::MultipleStatements.into();
        assert!(matches!(err, ToolError::Denied(_)));
    }
}
