//! Hard row-count ceiling for SELECT statements
//!
//! Every SELECT that reaches the pool must carry a LIMIT of at most
//! [`MAX_ROWS`]. The ceiling is not a default: a client-specified limit above
//! it is clamped, not honored. SHOW and DESCRIBE statements return
//! schema-sized results and pass through untouched.

use crate::guard::StatementKind;
use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum number of rows any SELECT may return
pub const MAX_ROWS: u32 = 20;

// Matches a literal trailing limit clause in its three MySQL spellings:
// `LIMIT n`, `LIMIT offset, n`, and `LIMIT n OFFSET offset`, optionally
// followed by a line comment. A limit that is not a trailing literal
// (expression, subquery-interior) deliberately does not match and is
// treated as absent.
static LIMIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\blimit\s+(\d+)(?:\s*,\s*(\d+)|\s+offset\s+\d+)?\s*;?\s*(?:(?:--|#)[^\n]*)?$")
        .expect("limit clause pattern")
});

/// Rewrite an accepted statement so its result set is bounded by [`MAX_ROWS`].
///
/// Only `Select` statements are rewritten; any other kind is returned
/// unchanged.
pub fn enforce_row_limit(sql: &str, kind: StatementKind) -> String {
    if kind != StatementKind::Select {
        return sql.to_string();
    }

    if let Some(caps) = LIMIT_RE.captures(sql) {
        // In the `LIMIT offset, count` form the row count is the second
        // number; otherwise it is the first.
        let count = match caps.get(2).or_else(|| caps.get(1)) {
            Some(m) => m,
            None => return sql.to_string(),
        };
        let bound: u64 = count.as_str().parse().unwrap_or(u64::MAX);

        if bound <= u64::from(MAX_ROWS) {
            return sql.to_string();
        }

        let mut clamped = String::with_capacity(sql.len());
        clamped.push_str(&sql[..count.start()]);
        clamped.push_str(&MAX_ROWS.to_string());
        clamped.push_str(&sql[count.end()..]);
        return clamped;
    }

    // A trailing line comment would swallow a limit appended on the same
    // line, so the clause goes on a line of its own when one may be present.
    let body = sql.trim_end().trim_end_matches(';').trim_end();
    let last_line = body.rsplit('\n').next().unwrap_or(body);
    let separator = if last_line.contains("--") || last_line.contains('#') {
        '\n'
    } else {
        ' '
    };
    format!("{body}{separator}LIMIT {MAX_ROWS}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_limit_when_absent() {
        assert_eq!(
            enforce_row_limit("SELECT * FROM users", StatementKind::Select),
            "SELECT * FROM users LIMIT 20"
        );
    }

    #[test]
    fn strips_trailing_semicolon_before_appending() {
        assert_eq!(
            enforce_row_limit("SELECT * FROM users;", StatementKind::Select),
            "SELECT * FROM users LIMIT 20"
        );
    }

    #[test]
    fn clamps_oversized_limit() {
        assert_eq!(
            enforce_row_limit("SELECT * FROM users LIMIT 1000", StatementKind::Select),
            "SELECT * FROM users LIMIT 20"
        );
        assert_eq!(
            enforce_row_limit("SELECT * FROM users LIMIT 21;", StatementKind::Select),
            "SELECT * FROM users LIMIT 20;"
        );
    }

    #[test]
    fn keeps_limit_at_or_under_ceiling() {
        assert_eq!(
            enforce_row_limit("SELECT * FROM users LIMIT 5", StatementKind::Select),
            "SELECT * FROM users LIMIT 5"
        );
        assert_eq!(
            enforce_row_limit("SELECT * FROM users LIMIT 20", StatementKind::Select),
            "SELECT * FROM users LIMIT 20"
        );
    }

    #[test]
    fn clamps_offset_comma_form() {
        assert_eq!(
            enforce_row_limit("SELECT * FROM users LIMIT 100, 50", StatementKind::Select),
            "SELECT * FROM users LIMIT 100, 20"
        );
        assert_eq!(
            enforce_row_limit("SELECT * FROM users LIMIT 100, 10", StatementKind::Select),
            "SELECT * FROM users LIMIT 100, 10"
        );
    }

    #[test]
    fn clamps_offset_keyword_form() {
        assert_eq!(
            enforce_row_limit(
                "SELECT * FROM users LIMIT 50 OFFSET 10",
                StatementKind::Select
            ),
            "SELECT * FROM users LIMIT 20 OFFSET 10"
        );
    }

    #[test]
    fn oversized_literal_is_clamped_not_overflowed() {
        assert_eq!(
            enforce_row_limit(
                "SELECT * FROM users LIMIT 99999999999999999999999",
                StatementKind::Select
            ),
            "SELECT * FROM users LIMIT 20"
        );
    }

    #[test]
    fn appends_on_a_new_line_after_a_trailing_comment() {
        assert_eq!(
            enforce_row_limit("SELECT * FROM users -- all of them", StatementKind::Select),
            "SELECT * FROM users -- all of them\nLIMIT 20"
        );
        assert_eq!(
            enforce_row_limit("SELECT * FROM users # everything", StatementKind::Select),
            "SELECT * FROM users # everything\nLIMIT 20"
        );
    }

    #[test]
    fn clamps_limit_followed_by_a_comment() {
        assert_eq!(
            enforce_row_limit("SELECT * FROM users LIMIT 25 -- note", StatementKind::Select),
            "SELECT * FROM users LIMIT 20 -- note"
        );
        assert_eq!(
            enforce_row_limit("SELECT * FROM users LIMIT 5 -- note", StatementKind::Select),
            "SELECT * FROM users LIMIT 5 -- note"
        );
    }

    #[test]
    fn subquery_interior_limit_is_treated_as_absent() {
        assert_eq!(
            enforce_row_limit(
                "SELECT * FROM (SELECT id FROM t LIMIT 100) x",
                StatementKind::Select
            ),
            "SELECT * FROM (SELECT id FROM t LIMIT 100) x LIMIT 20"
        );
    }

    #[test]
    fn show_and_describe_pass_through() {
        assert_eq!(
            enforce_row_limit("SHOW TABLES", StatementKind::Show),
            "SHOW TABLES"
        );
        assert_eq!(
            enforce_row_limit("DESCRIBE orders", StatementKind::Describe),
            "DESCRIBE orders"
        );
    }
}
