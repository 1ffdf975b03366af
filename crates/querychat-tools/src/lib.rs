//! Database tools for querychat
//!
//! The safety layer between the language model and MySQL: a keyword-based
//! read-only guard, a hard row-count ceiling for SELECT statements, a
//! deterministic text-table formatter, a thin pool wrapper, and the four
//! tools exposed to the model.

pub mod format;
pub mod guard;
pub mod limit;
pub mod pool;
pub mod tools;

pub use format::{format_table, SqlValue};
pub use guard::{classify, sanitize_identifier, validate, GuardError, StatementKind};
pub use limit::{enforce_row_limit, MAX_ROWS};
pub use pool::{Database, QueryOutput};
pub use tools::get_database_tools;
