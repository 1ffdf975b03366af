//! Deterministic text-table rendering
//!
//! Rows come back from the pool as [`SqlValue`] cells with a single canonical
//! stringification rule, so formatting the same result set always produces
//! byte-identical output.

use std::fmt;

/// Placeholder rendered for SQL NULL
pub const NULL_PLACEHOLDER: &str = "NULL";

/// A decoded MySQL cell value
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Date(chrono::NaiveDate),
    DateTime(chrono::NaiveDateTime),
    Time(chrono::NaiveTime),
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => write!(f, "{NULL_PLACEHOLDER}"),
            SqlValue::Bool(v) => write!(f, "{v}"),
            SqlValue::Int(v) => write!(f, "{v}"),
            SqlValue::UInt(v) => write!(f, "{v}"),
            SqlValue::Float(v) => write!(f, "{v}"),
            SqlValue::Text(v) => write!(f, "{v}"),
            SqlValue::Bytes(v) => {
                write!(f, "0x")?;
                for byte in v {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
            SqlValue::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
            SqlValue::DateTime(v) => write!(f, "{}", v.format("%Y-%m-%d %H:%M:%S%.f")),
            SqlValue::Time(v) => write!(f, "{}", v.format("%H:%M:%S%.f")),
        }
    }
}

/// Render a result set as an aligned text table.
///
/// Column width is the maximum of the header length and the widest rendered
/// value. An empty result set still renders the header and separator,
/// followed by a `(no rows)` notice instead of an empty body.
pub fn format_table(columns: &[String], rows: &[Vec<SqlValue>]) -> String {
    let rendered: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|value| value.to_string()).collect())
        .collect();

    let mut widths: Vec<usize> = columns.iter().map(|name| name.len()).collect();
    for row in &rendered {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.len());
            }
        }
    }

    let header = pad_line(columns.iter().map(String::as_str), &widths);
    let separator = "-".repeat(header.len());

    let mut lines = Vec::with_capacity(rendered.len() + 4);
    lines.push(header);
    lines.push(separator);

    if rendered.is_empty() {
        lines.push("(no rows)".to_string());
    } else {
        for row in &rendered {
            lines.push(pad_line(row.iter().map(String::as_str), &widths));
        }
        lines.push(String::new());
        lines.push(format!("Total rows: {}", rendered.len()));
    }

    lines.join("\n")
}

fn pad_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    padded.join(" | ")
}
