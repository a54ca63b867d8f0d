use std::fmt;

use serde::Serialize;

use crate::types::{Table, Value};

use super::report::render_table;

/// Result of one dispatch call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// Zero or more table rows matching a predicate (ties included). `index[i]` is the
    /// position of `table.rows[i]` in the source table.
    Rows {
        label: &'static str,
        table: Table,
        index: Vec<usize>,
    },
    /// A single aggregate value.
    Scalar { label: &'static str, value: Value },
    /// Text lines containing `keyword`, in source order.
    Lines { keyword: String, lines: Vec<String> },
    /// A task was recognized but the column it needs is absent.
    MissingColumn { column: &'static str },
    /// No task pattern matched the instruction for the source's shape.
    Unrecognized { hint: &'static str },
}

impl Outcome {
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Outcome::Unrecognized { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Rows {
                label,
                table,
                index,
            } => {
                writeln!(f, "{label}:")?;
                if table.rows.is_empty() {
                    f.write_str("(no rows)")
                } else {
                    f.write_str(&render_table(table, index))
                }
            }
            Outcome::Scalar { label, value } => write!(f, "{label}: {value}"),
            Outcome::Lines { keyword, lines } => {
                write!(f, "Lines containing '{keyword}':")?;
                for line in lines {
                    write!(f, "\n- {line}")?;
                }
                Ok(())
            }
            Outcome::MissingColumn { column } => {
                write!(f, "Task recognized but required column '{column}' is missing.")
            }
            Outcome::Unrecognized { hint } => write!(f, "{hint}."),
        }
    }
}
