//! Row filtering for [`crate::types::Table`].

use crate::types::{Table, Value};

/// Returns a new [`Table`] containing only rows for which `predicate` returns `true`.
///
/// This is a convenience wrapper around [`Table::filter_rows`].
pub fn filter<F>(table: &Table, predicate: F) -> Table
where
    F: FnMut(&[Value]) -> bool,
{
    table.filter_rows(predicate)
}

/// Positions of every row whose cell at `column` equals `value`, in table order.
///
/// A `Null` target matches nothing. Pair with [`Table::select`] to get the rows themselves.
pub fn positions_equal_to(table: &Table, column: usize, value: &Value) -> Vec<usize> {
    if matches!(value, Value::Null) {
        return Vec::new();
    }
    table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row.get(column) == Some(value))
        .map(|(i, _)| i)
        .collect()
}
