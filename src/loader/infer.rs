//! Column type inference shared by every tabular reader.
//!
//! Readers turn their native cells into [`RawCell`]s; [`build_table`] then fixes one
//! [`DataType`] per column and converts every cell to a [`Value`] of that type.

use std::collections::HashSet;

use crate::error::{LoadError, LoadResult};
use crate::types::{DataType, Field, Schema, Table, Value};

/// A cell as produced by a format reader, before the column type is known.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

static EMPTY: RawCell = RawCell::Empty;

/// Markers read as a missing cell, compared ASCII case-insensitively.
const NULL_MARKERS: &[&str] = &["na", "n/a", "nan", "null"];

impl RawCell {
    /// Classify a textual cell (CSV, string spreadsheet cells).
    pub fn sniff(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || NULL_MARKERS.iter().any(|m| trimmed.eq_ignore_ascii_case(m)) {
            return RawCell::Empty;
        }
        if let Ok(v) = trimmed.parse::<i64>() {
            return RawCell::Int(v);
        }
        if let Ok(v) = trimmed.parse::<f64>() {
            return RawCell::Float(v);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "true" => RawCell::Bool(true),
            "false" => RawCell::Bool(false),
            _ => RawCell::Text(trimmed.to_owned()),
        }
    }

    fn render(&self) -> String {
        match self {
            RawCell::Empty => String::new(),
            RawCell::Int(v) => v.to_string(),
            RawCell::Float(v) => v.to_string(),
            RawCell::Bool(v) => v.to_string(),
            RawCell::Text(s) => s.clone(),
        }
    }
}

/// Build a [`Table`] from header names and raw rows.
///
/// Rows shorter than the header are padded with empty cells; longer rows are a decode error.
/// Duplicate header names are a decode error.
pub fn build_table(headers: Vec<String>, rows: Vec<Vec<RawCell>>) -> LoadResult<Table> {
    let mut seen = HashSet::with_capacity(headers.len());
    for h in &headers {
        if !seen.insert(h.as_str()) {
            return Err(LoadError::Decode {
                message: format!("duplicate column '{h}'. headers={headers:?}"),
            });
        }
    }

    let width = headers.len();
    for (idx0, row) in rows.iter().enumerate() {
        if row.len() > width {
            return Err(LoadError::Decode {
                message: format!(
                    "row {} has {} cells but the header has {width} columns",
                    idx0 + 1,
                    row.len()
                ),
            });
        }
    }

    let types: Vec<DataType> = (0..width)
        .map(|col| infer_column(rows.iter().map(|r| r.get(col).unwrap_or(&EMPTY))))
        .collect();

    let out_rows = rows
        .into_iter()
        .map(|row| {
            let mut cells = row.into_iter();
            types
                .iter()
                .map(|dt| convert(*dt, cells.next().unwrap_or(RawCell::Empty)))
                .collect()
        })
        .collect();

    let fields = headers
        .into_iter()
        .zip(types)
        .map(|(name, dt)| Field::new(name, dt))
        .collect();

    Ok(Table::new(Schema::new(fields), out_rows))
}

fn infer_column<'a>(cells: impl Iterator<Item = &'a RawCell>) -> DataType {
    let mut ints = 0usize;
    let mut floats = 0usize;
    let mut bools = 0usize;
    let mut non_empty = 0usize;

    for c in cells {
        match c {
            RawCell::Empty => continue,
            RawCell::Int(_) => ints += 1,
            RawCell::Float(_) => floats += 1,
            RawCell::Bool(_) => bools += 1,
            RawCell::Text(_) => {}
        }
        non_empty += 1;
    }

    if non_empty == 0 {
        DataType::Utf8
    } else if ints == non_empty {
        DataType::Int64
    } else if ints + floats == non_empty {
        DataType::Float64
    } else if bools == non_empty {
        DataType::Bool
    } else {
        DataType::Utf8
    }
}

fn convert(data_type: DataType, cell: RawCell) -> Value {
    match (data_type, cell) {
        (_, RawCell::Empty) => Value::Null,
        (DataType::Int64, RawCell::Int(v)) => Value::Int64(v),
        (DataType::Float64, RawCell::Int(v)) => Value::Float64(v as f64),
        (DataType::Float64, RawCell::Float(v)) => Value::Float64(v),
        (DataType::Bool, RawCell::Bool(v)) => Value::Bool(v),
        (DataType::Utf8, RawCell::Text(s)) => Value::Utf8(s),
        (_, other) => Value::Utf8(other.render()),
    }
}
