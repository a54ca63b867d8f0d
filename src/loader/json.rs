//! JSON table loader.
//!
//! Supported inputs:
//! - A JSON array of objects: `[{"a":1}, {"a":2}]`
//! - A single JSON object (one row)
//! - Newline-delimited JSON (NDJSON): `{"a":1}\n{"a":2}\n`
//!
//! Columns appear in first-seen key order across rows. Nested objects and arrays are kept as
//! their JSON text.

use std::fs;
use std::path::Path;

use serde_json::Map;

use crate::error::{LoadError, LoadResult};
use crate::types::Table;

use super::infer::{build_table, RawCell};

/// Load a JSON file into an in-memory [`Table`].
pub fn load_json_from_path(path: impl AsRef<Path>) -> LoadResult<Table> {
    let text = fs::read_to_string(path)?;
    load_json_from_str(&text)
}

/// Load JSON from an in-memory string into a [`Table`].
pub fn load_json_from_str(input: &str) -> LoadResult<Table> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(LoadError::Decode {
            message: "json input is empty".to_string(),
        });
    }

    // First try parsing as a single JSON value (array or object).
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Array(items)) => table_from_values(items),
        Ok(v @ serde_json::Value::Object(_)) => table_from_values(vec![v]),
        Ok(_) => Err(LoadError::Decode {
            message: "json must be an object, an array of objects, or NDJSON".to_string(),
        }),
        Err(_) => {
            let mut values = Vec::new();
            for line in trimmed.lines() {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                values.push(serde_json::from_str::<serde_json::Value>(line)?);
            }
            table_from_values(values)
        }
    }
}

fn table_from_values(values: Vec<serde_json::Value>) -> LoadResult<Table> {
    let mut objects: Vec<Map<String, serde_json::Value>> = Vec::with_capacity(values.len());
    for (idx0, v) in values.into_iter().enumerate() {
        match v {
            serde_json::Value::Object(obj) => objects.push(obj),
            _ => {
                return Err(LoadError::Decode {
                    message: format!("row {} is not a json object", idx0 + 1),
                });
            }
        }
    }

    let mut headers: Vec<String> = Vec::new();
    for obj in &objects {
        for key in obj.keys() {
            if !headers.iter().any(|h| h == key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = objects
        .iter()
        .map(|obj| {
            headers
                .iter()
                .map(|h| obj.get(h).map(raw_cell).unwrap_or(RawCell::Empty))
                .collect()
        })
        .collect();

    build_table(headers, rows)
}

fn raw_cell(v: &serde_json::Value) -> RawCell {
    match v {
        serde_json::Value::Null => RawCell::Empty,
        serde_json::Value::Bool(b) => RawCell::Bool(*b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => RawCell::Int(i),
            None => n.as_f64().map(RawCell::Float).unwrap_or_else(|| RawCell::Text(n.to_string())),
        },
        serde_json::Value::String(s) => RawCell::Text(s.clone()),
        other => RawCell::Text(other.to_string()),
    }
}
