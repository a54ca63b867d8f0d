//! Core data model: in-memory [`Table`] and [`Text`] values and the [`Source`] sum type that holds
//! whichever one a loader produced.

use std::fmt;

use serde::Serialize;

/// Logical type inferred for a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
}

impl DataType {
    /// `true` for the types aggregates can operate on.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Int64 | Self::Float64)
    }
}

/// A single named, typed column in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Column name.
    pub name: String,
    /// Inferred column type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Ordered list of columns describing a [`Table`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    /// Columns in source order.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate column names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a column by exact name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Resolve a column by exact name, falling back to the first ASCII case-insensitive match.
    pub fn resolve(&self, name: &str) -> Option<usize> {
        self.index_of(name).or_else(|| {
            self.fields
                .iter()
                .position(|f| f.name.eq_ignore_ascii_case(name))
        })
    }
}

/// A single cell of a [`Table`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing/empty cell.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NaN"),
            Value::Int64(v) => write!(f, "{v}"),
            // `{:?}` keeps the fractional part visible (`60.0`, not `60`).
            Value::Float64(v) => write!(f, "{v:?}"),
            Value::Bool(v) => f.write_str(if *v { "True" } else { "False" }),
            Value::Utf8(s) => f.write_str(s),
        }
    }
}

static NULL: Value = Value::Null;

/// In-memory tabular value.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] fields. Tables are
/// never mutated after loading; every operation returns a new [`Table`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    /// Column layout.
    pub schema: Schema,
    /// Row-major cell storage.
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create a table from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.schema.fields.len()
    }

    /// Create a new table containing only rows that match `predicate`.
    ///
    /// The returned table preserves the original schema.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[Value]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(row.as_slice()))
            .cloned()
            .collect();
        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// The rows at `positions`, in the given order. Out-of-range positions are skipped.
    pub fn select(&self, positions: &[usize]) -> Self {
        let rows = positions
            .iter()
            .filter_map(|&i| self.rows.get(i))
            .cloned()
            .collect();
        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// Iterate the cells of one column in row order.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = &Value> {
        self.rows.iter().map(move |row| row.get(idx).unwrap_or(&NULL))
    }
}

/// In-memory flattened text extracted from a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Text(String);

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self(content.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lines split on `\n`, in source order. A trailing newline yields a final empty line.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.0.split('\n')
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

/// Which operation family a [`Source`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Shape {
    Table,
    Text,
}

/// A loaded data source: either a table or flat text.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Table(Table),
    Text(Text),
}

impl Source {
    pub fn shape(&self) -> Shape {
        match self {
            Source::Table(_) => Shape::Table,
            Source::Text(_) => Shape::Text,
        }
    }

    /// One-paragraph description printed after a successful load.
    pub fn summary(&self) -> String {
        match self {
            Source::Table(t) => format!(
                "Table loaded: {} rows x {} columns\nColumns: {}",
                t.row_count(),
                t.column_count(),
                t.schema.field_names().collect::<Vec<_>>().join(", ")
            ),
            Source::Text(t) => format!("Text loaded: {} characters", t.char_count()),
        }
    }
}

impl From<Table> for Source {
    fn from(t: Table) -> Self {
        Source::Table(t)
    }
}

impl From<Text> for Source {
    fn from(t: Text) -> Self {
        Source::Text(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_prefers_exact_then_case_insensitive() {
        let schema = Schema::new(vec![
            Field::new("salary", DataType::Int64),
            Field::new("Salary", DataType::Int64),
            Field::new("AGE", DataType::Int64),
        ]);
        assert_eq!(schema.resolve("Salary"), Some(1));
        assert_eq!(schema.resolve("age"), Some(2));
        assert_eq!(schema.resolve("Age"), Some(2));
        assert_eq!(schema.resolve("name"), None);
    }

    #[test]
    fn text_lines_keep_trailing_empty_line() {
        let t = Text::new("a\nb\n");
        assert_eq!(t.lines().collect::<Vec<_>>(), vec!["a", "b", ""]);
    }

    #[test]
    fn summary_lists_columns_in_order() {
        let table = Table::new(
            Schema::new(vec![
                Field::new("Name", DataType::Utf8),
                Field::new("Salary", DataType::Int64),
            ]),
            vec![vec![Value::Utf8("A".to_string()), Value::Int64(1)]],
        );
        assert_eq!(
            Source::from(table).summary(),
            "Table loaded: 1 rows x 2 columns\nColumns: Name, Salary"
        );
        assert_eq!(
            Source::from(Text::new("héllo")).summary(),
            "Text loaded: 5 characters"
        );
    }
}
