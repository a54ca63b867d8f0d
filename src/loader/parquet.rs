//! Parquet table loader.

use std::collections::HashMap;
use std::path::Path;

use parquet::file::reader::{ChunkReader, FileReader};
use parquet::file::serialized_reader::SerializedFileReader;
use parquet::record::Field;

use crate::error::LoadResult;
use crate::types::Table;

use super::infer::{build_table, RawCell};

/// Load a Parquet file into an in-memory [`Table`].
///
/// Notes:
/// - Columns are the top-level fields of the file schema, in schema order
/// - Uses the Parquet record API (`RowIter`); nested groups/lists become their display text
pub fn load_parquet_from_path(path: impl AsRef<Path>) -> LoadResult<Table> {
    let reader = SerializedFileReader::try_from(path.as_ref())?;
    let headers = top_level_columns(&reader);

    let mut rows: Vec<Vec<RawCell>> = Vec::new();
    for row_res in reader.into_iter() {
        let row = row_res?;

        let by_name: HashMap<&str, &Field> = row
            .get_column_iter()
            .map(|(name, field)| (name.as_str(), field))
            .collect();

        rows.push(
            headers
                .iter()
                .map(|h| by_name.get(h.as_str()).map(|f| raw_cell(f)).unwrap_or(RawCell::Empty))
                .collect(),
        );
    }

    build_table(headers, rows)
}

fn top_level_columns<R: ChunkReader + 'static>(reader: &SerializedFileReader<R>) -> Vec<String> {
    reader
        .metadata()
        .file_metadata()
        .schema_descr()
        .root_schema()
        .get_fields()
        .iter()
        .map(|t| t.name().to_string())
        .collect()
}

fn raw_cell(f: &Field) -> RawCell {
    match f {
        Field::Null => RawCell::Empty,
        Field::Bool(b) => RawCell::Bool(*b),
        Field::Byte(v) => RawCell::Int(i64::from(*v)),
        Field::Short(v) => RawCell::Int(i64::from(*v)),
        Field::Int(v) => RawCell::Int(i64::from(*v)),
        Field::Long(v) => RawCell::Int(*v),
        Field::UByte(v) => RawCell::Int(i64::from(*v)),
        Field::UShort(v) => RawCell::Int(i64::from(*v)),
        Field::UInt(v) => RawCell::Int(i64::from(*v)),
        Field::ULong(v) => match i64::try_from(*v) {
            Ok(i) => RawCell::Int(i),
            Err(_) => RawCell::Float(*v as f64),
        },
        Field::Float(v) => RawCell::Float(f64::from(*v)),
        Field::Double(v) => RawCell::Float(*v),
        Field::Str(s) => RawCell::Text(s.clone()),
        other => RawCell::Text(other.to_string()),
    }
}
