//! CSV table loader.

use std::path::Path;

use crate::error::LoadResult;
use crate::types::Table;

use super::infer::{build_table, RawCell};

/// Load a CSV file into an in-memory [`Table`].
///
/// Rules:
///
/// - The first record is the header row.
/// - Records may be shorter than the header (missing trailing cells are empty).
/// - Column types are inferred from the cell text (see [`RawCell::sniff`]).
pub fn load_csv_from_path(path: impl AsRef<Path>) -> LoadResult<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    load_csv_from_reader(&mut rdr)
}

/// Load CSV data from an existing CSV reader.
pub fn load_csv_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> LoadResult<Table> {
    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_owned()).collect();

    let mut rows: Vec<Vec<RawCell>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(RawCell::sniff).collect());
    }

    build_table(headers, rows)
}
