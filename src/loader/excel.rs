#![cfg(feature = "excel")]

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};

use crate::error::{LoadError, LoadResult};
use crate::types::Table;

use super::infer::{build_table, RawCell};

type Workbook = Sheets<BufReader<File>>;

/// Load one sheet of a workbook (`.xlsx`, `.xls`, `.ods`, etc.) into an in-memory [`Table`].
///
/// Behavior:
/// - Picks `sheet_name` if provided; otherwise uses the first sheet in the workbook
/// - Detects the first non-empty row as the header row
/// - Reads remaining rows and infers one type per column
pub fn load_excel_from_path(path: impl AsRef<Path>, sheet_name: Option<&str>) -> LoadResult<Table> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet = match sheet_name {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| LoadError::Decode {
                message: "workbook has no sheets".to_string(),
            })?,
    };
    load_sheets(&mut workbook, vec![sheet])
}

/// Load multiple sheets from a workbook and concatenate all rows into one [`Table`].
///
/// - If `sheet_names` is `None`, loads **all sheets** in workbook order.
/// - If `sheet_names` is `Some(&[...])`, loads only those sheets (in the provided order).
///
/// Every sheet must carry the same header row as the first one.
pub fn load_excel_workbook_from_path(
    path: impl AsRef<Path>,
    sheet_names: Option<&[&str]>,
) -> LoadResult<Table> {
    let mut workbook = open_workbook_auto(path)?;

    let sheets: Vec<String> = match sheet_names {
        Some(names) => names.iter().map(|s| s.to_string()).collect(),
        None => workbook.sheet_names().to_vec(),
    };
    load_sheets(&mut workbook, sheets)
}

fn load_sheets(workbook: &mut Workbook, sheets: Vec<String>) -> LoadResult<Table> {
    if sheets.is_empty() {
        return Err(LoadError::Decode {
            message: "workbook has no sheets".to_string(),
        });
    }

    let mut headers: Option<Vec<String>> = None;
    let mut all_rows: Vec<Vec<RawCell>> = Vec::new();
    for sheet in sheets {
        let range = workbook.worksheet_range(&sheet)?;
        let (sheet_headers, mut rows) = read_sheet(&sheet, &range)?;
        match &headers {
            None => headers = Some(sheet_headers),
            Some(first) if *first != sheet_headers => {
                return Err(LoadError::Decode {
                    message: format!(
                        "sheet '{sheet}': headers {sheet_headers:?} differ from first sheet {first:?}"
                    ),
                });
            }
            Some(_) => {}
        }
        all_rows.append(&mut rows);
    }

    build_table(headers.unwrap_or_default(), all_rows)
}

fn read_sheet(sheet: &str, range: &calamine::Range<Data>) -> LoadResult<(Vec<String>, Vec<Vec<RawCell>>)> {
    let mut rows_iter = range
        .rows()
        .skip_while(|row| row.iter().all(|c| matches!(c, Data::Empty)));

    let headers: Vec<String> = rows_iter
        .next()
        .ok_or_else(|| LoadError::Decode {
            message: format!("sheet '{sheet}' has no non-empty rows (no header row found)"),
        })?
        .iter()
        .map(|c| cell_to_header_string(c).trim().to_string())
        .collect();

    let rows = rows_iter
        .map(|row| {
            let mut cells: Vec<RawCell> = row.iter().map(raw_cell).collect();
            // Trailing empties past the header width are formatting residue, not data.
            while cells.len() > headers.len() && matches!(cells.last(), Some(RawCell::Empty)) {
                cells.pop();
            }
            cells
        })
        .collect();

    Ok((headers, rows))
}

fn cell_to_header_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 => (*f as i64).to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn raw_cell(c: &Data) -> RawCell {
    match c {
        Data::Empty => RawCell::Empty,
        Data::Int(i) => RawCell::Int(*i),
        // Workbooks store every number as a float; whole values read back as integers.
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => RawCell::Int(*f as i64),
        Data::Float(f) => RawCell::Float(*f),
        Data::Bool(b) => RawCell::Bool(*b),
        Data::String(s) => RawCell::sniff(s),
        Data::Error(e) => RawCell::Text(format!("{e:?}")),
        other => RawCell::Text(other.to_string()),
    }
}
