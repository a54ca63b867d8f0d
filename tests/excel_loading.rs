#![cfg(feature = "excel_test_writer")]

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use rust_xlsxwriter::Workbook;

use source_tasks::dispatch::{dispatch, Outcome};
use source_tasks::loader::excel::{load_excel_from_path, load_excel_workbook_from_path};
use source_tasks::loader::{load_from_path, LoadOptions, SheetSelection};
use source_tasks::types::{DataType, Value};

fn tmp_file(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("source-tasks-{name}-{nanos}.xlsx"))
}

/// Two sheets with the same `Name,Age,Salary` header, plus a third with a different header.
fn write_staff_workbook(path: &PathBuf) {
    let mut wb = Workbook::new();

    let ws1 = wb.add_worksheet();
    ws1.set_name("North").unwrap();
    ws1.write_string(0, 0, "Name").unwrap();
    ws1.write_string(0, 1, "Age").unwrap();
    ws1.write_string(0, 2, "Salary").unwrap();
    ws1.write_string(1, 0, "A").unwrap();
    ws1.write_number(1, 1, 30).unwrap();
    ws1.write_number(1, 2, 100).unwrap();

    let ws2 = wb.add_worksheet();
    ws2.set_name("South").unwrap();
    ws2.write_string(0, 0, "Name").unwrap();
    ws2.write_string(0, 1, "Age").unwrap();
    ws2.write_string(0, 2, "Salary").unwrap();
    ws2.write_string(1, 0, "B").unwrap();
    ws2.write_number(1, 1, 25).unwrap();
    ws2.write_number(1, 2, 250.5).unwrap();

    let ws3 = wb.add_worksheet();
    ws3.set_name("Notes").unwrap();
    ws3.write_string(0, 0, "Remark").unwrap();
    ws3.write_string(1, 0, "hello").unwrap();

    wb.save(path).unwrap();
}

#[test]
fn load_excel_defaults_to_first_sheet() {
    let path = tmp_file("first");
    write_staff_workbook(&path);

    let t = load_excel_from_path(&path, None).unwrap();
    assert_eq!(t.row_count(), 1);
    assert_eq!(t.schema.fields[1].data_type, DataType::Int64);
    assert_eq!(t.rows[0][2], Value::Int64(100));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn load_excel_named_sheets_concatenate_rows() {
    let path = tmp_file("named");
    write_staff_workbook(&path);

    let t = load_excel_workbook_from_path(&path, Some(&["North", "South"])).unwrap();
    assert_eq!(t.row_count(), 2);
    assert_eq!(t.schema.fields[2].data_type, DataType::Float64);
    assert_eq!(t.rows[1][0], Value::Utf8("B".to_string()));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn load_excel_all_sheets_rejects_mismatched_headers() {
    let path = tmp_file("mismatch");
    write_staff_workbook(&path);

    let err = load_excel_workbook_from_path(&path, None).unwrap_err();
    assert!(err.to_string().contains("sheet 'Notes'"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn unified_load_workbook_then_dispatch() {
    let path = tmp_file("unified");
    write_staff_workbook(&path);

    let opts = LoadOptions {
        sheets: SheetSelection::Sheets(vec!["North".to_string(), "South".to_string()]),
        ..Default::default()
    };
    let source = load_from_path(&path, &opts).unwrap();
    match dispatch(&source, "highest salary").unwrap() {
        Outcome::Rows { table, .. } => {
            assert_eq!(table.rows, vec![vec![
                Value::Utf8("B".to_string()),
                Value::Int64(25),
                Value::Float64(250.5),
            ]]);
        }
        other => panic!("expected rows, got {other:?}"),
    }

    let _ = std::fs::remove_file(&path);
}
