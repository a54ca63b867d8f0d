use source_tasks::loader::json::{load_json_from_path, load_json_from_str};
use source_tasks::types::{DataType, Value};

#[test]
fn load_json_array_from_path_happy_path() {
    let t = load_json_from_path("tests/fixtures/people.json").unwrap();

    assert_eq!(t.row_count(), 2);
    let names: Vec<&str> = t.schema.field_names().collect();
    assert_eq!(names, vec!["id", "name", "score", "active"]);
    assert_eq!(t.rows[0][0], Value::Int64(1));
    assert_eq!(t.rows[1][1], Value::Utf8("Grace".to_string()));
    assert_eq!(t.schema.fields[2].data_type, DataType::Float64);
    assert_eq!(t.schema.fields[3].data_type, DataType::Bool);
}

#[test]
fn load_json_ndjson_happy_path() {
    let input = r#"
{"Name":"A","Salary":100}
{"Name":"B","Salary":200}
"#;
    let t = load_json_from_str(input).unwrap();
    assert_eq!(t.row_count(), 2);
    assert_eq!(t.rows[1][1], Value::Int64(200));
}

#[test]
fn load_json_unions_keys_in_first_seen_order() {
    let input = r#"[{"b":1},{"a":"x","b":2}]"#;
    let t = load_json_from_str(input).unwrap();
    let names: Vec<&str> = t.schema.field_names().collect();
    assert_eq!(names, vec!["b", "a"]);
    assert_eq!(t.rows[0][1], Value::Null);
}

#[test]
fn load_json_single_object_is_one_row() {
    let t = load_json_from_str(r#"{"Age": 41}"#).unwrap();
    assert_eq!(t.row_count(), 1);
    assert_eq!(t.rows[0][0], Value::Int64(41));
}

#[test]
fn load_json_errors_on_non_object_rows() {
    let err = load_json_from_str(r#"[{"a":1}, 2]"#).unwrap_err();
    assert!(err.to_string().contains("row 2 is not a json object"));
}

#[test]
fn load_json_errors_on_empty_input() {
    let err = load_json_from_str("   \n").unwrap_err();
    assert!(err.to_string().contains("json input is empty"));
}
