//! Tests for JSON to table normalization.

use horizon_lattice_table::{RowRecord, SCALAR_COLUMN, TabularResult, to_table};
use serde_json::{Value, json};

fn row(pairs: &[(&str, &str)]) -> RowRecord {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn column_names(table: &TabularResult) -> Vec<&str> {
    table.columns().iter().map(String::as_str).collect()
}

fn assert_columns_cover_rows(table: &TabularResult) {
    for row in table.rows() {
        for key in row.keys() {
            assert!(table.columns().contains(key), "column '{key}' missing");
        }
    }
}

#[test]
fn test_array_of_objects_with_sparse_rows() {
    let table = to_table(&json!([{"a": 1, "b": 2}, {"a": 3}]));

    assert!(table.columns().contains("a"));
    assert!(table.columns().contains("b"));
    assert_eq!(table.rows(), [row(&[("a", "1"), ("b", "2")]), row(&[("a", "3")])]);
    assert!(!table.rows()[1].contains_key("b"));
}

#[test]
fn test_root_field_wrapper_is_looked_through() {
    let table = to_table(&json!({"user": {"id": 1, "posts": [{"title": "x"}]}}));

    assert_eq!(table.rows(), [row(&[("title", "x")])]);
    assert_eq!(column_names(&table), ["title"]);
    assert!(!table.columns().contains("id"));
}

#[test]
fn test_wrapper_without_arrays_is_a_single_row_with_json_cells() {
    let table = to_table(&json!({"user": {"id": 1, "name": "Ann"}}));

    assert_eq!(table.len(), 1);
    assert_eq!(column_names(&table), ["user"]);
    assert_eq!(table.cell(0, "user"), r#"{"id":1,"name":"Ann"}"#);
}

#[test]
fn test_wrapped_scalar_array_uses_inner_property_name() {
    let table = to_table(&json!({"search": {"terms": ["a", "b"]}}));

    assert_eq!(column_names(&table), ["terms"]);
    assert_eq!(table.rows(), [row(&[("terms", "a")]), row(&[("terms", "b")])]);
}

#[test]
fn test_first_array_property_is_selected() {
    let table = to_table(&json!({"id": 1, "posts": [{"title": "x"}]}));

    assert_eq!(table.rows(), [row(&[("title", "x")])]);
    assert_eq!(column_names(&table), ["title"]);
}

#[test]
fn test_object_without_array_property() {
    let table = to_table(&json!({"id": 1, "name": "Ann"}));

    assert_eq!(table.rows(), [row(&[("id", "1"), ("name", "Ann")])]);
    assert_eq!(column_names(&table), ["id", "name"]);
}

#[test]
fn test_empty_inputs() {
    let table = to_table(&json!([]));
    assert!(table.is_empty());
    assert!(table.columns().is_empty());

    let table = to_table(&json!({}));
    assert_eq!(table.len(), 1);
    assert!(table.rows()[0].is_empty());
    assert!(table.columns().is_empty());
}

#[test]
fn test_null_input() {
    let table = to_table(&Value::Null);
    assert_eq!(table.rows(), [row(&[(SCALAR_COLUMN, "")])]);
}

#[test]
fn test_array_of_scalars() {
    let table = to_table(&json!([1, "two", null, true]));

    assert_eq!(table.len(), 4);
    assert_eq!(column_names(&table), [SCALAR_COLUMN]);
    assert_eq!(table.cell(0, SCALAR_COLUMN), "1");
    assert_eq!(table.cell(1, SCALAR_COLUMN), "two");
    assert_eq!(table.cell(2, SCALAR_COLUMN), "");
    assert_eq!(table.cell(3, SCALAR_COLUMN), "true");
}

#[test]
fn test_mixed_elements_fall_back_to_property_column() {
    let table = to_table(&json!({
        "tags": [{"name": "rust"}, "plain", 3, [1, 2]]
    }));

    assert_eq!(table.len(), 4);
    assert_eq!(column_names(&table), ["name", "tags"]);
    assert_eq!(table.rows()[0], row(&[("name", "rust")]));
    assert_eq!(table.rows()[1], row(&[("tags", "plain")]));
    assert_eq!(table.rows()[2], row(&[("tags", "3")]));
    assert_eq!(table.rows()[3], row(&[("tags", "[1,2]")]));
    assert_columns_cover_rows(&table);
}

#[test]
fn test_empty_object_elements_still_produce_rows() {
    let table = to_table(&json!([{}, {"a": 1}, {}]));
    assert_eq!(table.len(), 3);
    assert!(table.rows()[0].is_empty());
    assert_eq!(column_names(&table), ["a"]);
}

#[test]
fn test_deeply_nested_values_render_as_json() {
    let table = to_table(&json!([
        {"id": 1, "author": {"name": "Ann", "roles": ["admin"]}, "scores": [1.5, 2]}
    ]));

    assert_eq!(table.cell(0, "id"), "1");
    assert_eq!(table.cell(0, "author"), r#"{"name":"Ann","roles":["admin"]}"#);
    assert_eq!(table.cell(0, "scores"), "[1.5,2]");
}

#[test]
fn test_row_order_matches_array_order() {
    let items: Vec<Value> = (0..50).map(|i| json!({"n": i})).collect();
    let table = to_table(&Value::Array(items));

    for (i, row) in table.rows().iter().enumerate() {
        assert_eq!(row["n"], i.to_string());
    }
}

#[test]
fn test_normalization_is_deterministic() {
    let data = json!({
        "meta": {"page": 1},
        "users": [
            {"zeta": 1, "alpha": 2},
            {"mid": 3, "alpha": 4, "omega": {"x": [1]}}
        ]
    });

    let first = to_table(&data);
    let second = to_table(&data);

    assert_eq!(first, second);
    assert_eq!(column_names(&first), column_names(&second));
    assert_eq!(column_names(&first), ["zeta", "alpha", "mid", "omega"]);
    assert_columns_cover_rows(&first);
}

#[test]
fn test_never_panics_on_odd_shapes() {
    let samples = [
        json!(null),
        json!(0),
        json!(""),
        json!([]),
        json!({}),
        json!([[]]),
        json!([null, {}, [], [[{}]]]),
        json!({"a": {"b": {"c": {"d": [{"e": null}]}}}}),
        json!({"a": [], "b": [[], []], "c": [null]}),
        json!({"x": 1e300, "y": -0.0, "z": u64::MAX}),
    ];

    for sample in &samples {
        let table = to_table(sample);
        assert_columns_cover_rows(&table);
    }
}
