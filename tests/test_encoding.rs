//! Tests for categorical encoding

use tabex::pipeline::{
    drop_encoded_source, encode_by_name, encode_categorical, Cell, EncodeMethod,
};

mod common;

use common::{assert_has_columns, assert_missing_columns, create_mixed_table, single_column, table_from_strs};

fn numbers(table: &tabex::pipeline::Table, column: &str) -> Vec<f64> {
    table
        .column_values(column)
        .map(|c| match c {
            Cell::Number(x) => *x,
            other => panic!("expected a number, got {:?}", other),
        })
        .collect()
}

#[test]
fn test_label_encoding_first_occurrence_order() {
    let table = single_column("color", &["red", "blue", "red", "green"]);
    let encoded = encode_categorical(&table, "color", EncodeMethod::Label);

    assert_eq!(encoded.columns(), &["color", "color_encoded"]);
    assert_eq!(numbers(&encoded, "color_encoded"), vec![0.0, 1.0, 0.0, 2.0]);
}

#[test]
fn test_one_hot_encoding() {
    let table = single_column("color", &["red", "blue", "red"]);
    let encoded = encode_categorical(&table, "color", EncodeMethod::OneHot);

    assert_eq!(encoded.columns(), &["color", "color_red", "color_blue"]);
    assert_eq!(numbers(&encoded, "color_red"), vec![1.0, 0.0, 1.0]);
    assert_eq!(numbers(&encoded, "color_blue"), vec![0.0, 1.0, 0.0]);
}

#[test]
fn test_one_hot_has_exactly_one_hot_per_row() {
    let table = create_mixed_table();
    let encoded = encode_categorical(&table, "city", EncodeMethod::OneHot);
    let indicators = ["city_Paris", "city_Lyon", "city_Nice"];
    assert_has_columns(&encoded, &indicators);

    for row in encoded.rows() {
        let hot: f64 = indicators
            .iter()
            .map(|c| encoded.value(row, c).as_number().unwrap())
            .sum();
        assert_eq!(hot, 1.0);
    }
}

#[test]
fn test_blank_values_form_a_category() {
    let table = single_column("c", &["a", "", "a"]);
    let label = encode_categorical(&table, "c", EncodeMethod::Label);
    assert_eq!(numbers(&label, "c_encoded"), vec![0.0, 1.0, 0.0]);

    let one_hot = encode_categorical(&table, "c", EncodeMethod::OneHot);
    assert_has_columns(&one_hot, &["c_a", "c_"]);
}

#[test]
fn test_drop_encoded_source() {
    let table = single_column("color", &["red", "blue"]);
    let encoded = encode_categorical(&table, "color", EncodeMethod::OneHot);
    let dropped = drop_encoded_source(&encoded, "color");

    assert_missing_columns(&dropped, &["color"]);
    assert_eq!(dropped.columns(), &["color_red", "color_blue"]);
}

#[test]
fn test_existing_column_is_overwritten() {
    let table = table_from_strs(&["c", "c_encoded"], &[&["x", "old"], &["y", "old"]]);
    let encoded = encode_categorical(&table, "c", EncodeMethod::Label);
    assert_eq!(encoded.width(), 2);
    assert_eq!(numbers(&encoded, "c_encoded"), vec![0.0, 1.0]);
}

#[test]
fn test_unknown_column_or_method_is_noop() {
    let table = create_mixed_table();
    assert_eq!(encode_categorical(&table, "nope", EncodeMethod::Label), table);
    assert_eq!(encode_by_name(&table, "city", "ordinal"), table);
    assert_eq!(
        encode_by_name(&table, "city", "onehot"),
        encode_categorical(&table, "city", EncodeMethod::OneHot)
    );
}

#[test]
fn test_numbers_encode_by_text() {
    let table = single_column("n", &["1", "1.0", "1"]);
    let encoded = encode_categorical(&table, "n", EncodeMethod::Label);
    assert_eq!(numbers(&encoded, "n_encoded"), vec![0.0, 1.0, 0.0]);
}
