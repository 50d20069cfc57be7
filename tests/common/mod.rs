//! Shared test utilities and fixture generators

#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;

use tabex::pipeline::{Cell, Table};
use tempfile::TempDir;

/// Build a table from string literals; `""` becomes an empty cell.
pub fn table_from_strs(columns: &[&str], rows: &[&[&str]]) -> Table {
    Table::from_records(
        columns.iter().map(|c| c.to_string()).collect(),
        rows.iter()
            .map(|row| row.iter().map(|v| Cell::from(*v)).collect())
            .collect(),
    )
    .unwrap()
}

/// Build a single-column table.
pub fn single_column(column: &str, values: &[&str]) -> Table {
    Table::from_records(
        vec![column.to_string()],
        values.iter().map(|v| vec![Cell::from(*v)]).collect(),
    )
    .unwrap()
}

/// A small mixed dataset with known characteristics:
/// - `age`: numeric with one blank
/// - `income`: numeric, exactly `age * 1000` where both present
/// - `city`: categorical, fully determined by `segment`
/// - `segment`: categorical
/// - `note`: free text, never numeric
pub fn create_mixed_table() -> Table {
    table_from_strs(
        &["age", "income", "city", "segment", "note"],
        &[
            &["25", "25000", "Paris", "A", "first"],
            &["32", "32000", "Lyon", "B", "second"],
            &["", "41000", "Paris", "A", "N/A"],
            &["47", "47000", "Nice", "C", ""],
            &["51", "51000", "Lyon", "B", "fifth"],
            &["38", "38000", "Paris", "A", "sixth"],
        ],
    )
}

/// Twenty values of 10 followed by a single 100, which sits more than three
/// standard deviations above the mean.
pub fn create_outlier_table() -> Table {
    let mut values = vec!["10"; 20];
    values.push("100");
    single_column("v", &values)
}

/// Write CSV text into a temporary directory.
pub fn create_temp_csv(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();

    (temp_dir, csv_path)
}

/// Text of every cell in a column.
pub fn column_text(table: &Table, column: &str) -> Vec<String> {
    table.column_values(column).map(|c| c.to_string()).collect()
}

/// Assert that a table has the expected shape
pub fn assert_shape(table: &Table, expected_rows: usize, expected_cols: usize) {
    assert_eq!(
        table.height(),
        expected_rows,
        "Row count mismatch: expected {}, got {}",
        expected_rows,
        table.height()
    );
    assert_eq!(
        table.width(),
        expected_cols,
        "Column count mismatch: expected {}, got {}",
        expected_cols,
        table.width()
    );
}

/// Assert that a table contains specific columns
pub fn assert_has_columns(table: &Table, expected_cols: &[&str]) {
    for col in expected_cols {
        assert!(
            table.has_column(col),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            table.columns()
        );
    }
}

/// Assert that a table does NOT contain specific columns
pub fn assert_missing_columns(table: &Table, unexpected_cols: &[&str]) {
    for col in unexpected_cols {
        assert!(
            !table.has_column(col),
            "Unexpected column still present: '{}'",
            col
        );
    }
}
