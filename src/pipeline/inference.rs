//! Column type inference

use super::table::{Cell, Table};

/// A column is numeric if at least one of its cells parses to a finite number.
///
/// A single parseable cell is enough, whatever the rest of the column holds.
/// Empty and all-missing columns are not numeric.
pub fn is_numeric_column(table: &Table, column: &str) -> bool {
    table
        .column_values(column)
        .any(|cell| cell.as_number().is_some())
}

/// Filter `columns` down to the numeric ones, preserving order.
pub fn numeric_columns<S: AsRef<str>>(table: &Table, columns: &[S]) -> Vec<String> {
    columns
        .iter()
        .map(|column| column.as_ref())
        .filter(|column| is_numeric_column(table, column))
        .map(str::to_string)
        .collect()
}

/// Kind of a column as shown in the overview
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum ColumnKind {
    Numeric,
    NonNumeric,
}

impl ColumnKind {
    pub fn of(table: &Table, column: &str) -> Self {
        if is_numeric_column(table, column) {
            ColumnKind::Numeric
        } else {
            ColumnKind::NonNumeric
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColumnKind::Numeric => "Numeric",
            ColumnKind::NonNumeric => "Non-Numeric",
        }
    }
}

/// True when every cell of the column is blank.
pub fn is_all_missing(table: &Table, column: &str) -> bool {
    table.column_values(column).all(Cell::is_blank)
}
