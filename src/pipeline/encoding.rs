//! Categorical encoding
//!
//! Label encoding adds `<column>_encoded`; one-hot encoding adds one
//! `<column>_<value>` indicator per distinct value. The source column stays in
//! place; [`drop_encoded_source`] removes it when the caller wants it gone.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::table::{Cell, Table};

/// Categorical encoding strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncodeMethod {
    Label,
    OneHot,
}

impl EncodeMethod {
    /// Parse a method identifier (`label`, `onehot`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "label" => Some(EncodeMethod::Label),
            "onehot" => Some(EncodeMethod::OneHot),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EncodeMethod::Label => "label",
            EncodeMethod::OneHot => "onehot",
        }
    }
}

/// Distinct values of `column` in first-occurrence order, with each row's
/// position in that list.
fn enumerate_categories(table: &Table, column: &str) -> (Vec<String>, Vec<usize>) {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut categories = Vec::new();
    let codes = table
        .column_values(column)
        .map(|cell| {
            let value = cell.to_string();
            *positions.entry(value).or_insert_with_key(|value| {
                categories.push(value.clone());
                categories.len() - 1
            })
        })
        .collect();
    (categories, codes)
}

/// Encode `column` with `method`, keeping the source column.
pub fn encode_categorical(table: &Table, column: &str, method: EncodeMethod) -> Table {
    if !table.has_column(column) {
        tracing::warn!(column, "encoding requested for unknown column");
        return table.clone();
    }

    let (categories, codes) = enumerate_categories(table, column);
    let mut encoded = table.clone();

    match method {
        EncodeMethod::Label => {
            let cells = codes.iter().map(|&code| Cell::Number(code as f64)).collect();
            encoded.set_column(&format!("{}_encoded", column), cells);
        }
        EncodeMethod::OneHot => {
            for (position, category) in categories.iter().enumerate() {
                let cells = codes
                    .iter()
                    .map(|&code| Cell::Number(if code == position { 1.0 } else { 0.0 }))
                    .collect();
                encoded.set_column(&format!("{}_{}", column, category), cells);
            }
        }
    }

    tracing::debug!(
        column,
        method = method.name(),
        categories = categories.len(),
        "encoded categorical column"
    );
    encoded
}

/// Encode by method identifier; an unknown name leaves the table unchanged.
pub fn encode_by_name(table: &Table, column: &str, method: &str) -> Table {
    match EncodeMethod::from_name(method) {
        Some(method) => encode_categorical(table, column, method),
        None => {
            tracing::warn!(method, "unknown encoding method, table left unchanged");
            table.clone()
        }
    }
}

/// Drop the source column of a one-hot encoding along with its imputation flags.
pub fn drop_encoded_source(table: &Table, column: &str) -> Table {
    table.drop_column(column)
}
