//! Dataset overview - shape, column kinds and per-column statistics

use serde::Serialize;

use crate::pipeline::{
    calculate_statistics, find_correlated_pairs, numeric_columns, ColumnKind, ColumnStatistics, CorrelatedPair,
    Table,
};

/// Profile of a single column
#[derive(Debug, Clone, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: ColumnKind,
    /// Blank cells (absent, empty or "N/A")
    pub missing: usize,
    /// Present for numeric columns only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<ColumnStatistics>,
}

/// Quick insights into a dataset
#[derive(Debug, Clone, Serialize)]
pub struct DatasetOverview {
    pub rows: usize,
    pub columns: usize,
    pub numeric_columns: Vec<String>,
    pub profiles: Vec<ColumnProfile>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub correlated_pairs: Vec<CorrelatedPair>,
}

impl DatasetOverview {
    /// Profile every column of `table`. Numeric pairs whose absolute
    /// correlation exceeds `correlation_threshold` are listed as well.
    pub fn from_table(table: &Table, correlation_threshold: f64) -> Self {
        let profiles: Vec<ColumnProfile> = table
            .columns()
            .iter()
            .map(|name| {
                let kind = ColumnKind::of(table, name);
                ColumnProfile {
                    name: name.clone(),
                    kind,
                    missing: table.missing_count(name),
                    statistics: (kind == ColumnKind::Numeric)
                        .then(|| calculate_statistics(table, name)),
                }
            })
            .collect();

        let numeric_columns = numeric_columns(table, table.columns());

        let correlated_pairs = find_correlated_pairs(table, &numeric_columns, correlation_threshold);

        Self {
            rows: table.height(),
            columns: table.width(),
            numeric_columns,
            profiles,
            correlated_pairs,
        }
    }
}
