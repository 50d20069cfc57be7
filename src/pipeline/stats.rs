//! Descriptive statistics and outlier detection for numeric columns

use serde::Serialize;

use super::table::{Row, Table};

/// Rows further than this many standard deviations from the mean are outliers
pub const OUTLIER_THRESHOLD: f64 = 3.0;

/// Summary statistics of a numeric column
///
/// When the column has no parseable values every field is NaN; check
/// [`ColumnStatistics::is_available`] before formatting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnStatistics {
    pub mean: f64,
    /// Element at index `n / 2` of the sorted values (upper middle for even `n`)
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation (divides by `n`)
    pub std_dev: f64,
}

impl ColumnStatistics {
    fn unavailable() -> Self {
        Self {
            mean: f64::NAN,
            median: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
            std_dev: f64::NAN,
        }
    }

    pub fn is_available(&self) -> bool {
        !self.mean.is_nan()
    }
}

/// Compute mean, median, min, max and population standard deviation over the
/// parseable values of `column`.
pub fn calculate_statistics(table: &Table, column: &str) -> ColumnStatistics {
    summarize(&table.numeric_values(column))
}

pub(crate) fn summarize(values: &[f64]) -> ColumnStatistics {
    if values.is_empty() {
        return ColumnStatistics::unavailable();
    }

    let mean = mean(values);
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    ColumnStatistics {
        mean,
        median: sorted[sorted.len() / 2],
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        std_dev: population_std_dev(values, mean),
    }
}

/// Arithmetic mean; NaN for an empty slice.
pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

pub(crate) fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

fn is_outlier(table: &Table, row: &Row, column: &str, stats: &ColumnStatistics) -> bool {
    // Unparseable cells and unavailable statistics compare as NaN, never outliers
    let value = table.value(row, column).as_number().unwrap_or(f64::NAN);
    (value - stats.mean).abs() > OUTLIER_THRESHOLD * stats.std_dev
}

/// Rows whose value in `column` lies more than three standard deviations from
/// the column mean, as a new table in original order.
pub fn detect_outliers(table: &Table, column: &str) -> Table {
    let stats = calculate_statistics(table, column);
    let outliers = table.retain_rows(|row| is_outlier(table, row, column, &stats));
    tracing::debug!(column, count = outliers.height(), "detected outliers");
    outliers
}

/// The input table without the rows [`detect_outliers`] reports.
pub fn remove_outliers(table: &Table, column: &str) -> Table {
    let stats = calculate_statistics(table, column);
    let kept = table.retain_rows(|row| !is_outlier(table, row, column, &stats));
    tracing::debug!(
        column,
        removed = table.height() - kept.height(),
        "removed outliers"
    );
    kept
}
