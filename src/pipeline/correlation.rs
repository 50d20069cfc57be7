//! Association measures between two columns
//!
//! Pearson correlation for numeric pairs and Cramér's V for categorical pairs.

use std::collections::HashMap;

use rayon::prelude::*;
use serde::Serialize;

use super::table::Table;

/// Pearson correlation between two columns.
///
/// Each column is filtered for parseable values on its own, so the two
/// sequences are not aligned by row when their missingness differs. The first
/// `n = min(len_x, len_y)` values of each sequence are paired.
///
/// Returns `None` when either sequence is empty or the ratio is not finite
/// (zero variance in either variable).
pub fn calculate_correlation(table: &Table, col_x: &str, col_y: &str) -> Option<f64> {
    let x_values = table.numeric_values(col_x);
    let y_values = table.numeric_values(col_y);
    pearson_truncated(&x_values, &y_values)
}

fn pearson_truncated(x_values: &[f64], y_values: &[f64]) -> Option<f64> {
    if x_values.is_empty() || y_values.is_empty() {
        return None;
    }

    let n = x_values.len().min(y_values.len());
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2, mut sum_y2) = (0.0, 0.0, 0.0, 0.0, 0.0);
    for (&x, &y) in x_values[..n].iter().zip(&y_values[..n]) {
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
        sum_y2 += y * y;
    }

    let n = n as f64;
    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator = ((n * sum_x2 - sum_x * sum_x) * (n * sum_y2 - sum_y * sum_y)).sqrt();
    let correlation = numerator / denominator;

    correlation.is_finite().then_some(correlation)
}

/// Cramér's V between two columns treated as categorical.
///
/// Categories are the textual form of each cell; nothing is filtered, so
/// blanks and `"N/A"` form categories of their own. Chi-square sums over the
/// observed cells of the contingency table only, and no bias correction is
/// applied. Degenerate tables (no rows, a single category) yield NaN.
pub fn calculate_cramers_v(table: &Table, col_x: &str, col_y: &str) -> f64 {
    let mut x_categories: HashMap<String, usize> = HashMap::new();
    let mut y_categories: HashMap<String, usize> = HashMap::new();
    let mut observed: HashMap<(usize, usize), f64> = HashMap::new();

    for (x, y) in table.column_values(col_x).zip(table.column_values(col_y)) {
        let next_x = x_categories.len();
        let xi = *x_categories.entry(x.to_string()).or_insert(next_x);
        let next_y = y_categories.len();
        let yi = *y_categories.entry(y.to_string()).or_insert(next_y);
        *observed.entry((xi, yi)).or_insert(0.0) += 1.0;
    }

    let mut row_sums = vec![0.0; x_categories.len()];
    let mut col_sums = vec![0.0; y_categories.len()];
    for (&(xi, yi), &count) in &observed {
        row_sums[xi] += count;
        col_sums[yi] += count;
    }
    let total = table.height() as f64;

    let chi_square: f64 = observed
        .iter()
        .map(|(&(xi, yi), &count)| {
            let expected = row_sums[xi] * col_sums[yi] / total;
            (count - expected).powi(2) / expected
        })
        .sum();

    let k = x_categories.len().min(y_categories.len()) as f64;
    (chi_square / (total * (k - 1.0))).sqrt()
}

/// A pair of numeric columns with their correlation
#[derive(Debug, Clone, Serialize)]
pub struct CorrelatedPair {
    pub feature1: String,
    pub feature2: String,
    pub correlation: f64,
}

/// Correlations between every pair of `columns` whose absolute value exceeds
/// `threshold`, sorted by absolute correlation descending.
///
/// Pairs whose correlation is unavailable are skipped.
pub fn find_correlated_pairs<S: AsRef<str> + Sync>(
    table: &Table,
    columns: &[S],
    threshold: f64,
) -> Vec<CorrelatedPair> {
    let num_cols = columns.len();
    let pairs: Vec<(usize, usize)> = (0..num_cols)
        .flat_map(|i| ((i + 1)..num_cols).map(move |j| (i, j)))
        .collect();

    let mut correlated: Vec<CorrelatedPair> = pairs
        .par_iter()
        .filter_map(|&(i, j)| {
            let (a, b) = (columns[i].as_ref(), columns[j].as_ref());
            calculate_correlation(table, a, b)
                .filter(|c| c.abs() > threshold)
                .map(|correlation| CorrelatedPair {
                    feature1: a.to_string(),
                    feature2: b.to_string(),
                    correlation,
                })
        })
        .collect();

    correlated.sort_by(|a, b| b.correlation.abs().total_cmp(&a.correlation.abs()));
    correlated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_positive() {
        let r = pearson_truncated(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_perfect_negative() {
        let r = pearson_truncated(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_variance_unavailable() {
        assert_eq!(pearson_truncated(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]), None);
    }

    #[test]
    fn test_empty_unavailable() {
        assert_eq!(pearson_truncated(&[], &[1.0, 2.0]), None);
    }

    #[test]
    fn test_truncates_to_shorter_sequence() {
        // Only the first two x values pair with y
        let r = pearson_truncated(&[1.0, 2.0, 100.0], &[1.0, 2.0]).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }
}
