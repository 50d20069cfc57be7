//! Feature importance ranking against a target column

use rayon::prelude::*;
use serde::Serialize;

use super::correlation::{calculate_correlation, calculate_cramers_v};
use super::inference::is_numeric_column;
use super::table::Table;

/// Importance score of one feature
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
    pub measure: AssociationMeasure,
}

/// Which association measure produced a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssociationMeasure {
    /// Absolute Pearson correlation (both columns numeric)
    Pearson,
    /// Cramér's V (at least one column categorical)
    CramersV,
}

/// Score every feature against `target` and rank them, highest first.
///
/// Numeric/numeric pairs score `|pearson|` (0 when unavailable); any other
/// pair scores Cramér's V. A non-finite Cramér's V (single category, no rows)
/// scores 0. Ties keep the input order.
pub fn calculate_feature_importance<S: AsRef<str> + Sync>(
    table: &Table,
    target: &str,
    features: &[S],
) -> Vec<FeatureImportance> {
    let target_numeric = is_numeric_column(table, target);

    let mut ranked: Vec<FeatureImportance> = features
        .par_iter()
        .map(|feature| {
            let feature = feature.as_ref();
            if target_numeric && is_numeric_column(table, feature) {
                let importance = calculate_correlation(table, target, feature)
                    .map(f64::abs)
                    .unwrap_or(0.0);
                FeatureImportance {
                    feature: feature.to_string(),
                    importance,
                    measure: AssociationMeasure::Pearson,
                }
            } else {
                let v = calculate_cramers_v(table, target, feature);
                FeatureImportance {
                    feature: feature.to_string(),
                    importance: if v.is_finite() { v } else { 0.0 },
                    measure: AssociationMeasure::CramersV,
                }
            }
        })
        .collect();

    // sort_by is stable, so equal scores keep input order
    ranked.sort_by(|a, b| b.importance.total_cmp(&a.importance));
    tracing::debug!(target_column = target, features = ranked.len(), "ranked feature importance");
    for entry in &ranked {
        tracing::trace!(feature = %entry.feature, importance = entry.importance, "feature score");
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::table::Cell;

    fn table() -> Table {
        let rows = [
            ("1", "2", "a", "x"),
            ("2", "4", "b", "x"),
            ("3", "6", "a", "x"),
            ("4", "8", "b", "x"),
        ];
        Table::from_records(
            vec!["target".into(), "double".into(), "cat".into(), "constant".into()],
            rows.iter()
                .map(|(a, b, c, d)| vec![Cell::from(*a), Cell::from(*b), Cell::from(*c), Cell::from(*d)])
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_numeric_pair_uses_pearson() {
        let ranked = calculate_feature_importance(&table(), "target", &["double"]);
        assert_eq!(ranked[0].measure, AssociationMeasure::Pearson);
        assert!((ranked[0].importance - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_category_scores_zero() {
        let ranked = calculate_feature_importance(&table(), "target", &["constant"]);
        assert_eq!(ranked[0].measure, AssociationMeasure::CramersV);
        assert_eq!(ranked[0].importance, 0.0);
    }

    #[test]
    fn test_sorted_descending() {
        let ranked = calculate_feature_importance(&table(), "target", &["constant", "cat", "double"]);
        let names: Vec<&str> = ranked.iter().map(|f| f.feature.as_str()).collect();
        assert_eq!(names[0], "double");
        assert_eq!(names[2], "constant");
    }
}
