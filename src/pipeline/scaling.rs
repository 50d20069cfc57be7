//! Feature scaling of a numeric column

use serde::{Deserialize, Serialize};

use super::stats::{mean, population_std_dev};
use super::table::{format_fixed, Cell, Table};

/// Decimal places of scaled values
const SCALED_DECIMALS: usize = 4;

/// Type of scaler to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleMethod {
    /// (x - min) / (max - min)
    MinMax,
    /// (x - mean) / population std
    Standard,
    /// (x - Q1) / (Q3 - Q1), nearest-rank quartiles
    Robust,
}

impl ScaleMethod {
    /// Parse a method identifier (`minmax`, `standard`, `robust`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "minmax" => Some(ScaleMethod::MinMax),
            "standard" => Some(ScaleMethod::Standard),
            "robust" => Some(ScaleMethod::Robust),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ScaleMethod::MinMax => "minmax",
            ScaleMethod::Standard => "standard",
            ScaleMethod::Robust => "robust",
        }
    }
}

/// Center and scale of a fitted scaler: `scaled = (x - center) / scale`
#[derive(Debug, Clone, Copy, PartialEq)]
struct ScalerParams {
    center: f64,
    scale: f64,
}

impl ScalerParams {
    fn fit(method: ScaleMethod, values: &[f64]) -> Self {
        match method {
            ScaleMethod::MinMax => {
                let min = values.iter().copied().fold(f64::INFINITY, f64::min);
                let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                Self {
                    center: min,
                    scale: max - min,
                }
            }
            ScaleMethod::Standard => {
                let mean = mean(values);
                Self {
                    center: mean,
                    scale: population_std_dev(values, mean),
                }
            }
            ScaleMethod::Robust => {
                let mut sorted = values.to_vec();
                sorted.sort_by(f64::total_cmp);
                let n = sorted.len() as f64;
                let q1 = sorted[(n * 0.25).floor() as usize];
                let q3 = sorted[(n * 0.75).floor() as usize];
                Self {
                    center: q1,
                    scale: q3 - q1,
                }
            }
        }
    }

    fn apply(&self, value: f64) -> f64 {
        (value - self.center) / self.scale
    }
}

/// Scale the parseable values of `column`, formatted to four decimals.
///
/// Unparseable cells pass through untouched. A zero scale (constant column,
/// zero IQR or zero std) is not guarded and yields non-finite text such as
/// `NaN` or `Infinity` in the affected cells.
pub fn scale_values(table: &Table, column: &str, method: ScaleMethod) -> Table {
    let values = table.numeric_values(column);
    if values.is_empty() {
        tracing::debug!(column, "no numeric values to scale");
        return table.clone();
    }

    let params = ScalerParams::fit(method, &values);
    if params.scale == 0.0 {
        tracing::warn!(column, method = method.name(), "zero scale, scaled values will not be finite");
    }

    let cells: Vec<Cell> = table
        .column_values(column)
        .map(|cell| match cell.as_number() {
            Some(x) => Cell::Text(format_fixed(params.apply(x), SCALED_DECIMALS)),
            None => cell.clone(),
        })
        .collect();

    table.with_column(column, cells)
}

/// Scale by method identifier; an unknown name leaves the table unchanged.
pub fn scale_by_name(table: &Table, column: &str, method: &str) -> Table {
    match ScaleMethod::from_name(method) {
        Some(method) => scale_values(table, column, method),
        None => {
            tracing::warn!(method, "unknown scaling method, table left unchanged");
            table.clone()
        }
    }
}
