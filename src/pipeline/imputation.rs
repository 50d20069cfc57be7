//! Missing value imputation
//!
//! Fills the missing cells of one column with the column mean, median, mode,
//! or a draw from a normal distribution fitted to the column. Rows whose cell
//! actually changed get their imputation flag for that column set.

use std::collections::HashMap;
use std::f64::consts::PI;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::inference::is_numeric_column;
use super::stats::{mean, population_std_dev};
use super::table::{format_fixed, Cell, Table};

/// Decimal places used for imputed numeric values
const IMPUTED_DECIMALS: usize = 2;

/// Imputation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImputeMethod {
    Mean,
    Median,
    Mode,
    Gaussian,
}

impl ImputeMethod {
    /// Parse a method identifier (`mean`, `median`, `mode`, `gaussian`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "mean" => Some(ImputeMethod::Mean),
            "median" => Some(ImputeMethod::Median),
            "mode" => Some(ImputeMethod::Mode),
            "gaussian" => Some(ImputeMethod::Gaussian),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ImputeMethod::Mean => "mean",
            ImputeMethod::Median => "median",
            ImputeMethod::Mode => "mode",
            ImputeMethod::Gaussian => "gaussian",
        }
    }
}

/// Impute `column` with `method`, drawing Gaussian samples from the thread RNG.
///
/// Columns without any parseable number always use [`ImputeMethod::Mode`].
pub fn impute_missing_values(table: &Table, column: &str, method: ImputeMethod) -> Table {
    impute_missing_values_with_rng(table, column, method, &mut rand::thread_rng())
}

/// Like [`impute_missing_values`] with an explicit random source.
///
/// Gaussian imputation consumes fresh draws on every call, so repeating it on
/// the same table gives different values.
pub fn impute_missing_values_with_rng<R: Rng>(
    table: &Table,
    column: &str,
    method: ImputeMethod,
    rng: &mut R,
) -> Table {
    let method = if is_numeric_column(table, column) {
        method
    } else {
        if method != ImputeMethod::Mode {
            tracing::debug!(column, requested = method.name(), "no numeric values, falling back to mode");
        }
        ImputeMethod::Mode
    };

    match method {
        ImputeMethod::Mean => {
            let fill = format_fixed(mean(&table.numeric_values(column)), IMPUTED_DECIMALS);
            fill_cells(table, column, Cell::is_missing_for_numeric, || Cell::Text(fill.clone()))
        }
        ImputeMethod::Median => {
            let mut values = table.numeric_values(column);
            values.sort_by(f64::total_cmp);
            let fill = format_fixed(values[values.len() / 2], IMPUTED_DECIMALS);
            fill_cells(table, column, Cell::is_missing_for_numeric, || Cell::Text(fill.clone()))
        }
        ImputeMethod::Mode => {
            let fill = mode_of(table, column);
            fill_cells(table, column, Cell::is_blank, || fill.clone())
        }
        ImputeMethod::Gaussian => {
            let values = table.numeric_values(column);
            let mu = mean(&values);
            let sigma = population_std_dev(&values, mu);
            fill_cells(table, column, Cell::is_missing_for_numeric, || {
                let sample = mu + standard_normal(&mut *rng) * sigma;
                Cell::Text(format_fixed(sample, IMPUTED_DECIMALS))
            })
        }
    }
}

/// Impute by method identifier.
///
/// Columns without parseable numbers fall back to mode whatever the name.
/// Otherwise an unknown name leaves the table unchanged.
pub fn impute_by_name<R: Rng>(table: &Table, column: &str, method: &str, rng: &mut R) -> Table {
    if !is_numeric_column(table, column) {
        return impute_missing_values_with_rng(table, column, ImputeMethod::Mode, rng);
    }
    match ImputeMethod::from_name(method) {
        Some(method) => impute_missing_values_with_rng(table, column, method, rng),
        None => {
            tracing::warn!(method, "unknown imputation method, table left unchanged");
            table.clone()
        }
    }
}

/// Replace every cell matching `is_missing` with `fill()` and record which
/// rows actually changed.
fn fill_cells<F>(table: &Table, column: &str, is_missing: fn(&Cell) -> bool, mut fill: F) -> Table
where
    F: FnMut() -> Cell,
{
    let Some(idx) = table.column_index(column) else {
        tracing::warn!(column, "imputation requested for unknown column");
        return table.clone();
    };

    let mut imputed = table.clone();
    let mut filled = 0usize;
    for row in imputed.rows_mut() {
        let changed = if is_missing(&row.cells()[idx]) {
            let replacement = fill();
            let changed = replacement != row.cells()[idx];
            row.set_cell(idx, replacement);
            changed
        } else {
            false
        };
        if changed {
            filled += 1;
        }
        row.set_imputed(column, changed);
    }

    tracing::debug!(column, filled, "imputed missing values");
    imputed
}

#[derive(PartialEq, Eq, Hash)]
enum CellKey<'a> {
    Text(&'a str),
    Number(u64),
}

/// Most frequent non-blank value by exact equality; the first one seen wins a
/// tie. Empty when the column has no non-blank value.
fn mode_of(table: &Table, column: &str) -> Cell {
    let mut index: HashMap<CellKey<'_>, usize> = HashMap::new();
    let mut counts: Vec<(&Cell, usize)> = Vec::new();

    for cell in table.column_values(column).filter(|cell| !cell.is_blank()) {
        let key = match cell {
            Cell::Text(s) => CellKey::Text(s),
            // +0.0 and -0.0 compare equal
            Cell::Number(x) if *x == 0.0 => CellKey::Number(0),
            Cell::Number(x) => CellKey::Number(x.to_bits()),
            Cell::Missing | Cell::Empty => continue,
        };
        match index.get(&key) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(key, counts.len());
                counts.push((cell, 1));
            }
        }
    }

    let mut best: Option<(&Cell, usize)> = None;
    for &(cell, count) in &counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((cell, count));
        }
    }
    best.map_or(Cell::Empty, |(cell, _)| cell.clone())
}

/// Standard normal deviate via the Box-Muller transform.
fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    // 1 - [0, 1) keeps u1 away from zero
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}
