//! Row-oriented in-memory table
//!
//! A [`Table`] is an ordered list of column names plus an ordered list of
//! [`Row`]s. Every row carries one [`Cell`] per column, a stable `id` assigned
//! at load time, and a map of per-column imputation flags used for display.
//!
//! Tables are treated as values: every processing step clones its input and
//! returns a new table, so holders of the previous table never observe changes.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Text the application uses to mark a missing value
pub const MISSING_SENTINEL: &str = "N/A";

static ABSENT: Cell = Cell::Missing;

/// A single table cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    /// No value at all (null in the source file)
    Missing,
    /// An empty string
    Empty,
    /// Any textual value, numeric-looking or not
    Text(String),
    /// A typed numeric value (e.g. from Parquet, or produced by encoding)
    Number(f64),
}

impl Cell {
    /// Build a cell from raw text, mapping `""` to [`Cell::Empty`].
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(text.to_string())
        }
    }

    /// Parse the cell as a finite number.
    ///
    /// Text is read up to the end of its leading decimal literal, so `"12kg"`
    /// is 12 and `"3.5 m"` is 3.5. Values that overflow to infinity count as
    /// unparseable.
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            Cell::Number(x) => *x,
            Cell::Text(s) => parse_numeric_prefix(s)?,
            Cell::Missing | Cell::Empty => return None,
        };
        value.is_finite().then_some(value)
    }

    /// Absent, empty, or the `"N/A"` sentinel.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Missing | Cell::Empty => true,
            Cell::Text(s) => s == MISSING_SENTINEL,
            Cell::Number(_) => false,
        }
    }

    /// Missing for numeric purposes: blank, or not parseable as a finite number.
    pub fn is_missing_for_numeric(&self) -> bool {
        self.is_blank() || self.as_number().is_none()
    }

    /// Value written to an exported file; `None` becomes a null.
    pub fn export_text(&self) -> Option<String> {
        match self {
            Cell::Missing => None,
            other => Some(other.to_string()),
        }
    }
}

/// Longest leading decimal literal of `text`, after leading whitespace.
///
/// Accepts an optional sign, digits with an optional fraction, and an optional
/// exponent that is only consumed when it has digits (`"1e"` reads as 1).
/// `"inf"`, `"NaN"` and hex literals have no numeric prefix.
fn parse_numeric_prefix(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let scan_digits = |from: usize| {
        from + bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = scan_digits(end);
    let mut digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = scan_digits(end + 1);
        let frac_digits = frac_end - (end + 1);
        if digits + frac_digits > 0 {
            digits += frac_digits;
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_end = scan_digits(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Textual form of the cell. Absent and empty cells render as `""`.
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Missing | Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Number(x) => write!(f, "{}", x),
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::from_text(text)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Missing, Into::into)
    }
}

/// Render a cell for display: `"N/A"` for absent/empty, `"Invalid"` for a
/// non-finite number, otherwise its textual form.
pub fn format_value(cell: &Cell) -> String {
    match cell {
        Cell::Missing | Cell::Empty => MISSING_SENTINEL.to_string(),
        Cell::Number(x) if !x.is_finite() => "Invalid".to_string(),
        other => other.to_string(),
    }
}

/// Format a number with a fixed number of decimals.
///
/// Non-finite values render as `NaN`, `Infinity` or `-Infinity`, which the
/// numeric parser later treats as unparseable.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if value == 0.0 {
        format!("{:.*}", decimals, 0.0)
    } else {
        format!("{:.*}", decimals, value)
    }
}

/// Structural errors when assembling a table
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),

    #[error("row {id} has {actual} cells, expected {expected}")]
    RowWidth {
        id: usize,
        expected: usize,
        actual: usize,
    },
}

/// One record of the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    id: usize,
    cells: Vec<Cell>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    imputed: HashMap<String, bool>,
}

impl Row {
    pub fn new(id: usize, cells: Vec<Cell>) -> Self {
        Self {
            id,
            cells,
            imputed: HashMap::new(),
        }
    }

    /// Stable identifier assigned at load time
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Whether the cell in `column` was filled by imputation
    pub fn is_imputed(&self, column: &str) -> bool {
        self.imputed.get(column).copied().unwrap_or(false)
    }

    pub fn imputed_flags(&self) -> &HashMap<String, bool> {
        &self.imputed
    }

    pub(crate) fn set_cell(&mut self, index: usize, cell: Cell) {
        self.cells[index] = cell;
    }

    pub(crate) fn push_cell(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    pub(crate) fn set_imputed(&mut self, column: &str, imputed: bool) {
        self.imputed.insert(column.to_string(), imputed);
    }
}

/// Ordered columns over ordered rows
///
/// Built only through [`Table::new`] (deserialization included), so column
/// names are unique and every row has one cell per column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

#[derive(Deserialize)]
struct RawTable {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl TryFrom<RawTable> for Table {
    type Error = TableError;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        Table::new(raw.columns, raw.rows)
    }
}

impl Table {
    /// Assemble a table, checking column uniqueness and row widths.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Result<Self, TableError> {
        let mut seen = HashSet::with_capacity(columns.len());
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(TableError::DuplicateColumn(name.clone()));
            }
        }

        if let Some(row) = rows.iter().find(|row| row.cells.len() != columns.len()) {
            return Err(TableError::RowWidth {
                id: row.id,
                expected: columns.len(),
                actual: row.cells.len(),
            });
        }

        Ok(Self { columns, rows })
    }

    /// Assemble a table from raw records, assigning ids by input order.
    pub fn from_records(
        columns: Vec<String>,
        records: Vec<Vec<Cell>>,
    ) -> Result<Self, TableError> {
        let rows = records
            .into_iter()
            .enumerate()
            .map(|(id, cells)| Row::new(id, cells))
            .collect();
        Self::new(columns, rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|name| name == column)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    /// Cell of `row` in `column`; absent when the column does not exist.
    pub fn value<'a>(&'a self, row: &'a Row, column: &str) -> &'a Cell {
        match self.column_index(column) {
            Some(idx) => &row.cells[idx],
            None => &ABSENT,
        }
    }

    /// Every cell of `column` in row order. An unknown column yields absent cells.
    pub fn column_values<'a>(&'a self, column: &str) -> impl Iterator<Item = &'a Cell> + 'a {
        let idx = self.column_index(column);
        self.rows.iter().map(move |row| match idx {
            Some(i) => &row.cells[i],
            None => &ABSENT,
        })
    }

    /// Parseable values of `column` in row order, unparseable cells skipped.
    pub fn numeric_values(&self, column: &str) -> Vec<f64> {
        self.column_values(column)
            .filter_map(Cell::as_number)
            .collect()
    }

    /// Count of blank cells (absent, empty or `"N/A"`) in `column`.
    pub fn missing_count(&self, column: &str) -> usize {
        self.column_values(column)
            .filter(|cell| cell.is_blank())
            .count()
    }

    /// New table without `column`. Its imputation flags go with it.
    pub fn drop_column(&self, column: &str) -> Table {
        let Some(idx) = self.column_index(column) else {
            tracing::warn!(column, "drop requested for unknown column");
            return self.clone();
        };

        let mut columns = self.columns.clone();
        columns.remove(idx);

        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                row.cells.remove(idx);
                row.imputed.remove(column);
                row
            })
            .collect();

        Table { columns, rows }
    }

    /// New table with the named columns removed, in order.
    pub fn drop_columns<S: AsRef<str>>(&self, columns: &[S]) -> Table {
        columns
            .iter()
            .fold(self.clone(), |table, column| table.drop_column(column.as_ref()))
    }

    /// New table keeping only rows for which `keep` holds. Ids are preserved.
    pub fn retain_rows<F>(&self, mut keep: F) -> Table
    where
        F: FnMut(&Row) -> bool,
    {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().filter(|row| keep(row)).cloned().collect(),
        }
    }

    /// New table with `column` set to `cells`, replacing an existing column of
    /// that name or appending a new one. `cells` must have one entry per row.
    pub(crate) fn with_column(&self, column: &str, cells: Vec<Cell>) -> Table {
        let mut table = self.clone();
        table.set_column(column, cells);
        table
    }

    /// In-place form of [`Table::with_column`], for tables a transformation owns.
    pub(crate) fn set_column(&mut self, column: &str, cells: Vec<Cell>) {
        debug_assert_eq!(cells.len(), self.rows.len());
        match self.column_index(column) {
            Some(idx) => {
                for (row, cell) in self.rows.iter_mut().zip(cells) {
                    row.set_cell(idx, cell);
                }
            }
            None => {
                self.columns.push(column.to_string());
                for (row, cell) in self.rows.iter_mut().zip(cells) {
                    row.push_cell(cell);
                }
            }
        }
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }
}

/// Replace every absent or empty cell, in every column, with `"N/A"`.
pub fn fill_missing_with_sentinel(table: &Table) -> Table {
    let mut filled = table.clone();
    let mut replaced = 0usize;
    for row in filled.rows_mut() {
        for cell in row.cells.iter_mut() {
            if matches!(cell, Cell::Missing | Cell::Empty) {
                *cell = Cell::Text(MISSING_SENTINEL.to_string());
                replaced += 1;
            }
        }
    }
    tracing::debug!(replaced, "filled missing cells with sentinel");
    filled
}
