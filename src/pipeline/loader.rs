//! Dataset loader and writer for CSV and Parquet files
//!
//! CSV files are read with every column as text so that type decisions stay
//! with the inference step. Parquet keeps its typed columns: numeric values
//! become numeric cells.

use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;

use super::table::{Cell, Table};

fn file_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Scan a dataset lazily (CSV or Parquet based on extension)
fn scan_dataset(path: &Path) -> Result<LazyFrame> {
    let extension = file_extension(path);

    let lf = match extension.as_str() {
        // Schema length 0 reads every column as String
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(Some(0))
            .finish()
            .with_context(|| format!("Failed to load CSV file: {}", path.display()))?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    Ok(lf)
}

/// Load a dataset into a [`Table`], assigning row ids by position.
pub fn load_table(path: &Path) -> Result<Table> {
    let df = scan_dataset(path)?
        .collect()
        .with_context(|| format!("Failed to read dataset: {}", path.display()))?;

    let table = dataframe_to_table(&df)?;
    tracing::info!(
        path = %path.display(),
        rows = table.height(),
        columns = table.width(),
        "loaded dataset"
    );
    Ok(table)
}

/// Column names of a dataset, read from the schema only.
pub fn get_column_names(path: &Path) -> Result<Vec<String>> {
    let schema = scan_dataset(path)?
        .collect_schema()
        .with_context(|| format!("Failed to read schema: {}", path.display()))?;
    Ok(schema.iter_names().map(|name| name.to_string()).collect())
}

/// Convert a polars DataFrame into a row-oriented table.
pub fn dataframe_to_table(df: &DataFrame) -> Result<Table> {
    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let mut records: Vec<Vec<Cell>> = vec![Vec::with_capacity(columns.len()); df.height()];
    for column in df.get_columns() {
        // Series::iter requires a single chunk; scanned files arrive in several
        let series = column.as_materialized_series().rechunk();
        for (record, value) in records.iter_mut().zip(series.iter()) {
            record.push(cell_from_any_value(&value));
        }
    }

    Ok(Table::from_records(columns, records)?)
}

fn cell_from_any_value(value: &AnyValue) -> Cell {
    match value {
        AnyValue::Null => Cell::Missing,
        AnyValue::String(s) => Cell::from_text(s),
        AnyValue::StringOwned(s) => Cell::from_text(s.as_str()),
        AnyValue::Boolean(b) => Cell::Text(b.to_string()),
        AnyValue::Int8(v) => Cell::Number(*v as f64),
        AnyValue::Int16(v) => Cell::Number(*v as f64),
        AnyValue::Int32(v) => Cell::Number(*v as f64),
        AnyValue::Int64(v) => Cell::Number(*v as f64),
        AnyValue::UInt8(v) => Cell::Number(*v as f64),
        AnyValue::UInt16(v) => Cell::Number(*v as f64),
        AnyValue::UInt32(v) => Cell::Number(*v as f64),
        AnyValue::UInt64(v) => Cell::Number(*v as f64),
        AnyValue::Float32(v) => Cell::Number(*v as f64),
        AnyValue::Float64(v) => Cell::Number(*v),
        other => Cell::Text(other.to_string()),
    }
}

/// Convert a table into a DataFrame of String columns; absent cells are null.
pub fn table_to_dataframe(table: &Table) -> Result<DataFrame> {
    let columns: Vec<Column> = table
        .columns()
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let values: Vec<Option<String>> = table
                .rows()
                .iter()
                .map(|row| row.cells()[idx].export_text())
                .collect();
            Column::new(name.as_str().into(), values)
        })
        .collect();

    DataFrame::new(columns).context("Failed to build DataFrame from table")
}

/// Save a table to file (CSV or Parquet based on extension)
pub fn save_table(table: &Table, path: &Path) -> Result<()> {
    let mut df = table_to_dataframe(table)?;
    let extension = file_extension(path);

    match extension.as_str() {
        "csv" => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            CsvWriter::new(&mut file)
                .finish(&mut df)
                .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
        }
        "parquet" => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            ParquetWriter::new(file)
                .finish(&mut df)
                .with_context(|| format!("Failed to write Parquet file: {}", path.display()))?;
        }
        _ => anyhow::bail!(
            "Unsupported output format: {}. Supported formats: csv, parquet",
            extension
        ),
    }

    tracing::info!(path = %path.display(), rows = table.height(), "saved dataset");
    Ok(())
}
