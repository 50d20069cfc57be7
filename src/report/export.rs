//! JSON export of analysis results

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

/// Metadata about the analysis run
#[derive(Debug, Serialize)]
pub struct ExportMetadata {
    /// Timestamp of the analysis (ISO 8601 format)
    pub timestamp: String,
    /// Tabex version
    pub tabex_version: String,
    /// Input file path
    pub input_file: String,
    /// Analysis that produced the result
    pub analysis: String,
}

/// An analysis result with its metadata
#[derive(Debug, Serialize)]
pub struct AnalysisExport<'a, T: Serialize> {
    pub metadata: ExportMetadata,
    pub result: &'a T,
}

impl<'a, T: Serialize> AnalysisExport<'a, T> {
    pub fn new(input_file: &str, analysis: &str, result: &'a T) -> Self {
        Self {
            metadata: ExportMetadata {
                timestamp: Utc::now().to_rfc3339(),
                tabex_version: env!("CARGO_PKG_VERSION").to_string(),
                input_file: input_file.to_string(),
                analysis: analysis.to_string(),
            },
            result,
        }
    }
}

/// Write an analysis result as pretty-printed JSON.
///
/// Non-finite numbers (unavailable statistics) are written as `null`.
pub fn export_analysis<T: Serialize>(
    input_file: &str,
    analysis: &str,
    result: &T,
    output_path: &Path,
) -> Result<()> {
    let export = AnalysisExport::new(input_file, analysis, result);

    let json = serde_json::to_string_pretty(&export)
        .with_context(|| format!("Failed to serialize {} results to JSON", analysis))?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write {} results to {}", analysis, output_path.display()))?;

    tracing::info!(path = %output_path.display(), analysis, "exported analysis");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::ColumnStatistics;

    #[test]
    fn test_export_writes_metadata_and_nulls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        let stats = ColumnStatistics {
            mean: f64::NAN,
            median: 1.0,
            min: 1.0,
            max: 1.0,
            std_dev: 0.0,
        };

        export_analysis("data.csv", "statistics", &stats, &path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["metadata"]["input_file"], "data.csv");
        assert_eq!(json["metadata"]["analysis"], "statistics");
        assert!(json["result"]["mean"].is_null());
        assert_eq!(json["result"]["median"], 1.0);
    }
}
