//! Tests for CLI argument parsing and end-to-end command runs

use assert_cmd::Command;
use clap::Parser;
use predicates::prelude::*;
use std::path::PathBuf;
use tabex::cli::{Cli, Commands};
use tabex::pipeline::load_table;

mod common;

use common::{column_text, create_temp_csv};

const SAMPLE_CSV: &str = "age,city,score\n25,Paris,1.5\n,Lyon,2.5\n47,Paris,\n51,Nice,4.0\n";

fn tabex() -> Command {
    let mut cmd = Command::cargo_bin("tabex").expect("Failed to find tabex binary");
    cmd.arg("--no-color");
    cmd
}

#[test]
fn test_impute_defaults() {
    let cli = Cli::parse_from(["tabex", "impute", "-i", "/path/to/data.csv", "-c", "age"]);

    assert_eq!(cli.verbose, 0);
    assert!(!cli.no_color);
    match cli.command {
        Commands::Impute { io, column, method, seed } => {
            assert_eq!(column, "age");
            assert_eq!(method, "mean", "Default imputation method should be mean");
            assert_eq!(seed, None);
            assert_eq!(io.output_path(), PathBuf::from("/path/to/data_processed.csv"));
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_output_path_derivation_parquet() {
    let cli = Cli::parse_from(["tabex", "fill-missing", "-i", "/path/to/data.parquet"]);
    match cli.command {
        Commands::FillMissing { io } => {
            assert_eq!(io.output_path(), PathBuf::from("/path/to/data_processed.parquet"));
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_explicit_output_path() {
    let cli = Cli::parse_from([
        "tabex", "scale", "-i", "data.csv", "-c", "x", "-o", "custom.parquet",
    ]);
    match cli.command {
        Commands::Scale { io, method, .. } => {
            assert_eq!(method, "minmax");
            assert_eq!(io.output_path(), PathBuf::from("custom.parquet"));
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_verbosity_counts_and_is_global() {
    let cli = Cli::parse_from(["tabex", "profile", "-i", "d.csv", "-vv"]);
    assert_eq!(cli.verbose, 2);
}

#[test]
fn test_comma_separated_lists() {
    let cli = Cli::parse_from([
        "tabex", "importance", "-i", "d.csv", "-t", "y", "--features", "a,b,c",
    ]);
    match cli.command {
        Commands::Importance { features, .. } => assert_eq!(features, vec!["a", "b", "c"]),
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_invalid_correlation_threshold_rejected() {
    let result = Cli::try_parse_from([
        "tabex", "profile", "-i", "d.csv", "--correlation-threshold", "1.5",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_drop_requires_columns() {
    assert!(Cli::try_parse_from(["tabex", "drop", "-i", "d.csv"]).is_err());
}

#[test]
fn test_profile_command_runs() {
    let (_dir, csv_path) = create_temp_csv(SAMPLE_CSV);

    tabex()
        .args(["profile", "-i"])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("DATASET OVERVIEW"))
        .stdout(predicate::str::contains("Non-Numeric"));
}

#[test]
fn test_stats_export_writes_json() {
    let (dir, csv_path) = create_temp_csv(SAMPLE_CSV);
    let json_path = dir.path().join("stats.json");

    tabex()
        .args(["stats", "-c", "age", "-i"])
        .arg(&csv_path)
        .arg("--export")
        .arg(&json_path)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json["metadata"]["analysis"], "statistics");
    assert_eq!(json["result"]["min"], 25.0);
    assert_eq!(json["result"]["max"], 51.0);
}

#[test]
fn test_impute_command_writes_default_output() {
    let (dir, csv_path) = create_temp_csv(SAMPLE_CSV);

    tabex()
        .args(["impute", "-c", "age", "-m", "median", "-i"])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imputed 1 cell(s)"));

    let output = dir.path().join("test_data_processed.csv");
    let table = load_table(&output).unwrap();
    // sorted 25, 47, 51 -> index 1
    assert_eq!(column_text(&table, "age"), vec!["25", "47.00", "47", "51"]);
}

#[test]
fn test_impute_reports_mode_fallback_for_text_column() {
    let (dir, csv_path) = create_temp_csv("city,age\nParis,1\n,2\nParis,3\nLyon,4\n");

    tabex()
        .args(["impute", "-c", "city", "-m", "mean", "-i"])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imputed 1 cell(s) in 'city' (mode)"));

    let table = load_table(&dir.path().join("test_data_processed.csv")).unwrap();
    assert_eq!(column_text(&table, "city"), vec!["Paris", "Paris", "Paris", "Lyon"]);
}

#[test]
fn test_encode_onehot_drop_source() {
    let (dir, csv_path) = create_temp_csv(SAMPLE_CSV);
    let output = dir.path().join("encoded.csv");

    tabex()
        .args(["encode", "-c", "city", "-m", "onehot", "--drop-source", "-i"])
        .arg(&csv_path)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let table = load_table(&output).unwrap();
    assert_eq!(
        table.columns(),
        &["age", "score", "city_Paris", "city_Lyon", "city_Nice"]
    );
}

#[test]
fn test_unknown_method_fails() {
    let (_dir, csv_path) = create_temp_csv(SAMPLE_CSV);

    tabex()
        .args(["impute", "-c", "age", "-m", "zscore", "-i"])
        .arg(&csv_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown imputation method"));
}

#[test]
fn test_unknown_column_fails() {
    let (_dir, csv_path) = create_temp_csv(SAMPLE_CSV);

    tabex()
        .args(["correlate", "-x", "age", "-y", "height", "-i"])
        .arg(&csv_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Column 'height' not found"));
}

#[test]
fn test_outliers_remove_writes_file() {
    let mut csv = String::from("v\n");
    for _ in 0..20 {
        csv.push_str("10\n");
    }
    csv.push_str("100\n");
    let (dir, csv_path) = create_temp_csv(&csv);

    tabex()
        .args(["outliers", "-c", "v", "--remove", "-i"])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 1 row(s)"));

    let table = load_table(&dir.path().join("test_data_processed.csv")).unwrap();
    assert_eq!(table.height(), 20);
}
