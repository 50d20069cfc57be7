//! Command dispatch: load, process, render, save

use std::path::Path;
use std::time::Instant;

use anyhow::{bail, Result};
use console::style;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;

use crate::cli::{Cli, Commands};
use crate::pipeline::{
    calculate_correlation, calculate_cramers_v, calculate_feature_importance, calculate_statistics,
    detect_outliers, drop_encoded_source, encode_categorical, fill_missing_with_sentinel,
    impute_missing_values_with_rng, is_all_missing, is_numeric_column, load_table, remove_outliers, save_table, scale_values,
    EncodeMethod, ImputeMethod, ScaleMethod, Table,
};
use crate::report::{
    display_association, display_correlation, display_importance, display_overview,
    display_preview, display_statistics, export_analysis, DatasetOverview,
};
use crate::utils::{
    create_spinner, finish_with_success, print_banner, print_count, print_files, print_info,
    print_step_header, print_success, print_warning,
};

/// Run the parsed command line.
pub fn run(cli: &Cli) -> Result<()> {
    print_banner(env!("CARGO_PKG_VERSION"));
    let start = Instant::now();

    match &cli.command {
        Commands::Profile {
            io,
            correlation_threshold,
            preview,
            export,
        } => {
            print_files(&io.input, None);
            let table = load(&io.input)?;
            let overview = DatasetOverview::from_table(&table, *correlation_threshold);
            display_overview(&overview);
            display_preview(&table, *preview);
            if let Some(path) = export {
                export_analysis(&io.input.display().to_string(), "overview", &overview, path)?;
                print_success(&format!("Overview exported to {}", path.display()));
            }
        }

        Commands::Stats { io, column, export } => {
            print_files(&io.input, None);
            let table = load(&io.input)?;
            require_columns(&table, &[column])?;
            let stats = calculate_statistics(&table, column);
            let outliers = detect_outliers(&table, column).height();
            display_statistics(column, &stats, outliers);
            if let Some(path) = export {
                export_analysis(&io.input.display().to_string(), "statistics", &stats, path)?;
                print_success(&format!("Statistics exported to {}", path.display()));
            }
        }

        Commands::Outliers { io, column, remove } => {
            let output = remove.then(|| io.output_path());
            print_files(&io.input, output.as_deref());
            let table = load(&io.input)?;
            require_columns(&table, &[column])?;

            print_step_header(2, "Outlier Detection");
            let outliers = detect_outliers(&table, column);
            if outliers.is_empty() {
                print_info("No outliers found (|z| > 3)");
            } else {
                print_count("outlier row(s)", outliers.height());
                display_preview(&outliers, outliers.height());
            }

            if let Some(output) = output {
                let cleaned = remove_outliers(&table, column);
                print_success(&format!(
                    "Removed {} row(s)",
                    table.height() - cleaned.height()
                ));
                save(&cleaned, &output)?;
            }
        }

        Commands::Correlate {
            io,
            col_x,
            col_y,
            export,
        } => {
            print_files(&io.input, None);
            let table = load(&io.input)?;
            require_columns(&table, &[col_x, col_y])?;
            let correlation = calculate_correlation(&table, col_x, col_y);
            display_correlation(col_x, col_y, correlation);
            if let Some(path) = export {
                let result = json!({ "col_x": col_x, "col_y": col_y, "correlation": correlation });
                export_analysis(&io.input.display().to_string(), "correlation", &result, path)?;
                print_success(&format!("Correlation exported to {}", path.display()));
            }
        }

        Commands::Association {
            io,
            col_x,
            col_y,
            export,
        } => {
            print_files(&io.input, None);
            let table = load(&io.input)?;
            require_columns(&table, &[col_x, col_y])?;
            let cramers_v = calculate_cramers_v(&table, col_x, col_y);
            display_association(col_x, col_y, cramers_v);
            if let Some(path) = export {
                let result = json!({ "col_x": col_x, "col_y": col_y, "cramers_v": cramers_v });
                export_analysis(&io.input.display().to_string(), "association", &result, path)?;
                print_success(&format!("Association exported to {}", path.display()));
            }
        }

        Commands::Importance {
            io,
            target,
            features,
            export,
        } => {
            print_files(&io.input, None);
            let table = load(&io.input)?;
            require_columns(&table, &[target])?;

            let features: Vec<String> = if features.is_empty() {
                table
                    .columns()
                    .iter()
                    .filter(|c| *c != target)
                    .cloned()
                    .collect()
            } else {
                require_columns(&table, features.as_slice())?;
                features.clone()
            };

            let spinner = create_spinner("Scoring features...");
            let ranked = calculate_feature_importance(&table, target, &features);
            finish_with_success(&spinner, &format!("Scored {} feature(s)", ranked.len()));

            display_importance(target, &ranked);
            if let Some(path) = export {
                export_analysis(&io.input.display().to_string(), "importance", &ranked, path)?;
                print_success(&format!("Importance exported to {}", path.display()));
            }
        }

        Commands::Impute {
            io,
            column,
            method,
            seed,
        } => {
            let Some(method) = ImputeMethod::from_name(method) else {
                bail!(
                    "Unknown imputation method '{}'. Options: mean, median, mode, gaussian",
                    method
                );
            };
            let output = io.output_path();
            print_files(&io.input, Some(&output));
            let table = load(&io.input)?;
            require_columns(&table, &[column])?;

            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(*seed),
                None => StdRng::from_entropy(),
            };

            print_step_header(2, "Imputation");
            if is_all_missing(&table, column) {
                print_warning(&format!("'{}' has no values to impute from", column));
            }
            let method = applied_impute_method(&table, column, method);
            let imputed = impute_missing_values_with_rng(&table, column, method, &mut rng);
            let filled = imputed.rows().iter().filter(|r| r.is_imputed(column)).count();
            if filled == 0 {
                print_info(&format!("No missing values in '{}'", column));
            } else {
                print_success(&format!(
                    "Imputed {} cell(s) in '{}' ({})",
                    filled,
                    column,
                    method.name()
                ));
            }
            save(&imputed, &output)?;
        }

        Commands::Scale { io, column, method } => {
            let Some(method) = ScaleMethod::from_name(method) else {
                bail!("Unknown scaling method '{}'. Options: minmax, standard, robust", method);
            };
            let output = io.output_path();
            print_files(&io.input, Some(&output));
            let table = load(&io.input)?;
            require_columns(&table, &[column])?;

            print_step_header(2, "Scaling");
            if table.numeric_values(column).is_empty() {
                print_warning(&format!("'{}' has no numeric values, nothing to scale", column));
            } else {
                print_success(&format!("Scaled '{}' ({})", column, method.name()));
            }
            save(&scale_values(&table, column, method), &output)?;
        }

        Commands::Encode {
            io,
            column,
            method,
            drop_source,
        } => {
            let Some(method) = EncodeMethod::from_name(method) else {
                bail!("Unknown encoding method '{}'. Options: label, onehot", method);
            };
            let output = io.output_path();
            print_files(&io.input, Some(&output));
            let table = load(&io.input)?;
            require_columns(&table, &[column])?;

            print_step_header(2, "Encoding");
            let mut encoded = encode_categorical(&table, column, method);
            print_success(&format!(
                "Added {} column(s) for '{}' ({})",
                encoded.width() - table.width(),
                column,
                method.name()
            ));
            if *drop_source {
                encoded = drop_encoded_source(&encoded, column);
                print_info(&format!("Dropped source column '{}'", column));
            }
            save(&encoded, &output)?;
        }

        Commands::Drop { io, columns } => {
            let output = io.output_path();
            print_files(&io.input, Some(&output));
            let table = load(&io.input)?;
            require_columns(&table, columns.as_slice())?;

            print_step_header(2, "Drop Columns");
            let reduced = table.drop_columns(columns);
            print_success(&format!("Dropped {} column(s)", columns.len()));
            save(&reduced, &output)?;
        }

        Commands::FillMissing { io } => {
            let output = io.output_path();
            print_files(&io.input, Some(&output));
            let table = load(&io.input)?;

            print_step_header(2, "Fill Missing Values");
            let blanks: usize = table.columns().iter().map(|c| table.missing_count(c)).sum();
            let filled = fill_missing_with_sentinel(&table);
            print_success(&format!("{} blank cell(s) now read \"N/A\"", blanks));
            save(&filled, &output)?;
        }
    }

    println!();
    println!(
        "    {} {}",
        style("Done in").dim(),
        style(format!("{:.2}s", start.elapsed().as_secs_f64())).dim()
    );
    Ok(())
}

fn load(path: &Path) -> Result<Table> {
    print_step_header(1, "Load Dataset");
    let spinner = create_spinner("Loading dataset...");
    let table = load_table(path)?;
    finish_with_success(
        &spinner,
        &format!("Loaded {} rows × {} columns", table.height(), table.width()),
    );
    Ok(table)
}

fn save(table: &Table, path: &Path) -> Result<()> {
    let spinner = create_spinner("Writing output file...");
    save_table(table, path)?;
    finish_with_success(&spinner, &format!("Saved to {}", path.display()));
    Ok(())
}

/// The method imputation actually runs: columns without numbers use mode.
fn applied_impute_method(table: &Table, column: &str, requested: ImputeMethod) -> ImputeMethod {
    if is_numeric_column(table, column) {
        requested
    } else {
        ImputeMethod::Mode
    }
}

fn require_columns<S: AsRef<str>>(table: &Table, columns: &[S]) -> Result<()> {
    for column in columns {
        let column = column.as_ref();
        if !table.has_column(column) {
            bail!(
                "Column '{}' not found in dataset. Available columns: {:?}",
                column,
                table.columns()
            );
        }
    }
    Ok(())
}
