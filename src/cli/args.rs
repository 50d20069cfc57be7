//! Command-line argument definitions using clap

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::report::PREVIEW_ROWS;

/// Tabex - explore, clean and transform tabular datasets
#[derive(Parser, Debug)]
#[command(name = "tabex")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Input file shared by every command
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Input file path (CSV or Parquet)
    #[arg(short, long)]
    pub input: PathBuf,
}

/// Input and output files for commands that produce a new dataset
#[derive(Args, Debug, Clone)]
pub struct TransformArgs {
    /// Input file path (CSV or Parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file path (CSV or Parquet, determined by extension).
    /// Defaults to the input directory with a '_processed' suffix (e.g., data.csv -> data_processed.csv).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl TransformArgs {
    /// Get the output path, deriving it from the input if not explicitly provided.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| derive_output_path(&self.input))
    }
}

/// `<stem>_processed.<ext>` next to the input file
pub fn derive_output_path(input: &Path) -> PathBuf {
    let parent = input.parent().unwrap_or_else(|| Path::new("."));
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("csv");
    parent.join(format!("{}_processed.{}", stem, extension))
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show dataset shape, column types, missing counts and numeric statistics
    Profile {
        #[command(flatten)]
        io: InputArgs,

        /// Report numeric column pairs whose absolute correlation exceeds this value
        #[arg(long, default_value = "0.9", value_parser = validate_unit_interval)]
        correlation_threshold: f64,

        /// Number of rows to preview
        #[arg(long, default_value_t = PREVIEW_ROWS)]
        preview: usize,

        /// Write the overview to a JSON file
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Descriptive statistics for one column
    Stats {
        #[command(flatten)]
        io: InputArgs,

        /// Column to summarize
        #[arg(short, long)]
        column: String,

        /// Write the statistics to a JSON file
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// List rows more than three standard deviations from a column's mean
    Outliers {
        #[command(flatten)]
        io: TransformArgs,

        /// Column to check
        #[arg(short, long)]
        column: String,

        /// Write the dataset without the outlier rows instead of listing them
        #[arg(long)]
        remove: bool,
    },

    /// Pearson correlation between two numeric columns
    Correlate {
        #[command(flatten)]
        io: InputArgs,

        /// First column
        #[arg(short = 'x', long)]
        col_x: String,

        /// Second column
        #[arg(short = 'y', long)]
        col_y: String,

        /// Write the result to a JSON file
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Cramér's V association between two categorical columns
    Association {
        #[command(flatten)]
        io: InputArgs,

        /// First column
        #[arg(short = 'x', long)]
        col_x: String,

        /// Second column
        #[arg(short = 'y', long)]
        col_y: String,

        /// Write the result to a JSON file
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Rank features by their association with a target column
    Importance {
        #[command(flatten)]
        io: InputArgs,

        /// Target column
        #[arg(short, long)]
        target: String,

        /// Features to rank (comma-separated). Defaults to every other column.
        #[arg(long, value_delimiter = ',')]
        features: Vec<String>,

        /// Write the ranking to a JSON file
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Fill missing values in a column
    Impute {
        #[command(flatten)]
        io: TransformArgs,

        /// Column to impute
        #[arg(short, long)]
        column: String,

        /// Imputation method: "mean", "median", "mode" or "gaussian".
        /// Non-numeric columns always use mode.
        #[arg(short, long, default_value = "mean")]
        method: String,

        /// Seed for reproducible gaussian draws
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Rescale a numeric column
    Scale {
        #[command(flatten)]
        io: TransformArgs,

        /// Column to scale
        #[arg(short, long)]
        column: String,

        /// Scaling method: "minmax", "standard" or "robust"
        #[arg(short, long, default_value = "minmax")]
        method: String,
    },

    /// Encode a categorical column as numbers
    Encode {
        #[command(flatten)]
        io: TransformArgs,

        /// Column to encode
        #[arg(short, long)]
        column: String,

        /// Encoding method: "label" or "onehot"
        #[arg(short, long, default_value = "label")]
        method: String,

        /// Drop the source column after encoding
        #[arg(long)]
        drop_source: bool,
    },

    /// Drop columns from the dataset
    Drop {
        #[command(flatten)]
        io: TransformArgs,

        /// Columns to drop (comma-separated)
        #[arg(long, value_delimiter = ',', required = true)]
        columns: Vec<String>,
    },

    /// Replace every missing or empty cell with "N/A"
    FillMissing {
        #[command(flatten)]
        io: TransformArgs,
    },
}

/// Validator for threshold parameters in [0, 1]
fn validate_unit_interval(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if !(0.0..=1.0).contains(&value) {
        Err(format!("threshold must be between 0.0 and 1.0, got {}", value))
    } else {
        Ok(value)
    }
}
