//! Tabex: Tabular Data Exploration CLI Tool
//!
//! Profiles a CSV or Parquet dataset and applies cleaning and
//! transformation steps, writing the result to a new file.

use anyhow::Result;
use clap::Parser;

use tabex::cli::{run, Cli};
use tabex::utils::{init_logging, LogConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }
    init_logging(&LogConfig::from_verbosity(cli.verbose).with_ansi(!cli.no_color));

    run(&cli)
}
