//! CLI module - argument parsing and command dispatch

mod args;
mod run;

pub use args::{derive_output_path, Cli, Commands, InputArgs, TransformArgs};
pub use run::run;
