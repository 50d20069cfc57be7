//! Tabex: Tabular Data Exploration Library
//!
//! Type inference, descriptive statistics, outlier detection, association
//! measures, feature importance and column transformations (imputation,
//! scaling, categorical encoding) over an in-memory table.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
