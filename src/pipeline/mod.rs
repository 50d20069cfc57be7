//! Pipeline module - the data-processing core
//!
//! Every operation is a pure function over a [`Table`]: analyses return values,
//! transformations return a new table and leave their input untouched.

pub mod correlation;
pub mod encoding;
pub mod importance;
pub mod imputation;
pub mod inference;
pub mod loader;
pub mod scaling;
pub mod stats;
pub mod table;

pub use correlation::*;
pub use encoding::*;
pub use importance::*;
pub use imputation::*;
pub use inference::*;
pub use loader::*;
pub use scaling::*;
pub use stats::*;
pub use table::*;
