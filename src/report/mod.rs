//! Report module - rendering and exporting analysis results

pub mod export;
pub mod overview;
pub mod summary;

pub use export::*;
pub use overview::*;
pub use summary::*;
