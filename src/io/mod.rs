//! Input/output helpers.
//!
//! - CSV export of cleaned tables (`export`)
//! - forgiving CSV read-back for the merge stage (`ingest`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
