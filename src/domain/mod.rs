//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - `RawTable`, the untyped grid every fetched page is parsed into
//! - the persisted row schemas (`TariffRecord`, `GdpRecord`)
//! - the merge-stage join result (`MergedRecord`)

pub mod types;

pub use types::*;
