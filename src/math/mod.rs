//! Numeric utilities: least squares and the trend statistics built on it.

pub mod ols;
pub mod stats;

pub use ols::*;
pub use stats::*;
