//! PNG rendering of the tariff/GDP scatter chart.

pub mod chart;
pub mod font;
pub mod sketch;

pub use chart::*;
pub use sketch::Sketch;
