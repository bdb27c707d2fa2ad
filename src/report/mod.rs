//! Human- and machine-readable output besides the aggregated file.

pub mod generator;

pub use generator::*;
