//! Aggregation of collected files into a single output file.

pub mod decode;
pub mod writer;

pub use writer::{aggregate, AggregateConfig};
