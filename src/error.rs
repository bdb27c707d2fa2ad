//! Error types for collection and aggregation.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while collecting files.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("Cannot list root directory {path}: {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors raised while writing the output file.
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("Cannot create output file {path}: {source}")]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot read source file {path}: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed writing to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
