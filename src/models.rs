//! Data models for the aggregator.
//!
//! This module contains the core data structures shared by the collector,
//! the aggregator and the report output.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where a collected file was discovered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Direct child of the root directory (non-recursive listing).
    Root,
    /// Found while descending into the named subdirectory.
    Subdirectory(String),
}

/// A file selected for aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedFile {
    /// Path as built from the configured root (e.g. `./components/c.js`).
    pub path: PathBuf,
    /// Which part of the traversal produced this file.
    pub origin: Origin,
}

impl CollectedFile {
    pub fn new(path: PathBuf, origin: Origin) -> Self {
        Self { path, origin }
    }

    /// The path exactly as it is written into the output header line.
    pub fn display_path(&self) -> String {
        self.path.to_string_lossy().to_string()
    }
}

/// Ordered list of collected files, in discovery order.
pub type FileList = Vec<CollectedFile>;

/// What to do when a listed source file cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadErrorPolicy {
    /// Abort the whole run on the first unreadable file.
    #[default]
    Fail,
    /// Leave the file out of the output and report it at the end.
    Skip,
}

/// A source file that was left out of the output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedFile {
    pub path: String,
    pub reason: String,
}

/// Outcome of one aggregation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregateSummary {
    /// Number of files whose content was written.
    pub files_written: usize,
    /// Total bytes written to the output file.
    pub bytes_written: u64,
    /// Bytes discarded because they were not valid UTF-8.
    pub dropped_bytes: usize,
    /// Files omitted under [`ReadErrorPolicy::Skip`].
    pub skipped: Vec<SkippedFile>,
}

impl AggregateSummary {
    /// Returns true if any file was left out.
    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }
}
