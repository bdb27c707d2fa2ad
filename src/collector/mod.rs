//! File collector for discovering the files to aggregate.
//!
//! The root directory is listed without recursion, then every configured
//! subdirectory is walked depth-first. A file is kept when it is a regular
//! file (symlinks followed) and its name ends with the configured suffix.

use crate::error::CollectError;
use crate::models::{CollectedFile, FileList, Origin};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Configuration for file collection.
#[derive(Debug, Clone)]
pub struct CollectConfig {
    /// Directory listed non-recursively; subdirectories are resolved against it.
    pub root: PathBuf,
    /// Subdirectory names walked recursively, in this order.
    pub subdirectories: Vec<String>,
    /// Case-sensitive file name suffix (e.g. ".js").
    pub extension: String,
    /// Sort sibling entries by name instead of keeping listing order.
    pub sorted: bool,
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self::from(&crate::config::CollectorConfig::default())
    }
}

impl From<&crate::config::CollectorConfig> for CollectConfig {
    fn from(config: &crate::config::CollectorConfig) -> Self {
        Self {
            root: config.root.clone(),
            subdirectories: config.subdirectories.clone(),
            extension: config.extension.clone(),
            sorted: config.sorted,
        }
    }
}

/// Collects the ordered list of files to aggregate.
pub struct FileCollector {
    config: CollectConfig,
}

impl FileCollector {
    /// Create a new file collector.
    pub fn new(config: CollectConfig) -> Self {
        Self { config }
    }

    /// Collect root matches first, then each subdirectory's matches in order.
    pub fn collect(&self) -> Result<FileList, CollectError> {
        let mut files = Vec::new();

        self.collect_root(&mut files)?;
        let root_count = files.len();
        debug!(
            "{} matching files directly under {}",
            root_count,
            self.config.root.display()
        );

        for name in &self.config.subdirectories {
            let before = files.len();
            self.walk_subdirectory(name, &mut files);
            debug!("{} matching files under {}", files.len() - before, name);
        }

        info!("Collected {} files", files.len());
        Ok(files)
    }

    /// Check if a path passes the inclusion predicate.
    pub fn matches(&self, path: &Path) -> bool {
        path.is_file() && self.has_extension(path)
    }

    /// Suffix match on the file name, byte for byte.
    fn has_extension(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| {
                name.as_encoded_bytes()
                    .ends_with(self.config.extension.as_bytes())
            })
            .unwrap_or(false)
    }

    /// List the root directory without descending into it.
    fn collect_root(&self, files: &mut FileList) -> Result<(), CollectError> {
        let root = &self.config.root;
        let unreadable = |source: std::io::Error| CollectError::RootUnreadable {
            path: root.clone(),
            source,
        };

        let mut entries = Vec::new();
        for entry in fs::read_dir(root).map_err(unreadable)? {
            entries.push(entry.map_err(unreadable)?);
        }

        if self.config.sorted {
            entries.sort_by_key(|e| e.file_name());
        }

        for entry in entries {
            let path = entry.path();
            if self.matches(&path) {
                files.push(CollectedFile::new(path, Origin::Root));
            }
        }

        Ok(())
    }

    /// Walk one configured subdirectory recursively.
    fn walk_subdirectory(&self, name: &str, files: &mut FileList) {
        let dir = self.config.root.join(name);

        if !dir.is_dir() {
            debug!("Subdirectory {} not found, skipping", dir.display());
            return;
        }

        let sorted = self.config.sorted;
        let walker = WalkDir::new(&dir)
            .follow_links(false)
            .sort_by(move |a, b| sibling_order(a, b, sorted));

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", dir.display(), e);
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }

            if self.matches(entry.path()) {
                files.push(CollectedFile::new(
                    entry.into_path(),
                    Origin::Subdirectory(name.to_string()),
                ));
            }
        }
    }
}

/// A directory's own files come before its child directories.
///
/// The sort is stable, so without `by_name` siblings keep listing order.
fn sibling_order(a: &DirEntry, b: &DirEntry, by_name: bool) -> Ordering {
    let order = a.file_type().is_dir().cmp(&b.file_type().is_dir());
    if by_name {
        order.then_with(|| a.file_name().cmp(b.file_name()))
    } else {
        order
    }
}
