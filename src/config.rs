//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.codeagg.toml` files.

use crate::models::ReadErrorPolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".codeagg.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Collector settings.
    #[serde(default)]
    pub collector: CollectorConfig,

    /// Aggregator settings.
    #[serde(default)]
    pub aggregator: AggregatorConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Output file path.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            verbose: false,
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from("aggregated_code.txt")
}

/// File collection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Directory listed non-recursively.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Subdirectories of root walked recursively, in order.
    #[serde(default = "default_subdirectories")]
    pub subdirectories: Vec<String>,

    /// File name suffix to include (case-sensitive).
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Sort entries by name for reproducible output.
    #[serde(default)]
    pub sorted: bool,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            subdirectories: default_subdirectories(),
            extension: default_extension(),
            sorted: false,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_subdirectories() -> Vec<String> {
    vec!["components", "pages", "redux"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_extension() -> String {
    ".js".to_string()
}

/// Output formatting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// Comment marker that starts the separator line.
    #[serde(default = "default_marker")]
    pub marker: String,

    /// Number of dashes after the marker.
    #[serde(default = "default_dash_count")]
    pub dash_count: usize,

    /// What to do with source files that cannot be read.
    #[serde(default)]
    pub on_read_error: ReadErrorPolicy,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            marker: default_marker(),
            dash_count: default_dash_count(),
            on_read_error: ReadErrorPolicy::Fail,
        }
    }
}

fn default_marker() -> String {
    "//".to_string()
}

fn default_dash_count() -> usize {
    40
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.codeagg.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref root) = args.root {
            self.collector.root = root.clone();
        }
        if let Some(ref subdirs) = args.subdirs {
            self.collector.subdirectories = subdirs.clone();
        }
        if let Some(ref extension) = args.extension {
            self.collector.extension = extension.clone();
        }
        if let Some(ref output) = args.output {
            self.general.output = output.clone();
        }

        // Flags always override
        if args.sorted {
            self.collector.sorted = true;
        }
        if args.keep_going {
            self.aggregator.on_read_error = ReadErrorPolicy::Skip;
        }
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Check values that a config file could have set to something unusable.
    pub fn validate(&self) -> Result<(), String> {
        if self.collector.extension.is_empty() {
            return Err("Extension must not be empty".to_string());
        }

        if self.collector.subdirectories.iter().any(|s| s.is_empty()) {
            return Err("Subdirectory names must not be empty".to_string());
        }

        if !self.collector.root.is_dir() {
            return Err(format!(
                "Root directory does not exist: {}",
                self.collector.root.display()
            ));
        }

        if self.general.output.as_os_str().is_empty() {
            return Err("Output path must not be empty".to_string());
        }

        Ok(())
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
