//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and log level selection. Every option is
//! optional: with no arguments the tool runs with the defaults from
//! `.codeagg.toml` or the built-in configuration.

use clap::Parser;
use std::path::PathBuf;

/// codeagg - concatenate source files into a single text file
///
/// Lists the root directory for matching files, then walks each configured
/// subdirectory recursively, and writes every match into one output file
/// preceded by its path and a separator line.
///
/// Examples:
///   codeagg
///   codeagg --subdirs src,lib --extension .ts --output bundle.txt
///   codeagg --root ./frontend --sorted
///   codeagg --dry-run --format json
///   codeagg --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Root directory to scan
    ///
    /// Listed without recursion; subdirectories are resolved against it.
    /// Default: "." (or [collector].root from the config file).
    #[arg(short, long, value_name = "DIR", env = "CODEAGG_ROOT")]
    pub root: Option<PathBuf>,

    /// Subdirectories to walk recursively (comma-separated)
    ///
    /// Example: --subdirs components,pages,redux
    #[arg(short, long, value_name = "NAMES", value_delimiter = ',')]
    pub subdirs: Option<Vec<String>>,

    /// Output file path
    #[arg(short, long, value_name = "FILE", env = "CODEAGG_OUTPUT")]
    pub output: Option<PathBuf>,

    /// File name suffix to include (case-sensitive)
    ///
    /// Example: --extension .jsx
    #[arg(short, long, value_name = "SUFFIX")]
    pub extension: Option<String>,

    /// Sort entries by name for reproducible output
    ///
    /// Without this flag files appear in directory-listing order, which
    /// depends on the platform and filesystem.
    #[arg(long)]
    pub sorted: bool,

    /// Skip unreadable source files instead of aborting
    ///
    /// Skipped files are listed at the end of the run.
    #[arg(long)]
    pub keep_going: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .codeagg.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// List the files that would be aggregated without writing the output
    #[arg(long)]
    pub dry_run: bool,

    /// Listing format for --dry-run (text, json)
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: ListFormat,

    /// Generate a default .codeagg.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the --dry-run listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ListFormat {
    /// One path per line (default)
    #[default]
    Text,
    /// JSON array of paths and origins
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref extension) = self.extension {
            if extension.is_empty() {
                return Err("Extension must not be empty".to_string());
            }
        }

        if let Some(ref subdirs) = self.subdirs {
            if subdirs.iter().any(|s| s.trim().is_empty()) {
                return Err("Subdirectory names must not be empty".to_string());
            }
        }

        // Validate root directory if provided
        if let Some(ref root) = self.root {
            if !root.exists() {
                return Err(format!("Root directory does not exist: {}", root.display()));
            }
            if !root.is_dir() {
                return Err(format!("Root path is not a directory: {}", root.display()));
            }
        }

        if let Some(ref config) = self.config {
            if !config.is_file() {
                return Err(format!("Config file not found: {}", config.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// `config_verbose` is the `[general].verbose` value from the config file;
    /// `--quiet` still wins over it.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
