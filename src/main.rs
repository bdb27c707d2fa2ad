//! codeagg - Concatenate source files into a single text file
//!
//! Collects files with a given suffix from a root directory (flat) and a
//! list of subdirectories (recursive), then writes them one after another
//! into an output file, each preceded by its path and a separator line.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Invalid arguments or configuration, or a runtime error

mod aggregator;
mod cli;
mod collector;
mod config;
mod error;
mod models;
mod report;

use aggregator::AggregateConfig;
use anyhow::{Context, Result};
use cli::{Args, ListFormat};
use collector::{CollectConfig, FileCollector};
use config::{Config, CONFIG_FILE_NAME};
use models::FileList;
use std::io::IsTerminal;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // The config file may turn on verbose logging, so read it first.
    let loaded = load_config(&args);
    let config_verbose = matches!(&loaded, Ok(c) if c.general.verbose);
    init_logging(args.log_level(config_verbose));

    info!("codeagg v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    let config = match loaded {
        Ok(config) => config,
        Err(e) if args.config.is_none() => {
            warn!("Ignoring {}: {:#}", CONFIG_FILE_NAME, e);
            Config::default()
        }
        Err(e) => {
            error!("{:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };

    match run(&args, config) {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Aggregation failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .codeagg.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to customize the root, subdirectories, extension, and more.");
    Ok(())
}

/// Initialize logging on stderr so stdout only carries results.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Collect, then aggregate. Returns the exit code.
fn run(args: &Args, mut config: Config) -> Result<i32> {
    config.merge_with_args(args);
    debug!("Effective configuration: {:?}", config);

    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return Ok(1);
    }

    // Step 1: collect
    let collect_config = CollectConfig::from(&config.collector);
    let files = FileCollector::new(collect_config)
        .collect()
        .context("Failed to collect files")?;

    if files.is_empty() {
        warn!(
            "No files ending in {} found under {}",
            config.collector.extension,
            config.collector.root.display()
        );
    }

    if args.dry_run {
        return handle_dry_run(&files, args.format);
    }

    // Step 2: aggregate
    let aggregate_config = AggregateConfig {
        output: config.general.output.clone(),
        marker: config.aggregator.marker.clone(),
        dash_count: config.aggregator.dash_count,
        on_read_error: config.aggregator.on_read_error,
        show_progress: !args.quiet && std::io::stderr().is_terminal(),
    };

    let summary = aggregator::aggregate(&files, &aggregate_config)?;

    if summary.dropped_bytes > 0 {
        info!(
            "Dropped {} bytes that were not valid UTF-8",
            summary.dropped_bytes
        );
    }

    if let Some(section) = report::generate_skipped_summary(&summary) {
        eprint!("{}", section);
    }

    println!(
        "Aggregated code written to {}",
        aggregate_config.output.display()
    );

    Ok(0)
}

/// Handle --dry-run: print the collected files, write nothing.
fn handle_dry_run(files: &FileList, format: ListFormat) -> Result<i32> {
    let listing = match format {
        ListFormat::Text => report::generate_text_listing(files),
        ListFormat::Json => report::generate_json_listing(files)? + "\n",
    };

    print!("{}", listing);
    info!("Dry run: {} files would be aggregated", files.len());
    Ok(0)
}

/// Load configuration from an explicit path, the default location, or defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        return Config::load(config_path);
    }

    // Try default location
    Ok(Config::load_default()?.unwrap_or_default())
}
