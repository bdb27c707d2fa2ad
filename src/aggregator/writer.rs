//! Output file writing.
//!
//! Each collected file becomes one entry:
//!
//! ```text
//! <path>
//! //----------------------------------------
//! <content>
//!
//! ```

use super::decode::decode_ignoring_invalid;
use crate::error::AggregateError;
use crate::models::{AggregateSummary, CollectedFile, ReadErrorPolicy, SkippedFile};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Settings for writing the output file.
#[derive(Debug, Clone)]
pub struct AggregateConfig {
    /// Output file, truncated if it exists.
    pub output: PathBuf,
    /// Characters placed before the dashes of the separator line.
    pub marker: String,
    /// Number of dashes in the separator line.
    pub dash_count: usize,
    /// Behaviour when a source file cannot be read.
    pub on_read_error: ReadErrorPolicy,
    /// Draw a progress bar on stderr.
    pub show_progress: bool,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("aggregated_code.txt"),
            marker: "//".to_string(),
            dash_count: 40,
            on_read_error: ReadErrorPolicy::Fail,
            show_progress: false,
        }
    }
}

impl AggregateConfig {
    /// The separator line, including its trailing newline.
    pub fn separator(&self) -> String {
        format!("{}{}\n", self.marker, "-".repeat(self.dash_count))
    }
}

/// Write every file in `files` into the configured output, in order.
pub fn aggregate(
    files: &[CollectedFile],
    config: &AggregateConfig,
) -> Result<AggregateSummary, AggregateError> {
    let write_failed = |source: io::Error| AggregateError::Write {
        path: config.output.clone(),
        source,
    };

    let file = File::create(&config.output).map_err(|source| {
        AggregateError::OutputUnwritable {
            path: config.output.clone(),
            source,
        }
    })?;
    let mut out = BufWriter::new(file);

    let separator = config.separator();
    let progress = progress_bar(files.len(), config.show_progress);
    let mut summary = AggregateSummary::default();

    for file in files {
        let shown = file.display_path();
        if let Some(ref pb) = progress {
            pb.set_message(shown.clone());
        }

        let bytes = match fs::read(&file.path) {
            Ok(b) => b,
            Err(e) => match config.on_read_error {
                ReadErrorPolicy::Fail => {
                    return Err(AggregateError::SourceUnreadable {
                        path: file.path.clone(),
                        source: e,
                    });
                }
                ReadErrorPolicy::Skip => {
                    warn!("Skipping {}: {}", shown, e);
                    summary.skipped.push(SkippedFile {
                        path: shown,
                        reason: e.to_string(),
                    });
                    if let Some(ref pb) = progress {
                        pb.inc(1);
                    }
                    continue;
                }
            },
        };

        let decoded = decode_ignoring_invalid(&bytes);
        if decoded.dropped_bytes > 0 {
            debug!(
                "Dropped {} undecodable bytes from {}",
                decoded.dropped_bytes, shown
            );
        }

        summary.bytes_written +=
            write_entry(&mut out, &shown, &separator, &decoded.text).map_err(write_failed)?;
        summary.files_written += 1;
        summary.dropped_bytes += decoded.dropped_bytes;

        if let Some(ref pb) = progress {
            pb.inc(1);
        }
    }

    out.flush().map_err(write_failed)?;

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    info!(
        "Wrote {} files ({} bytes) to {}",
        summary.files_written,
        summary.bytes_written,
        config.output.display()
    );

    Ok(summary)
}

/// Write a single entry and return the number of bytes written.
pub fn write_entry<W: Write>(
    out: &mut W,
    path: &str,
    separator: &str,
    content: &str,
) -> io::Result<u64> {
    out.write_all(path.as_bytes())?;
    out.write_all(b"\n")?;
    out.write_all(separator.as_bytes())?;
    out.write_all(content.as_bytes())?;
    out.write_all(b"\n\n")?;

    Ok((path.len() + 1 + separator.len() + content.len() + 2) as u64)
}

fn progress_bar(len: usize, enabled: bool) -> Option<ProgressBar> {
    if !enabled || len < 2 {
        return None;
    }

    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    Some(pb)
}
