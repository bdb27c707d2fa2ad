//! Listing and summary generation.
//!
//! Produces the `--dry-run` file listing and the end-of-run summary of
//! files that were skipped.

use crate::models::{AggregateSummary, CollectedFile, Origin};
use anyhow::Result;
use serde::Serialize;

/// One entry of the JSON listing.
#[derive(Debug, Serialize)]
struct ListingEntry<'a> {
    path: String,
    origin: &'a Origin,
}

/// Generate a plain listing, one path per line.
pub fn generate_text_listing(files: &[CollectedFile]) -> String {
    let mut output = String::new();

    for file in files {
        output.push_str(&file.display_path());
        output.push('\n');
    }

    output
}

/// Generate a JSON listing of paths and where they were found.
pub fn generate_json_listing(files: &[CollectedFile]) -> Result<String> {
    let entries: Vec<ListingEntry> = files
        .iter()
        .map(|f| ListingEntry {
            path: f.display_path(),
            origin: &f.origin,
        })
        .collect();

    Ok(serde_json::to_string_pretty(&entries)?)
}

/// Generate the summary of skipped files, or `None` if nothing was skipped.
pub fn generate_skipped_summary(summary: &AggregateSummary) -> Option<String> {
    if !summary.has_skipped() {
        return None;
    }

    let mut section = format!(
        "⚠️  Skipped {} unreadable file{}:\n",
        summary.skipped.len(),
        if summary.skipped.len() == 1 { "" } else { "s" }
    );
    for skipped in &summary.skipped {
        section.push_str(&format!("   - {}: {}\n", skipped.path, skipped.reason));
    }

    Some(section)
}
