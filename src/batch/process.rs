// src/batch/process.rs
// =============================================================================
// This module runs the whole harvest over a seed file.
//
// How it works:
// 1. Read every line of the seed file (a missing file stops the run)
// 2. Open the ledger, remembering the links it already holds
// 3. For each non-blank seed, in file order:
//    - fetch the page and extract its absolute links
//    - append the links the ledger has never seen, in sorted order
//    - or count the seed as skipped if it produced nothing
// 4. Write every link found in this run, sorted, to the unique output
// 5. Return a Summary with the counts
//
// Seeds are processed one at a time. Only one request is ever in flight.
// =============================================================================

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::ledger::Ledger;
use crate::extract::{build_client, extract_links};

// Everything a harvest run needs to know
#[derive(Debug, Clone)]
pub struct HarvestOptions {
    /// Seed file, one URL per line
    pub input: PathBuf,
    /// Append-only ledger of every link ever written
    pub output: PathBuf,
    /// Sorted unique links of this run, overwritten each time
    pub unique_output: PathBuf,
    /// Per-request time limit
    pub timeout: Duration,
    /// Whether to draw the progress bar
    pub show_progress: bool,
}

// The numbers reported at the end of a run
//
// #[derive(Serialize)] lets main print this as JSON with --json
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Non-blank seed lines
    pub total: usize,
    /// Seeds that produced at least one link
    pub processed: usize,
    /// Seeds that produced no links
    pub skipped: usize,
    /// Distinct links found in this run
    pub unique_links: usize,
    /// Where the distinct links were written
    pub unique_output: PathBuf,
}

// Runs the harvest described by `options`
//
// Returns: the run Summary, or an error if a file could not be read or
// written. Failed pages are never errors; they only raise the skip count.
pub async fn process_file(options: &HarvestOptions) -> Result<Summary> {
    let content = fs::read_to_string(&options.input)
        .with_context(|| format!("Failed to read seed file {}", options.input.display()))?;
    let lines: Vec<&str> = content.lines().collect();

    let mut ledger = Ledger::open(&options.output)?;
    let client = build_client(options.timeout).context("Failed to create HTTP client")?;

    let progress_bar = progress_bar(lines.len(), options.show_progress)?;

    let mut all_links: BTreeSet<String> = BTreeSet::new();
    let mut total = 0;
    let mut skipped = 0;

    for (idx, line) in lines.iter().enumerate() {
        let url = line.trim();
        if !url.is_empty() {
            total += 1;

            let links = extract_links(&client, url, options.timeout).await;
            if links.is_empty() {
                skipped += 1;
            } else {
                // BTreeSet iterates in sorted order
                for link in &links {
                    ledger.record(link)?;
                }
                ledger.flush()?;
                all_links.extend(links);
            }

            progress_bar.set_message(format!(
                "Processing {}/{} | Skipped={}, Scraped={}",
                idx + 1,
                lines.len(),
                skipped,
                all_links.len()
            ));
        }
        progress_bar.inc(1);
    }
    progress_bar.finish();

    write_unique_links(&options.unique_output, &all_links)?;

    Ok(Summary {
        total,
        processed: total - skipped,
        skipped,
        unique_links: all_links.len(),
        unique_output: options.unique_output.clone(),
    })
}

// Creates the progress bar, or a hidden one when progress is turned off
fn progress_bar(len: usize, visible: bool) -> Result<ProgressBar> {
    if !visible {
        return Ok(ProgressBar::hidden());
    }

    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );
    pb.set_message("Processing Sites");
    Ok(pb)
}

// Overwrites `path` with the links, one per line
fn write_unique_links(path: &Path, links: &BTreeSet<String>) -> Result<()> {
    let mut content = String::new();
    for link in links {
        content.push_str(link);
        content.push('\n');
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write unique links to {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        links = links.len(),
        "wrote unique links"
    );
    Ok(())
}
