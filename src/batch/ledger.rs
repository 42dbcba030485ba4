// src/batch/ledger.rs
// =============================================================================
// This module owns the ledger: the append-only file of every link we have
// ever written.
//
// How it works:
// 1. On startup, every line already in the file goes into a HashSet
// 2. The file is then opened in append mode and stays open for the run
// 3. record() writes a link only the first time it is seen
//
// Because the set is seeded from the file itself, running the tool twice
// over the same seeds never writes a link twice.
// =============================================================================

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

// The written-links set plus the open ledger file
pub struct Ledger {
    path: PathBuf,
    written: HashSet<String>,
    writer: BufWriter<File>,
    // The file ends mid-line, so the first append must start a new line
    needs_newline: bool,
}

impl Ledger {
    // Loads the existing ledger (if any) and opens it for appending
    //
    // A missing file is fine: it just means no links were written before.
    // Any other read error, or failing to open the file, is returned.
    pub fn open(path: &Path) -> Result<Self> {
        let existing = read_existing(path)?;
        let written = parse_links(&existing);
        let needs_newline = !existing.is_empty() && !existing.ends_with('\n');

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open ledger {}", path.display()))?;

        tracing::info!(
            ledger = %path.display(),
            known_links = written.len(),
            "loaded ledger"
        );

        Ok(Self {
            path: path.to_path_buf(),
            written,
            writer: BufWriter::new(file),
            needs_newline,
        })
    }

    // Records a link, writing it to the file if it has never been written
    //
    // Returns: true if the link was appended, false if it was already there
    pub fn record(&mut self, link: &str) -> Result<bool> {
        if self.written.contains(link) {
            return Ok(false);
        }

        if self.needs_newline {
            writeln!(self.writer)
                .with_context(|| format!("Failed to write to ledger {}", self.path.display()))?;
            self.needs_newline = false;
        }

        writeln!(self.writer, "{}", link)
            .with_context(|| format!("Failed to write to ledger {}", self.path.display()))?;
        self.written.insert(link.to_string());

        tracing::debug!(link, "appended to ledger");
        Ok(true)
    }

    // Pushes buffered links to disk
    pub fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .with_context(|| format!("Failed to flush ledger {}", self.path.display()))
    }

    // Checks whether a link has already been written
    #[cfg(test)]
    pub fn contains(&self, link: &str) -> bool {
        self.written.contains(link)
    }
}

// Reads the ledger as it is on disk, or "" if it does not exist yet
fn read_existing(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e).with_context(|| format!("Failed to read ledger {}", path.display())),
    }
}

// Collects the links in ledger content
//
// Each line is trimmed; blank lines are ignored.
fn parse_links(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
