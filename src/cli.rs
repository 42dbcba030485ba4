// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Every argument has a default value. Running `link-harvester` with no
// arguments reads `sites.txt`, appends to `output.txt` and writes the sorted
// unique list to `output_unique.txt`, waiting at most 60 seconds per page.
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Derive macros: Automatically generate code for our types
// - PathBuf: An owned, platform-aware file path
// =============================================================================

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::batch::HarvestOptions;

// Default file names, used when the matching flag is not given
pub const DEFAULT_INPUT: &str = "sites.txt";
pub const DEFAULT_OUTPUT: &str = "output.txt";
pub const DEFAULT_UNIQUE_OUTPUT: &str = "output_unique.txt";

// Default per-request limit in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
#[derive(Parser, Debug)]
#[command(
    name = "link-harvester",
    version = "0.1.0",
    about = "Harvest absolute links from a list of web pages",
    long_about = "link-harvester fetches every URL in a seed file, collects the absolute links \
                  found in each page's <a href> tags, appends new ones to a ledger file \
                  (never writing a link twice, even across runs) and finally writes a sorted, \
                  deduplicated list of everything found in this run."
)]
pub struct Cli {
    /// File with one seed URL per line
    #[arg(long, default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Ledger file that new links are appended to
    ///
    /// Links already present in this file are never written again.
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// File that receives the sorted unique links of this run (overwritten)
    #[arg(long, default_value = DEFAULT_UNIQUE_OUTPUT)]
    pub unique_output: PathBuf,

    /// Maximum seconds to wait for a single page
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Print the final summary as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl Cli {
    // Converts the parsed arguments into the options the batch processor needs
    pub fn harvest_options(&self) -> HarvestOptions {
        HarvestOptions {
            input: self.input.clone(),
            output: self.output.clone(),
            unique_output: self.unique_output.clone(),
            timeout: Duration::from_secs(self.timeout),
            show_progress: !self.no_progress,
        }
    }
}
