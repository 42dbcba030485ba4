// src/batch/mod.rs
// =============================================================================
// This module processes a whole seed file.
//
// Submodules:
// - ledger: The append-only file of links we have already written
// - process: The seed loop, the unique output and the run summary
// =============================================================================

mod ledger;
mod process;

pub use process::{process_file, HarvestOptions, Summary};
