// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (diagnostics go to stderr, filtered by RUST_LOG)
// 2. Parse command-line arguments using clap
// 3. Run the harvest over the seed file
// 4. Print the summary and exit with a proper code (0 = done, 2 = error)
//
// Rust concepts used:
// - async/await: The HTTP client is async, even though we fetch one page at a time
// - Result<T, E>: For error handling
// =============================================================================

// Module declarations - tells Rust about our other source files
mod batch; // src/batch/ - seed loop, ledger, unique output
mod cli; // src/cli.rs - command-line parsing
mod extract; // src/extract/ - fetching pages and pulling links out of them

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_logging();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain, e.g. "Failed to read seed file x: No such file"
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Sends tracing events to stderr so stdout only carries the summary
//
// RUST_LOG overrides the default level, e.g. RUST_LOG=link_harvester=debug
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// This is the main application logic
// Returns:
//   Ok(0) = the run finished (some seeds may have been skipped)
//   Err = the seed file could not be read or an output could not be written
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    let options = cli.harvest_options();
    let summary = batch::process_file(&options).await?;

    print_summary(&summary, cli.json)?;

    Ok(0)
}

// Prints the summary either as text or JSON
fn print_summary(summary: &batch::Summary, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(summary)?;
        println!("{}", json_output);
    } else {
        println!();
        println!("📊 Summary:");
        println!("   ✅ Processed: {}/{}", summary.processed, summary.total);
        println!("   ⏭️  Skipped: {}", summary.skipped);
        println!(
            "   💾 Saved: {} unique links to {}",
            summary.unique_links,
            summary.unique_output.display()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_summary_json_shape() {
        let summary = batch::Summary {
            total: 3,
            processed: 2,
            skipped: 1,
            unique_links: 7,
            unique_output: PathBuf::from("output_unique.txt"),
        };

        let value = serde_json::to_value(&summary).unwrap();

        assert_eq!(value["total"], 3);
        assert_eq!(value["processed"], 2);
        assert_eq!(value["skipped"], 1);
        assert_eq!(value["unique_links"], 7);
        assert_eq!(value["unique_output"], "output_unique.txt");
    }
}
