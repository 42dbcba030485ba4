// src/extract/mod.rs
// =============================================================================
// This module turns one seed URL into the set of absolute links on its page.
//
// Submodules:
// - http: Fetches the page with a time limit and reports typed errors
// - html: Finds the absolute <a href> targets in a page
//
// extract_links() is the only thing the batch processor calls. It never
// fails: every fetch error is logged and becomes an empty set.
// =============================================================================

mod html;
mod http;

use reqwest::Client;
use std::collections::BTreeSet;
use std::time::Duration;

use http::{fetch_links, FetchError};

pub use http::build_client;

// Fetches one seed page and returns its absolute links
//
// Parameters:
//   client: the shared HTTP client
//   url: the seed URL, already trimmed
//   limit: how long we are willing to wait for the page
//
// Returns: the links found, or an empty set if anything went wrong
pub async fn extract_links(client: &Client, url: &str, limit: Duration) -> BTreeSet<String> {
    match fetch_links(client, url, limit).await {
        Ok(links) => links,
        Err(error) => {
            report_failure(url, &error);
            BTreeSet::new()
        }
    }
}

// Logs why a seed produced no links
fn report_failure(url: &str, error: &FetchError) {
    match error {
        FetchError::TooSlow { elapsed } => {
            tracing::warn!(
                url,
                elapsed_secs = elapsed.as_secs_f64(),
                "page took too long, skipping"
            );
        }
        FetchError::Status(code) => {
            tracing::warn!(url, status = code, "failed to fetch page");
        }
        other => {
            tracing::warn!(url, error = %other, "error while processing page");
        }
    }
}
