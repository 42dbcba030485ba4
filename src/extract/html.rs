// src/extract/html.rs
// =============================================================================
// This module pulls absolute links out of an HTML page.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever, so broken real-world markup still parses
//
// Only href values that already start with "http" are kept. Relative links
// like "/about" or "../docs" are dropped, not resolved against the page URL.
// =============================================================================

use scraper::{Html, Selector};
use std::collections::BTreeSet;

// All <a> tags that carry an href attribute
const ANCHOR_SELECTOR: &str = "a[href]";

// Prefix a link must start with to count as absolute
const ABSOLUTE_PREFIX: &str = "http";

// Extracts every absolute link from HTML content
//
// Parameters:
//   html: the HTML content to parse (borrowed as &str)
//
// Returns: BTreeSet<String> of the href values, sorted and without duplicates
//
// Example:
//   html = "<a href='https://a.com'>A</a><a href='/docs'>Docs</a>"
//   result = {"https://a.com"}
pub fn extract_absolute_links(html: &str) -> BTreeSet<String> {
    let mut links = BTreeSet::new();

    let document = Html::parse_document(html);

    // The selector is a constant and known to be valid, so a parse
    // failure here is a programmer error, not a bad page
    let selector = Selector::parse(ANCHOR_SELECTOR).expect("a[href] is a valid CSS selector");

    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            if is_absolute_link(href) {
                // The raw attribute value is kept as-is, no normalization
                links.insert(href.to_string());
            }
        }
    }

    links
}

// Checks whether an href value is absolute
//
// This is a plain prefix check, so both "http://" and "https://" links pass,
// while "mailto:", "javascript:" and relative paths do not.
fn is_absolute_link(href: &str) -> bool {
    href.starts_with(ABSOLUTE_PREFIX)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why BTreeSet instead of Vec or HashSet?
//    - A set drops duplicates: the same link twice on one page counts once
//    - BTreeSet keeps its items sorted, so iterating it walks the links
//      in lexicographic order, which is the order we write them to disk
//
// 2. Why expect() on the selector?
//    - Selector::parse can fail if the CSS selector is invalid
//    - Ours is a constant, so failing would be a bug in this file
//    - Panicking with a message is louder than silently returning no
//      links, which would make every page look like a skip
//
// 3. What does .attr("href") return?
//    - Option<&str>: Some(value) if the attribute exists, None otherwise
//    - The selector already guarantees href exists, but the API is still
//      an Option, so we handle it with if let
// -----------------------------------------------------------------------------
