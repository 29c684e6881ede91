//! Color token scanner — pulls raw hex/rgb/rgba substrings out of opaque
//! text buffers and normalizes them to canonical colors.
//!
//! The scanner never errors: a token whose components fail to parse is
//! dropped from the candidate list, and a buffer with no tokens at all is a
//! valid (empty) result that the caller resolves via fallback synthesis.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::theme::color::Color;

/// Scans one text buffer, returning every recognized token in discovery
/// order, duplicates included. Hex tokens are found first, then the
/// functional rgb()/rgba() forms; order across the two shapes is irrelevant
/// because callers deduplicate and sort.
pub fn scan_text(text: &str) -> Vec<Color> {
    // 6-digit first so a full token is never consumed as its 3-digit prefix.
    static HEX_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"#(?:[0-9a-fA-F]{6}|[0-9a-fA-F]{3})").expect("valid regex")
    });
    static RGB_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*[\d.]+\s*)?\)")
            .expect("valid regex")
    });

    let mut found = Vec::new();

    for token in HEX_TOKEN.find_iter(text) {
        match Color::parse(token.as_str()) {
            Ok(color) => found.push(color),
            Err(e) => debug!("dropping malformed hex token: {e}"),
        }
    }

    for caps in RGB_TOKEN.captures_iter(text) {
        match rgb_from_captures(&caps) {
            Some(color) => found.push(color),
            None => debug!(
                "dropping rgb token with out-of-range component: {:?}",
                caps.get(0).map(|m| m.as_str()).unwrap_or_default()
            ),
        }
    }

    found
}

/// Scans every page, then deduplicates and sorts the combined candidates.
/// Only this final set matters downstream; page order does not.
pub fn scan_pages(pages: &[String]) -> Vec<Color> {
    let mut candidates = Vec::new();
    for page in pages {
        candidates.extend(scan_text(page));
    }
    let unique: BTreeSet<Color> = candidates.into_iter().collect();
    unique.into_iter().collect()
}

fn rgb_from_captures(caps: &regex::Captures<'_>) -> Option<Color> {
    let channel = |i: usize| caps.get(i)?.as_str().parse::<u8>().ok();
    Some(Color::new(channel(1)?, channel(2)?, channel(3)?))
}
