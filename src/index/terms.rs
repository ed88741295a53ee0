// src/index/terms.rs
// Term counting for indexed pages.

use std::collections::BTreeMap;

/// Per-page term frequencies.
pub type TermCounts = BTreeMap<String, u32>;

/// Counts lowercase terms across the given texts.
///
/// Anything that is not alphanumeric separates terms, so "Java's" counts
/// as "java" and "s", and "run-time" as "run" and "time".
pub fn count_terms<'a>(texts: impl IntoIterator<Item = &'a str>) -> TermCounts {
    let mut counts = TermCounts::new();

    for text in texts {
        for term in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|term| !term.is_empty())
        {
            *counts.entry(term.to_lowercase()).or_insert(0) += 1;
        }
    }

    counts
}
