// src/crawl/links.rs
// =============================================================================
// Extracts internal links from a fetched page.
//
// An "internal" link is one whose raw href starts with /wiki/. That is the
// whole policy. Everything else is skipped:
// - links to other sites (https://other.org/...)
// - fragment-only links (#cite_note-1)
// - other namespaces on the same site (/w/index.php?...)
// - absolute links back to the same site, because the raw href does not
//   start with /wiki/
//
// Accepted hrefs are resolved against the page's base URL. Output follows
// document order (block by block, anchor by anchor) and is NOT deduplicated.
// =============================================================================

use crate::fetch::{ContentBlock, PageContent};
use tracing::debug;
use url::Url;

pub const INTERNAL_PREFIX: &str = "/wiki/";

/// Absolute URLs of every internal link on `page`, lazily, in document order.
pub fn internal_links(page: &PageContent) -> impl Iterator<Item = Url> + '_ {
    let base = page.base();

    page.blocks()
        .iter()
        .flat_map(internal_hrefs)
        .filter_map(move |href| resolve_link(base, href))
}

fn internal_hrefs(block: &ContentBlock) -> impl Iterator<Item = &str> {
    block
        .hrefs
        .iter()
        .map(String::as_str)
        .filter(|href| href.starts_with(INTERNAL_PREFIX))
}

fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    match base.join(href) {
        Ok(url) => Some(url),
        Err(e) => {
            debug!(href, error = %e, "skipping unresolvable link");
            None
        }
    }
}
