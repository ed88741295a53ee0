// src/index/mod.rs
// =============================================================================
// This module is the crawler's view of the search index.
//
// The crawl loop only ever needs two questions answered:
// - "has this URL been indexed already?"
// - "record this URL's content"
// Those are the IndexGate trait. How terms are stored is up to the backend;
// the one shipped here (MemoryIndex) keeps term counts in memory and can
// mirror them to a JSON file.
//
// Submodules:
// - terms: splits page text into counted terms
// - memory: the in-memory backend
// =============================================================================

mod memory;
mod terms;

pub use memory::MemoryIndex;
pub use terms::{count_terms, TermCounts};

use crate::error::IndexError;
use crate::fetch::PageContent;
use async_trait::async_trait;
use url::Url;

/// Gate in front of an index backend.
///
/// Crawlers hold it as `Arc<dyn IndexGate>`, so several crawlers can share
/// one backend or each use their own.
#[async_trait]
pub trait IndexGate: Send + Sync {
    async fn is_indexed(&self, url: &Url) -> bool;

    async fn index_page(&self, url: &Url, page: &PageContent) -> Result<(), IndexError>;
}
