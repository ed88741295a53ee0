// src/index/memory.rs
// =============================================================================
// In-memory index backend.
//
// Layout: URL -> (term -> count). Indexing a URL again replaces its counts.
// Looking up a term scans every page, which is fine for the few thousand
// pages a single crawl run visits.
//
// When opened with a snapshot path, the whole index is written back to that
// file as JSON after every indexed page, and read from it on open. A failed
// write is returned to the crawl loop as an IndexError.
// =============================================================================

use super::{count_terms, IndexGate, TermCounts};
use crate::error::IndexError;
use crate::fetch::PageContent;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};
use url::Url;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    pages: BTreeMap<String, TermCounts>,
}

#[derive(Debug, Default)]
pub struct MemoryIndex {
    state: RwLock<Snapshot>,
    snapshot_path: Option<PathBuf>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens an index mirrored to `path`. A missing file means an empty index.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, IndexError> {
        let path = path.into();

        let snapshot: Snapshot = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| IndexError::Decode {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Snapshot::default(),
            Err(source) => return Err(IndexError::Io { path, source }),
        };

        info!(
            path = %path.display(),
            pages = snapshot.pages.len(),
            "opened index snapshot"
        );

        Ok(Self {
            state: RwLock::new(snapshot),
            snapshot_path: Some(path),
        })
    }

    /// Number of indexed pages.
    pub async fn page_count(&self) -> usize {
        self.state.read().await.pages.len()
    }

    /// How often `term` occurs on each indexed page that contains it.
    pub async fn counts(&self, term: &str) -> BTreeMap<String, u32> {
        let term = term.to_lowercase();
        let state = self.state.read().await;

        state
            .pages
            .iter()
            .filter_map(|(url, terms)| terms.get(&term).map(|count| (url.clone(), *count)))
            .collect()
    }

    async fn persist(path: &Path, snapshot: &Snapshot) -> Result<(), IndexError> {
        let bytes = serde_json::to_vec_pretty(snapshot).map_err(IndexError::Encode)?;
        tokio::fs::write(path, bytes)
            .await
            .map_err(|source| IndexError::Io {
                path: path.to_path_buf(),
                source,
            })
    }
}

#[async_trait]
impl IndexGate for MemoryIndex {
    async fn is_indexed(&self, url: &Url) -> bool {
        self.state.read().await.pages.contains_key(url.as_str())
    }

    async fn index_page(&self, url: &Url, page: &PageContent) -> Result<(), IndexError> {
        let terms = count_terms(page.texts());
        debug!(%url, terms = terms.len(), "indexing page");

        let mut state = self.state.write().await;
        let previous = state.pages.insert(url.to_string(), terms);

        // Written while holding the lock so snapshots land in indexing order
        if let Some(path) = &self.snapshot_path {
            if let Err(e) = Self::persist(path, &state).await {
                // the page only counts as indexed once it is on disk
                match previous {
                    Some(counts) => state.pages.insert(url.to_string(), counts),
                    None => state.pages.remove(url.as_str()),
                };
                return Err(e);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::ContentBlock;

    fn url(path: &str) -> Url {
        Url::parse("https://en.wikipedia.org/wiki/")
            .unwrap()
            .join(path)
            .unwrap()
    }

    fn page(text: &str) -> PageContent {
        PageContent::new(
            url("Base"),
            vec![ContentBlock {
                text: text.to_string(),
                hrefs: Vec::new(),
            }],
        )
    }

    #[tokio::test]
    async fn test_index_then_is_indexed() {
        let index = MemoryIndex::new();
        assert!(!index.is_indexed(&url("Java")).await);

        index.index_page(&url("Java"), &page("the JVM")).await.unwrap();

        assert!(index.is_indexed(&url("Java")).await);
        assert!(!index.is_indexed(&url("Python")).await);
        assert_eq!(index.page_count().await, 1);
    }

    #[tokio::test]
    async fn test_counts_per_page() {
        let index = MemoryIndex::new();
        index
            .index_page(&url("Java"), &page("The language and the runtime"))
            .await
            .unwrap();
        index
            .index_page(&url("Python"), &page("the snake"))
            .await
            .unwrap();
        index.index_page(&url("Go"), &page("gopher")).await.unwrap();

        let counts = index.counts("THE").await;
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[url("Java").as_str()], 2);
        assert_eq!(counts[url("Python").as_str()], 1);
    }

    #[tokio::test]
    async fn test_reindex_replaces_counts() {
        let index = MemoryIndex::new();
        index.index_page(&url("Java"), &page("the the the")).await.unwrap();
        index.index_page(&url("Java"), &page("the")).await.unwrap();

        assert_eq!(index.counts("the").await[url("Java").as_str()], 1);
        assert_eq!(index.page_count().await, 1);
    }

    #[tokio::test]
    async fn test_snapshot_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");

        let index = MemoryIndex::open(&path).await.unwrap();
        assert_eq!(index.page_count().await, 0);
        index.index_page(&url("Java"), &page("the JVM")).await.unwrap();
        drop(index);

        let reopened = MemoryIndex::open(&path).await.unwrap();
        assert!(reopened.is_indexed(&url("Java")).await);
        assert_eq!(reopened.counts("jvm").await[url("Java").as_str()], 1);
    }

    #[tokio::test]
    async fn test_corrupt_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        tokio::fs::write(&path, b"not json").await.unwrap();

        let result = MemoryIndex::open(&path).await;
        assert!(matches!(result, Err(IndexError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_unwritable_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        // The parent directory does not exist, so every write fails
        let path = dir.path().join("missing").join("index.json");

        let index = MemoryIndex::open(&path).await.unwrap();
        let result = index.index_page(&url("Java"), &page("the")).await;
        assert!(matches!(result, Err(IndexError::Io { .. })));
    }

    #[tokio::test]
    async fn test_failed_write_leaves_page_unindexed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("index.json");
        let index = MemoryIndex::open(&path).await.unwrap();

        assert!(index.index_page(&url("Java"), &page("the")).await.is_err());

        assert!(!index.is_indexed(&url("Java")).await);
        assert_eq!(index.page_count().await, 0);
        assert!(index.counts("the").await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_rewrite_keeps_previous_counts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        let index = MemoryIndex::open(&path).await.unwrap();
        index.index_page(&url("Java"), &page("the the")).await.unwrap();

        // Turn the snapshot path into a directory so the next write fails
        tokio::fs::remove_file(&path).await.unwrap();
        tokio::fs::create_dir(&path).await.unwrap();

        assert!(index.index_page(&url("Java"), &page("the")).await.is_err());
        assert!(index.is_indexed(&url("Java")).await);
        assert_eq!(index.counts("the").await[url("Java").as_str()], 2);
    }

    #[tokio::test]
    async fn test_lookup_uses_parsed_url_form() {
        let index = MemoryIndex::new();
        index.index_page(&url("Java"), &page("the")).await.unwrap();

        // Url parsing lowercases scheme and host, so both spellings are one key
        let shouted = Url::parse("HTTPS://EN.Wikipedia.ORG/wiki/Java").unwrap();
        assert!(index.is_indexed(&shouted).await);
        // the path is case-sensitive
        let other = Url::parse("https://en.wikipedia.org/wiki/JAVA").unwrap();
        assert!(!index.is_indexed(&other).await);
    }
}
