// src/crawl/crawler.rs
// =============================================================================
// The crawl loop, one step at a time.
//
// A step (WikiCrawler::crawl) does, in order:
// 1. take the next URL off the frontier (FrontierExhausted if there is none)
// 2. ask the index whether it is already indexed; if so, stop here and
//    report a skip. Replay runs bypass this check.
// 3. fetch the page through the injected fetch strategy
// 4. index it
// 5. queue every internal link found on it
//
// Nothing is retried or rolled back. If fetching or indexing fails, the
// dequeued URL is dropped and the error goes to the caller; the rest of the
// frontier is left as it was.
//
// A step borrows the crawler mutably, so steps never overlap.
// =============================================================================

use super::frontier::{FifoFrontier, Frontier};
use super::links::internal_links;
use crate::error::CrawlError;
use crate::fetch::{FetchMode, FetchStrategy, PageContent};
use crate::index::IndexGate;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

/// What a successful step did with the URL it dequeued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Fetched, indexed and its links queued
    Indexed(Url),
    /// Already indexed; nothing was fetched or written
    Skipped(Url),
}

pub struct WikiCrawler<Q: Frontier = FifoFrontier> {
    // where the run started; kept for reporting only
    source: Url,
    index: Arc<dyn IndexGate>,
    fetcher: Box<dyn FetchStrategy>,
    queue: Q,
}

impl WikiCrawler<FifoFrontier> {
    /// Creates a crawler whose frontier holds just the seed.
    pub fn new(source: Url, index: Arc<dyn IndexGate>, fetcher: Box<dyn FetchStrategy>) -> Self {
        Self::with_frontier(source, index, fetcher, FifoFrontier::new())
    }

    /// Creates a crawler whose frontier holds the seed page's internal links.
    ///
    /// The seed is fetched once to find those links and is then consumed:
    /// it is neither indexed nor queued.
    pub async fn preseeded(
        source: Url,
        index: Arc<dyn IndexGate>,
        fetcher: Box<dyn FetchStrategy>,
    ) -> Result<Self, CrawlError> {
        let page = fetcher.fetch(&source).await?;

        let mut crawler = Self {
            source,
            index,
            fetcher,
            queue: FifoFrontier::new(),
        };
        let queued = crawler.queue_internal_links(&page);
        info!(seed = %crawler.source, queued, "pre-seeded frontier from seed page");
        if crawler.queue.is_empty() {
            warn!(seed = %crawler.source, "seed page has no internal links");
        }

        Ok(crawler)
    }
}

impl<Q: Frontier> WikiCrawler<Q> {
    /// Creates a crawler on top of `queue`, appending the seed to it.
    pub fn with_frontier(
        source: Url,
        index: Arc<dyn IndexGate>,
        fetcher: Box<dyn FetchStrategy>,
        mut queue: Q,
    ) -> Self {
        queue.enqueue(source.clone());
        Self {
            source,
            index,
            fetcher,
            queue,
        }
    }

    pub fn source(&self) -> &Url {
        &self.source
    }

    pub fn queue_size(&self) -> usize {
        self.queue.len()
    }

    /// Queues every internal link on `page`, returning how many were queued.
    pub fn queue_internal_links(&mut self, page: &PageContent) -> usize {
        let mut queued = 0;
        for url in internal_links(page) {
            self.queue.enqueue(url);
            queued += 1;
        }
        queued
    }

    /// Performs one crawl step.
    pub async fn crawl(&mut self) -> Result<StepOutcome, CrawlError> {
        let url = self.queue.dequeue()?;

        let forced_replay = self.fetcher.mode() == FetchMode::Replay;
        if !forced_replay && self.index.is_indexed(&url).await {
            debug!(%url, "already indexed, skipping");
            return Ok(StepOutcome::Skipped(url));
        }

        let page = self.fetcher.fetch(&url).await?;
        self.index.index_page(&url, &page).await?;

        let queued = self.queue_internal_links(&page);
        info!(%url, queued, frontier = self.queue.len(), "indexed page");

        Ok(StepOutcome::Indexed(url))
    }
}

/// Summary of a driver run.
#[derive(Debug, Default, Serialize)]
pub struct CrawlReport {
    pub indexed: Vec<String>,
    pub skipped: usize,
    /// True when the frontier ran dry before enough pages were indexed
    pub exhausted: bool,
}

/// Steps `crawler` until `pages` URLs were indexed or the frontier runs dry.
///
/// Skips don't count towards `pages`. Fetch and index errors end the run.
pub async fn run_until_indexed<Q: Frontier>(
    crawler: &mut WikiCrawler<Q>,
    pages: usize,
) -> Result<CrawlReport, CrawlError> {
    let mut report = CrawlReport::default();

    while report.indexed.len() < pages {
        match crawler.crawl().await {
            Ok(StepOutcome::Indexed(url)) => report.indexed.push(url.into()),
            Ok(StepOutcome::Skipped(_)) => report.skipped += 1,
            Err(CrawlError::FrontierExhausted) => {
                report.exhausted = true;
                break;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(report)
}
