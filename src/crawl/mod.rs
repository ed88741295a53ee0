// src/crawl/mod.rs
// =============================================================================
// This module handles crawling.
//
// Features:
// - Breadth-first: the frontier is a FIFO queue
// - Same-site only: just /wiki/ links are followed
// - One page per step: the caller decides how many steps to run
// - No revisits: pages already in the index are skipped when dequeued
//
// Submodules:
// - frontier: the queue of URLs waiting to be visited
// - links: finds internal links in a fetched page
// - crawler: the step loop and the driver that runs it
// =============================================================================

mod crawler;
mod frontier;
mod links;

pub use crawler::{run_until_indexed, CrawlReport, WikiCrawler};
