// src/error.rs
// =============================================================================
// Error types shared by the crawl, fetch and index modules.
//
// The driver in main.rs uses anyhow, but the modules underneath return these
// typed errors so callers (and tests) can match on what went wrong:
// - FrontierError: the queue had nothing to hand out
// - FetchError: the page could not be retrieved or parsed
// - IndexError: the index could not be read or written
// - CrawlError: what a single crawl step can fail with
//
// "Already indexed" is NOT an error. A step that skips a page returns
// StepOutcome::Skipped instead.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Returned by `Frontier::dequeue` when no URL is waiting.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrontierError {
    #[error("frontier is empty")]
    Empty,
}

/// Failures of a fetch strategy.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network or protocol failure while talking to the server
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered, but not with a 2xx status
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// A CSS selector handed to the page parser did not parse
    #[error("invalid selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },

    /// The cached document for replay runs could not be read
    #[error("cannot read cached page {}: {source}", path.display())]
    ReadCache {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures of an index backend.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("index file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot encode index snapshot: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("cannot decode index snapshot {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Everything a single crawl step can fail with.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// No URL left to visit. The run should stop (or wait for more input).
    #[error("frontier exhausted: no URLs left to crawl")]
    FrontierExhausted,

    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("index write failed: {0}")]
    IndexWrite(#[from] IndexError),
}

impl From<FrontierError> for CrawlError {
    fn from(err: FrontierError) -> Self {
        match err {
            FrontierError::Empty => CrawlError::FrontierExhausted,
        }
    }
}
