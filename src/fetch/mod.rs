// src/fetch/mod.rs
// =============================================================================
// This module turns a URL into parsed page content.
//
// Submodules:
// - page: the PageContent model and the HTML parser that builds it
// - live: fetches the requested URL over HTTP
// - replay: hands back one cached document for every URL (repeatable runs)
//
// A crawler is given exactly one strategy when it is built. The loop never
// branches on "testing vs. live"; it only asks the strategy for its mode to
// know whether it runs in forced-replay mode.
// =============================================================================

mod live;
mod page;
mod replay;

pub use live::LiveFetcher;
pub use page::{ContentBlock, PageContent, PageParser, DEFAULT_CONTENT_SELECTOR};
pub use replay::ReplayFetcher;

use crate::error::FetchError;
use async_trait::async_trait;
use serde::Serialize;
use url::Url;

/// Which kind of retrieval a strategy performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchMode {
    /// Real retrieval of the requested URL
    Live,
    /// Fixed cached document; the index check is bypassed
    Replay,
}

#[async_trait]
pub trait FetchStrategy: Send + Sync {
    fn mode(&self) -> FetchMode;

    async fn fetch(&self, url: &Url) -> Result<PageContent, FetchError>;
}
