// src/fetch/replay.rs
// =============================================================================
// Replay fetch strategy: always returns the same cached document.
//
// Whatever URL is asked for, the answer is the page loaded at construction,
// parsed fresh each time. This makes crawl runs repeatable without touching
// the network. The document's base location is fixed too, so links resolve
// the same way on every step.
// =============================================================================

use super::{FetchMode, FetchStrategy, PageContent, PageParser};
use crate::error::FetchError;
use async_trait::async_trait;
use std::path::Path;
use tracing::debug;
use url::Url;

pub struct ReplayFetcher {
    html: String,
    base: Url,
    parser: PageParser,
}

impl ReplayFetcher {
    pub fn from_html(html: impl Into<String>, base: Url, parser: PageParser) -> Self {
        Self {
            html: html.into(),
            base,
            parser,
        }
    }

    pub async fn from_file(path: &Path, base: Url, parser: PageParser) -> Result<Self, FetchError> {
        let html = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| FetchError::ReadCache {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self::from_html(html, base, parser))
    }
}

#[async_trait]
impl FetchStrategy for ReplayFetcher {
    fn mode(&self) -> FetchMode {
        FetchMode::Replay
    }

    async fn fetch(&self, url: &Url) -> Result<PageContent, FetchError> {
        debug!(%url, base = %self.base, "replaying cached page");
        Ok(self.parser.parse(&self.html, self.base.clone()))
    }
}
