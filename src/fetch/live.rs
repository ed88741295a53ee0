// src/fetch/live.rs
// =============================================================================
// Live fetch strategy: downloads the requested page over HTTP.
//
// One reqwest Client is built up front and reused for every request, so
// connections are pooled across crawl steps. The request has a timeout;
// there is no retry here. A failed fetch is reported to the crawl loop,
// which surfaces it to its caller.
// =============================================================================

use super::{FetchMode, FetchStrategy, PageContent, PageParser};
use crate::error::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

const USER_AGENT: &str = concat!("wiki-crawler/", env!("CARGO_PKG_VERSION"));

pub struct LiveFetcher {
    client: Client,
    parser: PageParser,
}

impl LiveFetcher {
    pub fn new(parser: PageParser, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client, parser })
    }
}

#[async_trait]
impl FetchStrategy for LiveFetcher {
    fn mode(&self) -> FetchMode {
        FetchMode::Live
    }

    async fn fetch(&self, url: &Url) -> Result<PageContent, FetchError> {
        debug!(%url, "fetching page");
        let response = self.client.get(url.as_str()).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        // After redirects this is where the document actually lives
        let base = response.url().clone();
        let html = response.text().await?;

        Ok(self.parser.parse(&html, base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    // Serves a single canned HTTP response, then returns its base URL
    async fn serve_once(status_line: &'static str, body: &'static str) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "{}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
        });

        Url::parse(&format!("http://{}/wiki/Local", addr)).unwrap()
    }

    fn fetcher() -> LiveFetcher {
        LiveFetcher::new(PageParser::new("p").unwrap(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_parses_body() {
        let url = serve_once(
            "HTTP/1.1 200 OK",
            r#"<p>Hello <a href="/wiki/World">world</a></p>"#,
        )
        .await;

        let page = fetcher().fetch(&url).await.unwrap();
        assert_eq!(page.base(), &url);
        assert_eq!(page.blocks()[0].text, "Hello world");
        assert_eq!(page.blocks()[0].hrefs, vec!["/wiki/World"]);
    }

    #[tokio::test]
    async fn test_fetch_rejects_error_status() {
        let url = serve_once("HTTP/1.1 404 Not Found", "missing").await;

        let err = fetcher().fetch(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[test]
    fn test_mode_is_live() {
        assert_eq!(fetcher().mode(), FetchMode::Live);
    }
}
