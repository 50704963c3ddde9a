use crate::error::FetchError;
use crate::scrapers::traits::{Page, PageFetcher};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Plain HTTP page fetcher. No retries.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Without a timeout, requests wait as long as the transport lets them.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Page, FetchError> {
        debug!("Fetching URL: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} returned status: {}", url, status);
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

        debug!("Downloaded {} bytes of HTML", body.len());
        Ok(Page::new(url, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_fetch_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/notebook")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html><body><h1>ok</h1></body></html>")
            .create_async()
            .await;

        let fetcher = HttpFetcher::new(Some(Duration::from_secs(5))).unwrap();
        let url = format!("{}/notebook", server.url());
        let page = fetcher.fetch(&url).await.unwrap();

        assert_eq!(page.url, url);
        assert!(page.body.contains("<h1>ok</h1>"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_http_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let fetcher = HttpFetcher::new(Some(Duration::from_secs(5))).unwrap();
        let url = format!("{}/missing", server.url());
        let err = fetcher.fetch(&url).await.unwrap_err();

        assert!(matches!(err, FetchError::Status { status: 404, .. }));
        assert_eq!(err.url(), url);
    }

    #[tokio::test]
    async fn test_fetch_transport_error() {
        let fetcher = HttpFetcher::new(Some(Duration::from_secs(5))).unwrap();
        let err = fetcher.fetch("not-a-valid-url").await.unwrap_err();
        assert!(matches!(err, FetchError::Request { .. }));
    }

    /// Accepts one connection and answers after `delay`
    async fn slow_server(delay: Duration) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            tokio::time::sleep(delay).await;
            let _ = socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 4\r\nConnection: close\r\n\r\nslow")
                .await;
        });
        format!("http://{}/slow", addr)
    }

    #[tokio::test]
    async fn test_no_timeout_waits_for_slow_server() {
        let url = slow_server(Duration::from_millis(1200)).await;
        let fetcher = HttpFetcher::new(None).unwrap();

        let page = fetcher.fetch(&url).await.unwrap();
        assert_eq!(page.body, "slow");
    }

    #[tokio::test]
    async fn test_configured_timeout_is_enforced() {
        let url = slow_server(Duration::from_millis(1200)).await;
        let fetcher = HttpFetcher::new(Some(Duration::from_millis(200))).unwrap();

        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Request { .. }));
    }
}
