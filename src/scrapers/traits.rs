use crate::error::FetchError;
use async_trait::async_trait;
use scraper::Html;
use std::sync::Arc;

/// A fetched page, kept as text so it can cross await points and threads.
/// Parse it with [`Page::document`] inside synchronous code.
#[derive(Debug, Clone)]
pub struct Page {
    pub url: String,
    pub body: String,
}

impl Page {
    pub fn new(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            body: body.into(),
        }
    }

    pub fn document(&self) -> Html {
        Html::parse_document(&self.body)
    }
}

/// Fetches pages from the marketplace.
/// This allows swapping the HTTP client for a fake in tests
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Page, FetchError>;
}

/// Receives pagination progress. Must not block.
pub trait ProgressNotifier: Send + Sync {
    fn notify(&self, current: usize, total: usize);
}

#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for Arc<T> {
    async fn fetch(&self, url: &str) -> Result<Page, FetchError> {
        (**self).fetch(url).await
    }
}

impl<T: ProgressNotifier + ?Sized> ProgressNotifier for Arc<T> {
    fn notify(&self, current: usize, total: usize) {
        (**self).notify(current, total)
    }
}
