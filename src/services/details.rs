use crate::models::DetailRecord;
use crate::scrapers::details::extract_details_from_page;
use crate::scrapers::traits::PageFetcher;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

/// How a batch of detail pages is fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStrategy {
    /// One page at a time; results keep the input order
    Sequential,
    /// One task per URL, no cap; results arrive in completion order
    #[default]
    Concurrent,
}

impl fmt::Display for FetchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchStrategy::Sequential => f.write_str("sequential"),
            FetchStrategy::Concurrent => f.write_str("concurrent"),
        }
    }
}

impl FromStr for FetchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(FetchStrategy::Sequential),
            "concurrent" => Ok(FetchStrategy::Concurrent),
            other => Err(format!("unknown fetch strategy '{}'", other)),
        }
    }
}

/// Fetches detail pages and extracts a record from each.
///
/// A page that fails to load is skipped; the rest of the batch goes on.
pub struct DetailBatchFetcher<F> {
    fetcher: Arc<F>,
}

impl<F: PageFetcher + 'static> DetailBatchFetcher<F> {
    pub fn new(fetcher: Arc<F>) -> Self {
        Self { fetcher }
    }

    pub async fn fetch_one(&self, url: &str) -> Option<DetailRecord> {
        fetch_record(self.fetcher.as_ref(), url).await
    }

    pub async fn fetch_details(&self, urls: &[String], strategy: FetchStrategy) -> Vec<DetailRecord> {
        debug!("Fetching {} detail pages ({})", urls.len(), strategy);
        match strategy {
            FetchStrategy::Sequential => self.fetch_sequential(urls).await,
            FetchStrategy::Concurrent => self.fetch_concurrent(urls).await,
        }
    }

    async fn fetch_sequential(&self, urls: &[String]) -> Vec<DetailRecord> {
        let mut records = Vec::with_capacity(urls.len());
        for url in urls {
            if let Some(record) = self.fetch_one(url).await {
                records.push(record);
            }
        }
        records
    }

    async fn fetch_concurrent(&self, urls: &[String]) -> Vec<DetailRecord> {
        let records = Arc::new(Mutex::new(Vec::with_capacity(urls.len())));

        let handles: Vec<_> = urls
            .iter()
            .cloned()
            .map(|url| {
                let fetcher = Arc::clone(&self.fetcher);
                let records = Arc::clone(&records);
                tokio::spawn(async move {
                    if let Some(record) = fetch_record(fetcher.as_ref(), &url).await {
                        records.lock().await.push(record);
                    }
                })
            })
            .collect();

        for handle in handles {
            if let Err(e) = handle.await {
                error!("Detail fetch task failed: {}", e);
            }
        }

        let mut records = records.lock().await;
        std::mem::take(&mut *records)
    }
}

async fn fetch_record<F: PageFetcher + ?Sized>(fetcher: &F, url: &str) -> Option<DetailRecord> {
    match fetcher.fetch(url).await {
        Ok(page) => Some(extract_details_from_page(&page)),
        Err(e) => {
            warn!("Skipping detail page: {}", e);
            None
        }
    }
}
