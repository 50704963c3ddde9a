use crate::error::ScrapeError;
use crate::models::Listing;
use crate::scrapers::listings::{count_listing_items, extract_listings, extract_total_results};
use crate::scrapers::traits::{Page, PageFetcher, ProgressNotifier};
use crate::scrapers::types::{slugify, Region, ScraperConfig, SearchParams};
use tracing::{debug, info, warn};

/// Walks search result pages one at a time.
///
/// Each call starts from scratch; nothing is cached between scrapes.
pub struct ListingPaginator<F, N> {
    fetcher: F,
    notifier: N,
    config: ScraperConfig,
}

/// What the first results page says about the whole search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SearchShape {
    total_results: usize,
    items_per_page: usize,
}

impl SearchShape {
    fn read(page: &Page) -> Self {
        let document = page.document();
        Self {
            total_results: extract_total_results(&document),
            items_per_page: count_listing_items(&document),
        }
    }

    fn estimated_pages(&self) -> usize {
        if self.items_per_page == 0 {
            0
        } else {
            self.total_results.div_ceil(self.items_per_page)
        }
    }
}

impl<F: PageFetcher, N: ProgressNotifier> ListingPaginator<F, N> {
    pub fn new(fetcher: F, notifier: N, config: ScraperConfig) -> Self {
        Self {
            fetcher,
            notifier,
            config,
        }
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    pub async fn scrape(&self, params: &SearchParams) -> Result<Vec<Listing>, ScrapeError> {
        self.scrape_listings(params.region, &params.query, params.limit).await
    }

    /// Collect listings until `limit` is reached, the pages run out or a page
    /// comes back empty.
    ///
    /// Only a failure to fetch the first page is an error. A later page that
    /// fails to load ends the walk and the listings gathered so far are
    /// returned. The result is not truncated, so it may exceed `limit` by up
    /// to one page.
    pub async fn scrape_listings(
        &self,
        region: Region,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Listing>, ScrapeError> {
        let slug = slugify(query);
        let search_url = self.config.search_url(region, &slug);

        info!("Starting scrape for '{}' on region {}", query, region);
        let first_page = self
            .fetcher
            .fetch(&search_url)
            .await
            .map_err(ScrapeError::Bootstrap)?;

        let shape = SearchShape::read(&first_page);
        let estimated_pages = shape.estimated_pages();
        let effective_limit = shape.total_results.min(limit);
        let page_cap = estimated_pages.min(self.config.max_pages);

        info!(
            "Got {} results, {} per page; limiting scrape to {} results",
            shape.total_results, shape.items_per_page, effective_limit
        );

        let mut listings = Vec::new();

        for page_index in 0..page_cap {
            if listings.len() >= effective_limit {
                info!("Reached the limit of {} listings", effective_limit);
                break;
            }

            let url = self.config.page_url(region, &slug, page_index);
            let page = match self.fetcher.fetch(&url).await {
                Ok(page) => page,
                Err(e) => {
                    warn!("Page {} failed to load, stopping: {}", page_index + 1, e);
                    break;
                }
            };

            let page_listings = extract_listings(&page.document());
            if page_listings.is_empty() {
                warn!("Page {} returned no listings, stopping", page_index + 1);
                break;
            }

            debug!("Page {} yielded {} listings", page_index + 1, page_listings.len());
            listings.extend(page_listings);
            info!("Scraped page {} of {}", page_index + 1, estimated_pages);

            self.notifier.notify(page_index, estimated_pages);
        }

        info!("✅ Collected {} listings", listings.len());
        Ok(listings)
    }
}
