use crate::error::ScrapeError;
use crate::models::Listing;
use crate::scrapers::pagination::ListingPaginator;
use crate::scrapers::traits::{PageFetcher, ProgressNotifier};
use crate::scrapers::types::SearchParams;
use crate::services::export::RecordExporter;
use tracing::{info, warn};

/// Scrape listings for a search and export them when an exporter is set
pub struct SearchProducts<F, N, E> {
    paginator: ListingPaginator<F, N>,
    exporter: Option<E>,
}

impl<F, N, E> SearchProducts<F, N, E>
where
    F: PageFetcher,
    N: ProgressNotifier,
    E: RecordExporter,
{
    pub fn new(paginator: ListingPaginator<F, N>, exporter: Option<E>) -> Self {
        Self { paginator, exporter }
    }

    pub async fn execute(&self, params: &SearchParams) -> Result<Vec<Listing>, ScrapeError> {
        let listings = self.paginator.scrape(params).await?;

        if listings.is_empty() {
            warn!("No listings found for '{}'", params.query);
            return Ok(listings);
        }

        info!("Scrape for '{}' finished with {} listings", params.query, listings.len());
        if let Some(exporter) = &self.exporter {
            exporter.export(&listings, &params.query);
        }

        Ok(listings)
    }
}
