pub mod category;
pub mod details;
pub mod fetcher;
pub mod html;
pub mod listings;
pub mod pagination;
pub mod traits;
pub mod types;

pub use category::{detect_category, detect_document_category};
pub use details::{extract_details, extract_details_from_page};
pub use fetcher::HttpFetcher;
pub use pagination::ListingPaginator;
pub use traits::{Page, PageFetcher, ProgressNotifier};
pub use types::{slugify, Region, ScraperConfig, SearchParams};
