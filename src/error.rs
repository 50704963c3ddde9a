//! Error types for the scraping and pricing pipeline.
//!
//! A field that is simply missing on a page is not an error: extraction
//! returns `None` for it. The enums below cover the failures that callers
//! may want to tell apart.

/// Failure to turn a marketplace-formatted string into a number.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// Nothing was left after stripping the currency marker and separators
    #[error("no digits left in '{text}'")]
    Empty { text: String },

    /// The remainder contained something other than digits
    #[error("'{remainder}' in '{text}' is not a whole number")]
    NotNumeric { text: String, remainder: String },

    /// Strict price parsing requires a currency marker
    #[error("no currency marker in '{text}'")]
    MissingCurrency { text: String },
}

/// Failure to convert money between currencies.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    #[error("exchange rate unavailable")]
    MissingRate,

    #[error("exchange rate {rate} must be a positive finite number")]
    InvalidRate { rate: f64 },
}

/// Transport failure while fetching a page.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            FetchError::Request { url, .. } | FetchError::Status { url, .. } => url,
        }
    }
}

/// Fatal failure of a listing scrape.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("could not fetch the first results page")]
    Bootstrap(#[source] FetchError),
}
