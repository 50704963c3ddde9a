//! Marketplace listing scraper with dual-currency price normalization.

pub mod config;
pub mod error;
pub mod models;
pub mod pricing;
pub mod scrapers;
pub mod services;

pub use error::{ConversionError, FetchError, ParseError, ScrapeError};
pub use models::{Category, CategoryDetails, DetailRecord, Listing, Priced};
