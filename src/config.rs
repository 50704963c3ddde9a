use crate::scrapers::types::ScraperConfig;
use crate::services::exchange_rate::DOLAR_API_URL;
use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub scraper: ScraperConfig,
    pub data_dir: PathBuf,
    pub csv_separator: u8,
    pub rate_url: String,
    /// Per-request timeout; `None` leaves the transport default (no timeout)
    pub http_timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scraper: ScraperConfig::default(),
            data_dir: PathBuf::from("data"),
            csv_separator: b';',
            rate_url: DOLAR_API_URL.to_string(),
            http_timeout: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let page_increment = match lookup("SCOUT_PAGE_INCREMENT") {
            Some(value) => value
                .parse()
                .context("SCOUT_PAGE_INCREMENT must be a valid number")?,
            None => defaults.scraper.page_increment,
        };
        if page_increment == 0 {
            anyhow::bail!("SCOUT_PAGE_INCREMENT must be greater than zero");
        }
        let max_pages = match lookup("SCOUT_MAX_PAGES") {
            Some(value) => value
                .parse()
                .context("SCOUT_MAX_PAGES must be a valid number")?,
            None => defaults.scraper.max_pages,
        };
        let http_timeout = match lookup("SCOUT_HTTP_TIMEOUT_SECS") {
            Some(value) => Some(Duration::from_secs(
                value
                    .parse()
                    .context("SCOUT_HTTP_TIMEOUT_SECS must be a valid number")?,
            )),
            None => defaults.http_timeout,
        };
        let csv_separator = match lookup("SCOUT_CSV_SEPARATOR") {
            Some(value) => match value.as_bytes() {
                [byte] => *byte,
                _ => anyhow::bail!("SCOUT_CSV_SEPARATOR must be a single ASCII character"),
            },
            None => defaults.csv_separator,
        };

        Ok(Self {
            scraper: ScraperConfig {
                base_url: lookup("SCOUT_BASE_URL").unwrap_or(defaults.scraper.base_url),
                page_increment,
                max_pages,
            },
            data_dir: lookup("SCOUT_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            csv_separator,
            rate_url: lookup("SCOUT_RATE_URL").unwrap_or(defaults.rate_url),
            http_timeout,
        })
    }
}
