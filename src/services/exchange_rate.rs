use crate::pricing::conversion::ExchangeRateProvider;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error};

pub const DOLAR_API_URL: &str = "https://dolarapi.com/v1/dolares/blue";

#[derive(Debug, Deserialize)]
struct RateQuote {
    /// Selling price in local currency per dollar
    venta: f64,
}

/// Reads the USD selling rate from a DolarApi-style endpoint
pub struct DolarApiClient {
    client: Client,
    url: String,
}

impl DolarApiClient {
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .context("Failed to create exchange rate HTTP client")?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    async fn fetch_quote(&self) -> Result<RateQuote> {
        let quote = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("Failed to reach exchange rate API")?
            .error_for_status()
            .context("Exchange rate API returned an error status")?
            .json::<RateQuote>()
            .await
            .context("Failed to decode exchange rate response")?;
        Ok(quote)
    }
}

#[async_trait]
impl ExchangeRateProvider for DolarApiClient {
    async fn usd_to_local_rate(&self) -> Option<f64> {
        match self.fetch_quote().await {
            Ok(quote) => {
                debug!("Fetched exchange rate {}", quote.venta);
                Some(quote.venta)
            }
            Err(e) => {
                error!("Error getting the USD exchange rate: {:#}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn client(url: String) -> DolarApiClient {
        DolarApiClient::new(url, None).unwrap()
    }

    #[tokio::test]
    async fn test_reads_selling_rate() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/dolares/blue")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"moneda":"USD","casa":"blue","compra":1180,"venta":1205.5}"#)
            .create_async()
            .await;

        let rate = client(format!("{}/v1/dolares/blue", server.url()))
            .usd_to_local_rate()
            .await;

        assert_eq!(rate, Some(1205.5));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error_is_none() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/dolares/blue")
            .with_status(500)
            .create_async()
            .await;

        let rate = client(format!("{}/v1/dolares/blue", server.url()))
            .usd_to_local_rate()
            .await;
        assert_eq!(rate, None);
    }

    #[tokio::test]
    async fn test_malformed_body_is_none() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/dolares/blue")
            .with_status(200)
            .with_body(r#"{"compra":1180}"#)
            .create_async()
            .await;

        let rate = client(format!("{}/v1/dolares/blue", server.url()))
            .usd_to_local_rate()
            .await;
        assert_eq!(rate, None);
    }
}
