use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::models::{PriceSource, Priced};
use crate::pricing::locale::parse_display_price;
use crate::pricing::money::{Currency, ExchangeRate};

/// Source of the USD to local currency rate.
///
/// Implementations report any failure as `None`.
#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    async fn usd_to_local_rate(&self) -> Option<f64>;
}

/// Adds local and USD prices to scraped records
pub struct PriceConversionService<P> {
    provider: P,
}

impl<P: ExchangeRateProvider> PriceConversionService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Convert the whole batch with a single rate fetch.
    ///
    /// A missing or invalid rate leaves every item unconverted. Items whose
    /// price cannot be parsed are passed through without derived prices.
    pub async fn convert_prices<T: PriceSource>(&self, items: Vec<T>) -> Vec<Priced<T>> {
        let rate = match ExchangeRate::from_fetched(self.provider.usd_to_local_rate().await) {
            Ok(rate) => rate,
            Err(e) => {
                error!("Could not obtain a usable exchange rate: {}", e);
                return items.into_iter().map(Priced::unconverted).collect();
            }
        };

        info!("Exchange rate obtained: {}", rate.value());
        convert_batch(items, rate)
    }
}

/// Convert every item with an already validated rate.
pub fn convert_batch<T: PriceSource>(items: Vec<T>, rate: ExchangeRate) -> Vec<Priced<T>> {
    items
        .into_iter()
        .map(|item| convert_item(item, rate))
        .collect()
}

fn convert_item<T: PriceSource>(item: T, rate: ExchangeRate) -> Priced<T> {
    let money = match item.price_text().map(parse_display_price) {
        Some(Ok(money)) => money,
        Some(Err(e)) => {
            debug!("Skipping price conversion: {}", e);
            return Priced::unconverted(item);
        }
        None => return Priced::unconverted(item),
    };

    let pesos = money.convert_to(Currency::Local, rate).amount();
    let usd = money.convert_to(Currency::Usd, rate).amount();

    Priced {
        item,
        price_pesos: Some(pesos),
        price_usd: Some(usd),
    }
}
