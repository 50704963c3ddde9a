pub mod conversion;
pub mod locale;
pub mod money;
pub mod units;

pub use conversion::{ExchangeRateProvider, PriceConversionService};
pub use locale::{
    format_price_for_display, parse_display_price, parse_locale_number, parse_marketplace_price,
};
pub use money::{convert, Currency, ExchangeRate, Money};
pub use units::{Area, Distance};
