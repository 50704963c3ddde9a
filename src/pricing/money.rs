use crate::error::ConversionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Currencies a listing can be priced in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
    /// Argentine peso, the site's local currency
    #[serde(rename = "ARS")]
    Local,
}

impl Currency {
    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Local => "ARS",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Local currency units per 1 USD. Always positive and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangeRate(f64);

impl ExchangeRate {
    pub fn new(rate: f64) -> Result<Self, ConversionError> {
        if rate.is_finite() && rate > 0.0 {
            Ok(Self(rate))
        } else {
            Err(ConversionError::InvalidRate { rate })
        }
    }

    /// Validate a rate as returned by an exchange-rate provider
    pub fn from_fetched(rate: Option<f64>) -> Result<Self, ConversionError> {
        rate.ok_or(ConversionError::MissingRate).and_then(Self::new)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// An amount of money. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Money {
    amount: f64,
    currency: Currency,
}

impl Money {
    pub fn new(amount: f64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Convert into `target`.
    ///
    /// USD to local multiplies without rounding. Local to USD divides and
    /// rounds to the nearest whole dollar, halves away from zero.
    pub fn convert_to(self, target: Currency, rate: ExchangeRate) -> Money {
        if self.currency == target {
            return self;
        }

        match (self.currency, target) {
            (Currency::Usd, Currency::Local) => Money::new(self.amount * rate.value(), target),
            (Currency::Local, Currency::Usd) => {
                Money::new((self.amount / rate.value()).round(), target)
            }
            _ => self,
        }
    }
}

/// Convert `money` with a rate that may be missing or invalid.
pub fn convert(money: Money, target: Currency, rate: Option<f64>) -> Result<Money, ConversionError> {
    let rate = ExchangeRate::from_fetched(rate)?;
    Ok(money.convert_to(target, rate))
}
