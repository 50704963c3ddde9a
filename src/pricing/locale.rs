//! Parsing of marketplace-formatted numbers such as `"U$S 15.000"`.
//!
//! The site writes whole amounts with `.` as the thousands separator and
//! never uses a decimal part, so every `.` is dropped before parsing.

use crate::error::ParseError;
use crate::pricing::money::{Currency, Money};

/// Marker used by the site for US dollar amounts.
pub const FOREIGN_MARKER: &str = "U$S";
/// Marker used by the site for local currency amounts.
pub const LOCAL_MARKER: &str = "$";
/// Digit group separator.
pub const THOUSANDS_SEPARATOR: char = '.';

/// A parsed number plus the currency its marker named, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocaleNumber {
    pub amount: f64,
    pub currency: Option<Currency>,
}

/// Parse a string that may carry one currency marker and thousands separators.
///
/// The foreign marker is checked first because it contains the local one.
pub fn parse_locale_number(text: &str) -> Result<LocaleNumber, ParseError> {
    let (currency, rest) = if text.contains(FOREIGN_MARKER) {
        (Some(Currency::Usd), text.replace(FOREIGN_MARKER, ""))
    } else if text.contains(LOCAL_MARKER) {
        (Some(Currency::Local), text.replace(LOCAL_MARKER, ""))
    } else {
        (None, text.to_string())
    };

    let digits: String = rest.chars().filter(|c| *c != THOUSANDS_SEPARATOR).collect();
    let digits = digits.trim();

    if digits.is_empty() {
        return Err(ParseError::Empty {
            text: text.to_string(),
        });
    }

    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ParseError::NotNumeric {
            text: text.to_string(),
            remainder: digits.to_string(),
        });
    }

    let amount = digits.parse::<f64>().map_err(|_| ParseError::NotNumeric {
        text: text.to_string(),
        remainder: digits.to_string(),
    })?;

    Ok(LocaleNumber { amount, currency })
}

/// Strict price parsing: a marker is required.
pub fn parse_marketplace_price(text: &str) -> Result<Money, ParseError> {
    let parsed = parse_locale_number(text.trim())?;
    match parsed.currency {
        Some(currency) => Ok(Money::new(parsed.amount, currency)),
        None => Err(ParseError::MissingCurrency {
            text: text.to_string(),
        }),
    }
}

/// Lenient price parsing used when displaying and converting prices.
/// Strings without a marker are read as local currency.
pub fn parse_display_price(text: &str) -> Result<Money, ParseError> {
    let parsed = parse_locale_number(text)?;
    Ok(Money::new(
        parsed.amount,
        parsed.currency.unwrap_or(Currency::Local),
    ))
}

/// Render an amount as `$150.000,00`.
pub fn format_price_for_display(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(THOUSANDS_SEPARATOR);
        }
        grouped.push(c);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}${grouped},{frac_part}")
}
