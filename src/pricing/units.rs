use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::pricing::locale::THOUSANDS_SEPARATOR;

/// Area unit symbol used on real-estate pages.
pub const AREA_UNIT: &str = "m²";
/// Distance unit used in vehicle subtitles.
pub const DISTANCE_UNIT: &str = "km";

lazy_static! {
    static ref AREA_NUMBER: Regex = Regex::new(r"([\d.,]+)\s*m²").unwrap();
}

/// Odometer reading in kilometers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distance {
    pub value: u64,
}

impl Distance {
    /// Parse text like `"50.000 km"`. Returns `None` rather than zero when
    /// nothing numeric is left.
    pub fn parse(text: &str) -> Option<Self> {
        let cleaned: String = text
            .replace(DISTANCE_UNIT, "")
            .chars()
            .filter(|c| *c != THOUSANDS_SEPARATOR)
            .collect();
        let cleaned = cleaned.trim();
        if cleaned.is_empty() {
            return None;
        }
        cleaned.parse().ok().map(|value| Self { value })
    }
}

/// Surface in square meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub value: f64,
}

impl Area {
    /// Parse text like `"1.500 m² totales"`. The unit marker is required.
    pub fn parse(text: &str) -> Option<Self> {
        let number = AREA_NUMBER.captures(text)?.get(1)?.as_str();
        let number = number.replace(THOUSANDS_SEPARATOR, "").replace(',', ".");
        number.parse().ok().map(|value| Self { value })
    }
}
