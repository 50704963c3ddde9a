use serde::{Deserialize, Serialize};

/// One row of search results
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Listing {
    pub title: Option<String>,
    pub price: Option<String>,
    #[serde(rename = "post_link")]
    pub detail_url: Option<String>,
    #[serde(rename = "image_link")]
    pub image_url: Option<String>,
}

/// Kind of item a detail page describes, sniffed from its content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    General,
    Vehicle,
    RealEstate,
}

/// Fields that only exist for some categories.
///
/// Serialized inline into the owning record: the variant becomes the
/// `category` key and missing fields are left out instead of written as null.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum CategoryDetails {
    General,
    Vehicle {
        #[serde(skip_serializing_if = "Option::is_none")]
        year: Option<String>,
        #[serde(rename = "km", skip_serializing_if = "Option::is_none")]
        distance_text: Option<String>,
    },
    RealEstate {
        #[serde(rename = "m2", skip_serializing_if = "Option::is_none")]
        area_text: Option<String>,
    },
}

impl CategoryDetails {
    pub fn category(&self) -> Category {
        match self {
            CategoryDetails::General => Category::General,
            CategoryDetails::Vehicle { .. } => Category::Vehicle,
            CategoryDetails::RealEstate { .. } => Category::RealEstate,
        }
    }
}

/// Everything scraped from one item's detail page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailRecord {
    pub title: Option<String>,
    #[serde(rename = "price")]
    pub price_text: Option<String>,
    pub publication_date: Option<String>,
    #[serde(rename = "author")]
    pub seller: Option<String>,
    #[serde(rename = "link")]
    pub canonical_link: Option<String>,
    #[serde(rename = "shipping")]
    pub shipping_note: Option<String>,
    #[serde(flatten)]
    pub details: CategoryDetails,
}

impl DetailRecord {
    pub fn category(&self) -> Category {
        self.details.category()
    }
}

/// Records that carry a price string which can be converted
pub trait PriceSource {
    fn price_text(&self) -> Option<&str>;
}

impl PriceSource for Listing {
    fn price_text(&self) -> Option<&str> {
        self.price.as_deref()
    }
}

impl PriceSource for DetailRecord {
    fn price_text(&self) -> Option<&str> {
        self.price_text.as_deref()
    }
}

/// A record plus the prices derived from its price string.
///
/// The derived fields are only written when a conversion happened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Priced<T> {
    #[serde(flatten)]
    pub item: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_pesos: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_usd: Option<f64>,
}

impl<T> Priced<T> {
    pub fn unconverted(item: T) -> Self {
        Self {
            item,
            price_pesos: None,
            price_usd: None,
        }
    }

    pub fn is_converted(&self) -> bool {
        self.price_pesos.is_some() && self.price_usd.is_some()
    }
}
