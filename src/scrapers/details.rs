use crate::models::{Category, CategoryDetails, DetailRecord};
use crate::pricing::units::AREA_UNIT;
use crate::scrapers::category::{detect_category, SUBTITLE};
use crate::scrapers::html::{element_text, find_element_with_text, first_text, page_text, select_first};
use crate::scrapers::traits::Page;
use lazy_static::lazy_static;
use regex::Regex;
use scraper::Html;

const TITLE: &str = "h1.ui-pdp-title";
const CURRENCY_SYMBOL: &str = "span.andes-money-amount__currency-symbol";
const PRICE_FRACTION: &str = "span.andes-money-amount__fraction";
const SELLER: &str = "div.ui-pdp-seller-validated";
const CANONICAL_LINK: &str = r#"link[rel="canonical"]"#;
const ARRIVAL_KEYWORD: &str = "Llega";

lazy_static! {
    static ref MARKDOWN_LINK: Regex = Regex::new(r"\[.*\]\((.*)\)").unwrap();
}

const SEGMENT_SEPARATOR: char = '·';
const YEAR_DISTANCE_SEPARATOR: char = '|';

/// Extract a full record from a fetched detail page
pub fn extract_details_from_page(page: &Page) -> DetailRecord {
    extract_details(&page.document())
}

/// Extract every base field, then the extension chosen by the page category
pub fn extract_details(document: &Html) -> DetailRecord {
    let category = detect_category(&page_text(document), document);

    let details = match category {
        Category::Vehicle => {
            let (year, distance_text) = extract_year_and_distance(document);
            CategoryDetails::Vehicle {
                year,
                distance_text,
            }
        }
        Category::RealEstate => CategoryDetails::RealEstate {
            area_text: extract_area_text(document),
        },
        Category::General => CategoryDetails::General,
    };

    DetailRecord {
        title: extract_title(document),
        price_text: extract_price_text(document),
        publication_date: extract_publication_date(document),
        seller: extract_seller(document),
        canonical_link: extract_canonical_link(document),
        shipping_note: extract_shipping_note(document),
        details,
    }
}

pub fn extract_title(document: &Html) -> Option<String> {
    first_text(document.root_element(), TITLE)
}

/// Currency symbol and amount joined by a space; never half a price
pub fn extract_price_text(document: &Html) -> Option<String> {
    let root = document.root_element();
    let symbol = first_text(root, CURRENCY_SYMBOL)?;
    let amount = first_text(root, PRICE_FRACTION)?;
    Some(format!("{} {}", symbol, amount))
}

fn subtitle_segments(document: &Html) -> Option<Vec<String>> {
    let subtitle = select_first(document.root_element(), SUBTITLE)?;
    Some(
        element_text(subtitle)
            .split(SEGMENT_SEPARATOR)
            .map(|segment| segment.trim().to_string())
            .collect(),
    )
}

pub fn extract_publication_date(document: &Html) -> Option<String> {
    subtitle_segments(document)?.into_iter().nth(1)
}

pub fn extract_seller(document: &Html) -> Option<String> {
    first_text(document.root_element(), SELLER)
}

pub fn extract_canonical_link(document: &Html) -> Option<String> {
    select_first(document.root_element(), CANONICAL_LINK)
        .and_then(|link| link.value().attr("href"))
        .map(format_link_to_markdown)
}

pub fn extract_shipping_note(document: &Html) -> Option<String> {
    find_element_with_text(document, ARRIVAL_KEYWORD).map(|el| element_text(el).trim().to_string())
}

/// Year and distance from a vehicle subtitle like `2020 | 50.000 km · ...`.
/// Both are `None` when the first segment has no pipe.
pub fn extract_year_and_distance(document: &Html) -> (Option<String>, Option<String>) {
    let first_segment = match subtitle_segments(document).and_then(|s| s.into_iter().next()) {
        Some(segment) => segment,
        None => return (None, None),
    };

    match first_segment.split_once(YEAR_DISTANCE_SEPARATOR) {
        Some((year, distance)) => (non_blank(year), non_blank(distance)),
        None => (None, None),
    }
}

/// Text of the first element mentioning the area unit, kept as written
pub fn extract_area_text(document: &Html) -> Option<String> {
    find_element_with_text(document, AREA_UNIT).map(element_text)
}

fn non_blank(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

pub fn format_link_to_markdown(url: &str) -> String {
    format!("[Link]({})", url)
}

pub fn extract_url_from_markdown(markdown: &str) -> Option<String> {
    let url = MARKDOWN_LINK.captures(markdown)?.get(1)?.as_str();
    Some(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const VEHICLE_PAGE: &str = r#"<html>
        <head><link rel="canonical" href="https://auto.example.com/MLA-1"></head>
        <body>
            <h1 class="ui-pdp-title">Volkswagen Gol Trend</h1>
            <span class="ui-pdp-subtitle">2020 | 50.000 km · Publicado hace 2 días</span>
            <span class="andes-money-amount__currency-symbol">U$S</span>
            <span class="andes-money-amount__fraction">15.000</span>
            <div class="ui-pdp-seller-validated">Concesionaria Oficial</div>
        </body></html>"#;

    const PROPERTY_PAGE: &str = r#"<html>
        <head><link rel="canonical" href="https://inmueble.example.com/MLA-2"></head>
        <body>
            <h1 class="ui-pdp-title">Departamento 3 ambientes</h1>
            <span class="ui-pdp-subtitle">Departamento · Publicado hace 5 días</span>
            <span class="andes-money-amount__currency-symbol">U$S</span>
            <span class="andes-money-amount__fraction">120.000</span>
            <span>75 m² totales</span>
        </body></html>"#;

    const GENERAL_PAGE: &str = r#"<html>
        <head><link rel="canonical" href="https://articulo.example.com/MLA-3"></head>
        <body>
            <h1 class="ui-pdp-title">Notebook Gamer</h1>
            <span class="ui-pdp-subtitle">Nuevo · +100 vendidos</span>
            <span class="andes-money-amount__currency-symbol">$</span>
            <span class="andes-money-amount__fraction">1.500.000</span>
            <p><span>Llega gratis mañana</span></p>
        </body></html>"#;

    fn parse(html: &str) -> Html {
        Html::parse_document(html)
    }

    #[test]
    fn test_vehicle_page() {
        let record = extract_details(&parse(VEHICLE_PAGE));

        assert_eq!(record.title.as_deref(), Some("Volkswagen Gol Trend"));
        assert_eq!(record.price_text.as_deref(), Some("U$S 15.000"));
        assert_eq!(record.publication_date.as_deref(), Some("Publicado hace 2 días"));
        assert_eq!(record.seller.as_deref(), Some("Concesionaria Oficial"));
        assert_eq!(
            record.canonical_link.as_deref(),
            Some("[Link](https://auto.example.com/MLA-1)")
        );
        assert_eq!(record.shipping_note, None);
        assert_eq!(
            record.details,
            CategoryDetails::Vehicle {
                year: Some("2020".to_string()),
                distance_text: Some("50.000 km".to_string()),
            }
        );
    }

    #[test]
    fn test_property_page() {
        let record = extract_details(&parse(PROPERTY_PAGE));
        assert_eq!(record.category(), Category::RealEstate);
        assert_eq!(
            record.details,
            CategoryDetails::RealEstate {
                area_text: Some("75 m² totales".to_string()),
            }
        );
        assert_eq!(record.seller, None);
    }

    #[test]
    fn test_general_page() {
        let record = extract_details(&parse(GENERAL_PAGE));
        assert_eq!(record.category(), Category::General);
        assert_eq!(record.price_text.as_deref(), Some("$ 1.500.000"));
        assert_eq!(record.shipping_note.as_deref(), Some("Llega gratis mañana"));
        assert_eq!(record.publication_date.as_deref(), Some("+100 vendidos"));
    }

    #[test]
    fn test_partial_price_is_absent() {
        let html = r#"<html><body>
            <span class="andes-money-amount__fraction">15.000</span>
        </body></html>"#;
        assert_eq!(extract_price_text(&parse(html)), None);
    }

    #[test]
    fn test_single_segment_subtitle_has_no_date() {
        let html = r#"<html><body><span class="ui-pdp-subtitle">Nuevo</span></body></html>"#;
        assert_eq!(extract_publication_date(&parse(html)), None);
    }

    #[test]
    fn test_vehicle_subtitle_without_pipe() {
        let html = r#"<html><body>
            <span class="ui-pdp-subtitle">2020 50.000 km · Publicado hace 2 días</span>
        </body></html>"#;
        let document = parse(html);
        assert_eq!(extract_year_and_distance(&document), (None, None));

        let record = extract_details(&document);
        assert_eq!(record.category(), Category::Vehicle);
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("year").is_none());
        assert!(value.get("km").is_none());
    }

    #[test]
    fn test_empty_page_yields_nulls() {
        let record = extract_details(&parse("<html><body></body></html>"));
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "title": null,
                "price": null,
                "publication_date": null,
                "author": null,
                "link": null,
                "shipping": null,
                "category": "general",
            })
        );
    }

    #[test]
    fn test_markdown_links() {
        let link = format_link_to_markdown("https://example.com");
        assert_eq!(link, "[Link](https://example.com)");
        assert_eq!(
            extract_url_from_markdown(&link).as_deref(),
            Some("https://example.com")
        );
        assert_eq!(extract_url_from_markdown("https://example.com"), None);
    }
}
