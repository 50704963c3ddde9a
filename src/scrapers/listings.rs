use crate::models::Listing;
use crate::scrapers::html::{first_text, select_first, selector};
use scraper::{ElementRef, Html};

const LISTING_ITEM: &str = "li.ui-search-layout__item";
const TOTAL_RESULTS: &str = "span.ui-search-search-result__quantity-results";
const CURRENCY_SYMBOL: &str = "span.andes-money-amount__currency-symbol";
const PRICE_FRACTION: &str = "span.andes-money-amount__fraction";

fn listing_elements(document: &Html) -> Vec<ElementRef<'_>> {
    match selector(LISTING_ITEM) {
        Some(items) => document.select(&items).collect(),
        None => Vec::new(),
    }
}

/// Number of result cards on a page
pub fn count_listing_items(document: &Html) -> usize {
    listing_elements(document).len()
}

/// Total number of results the site reports, 0 when unreadable.
///
/// The counter reads like `"1.234 resultados"`.
pub fn extract_total_results(document: &Html) -> usize {
    first_text(document.root_element(), TOTAL_RESULTS)
        .and_then(|text| {
            let first = text.split_whitespace().next()?;
            first.replace(['.', ','], "").parse().ok()
        })
        .unwrap_or(0)
}

/// Every listing card on a results page, in page order
pub fn extract_listings(document: &Html) -> Vec<Listing> {
    listing_elements(document)
        .into_iter()
        .map(extract_listing)
        .collect()
}

fn extract_listing(card: ElementRef<'_>) -> Listing {
    let price = first_text(card, PRICE_FRACTION).map(|amount| match first_text(card, CURRENCY_SYMBOL) {
        Some(symbol) => format!("{} {}", symbol, amount),
        None => amount,
    });

    let detail_url = select_first(card, "a")
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string);

    let image_url = select_first(card, "img").and_then(|img| {
        img.value()
            .attr("data-src")
            .or_else(|| img.value().attr("src"))
            .map(str::to_string)
    });

    Listing {
        title: first_text(card, "h2"),
        price,
        detail_url,
        image_url,
    }
}
