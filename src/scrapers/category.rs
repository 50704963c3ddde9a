use crate::models::Category;
use crate::pricing::units::{AREA_UNIT, DISTANCE_UNIT};
use crate::scrapers::html::{find_element_with_text, page_text, select_first};
use scraper::Html;

pub(crate) const SUBTITLE: &str = "span.ui-pdp-subtitle";

/// Sniff the category of a detail page.
///
/// Vehicle pages need both a subtitle and a standalone distance unit
/// somewhere in the page text; this check wins over the area check.
pub fn detect_category(page_text: &str, document: &Html) -> Category {
    let has_subtitle = select_first(document.root_element(), SUBTITLE).is_some();
    let distance_token = format!(" {} ", DISTANCE_UNIT);

    if has_subtitle && page_text.contains(&distance_token) {
        Category::Vehicle
    } else if find_element_with_text(document, AREA_UNIT).is_some() {
        Category::RealEstate
    } else {
        Category::General
    }
}

/// [`detect_category`] over the document's own text
pub fn detect_document_category(document: &Html) -> Category {
    detect_category(&page_text(document), document)
}
