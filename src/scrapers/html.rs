//! Small helpers over `scraper` shared by the page extractors.

use scraper::{ElementRef, Html, Selector};

const SKIPPED_TAGS: [&str; 3] = ["script", "style", "noscript"];

/// Parse a CSS selector; an invalid one simply matches nothing.
pub fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

/// First element under `scope` matching `css`
pub fn select_first<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = selector(css)?;
    let found = scope.select(&selector).next();
    found
}

/// All text below an element, concatenated
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Trimmed text of the first match, `None` when absent or blank
pub fn first_text(scope: ElementRef<'_>, css: &str) -> Option<String> {
    select_first(scope, css)
        .map(|el| element_text(el).trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Text held directly by an element, ignoring its children's text
pub fn own_text(element: ElementRef<'_>) -> String {
    element
        .children()
        .filter_map(|child| child.value().as_text())
        .map(|text| &**text)
        .collect()
}

/// First element in document order whose own text contains `needle`
pub fn find_element_with_text<'a>(document: &'a Html, needle: &str) -> Option<ElementRef<'a>> {
    let all = selector("body *")?;
    let found = document
        .select(&all)
        .filter(|el| !SKIPPED_TAGS.contains(&el.value().name()))
        .find(|el| own_text(*el).contains(needle));
    found
}

/// The page's full text, as one string with no separators added
pub fn page_text(document: &Html) -> String {
    document.root_element().text().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_own_text_ignores_children() {
        let html = Html::parse_fragment("<div>Llega <b>mañana</b></div>");
        let div = html.select(&selector("div").unwrap()).next().unwrap();
        assert_eq!(own_text(div), "Llega ");
        assert_eq!(element_text(div), "Llega mañana");
    }

    #[test]
    fn test_find_element_with_text_skips_scripts() {
        let html = Html::parse_document(
            r#"<html><body><script>var a = "50 m²";</script><p><span>80 m² totales</span></p></body></html>"#,
        );
        let found = find_element_with_text(&html, "m²").unwrap();
        assert_eq!(found.value().name(), "span");
        assert_eq!(element_text(found), "80 m² totales");
    }

    #[test]
    fn test_first_text_blank_is_none() {
        let html = Html::parse_document("<html><body><h1> </h1></body></html>");
        assert_eq!(first_text(html.root_element(), "h1"), None);
        assert_eq!(first_text(html.root_element(), "h2"), None);
    }
}
