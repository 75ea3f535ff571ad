//! Result-block extraction from a fetched search page.
//!
//! Extraction is defensive throughout: the absence of any sub-element
//! (price, rating, link) never aborts a block, and a malformed block at
//! worst contributes default field values. Only a block with no title text
//! is skipped entirely, since it cannot produce a meaningful record.

use scraper::{ElementRef, Html, Selector};

use shelfscan_core::RawProduct;

use crate::client::SEARCH_ORIGIN;

/// Class marking an advertisement placeholder block. These are excluded from
/// extraction entirely, before any record is considered.
const AD_HOLDER_CLASS: &str = "AdHolder";

/// Class of the label span rendered inside sponsored (but genuine) result
/// blocks. Distinct from the ad-placeholder exclusion above: a sponsored
/// block still yields a record, flagged as such.
const SPONSORED_LABEL_SELECTOR: &str = "span.puis-sponsored-label-text";

struct Selectors {
    result_block: Selector,
    title: Selector,
    title_link: Selector,
    currency_symbol: Selector,
    price: Selector,
    rating: Selector,
    sponsored_label: Selector,
}

impl Selectors {
    fn new() -> Self {
        // all patterns are static literals; parse cannot fail
        Self {
            result_block: Selector::parse(r#"div[data-component-type="s-search-result"]"#)
                .expect("valid result-block selector"),
            title: Selector::parse("h2").expect("valid title selector"),
            title_link: Selector::parse("h2 a").expect("valid title-link selector"),
            currency_symbol: Selector::parse("span.a-price-symbol")
                .expect("valid currency selector"),
            price: Selector::parse("span.a-offscreen").expect("valid price selector"),
            rating: Selector::parse("span.a-icon-alt").expect("valid rating selector"),
            sponsored_label: Selector::parse(SPONSORED_LABEL_SELECTOR)
                .expect("valid sponsored-label selector"),
        }
    }
}

/// Extracts every genuine result block on a page into raw product values,
/// in the order the blocks appear.
///
/// Ad placeholder blocks (and result blocks nested inside one) contribute
/// nothing. An empty vec is a valid outcome for a successfully fetched page.
#[must_use]
pub fn extract_products(body: &str, query: &str) -> Vec<RawProduct> {
    let document = Html::parse_document(body);
    let selectors = Selectors::new();

    document
        .select(&selectors.result_block)
        .filter(|block| !in_ad_holder(*block))
        .filter_map(|block| extract_block(block, query, &selectors))
        .collect()
}

/// Pulls one raw product out of a single result block, or `None` when the
/// block carries no title text.
fn extract_block(block: ElementRef<'_>, query: &str, selectors: &Selectors) -> Option<RawProduct> {
    let title_el = block.select(&selectors.title).next()?;
    let title = element_text(title_el);
    if title.is_empty() {
        return None;
    }

    let url = block
        .select(&selectors.title_link)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(absolute_url)
        .unwrap_or_default();

    let is_sponsored = block.select(&selectors.sponsored_label).next().is_some();

    let currency_symbol = block
        .select(&selectors.currency_symbol)
        .next()
        .map(element_text)
        .unwrap_or_default();

    let prices: Vec<String> = block.select(&selectors.price).map(element_text).collect();
    let price = prices.first().cloned().unwrap_or_else(|| "0".to_string());
    let list_price = prices.get(1).cloned().unwrap_or_else(|| price.clone());

    // rating text reads like "4.5 out of 5 stars"; the leading 3 chars are
    // the numeric part
    let rating = block
        .select(&selectors.rating)
        .next()
        .map(|el| element_text(el).chars().take(3).collect::<String>())
        .unwrap_or_else(|| "0.0".to_string())
        .parse()
        .unwrap_or(0.0);

    Some(RawProduct {
        query: query.to_string(),
        title,
        url,
        is_sponsored,
        currency_symbol,
        price,
        list_price,
        rating,
    })
}

/// Collected, trimmed text content of an element.
fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Resolves a result link against the search origin; absolute links pass
/// through unchanged.
fn absolute_url(href: &str) -> String {
    if href.starts_with('/') {
        format!("{SEARCH_ORIGIN}{href}")
    } else {
        href.to_string()
    }
}

/// Whether a matched block is an ad placeholder or sits inside one.
/// Equivalent to dropping every ad-holder subtree before matching.
fn in_ad_holder(element: ElementRef<'_>) -> bool {
    if has_class(element, AD_HOLDER_CLASS) {
        return true;
    }
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| has_class(ancestor, AD_HOLDER_CLASS))
}

fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
