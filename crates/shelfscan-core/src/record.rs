//! The canonical scraped-product record and its raw, pre-normalization form.

use std::fmt;

use crate::normalize::{clamp_rating, clean_string, parse_price};

/// Column order for the per-query CSV resource.
///
/// The writer emits this list as the header row and the reader consumes rows
/// positionally against it. The list is deliberately a static declaration
/// shared by both sides rather than anything derived from the struct at
/// runtime.
pub const FIELD_NAMES: [&str; 9] = [
    "query",
    "title",
    "url",
    "is_sponsored",
    "currency_symbol",
    "price_unit",
    "price",
    "list_price",
    "rating",
];

/// One result block as pulled off the page, before any field coercion.
///
/// Price fields may still carry currency symbols and thousands separators
/// (`"$1,299.00"`). Instances are transient: each is consumed by
/// [`ProductRecord::from_raw`] as soon as it is produced.
#[derive(Debug, Clone)]
pub struct RawProduct {
    pub query: String,
    pub title: String,
    pub url: String,
    pub is_sponsored: bool,
    pub currency_symbol: String,
    /// Raw price text, e.g. `"$19.99"`.
    pub price: String,
    /// Raw strike-through/list price text; equals `price` when the page
    /// showed only one price element.
    pub list_price: String,
    pub rating: f64,
}

/// A fully-normalized scrape result, the unit persisted to storage.
///
/// Construction via [`ProductRecord::from_raw`] is the only normalization
/// pass; records are never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub query: String,
    pub title: String,
    pub url: String,
    pub is_sponsored: bool,
    pub currency_symbol: String,
    /// Mirrors `currency_symbol` as captured at construction time.
    pub price_unit: String,
    pub price: f64,
    pub list_price: f64,
    /// Star rating in `0.0..=5.0`; `0.0` when no rating was present.
    pub rating: f64,
}

impl ProductRecord {
    /// Normalizes a raw extraction into its canonical form.
    ///
    /// Price fields are coerced from their raw text before any placeholder
    /// substitution can touch them; string fields are then trimmed, with
    /// blank values replaced by a `"No <field> provided"` placeholder.
    #[must_use]
    pub fn from_raw(raw: RawProduct) -> Self {
        let price = parse_price(&raw.price);
        let list_price = parse_price(&raw.list_price);
        let price_unit = raw.currency_symbol.clone();
        Self {
            query: clean_string("query", &raw.query),
            title: clean_string("title", &raw.title),
            url: clean_string("url", &raw.url),
            is_sponsored: raw.is_sponsored,
            currency_symbol: clean_string("currency_symbol", &raw.currency_symbol),
            price_unit: clean_string("price_unit", &price_unit),
            price,
            list_price,
            rating: clamp_rating(raw.rating),
        }
    }

    /// Serializes the record as one CSV row, columns in [`FIELD_NAMES`] order.
    /// Booleans take their literal textual form, floats their decimal form.
    #[must_use]
    pub fn to_row(&self) -> [String; 9] {
        [
            self.query.clone(),
            self.title.clone(),
            self.url.clone(),
            self.is_sponsored.to_string(),
            self.currency_symbol.clone(),
            self.price_unit.clone(),
            self.price.to_string(),
            self.list_price.to_string(),
            self.rating.to_string(),
        ]
    }

    /// Rebuilds a record from one CSV row in [`FIELD_NAMES`] order.
    ///
    /// Booleans are re-derived from their serialized text and floats from
    /// their decimal form; unparsable numerics fall back to the same `0.0`
    /// default that construction applies.
    #[must_use]
    pub fn from_row(fields: [&str; 9]) -> Self {
        Self {
            query: fields[0].to_string(),
            title: fields[1].to_string(),
            url: fields[2].to_string(),
            is_sponsored: fields[3].trim().eq_ignore_ascii_case("true"),
            currency_symbol: fields[4].to_string(),
            price_unit: fields[5].to_string(),
            price: fields[6].trim().parse().unwrap_or(0.0),
            list_price: fields[7].trim().parse().unwrap_or(0.0),
            rating: fields[8].trim().parse().unwrap_or(0.0),
        }
    }
}

impl fmt::Display for ProductRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Query: {}", self.query)?;
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "URL: {}", self.url)?;
        writeln!(f, "Sponsored: {}", self.is_sponsored)?;
        writeln!(f, "Currency: {}", self.currency_symbol)?;
        writeln!(f, "Price Unit: {}", self.price_unit)?;
        writeln!(f, "Price: {}", self.price)?;
        writeln!(f, "List Price: {}", self.list_price)?;
        write!(f, "Rating: {}", self.rating)
    }
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;
