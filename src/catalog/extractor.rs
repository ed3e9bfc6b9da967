//! Record extraction from one listing fragment
//!
//! Turns a single item container on a category listing page into a
//! [`Record`]. Extraction works against the [`ElementNode`] capability
//! contract, so it can run over any parsed node tree.

use crate::catalog::record::{parse_rating, ExtractionError, Record};
use crate::dom::ElementNode;
use url::Url;

/// CSS selector for one item container on a listing page.
pub const ITEM_SELECTOR: &str = "article.product_pod";

/// Extracts one [`Record`] from a listing item fragment
///
/// The mandatory fields are the item link, the display name (taken from
/// the thumbnail's alt text and lower-cased), and the price with its
/// currency prefix dropped. With `extended_info` the availability phrase
/// and the star rating are read from the pricing region as well.
///
/// # Arguments
///
/// * `item` - The item container element
/// * `page_url` - URL of the listing page, for resolving the item link
/// * `extended_info` - Also extract availability and rating
///
/// # Returns
///
/// * `Ok(Record)` - Fully extracted record
/// * `Err(ExtractionError)` - A field is missing or malformed; callers
///   skip the item and continue the page
pub fn extract_record<N: ElementNode>(
    item: &N,
    page_url: &Url,
    extended_info: bool,
) -> Result<Record, ExtractionError> {
    let href = item
        .find_first("a[href]")
        .and_then(|link| link.attribute("href"))
        .ok_or(ExtractionError::MissingField { field: "url" })?;

    let url = page_url
        .join(&href)
        .map_err(|source| ExtractionError::ItemUrl { href, source })?
        .to_string();

    let name = item
        .find_first("img.thumbnail")
        .and_then(|img| img.attribute("alt"))
        .ok_or(ExtractionError::MissingField { field: "name" })?
        .to_lowercase();

    let price = extract_price(item)?;

    let (availability, rating) = if extended_info {
        (
            Some(extract_availability(item)?),
            Some(extract_rating(item)?),
        )
    } else {
        (None, None)
    };

    Ok(Record {
        url,
        name,
        price,
        availability,
        rating,
    })
}

/// Reads the price text and parses it with the currency prefix dropped
fn extract_price<N: ElementNode>(item: &N) -> Result<f64, ExtractionError> {
    let raw = item
        .find_first("p.price_color")
        .map(|node| node.text_content())
        .ok_or(ExtractionError::MissingField { field: "price" })?;

    let raw = raw.trim();
    let digits = raw.trim_start_matches(|c: char| !c.is_ascii_digit());
    digits.parse::<f64>().map_err(|_| ExtractionError::Price {
        value: raw.to_string(),
    })
}

/// True when the stock phrase reads exactly "In stock"
fn extract_availability<N: ElementNode>(item: &N) -> Result<bool, ExtractionError> {
    let phrase = item
        .find_first("p.instock.availability")
        .map(|node| node.text_content())
        .ok_or(ExtractionError::MissingField {
            field: "availability",
        })?;

    Ok(phrase.trim() == "In stock")
}

/// Reads the star rating from the rating element's class list
fn extract_rating<N: ElementNode>(item: &N) -> Result<u8, ExtractionError> {
    let classes = item
        .find_first("p.star-rating")
        .and_then(|node| node.attribute("class"))
        .ok_or(ExtractionError::MissingField { field: "rating" })?;

    let word = classes
        .split_whitespace()
        .find(|token| *token != "star-rating")
        .ok_or(ExtractionError::MissingField { field: "rating" })?;

    parse_rating(word).ok_or_else(|| ExtractionError::Rating {
        value: word.to_string(),
    })
}
