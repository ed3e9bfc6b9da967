//! Catalog item record and extraction error types

use serde::Serialize;
use thiserror::Error;

/// One structured catalog item
///
/// Identity is the absolute `url`. The name is stored lower-cased at
/// extraction time, which is also the key format of the precomputed
/// name-vector table and of server response payloads. Records are
/// immutable once created and live until their snapshot is replaced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Absolute item URL, unique within a snapshot
    pub url: String,

    /// Lower-cased display name
    pub name: String,

    /// Price with the currency symbol stripped
    pub price: f64,

    /// In-stock flag; only extracted with extended info
    pub availability: Option<bool>,

    /// Star rating 0..=5; only extracted with extended info
    pub rating: Option<u8>,
}

/// Errors raised while turning one listing fragment into a [`Record`]
///
/// These are recovered at record granularity: the crawler logs the failure
/// and skips the item, never the page.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Missing field '{field}' in listing item")]
    MissingField { field: &'static str },

    #[error("Unparseable price '{value}'")]
    Price { value: String },

    #[error("Unknown rating class '{value}'")]
    Rating { value: String },

    #[error("Invalid item URL '{href}': {source}")]
    ItemUrl {
        href: String,
        source: url::ParseError,
    },
}

/// Errors raised while reading the catalog's navigation structure
///
/// Discovery failure is fatal for the whole search call: no categories
/// means nothing to crawl.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Category navigation block not found on root page")]
    NavigationMissing,
}

/// Maps a star-rating class token to its numeric value
///
/// The catalog encodes ratings as the second CSS class on the rating
/// element, spelled out as a word.
pub fn parse_rating(word: &str) -> Option<u8> {
    match word {
        "Zero" => Some(0),
        "One" => Some(1),
        "Two" => Some(2),
        "Three" => Some(3),
        "Four" => Some(4),
        "Five" => Some(5),
        _ => None,
    }
}
