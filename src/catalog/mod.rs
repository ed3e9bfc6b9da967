//! Catalog discovery and crawling
//!
//! This module turns the remote catalog into records:
//! - [`discovery`]: finds the category navigation on the root page
//! - [`crawler`]: walks one category's listing pages in order
//! - [`extractor`]: turns a listing item fragment into a [`Record`]
//! - [`record`]: the extracted item type and its error taxonomy
//!
//! Categories are crawled independently, so one broken category never
//! takes the rest of the catalog down with it.

pub mod crawler;
pub mod discovery;
pub mod extractor;
pub mod record;

pub use crawler::{CategoryCrawl, PageCrawler};
pub use discovery::{discover_categories, CategoryMap};
pub use extractor::extract_record;
pub use record::{DiscoveryError, ExtractionError, Record};
