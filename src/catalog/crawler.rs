//! Category page crawler
//!
//! Walks one category listing from its entry page through the pager
//! chain, extracting records and scoring them as they stream by:
//! - Explicit pagination: follow the "next" link until a page has none
//! - Malformed items are skipped with a warning, the page continues
//! - A page fetch failure abandons the category

use crate::catalog::extractor::{extract_record, ITEM_SELECTOR};
use crate::catalog::record::Record;
use crate::dom::ElementNode;
use crate::fetch::fetch_document;
use crate::matcher::{MatchResult, Matcher};
use crate::Result;
use reqwest::Client;
use std::sync::Arc;
use url::Url;

/// CSS selector for pager links on a listing page.
const PAGER_SELECTOR: &str = "ul.pager a[href]";

/// Everything one category crawl produced.
#[derive(Debug, Default)]
pub struct CategoryCrawl {
    /// Records whose names the matcher accepted, in page order
    pub matches: Vec<MatchResult>,
    /// Every record the category listed, in page order
    pub records: Vec<Record>,
}

/// Crawls the listing pages of a single category.
pub struct PageCrawler {
    client: Client,
    matcher: Arc<Matcher>,
    extended_info: bool,
    follow_pagination: bool,
}

impl PageCrawler {
    /// Creates a crawler that scores extracted records with `matcher`
    ///
    /// # Arguments
    ///
    /// * `client` - Shared HTTP client
    /// * `matcher` - Scoring strategy applied to each record name
    /// * `extended_info` - Extract availability and rating as well
    /// * `follow_pagination` - Walk the full pager chain instead of
    ///   stopping after the entry page
    pub fn new(
        client: Client,
        matcher: Arc<Matcher>,
        extended_info: bool,
        follow_pagination: bool,
    ) -> Self {
        Self {
            client,
            matcher,
            extended_info,
            follow_pagination,
        }
    }

    /// Crawls one category starting at its entry page
    ///
    /// Each page is fetched, its item containers extracted and scored,
    /// and the pager consulted for the next page. Items that fail
    /// extraction are logged and skipped without aborting the page.
    ///
    /// # Returns
    ///
    /// * `Ok(CategoryCrawl)` - All records and matches from the category
    /// * `Err(ScoutError)` - A page could not be fetched
    pub async fn crawl_category(&self, entry_url: Url) -> Result<CategoryCrawl> {
        let mut crawl = CategoryCrawl::default();
        let mut pages = 0usize;
        let mut next_url = Some(entry_url);

        while let Some(page_url) = next_url.take() {
            let document = fetch_document(&self.client, &page_url).await?;
            let root = document.root();
            pages += 1;

            for item in root.find_all(ITEM_SELECTOR) {
                match extract_record(&item, &page_url, self.extended_info) {
                    Ok(record) => {
                        if let Some(score) = self.matcher.score(&record.name) {
                            crawl.matches.push(MatchResult {
                                score,
                                record: record.clone(),
                            });
                        }
                        crawl.records.push(record);
                    }
                    Err(e) => {
                        tracing::warn!(page = %page_url, error = %e, "Skipping malformed listing item");
                    }
                }
            }

            if self.follow_pagination {
                next_url = next_page_url(&root, &page_url);
            }
        }

        tracing::debug!(
            pages,
            records = crawl.records.len(),
            matches = crawl.matches.len(),
            "Category crawl complete"
        );
        Ok(crawl)
    }
}

/// Resolves the pager's "next" link against the current page URL
fn next_page_url<N: ElementNode>(root: &N, page_url: &Url) -> Option<Url> {
    root.find_all(PAGER_SELECTOR)
        .into_iter()
        .find(|link| link.text_content().trim() == "next")
        .and_then(|link| link.attribute("href"))
        .and_then(|href| page_url.join(&href).ok())
}
