//! Search engine orchestration
//!
//! [`SearchEngine`] owns everything a search needs: the HTTP client,
//! the snapshot cache, and the embedding artifacts. One search runs as:
//! 1. Serve from the cached snapshot while it is fresh, rescanning it
//!    against the current query
//! 2. Otherwise acquire the refresh gate, re-check the cache, and
//!    recrawl the catalog with one task per category
//! 3. In hybrid mode, fall back to a lexical rescan of the snapshot
//!    when embedding scoring matched nothing
//! 4. Rank the matches and cut to the configured top K

pub mod cache;
pub mod ranker;

pub use cache::{Snapshot, SnapshotCache};
pub use ranker::rank_top_k;

use crate::catalog::{discover_categories, PageCrawler, Record};
use crate::config::{Config, SearchMode};
use crate::embedding::model::{NameVectors, WordVectors};
use crate::embedding::EmbeddingError;
use crate::fetch::{build_http_client, fetch_document};
use crate::matcher::{MatchResult, Matcher};
use crate::Result;
use futures::future::join_all;
use reqwest::Client;
use std::path::Path;
use std::sync::Arc;
use url::Url;

/// Catalog search over a cached crawl snapshot.
pub struct SearchEngine {
    config: Arc<Config>,
    client: Client,
    root_url: Url,
    cache: SnapshotCache,
    word_vectors: Option<Arc<WordVectors>>,
    name_vectors: Option<Arc<NameVectors>>,
}

impl SearchEngine {
    /// Builds an engine from validated configuration
    ///
    /// Embedding artifacts are loaded eagerly so a bad model path fails
    /// here rather than on the first query.
    ///
    /// # Arguments
    ///
    /// * `config` - Validated application configuration
    ///
    /// # Returns
    ///
    /// * `Ok(SearchEngine)` - Ready to serve searches
    /// * `Err(ScoutError)` - Client construction, root URL parsing, or
    ///   artifact loading failed
    pub fn new(config: Config) -> Result<Self> {
        let client = build_http_client()?;
        let root_url = Url::parse(&config.catalog.root_url)?;

        let (word_vectors, name_vectors) = match config.search.mode {
            SearchMode::Lexical => (None, None),
            SearchMode::Embedding | SearchMode::Hybrid => {
                let model_path = config
                    .embedding
                    .model_path
                    .as_deref()
                    .ok_or(EmbeddingError::ModelNotConfigured)?;
                let vectors = Arc::new(WordVectors::load(Path::new(model_path))?);

                let names = match config.embedding.name_vectors_path.as_deref() {
                    Some(path) => {
                        let table = NameVectors::load(Path::new(path))?;
                        table.validate_dimension(vectors.dimension())?;
                        Some(Arc::new(table))
                    }
                    None => None,
                };
                (Some(vectors), names)
            }
        };

        let cache = SnapshotCache::new(config.cache.ttl_seconds);

        Ok(Self {
            config: Arc::new(config),
            client,
            root_url,
            cache,
            word_vectors,
            name_vectors,
        })
    }

    /// The configuration this engine was built from
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs one search against the catalog
    ///
    /// The query is trimmed and lower-cased before scoring. A fresh
    /// snapshot is rescanned directly; otherwise the catalog is
    /// recrawled behind the refresh gate. Matching happens during the
    /// crawl itself, so a recrawl pays no second pass over the records.
    ///
    /// # Arguments
    ///
    /// * `query` - Raw query text
    /// * `extended_info` - Extract availability and rating per record
    /// * `search_all_pages` - Follow pagination past each category's
    ///   entry page
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<MatchResult>)` - At most top-K matches
    /// * `Err(ScoutError)` - Root page fetch, category discovery, or
    ///   matcher construction failed
    pub async fn search(
        &self,
        query: &str,
        extended_info: bool,
        search_all_pages: bool,
    ) -> Result<Vec<MatchResult>> {
        let query = query.trim().to_lowercase();
        let top_k = self.config.search.top_k;

        if let Some(snapshot) = self.cache.fresh_snapshot() {
            tracing::debug!(
                age_seconds = snapshot.age().num_seconds(),
                "Serving search from cached snapshot"
            );
            let matches = self.scan_snapshot(&query, &snapshot.records)?;
            return Ok(rank_top_k(matches, top_k));
        }

        let _refresh = self.cache.lock_refresh().await;

        // Another search may have refreshed while this one waited
        if let Some(snapshot) = self.cache.fresh_snapshot() {
            let matches = self.scan_snapshot(&query, &snapshot.records)?;
            return Ok(rank_top_k(matches, top_k));
        }

        let (matches, records) = self
            .crawl_catalog(&query, extended_info, search_all_pages)
            .await?;
        let snapshot = self.cache.store(records);

        let matches = if matches.is_empty() && self.config.search.mode == SearchMode::Hybrid {
            tracing::info!("No embedding matches, rescanning snapshot lexically");
            self.scan_with(&Matcher::lexical(&query), &snapshot.records)
        } else {
            matches
        };

        Ok(rank_top_k(matches, top_k))
    }

    /// Scores a snapshot's records against the query, with the hybrid
    /// lexical fallback when embedding scoring matched nothing
    fn scan_snapshot(&self, query: &str, records: &[Record]) -> Result<Vec<MatchResult>> {
        let matcher = self.build_matcher(query)?;
        let matches = self.scan_with(&matcher, records);
        if matches.is_empty() && self.config.search.mode == SearchMode::Hybrid {
            tracing::debug!("No embedding matches, rescanning snapshot lexically");
            return Ok(self.scan_with(&Matcher::lexical(query), records));
        }
        Ok(matches)
    }

    fn scan_with(&self, matcher: &Matcher, records: &[Record]) -> Vec<MatchResult> {
        records
            .iter()
            .filter_map(|record| {
                matcher.score(&record.name).map(|score| MatchResult {
                    score,
                    record: record.clone(),
                })
            })
            .collect()
    }

    /// Builds the primary matcher for the configured search mode
    fn build_matcher(&self, query: &str) -> Result<Matcher> {
        match self.config.search.mode {
            SearchMode::Lexical => Ok(Matcher::lexical(query)),
            SearchMode::Embedding | SearchMode::Hybrid => {
                let vectors = self
                    .word_vectors
                    .as_ref()
                    .ok_or(EmbeddingError::ModelNotConfigured)?;
                Ok(Matcher::embedding(
                    query,
                    Arc::clone(vectors),
                    self.name_vectors.clone(),
                    self.config.search.threshold(),
                    self.config.search.match_absolute_similarity,
                    self.config.embedding.remove_stop_words,
                ))
            }
        }
    }

    /// Recrawls the whole catalog, one task per category
    ///
    /// The root page and category discovery are fatal when they fail;
    /// individual categories are not. A failed category is logged and
    /// dropped while the rest merge in category-name order.
    async fn crawl_catalog(
        &self,
        query: &str,
        extended_info: bool,
        search_all_pages: bool,
    ) -> Result<(Vec<MatchResult>, Vec<Record>)> {
        tracing::info!(url = %self.root_url, "Refreshing catalog snapshot");

        // The parsed page is not Send, so it must go before the fan-out
        let categories = {
            let document = fetch_document(&self.client, &self.root_url).await?;
            discover_categories(&document.root())?
        };
        tracing::info!(categories = categories.len(), "Discovered categories");

        let matcher = Arc::new(self.build_matcher(query)?);

        let mut handles = Vec::with_capacity(categories.len());
        for (name, href) in categories {
            let entry_url = match self.root_url.join(&href) {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!(
                        category = %name,
                        href = %href,
                        error = %e,
                        "Skipping category with unresolvable link"
                    );
                    continue;
                }
            };
            let crawler = PageCrawler::new(
                self.client.clone(),
                Arc::clone(&matcher),
                extended_info,
                search_all_pages,
            );
            handles.push(tokio::spawn(async move {
                let outcome = crawler.crawl_category(entry_url).await;
                (name, outcome)
            }));
        }

        let mut matches = Vec::new();
        let mut records = Vec::new();
        for joined in join_all(handles).await {
            match joined {
                Ok((name, Ok(crawl))) => {
                    tracing::debug!(
                        category = %name,
                        records = crawl.records.len(),
                        "Merged category"
                    );
                    matches.extend(crawl.matches);
                    records.extend(crawl.records);
                }
                Ok((name, Err(e))) => {
                    tracing::warn!(category = %name, error = %e, "Skipping failed category");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Category task did not complete");
                }
            }
        }

        tracing::info!(
            records = records.len(),
            matches = matches.len(),
            "Catalog crawl complete"
        );
        Ok((matches, records))
    }
}
