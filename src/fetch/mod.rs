//! HTTP fetch primitive for catalog pages
//!
//! This module handles all HTTP requests for the search engine:
//! - Building the HTTP client with a proper user agent string
//! - GET requests that return a parsed [`HtmlDocument`]
//! - Error classification into [`ScoutError`] variants

use crate::dom::HtmlDocument;
use crate::ScoutError;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// User agent sent with every catalog request.
const USER_AGENT: &str = concat!("bookscout/", env!("CARGO_PKG_VERSION"));

/// Builds an HTTP client with proper configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a catalog page and parses it into a document
///
/// A non-success HTTP status is an error here; callers decide whether the
/// failure is fatal (root page) or recoverable (one category).
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The absolute page URL to fetch
///
/// # Returns
///
/// * `Ok(HtmlDocument)` - Parsed page content
/// * `Err(ScoutError)` - Network failure or non-success status
pub async fn fetch_document(client: &Client, url: &Url) -> Result<HtmlDocument, ScoutError> {
    tracing::debug!("Fetching {}", url);

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| ScoutError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScoutError::HttpStatus {
            url: url.to_string(),
            status_code: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|source| ScoutError::Http {
        url: url.to_string(),
        source,
    })?;

    Ok(HtmlDocument::parse(&body))
}
