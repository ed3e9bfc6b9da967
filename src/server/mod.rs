//! HTTP front end for catalog search
//!
//! ## Endpoints
//!
//! - `GET /`: service banner
//! - `GET /help`: usage notes
//! - `GET /search/{query}`: run a search; `all-pages` and `extended`
//!   query parameters tune the crawl and both default to true
//!
//! Handlers share one [`SearchEngine`], so concurrent requests share
//! the snapshot cache and its refresh gate.

use crate::engine::SearchEngine;
use crate::matcher::{MatchResult, MatchScore};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Query parameters accepted by the search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Follow pagination past each category's first page
    #[serde(rename = "all-pages", default = "default_flag")]
    pub all_pages: bool,

    /// Include availability and rating per match
    #[serde(default = "default_flag")]
    pub extended: bool,
}

fn default_flag() -> bool {
    true
}

/// Body of a successful search response.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// The query as received
    pub query: String,
    /// Number of matches returned
    pub count: usize,
    /// Matches keyed by record name
    pub matches: BTreeMap<String, MatchPayload>,
}

/// One match in a [`SearchResponse`].
#[derive(Debug, Serialize)]
pub struct MatchPayload {
    pub url: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    /// Token list for lexical matches, similarity for embedding matches
    pub score: MatchScore,
}

/// Error envelope returned on failed searches.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

/// Error details within an [`ErrorResponse`].
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable error message
    pub message: String,
    /// Error category (e.g. `"upstream_error"`)
    #[serde(rename = "type")]
    pub error_type: String,
}

/// Shared state for axum handlers.
#[derive(Clone)]
struct AppState {
    engine: Arc<SearchEngine>,
}

/// Builds the API router over a shared engine
pub fn router(engine: Arc<SearchEngine>) -> Router {
    Router::new()
        .route("/", get(handle_index))
        .route("/help", get(handle_help))
        .route("/search/{query}", get(handle_search))
        .with_state(AppState { engine })
}

/// Binds the listener and serves the API until the task is stopped
///
/// # Arguments
///
/// * `engine` - Shared search engine
/// * `bind_addr` - Address to listen on, e.g. `127.0.0.1:5000`
pub async fn serve(engine: Arc<SearchEngine>, bind_addr: &str) -> crate::Result<()> {
    let app = router(engine);
    let listener = TcpListener::bind(bind_addr).await?;
    let addr = listener.local_addr()?;
    tracing::info!("Search API listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn handle_index() -> &'static str {
    "bookscout catalog search API. See /help for usage.\n"
}

async fn handle_help() -> &'static str {
    "GET /search/{query}\n\
     Query parameters:\n\
     - all-pages: follow pagination within each category (default true)\n\
     - extended: include availability and star rating (default true)\n"
}

async fn handle_search(
    State(state): State<AppState>,
    Path(query): Path<String>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, Json<ErrorResponse>)> {
    tracing::info!(
        query = %query,
        all_pages = params.all_pages,
        extended = params.extended,
        "Search request"
    );

    match state
        .engine
        .search(&query, params.extended, params.all_pages)
        .await
    {
        Ok(matches) => Ok(Json(build_response(query, matches))),
        Err(e) => {
            tracing::error!(query = %query, error = %e, "Search failed");
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: ErrorBody {
                        message: e.to_string(),
                        error_type: "upstream_error".to_string(),
                    },
                }),
            ))
        }
    }
}

fn build_response(query: String, matches: Vec<MatchResult>) -> SearchResponse {
    let count = matches.len();
    let matches = matches
        .into_iter()
        .map(|result| {
            let MatchResult { score, record } = result;
            (
                record.name,
                MatchPayload {
                    url: record.url,
                    price: record.price,
                    availability: record.availability,
                    rating: record.rating,
                    score,
                },
            )
        })
        .collect();
    SearchResponse {
        query,
        count,
        matches,
    }
}
