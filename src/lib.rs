//! Bookscout: a hybrid catalog search engine
//!
//! This crate searches a remote paginated book catalog for items matching a
//! free-text query, combining exact lexical containment with embedding-based
//! cosine similarity, and returns a ranked top-K result set backed by a
//! TTL-bound in-memory snapshot cache.

pub mod catalog;
pub mod config;
pub mod dom;
pub mod embedding;
pub mod engine;
pub mod fetch;
pub mod matcher;
pub mod output;
pub mod server;

use thiserror::Error;

/// Main error type for Bookscout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status_code} for {url}")]
    HttpStatus { url: String, status_code: u16 },

    #[error("Category discovery failed: {0}")]
    Discovery(#[from] catalog::DiscoveryError),

    #[error("Embedding error: {0}")]
    Embedding(#[from] embedding::EmbeddingError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Bookscout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use catalog::{CategoryMap, Record};
pub use config::{Config, SearchMode};
pub use engine::SearchEngine;
pub use matcher::{MatchResult, MatchScore, Matcher};
