use crate::config::types::{
    CacheConfig, CatalogConfig, Config, EmbeddingConfig, SearchConfig, SearchMode, ServerConfig,
};
use crate::ConfigError;
use std::net::SocketAddr;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_catalog_config(&config.catalog)?;
    validate_search_config(&config.search)?;
    validate_cache_config(&config.cache)?;
    validate_embedding_config(&config.embedding, config.search.mode)?;
    validate_server_config(&config.server)?;
    Ok(())
}

/// Validates catalog source configuration
fn validate_catalog_config(config: &CatalogConfig) -> Result<(), ConfigError> {
    if config.root_url.is_empty() {
        return Err(ConfigError::Validation(
            "root_url cannot be empty".to_string(),
        ));
    }

    let url = Url::parse(&config.root_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid root_url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "root_url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    Ok(())
}

/// Validates search behavior configuration
fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    if config.top_k < 1 {
        return Err(ConfigError::Validation(format!(
            "top_k must be >= 1, got {}",
            config.top_k
        )));
    }

    if let Some(threshold) = config.similarity_threshold {
        // Cosine similarity lies in [-1, 1]; the gate compares magnitudes
        if !(threshold > 0.0 && threshold < 1.0) {
            return Err(ConfigError::Validation(format!(
                "similarity_threshold must be strictly between 0 and 1, got {}",
                threshold
            )));
        }
    }

    Ok(())
}

/// Validates cache configuration
fn validate_cache_config(config: &CacheConfig) -> Result<(), ConfigError> {
    if config.ttl_seconds < 1 {
        return Err(ConfigError::Validation(format!(
            "ttl_seconds must be >= 1, got {}",
            config.ttl_seconds
        )));
    }

    Ok(())
}

/// Validates embedding artifact configuration against the selected mode
fn validate_embedding_config(
    config: &EmbeddingConfig,
    mode: SearchMode,
) -> Result<(), ConfigError> {
    if mode != SearchMode::Lexical {
        match &config.model_path {
            Some(path) if !path.is_empty() => {}
            _ => {
                return Err(ConfigError::Validation(
                    "model_path is required for embedding and hybrid search modes".to_string(),
                ));
            }
        }
    }

    if let Some(path) = &config.name_vectors_path {
        if path.is_empty() {
            return Err(ConfigError::Validation(
                "name_vectors_path cannot be empty when set".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates HTTP front-end configuration
fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    config
        .bind_addr
        .parse::<SocketAddr>()
        .map_err(|e| ConfigError::Validation(format!("Invalid bind_addr: {}", e)))?;

    Ok(())
}
