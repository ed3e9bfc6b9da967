use serde::Deserialize;

/// Main configuration structure for Bookscout
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Catalog source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Root URL of the catalog; category discovery starts here
    #[serde(rename = "root-url")]
    pub root_url: String,
}

/// Matching strategy selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Substring containment only; needs no embedding artifacts
    #[default]
    Lexical,

    /// Cosine similarity over averaged word vectors
    Embedding,

    /// Embedding pass first, lexical fallback when it matches nothing
    Hybrid,
}

impl SearchMode {
    /// Default similarity gate for this mode
    ///
    /// Pure embedding mode keeps a strict gate; hybrid can afford a looser
    /// one because the lexical pass backstops it.
    pub fn default_similarity_threshold(self) -> f32 {
        match self {
            SearchMode::Embedding => 0.8,
            SearchMode::Lexical | SearchMode::Hybrid => 0.65,
        }
    }
}

/// Search behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Matching strategy
    #[serde(default)]
    pub mode: SearchMode,

    /// Maximum number of ranked matches returned per search
    #[serde(rename = "top-k", default = "default_top_k")]
    pub top_k: usize,

    /// Similarity gate override; defaults per mode when unset
    #[serde(rename = "similarity-threshold")]
    pub similarity_threshold: Option<f32>,

    /// When true, |similarity| > threshold counts as a match, so strongly
    /// dissimilar vectors also clear the gate
    #[serde(rename = "match-absolute-similarity", default = "default_true")]
    pub match_absolute_similarity: bool,
}

impl SearchConfig {
    /// Effective similarity threshold for the configured mode
    pub fn threshold(&self) -> f32 {
        self.similarity_threshold
            .unwrap_or_else(|| self.mode.default_similarity_threshold())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            mode: SearchMode::default(),
            top_k: default_top_k(),
            similarity_threshold: None,
            match_absolute_similarity: true,
        }
    }
}

/// Snapshot cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// How long a crawled snapshot stays fresh (seconds)
    #[serde(rename = "ttl-seconds", default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl_seconds(),
        }
    }
}

/// Embedding artifact configuration
///
/// Both artifacts are produced offline; tokens in the model are expected to
/// be normalized with the same lemmatize-then-stem pipeline this crate
/// applies to queries and names.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmbeddingConfig {
    /// Path to the word-vector model (JSON); required for embedding/hybrid
    #[serde(rename = "model-path")]
    pub model_path: Option<String>,

    /// Path to the precomputed name -> averaged-vector table (JSON)
    #[serde(rename = "name-vectors-path")]
    pub name_vectors_path: Option<String>,

    /// Drop stop words before averaging token vectors
    #[serde(rename = "remove-stop-words", default)]
    pub remove_stop_words: bool,
}

/// HTTP front-end configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the search API binds to
    #[serde(rename = "bind-addr", default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_top_k() -> usize {
    10
}

fn default_ttl_seconds() -> u64 {
    300
}

fn default_true() -> bool {
    true
}

fn default_bind_addr() -> String {
    "127.0.0.1:5000".to_string()
}
