//! Embedding-based text comparison
//!
//! Everything needed to compare a query against record names in vector
//! space:
//! - [`preprocess`]: the shared tokenize/lemmatize/stem pipeline
//! - [`model`]: word-vector and name-vector artifact loading
//! - [`math`]: cosine similarity

pub mod math;
pub mod model;
pub mod preprocess;

pub use math::cosine_similarity;
pub use model::{EmbeddingError, NameVectors, WordVectors};
pub use preprocess::{is_stop_word, lemmatize, normalize_tokens, stem, tokenize};
