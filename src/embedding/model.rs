//! Embedding model artifacts
//!
//! Two JSON artifacts back embedding search:
//! - A word-vector table: `{"dimension": D, "vectors": {token: [f32; D]}}`
//! - An optional name-vector table: `{name: [f32; D]}`, keyed by
//!   lower-cased record name, for names vectorized ahead of time
//!
//! Both are loaded once at engine construction and shared read-only
//! across all searches.

use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or applying embedding artifacts.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Artifact file could not be read
    #[error("Failed to read embedding artifact {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Artifact file is not valid JSON of the expected shape
    #[error("Failed to parse embedding artifact {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    /// A vector's length disagrees with the declared dimension
    #[error("Vector for '{token}' has dimension {actual}, expected {expected}")]
    DimensionMismatch {
        token: String,
        expected: usize,
        actual: usize,
    },

    /// Embedding search requested without a configured model
    #[error("Embedding search requested but no model is configured")]
    ModelNotConfigured,
}

/// Token-to-vector table with a declared dimension.
#[derive(Debug, serde::Deserialize)]
pub struct WordVectors {
    dimension: usize,
    vectors: HashMap<String, Vec<f32>>,
}

impl WordVectors {
    /// Loads and validates a word-vector artifact from disk
    ///
    /// Every vector must carry exactly the declared dimension; the
    /// first disagreement fails the load.
    pub fn load(path: &Path) -> Result<Self, EmbeddingError> {
        let raw = std::fs::read_to_string(path).map_err(|source| EmbeddingError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let model: WordVectors =
            serde_json::from_str(&raw).map_err(|source| EmbeddingError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        model.validate()?;
        tracing::debug!(
            path = %path.display(),
            dimension = model.dimension,
            tokens = model.vectors.len(),
            "Loaded word vectors"
        );
        Ok(model)
    }

    fn validate(&self) -> Result<(), EmbeddingError> {
        for (token, vector) in &self.vectors {
            if vector.len() != self.dimension {
                return Err(EmbeddingError::DimensionMismatch {
                    token: token.clone(),
                    expected: self.dimension,
                    actual: vector.len(),
                });
            }
        }
        Ok(())
    }

    /// Declared vector dimension
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Looks up the vector for a normalized token
    pub fn get(&self, token: &str) -> Option<&[f32]> {
        self.vectors.get(token).map(Vec::as_slice)
    }

    /// Averages the vectors of the tokens present in the table
    ///
    /// Tokens outside the vocabulary contribute nothing. When no token
    /// resolves, the result is the zero vector, which cosine similarity
    /// maps to `0.0` so unknown text never matches anything.
    pub fn average_vector(&self, tokens: &[String]) -> Vec<f32> {
        let mut sum = vec![0.0f32; self.dimension];
        let mut count = 0usize;
        for token in tokens {
            if let Some(vector) = self.vectors.get(token.as_str()) {
                for (acc, value) in sum.iter_mut().zip(vector) {
                    *acc += value;
                }
                count += 1;
            }
        }
        if count > 0 {
            let scale = 1.0 / count as f32;
            for value in &mut sum {
                *value *= scale;
            }
        }
        sum
    }
}

/// Precomputed record-name vectors, keyed by lower-cased name.
#[derive(Debug)]
pub struct NameVectors {
    vectors: HashMap<String, Vec<f32>>,
}

impl NameVectors {
    /// Loads a name-vector artifact, lower-casing its keys
    pub fn load(path: &Path) -> Result<Self, EmbeddingError> {
        let raw = std::fs::read_to_string(path).map_err(|source| EmbeddingError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let table: HashMap<String, Vec<f32>> =
            serde_json::from_str(&raw).map_err(|source| EmbeddingError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        let vectors = table
            .into_iter()
            .map(|(name, vector)| (name.to_lowercase(), vector))
            .collect::<HashMap<_, _>>();
        tracing::debug!(path = %path.display(), names = vectors.len(), "Loaded name vectors");
        Ok(Self { vectors })
    }

    /// Checks every stored vector against the model dimension
    pub fn validate_dimension(&self, expected: usize) -> Result<(), EmbeddingError> {
        for (name, vector) in &self.vectors {
            if vector.len() != expected {
                return Err(EmbeddingError::DimensionMismatch {
                    token: name.clone(),
                    expected,
                    actual: vector.len(),
                });
            }
        }
        Ok(())
    }

    /// Looks up the precomputed vector for a lower-cased record name
    pub fn get(&self, name: &str) -> Option<&[f32]> {
        self.vectors.get(name).map(Vec::as_slice)
    }
}
