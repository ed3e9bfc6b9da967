//! Query matching strategies
//!
//! A [`Matcher`] is built once per search and applied to every record
//! name, in one of two modes:
//! - Lexical: case-insensitive substring containment of the whole query
//! - Embedding: cosine similarity between averaged word vectors
//!
//! Both modes score a name in isolation, so matching can run while the
//! crawl is still streaming records in.

use crate::catalog::Record;
use crate::embedding::model::{NameVectors, WordVectors};
use crate::embedding::{cosine_similarity, normalize_tokens};
use serde::Serialize;
use std::sync::Arc;

/// What a successful match scored.
///
/// Lexical matches carry the query tokens found in the name; embedding
/// matches carry the raw cosine similarity. Serialization is untagged,
/// so a score renders as either a token array or a bare number.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MatchScore {
    Tokens(Vec<String>),
    Similarity(f32),
}

impl MatchScore {
    /// Ranking key: similarities order by value, token lists count as a
    /// full-strength match
    pub fn rank_value(&self) -> f32 {
        match self {
            MatchScore::Tokens(_) => 1.0,
            MatchScore::Similarity(similarity) => *similarity,
        }
    }
}

/// One matched record with its score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub score: MatchScore,
    pub record: Record,
}

/// A query prepared for scoring against record names.
#[derive(Debug)]
pub struct Matcher {
    query: String,
    kind: MatcherKind,
}

#[derive(Debug)]
enum MatcherKind {
    Lexical,
    Embedding(EmbeddingScorer),
}

impl Matcher {
    /// Builds a lexical matcher; the query is trimmed and lower-cased
    pub fn lexical(query: &str) -> Self {
        Self {
            query: query.trim().to_lowercase(),
            kind: MatcherKind::Lexical,
        }
    }

    /// Builds an embedding matcher by vectorizing the query up front
    ///
    /// # Arguments
    ///
    /// * `query` - Raw query text
    /// * `vectors` - Word-vector table used for both query and names
    /// * `name_vectors` - Optional precomputed name vectors, consulted
    ///   before falling back to averaging a name's tokens
    /// * `threshold` - Similarity level a match must exceed
    /// * `match_absolute` - Compare `|similarity|` against the threshold
    ///   instead of the signed value
    /// * `remove_stop_words` - Drop stop words during normalization
    pub fn embedding(
        query: &str,
        vectors: Arc<WordVectors>,
        name_vectors: Option<Arc<NameVectors>>,
        threshold: f32,
        match_absolute: bool,
        remove_stop_words: bool,
    ) -> Self {
        let normalized = query.trim().to_lowercase();
        let tokens = normalize_tokens(&normalized, remove_stop_words);
        let query_vector = vectors.average_vector(&tokens);
        Self {
            query: normalized,
            kind: MatcherKind::Embedding(EmbeddingScorer {
                query_vector,
                vectors,
                name_vectors,
                threshold,
                match_absolute,
                remove_stop_words,
            }),
        }
    }

    /// The normalized query this matcher scores against
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Scores one record name, `None` when it does not match
    pub fn score(&self, name: &str) -> Option<MatchScore> {
        match &self.kind {
            MatcherKind::Lexical => self.score_lexical(name),
            MatcherKind::Embedding(scorer) => scorer.score(name),
        }
    }

    /// Whole-query containment; the token list is the subset of query
    /// tokens present in the name
    fn score_lexical(&self, name: &str) -> Option<MatchScore> {
        let name = name.to_lowercase();
        if !name.contains(&self.query) {
            return None;
        }
        let tokens = self
            .query
            .split_whitespace()
            .filter(|token| name.contains(token))
            .map(str::to_string)
            .collect();
        Some(MatchScore::Tokens(tokens))
    }
}

#[derive(Debug)]
struct EmbeddingScorer {
    query_vector: Vec<f32>,
    vectors: Arc<WordVectors>,
    name_vectors: Option<Arc<NameVectors>>,
    threshold: f32,
    match_absolute: bool,
    remove_stop_words: bool,
}

impl EmbeddingScorer {
    fn score(&self, name: &str) -> Option<MatchScore> {
        let name = name.to_lowercase();
        let similarity = match self
            .name_vectors
            .as_ref()
            .and_then(|table| table.get(&name))
        {
            Some(vector) => cosine_similarity(&self.query_vector, vector),
            None => {
                let tokens = normalize_tokens(&name, self.remove_stop_words);
                let vector = self.vectors.average_vector(&tokens);
                cosine_similarity(&self.query_vector, &vector)
            }
        };

        let level = if self.match_absolute {
            similarity.abs()
        } else {
            similarity
        };
        (level > self.threshold).then(|| MatchScore::Similarity(similarity))
    }
}
