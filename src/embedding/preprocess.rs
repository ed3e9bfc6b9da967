//! Text normalization pipeline
//!
//! Queries and record names pass through the same pipeline before any
//! vector lookup, so both sides of a comparison see identical tokens:
//! 1. Tokenize into maximal alphabetic runs, lower-cased
//! 2. Optionally drop stop words
//! 3. Lemmatize plural forms, then strip derivational suffixes
//!
//! The lemmatizer and stemmer are rule-based and deliberately light;
//! they only need to be consistent, not linguistically complete.

use std::collections::HashSet;
use std::sync::LazyLock;

/// English stop words, the common function words that carry no topical
/// signal. Single-letter entries absorb the fragments left behind when
/// the tokenizer splits contractions such as "don't".
const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "ain", "all", "am", "an", "and", "any",
    "are", "aren", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "couldn", "d", "did", "didn", "do", "does", "doesn", "doing",
    "don", "down", "during", "each", "few", "for", "from", "further", "had", "hadn", "has",
    "hasn", "have", "haven", "having", "he", "her", "here", "hers", "herself", "him", "himself",
    "his", "how", "i", "if", "in", "into", "is", "isn", "it", "its", "itself", "just", "ll", "m",
    "ma", "me", "mightn", "more", "most", "mustn", "my", "myself", "needn", "no", "nor", "not",
    "now", "o", "of", "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves",
    "out", "over", "own", "re", "s", "same", "shan", "she", "should", "shouldn", "so", "some",
    "such", "t", "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there",
    "these", "they", "this", "those", "through", "to", "too", "under", "until", "up", "ve",
    "very", "was", "wasn", "we", "were", "weren", "what", "when", "where", "which", "while",
    "who", "whom", "why", "will", "with", "won", "wouldn", "y", "you", "your", "yours",
    "yourself", "yourselves",
];

static STOP_WORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ENGLISH_STOP_WORDS.iter().copied().collect());

/// Checks whether a lower-cased word is an English stop word
#[inline]
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Splits text into maximal alphabetic runs, lower-cased
///
/// Digits, punctuation and whitespace all act as separators, so
/// "It's Only the Himalayas" becomes `["it", "s", "only", "the",
/// "himalayas"]`.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphabetic())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_lowercase())
        .collect()
}

/// Reduces a plural form to its singular
///
/// Three rules, applied in order:
/// - "ies" becomes "y" ("stories" to "story")
/// - "es" is dropped after a sibilant stem ("boxes" to "box")
/// - a trailing "s" is dropped unless the word ends in "ss" or "us"
pub fn lemmatize(word: &str) -> String {
    if word.len() > 3 {
        if let Some(base) = word.strip_suffix("ies") {
            return format!("{base}y");
        }
    }
    if let Some(base) = word.strip_suffix("es") {
        if ["ss", "x", "ch", "sh", "z"]
            .iter()
            .any(|suffix| base.ends_with(suffix))
        {
            return base.to_string();
        }
    }
    if word.len() > 2 && word.ends_with('s') && !word.ends_with("ss") && !word.ends_with("us") {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}

/// Suffixes stripped by [`stem`], longest first so compound endings win.
const STEM_SUFFIXES: &[&str] = &["ingly", "edly", "fully", "ness", "ment", "ing", "ed", "ly"];

/// Strips one derivational suffix when a plausible base remains
///
/// A base is plausible when it is at least three characters long and
/// contains a vowel; "sing" and "red" come through unchanged.
pub fn stem(word: &str) -> String {
    for suffix in STEM_SUFFIXES {
        if let Some(base) = word.strip_suffix(suffix) {
            if base.len() >= 3 && base.chars().any(|c| "aeiou".contains(c)) {
                return base.to_string();
            }
        }
    }
    word.to_string()
}

/// Runs the full pipeline over a piece of text
///
/// # Arguments
///
/// * `text` - Raw query or record name
/// * `remove_stop_words` - Drop stop words before normalization
///
/// # Returns
///
/// Normalized tokens in their original order, possibly empty
pub fn normalize_tokens(text: &str, remove_stop_words: bool) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|token| !remove_stop_words || !is_stop_word(token))
        .map(|token| stem(&lemmatize(&token)))
        .collect()
}
