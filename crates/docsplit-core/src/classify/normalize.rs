//! Text normalization shared by vocabulary phrases and page text.
//!
//! Every comparison in the classifier runs on normalized text. Phrases are
//! normalized once when the vocabulary is built; page text is normalized by
//! the classifier with this same function.

use super::patterns::{APOSTROPHE, PUNCTUATION, WHITESPACE};

/// Lowercase, strip punctuation and collapse whitespace.
///
/// Apostrophes are removed outright; other punctuation becomes a word
/// break, so "HUD/VA" normalizes to "hud va". The result is idempotent.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let without_apostrophes = APOSTROPHE.replace_all(&lowered, "");
    let spaced = PUNCTUATION.replace_all(&without_apostrophes, " ");
    WHITESPACE.replace_all(spaced.trim(), " ").into_owned()
}

/// Split normalized text into tokens.
pub fn tokens(normalized: &str) -> Vec<&str> {
    normalized.split(' ').filter(|t| !t.is_empty()).collect()
}

/// Check whether `needle` tokens occur contiguously inside `haystack` tokens.
pub fn contains_tokens(haystack: &[&str], needle: &[&str]) -> bool {
    count_token_occurrences(haystack, needle) > 0
}

/// Count non-overlapping contiguous occurrences of `needle` in `haystack`.
pub fn count_token_occurrences(haystack: &[&str], needle: &[&str]) -> usize {
    if needle.is_empty() || needle.len() > haystack.len() {
        return 0;
    }

    let mut count = 0;
    let mut i = 0;
    while i + needle.len() <= haystack.len() {
        if haystack[i..i + needle.len()] == *needle {
            count += 1;
            i += needle.len();
        } else {
            i += 1;
        }
    }
    count
}
