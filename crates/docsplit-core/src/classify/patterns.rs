//! Common regex patterns for page text handling.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Apostrophes are dropped so "lender's" and "lenders" compare equal
    pub static ref APOSTROPHE: Regex = Regex::new(r"['’‘`]").unwrap();

    // Anything that is not a letter, digit or whitespace
    pub static ref PUNCTUATION: Regex = Regex::new(r"[^\p{L}\p{N}\s]").unwrap();

    pub static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();

    // Running page labels ("Page 2 of 7", "- 3 -") never name a document
    pub static ref PAGE_LABEL: Regex = Regex::new(
        r"(?i)^\s*(?:page\s+\d+(?:\s+of\s+\d+)?|-?\s*\d+\s*-?)\s*$"
    ).unwrap();

    // Lowercase words that may stay lowercase inside a title-cased heading
    pub static ref MINOR_WORD: Regex = Regex::new(
        r"^(?:a|an|and|as|at|by|for|in|of|on|or|the|to|with)$"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_label() {
        assert!(PAGE_LABEL.is_match("Page 2 of 7"));
        assert!(PAGE_LABEL.is_match("page 12"));
        assert!(PAGE_LABEL.is_match("- 3 -"));
        assert!(!PAGE_LABEL.is_match("Page Two Addendum"));
    }

    #[test]
    fn test_minor_word() {
        assert!(MINOR_WORD.is_match("of"));
        assert!(!MINOR_WORD.is_match("trust"));
    }
}
