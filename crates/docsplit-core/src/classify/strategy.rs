//! Pluggable phrase matching strategies.
//!
//! Each strategy looks at one region of a normalized page (its header
//! candidate or its full body) and reports the single best vocabulary match
//! it can find. The page classifier chains strategies in configured order.

use std::collections::HashMap;

use strsim::normalized_levenshtein;
use tracing::trace;

use super::normalize::{count_token_occurrences, normalize, tokens};
use crate::models::config::{ClassifierConfig, StrategyKind};
use crate::vocabulary::Vocabulary;

const SCORE_EPSILON: f32 = 1e-6;

/// Region of a page a strategy is asked to match against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Header,
    Body,
}

/// Page text after normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedPage {
    header: Option<String>,
    body: String,
}

impl NormalizedPage {
    /// Normalize a page's header candidate and body text.
    pub fn new(header: Option<&str>, body: &str) -> Self {
        Self {
            header: header.map(normalize).filter(|h| !h.is_empty()),
            body: normalize(body),
        }
    }

    /// Normalized header candidate, if any.
    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    /// Normalized body text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Non-empty text of a region.
    pub fn text(&self, region: Region) -> Option<&str> {
        match region {
            Region::Header => self.header(),
            Region::Body => Some(self.body.as_str()).filter(|b| !b.is_empty()),
        }
    }
}

/// Best vocabulary match reported by a strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct PhraseMatch {
    /// Matched document type.
    pub doc_type: String,
    /// Normalized phrase that matched.
    pub phrase: String,
    /// Similarity score (0.0 - 1.0).
    pub score: f32,
    token_count: usize,
}

impl PhraseMatch {
    pub fn new(doc_type: impl Into<String>, phrase: impl Into<String>, score: f32) -> Self {
        let phrase = phrase.into();
        let token_count = tokens(&phrase).len();
        Self {
            doc_type: doc_type.into(),
            phrase,
            score: score.clamp(0.0, 1.0),
            token_count,
        }
    }

    /// Higher score wins; on a tie the phrase with more tokens wins.
    pub fn beats(&self, other: &PhraseMatch) -> bool {
        if (self.score - other.score).abs() > SCORE_EPSILON {
            return self.score > other.score;
        }
        self.token_count > other.token_count
    }
}

fn keep_best(best: &mut Option<PhraseMatch>, candidate: PhraseMatch) {
    match best {
        Some(current) if !candidate.beats(current) => {}
        _ => *best = Some(candidate),
    }
}

/// A matching strategy.
pub trait MatchStrategy: Send + Sync {
    /// Strategy name for logs.
    fn name(&self) -> &'static str;

    /// Find the best vocabulary match in one region of the page.
    fn find(&self, region: Region, page: &NormalizedPage, vocabulary: &Vocabulary) -> Option<PhraseMatch>;
}

/// Whole-token phrase containment. Every hit scores 1.0.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactPhrase;

impl MatchStrategy for ExactPhrase {
    fn name(&self) -> &'static str {
        "exact_phrase"
    }

    fn find(&self, region: Region, page: &NormalizedPage, vocabulary: &Vocabulary) -> Option<PhraseMatch> {
        let text_tokens = tokens(page.text(region)?);
        let mut best = None;

        for entry in vocabulary.entries() {
            if count_token_occurrences(&text_tokens, &entry.tokens()) > 0 {
                keep_best(&mut best, PhraseMatch::new(&entry.doc_type, &entry.phrase, 1.0));
            }
        }

        best
    }
}

/// Order-insensitive fuzzy token similarity.
///
/// For a phrase of `k` tokens, every `k`-token window of the region is
/// compared with the phrase using normalized Levenshtein similarity, both
/// in order and with both token lists sorted. The best window is the phrase
/// score.
#[derive(Debug, Clone, Copy)]
pub struct FuzzyToken {
    min_similarity: f32,
}

impl FuzzyToken {
    /// Create a fuzzy matcher that skips windows which cannot reach
    /// `min_similarity`.
    pub fn new(min_similarity: f32) -> Self {
        Self {
            min_similarity: min_similarity.clamp(0.0, 1.0),
        }
    }
}

impl Default for FuzzyToken {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl MatchStrategy for FuzzyToken {
    fn name(&self) -> &'static str {
        "fuzzy_token"
    }

    fn find(&self, region: Region, page: &NormalizedPage, vocabulary: &Vocabulary) -> Option<PhraseMatch> {
        let text_tokens = tokens(page.text(region)?);
        let mut windows = WindowCache::new(&text_tokens);
        let mut best = None;

        for entry in vocabulary.entries() {
            let phrase_tokens = entry.tokens();
            let score = windows.best_similarity(&phrase_tokens, self.min_similarity);
            if score > 0.0 {
                trace!("fuzzy '{}' -> {:.3}", entry.phrase, score);
                keep_best(&mut best, PhraseMatch::new(&entry.doc_type, &entry.phrase, score));
            }
        }

        best
    }
}

/// Header similarity blended with body keyword density.
///
/// Only answers for the body region. For each document type the best header
/// similarity over its phrases is weighted by `header_weight`, and the body
/// density (phrase occurrences divided by `0.7 x phrase count`, capped at 1)
/// takes the remaining weight.
#[derive(Debug, Clone, Copy)]
pub struct WeightedBlend {
    header_weight: f32,
}

impl WeightedBlend {
    pub fn new(header_weight: f32) -> Self {
        Self {
            header_weight: header_weight.clamp(0.0, 1.0),
        }
    }
}

impl Default for WeightedBlend {
    fn default() -> Self {
        Self::new(0.6)
    }
}

impl MatchStrategy for WeightedBlend {
    fn name(&self) -> &'static str {
        "weighted_blend"
    }

    fn find(&self, region: Region, page: &NormalizedPage, vocabulary: &Vocabulary) -> Option<PhraseMatch> {
        if region != Region::Body {
            return None;
        }

        let body_tokens = tokens(page.text(Region::Body)?);
        let header_tokens = page.header().map(tokens).unwrap_or_default();
        let mut header_windows = WindowCache::new(&header_tokens);
        let mut best = None;

        for info in vocabulary.types() {
            let mut phrase_count = 0usize;
            let mut occurrences = 0usize;
            let mut header_score = 0.0f32;
            let mut top_phrase: Option<(&str, f32)> = None;

            for entry in vocabulary.entries_for(&info.doc_type) {
                let phrase_tokens = entry.tokens();
                let hits = count_token_occurrences(&body_tokens, &phrase_tokens);
                let similarity = header_windows.best_similarity(&phrase_tokens, 0.0);

                phrase_count += 1;
                occurrences += hits;
                header_score = header_score.max(similarity);

                let weight = similarity + hits as f32;
                if weight > 0.0 && top_phrase.is_none_or(|(_, w)| weight > w) {
                    top_phrase = Some((&entry.phrase, weight));
                }
            }

            if phrase_count == 0 {
                continue;
            }

            let density = (occurrences as f32 / (phrase_count as f32 * 0.7)).min(1.0);
            let score = self.header_weight * header_score + (1.0 - self.header_weight) * density;

            if let Some((phrase, _)) = top_phrase {
                if score > 0.0 {
                    trace!(
                        "blend {}: header={:.3} density={:.3} -> {:.3}",
                        info.doc_type, header_score, density, score
                    );
                    keep_best(&mut best, PhraseMatch::new(&info.doc_type, phrase, score));
                }
            }
        }

        best
    }
}

/// A token window joined as-is and with its tokens sorted.
struct Window<'a> {
    plain: String,
    sorted: String,
    tokens: &'a [&'a str],
}

impl<'a> Window<'a> {
    fn new(tokens: &'a [&'a str]) -> Self {
        let mut sorted = tokens.to_vec();
        sorted.sort_unstable();
        Self {
            plain: tokens.join(" "),
            sorted: sorted.join(" "),
            tokens,
        }
    }

    /// Similarity ignoring token order; in-order comparison is kept too so
    /// a misread token does not reshuffle the sorted form.
    fn similarity(&self, other: &Window<'_>) -> f32 {
        let sorted = normalized_levenshtein(&self.sorted, &other.sorted);
        let plain = normalized_levenshtein(&self.plain, &other.plain);
        sorted.max(plain) as f32
    }
}

/// Token windows of a text, cached per window size.
struct WindowCache<'a> {
    tokens: &'a [&'a str],
    by_size: HashMap<usize, Vec<Window<'a>>>,
}

impl<'a> WindowCache<'a> {
    fn new(tokens: &'a [&'a str]) -> Self {
        Self {
            tokens,
            by_size: HashMap::new(),
        }
    }

    fn windows(&mut self, size: usize) -> &[Window<'a>] {
        let tokens = self.tokens;
        self.by_size.entry(size).or_insert_with(|| {
            if tokens.len() <= size {
                return vec![Window::new(tokens)];
            }
            tokens.windows(size).map(Window::new).collect()
        })
    }

    /// Best similarity of `phrase` against any window of its own length.
    ///
    /// Windows whose length difference alone rules out `min_similarity` are
    /// skipped.
    fn best_similarity(&mut self, phrase: &[&str], min_similarity: f32) -> f32 {
        if phrase.is_empty() || self.tokens.is_empty() {
            return 0.0;
        }

        let target = Window::new(phrase);
        let target_len = target.plain.chars().count();
        let mut best = 0.0f32;

        for window in self.windows(phrase.len()) {
            let len = window.plain.chars().count();
            let max_len = len.max(target_len) as f32;
            let ceiling = 1.0 - (len.abs_diff(target_len) as f32 / max_len);
            if ceiling < min_similarity || ceiling <= best {
                continue;
            }

            let score = window.similarity(&target);
            if score > best {
                best = score;
                if best >= 1.0 {
                    break;
                }
            }
        }

        best
    }
}

/// Build the configured strategy chain.
pub fn build_strategies(config: &ClassifierConfig) -> Vec<Box<dyn MatchStrategy>> {
    config
        .strategies
        .iter()
        .map(|kind| -> Box<dyn MatchStrategy> {
            match kind {
                StrategyKind::ExactPhrase => Box::new(ExactPhrase),
                StrategyKind::FuzzyToken => Box::new(FuzzyToken::new(config.acceptance_threshold)),
                StrategyKind::WeightedBlend => Box::new(WeightedBlend::new(config.header_weight)),
            }
        })
        .collect()
}
