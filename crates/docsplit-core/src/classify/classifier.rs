//! Per-page document type classification.

use std::sync::Arc;

use tracing::{trace, warn};

use super::normalize::{contains_tokens, normalize, tokens};
use super::strategy::{build_strategies, MatchStrategy, NormalizedPage, PhraseMatch, Region};
use crate::models::config::ClassifierConfig;
use crate::models::page::{ClassificationRecord, PageRecord};
use crate::vocabulary::Vocabulary;

/// Detailed outcome of classifying one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageClassification {
    /// Accepted match, if any.
    pub matched: Option<PhraseMatch>,
    /// Region the accepted match came from.
    pub region: Option<Region>,
    /// Strategy that produced the accepted match.
    pub strategy: Option<&'static str>,
    /// Header carries an exhibit/attachment marker.
    pub continuation: bool,
}

/// Classifies single pages against an injected vocabulary.
///
/// The header candidate is matched first through the whole strategy chain,
/// then the full body text. Within a region the first strategy whose best
/// match reaches the acceptance threshold decides the page.
pub struct PageClassifier {
    vocabulary: Arc<Vocabulary>,
    strategies: Vec<Box<dyn MatchStrategy>>,
    threshold: f32,
    continuation_markers: Vec<String>,
}

impl PageClassifier {
    /// Create a classifier with the default strategy chain.
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self::from_config(vocabulary, &ClassifierConfig::default())
    }

    /// Create a classifier from configuration.
    pub fn from_config(vocabulary: Arc<Vocabulary>, config: &ClassifierConfig) -> Self {
        Self {
            vocabulary,
            strategies: build_strategies(config),
            threshold: config.acceptance_threshold,
            continuation_markers: config
                .continuation_markers
                .iter()
                .map(|m| normalize(m))
                .filter(|m| !m.is_empty())
                .collect(),
        }
    }

    /// Replace the strategy chain.
    pub fn with_strategies(mut self, strategies: Vec<Box<dyn MatchStrategy>>) -> Self {
        self.strategies = strategies;
        self
    }

    /// Set the acceptance threshold.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Vocabulary used by this classifier.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Acceptance threshold.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Classify a page record.
    pub fn classify(&self, page: &PageRecord) -> ClassificationRecord {
        if page.raw_text.trim().is_empty() {
            warn!("Page {} has no text, leaving it unclassified", page.page_index);
        }

        let result = self.classify_detailed(page.header_candidate.as_deref(), &page.raw_text);

        let record = match result.matched {
            Some(m) => ClassificationRecord::new(page.page_index, m.doc_type, m.score),
            None => ClassificationRecord::unclassified(page.page_index),
        };

        trace!(
            "Page {} -> {} ({:.3}) via {:?}",
            page.page_index,
            record.doc_type,
            record.score,
            result.strategy
        );

        record.with_continuation(result.continuation)
    }

    /// Classify raw header and body text, reporting how the decision was made.
    pub fn classify_detailed(&self, header: Option<&str>, body: &str) -> PageClassification {
        let page = NormalizedPage::new(header, body);
        let continuation = self.has_continuation_marker(&page);

        for region in [Region::Header, Region::Body] {
            if page.text(region).is_none() {
                continue;
            }

            for strategy in &self.strategies {
                let Some(found) = strategy.find(region, &page, &self.vocabulary) else {
                    continue;
                };

                if found.score >= self.threshold {
                    return PageClassification {
                        matched: Some(found),
                        region: Some(region),
                        strategy: Some(strategy.name()),
                        continuation,
                    };
                }

                trace!(
                    "{} best in {:?} below threshold: {} ({:.3})",
                    strategy.name(),
                    region,
                    found.doc_type,
                    found.score
                );
            }
        }

        PageClassification {
            matched: None,
            region: None,
            strategy: None,
            continuation,
        }
    }

    fn has_continuation_marker(&self, page: &NormalizedPage) -> bool {
        let Some(header) = page.header() else {
            return false;
        };
        let header_tokens = tokens(header);
        self.continuation_markers
            .iter()
            .any(|marker| contains_tokens(&header_tokens, &tokens(marker)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::strategy::ExactPhrase;
    use crate::models::config::StrategyKind;
    use crate::models::page::UNCLASSIFIED;
    use crate::vocabulary::Category;

    fn vocab() -> Arc<Vocabulary> {
        Arc::new(
            Vocabulary::builder()
                .doc_type("promissory_note", "Promissory Note", Category::Loan, &["promissory note"])
                .doc_type("deed_of_trust", "Deed of Trust", Category::Legal, &["deed of trust"])
                .doc_type("closing_disclosure", "Closing Disclosure", Category::Financial, &["closing disclosure"])
                .build()
                .unwrap(),
        )
    }

    fn page(index: usize, header: Option<&str>, text: &str) -> PageRecord {
        PageRecord {
            page_index: index,
            raw_text: text.to_string(),
            header_candidate: header.map(str::to_string),
        }
    }

    #[test]
    fn test_exact_header_meets_threshold() {
        let classifier = PageClassifier::new(vocab());
        let record = classifier.classify(&page(0, Some("DEED OF TRUST"), "DEED OF TRUST\nThis instrument..."));
        assert_eq!(record.doc_type, "deed_of_trust");
        assert!(record.score >= classifier.threshold());
    }

    #[test]
    fn test_header_wins_over_body() {
        let classifier = PageClassifier::new(vocab());
        let detail = classifier.classify_detailed(
            Some("Promissory Note"),
            "Promissory Note. This note is secured by a deed of trust of even date.",
        );
        assert_eq!(detail.matched.unwrap().doc_type, "promissory_note");
        assert_eq!(detail.region, Some(Region::Header));
        assert_eq!(detail.strategy, Some("exact_phrase"));
    }

    #[test]
    fn test_body_fallback() {
        let classifier = PageClassifier::new(vocab());
        let detail = classifier.classify_detailed(
            Some("Borrower Information"),
            "Borrower Information\nThe figures below reflect the closing disclosure issued at consummation.",
        );
        assert_eq!(detail.matched.unwrap().doc_type, "closing_disclosure");
        assert_eq!(detail.region, Some(Region::Body));
    }

    #[test]
    fn test_fuzzy_header_with_ocr_noise() {
        let config = ClassifierConfig {
            strategies: vec![StrategyKind::ExactPhrase, StrategyKind::FuzzyToken],
            ..ClassifierConfig::default()
        };
        let classifier = PageClassifier::from_config(vocab(), &config);
        let record = classifier.classify(&page(2, Some("DEED 0F TRUST"), "DEED 0F TRUST"));
        assert_eq!(record.doc_type, "deed_of_trust");
        assert!(record.score < 1.0);
    }

    #[test]
    fn test_fuzzy_header_without_intact_tokens() {
        let classifier = PageClassifier::new(vocab());
        let detail = classifier.classify_detailed(Some("PR0MISSORY N0TE"), "PR0MISSORY N0TE");
        let matched = detail.matched.unwrap();
        assert_eq!(matched.doc_type, "promissory_note");
        assert!(matched.score >= classifier.threshold());
        assert_eq!(detail.region, Some(Region::Header));
        assert_eq!(detail.strategy, Some("fuzzy_token"));
    }

    #[test]
    fn test_empty_page_is_unclassified() {
        let classifier = PageClassifier::new(vocab());
        let record = classifier.classify(&page(4, None, "   \n\t"));
        assert_eq!(record.doc_type, UNCLASSIFIED);
        assert_eq!(record.score, 0.0);
        assert_eq!(record.page_index, 4);
    }

    #[test]
    fn test_no_match_is_unclassified() {
        let classifier = PageClassifier::new(vocab());
        let record = classifier.classify(&page(0, Some("Flood Certificate"), "Flood zone determination"));
        assert!(!record.is_classified());
    }

    #[test]
    fn test_continuation_marker() {
        let classifier = PageClassifier::new(vocab());
        let record = classifier.classify(&page(1, Some("EXHIBIT A"), "Legal description of the property"));
        assert!(record.continuation);

        let record = classifier.classify(&page(1, Some("DEED OF TRUST"), "DEED OF TRUST"));
        assert!(!record.continuation);
    }

    #[test]
    fn test_custom_strategy_chain() {
        let classifier = PageClassifier::new(vocab())
            .with_strategies(vec![Box::new(ExactPhrase)])
            .with_threshold(0.5);
        let record = classifier.classify(&page(0, None, "Closing Disclosure"));
        assert_eq!(record.doc_type, "closing_disclosure");
        assert_eq!(record.score, 1.0);
    }
}
