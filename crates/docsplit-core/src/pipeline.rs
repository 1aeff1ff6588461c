//! End-to-end segmentation of an ordered page sequence.

use std::sync::Arc;
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info};

use crate::classify::{self, HeaderExtractor, PageClassifier};
use crate::error::{DocsplitError, Result};
use crate::models::config::DocsplitConfig;
use crate::models::document::SegmentationReport;
use crate::models::page::{ClassificationRecord, PageInput, PageRecord};
use crate::vocabulary::Vocabulary;

/// Splits a page sequence into logical documents.
///
/// Holds no per-run state: the same segmenter can process any number of
/// inputs, and repeated runs over the same pages give identical reports
/// apart from `processing_time_ms`.
pub struct Segmenter {
    vocabulary: Arc<Vocabulary>,
    classifier: PageClassifier,
    header: HeaderExtractor,
    config: DocsplitConfig,
}

impl Segmenter {
    /// Create a segmenter over an explicit vocabulary.
    pub fn new(vocabulary: impl Into<Arc<Vocabulary>>, config: &DocsplitConfig) -> Self {
        let vocabulary = vocabulary.into();
        Self {
            classifier: PageClassifier::from_config(Arc::clone(&vocabulary), &config.classifier),
            header: HeaderExtractor::from_config(&config.header),
            vocabulary,
            config: config.clone(),
        }
    }

    /// Create a segmenter, loading the vocabulary named in the config or
    /// falling back to the built-in one.
    pub fn from_config(config: &DocsplitConfig) -> Result<Self> {
        let vocabulary = match &config.vocabulary.path {
            Some(path) => {
                info!("Loading vocabulary from {}", path.display());
                Arc::new(Vocabulary::from_file(path)?)
            }
            None => Vocabulary::builtin(),
        };
        Ok(Self::new(vocabulary, config))
    }

    /// Segmenter with the built-in vocabulary and default settings.
    pub fn with_defaults() -> Self {
        Self::new(Vocabulary::builtin(), &DocsplitConfig::default())
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn classifier(&self) -> &PageClassifier {
        &self.classifier
    }

    pub fn config(&self) -> &DocsplitConfig {
        &self.config
    }

    /// Segment pages given in document order.
    pub fn segment(&self, pages: &[PageInput]) -> Result<SegmentationReport> {
        let start = Instant::now();

        let limit = self.config.pdf.max_pages;
        if limit > 0 && pages.len() > limit {
            return Err(DocsplitError::Config(format!(
                "input has {} pages, limit is {}",
                pages.len(),
                limit
            )));
        }

        let records = self.prepare(pages);
        let classified = self.classify_all(&records);

        let mut smoothed = classified;
        let repaired = classify::smooth_in_place(&mut smoothed);

        let groups = classify::group(&smoothed)?;
        debug_assert!(classify::is_partition(&groups, smoothed.len()));

        let documents = classify::resolve(&groups, &self.vocabulary);
        let processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            "Segmented {} pages into {} documents ({} pages repaired) in {}ms",
            pages.len(),
            documents.len(),
            repaired,
            processing_time_ms
        );

        Ok(SegmentationReport {
            page_count: pages.len(),
            pages: smoothed,
            documents,
            processing_time_ms,
        })
    }

    /// Segment plain page texts.
    pub fn segment_texts<S: AsRef<str>>(&self, texts: &[S]) -> Result<SegmentationReport> {
        let pages: Vec<PageInput> = texts
            .iter()
            .map(|t| PageInput::from_text(t.as_ref()))
            .collect();
        self.segment(&pages)
    }

    /// Build page records with their header candidates.
    pub fn prepare(&self, pages: &[PageInput]) -> Vec<PageRecord> {
        pages
            .iter()
            .enumerate()
            .map(|(page_index, page)| PageRecord {
                page_index,
                raw_text: page.text.clone(),
                header_candidate: self.header.extract(&page.text, page.layout.as_ref()),
            })
            .collect()
    }

    /// Classify every record, preserving input order.
    pub fn classify_all(&self, records: &[PageRecord]) -> Vec<ClassificationRecord> {
        #[cfg(feature = "parallel")]
        if self.config.parallel && records.len() > 1 {
            debug!("Classifying {} pages in parallel", records.len());
            return records
                .par_iter()
                .map(|r| self.classifier.classify(r))
                .collect();
        }

        debug!("Classifying {} pages", records.len());
        records.iter().map(|r| self.classifier.classify(r)).collect()
    }
}
