//! Core library for splitting composite document packages.
//!
//! This crate provides:
//! - A phrase vocabulary mapping document types to titles and categories
//! - Per-page classification with header-first, pluggable matching strategies
//! - Sequence smoothing and boundary detection into logical documents
//! - PDF page text extraction and page-range splitting

pub mod classify;
pub mod error;
pub mod models;
pub mod pdf;
pub mod pipeline;
pub mod vocabulary;

pub use classify::{HeaderExtractor, MatchStrategy, PageClassifier};
pub use error::{DocsplitError, GroupingError, PdfError, Result, VocabularyError};
pub use models::config::DocsplitConfig;
pub use models::document::{DocumentGroup, OutputDescriptor, PageRange, SegmentationReport};
pub use models::page::{
    ClassificationRecord, PageInput, PageLayout, PageRecord, TextSpan, UNCLASSIFIED,
};
pub use pdf::{write_documents, PdfExtractor, PdfProcessor, WrittenDocument};
pub use pipeline::Segmenter;
pub use vocabulary::{Category, Vocabulary, VocabularyBuilder};
