//! Logical documents produced by segmentation.

use serde::{Deserialize, Serialize};

use super::page::ClassificationRecord;
use crate::vocabulary::Category;

/// A maximal run of contiguous pages sharing one document type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentGroup {
    /// Document type shared by every page in the group.
    pub doc_type: String,

    /// Zero-based page indices, ascending and contiguous.
    pub pages: Vec<usize>,

    /// Mean classifier confidence over the group's pages.
    pub confidence: f32,
}

impl DocumentGroup {
    /// First page index of the group.
    pub fn first_page(&self) -> usize {
        self.pages.first().copied().unwrap_or_default()
    }

    /// Last page index of the group.
    pub fn last_page(&self) -> usize {
        self.pages.last().copied().unwrap_or_default()
    }

    /// Number of pages in the group.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Inclusive, 1-based page range for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

impl PageRange {
    /// Build a display range from zero-based inclusive indices.
    ///
    /// PDF page numbers are `u32`; indices past that saturate at `u32::MAX`.
    pub fn from_indices(first: usize, last: usize) -> Self {
        Self {
            start: page_number(first),
            end: page_number(last),
        }
    }

    /// Number of pages covered.
    pub fn len(&self) -> u32 {
        self.end + 1 - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

impl std::fmt::Display for PageRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Everything the PDF writer needs to produce one output file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputDescriptor {
    /// Inferred document type.
    pub doc_type: String,

    /// Human-readable document title.
    pub title: String,

    /// Storage category.
    pub category: Category,

    /// Unique file name within one segmentation run.
    pub filename: String,

    /// Inclusive 1-based page range.
    pub page_range: PageRange,

    /// Mean classifier confidence over the document's pages.
    pub confidence: f32,
}

impl OutputDescriptor {
    /// Relative storage path: `<category>/<filename>`.
    pub fn storage_path(&self) -> String {
        format!("{}/{}", self.category, self.filename)
    }
}

/// Result of segmenting one input document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SegmentationReport {
    /// Total pages processed.
    pub page_count: usize,

    /// Final per-page classifications, in page order.
    pub pages: Vec<ClassificationRecord>,

    /// One descriptor per logical document, in page order.
    pub documents: Vec<OutputDescriptor>,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl SegmentationReport {
    /// Number of pages the classifier could not assign to any type.
    pub fn unclassified_pages(&self) -> usize {
        self.pages.iter().filter(|r| !r.is_classified()).count()
    }
}

/// One-based page number for a zero-based index.
fn page_number(index: usize) -> u32 {
    u32::try_from(index).map_or(u32::MAX, |i| i.saturating_add(1))
}
