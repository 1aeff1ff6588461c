//! Per-page data flowing through the segmentation pipeline.

use serde::{Deserialize, Serialize};

/// Document type assigned to pages that match nothing in the vocabulary.
pub const UNCLASSIFIED: &str = "unclassified";

/// A single input page as supplied by the PDF collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageInput {
    /// Extracted page text.
    #[serde(default)]
    pub text: String,

    /// Optional span-level layout of the page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<PageLayout>,
}

impl PageInput {
    /// Create a text-only page.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            layout: None,
        }
    }

    /// Attach layout metadata.
    pub fn with_layout(mut self, layout: PageLayout) -> Self {
        self.layout = Some(layout);
        self
    }
}

/// Span-level layout of a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    /// Page height in the same unit as span offsets.
    pub height: f32,

    /// Text spans in extraction order.
    #[serde(default)]
    pub spans: Vec<TextSpan>,
}

/// A styled run of text on a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    /// Span text.
    pub text: String,

    /// Horizontal offset from the left edge.
    #[serde(default)]
    pub x: f32,

    /// Vertical offset from the top edge.
    pub y: f32,

    /// Whether the span is set in a bold face.
    #[serde(default)]
    pub bold: bool,
}

impl TextSpan {
    pub fn new(text: impl Into<String>, x: f32, y: f32, bold: bool) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            bold,
        }
    }
}

/// A page prepared for classification.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRecord {
    /// Zero-based position in the source document.
    pub page_index: usize,

    /// Extracted page text.
    pub raw_text: String,

    /// Heading text isolated by the header extractor.
    pub header_candidate: Option<String>,
}

/// Classification outcome for one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    /// Zero-based position in the source document.
    pub page_index: usize,

    /// Inferred document type, or [`UNCLASSIFIED`].
    pub doc_type: String,

    /// Classifier confidence (0.0 - 1.0).
    pub score: f32,

    /// The page header carries an exhibit/attachment marker.
    #[serde(default)]
    pub continuation: bool,
}

impl ClassificationRecord {
    /// Create an unclassified record.
    pub fn unclassified(page_index: usize) -> Self {
        Self {
            page_index,
            doc_type: UNCLASSIFIED.to_string(),
            score: 0.0,
            continuation: false,
        }
    }

    /// Create a classified record.
    pub fn new(page_index: usize, doc_type: impl Into<String>, score: f32) -> Self {
        Self {
            page_index,
            doc_type: doc_type.into(),
            score,
            continuation: false,
        }
    }

    /// Mark the record as an exhibit/attachment page.
    pub fn with_continuation(mut self, continuation: bool) -> Self {
        self.continuation = continuation;
        self
    }

    /// Check whether the record carries a real document type.
    pub fn is_classified(&self) -> bool {
        self.doc_type != UNCLASSIFIED
    }
}
