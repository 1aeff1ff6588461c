//! Error types for the docsplit-core library.

use thiserror::Error;

/// Main error type for the docsplit library.
#[derive(Error, Debug)]
pub enum DocsplitError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Page sequence could not be grouped into documents.
    #[error("grouping error: {0}")]
    Grouping(#[from] GroupingError),

    /// Vocabulary could not be built or loaded.
    #[error("vocabulary error: {0}")]
    Vocabulary(#[from] VocabularyError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// Failed to write a split document.
    #[error("failed to write PDF: {0}")]
    Write(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),

    /// Requested page range does not fit the document.
    #[error("invalid page range {start}-{end} for a {page_count}-page document")]
    InvalidRange { start: u32, end: u32, page_count: u32 },

    /// Input exceeds the configured size limit.
    #[error("input is {size} bytes, limit is {limit} bytes")]
    TooLarge { size: usize, limit: usize },
}

/// Structural defects in a classified page sequence.
///
/// These are the only failures the segmentation engine raises: a sequence
/// with gaps or repeated pages would produce overlapping output files.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GroupingError {
    /// A page index was skipped.
    #[error("page sequence has a gap: expected page index {expected}, found {found}")]
    Gap { expected: usize, found: usize },

    /// The same page index appeared twice in a row.
    #[error("page index {0} appears more than once")]
    Duplicate(usize),

    /// Page indices went backwards.
    #[error("page index {found} follows {previous}")]
    OutOfOrder { previous: usize, found: usize },
}

/// Errors related to vocabulary construction.
#[derive(Error, Debug)]
pub enum VocabularyError {
    /// Vocabulary file could not be parsed.
    #[error("failed to parse vocabulary: {0}")]
    Parse(String),

    /// Vocabulary contains no phrases.
    #[error("vocabulary has no phrases")]
    Empty,

    /// A phrase normalized to nothing.
    #[error("empty phrase for document type {doc_type}")]
    EmptyPhrase { doc_type: String },
}

/// Result type for the docsplit library.
pub type Result<T> = std::result::Result<T, DocsplitError>;
