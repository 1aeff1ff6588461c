//! PDF input and output.

mod extractor;
mod writer;

pub use extractor::PdfExtractor;
pub use writer::{write_documents, WrittenDocument};

use crate::error::PdfError;
use crate::models::page::PageInput;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text of every page, in page order.
    fn extract_page_texts(&self) -> Result<Vec<String>>;

    /// Build a standalone PDF holding pages `start..=end` (1-based).
    fn extract_range(&self, start: u32, end: u32) -> Result<Vec<u8>>;

    /// Pages ready for segmentation.
    fn page_inputs(&self) -> Result<Vec<PageInput>> {
        Ok(self
            .extract_page_texts()?
            .into_iter()
            .map(PageInput::from_text)
            .collect())
    }
}
