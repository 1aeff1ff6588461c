//! PDF page text extraction and page-range splitting using lopdf and pdf-extract.

use lopdf::Document;
use tracing::{debug, trace, warn};

use super::{PdfProcessor, Result};
use crate::error::PdfError;

/// Page form feed emitted by pdf-extract between pages.
const PAGE_BREAK: char = '\x0C';

/// PDF extractor backed by lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    max_input_bytes: usize,
}

impl PdfExtractor {
    /// Create a new PDF extractor without an input size limit.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            max_input_bytes: 0,
        }
    }

    /// Reject inputs larger than `limit` bytes (0 = unlimited).
    pub fn with_max_input_bytes(mut self, limit: usize) -> Self {
        self.max_input_bytes = limit;
        self
    }

    /// Load a PDF file from disk.
    pub fn open(path: &std::path::Path, max_input_bytes: usize) -> Result<Self> {
        let data = std::fs::read(path)
            .map_err(|e| PdfError::Parse(format!("{}: {}", path.display(), e)))?;
        let mut extractor = Self::new().with_max_input_bytes(max_input_bytes);
        extractor.load(&data)?;
        Ok(extractor)
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("No document loaded".to_string()))
    }

    /// Per-page text via pdf-extract, split on form feeds.
    fn fallback_page_texts(&self, page_count: usize) -> Option<Vec<String>> {
        let text = pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| warn!("pdf-extract failed: {}", e))
            .ok()?;

        let mut pages: Vec<String> = text.split(PAGE_BREAK).map(str::to_string).collect();
        if pages.len() == page_count + 1 && pages.last().is_some_and(|p| p.trim().is_empty()) {
            pages.pop();
        }

        if pages.len() == page_count {
            Some(pages)
        } else {
            debug!(
                "pdf-extract produced {} page chunks for {} pages",
                pages.len(),
                page_count
            );
            None
        }
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        if self.max_input_bytes > 0 && data.len() > self.max_input_bytes {
            return Err(PdfError::TooLarge {
                size: data.len(),
                limit: self.max_input_bytes,
            });
        }

        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Many closing packages are "encrypted" with an empty user password
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_page_texts(&self) -> Result<Vec<String>> {
        let doc = self.document()?;
        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();

        let mut texts = Vec::with_capacity(page_numbers.len());
        let mut failed = 0;
        for &number in &page_numbers {
            match doc.extract_text(&[number]) {
                Ok(text) => texts.push(text),
                Err(e) => {
                    trace!("lopdf could not extract page {}: {}", number, e);
                    failed += 1;
                    texts.push(String::new());
                }
            }
        }

        let empty = texts.iter().filter(|t| t.trim().is_empty()).count();
        if failed > 0 || empty == texts.len() {
            if let Some(fallback) = self.fallback_page_texts(page_numbers.len()) {
                debug!("Using pdf-extract page texts");
                return Ok(fallback);
            }
            if failed == texts.len() {
                return Err(PdfError::TextExtraction(
                    "no page text could be extracted".to_string(),
                ));
            }
            if failed > 0 {
                warn!("Text extraction failed on {} pages, using empty text", failed);
            }
        }

        debug!("Extracted text from {} pages", texts.len());
        Ok(texts)
    }

    fn extract_range(&self, start: u32, end: u32) -> Result<Vec<u8>> {
        let doc = self.document()?;
        let page_count = self.page_count();

        if start == 0 || start > end || end > page_count {
            return Err(PdfError::InvalidRange {
                start,
                end,
                page_count,
            });
        }

        let mut part = doc.clone();
        let outside: Vec<u32> = (1..=page_count)
            .filter(|n| *n < start || *n > end)
            .collect();
        part.delete_pages(&outside);
        part.prune_objects();

        let mut bytes = Vec::new();
        part.save_to(&mut bytes)
            .map_err(|e| PdfError::Write(e.to_string()))?;

        trace!("Extracted pages {}-{} ({} bytes)", start, end, bytes.len());
        Ok(bytes)
    }
}
