//! WASM bindings for document package segmentation.
//!
//! The host extracts page text (and optionally span layout) itself and hands
//! the pages over as an array of `{ text, layout? }` objects.

use std::sync::Arc;

use wasm_bindgen::prelude::*;

use docsplit_core::models::config::DocsplitConfig;
use docsplit_core::{PageInput, SegmentationReport, Segmenter, Vocabulary};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Segment pages with the built-in vocabulary and default settings.
#[wasm_bindgen]
pub fn segment_pages(pages: JsValue) -> Result<JsValue, JsValue> {
    let pages: Vec<PageInput> = serde_wasm_bindgen::from_value(pages)?;
    let report = Segmenter::with_defaults().segment(&pages).map_err(to_js)?;
    to_value(&report)
}

/// Segment plain page texts with the built-in vocabulary.
#[wasm_bindgen]
pub fn segment_texts(texts: Vec<String>) -> Result<JsValue, JsValue> {
    let report = Segmenter::with_defaults()
        .segment_texts(&texts)
        .map_err(to_js)?;
    to_value(&report)
}

/// Normalize text the way vocabulary phrases are normalized.
#[wasm_bindgen]
pub fn normalize_text(text: &str) -> String {
    docsplit_core::classify::normalize(text)
}

/// Configurable segmenter for repeated use from JavaScript.
#[wasm_bindgen(js_name = Segmenter)]
pub struct SegmenterJs {
    inner: Segmenter,
}

#[wasm_bindgen(js_class = Segmenter)]
impl SegmenterJs {
    /// Create a segmenter with the built-in vocabulary.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: Segmenter::with_defaults(),
        }
    }

    /// Create a segmenter from JSON config and an optional JSON vocabulary.
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(config: &str, vocabulary: Option<String>) -> Result<SegmenterJs, JsValue> {
        Ok(Self {
            inner: build_segmenter(config, vocabulary.as_deref())?,
        })
    }

    /// Segment an array of `{ text, layout? }` pages.
    #[wasm_bindgen]
    pub fn segment(&self, pages: JsValue) -> Result<JsValue, JsValue> {
        let pages: Vec<PageInput> = serde_wasm_bindgen::from_value(pages)?;
        let report = self.inner.segment(&pages).map_err(to_js)?;
        to_value(&report)
    }

    /// Document types known to this segmenter.
    #[wasm_bindgen(js_name = docTypes)]
    pub fn doc_types(&self) -> Vec<String> {
        self.inner
            .vocabulary()
            .types()
            .iter()
            .map(|t| t.doc_type.clone())
            .collect()
    }
}

impl Default for SegmenterJs {
    fn default() -> Self {
        Self::new()
    }
}

fn build_segmenter(config: &str, vocabulary: Option<&str>) -> Result<Segmenter, String> {
    let config: DocsplitConfig = if config.trim().is_empty() {
        DocsplitConfig::default()
    } else {
        serde_json::from_str(config).map_err(|e| format!("invalid config: {}", e))?
    };

    let vocabulary = match vocabulary {
        Some(json) => Arc::new(Vocabulary::from_json(json).map_err(|e| e.to_string())?),
        None => Vocabulary::builtin(),
    };

    Ok(Segmenter::new(vocabulary, &config))
}

fn to_value(report: &SegmentationReport) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(report).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn to_js<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_segmenter_with_custom_vocabulary() {
        let vocabulary = r#"{ "types": [ { "doc_type": "flood_certificate", "phrases": ["flood hazard determination"] } ] }"#;
        let segmenter = build_segmenter(r#"{ "parallel": false }"#, Some(vocabulary)).unwrap();

        let report = segmenter
            .segment_texts(&["FLOOD HAZARD DETERMINATION", "page two"])
            .unwrap();
        assert_eq!(report.documents.len(), 1);
        assert_eq!(report.documents[0].filename, "flood_certificate.pdf");
        assert_eq!(report.documents[0].storage_path(), "misc/flood_certificate.pdf");
    }

    #[test]
    fn test_build_segmenter_rejects_bad_config() {
        assert!(build_segmenter("{ not json", None).is_err());
        assert!(build_segmenter("", Some(r#"{ "types": [] }"#)).is_err());
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("Lender's Closing Instructions!"), "lenders closing instructions");
    }
}
