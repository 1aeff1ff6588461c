//! Configuration structures for the segmentation pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the docsplit pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsplitConfig {
    /// Page classifier configuration.
    pub classifier: ClassifierConfig,

    /// Header extraction configuration.
    pub header: HeaderConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Output layout configuration.
    pub output: OutputConfig,

    /// Vocabulary source.
    pub vocabulary: VocabularyConfig,

    /// Classify pages in parallel when the `parallel` feature is enabled.
    pub parallel: bool,
}

impl Default for DocsplitConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            header: HeaderConfig::default(),
            pdf: PdfConfig::default(),
            output: OutputConfig::default(),
            vocabulary: VocabularyConfig::default(),
            parallel: true,
        }
    }
}

/// Matching strategy identifiers, in the order the classifier tries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Whole-token phrase containment.
    ExactPhrase,
    /// Order-insensitive fuzzy token similarity.
    FuzzyToken,
    /// Header similarity blended with body keyword density.
    WeightedBlend,
}

/// Page classifier configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Minimum similarity (0.0 - 1.0) for a phrase match to be accepted.
    pub acceptance_threshold: f32,

    /// Matching strategies, tried in order for each text region.
    pub strategies: Vec<StrategyKind>,

    /// Weight of the header score inside the weighted blend (0.0 - 1.0).
    pub header_weight: f32,

    /// Header tokens marking a page as an exhibit of the previous document.
    pub continuation_markers: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            acceptance_threshold: 0.8,
            strategies: vec![
                StrategyKind::ExactPhrase,
                StrategyKind::FuzzyToken,
                StrategyKind::WeightedBlend,
            ],
            header_weight: 0.6,
            continuation_markers: vec!["exhibit".to_string(), "attachment".to_string()],
        }
    }
}

/// Header extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    /// Fraction of the page height, from the top, searched for bold spans.
    pub top_fraction: f32,

    /// Number of leading text lines considered when no layout is available.
    pub max_lines: usize,

    /// Lines at or above this many characters are treated as body prose.
    pub max_line_length: usize,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            top_fraction: 0.3,
            max_lines: 5,
            max_line_length: 80,
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Reject inputs larger than this many bytes (0 = unlimited).
    pub max_input_bytes: usize,

    /// Maximum pages to process (0 = unlimited).
    pub max_pages: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: 10 * 1024 * 1024,
            max_pages: 0,
        }
    }
}

/// Output layout configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Write each document under a directory named after its category.
    pub organize_by_category: bool,

    /// Write a manifest.json describing the produced documents.
    pub write_manifest: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            organize_by_category: true,
            write_manifest: true,
        }
    }
}

/// Vocabulary source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularyConfig {
    /// JSON vocabulary replacing the built-in one.
    pub path: Option<PathBuf>,
}

impl DocsplitConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: DocsplitConfig =
            serde_json::from_str(r#"{"classifier": {"acceptance_threshold": 0.9}}"#).unwrap();
        assert_eq!(config.classifier.acceptance_threshold, 0.9);
        assert_eq!(config.classifier.strategies.len(), 3);
        assert_eq!(config.header.max_lines, 5);
        assert!(config.parallel);
    }

    #[test]
    fn test_strategy_names() {
        let kinds: Vec<StrategyKind> =
            serde_json::from_str(r#"["fuzzy_token", "exact_phrase"]"#).unwrap();
        assert_eq!(kinds, vec![StrategyKind::FuzzyToken, StrategyKind::ExactPhrase]);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = DocsplitConfig::default();
        config.output.organize_by_category = false;
        config.save(&path).unwrap();

        let loaded = DocsplitConfig::from_file(&path).unwrap();
        assert!(!loaded.output.organize_by_category);
    }
}
