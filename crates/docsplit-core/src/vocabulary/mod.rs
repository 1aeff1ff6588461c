//! Document type vocabulary.
//!
//! A vocabulary maps canonical phrases to document types, and document types
//! to a display title and a storage [`Category`]. It is immutable once built
//! and shared by every page classified in a run.

mod defaults;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::classify::normalize::{normalize, tokens};
use crate::error::VocabularyError;

use defaults::BUILTIN_TYPES;

/// Result type for vocabulary operations.
pub type Result<T> = std::result::Result<T, VocabularyError>;

/// Phrases longer than this rarely fit a header line.
const MAX_PHRASE_TOKENS: usize = 12;

/// Coarse storage bucket shared by several document types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Loan,
    Legal,
    Financial,
    Property,
    #[default]
    Misc,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Loan => "loan",
            Category::Legal => "legal",
            Category::Financial => "financial",
            Category::Property => "property",
            Category::Misc => "misc",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized phrase and the document type it names.
#[derive(Debug, Clone, PartialEq)]
pub struct VocabularyEntry {
    /// Normalized phrase.
    pub phrase: String,
    /// Document type tag.
    pub doc_type: String,
    token_count: usize,
}

impl VocabularyEntry {
    /// Phrase tokens.
    pub fn tokens(&self) -> Vec<&str> {
        tokens(&self.phrase)
    }

    /// Number of phrase tokens; more tokens means a more specific phrase.
    pub fn token_count(&self) -> usize {
        self.token_count
    }
}

/// Display and storage metadata for a document type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocTypeInfo {
    pub doc_type: String,
    pub title: String,
    pub category: Category,
}

/// Immutable phrase → document type mapping.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    entries: Vec<VocabularyEntry>,
    types: Vec<DocTypeInfo>,
    type_index: HashMap<String, usize>,
}

lazy_static! {
    static ref BUILTIN: Arc<Vocabulary> = {
        let mut builder = Vocabulary::builder();
        for def in BUILTIN_TYPES {
            builder = builder.doc_type(def.doc_type, def.title, def.category, def.phrases);
        }
        Arc::new(builder.build().unwrap())
    };
}

impl Vocabulary {
    /// Built-in mortgage closing package vocabulary.
    pub fn builtin() -> Arc<Vocabulary> {
        Arc::clone(&BUILTIN)
    }

    /// Start building a custom vocabulary.
    pub fn builder() -> VocabularyBuilder {
        VocabularyBuilder::default()
    }

    /// Parse a vocabulary from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: VocabularyFile =
            serde_json::from_str(json).map_err(|e| VocabularyError::Parse(e.to_string()))?;

        let mut builder = Self::builder();
        for entry in file.types {
            let title = entry.title.unwrap_or_else(|| default_title(&entry.doc_type));
            builder = builder.doc_type(&entry.doc_type, &title, entry.category, &entry.phrases[..]);
        }
        builder.build()
    }

    /// Load a vocabulary from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| VocabularyError::Parse(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    /// All phrase entries in definition order.
    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    /// All document types in definition order.
    pub fn types(&self) -> &[DocTypeInfo] {
        &self.types
    }

    /// Phrase entries belonging to one document type.
    pub fn entries_for<'a>(&'a self, doc_type: &'a str) -> impl Iterator<Item = &'a VocabularyEntry> {
        self.entries.iter().filter(move |e| e.doc_type == doc_type)
    }

    /// Storage category of a document type (`misc` when unknown).
    pub fn category(&self, doc_type: &str) -> Category {
        self.info(doc_type).map(|i| i.category).unwrap_or_default()
    }

    /// Display title of a document type.
    pub fn title(&self, doc_type: &str) -> String {
        self.info(doc_type)
            .map(|i| i.title.clone())
            .unwrap_or_else(|| default_title(doc_type))
    }

    fn info(&self, doc_type: &str) -> Option<&DocTypeInfo> {
        self.type_index.get(doc_type).map(|&i| &self.types[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// "deed_of_trust" -> "Deed Of Trust"
fn default_title(doc_type: &str) -> String {
    doc_type
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Incremental vocabulary construction.
#[derive(Debug, Default)]
pub struct VocabularyBuilder {
    types: Vec<DocTypeInfo>,
    phrases: Vec<(String, String)>,
}

impl VocabularyBuilder {
    /// Add a document type with its title, category and phrases.
    pub fn doc_type<S: AsRef<str>>(
        mut self,
        doc_type: &str,
        title: &str,
        category: Category,
        phrases: &[S],
    ) -> Self {
        self.types.push(DocTypeInfo {
            doc_type: doc_type.to_string(),
            title: title.to_string(),
            category,
        });
        for phrase in phrases {
            self.phrases.push((phrase.as_ref().to_string(), doc_type.to_string()));
        }
        self
    }

    /// Add a single phrase for a document type.
    pub fn phrase(mut self, phrase: &str, doc_type: &str) -> Self {
        self.phrases.push((phrase.to_string(), doc_type.to_string()));
        self
    }

    /// Normalize phrases and validate the vocabulary.
    pub fn build(self) -> Result<Vocabulary> {
        let mut types = self.types;
        let mut type_index = HashMap::new();
        let mut entries: Vec<VocabularyEntry> = Vec::with_capacity(self.phrases.len());

        for (i, info) in types.iter().enumerate() {
            type_index.entry(info.doc_type.clone()).or_insert(i);
        }

        for (raw, doc_type) in self.phrases {
            let phrase = normalize(&raw);
            if phrase.is_empty() {
                return Err(VocabularyError::EmptyPhrase { doc_type });
            }
            if tokens(&phrase).len() > MAX_PHRASE_TOKENS {
                warn!("Phrase '{}' for {} is unusually long", phrase, doc_type);
            }

            if let Some(existing) = entries.iter().find(|e| e.phrase == phrase) {
                if existing.doc_type != doc_type {
                    warn!(
                        "Phrase '{}' already maps to {}, ignoring mapping to {}",
                        phrase, existing.doc_type, doc_type
                    );
                }
                continue;
            }

            if !type_index.contains_key(&doc_type) {
                type_index.insert(doc_type.clone(), types.len());
                types.push(DocTypeInfo {
                    title: default_title(&doc_type),
                    doc_type: doc_type.clone(),
                    category: Category::Misc,
                });
            }

            let token_count = tokens(&phrase).len();
            entries.push(VocabularyEntry {
                phrase,
                doc_type,
                token_count,
            });
        }

        if entries.is_empty() {
            return Err(VocabularyError::Empty);
        }

        debug!(
            "Built vocabulary with {} phrases across {} document types",
            entries.len(),
            types.len()
        );

        Ok(Vocabulary {
            entries,
            types,
            type_index,
        })
    }
}

/// On-disk vocabulary format.
#[derive(Debug, Deserialize)]
struct VocabularyFile {
    types: Vec<DocTypeEntry>,
}

#[derive(Debug, Deserialize)]
struct DocTypeEntry {
    doc_type: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    category: Category,
    phrases: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_vocabulary() {
        let vocab = Vocabulary::builtin();
        assert!(!vocab.is_empty());
        assert_eq!(vocab.category("deed_of_trust"), Category::Legal);
        assert_eq!(vocab.category("promissory_note"), Category::Loan);
        assert_eq!(vocab.title("hud_va_addendum"), "HUD/VA Addendum");
        assert!(vocab.entries().iter().any(|e| e.phrase == "lenders closing instructions"));
        assert!(vocab.entries().iter().any(|e| e.phrase == "hud va addendum"));
    }

    #[test]
    fn test_unknown_type_defaults() {
        let vocab = Vocabulary::builtin();
        assert_eq!(vocab.category("unclassified"), Category::Misc);
        assert_eq!(vocab.title("unclassified"), "Unclassified");
        assert_eq!(vocab.title("flood_certificate"), "Flood Certificate");
    }

    #[test]
    fn test_builder_normalizes_phrases() {
        let vocab = Vocabulary::builder()
            .phrase("Deed of Trust!", "deed_of_trust")
            .build()
            .unwrap();
        assert_eq!(vocab.entries()[0].phrase, "deed of trust");
        assert_eq!(vocab.entries()[0].token_count(), 3);
        assert_eq!(vocab.category("deed_of_trust"), Category::Misc);
    }

    #[test]
    fn test_builder_rejects_empty() {
        assert!(matches!(Vocabulary::builder().build(), Err(VocabularyError::Empty)));
        assert!(matches!(
            Vocabulary::builder().phrase(" ?! ", "x").build(),
            Err(VocabularyError::EmptyPhrase { .. })
        ));
    }

    #[test]
    fn test_duplicate_phrase_keeps_first() {
        let vocab = Vocabulary::builder()
            .phrase("settlement statement", "settlement_statement")
            .phrase("Settlement Statement", "closing_disclosure")
            .build()
            .unwrap();
        assert_eq!(vocab.len(), 1);
        assert_eq!(vocab.entries()[0].doc_type, "settlement_statement");
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "types": [
                {"doc_type": "flood_certificate", "category": "property",
                 "phrases": ["Flood Hazard Determination"]},
                {"doc_type": "w9", "title": "Form W-9", "phrases": ["request for taxpayer identification number"]}
            ]
        }"#;
        let vocab = Vocabulary::from_json(json).unwrap();
        assert_eq!(vocab.len(), 2);
        assert_eq!(vocab.category("flood_certificate"), Category::Property);
        assert_eq!(vocab.category("w9"), Category::Misc);
        assert_eq!(vocab.title("w9"), "Form W-9");
        assert_eq!(vocab.entries_for("flood_certificate").count(), 1);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(Vocabulary::from_json("{"), Err(VocabularyError::Parse(_))));
    }
}
