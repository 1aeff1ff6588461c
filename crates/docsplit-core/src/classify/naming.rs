//! Output naming for grouped documents.

use std::collections::{HashMap, HashSet};

use crate::models::document::{DocumentGroup, OutputDescriptor, PageRange};
use crate::vocabulary::Vocabulary;

/// Turn document groups into output descriptors with unique file names.
///
/// The first document of a type is named `<type>.pdf`, the n-th
/// `<type>_<n>.pdf`. Counters are kept per sanitized stem, and a name that
/// is already taken bumps the counter until it is free. Counters start fresh
/// on every call.
pub fn resolve(groups: &[DocumentGroup], vocabulary: &Vocabulary) -> Vec<OutputDescriptor> {
    let mut counters: HashMap<String, usize> = HashMap::new();
    let mut used: HashSet<String> = HashSet::new();

    groups
        .iter()
        .map(|group| {
            let stem = file_stem(&group.doc_type);
            let count = counters.entry(stem.clone()).or_insert(0);

            let filename = loop {
                *count += 1;
                let candidate = if *count == 1 {
                    format!("{}.pdf", stem)
                } else {
                    format!("{}_{}.pdf", stem, count)
                };
                if used.insert(candidate.clone()) {
                    break candidate;
                }
            };

            OutputDescriptor {
                doc_type: group.doc_type.clone(),
                title: vocabulary.title(&group.doc_type),
                category: vocabulary.category(&group.doc_type),
                filename,
                page_range: PageRange::from_indices(group.first_page(), group.last_page()),
                confidence: group.confidence,
            }
        })
        .collect()
}

/// Keep type identifiers safe to use as a file name.
fn file_stem(doc_type: &str) -> String {
    let stem: String = doc_type
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if stem.is_empty() { "document".to_string() } else { stem }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::page::UNCLASSIFIED;
    use crate::vocabulary::Category;
    use pretty_assertions::assert_eq;

    fn group(doc_type: &str, pages: std::ops::Range<usize>) -> DocumentGroup {
        DocumentGroup {
            doc_type: doc_type.to_string(),
            pages: pages.collect(),
            confidence: 1.0,
        }
    }

    #[test]
    fn test_repeated_types_get_suffixes() {
        let groups = vec![
            group("deed_of_trust", 0..2),
            group("closing_disclosure", 2..3),
            group("deed_of_trust", 3..6),
            group("deed_of_trust", 6..7),
        ];
        let names: Vec<_> = resolve(&groups, &Vocabulary::builtin())
            .into_iter()
            .map(|d| d.filename)
            .collect();

        assert_eq!(
            names,
            vec![
                "deed_of_trust.pdf",
                "closing_disclosure.pdf",
                "deed_of_trust_2.pdf",
                "deed_of_trust_3.pdf",
            ]
        );
    }

    #[test]
    fn test_descriptor_fields() {
        let descriptors = resolve(&[group("deed_of_trust", 4..8)], &Vocabulary::builtin());
        let d = &descriptors[0];
        assert_eq!(d.page_range, PageRange { start: 5, end: 8 });
        assert_eq!(d.category, Category::Legal);
        assert_eq!(d.storage_path(), "legal/deed_of_trust.pdf");
    }

    #[test]
    fn test_unknown_type_goes_to_misc() {
        let descriptors = resolve(&[group(UNCLASSIFIED, 0..3)], &Vocabulary::builtin());
        assert_eq!(descriptors[0].filename, "unclassified.pdf");
        assert_eq!(descriptors[0].category, Category::Misc);
        assert_eq!(descriptors[0].title, "Unclassified");
    }

    #[test]
    fn test_counters_reset_per_call() {
        let vocab = Vocabulary::builtin();
        let groups = [group("promissory_note", 0..1)];
        assert_eq!(resolve(&groups, &vocab)[0].filename, "promissory_note.pdf");
        assert_eq!(resolve(&groups, &vocab)[0].filename, "promissory_note.pdf");
    }

    #[test]
    fn test_sanitized_and_suffixed_names_never_collide() {
        let groups = vec![
            group("hud/va", 0..1),
            group("hud_va", 1..2),
            group("note", 2..3),
            group("note_2", 3..4),
            group("note", 4..5),
        ];
        let names: Vec<_> = resolve(&groups, &Vocabulary::builtin())
            .into_iter()
            .map(|d| d.filename)
            .collect();

        assert_eq!(
            names,
            vec!["hud_va.pdf", "hud_va_2.pdf", "note.pdf", "note_2.pdf", "note_3.pdf"]
        );
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn test_file_stem_sanitized() {
        assert_eq!(file_stem("hud/va addendum"), "hud_va_addendum");
        assert_eq!(file_stem(""), "document");
    }
}
