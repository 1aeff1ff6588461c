//! End-to-end segmentation behavior over synthetic closing packages.

use std::sync::Arc;

use docsplit_core::classify::{self, normalize, PageClassifier, Region};
use docsplit_core::models::config::{ClassifierConfig, StrategyKind};
use docsplit_core::{
    Category, DocsplitConfig, PageInput, PageLayout, PageRange, Segmenter, TextSpan, Vocabulary,
    UNCLASSIFIED,
};
use pretty_assertions::assert_eq;

fn small_vocabulary() -> Arc<Vocabulary> {
    Arc::new(
        Vocabulary::builder()
            .doc_type("deed_of_trust", "Deed of Trust", Category::Legal, &["deed of trust"])
            .doc_type(
                "closing_disclosure",
                "Closing Disclosure",
                Category::Financial,
                &["closing disclosure"],
            )
            .doc_type("promissory_note", "Promissory Note", Category::Loan, &["promissory note"])
            .build()
            .unwrap(),
    )
}

fn segmenter() -> Segmenter {
    Segmenter::new(small_vocabulary(), &DocsplitConfig::default())
}

#[test]
fn six_page_package_splits_into_two_documents() {
    let pages = [
        "DEED OF TRUST\nThis Deed of Trust is made between the borrower and the trustee.",
        "DEED OF TRUST (continued)\nCovenants of the borrower follow.",
        "the land is described as lot 4 block 7 of the recorded plat",
        "CLOSING DISCLOSURE\nThis form is a statement of final loan terms.",
        "CLOSING DISCLOSURE\nLoan costs and other costs.",
        "CLOSING DISCLOSURE\nAdditional information about this loan.",
    ];

    let report = segmenter().segment_texts(&pages).unwrap();

    assert_eq!(report.page_count, 6);
    assert_eq!(report.documents.len(), 2);

    let deed = &report.documents[0];
    assert_eq!(deed.filename, "deed_of_trust.pdf");
    assert_eq!(deed.page_range, PageRange { start: 1, end: 3 });
    assert_eq!(deed.storage_path(), "legal/deed_of_trust.pdf");

    let disclosure = &report.documents[1];
    assert_eq!(disclosure.filename, "closing_disclosure.pdf");
    assert_eq!(disclosure.page_range, PageRange { start: 4, end: 6 });
    assert_eq!(disclosure.category, Category::Financial);

    // page 3 was repaired, and keeps its original zero score
    assert_eq!(report.pages[2].doc_type, "deed_of_trust");
    assert_eq!(report.pages[2].score, 0.0);
}

#[test]
fn repeated_type_gets_numbered_filename() {
    let pages = [
        "PROMISSORY NOTE\nFor value received.",
        "DEED OF TRUST\nThe borrower irrevocably grants.",
        "PROMISSORY NOTE\nSecond lien note.",
    ];
    let segmenter = segmenter();

    for _ in 0..2 {
        let report = segmenter.segment_texts(&pages).unwrap();
        let names: Vec<&str> = report.documents.iter().map(|d| d.filename.as_str()).collect();
        assert_eq!(
            names,
            vec!["promissory_note.pdf", "deed_of_trust.pdf", "promissory_note_2.pdf"]
        );
    }
}

#[test]
fn sandwiched_unclassified_page_joins_neighbors() {
    let pages = [
        "PROMISSORY NOTE\nFor value received, I promise to pay.",
        "",
        "PROMISSORY NOTE\nSignatures of the borrowers.",
    ];
    let report = segmenter().segment_texts(&pages).unwrap();

    assert_eq!(report.documents.len(), 1);
    assert_eq!(report.documents[0].page_range, PageRange { start: 1, end: 3 });
    assert!(report.pages.iter().all(|p| p.doc_type == "promissory_note"));
}

#[test]
fn exhibit_page_stays_with_previous_document() {
    let pages = [
        "DEED OF TRUST\nThe borrower irrevocably grants and conveys.",
        "EXHIBIT A\nClosing Disclosure dated at consummation",
        "CLOSING DISCLOSURE\nLoan terms.",
    ];
    let report = segmenter().segment_texts(&pages).unwrap();

    let types: Vec<&str> = report.pages.iter().map(|p| p.doc_type.as_str()).collect();
    assert_eq!(types, vec!["deed_of_trust", "deed_of_trust", "closing_disclosure"]);
}

#[test]
fn leading_unclassified_pages_form_their_own_document() {
    let pages = [
        "fax cover sheet",
        "DEED OF TRUST\nThe borrower irrevocably grants and conveys.",
    ];
    let report = segmenter().segment_texts(&pages).unwrap();

    assert_eq!(report.documents[0].doc_type, UNCLASSIFIED);
    assert_eq!(report.documents[0].category, Category::Misc);
    assert_eq!(report.documents[1].page_range, PageRange { start: 2, end: 2 });
}

#[test]
fn bold_layout_header_is_preferred() {
    let layout = PageLayout {
        height: 792.0,
        spans: vec![
            TextSpan::new("Closing Disclosure", 72.0, 60.0, true),
            TextSpan::new("This note is secured by a deed of trust.", 72.0, 200.0, false),
        ],
    };
    let pages = vec![
        PageInput::from_text("Closing Disclosure\nThis note is secured by a deed of trust.").with_layout(layout),
    ];

    let report = segmenter().segment(&pages).unwrap();
    assert_eq!(report.pages[0].doc_type, "closing_disclosure");
}

#[test]
fn exact_header_reaches_threshold() {
    let vocabulary = Vocabulary::builtin();
    let classifier = PageClassifier::new(Arc::clone(&vocabulary));
    for info in vocabulary.types() {
        let phrase = vocabulary.entries_for(&info.doc_type).next().unwrap().phrase.as_str();
        let detail = classifier.classify_detailed(Some(phrase), phrase);
        let found = detail.matched.unwrap();
        assert!(found.score >= classifier.threshold(), "{}", phrase);
        assert_eq!(detail.region, Some(Region::Header));
    }
}

#[test]
fn body_with_two_phrases_yields_single_best_tag() {
    let config = ClassifierConfig {
        strategies: vec![StrategyKind::FuzzyToken],
        ..ClassifierConfig::default()
    };
    let classifier = PageClassifier::from_config(small_vocabulary(), &config);

    let detail = classifier.classify_detailed(None, "the deed 0f trust secures the promissory note");
    let found = detail.matched.unwrap();
    assert_eq!(found.doc_type, "promissory_note");
    assert_eq!(found.score, 1.0);
}

#[test]
fn normalizer_ignores_case_and_punctuation() {
    assert_eq!(normalize("Deed of Trust!"), normalize("deed of trust"));
    let once = normalize("  HUD/VA  Addendum, Lender's copy ");
    assert_eq!(normalize(&once), once);
}

#[test]
fn grouping_is_a_partition_and_smoothing_is_stable() {
    let headings = [
        "DEED OF TRUST",
        "CLOSING DISCLOSURE",
        "PROMISSORY NOTE",
        "EXHIBIT B",
        "",
        "continued from previous page",
    ];
    let segmenter = segmenter();

    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    for round in 0..100 {
        let len = round % 13;
        let pages: Vec<PageInput> = (0..len)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                let heading = headings[(state % headings.len() as u64) as usize];
                PageInput::from_text(format!("{}\nbody text", heading))
            })
            .collect();

        let report = segmenter.segment(&pages).unwrap();

        assert_eq!(report.pages.len(), len);
        assert_eq!(classify::smooth(&report.pages), report.pages);

        let mut next = 1u32;
        for document in &report.documents {
            assert_eq!(document.page_range.start, next);
            assert!(document.page_range.end >= document.page_range.start);
            next = document.page_range.end + 1;
        }
        assert_eq!(next as usize, len + 1);
    }
}

#[test]
fn vocabulary_from_file_drives_segmentation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vocabulary.json");
    std::fs::write(
        &path,
        r#"{ "types": [ { "doc_type": "flood_certificate", "category": "property", "phrases": ["flood hazard determination"] } ] }"#,
    )
    .unwrap();

    let mut config = DocsplitConfig::default();
    config.vocabulary.path = Some(path);
    let segmenter = Segmenter::from_config(&config).unwrap();

    let report = segmenter
        .segment_texts(&["STANDARD FLOOD HAZARD DETERMINATION\nSection 1", "Section 2"])
        .unwrap();

    assert_eq!(report.documents.len(), 1);
    assert_eq!(report.documents[0].storage_path(), "property/flood_certificate.pdf");
    assert_eq!(report.documents[0].title, "Flood Certificate");
}
