//! Boundary detection: contiguous runs of one type become one document.

use tracing::debug;

use crate::error::GroupingError;
use crate::models::document::DocumentGroup;
use crate::models::page::ClassificationRecord;

/// Collapse an ordered page sequence into maximal same-type runs.
///
/// Page indices must ascend by exactly one; anything else is rejected
/// rather than producing overlapping or incomplete documents.
pub fn group(records: &[ClassificationRecord]) -> Result<Vec<DocumentGroup>, GroupingError> {
    let mut groups: Vec<DocumentGroup> = Vec::new();
    let mut scores: Vec<f32> = Vec::new();
    let mut previous: Option<usize> = None;

    for record in records {
        let index = record.page_index;

        if let Some(prev) = previous {
            if index == prev {
                return Err(GroupingError::Duplicate(index));
            }
            if index < prev {
                return Err(GroupingError::OutOfOrder {
                    previous: prev,
                    found: index,
                });
            }
            if index != prev + 1 {
                return Err(GroupingError::Gap {
                    expected: prev + 1,
                    found: index,
                });
            }
        }
        previous = Some(index);

        match groups.last_mut() {
            Some(current) if current.doc_type == record.doc_type => {
                current.pages.push(index);
                scores.push(record.score);
            }
            _ => {
                close_group(&mut groups, &mut scores);
                groups.push(DocumentGroup {
                    doc_type: record.doc_type.clone(),
                    pages: vec![index],
                    confidence: 0.0,
                });
                scores.push(record.score);
            }
        }
    }
    close_group(&mut groups, &mut scores);

    debug!("Grouped {} pages into {} documents", records.len(), groups.len());
    Ok(groups)
}

fn close_group(groups: &mut [DocumentGroup], scores: &mut Vec<f32>) {
    if let Some(last) = groups.last_mut() {
        if !scores.is_empty() {
            last.confidence = scores.iter().sum::<f32>() / scores.len() as f32;
        }
    }
    scores.clear();
}

/// Check that `groups` partition `0..page_count` in order.
pub fn is_partition(groups: &[DocumentGroup], page_count: usize) -> bool {
    let mut expected = 0;
    for group in groups {
        if group.is_empty() {
            return false;
        }
        for &page in &group.pages {
            if page != expected {
                return false;
            }
            expected += 1;
        }
    }
    expected == page_count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::page::UNCLASSIFIED;
    use pretty_assertions::assert_eq;

    fn record(index: usize, doc_type: &str, score: f32) -> ClassificationRecord {
        ClassificationRecord::new(index, doc_type, score)
    }

    #[test]
    fn test_groups_contiguous_runs() {
        let records = vec![
            record(0, "deed_of_trust", 1.0),
            record(1, "deed_of_trust", 0.8),
            record(2, "closing_disclosure", 1.0),
            record(3, "deed_of_trust", 1.0),
        ];
        let groups = group(&records).unwrap();

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].pages, vec![0, 1]);
        assert!((groups[0].confidence - 0.9).abs() < 1e-6);
        assert_eq!(groups[1].pages, vec![2]);
        assert_eq!(groups[2].doc_type, "deed_of_trust");
        assert!(is_partition(&groups, 4));
    }

    #[test]
    fn test_single_type_single_group() {
        let records: Vec<_> = (0..5).map(|i| record(i, UNCLASSIFIED, 0.0)).collect();
        let groups = group(&records).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].first_page(), 0);
        assert_eq!(groups[0].last_page(), 4);
    }

    #[test]
    fn test_empty_input() {
        assert!(group(&[]).unwrap().is_empty());
        assert!(is_partition(&[], 0));
    }

    #[test]
    fn test_rejects_gap() {
        let records = vec![record(0, "a", 1.0), record(2, "a", 1.0)];
        assert_eq!(
            group(&records).unwrap_err(),
            GroupingError::Gap { expected: 1, found: 2 }
        );
    }

    #[test]
    fn test_rejects_duplicate() {
        let records = vec![record(0, "a", 1.0), record(1, "a", 1.0), record(1, "b", 1.0)];
        assert_eq!(group(&records).unwrap_err(), GroupingError::Duplicate(1));
    }

    #[test]
    fn test_rejects_out_of_order() {
        let records = vec![record(3, "a", 1.0), record(2, "a", 1.0)];
        assert_eq!(
            group(&records).unwrap_err(),
            GroupingError::OutOfOrder { previous: 3, found: 2 }
        );
    }

    #[test]
    fn test_partition_over_many_shapes() {
        let palette = ["a", "b", "c"];
        for seed in 0u64..200 {
            let len = (seed % 17) as usize;
            let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            let records: Vec<_> = (0..len)
                .map(|i| {
                    state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                    record(i, palette[(state >> 33) as usize % palette.len()], 1.0)
                })
                .collect();

            let groups = group(&records).unwrap();
            assert!(is_partition(&groups, len), "seed {}", seed);
            for pair in groups.windows(2) {
                assert_ne!(pair[0].doc_type, pair[1].doc_type);
            }
        }
    }

    #[test]
    fn test_is_partition_detects_defects() {
        let groups = vec![
            DocumentGroup { doc_type: "a".into(), pages: vec![0, 1], confidence: 1.0 },
            DocumentGroup { doc_type: "b".into(), pages: vec![3], confidence: 1.0 },
        ];
        assert!(!is_partition(&groups, 4));
        assert!(!is_partition(&groups[..1], 3));
    }
}
