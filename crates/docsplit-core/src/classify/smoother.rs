//! Sequence repair over per-page classifications.
//!
//! Pages without a recognizable heading are usually continuation pages of
//! the document before them. One left-to-right pass applies, per record:
//!
//! 1. Exhibit/attachment pages inherit the previous page's type whenever the
//!    previous page is classified, whatever the classifier said.
//! 2. An unclassified page between two pages of the same type takes that
//!    type.
//! 3. Otherwise an unclassified page takes the previous page's type.
//!
//! The previous page is always read after its own repair, so runs of
//! unclassified pages collapse into the document before them. Only a run at
//! the very start of the sequence can stay unclassified. Running the pass
//! again changes nothing.

use tracing::debug;

use crate::models::page::ClassificationRecord;

/// Repair a classified page sequence. Only `doc_type` fields change.
pub fn smooth(records: &[ClassificationRecord]) -> Vec<ClassificationRecord> {
    let mut smoothed = records.to_vec();
    smooth_in_place(&mut smoothed);
    smoothed
}

/// Why a page took its neighbor's type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Repair {
    Exhibit,
    Sandwiched,
    Continuation,
}

/// In-place variant of [`smooth`]. Returns the number of repaired pages.
pub fn smooth_in_place(records: &mut [ClassificationRecord]) -> usize {
    let mut repaired = 0;

    for i in 1..records.len() {
        let previous = &records[i - 1];
        if !previous.is_classified() {
            continue;
        }
        let previous_type = previous.doc_type.clone();
        let current = &records[i];

        let repair = if current.continuation {
            Repair::Exhibit
        } else if current.is_classified() {
            continue;
        } else if records
            .get(i + 1)
            .is_some_and(|next| next.doc_type == previous_type)
        {
            Repair::Sandwiched
        } else {
            Repair::Continuation
        };

        if records[i].doc_type != previous_type {
            debug!(
                "Page {}: {} -> {} ({:?})",
                records[i].page_index, records[i].doc_type, previous_type, repair
            );
            records[i].doc_type = previous_type;
            repaired += 1;
        }
    }

    debug!("Smoothing repaired {} of {} pages", repaired, records.len());
    repaired
}
