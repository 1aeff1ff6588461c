//! Writing split documents to disk.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::PdfProcessor;
use crate::error::Result;
use crate::models::document::OutputDescriptor;

/// A document written to the output directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrittenDocument {
    /// Descriptor the file was produced from.
    #[serde(flatten)]
    pub descriptor: OutputDescriptor,

    /// Path of the written file.
    pub path: PathBuf,
}

/// Write one PDF per descriptor under `out_dir`.
///
/// With `organize` set, files land in `<out_dir>/<category>/<filename>`,
/// otherwise directly in `out_dir`.
pub fn write_documents<P: PdfProcessor + ?Sized>(
    processor: &P,
    descriptors: &[OutputDescriptor],
    out_dir: &Path,
    organize: bool,
) -> Result<Vec<WrittenDocument>> {
    std::fs::create_dir_all(out_dir)?;

    let mut written = Vec::with_capacity(descriptors.len());
    for descriptor in descriptors {
        let dir = if organize {
            out_dir.join(descriptor.category.as_str())
        } else {
            out_dir.to_path_buf()
        };
        std::fs::create_dir_all(&dir)?;

        let range = descriptor.page_range;
        let bytes = processor.extract_range(range.start, range.end)?;

        let path = dir.join(&descriptor.filename);
        std::fs::write(&path, bytes)?;
        debug!("Wrote pages {} to {}", range, path.display());

        written.push(WrittenDocument {
            descriptor: descriptor.clone(),
            path,
        });
    }

    info!("Wrote {} documents to {}", written.len(), out_dir.display());
    Ok(written)
}
