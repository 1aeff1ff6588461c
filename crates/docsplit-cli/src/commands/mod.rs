//! CLI command implementations.

pub mod classify;
pub mod config;
pub mod extract;
pub mod split;

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};

use docsplit_core::PdfExtractor;
use docsplit_core::models::config::DocsplitConfig;

/// Spinner used while a single input is processed.
pub(crate) fn progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(100);
    if let Ok(style) =
        ProgressStyle::default_bar().template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
    {
        pb.set_style(style.progress_chars("##-"));
    }
    pb
}

/// Read and load a PDF, honoring the configured size limit.
pub(crate) fn load_pdf(path: &Path, config: &DocsplitConfig) -> anyhow::Result<PdfExtractor> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }

    Ok(PdfExtractor::open(path, config.pdf.max_input_bytes)?)
}
