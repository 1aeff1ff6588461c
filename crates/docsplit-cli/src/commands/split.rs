//! Split command - write one PDF per logical document.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::Args;
use console::style;
use serde::Serialize;
use tracing::{debug, info};

use docsplit_core::{write_documents, PdfProcessor, SegmentationReport, Segmenter, WrittenDocument};

use super::config::load_config;
use super::{load_pdf, progress_bar};

/// Arguments for the split command.
#[derive(Args)]
pub struct SplitArgs {
    /// Input PDF package
    #[arg(required = true)]
    input: PathBuf,

    /// Output directory (default: <input stem>_split next to the input)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Write all documents directly into the output directory
    #[arg(long)]
    flat: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: SplitFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum SplitFormat {
    /// JSON response
    Json,
    /// Plain text summary
    Text,
}

/// Response printed after a split.
#[derive(Debug, Serialize)]
struct SplitResponse {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    files: Option<Vec<WrittenDocument>>,
}

/// Written next to the split documents.
#[derive(Debug, Serialize)]
struct Manifest<'a> {
    source: &'a Path,
    created_at: DateTime<Utc>,
    page_count: usize,
    processing_time_ms: u64,
    documents: &'a [WrittenDocument],
}

pub async fn run(args: SplitArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    match split(&args, config_path) {
        Ok(files) => {
            let response = SplitResponse {
                success: true,
                message: format!("Successfully split into {} documents", files.len()),
                files: Some(files),
            };
            print_response(&response, args.format)
        }
        Err(e) => {
            let message = if args.input.exists() {
                format!("Error processing PDF: {}", e)
            } else {
                e.to_string()
            };
            print_response(
                &SplitResponse {
                    success: false,
                    message,
                    files: None,
                },
                args.format,
            )?;
            Err(e)
        }
    }
}

fn split(args: &SplitArgs, config_path: Option<&str>) -> anyhow::Result<Vec<WrittenDocument>> {
    let config = load_config(config_path)?;
    let pb = progress_bar();

    info!("Splitting {}", args.input.display());
    pb.set_message("Loading PDF...");
    pb.set_position(10);

    let extractor = load_pdf(&args.input, &config)?;
    debug!("PDF has {} pages", extractor.page_count());

    pb.set_message("Extracting text...");
    pb.set_position(30);
    let pages = extractor.page_inputs()?;

    pb.set_message("Classifying pages...");
    pb.set_position(50);
    let segmenter = Segmenter::from_config(&config)?;
    let report = segmenter.segment(&pages)?;

    pb.set_message("Writing documents...");
    pb.set_position(70);
    let out_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| default_output_dir(&args.input));
    let organize = config.output.organize_by_category && !args.flat;
    let written = write_documents(&extractor, &report.documents, &out_dir, organize)?;

    if config.output.write_manifest {
        write_manifest(&args.input, &out_dir, &report, &written)?;
    }

    pb.finish_and_clear();
    Ok(written)
}

fn default_output_dir(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    input
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(format!("{}_split", stem))
}

fn write_manifest(
    input: &Path,
    out_dir: &Path,
    report: &SegmentationReport,
    written: &[WrittenDocument],
) -> anyhow::Result<()> {
    let manifest = Manifest {
        source: input,
        created_at: Utc::now(),
        page_count: report.page_count,
        processing_time_ms: report.processing_time_ms,
        documents: written,
    };

    let path = out_dir.join("manifest.json");
    fs::write(&path, serde_json::to_string_pretty(&manifest)?)?;
    debug!("Wrote manifest to {}", path.display());
    Ok(())
}

fn print_response(response: &SplitResponse, format: SplitFormat) -> anyhow::Result<()> {
    match format {
        SplitFormat::Json => println!("{}", serde_json::to_string(response)?),
        SplitFormat::Text => {
            let mark = if response.success {
                style("✓").green()
            } else {
                style("✗").red()
            };
            println!("{} {}", mark, response.message);

            for file in response.files.iter().flatten() {
                let d = &file.descriptor;
                println!(
                    "  {:<40} pages {:<9} {:>5.1}%  {}",
                    d.title,
                    d.page_range.to_string(),
                    d.confidence * 100.0,
                    file.path.display()
                );
            }
        }
    }
    Ok(())
}
