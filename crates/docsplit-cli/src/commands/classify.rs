//! Classify command - segment a package without writing any documents.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use tracing::{debug, info};

use docsplit_core::models::config::DocsplitConfig;
use docsplit_core::{PageInput, PdfProcessor, SegmentationReport, Segmenter};

use super::config::load_config;
use super::load_pdf;

/// Arguments for the classify command.
#[derive(Args)]
pub struct ClassifyArgs {
    /// Input PDF, or a pages JSON file as written by `docsplit extract`
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: ReportFormat,

    /// Include per-page classifications
    #[arg(long)]
    pages: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ReportFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ClassifyArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Classifying {}", args.input.display());
    let pages = read_pages(&args.input, &config)?;

    let segmenter = Segmenter::from_config(&config)?;
    let mut report = segmenter.segment(&pages)?;
    debug!(
        "{} documents, {} unclassified pages",
        report.documents.len(),
        report.unclassified_pages()
    );

    let output = match args.format {
        ReportFormat::Json => {
            if !args.pages {
                report.pages.clear();
            }
            serde_json::to_string_pretty(&report)?
        }
        ReportFormat::Csv => format_csv(&report, args.pages)?,
        ReportFormat::Text => format_text(&report, args.pages),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Load pages from a PDF or a pages JSON file.
fn read_pages(path: &Path, config: &DocsplitConfig) -> anyhow::Result<Vec<PageInput>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "json" => {
            let content = fs::read_to_string(path)?;
            let pages: Vec<PageInput> = serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Invalid pages file {}: {}", path.display(), e))?;
            Ok(pages)
        }
        "pdf" => Ok(load_pdf(path, config)?.page_inputs()?),
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}

fn format_csv(report: &SegmentationReport, pages: bool) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    if pages {
        wtr.write_record(["page", "doc_type", "score", "continuation"])?;
        for record in &report.pages {
            wtr.write_record([
                (record.page_index + 1).to_string(),
                record.doc_type.clone(),
                format!("{:.3}", record.score),
                record.continuation.to_string(),
            ])?;
        }
    } else {
        wtr.write_record([
            "filename",
            "doc_type",
            "title",
            "category",
            "start_page",
            "end_page",
            "confidence",
        ])?;
        for d in &report.documents {
            wtr.write_record([
                d.filename.clone(),
                d.doc_type.clone(),
                d.title.clone(),
                d.category.to_string(),
                d.page_range.start.to_string(),
                d.page_range.end.to_string(),
                format!("{:.3}", d.confidence),
            ])?;
        }
    }

    let data = wtr.into_inner().map_err(|e| anyhow::anyhow!("{}", e))?;
    Ok(String::from_utf8(data)?)
}

fn format_text(report: &SegmentationReport, pages: bool) -> String {
    let mut lines = vec![format!(
        "{} pages, {} documents ({}ms)",
        report.page_count,
        report.documents.len(),
        report.processing_time_ms
    )];

    for d in &report.documents {
        lines.push(format!(
            "  {:<9} {:<32} {:<10} {:>5.1}%  {}",
            d.page_range.to_string(),
            d.title,
            d.category.as_str(),
            d.confidence * 100.0,
            d.storage_path()
        ));
    }

    if pages {
        lines.push(String::new());
        for record in &report.pages {
            let marker = if record.continuation { " (exhibit)" } else { "" };
            lines.push(format!(
                "  page {:>4}: {} {:.3}{}",
                record.page_index + 1,
                record.doc_type,
                record.score,
                marker
            ));
        }
    }

    lines.join("\n")
}
