//! Extract command - dump page texts for inspection or later classification.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use docsplit_core::PdfProcessor;

use super::config::load_config;
use super::{load_pdf, progress_bar};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Output pages JSON file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let pb = progress_bar();

    pb.set_message("Loading PDF...");
    pb.set_position(20);
    let extractor = load_pdf(&args.input, &config)?;

    pb.set_message("Extracting text...");
    pb.set_position(50);
    let pages = extractor.page_inputs()?;
    let empty = pages.iter().filter(|p| p.text.trim().is_empty()).count();
    info!("Extracted {} pages ({} without text)", pages.len(), empty);

    pb.finish_and_clear();

    let json = serde_json::to_string_pretty(&pages)?;
    if let Some(output_path) = &args.output {
        fs::write(output_path, &json)?;
        eprintln!(
            "{} Wrote {} pages to {}",
            style("✓").green(),
            pages.len(),
            output_path.display()
        );
    } else {
        println!("{}", json);
    }

    Ok(())
}
