use anyhow::Result;
use std::path::Path;
use x2c_core::RunSummary;
use x2c_walk::TreeWalker;

use crate::cli::OutputFormat;

pub fn handle(path: &Path, walker: &TreeWalker, format: OutputFormat) -> Result<()> {
    let summary = walker.rewrite_tree(path)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Text => print_summary(&summary),
    }

    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!("Xpath count: {}", summary.marker_count);
    println!("File count: {}", summary.files_matched);
    println!("Replace count: {}", summary.replaced);
    println!("Xpath skip count: {}", summary.skipped);
}
