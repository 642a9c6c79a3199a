use anyhow::Result;
use std::path::Path;
use x2c_walk::TreeWalker;

use crate::cli::OutputFormat;

pub fn handle(path: &Path, walker: &TreeWalker, format: OutputFormat) -> Result<()> {
    let count = walker.count(path)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "xpath_count": count }));
        }
        OutputFormat::Text => {
            println!("Found {} xpaths", count);
        }
    }

    Ok(())
}
