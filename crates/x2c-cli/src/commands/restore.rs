use anyhow::Result;
use std::path::Path;
use x2c_walk::{WalkOptions, restore_tree};

use crate::cli::OutputFormat;

pub fn handle(path: &Path, options: &WalkOptions, format: OutputFormat) -> Result<()> {
    let restored = restore_tree(path, options)?;

    match format {
        OutputFormat::Json => {
            let paths: Vec<String> = restored.iter().map(|p| p.display().to_string()).collect();
            println!("{}", serde_json::json!({ "restored": paths }));
        }
        OutputFormat::Text => {
            if restored.is_empty() {
                println!("No {} files found.", options.backup_file_suffix());
            } else {
                println!("✓ Restored {} file(s)", restored.len());
                for path in &restored {
                    println!("  {}", path.display());
                }
            }
        }
    }

    Ok(())
}
