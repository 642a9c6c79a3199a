use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xpath2css")]
#[command(about = "Convert xpath locators in source files to css selectors", long_about = None)]
#[command(version)]
pub struct Cli {
    /// File or directory to process
    pub path: PathBuf,

    /// Restore backup files
    #[arg(short, long, conflicts_with = "count")]
    pub restore: bool,

    /// Print total count of xpaths
    #[arg(short, long)]
    pub count: bool,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Do not backup files
    #[arg(short, long)]
    pub no_backup: bool,

    /// Extension of files to process (default from config: php)
    #[arg(long = "ext")]
    pub extension: Option<String>,

    /// Config file (default: xpath2css.toml in current or parent directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
