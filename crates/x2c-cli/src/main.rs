mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use x2c_config::Config;

// Narrative for --verbose: every file, candidate and skip reason
const VERBOSE_FILTER: &str = "x2c_cli=debug,x2c_config=debug,x2c_rewrite=debug,x2c_walk=debug,warn";

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let config = Config::load(cli.config.as_deref())?;

    commands::run(&cli, &config)
}
