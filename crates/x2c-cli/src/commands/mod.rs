pub mod count;
pub mod restore;
pub mod rewrite;

use anyhow::Result;
use tracing::debug;
use x2c_config::Config;
use x2c_rewrite::{RewriteEngine, RewriteOptions};
use x2c_walk::{ExcludeList, TreeWalker, WalkOptions};

use crate::cli::Cli;

/// Dispatch on the mode flags
pub fn run(cli: &Cli, config: &Config) -> Result<()> {
    let options = walk_options(cli, config);
    debug!("Processing {}", cli.path.display());

    if cli.restore {
        restore::handle(&cli.path, &options, cli.format)
    } else {
        let walker = TreeWalker::new(RewriteEngine::new(rewrite_options(config)), options);
        if cli.count {
            count::handle(&cli.path, &walker, cli.format)
        } else {
            rewrite::handle(&cli.path, &walker, cli.format)
        }
    }
}

/// Config values with command line overrides applied
fn walk_options(cli: &Cli, config: &Config) -> WalkOptions {
    WalkOptions {
        extension: cli
            .extension
            .as_deref()
            .unwrap_or(&config.extension)
            .trim_start_matches('.')
            .to_string(),
        backup: !cli.no_backup,
        backup_suffix: config.backup_suffix.clone(),
        exclude: ExcludeList::new(&config.exclude),
    }
}

fn rewrite_options(config: &Config) -> RewriteOptions {
    RewriteOptions {
        count_routine: config.count_routine.clone(),
        selector_prefix: config.selector_prefix.clone(),
    }
}
