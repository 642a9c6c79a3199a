use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use x2c_convert::{LocatorConverter, XpathToCss};
use x2c_core::{RewriteOutcome, RunSummary};
use x2c_rewrite::{RewriteEngine, count_markers};

use crate::backup::write_backup;
use crate::{ExcludeList, Result, WalkError};

/// How the walker selects and writes files
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Extension of files to rewrite, without the dot (default: php)
    pub extension: String,
    /// Save `<file>.<backup_suffix>` before writing (default: true)
    pub backup: bool,
    /// Backup suffix without the dot (default: bak)
    pub backup_suffix: String,
    pub exclude: ExcludeList,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            extension: "php".to_string(),
            backup: true,
            backup_suffix: "bak".to_string(),
            exclude: ExcludeList::default(),
        }
    }
}

impl WalkOptions {
    /// File name suffix that identifies backups, e.g. `.php.bak`
    pub fn backup_file_suffix(&self) -> String {
        format!(".{}.{}", self.extension, self.backup_suffix)
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e == self.extension)
            .unwrap_or(false)
    }
}

/// Feeds every matching file under a root to the rewrite engine
pub struct TreeWalker<C = XpathToCss> {
    engine: RewriteEngine<C>,
    options: WalkOptions,
}

impl<C: LocatorConverter> TreeWalker<C> {
    pub fn new(engine: RewriteEngine<C>, options: WalkOptions) -> Self {
        Self { engine, options }
    }

    /// Files under `root` with the target extension, in sorted order
    pub fn source_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let files = visible_files(root, &self.options.exclude)?
            .into_iter()
            .filter(|path| {
                let matched = self.options.matches_extension(path);
                if !matched {
                    debug!(
                        "Skipping '{}' - not a .{} file",
                        path.display(),
                        self.options.extension
                    );
                }
                matched
            })
            .collect();

        Ok(files)
    }

    /// Count quoted marker literals in every visible file, whatever its
    /// extension, changing nothing. Unreadable files are passed over.
    pub fn count(&self, root: &Path) -> Result<usize> {
        let mut total = 0;
        for path in visible_files(root, &self.options.exclude)? {
            let text = match std::fs::read_to_string(&path) {
                Ok(text) => text,
                Err(e) => {
                    debug!("Not counting '{}': {}", path.display(), e);
                    continue;
                }
            };
            let count = count_markers(&text);
            if count > 0 {
                debug!("{}: {} xpath(s)", path.display(), count);
            }
            total += count;
        }
        Ok(total)
    }

    /// Rewrite every source file under `root` and fold the counters
    pub fn rewrite_tree(&self, root: &Path) -> Result<RunSummary> {
        let mut summary = RunSummary {
            marker_count: self.count(root)?,
            ..Default::default()
        };

        for path in self.source_files(root)? {
            let original = read(&path)?;
            let (outcome, written) = self.rewrite_text(&path, &original)?;
            summary.absorb(&outcome, written);
        }

        info!(
            "Rewrote {} file(s): {} replaced, {} skipped",
            summary.files_changed, summary.replaced, summary.skipped
        );
        Ok(summary)
    }

    /// Rewrite one file; returns the outcome and whether the file was written
    pub fn rewrite_file(&self, path: &Path) -> Result<(RewriteOutcome, bool)> {
        let original = read(path)?;
        self.rewrite_text(path, &original)
    }

    fn rewrite_text(&self, path: &Path, original: &str) -> Result<(RewriteOutcome, bool)> {
        debug!("*** {} ***", path.display());
        let outcome = self.engine.rewrite(original);

        if !outcome.changed(original) {
            return Ok((outcome, false));
        }

        if self.options.backup {
            write_backup(path, original, &self.options.backup_suffix)?;
        }
        std::fs::write(path, &outcome.new_text).map_err(|source| WalkError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        Ok((outcome, true))
    }
}

/// All non-hidden, non-excluded files under `root` (or `root` itself),
/// sorted by name for determinism
pub fn visible_files(root: &Path, exclude: &ExcludeList) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(WalkError::NotFound(root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !(is_hidden(e) || is_excluded(root, e, exclude)))
    {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn is_excluded(root: &Path, entry: &DirEntry, exclude: &ExcludeList) -> bool {
    if exclude.is_empty() {
        return false;
    }
    let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
    exclude.is_excluded(&relative.to_string_lossy())
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| WalkError::Read {
        path: path.to_path_buf(),
        source,
    })
}
