use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::walker::{WalkOptions, visible_files};
use crate::{Result, WalkError};

/// `<path>.<suffix>`, e.g. `LoginTest.php.bak`
pub fn backup_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

/// Save `original` next to `path` as its backup copy
pub fn write_backup(path: &Path, original: &str, suffix: &str) -> Result<PathBuf> {
    let backup = backup_path(path, suffix);
    std::fs::write(&backup, original).map_err(|source| WalkError::Backup {
        path: backup.clone(),
        source,
    })?;
    debug!("Backed up {} to {}", path.display(), backup.display());
    Ok(backup)
}

/// Rename every `<name>.<ext>.<suffix>` backup under `root` back to
/// `<name>.<ext>`. Other files are left alone.
///
/// Returns the restored paths.
pub fn restore_tree(root: &Path, options: &WalkOptions) -> Result<Vec<PathBuf>> {
    let file_suffix = options.backup_file_suffix();
    let backup_suffix = format!(".{}", options.backup_suffix);

    let mut restored = Vec::new();
    for backup in visible_files(root, &options.exclude)? {
        let Some(name) = backup.to_str() else {
            continue;
        };
        if !name.ends_with(&file_suffix) {
            debug!("Skipping '{}' - not a {} file", name, file_suffix);
            continue;
        }
        let Some(original) = name.strip_suffix(&backup_suffix).map(PathBuf::from) else {
            continue;
        };

        std::fs::rename(&backup, &original).map_err(|source| WalkError::Restore {
            path: backup.clone(),
            source,
        })?;
        debug!("Restored {}", original.display());
        restored.push(original);
    }

    Ok(restored)
}
