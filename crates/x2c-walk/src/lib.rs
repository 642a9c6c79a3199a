//! File tree handling for xpath2css
//!
//! Walks a file or directory, feeds matching source files to the rewrite
//! engine, writes results back behind a backup, and restores backups.

pub mod backup;
pub mod error;
pub mod exclude;
pub mod walker;

pub use backup::{backup_path, restore_tree, write_backup};
pub use error::{Result, WalkError};
pub use exclude::ExcludeList;
pub use walker::{TreeWalker, WalkOptions, visible_files};
