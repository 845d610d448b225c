//! Depth-first traversal of a template tree.
//!
//! [`walk`] visits the root first, then each directory before its contents.
//! Entries within a directory are visited in file-name order so repeated runs
//! produce identical logs and listings. Symbolic links are followed; a link loop
//! is reported as an error.

use anyhow::{Context, Result};
use std::path::Path;
use walkdir::WalkDir;

/// Callbacks for [`walk`].
///
/// `path` is the absolute (or root-joined) path of the entry; `relative` is the
/// path relative to the walk root, empty for the root itself.
pub trait WalkHandler {
    /// Called for every directory, including the root.
    fn on_dir(&mut self, path: &Path, relative: &Path) -> Result<()>;

    /// Called for every regular file.
    fn on_file(&mut self, path: &Path, relative: &Path) -> Result<()>;
}

/// Walk `root`, dispatching every entry to `handler`.
///
/// Stops at the first handler error.
pub fn walk(root: &Path, handler: &mut dyn WalkHandler) -> Result<()> {
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry
            .with_context(|| format!("Failed to read directory entry in: {}", root.display()))?;
        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            handler.on_dir(path, relative)?;
        } else if file_type.is_file() {
            handler.on_file(path, relative)?;
        } else {
            tracing::debug!("Skipping non-regular entry: {}", path.display());
        }
    }
    Ok(())
}
