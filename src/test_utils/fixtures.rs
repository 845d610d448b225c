//! On-disk fixtures.

use std::path::PathBuf;
use tempfile::TempDir;

/// Builder for a template tree in a fresh temporary directory.
///
/// ```rust,no_run
/// use pipegen_cli::test_utils::TemplateTree;
///
/// let tree = TemplateTree::new()
///     .file("ci/_pipeline.yml", "name: ${app_name}\n")
///     .file("ci/tasks/build.sh", "echo $${app_name}\n")
///     .dir("ci/empty")
///     .build();
/// assert!(tree.path().join("ci/tasks/build.sh").exists());
/// ```
#[derive(Debug, Default)]
pub struct TemplateTree {
    files: Vec<(PathBuf, String)>,
    dirs: Vec<PathBuf>,
}

impl TemplateTree {
    /// An empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file at `relative` with `content`.
    #[must_use]
    pub fn file(mut self, relative: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.push((relative.into(), content.into()));
        self
    }

    /// Add an empty directory at `relative`.
    #[must_use]
    pub fn dir(mut self, relative: impl Into<PathBuf>) -> Self {
        self.dirs.push(relative.into());
        self
    }

    /// Write the tree and return the directory holding it.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory or any file cannot be created.
    #[must_use]
    pub fn build(self) -> TempDir {
        let root = TempDir::new().expect("create temp dir");
        for dir in &self.dirs {
            std::fs::create_dir_all(root.path().join(dir)).expect("create fixture dir");
        }
        for (relative, content) in &self.files {
            let path = root.path().join(relative);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).expect("create fixture parent dir");
            }
            std::fs::write(&path, content).expect("write fixture file");
        }
        root
    }
}
