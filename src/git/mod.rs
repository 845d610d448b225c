//! Git operations wrapper for pipegen
//!
//! The pipeline generator only ever reads from the repository it is run in: the
//! origin remote URL and the checked-out branch feed the `git_repo_uri` and
//! `git_branch` variables. Like the rest of the tool it shells out to the system
//! `git` binary rather than embedding a git library, so whatever remotes,
//! credentials and config the operator already has are respected.
//!
//! # Examples
//!
//! ```rust,no_run
//! use pipegen_cli::git::GitRepo;
//!
//! # fn example() -> anyhow::Result<()> {
//! let repo = GitRepo::new(".");
//! let origin = repo.remote_origin_url()?;
//! let branch = repo.current_branch()?;
//! println!("{origin} @ {branch}");
//! # Ok(())
//! # }
//! ```

pub mod command_builder;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub use command_builder::{GitCommand, GitCommandOutput};

/// A local git working tree the generator reads metadata from.
#[derive(Debug, Clone)]
pub struct GitRepo {
    path: PathBuf,
}

impl GitRepo {
    /// Creates a handle for the repository at `path`. Nothing is checked until a
    /// query runs.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The URL of the `origin` remote.
    ///
    /// # Errors
    ///
    /// Fails when git is missing, the directory is not a repository, or no origin
    /// remote is configured (git exits non-zero in that case).
    pub fn remote_origin_url(&self) -> Result<String> {
        GitCommand::remote_origin_url()
            .current_dir(&self.path)
            .with_context("git_repo_uri")
            .execute_stdout()
            .context("Failed to read origin remote URL")
    }

    /// The checked-out branch name (`HEAD` when detached).
    pub fn current_branch(&self) -> Result<String> {
        GitCommand::abbrev_branch()
            .current_dir(&self.path)
            .with_context("git_branch")
            .execute_stdout()
            .context("Failed to get current branch")
    }

    /// Path to the working tree.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Checks if Git is installed and responds to `git --version`.
#[must_use]
pub fn is_git_installed() -> bool {
    GitCommand::version().execute().is_ok()
}
