//! Type-safe Git command builder for consistent command execution
//!
//! Provides a fluent API for building and executing the handful of read-only git
//! queries the derived variable catalog needs, with uniform logging and error
//! mapping.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::core::PipegenError;
use crate::utils::platform::get_git_command;

/// Builder for constructing and executing Git commands.
///
/// Commands run synchronously: resolver rules call git inline while a variable is
/// being resolved, and the next variable may depend on the result.
///
/// # Examples
///
/// ```rust,no_run
/// use pipegen_cli::git::command_builder::GitCommand;
///
/// # fn example() -> anyhow::Result<()> {
/// let url = GitCommand::remote_origin_url()
///     .current_dir("/path/to/repo")
///     .execute_stdout()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct GitCommand {
    /// Command arguments to pass to Git
    args: Vec<String>,

    /// Working directory (passed to git via `-C`)
    current_dir: Option<PathBuf>,

    /// Optional context string for log messages
    context: Option<String>,
}

impl GitCommand {
    /// Creates a new Git command builder with no arguments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the working directory for Git command execution.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Adds a single argument to the Git command.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Adds multiple arguments to the Git command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set a context for logging (e.g. the variable being resolved)
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    fn full_args(&self) -> Vec<String> {
        let mut full_args = Vec::new();
        if let Some(ref dir) = self.current_dir {
            // -C keeps git independent of the process's current directory
            full_args.push("-C".to_string());
            full_args.push(dir.display().to_string());
        }
        full_args.extend(self.args.iter().cloned());
        full_args
    }

    /// Execute the command and return the captured output.
    ///
    /// # Errors
    ///
    /// - The git binary cannot be spawned
    /// - Git exits with a non-zero status ([`PipegenError::CommandFailed`])
    pub fn execute(self) -> Result<GitCommandOutput> {
        let git_command = get_git_command();
        let full_args = self.full_args();
        let command_line = format!("{} {}", git_command, full_args.join(" "));

        match self.context {
            Some(ref ctx) => tracing::debug!(target: "git", "({}) Executing command: {}", ctx, command_line),
            None => tracing::debug!(target: "git", "Executing command: {}", command_line),
        }

        let output = Command::new(git_command)
            .args(&full_args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .with_context(|| format!("Failed to execute {command_line}"))?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            tracing::debug!(
                target: "git",
                "Command failed with exit code: {:?}",
                output.status.code()
            );
            return Err(PipegenError::CommandFailed {
                command: command_line,
                stderr: if stderr.is_empty() {
                    stdout
                } else {
                    stderr
                },
            }
            .into());
        }

        if !stdout.is_empty() {
            tracing::trace!(target: "git", "{}", stdout.trim());
        }

        Ok(GitCommandOutput {
            stdout,
            stderr,
        })
    }

    /// Execute the command and return only stdout as a trimmed string
    pub fn execute_stdout(self) -> Result<String> {
        let output = self.execute()?;
        Ok(output.stdout.trim().to_string())
    }
}

/// Output from a Git command
#[derive(Debug)]
pub struct GitCommandOutput {
    /// Standard output from the Git command
    pub stdout: String,
    /// Standard error output from the Git command
    pub stderr: String,
}

// Convenience builders for the queries the catalog uses

impl GitCommand {
    /// `git config --get remote.origin.url`
    pub fn remote_origin_url() -> Self {
        Self::new().args(["config", "--get", "remote.origin.url"])
    }

    /// `git rev-parse --abbrev-ref HEAD`
    pub fn abbrev_branch() -> Self {
        Self::new().args(["rev-parse", "--abbrev-ref", "HEAD"])
    }

    /// `git --version`
    pub fn version() -> Self {
        Self::new().arg("--version")
    }
}
