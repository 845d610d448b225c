//! Error handling for pipegen
//!
//! This module provides the error types and user-friendly error reporting for the
//! pipeline generator. The error system follows two principles:
//! 1. **Strongly-typed errors** for the failures the resolver and template engine raise
//! 2. **User-friendly messages** with actionable suggestions for operators at the terminal
//!
//! # Architecture
//!
//! - [`PipegenError`] - Enumerated error types for every user-visible failure
//! - [`ErrorContext`] - Wrapper that adds a suggestion and details for CLI display
//! - [`user_friendly_error`] - Converts any [`anyhow::Error`] into an [`ErrorContext`]
//!
//! # Error Categories
//!
//! - **Resolution**: [`PipegenError::CyclicDependency`], [`PipegenError::UnsupportedRepoUri`],
//!   [`PipegenError::PromptFailed`]
//! - **External commands**: [`PipegenError::CommandFailed`]
//! - **File system**: [`PipegenError::TemplateRootNotFound`], [`PipegenError::FileSystemError`]
//! - **Configuration**: [`PipegenError::ValuesFileParse`], [`PipegenError::ConfigError`]
//!
//! # Examples
//!
//! ```rust,no_run
//! use pipegen_cli::core::{PipegenError, user_friendly_error};
//!
//! let error = PipegenError::CyclicDependency {
//!     chain: vec!["a".to_string(), "b".to_string(), "a".to_string()],
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for pipegen operations.
///
/// Each variant names a specific failure mode and carries the values an operator
/// needs to understand it (the variable chain, the offending URI, the file path).
///
/// Errors in the resolution pass are fatal for the whole run: the template engine
/// stops at the first one and no partial-output cleanup is attempted. Re-running the
/// generator overwrites whatever was written before the failure.
#[derive(Error, Debug, Clone)]
pub enum PipegenError {
    /// A resolver rule requested (directly or transitively) the variable it is computing.
    ///
    /// The chain lists the variables on the resolution stack in order, ending with the
    /// repeated name, e.g. `docker_image -> docker_repo -> docker_image`.
    #[error("Cyclic dependency detected: {}", chain.join(" -> "))]
    CyclicDependency {
        /// Variable names that formed the cycle, including the repeated name last
        chain: Vec<String>,
    },

    /// The repository URI is in HTTPS form where only the SSH form is understood.
    #[error("Unsupported repository URI '{uri}': only SSH-style URIs (git@host:owner/repo.git) can be parsed")]
    UnsupportedRepoUri {
        /// The repository URI that could not be parsed
        uri: String,
    },

    /// The template root directory does not exist or is not a directory.
    #[error("Template directory not found: {path}")]
    TemplateRootNotFound {
        /// The configured template root
        path: String,
    },

    /// A file system operation failed while processing the template tree.
    #[error("File system error during {operation}: {path}")]
    FileSystemError {
        /// The operation being performed (e.g. "copy", "write", "chmod")
        operation: String,
        /// The path involved
        path: String,
        /// Underlying reason
        reason: String,
    },

    /// The values file exists but is not a flat name-to-value mapping.
    #[error("Invalid values file {path}: {reason}")]
    ValuesFileParse {
        /// Path to the values file
        path: String,
        /// Why it could not be used
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// Reading an answer from the operator failed (closed stdin, I/O error).
    #[error("Failed to read a value for '{name}': {reason}")]
    PromptFailed {
        /// The variable being asked for
        name: String,
        /// Why the prompt failed
        reason: String,
    },

    /// An external command exited unsuccessfully.
    #[error("Command failed: {command}")]
    CommandFailed {
        /// The command line that was executed
        command: String,
        /// Error output from the command
        stderr: String,
    },

    /// Any other error
    #[error("{message}")]
    Other {
        /// The error message
        message: String,
    },
}

/// Error context wrapper that provides user-friendly error information.
///
/// Pairs a [`PipegenError`] with an optional suggestion and optional details. The
/// CLI prints it via [`ErrorContext::display`]; tests and logs use the [`Display`]
/// implementation.
///
/// [`Display`]: std::fmt::Display
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: PipegenError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: PipegenError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    ///
    /// Suggestions are displayed in green to draw attention.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining why the error occurred.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors.
    ///
    /// - Error message: red and bold
    /// - Details: yellow
    /// - Suggestion: green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions.
///
/// Walks the `anyhow` chain looking for a [`PipegenError`] (which may be wrapped by
/// `.context(...)` calls) or a [`std::io::Error`]. Anything else is reported with its
/// full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    for cause in error.chain() {
        if let Some(pipegen_error) = cause.downcast_ref::<PipegenError>() {
            return create_error_context(pipegen_error.clone());
        }
    }

    for cause in error.chain() {
        if let Some(io_error) = cause.downcast_ref::<std::io::Error>() {
            match io_error.kind() {
                std::io::ErrorKind::PermissionDenied => {
                    return ErrorContext::new(PipegenError::FileSystemError {
                        operation: "file access".to_string(),
                        path: "unknown".to_string(),
                        reason: io_error.to_string(),
                    })
                    .with_suggestion(
                        "Check ownership and permissions of the template and output directories",
                    )
                    .with_details(format_chain(&error));
                }
                std::io::ErrorKind::NotFound => {
                    return ErrorContext::new(PipegenError::FileSystemError {
                        operation: "file access".to_string(),
                        path: "unknown".to_string(),
                        reason: io_error.to_string(),
                    })
                    .with_suggestion("Check that the file or directory exists and the path is correct")
                    .with_details(format_chain(&error));
                }
                _ => {}
            }
        }
    }

    ErrorContext::new(PipegenError::Other {
        message: format_chain(&error),
    })
}

/// Render an error with its cause chain, one cause per line.
fn format_chain(error: &anyhow::Error) -> String {
    let mut message = error.to_string();

    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    message
}

/// Map each [`PipegenError`] variant to a context with tailored suggestions.
fn create_error_context(error: PipegenError) -> ErrorContext {
    let ctx = ErrorContext::new(error.clone());
    match error {
        PipegenError::CyclicDependency { .. } => ctx
            .with_suggestion("Break the cycle by setting one of the listed variables in the values file")
            .with_details("A derived variable rule requested itself through the chain shown above; this is a rule-authoring bug"),

        PipegenError::UnsupportedRepoUri { uri } => ctx
            .with_suggestion(format!(
                "Set 'git_user' explicitly in the values file, or switch the origin remote to SSH form (current: {uri})"
            ))
            .with_details("The git user can only be derived from URIs of the form git@host:user/repo.git"),

        PipegenError::TemplateRootNotFound { .. } => {
            ctx.with_suggestion("Pass --templates <dir> or set 'templates' in pipegen.toml")
        }

        PipegenError::FileSystemError { reason, .. } => ctx
            .with_suggestion("Check that the output directory is writable; re-running overwrites partial output")
            .with_details(reason),

        PipegenError::ValuesFileParse { path, .. } => ctx.with_suggestion(format!(
            "Fix or remove {path}; it must be a YAML mapping of variable names to strings"
        )),

        PipegenError::ConfigError { .. } => ctx
            .with_suggestion("Check the TOML syntax and field names in pipegen.toml")
            .with_details("Supported keys: templates, output, values_file, kube_config, docker_command, placeholder_prefix"),

        PipegenError::PromptFailed { .. } => {
            ctx.with_suggestion("Run in a terminal, or pass --defaults to accept every computed default")
        }

        PipegenError::CommandFailed { stderr, .. } => ctx
            .with_suggestion("Try running the command manually for more details")
            .with_details(stderr),

        PipegenError::Other { .. } => ctx,
    }
}
