//! Core types for pipegen
//!
//! This module holds the error handling foundation shared by every other module:
//! - [`PipegenError`] - Enumerated error types covering pipegen failure modes
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to the user-friendly format
//!
//! Library code returns [`anyhow::Result`] and raises a [`PipegenError`] with `.into()`
//! where the failure has a name; the CLI entry point turns whatever comes back into an
//! [`ErrorContext`] for display.

pub mod error;

pub use error::{user_friendly_error, ErrorContext, PipegenError};
