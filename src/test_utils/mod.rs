//! Test utilities for pipegen
//!
//! Helpers shared by unit tests and the integration suite (enable the
//! `test-utils` feature to use them from outside the crate):
//!
//! - [`TemplateTree`] - builds a template directory in a temp dir
//! - [`StaticHost`] - a [`HostProbe`](crate::host::HostProbe) with fixed answers,
//!   so tests never depend on the machine's git or docker state
//! - [`ScriptedPrompter`] - replays canned answers and records every question
//! - [`init_test_logging`] - one-time tracing setup for tests
//!
//! # Example
//!
//! ```rust,no_run
//! use pipegen_cli::test_utils::{StaticHost, TemplateTree};
//!
//! let tree = TemplateTree::new().file("ci/pipeline.yml", "name: ${app_name}\n").build();
//! let host = StaticHost::new().with_remote("git@github.com:acme/hello-app.git");
//! ```

pub mod doubles;
pub mod fixtures;

pub use doubles::{ScriptedPrompter, StaticHost};
pub use fixtures::TemplateTree;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` if given, else `RUST_LOG` if set; otherwise logging stays off.
/// Only the first call has any effect.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
